//! AI chat transcript conversion.
//!
//! Classifies a raw transcript dump by [`Dialect`], rewrites it into
//! normalized markdown with consistent turn markers, and emits a TypeScript
//! module exporting the result as a template-literal string constant.

mod dialect;
mod dispatch;
mod emitter;
mod rewrite;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub use dialect::{Dialect, UnknownDialect};
pub use dispatch::{Dispatched, dispatch};
pub use emitter::{TranscriptModule, export_name_from_path, session_date, template_escape};
pub use rewrite::{TURN_SEPARATOR, escape_backticks, escape_fences, rewrite};

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to read transcript {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write module {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Options for converting one transcript.
#[derive(Debug, Clone, Default)]
pub struct TranscriptOptions {
    /// Name of the exported constant; derived from the input filename when absent.
    pub export_name: Option<String>,
    /// Skip detection and use this dialect.
    pub format: Option<Dialect>,
}

/// Classify, rewrite and wrap transcript text.
pub fn convert_text(text: &str, source: &Path, opts: &TranscriptOptions) -> TranscriptModule {
    let Dispatched { dialect, body } = dispatch(text, opts.format);
    TranscriptModule {
        export_name: opts
            .export_name
            .clone()
            .unwrap_or_else(|| export_name_from_path(source)),
        dialect,
        session_date: session_date(dialect, text),
        body,
    }
}

/// Convert the transcript at `input` and write the module to `output`.
pub fn convert_file(
    input: &Path,
    output: &Path,
    opts: &TranscriptOptions,
) -> Result<TranscriptModule, TranscriptError> {
    let text = fs::read_to_string(input)
        .map_err(|e| TranscriptError::ReadError { path: input.to_path_buf(), source: e })?;

    let module = convert_text(&text, input, opts);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| TranscriptError::WriteError { path: output.to_path_buf(), source: e })?;
    }
    fs::write(output, module.render())
        .map_err(|e| TranscriptError::WriteError { path: output.to_path_buf(), source: e })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        format = %module.dialect,
        export = %module.export_name,
        "converted transcript"
    );
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn convert_file_writes_module() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("web-chat.txt");
        let output = tmp.path().join("out/web-chat.ts");
        fs::write(&input, "Human: hi\n\nAssistant: hello").unwrap();

        let module = convert_file(&input, &output, &TranscriptOptions::default()).unwrap();
        assert_eq!(module.dialect, Dialect::WebChat);
        assert_eq!(module.export_name, "web_chatTranscript");

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("export const web_chatTranscript = `# Claude.ai Conversation\n"));
        assert!(written.ends_with("`;"));
    }

    #[test]
    fn explicit_export_name_wins() {
        let opts = TranscriptOptions { export_name: Some("custom".into()), format: None };
        let module = convert_text("text", Path::new("x.md"), &opts);
        assert_eq!(module.export_name, "custom");
        assert_eq!(module.dialect, Dialect::Unknown);
    }

    #[test]
    fn missing_input_is_read_error() {
        let tmp = tempdir().unwrap();
        let err = convert_file(
            &tmp.path().join("nope.md"),
            &tmp.path().join("out.ts"),
            &TranscriptOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TranscriptError::ReadError { .. }));
    }
}
