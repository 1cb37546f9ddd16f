//! Data structures for shortcode conversion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting shortcodes in a file.
#[derive(Debug, Error)]
pub enum ShortcodeError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which Hugo shortcode was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcodeKind {
    /// `{{< imgs size="..." imgs="a.png,b.png" >}}`
    Imgs,
    /// `{{< permalink >}}`
    Permalink,
}

/// A shortcode occurrence with its byte span in the source document.
#[derive(Debug, Clone)]
pub struct ShortcodeMatch {
    pub kind: ShortcodeKind,
    /// Byte offset start in the document
    pub start: usize,
    /// Byte offset end in the document
    pub end: usize,
    /// Original text of the shortcode
    pub original: String,
    /// `key="value"` parameters in source order
    pub params: Vec<(String, String)>,
}

impl ShortcodeMatch {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Astro components a shortcode can turn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    SingleImage,
    ImageGallery,
    Permalink,
}

impl Component {
    pub fn name(&self) -> &'static str {
        match self {
            Component::SingleImage => "SingleImage",
            Component::ImageGallery => "ImageGallery",
            Component::Permalink => "PermalinkComponent",
        }
    }

    pub fn import_line(&self) -> String {
        format!("import {0} from '~/components/ui/{0}.astro';", self.name())
    }
}

/// Which component imports to add after conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Only components that were actually produced.
    Used,
    /// Both image components whenever anything was converted, plus any
    /// other component used.
    AllImages,
}

/// A planned replacement: original span plus its replacement text.
#[derive(Debug, Clone)]
pub struct ConversionRecord {
    pub start: usize,
    pub end: usize,
    pub original: String,
    pub replacement: String,
    pub component: Component,
}

/// Result of converting shortcodes in a document.
#[derive(Debug, Clone)]
pub struct ShortcodeConversion {
    /// Converted document (imports included).
    pub content: String,
    /// Applied replacements, in document order.
    pub records: Vec<ConversionRecord>,
    /// Shortcodes found but left as-is (missing `imgs` parameter).
    pub skipped: usize,
}

/// Result of converting a file on disk.
#[derive(Debug)]
pub struct FileConversion {
    pub path: PathBuf,
    pub records: Vec<ConversionRecord>,
    pub skipped: usize,
    /// False for dry runs and for files with nothing to convert.
    pub written: bool,
}
