//! Dialect selection and rewriting.

use tracing::{debug, warn};

use crate::transcript::dialect::Dialect;
use crate::transcript::rewrite::rewrite;

/// Rewritten transcript body plus the dialect that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub dialect: Dialect,
    pub body: String,
}

/// Rewrite `text` with the first dialect whose detector fires.
///
/// A `forced` dialect skips detection. When nothing matches, the text is only
/// backtick-escaped and the provenance is [`Dialect::Unknown`].
pub fn dispatch(text: &str, forced: Option<Dialect>) -> Dispatched {
    let dialect = match forced {
        Some(dialect) => {
            debug!(%dialect, "using forced transcript format");
            dialect
        }
        None => match Dialect::detect_first(text) {
            Some(dialect) => {
                debug!(%dialect, "detected transcript format");
                dialect
            }
            None => {
                warn!("could not detect transcript format; using generic conversion");
                Dialect::Unknown
            }
        },
    };

    Dispatched { dialect, body: rewrite(dialect, text) }
}
