//! Pattern-driven text correction.

use crate::description::RuleDescription;
use crate::source::{SourceError, SourceFile};
use crate::syntax::SyntaxMatch;
use crate::types::{Correction, Location};
use regex::Regex;
use std::ops::Range;
use thiserror::Error;
use tracing::debug;

/// Errors from applying corrections.
#[derive(Debug, Error)]
pub enum CorrectionError {
    /// The corrected text was computed but could not be written back.
    #[error("Failed to persist corrections: {source}")]
    Persist {
        /// Underlying write error.
        source: SourceError,
        /// The corrected text and the corrections it contains.
        result: Box<CorrectionResult>,
    },
}

impl CorrectionError {
    /// Returns the correction result computed before the failure.
    #[must_use]
    pub fn result(&self) -> &CorrectionResult {
        match self {
            Self::Persist { result, .. } => result,
        }
    }
}

/// Outcome of a correction pass over one source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionResult {
    /// Text after all corrections.
    pub contents: String,
    /// Corrections performed, ordered by position in the original text.
    pub corrections: Vec<Correction>,
}

/// A replacement of an original byte range.
#[derive(Debug)]
struct Edit {
    range: Range<usize>,
    replacement: String,
}

/// Rewrites every match of `pattern` accepted by `keep` using `template`.
///
/// `template` may refer to capture groups of `pattern` with `$1` or
/// `${name}`. Matches are collected against the current text first; the
/// edits are then spliced in from the rightmost match to the leftmost, so
/// every range still refers to the original text when it is applied.
/// Matches whose expansion equals the matched text are not edits.
///
/// With no surviving matches the text is returned unchanged, no
/// corrections are reported, and nothing is written. Otherwise the file's
/// contents are replaced and persisted.
///
/// # Errors
///
/// Returns [`CorrectionError::Persist`] if the rewritten text cannot be
/// written back. The file's in-memory contents are already updated, and the
/// error carries the computed [`CorrectionResult`].
pub fn apply_corrections(
    file: &mut SourceFile,
    rule: &RuleDescription,
    pattern: &Regex,
    template: &str,
    keep: impl Fn(&SyntaxMatch) -> bool,
) -> Result<CorrectionResult, CorrectionError> {
    let original = file.contents();
    let edits: Vec<Edit> = pattern
        .captures_iter(original)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            if !keep(&file.syntax_match(whole.range())) {
                return None;
            }
            let mut replacement = String::new();
            captures.expand(template, &mut replacement);
            (replacement != whole.as_str()).then(|| Edit {
                range: whole.range(),
                replacement,
            })
        })
        .collect();

    if edits.is_empty() {
        return Ok(CorrectionResult {
            contents: original.to_string(),
            corrections: Vec::new(),
        });
    }

    let corrections = edits
        .iter()
        .map(|edit| Correction::new(rule, Location::new(file, edit.range.start)))
        .collect();

    let mut contents = original.to_string();
    for edit in edits.iter().rev() {
        contents.replace_range(edit.range.clone(), &edit.replacement);
    }

    debug!(
        "{}: {} correction(s) in {}",
        rule.identifier,
        edits.len(),
        file.path().map_or_else(|| "<memory>".into(), |p| p.display().to_string())
    );

    let result = CorrectionResult {
        contents,
        corrections,
    };
    match file.write(result.contents.clone()) {
        Ok(()) => Ok(result),
        Err(source) => Err(CorrectionError::Persist {
            source,
            result: Box::new(result),
        }),
    }
}
