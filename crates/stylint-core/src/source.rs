//! Source units: text, identity, and cached syntax tokens.

use crate::syntax::{BasicTokenizer, SyntaxMatch, SyntaxToken, Tokenizer};
use regex::Regex;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors reading or writing a source unit.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file contents could not be written back.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// A single line of a source unit, without its line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line number (1-indexed).
    pub number: usize,
    /// Byte offset of the first character.
    pub offset: usize,
    /// Text of the line.
    pub content: &'a str,
}

/// A unit of source text that rules validate and correct.
///
/// The syntax tokens are computed once per content change by the file's
/// [`Tokenizer`]. A file with a path persists rewritten contents to that
/// path; a file without one only changes in memory.
pub struct SourceFile {
    path: Option<PathBuf>,
    contents: String,
    tokens: Vec<SyntaxToken>,
    line_starts: Vec<usize>,
    tokenizer: Arc<dyn Tokenizer>,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("len", &self.contents.len())
            .field("tokens", &self.tokens.len())
            .finish_non_exhaustive()
    }
}

impl SourceFile {
    /// Creates an in-memory source unit classified by [`BasicTokenizer`].
    #[must_use]
    pub fn from_contents(contents: impl Into<String>) -> Self {
        let mut file = Self {
            path: None,
            contents: contents.into(),
            tokens: Vec::new(),
            line_starts: Vec::new(),
            tokenizer: Arc::new(BasicTokenizer),
        };
        file.reindex();
        file
    }

    /// Reads a source unit from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Read`] if the file cannot be read as UTF-8 text.
    pub fn read(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path).map_err(|source| SourceError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(Self::from_contents(contents).with_path(path))
    }

    /// Sets the path identifying this unit.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Replaces the tokenizer and reclassifies the contents.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self.reindex();
        self
    }

    /// Returns the path, if this unit has one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the current text.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Returns all syntax tokens in source order.
    #[must_use]
    pub fn tokens(&self) -> &[SyntaxToken] {
        &self.tokens
    }

    /// Returns the tokens overlapping `range`, in source order.
    #[must_use]
    pub fn tokens_in(&self, range: &Range<usize>) -> &[SyntaxToken] {
        let first = self.tokens.partition_point(|t| t.range.end <= range.start);
        let len = self.tokens[first..]
            .iter()
            .take_while(|t| t.intersects(range))
            .count();
        &self.tokens[first..first + len]
    }

    /// Finds every non-overlapping match of `pattern`, left to right, with
    /// the syntax tokens each match covers.
    #[must_use]
    pub fn match_pattern(&self, pattern: &Regex) -> Vec<SyntaxMatch> {
        pattern
            .find_iter(&self.contents)
            .map(|m| self.syntax_match(m.range()))
            .collect()
    }

    /// Builds the [`SyntaxMatch`] for a byte range of the current text.
    #[must_use]
    pub fn syntax_match(&self, range: Range<usize>) -> SyntaxMatch {
        let tokens = self.tokens_in(&range).to_vec();
        SyntaxMatch { range, tokens }
    }

    /// Resolves a byte offset to a 1-indexed `(line, column)` pair.
    ///
    /// The column counts characters from the start of the line.
    #[must_use]
    pub fn line_and_column(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.contents.len());
        let line_index = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line_index];
        let column = self
            .contents
            .get(line_start..offset)
            .map_or(offset - line_start, |s| s.chars().count());
        (line_index + 1, column + 1)
    }

    /// Iterates over the lines of the current text.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> {
        self.line_starts
            .iter()
            .enumerate()
            .filter(|&(_, &start)| start < self.contents.len())
            .map(|(i, &start)| {
                let end = self
                    .line_starts
                    .get(i + 1)
                    .map_or(self.contents.len(), |&next| next - 1);
                let content = self.contents[start..end].trim_end_matches('\r');
                Line {
                    number: i + 1,
                    offset: start,
                    content,
                }
            })
    }

    /// Replaces the in-memory contents without persisting them.
    pub fn set_contents(&mut self, contents: impl Into<String>) {
        self.contents = contents.into();
        self.reindex();
    }

    /// Replaces the contents and persists them if this unit has a path.
    ///
    /// The in-memory contents are updated even when persisting fails. The
    /// write goes to a temporary file next to the target that is then
    /// renamed over it, so readers never observe a partial write.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Write`] if the contents cannot be persisted.
    pub fn write(&mut self, contents: impl Into<String>) -> Result<(), SourceError> {
        self.set_contents(contents);
        let Some(path) = &self.path else {
            return Ok(());
        };
        debug!("Writing {}", path.display());
        persist(path, &self.contents).map_err(|source| SourceError::Write {
            path: path.clone(),
            source,
        })
    }

    fn reindex(&mut self) {
        self.tokens = self.tokenizer.tokenize(&self.contents);
        self.line_starts = std::iter::once(0)
            .chain(self.contents.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
    }
}

/// Replaces the file behind `path`, following symlinks and keeping the
/// existing file's permissions.
fn persist(path: &Path, contents: &str) -> std::io::Result<()> {
    let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    if let Ok(meta) = std::fs::metadata(&target) {
        temp.as_file().set_permissions(meta.permissions())?;
    }
    temp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}
