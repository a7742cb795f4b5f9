//! Ignore-pattern filtering.
//!
//! A `.blogignore` file at the content root lists gitignore-style patterns
//! for files that should not be published. The filter is compiled once per
//! run into a pure predicate over source-root-relative paths; a missing
//! ignore file means everything is kept.
//!
//! Pattern syntax and matching semantics are entirely the `ignore` crate's
//! (including negation with `!` and directory patterns like `drafts/`).
//! This module only wires file-not-found into "keep everything" instead of
//! failing the run.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::io;
use std::path::Path;

/// Name of the ignore-spec file, looked up at the content root.
pub const IGNORE_FILE: &str = ".blogignore";

/// A compiled keep/skip predicate over source-root-relative paths.
#[derive(Debug)]
pub struct IgnoreFilter {
    matcher: Gitignore,
}

impl IgnoreFilter {
    /// Load and compile `<source_root>/.blogignore`.
    ///
    /// An absent file yields a filter that keeps everything; a present but
    /// unreadable file, or an invalid pattern line, is an error.
    pub fn load(source_root: &Path) -> Result<Self, ignore::Error> {
        let text = match fs::read_to_string(source_root.join(IGNORE_FILE)) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(ignore::Error::Io(err)),
        };
        Self::from_patterns(source_root, &text)
    }

    /// Compile a filter from raw ignore-spec text.
    pub fn from_patterns(source_root: &Path, text: &str) -> Result<Self, ignore::Error> {
        let mut builder = GitignoreBuilder::new(source_root);
        for line in text.lines() {
            builder.add_line(None, line)?;
        }
        Ok(Self {
            matcher: builder.build()?,
        })
    }

    /// Whether a file at this source-root-relative path should be published.
    pub fn should_keep(&self, relative: &Path) -> bool {
        !self
            .matcher
            .matched_path_or_any_parents(relative, false)
            .is_ignore()
    }
}
