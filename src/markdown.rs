//! Markdown rendering and frontmatter extraction.
//!
//! A blog post is a markdown file opening with a YAML frontmatter block:
//!
//! ```text
//! ---
//! title: Hi
//! permalink: hi
//! ---
//! Body prose...
//! ```
//!
//! Both delimiters must occupy a whole line. A document that does not start
//! with `---` is plain markdown, not a post: it carries no frontmatter and
//! its whole text is the body. An opening delimiter without a closing one
//! is an error.

use crate::types::Post;
use pulldown_cmark::{Parser, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkdownError {
    #[error("unclosed frontmatter: missing closing ---")]
    UnclosedFrontmatter,
    #[error("invalid frontmatter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),
}

/// One markdown file, rendered.
#[derive(Debug)]
pub struct MarkdownOutput {
    /// Post metadata, when the file opened with a frontmatter block
    pub frontmatter: Option<Post>,
    /// The markdown prose, frontmatter stripped
    pub body: String,
    /// The body rendered to HTML
    pub html: String,
}

/// Split a raw markdown file into frontmatter and body, parse the
/// frontmatter into a [`Post`] when present, and render the body to HTML.
pub fn create_markdown_output(raw: &str) -> Result<MarkdownOutput, MarkdownError> {
    let Some((yaml, body)) = split_frontmatter(raw)? else {
        return Ok(MarkdownOutput {
            frontmatter: None,
            body: raw.to_string(),
            html: render_html(raw),
        });
    };

    let post: Post = serde_yaml::from_str(yaml)?;
    Ok(MarkdownOutput {
        frontmatter: Some(post),
        html: render_html(body),
        body: body.to_string(),
    })
}

/// Render markdown to HTML.
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Split `raw` into `(yaml, body)` when it opens with a frontmatter block.
///
/// Returns `Ok(None)` for documents without frontmatter and an error for an
/// opening `---` that is never closed.
fn split_frontmatter(raw: &str) -> Result<Option<(&str, &str)>, MarkdownError> {
    let Some(rest) = raw.strip_prefix("---") else {
        return Ok(None);
    };
    // The opening delimiter must be the whole first line.
    let rest = match rest.strip_prefix('\n') {
        Some(rest) => rest,
        None => return Ok(None),
    };

    let mut offset = 0;
    for line in rest.lines() {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let after = &rest[offset + line.len()..];
            let body = after.strip_prefix('\n').unwrap_or(after);
            return Ok(Some((yaml, body)));
        }
        offset += line.len() + 1;
    }

    Err(MarkdownError::UnclosedFrontmatter)
}
