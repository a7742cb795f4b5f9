//! The publish pipeline: dispatch, per-file transforms, index emission.
//!
//! [`publish`] drives one full run:
//!
//! ```text
//! resolve roots → compile .blogignore → walk tree
//!   └─ per file: skip?  →  markdown | image | copy
//! → write index.json + index.html at the target root
//! ```
//!
//! Every file is routed by extension to exactly one pipeline. A pipeline
//! failure is contained to its file: the dispatcher logs a warning and the
//! run carries on — only configuration errors and traversal errors are
//! fatal.
//!
//! Posts discovered by the markdown pipeline accumulate in a shared,
//! mutex-guarded list. Because visits run concurrently, the index holds
//! posts in **completion order, not tree order** — consumers must not
//! assume any particular ordering.

use crate::config::{Config, ConfigError};
use crate::filter::IgnoreFilter;
use crate::markdown::{self, MarkdownError};
use crate::types::Post;
use crate::{imaging, walk};
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Fatal errors: configuration, traversal, or index emission.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid ignore pattern: {0}")]
    Ignore(#[from] ignore::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-file errors, isolated at the dispatcher.
#[derive(Error, Debug)]
enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Markdown(#[from] MarkdownError),
    #[error("{0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("permalink escapes the target root: {0}")]
    PermalinkEscapes(String),
}

/// The closed set of per-file transforms.
///
/// Routing is by extension, matched case-sensitively. Unknown extensions
/// (and extension-less files) are copied through rather than dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pipeline {
    Markdown,
    Image,
    Passthrough,
}

impl Pipeline {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("md") => Self::Markdown,
            Some("jpg" | "jpeg" | "png") => Self::Image,
            _ => Self::Passthrough,
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown pipeline"),
            Self::Image => write!(f, "image pipeline"),
            Self::Passthrough => write!(f, "copy"),
        }
    }
}

/// What one run produced.
#[derive(Debug)]
pub struct PublishSummary {
    /// Files that reached a pipeline (skipped files not counted)
    pub files: usize,
    /// Posts collected into the index
    pub posts: usize,
    /// Files whose pipeline failed and was skipped with a warning
    pub warnings: usize,
}

/// Per-file visitor: ignore pre-filter, extension routing, failure
/// isolation, and the shared post index.
///
/// All shared state is explicit here — the walker only ever sees
/// `visit(source, target)`.
struct Dispatcher<'a> {
    source_root: &'a Path,
    target_root: &'a Path,
    filter: &'a IgnoreFilter,
    index: Mutex<Vec<Post>>,
    files: AtomicUsize,
    warnings: AtomicUsize,
}

impl<'a> Dispatcher<'a> {
    fn new(source_root: &'a Path, target_root: &'a Path, filter: &'a IgnoreFilter) -> Self {
        Self {
            source_root,
            target_root,
            filter,
            index: Mutex::new(Vec::new()),
            files: AtomicUsize::new(0),
            warnings: AtomicUsize::new(0),
        }
    }

    /// Process one file. Pipeline failures are logged and swallowed; a
    /// single file never aborts the run.
    fn visit(&self, source: &Path, target: &Path) -> Result<(), PublishError> {
        let relative = source.strip_prefix(self.source_root).unwrap();
        if !self.filter.should_keep(relative) {
            return Ok(());
        }
        self.files.fetch_add(1, Ordering::Relaxed);

        let pipeline = Pipeline::for_path(source);
        let outcome = match pipeline {
            Pipeline::Markdown => self.publish_markdown(source, target),
            Pipeline::Image => self.publish_image(source, target),
            Pipeline::Passthrough => self.publish_copy(source, target),
        };

        if let Err(err) = outcome {
            self.warnings.fetch_add(1, Ordering::Relaxed);
            eprintln!("warning: {} failed for {}: {}", pipeline, relative.display(), err);
        }
        Ok(())
    }

    /// Markdown pipeline.
    ///
    /// Without frontmatter the file is not a blog post: its body lands at
    /// the mirrored path and nothing is indexed. With frontmatter, the
    /// permalink names a directory under the mirrored parent that receives
    /// the `index.md` / `index.html` / `index.json` trio, and the post —
    /// permalink rewritten to be target-root-relative — joins the index.
    fn publish_markdown(&self, source: &Path, target: &Path) -> Result<(), PipelineError> {
        let raw = fs::read_to_string(source)?;
        let output = markdown::create_markdown_output(&raw)?;

        let Some(mut post) = output.frontmatter else {
            fs::write(target, output.body)?;
            return Ok(());
        };

        let post_dir = target.parent().unwrap().join(&post.permalink);
        // Absolute permalinks fail the strip; `..` would sneak past it.
        let relative = post_dir
            .strip_prefix(self.target_root)
            .ok()
            .filter(|rel| rel.components().all(|c| c != Component::ParentDir))
            .ok_or_else(|| PipelineError::PermalinkEscapes(post.permalink.clone()))?;
        post.permalink = relative.to_string_lossy().into_owned();

        fs::create_dir_all(&post_dir)?;
        let artifacts = [
            (post_dir.join("index.md"), output.body),
            (post_dir.join("index.html"), output.html),
            (post_dir.join("index.json"), serde_json::to_string(&post)?),
        ];
        self.index.lock().unwrap().push(post);

        artifacts
            .par_iter()
            .try_for_each(|(path, content)| fs::write(path, content))?;
        Ok(())
    }

    /// Image pipeline: four resized variants next to the mirrored path,
    /// named `<name>.<size>.<extension>`.
    fn publish_image(&self, source: &Path, target: &Path) -> Result<(), PipelineError> {
        let variants = imaging::create_image_output(source)?;

        let dir = target.parent().unwrap();
        fs::create_dir_all(dir)?;
        // Extension presence is what routed us here.
        let name = source.file_stem().unwrap().to_string_lossy();
        let extension = source.extension().unwrap().to_string_lossy();

        variants.par_iter().try_for_each(|variant| {
            variant
                .image
                .save(dir.join(format!("{name}.{}.{extension}", variant.label)))
        })?;
        Ok(())
    }

    /// Passthrough pipeline: byte-for-byte copy to the mirrored path.
    fn publish_copy(&self, source: &Path, target: &Path) -> Result<(), PipelineError> {
        fs::copy(source, target)?;
        Ok(())
    }

    fn finish(self) -> (Vec<Post>, usize, usize) {
        (
            self.index.into_inner().unwrap(),
            self.files.into_inner(),
            self.warnings.into_inner(),
        )
    }
}

/// Run the full publish pipeline for one configuration.
pub fn publish(cwd: &Path, config: &Config) -> Result<PublishSummary, PublishError> {
    let roots = config.resolve(cwd)?;
    let filter = IgnoreFilter::load(&roots.source)?;

    println!(
        "Publishing {} -> {}",
        roots.source.display(),
        roots.target.display()
    );

    let dispatcher = Dispatcher::new(&roots.source, &roots.target, &filter);
    walk::walk(&roots.source, &roots.target, &|source: &Path, target: &Path| {
        dispatcher.visit(source, target)
    })?;

    let (posts, files, warnings) = dispatcher.finish();
    write_index(&roots.target, &posts)?;

    println!(
        "Published {} files, {} posts to {}",
        files,
        posts.len(),
        roots.target.display()
    );
    Ok(PublishSummary {
        files,
        posts: posts.len(),
        warnings,
    })
}

/// Emit the aggregate index at the target root: `index.json` (the post
/// array) and `index.html` (a rendered markdown listing).
fn write_index(target_root: &Path, posts: &[Post]) -> Result<(), PublishError> {
    let listing = posts
        .iter()
        .map(|post| format!("- [{}]({})", post.title, post.permalink))
        .collect::<Vec<_>>()
        .join("\n");

    let json = serde_json::to_string(posts)?;
    let html = markdown::render_html(&listing);

    let (json_write, html_write) = rayon::join(
        || fs::write(target_root.join("index.json"), &json),
        || fs::write(target_root.join("index.html"), &html),
    );
    json_write?;
    html_write?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_extension_routes_to_markdown() {
        assert_eq!(Pipeline::for_path(Path::new("a/post.md")), Pipeline::Markdown);
    }

    #[test]
    fn image_extensions_route_to_image() {
        for name in ["p.jpg", "p.jpeg", "p.png"] {
            assert_eq!(Pipeline::for_path(Path::new(name)), Pipeline::Image);
        }
    }

    #[test]
    fn unknown_extensions_are_copied_not_dropped() {
        assert_eq!(Pipeline::for_path(Path::new("a.css")), Pipeline::Passthrough);
        assert_eq!(Pipeline::for_path(Path::new("Makefile")), Pipeline::Passthrough);
        assert_eq!(Pipeline::for_path(Path::new(".blogignore")), Pipeline::Passthrough);
    }

    #[test]
    fn extension_matching_is_case_sensitive() {
        assert_eq!(Pipeline::for_path(Path::new("p.JPG")), Pipeline::Passthrough);
        assert_eq!(Pipeline::for_path(Path::new("p.MD")), Pipeline::Passthrough);
    }
}
