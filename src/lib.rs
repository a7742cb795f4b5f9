//! # blogpress
//!
//! Publish a content tree as a blog. Your filesystem is the data source:
//! the source directory is mirrored into the target directory, with every
//! file transformed by type along the way.
//!
//! # Architecture: One Walk, Three Pipelines
//!
//! ```text
//! content/                      build/
//! ├── hello.md  (frontmatter) → ├── hi/index.{md,html,json}
//! ├── notes.md  (plain)       → ├── notes.md
//! ├── photo.jpg               → ├── photo.{large,medium,small,tiny}.jpg
//! ├── style.css               → ├── style.css
//! └── ...                       ├── index.json   ← all posts
//!                               └── index.html   ← rendered listing
//! ```
//!
//! A single recursive walk mirrors the directory structure and fans one
//! concurrent task out per file. Each file is routed by extension to
//! exactly one pipeline — markdown, image, or passthrough copy — and a
//! pipeline failure is contained to its file: the run logs a warning and
//! keeps going. Once every file has settled, the posts collected from
//! markdown frontmatter are written out as the aggregate index.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `{in, out}` run configuration, optional `blogpress.toml`, path resolution |
//! | [`filter`] | `.blogignore` → keep/skip predicate (gitignore semantics) |
//! | [`walk`] | recursive mirroring walker with concurrent per-file visits |
//! | [`markdown`] | frontmatter extraction and markdown-to-HTML rendering |
//! | [`imaging`] | four resized variants per image, pure Rust |
//! | [`publish`] | orchestrator: dispatch, failure isolation, index emission |
//! | [`types`] | [`Post`](types::Post) — the metadata serialized into every index artifact |
//!
//! # Design Decisions
//!
//! ## Whole-Tree Rebuilds
//!
//! Every run reprocesses the whole tree and overwrites the target — no
//! cache, no diffing, no partial-write recovery. A crashed run is fixed by
//! running again.
//!
//! ## Nondeterministic Index Order
//!
//! File visits run concurrently and posts enter the index as their files
//! finish, so `index.json` reflects completion order, not tree order.
//! Consumers must not assume any particular ordering.
//!
//! ## Per-File Failure Isolation
//!
//! A markdown file with broken frontmatter or an image that fails to decode
//! costs exactly one warning and its own output — never the run. Only
//! configuration errors and traversal errors are fatal.

pub mod config;
pub mod filter;
pub mod imaging;
pub mod markdown;
pub mod publish;
pub mod types;
pub mod walk;
