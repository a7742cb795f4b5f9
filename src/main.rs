use blogpress::config::Config;
use blogpress::publish;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blogpress")]
#[command(about = "Publish a content tree as a blog")]
#[command(long_about = "\
Publish a content tree as a blog

Mirrors the content directory into the output directory, transforming each
file by type: markdown becomes rendered posts, images become four resized
variants, everything else is copied verbatim. Posts with YAML frontmatter
are collected into an index at the output root.

Content structure:

  content/
  ├── blogpress.toml               # Run config in the working dir (optional)
  ├── .blogignore                  # gitignore-style skip patterns (optional)
  ├── hello.md                     # Post (has frontmatter) → hi/index.{md,html,json}
  ├── notes.md                     # Plain markdown (no frontmatter) → notes.md
  ├── photo.jpg                    # → photo.{large,medium,small,tiny}.jpg
  ├── style.css                    # → copied verbatim
  └── build/                       # Default output root (skipped on rerun)
      ├── index.json               # All posts, completion order
      └── index.html               # Rendered post listing

A post's frontmatter needs at least a title and a permalink:

  ---
  title: Hi
  permalink: hi
  ---
  Body prose...

Files whose pipeline fails are skipped with a warning; the run continues.")]
#[command(version)]
struct Cli {
    /// Content directory, relative to the working directory
    #[arg(long = "in", value_name = "DIR")]
    in_dir: Option<PathBuf>,

    /// Output directory, relative to the content directory
    #[arg(long = "out", value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    // CLI flags override the config file.
    let mut config = Config::load(&cwd)?;
    if cli.in_dir.is_some() {
        config.in_dir = cli.in_dir;
    }
    if cli.out_dir.is_some() {
        config.out_dir = cli.out_dir;
    }

    let summary = publish::publish(&cwd, &config)?;
    if summary.warnings > 0 {
        eprintln!("{} file(s) skipped with warnings", summary.warnings);
    }
    Ok(())
}
