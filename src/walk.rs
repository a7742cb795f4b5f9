//! Tree walking and directory mirroring.
//!
//! The walker enumerates every entry under the source root, recreates the
//! directory structure under the target root, and fans the per-file `visit`
//! callback out across the rayon thread pool. It applies no filtering of its
//! own — pruning decisions belong to the visitor, next to the dispatch
//! logic.
//!
//! ## Failure semantics
//!
//! Enumeration errors (unreadable directory, permission failure) abort the
//! walk immediately. Visit errors do not: every visit runs to completion
//! regardless of its siblings, and only once all of them have settled is the
//! first recorded error returned. Visitors are expected to contain their own
//! per-file failures; an error escaping a visit fails the whole run by
//! design.

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use walkdir::WalkDir;

/// Walk `source_root`, mirroring its directories under `target_root` and
/// invoking `visit(source_file, mirrored_target_file)` for every regular
/// file. Visits run concurrently; the call returns once all have settled.
///
/// Each mirrored directory is created before any of its contents are
/// visited. The target root itself is skipped when it sits inside the
/// source root, so a rerun never republishes its own output.
pub fn walk<E, F>(source_root: &Path, target_root: &Path, visit: &F) -> Result<(), E>
where
    E: From<io::Error> + From<walkdir::Error> + Send,
    F: Fn(&Path, &Path) -> Result<(), E> + Sync,
{
    let mut files: Vec<(PathBuf, PathBuf)> = Vec::new();

    let entries = WalkDir::new(source_root)
        .into_iter()
        .filter_entry(|entry| entry.path() != target_root);
    for entry in entries {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source_root).unwrap();
        let target = target_root.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            files.push((entry.path().to_path_buf(), target));
        }
    }

    // Fan-out, then a single fan-in barrier: one failed visit must not keep
    // a sibling from producing output, so errors are collected rather than
    // short-circuited.
    let failures: Mutex<Vec<E>> = Mutex::new(Vec::new());
    files.par_iter().for_each(|(source, target)| {
        if let Err(err) = visit(source, target) {
            failures.lock().unwrap().push(err);
        }
    });

    match failures.into_inner().unwrap().into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;
    use thiserror::Error;

    #[derive(Error, Debug)]
    enum TestError {
        #[error("IO error: {0}")]
        Io(#[from] io::Error),
        #[error("walk error: {0}")]
        Walk(#[from] walkdir::Error),
        #[error("visit failed: {0}")]
        Visit(String),
    }

    fn tree(entries: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for entry in entries {
            let path = tmp.path().join(entry);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, *entry).unwrap();
        }
        tmp
    }

    #[test]
    fn visits_every_file_with_mirrored_target() {
        let tmp = tree(&["a.md", "sub/b.jpg", "sub/deep/c.txt"]);
        let target = TempDir::new().unwrap();

        let visited: Mutex<BTreeSet<(PathBuf, PathBuf)>> = Mutex::new(BTreeSet::new());
        walk::<TestError, _>(tmp.path(), target.path(), &|source, dest| {
            visited
                .lock()
                .unwrap()
                .insert((source.to_path_buf(), dest.to_path_buf()));
            Ok(())
        })
        .unwrap();

        let visited = visited.into_inner().unwrap();
        assert_eq!(visited.len(), 3);
        assert!(visited.contains(&(
            tmp.path().join("sub/deep/c.txt"),
            target.path().join("sub/deep/c.txt"),
        )));
    }

    #[test]
    fn mirrors_directories_before_visits_need_them() {
        let tmp = tree(&["sub/deep/c.txt"]);
        let target = TempDir::new().unwrap();

        walk::<TestError, _>(tmp.path(), target.path(), &|_, dest| {
            // The mirrored parent must already exist when the visit runs.
            assert!(dest.parent().unwrap().is_dir());
            Ok(())
        })
        .unwrap();

        assert!(target.path().join("sub/deep").is_dir());
    }

    #[test]
    fn one_failing_visit_does_not_suppress_siblings() {
        let tmp = tree(&["bad.md", "good-1.md", "good-2.md", "good-3.md"]);
        let target = TempDir::new().unwrap();

        let visited: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());
        let result = walk::<TestError, _>(tmp.path(), target.path(), &|source, _| {
            visited.lock().unwrap().push(source.to_path_buf());
            if source.ends_with("bad.md") {
                return Err(TestError::Visit("boom".into()));
            }
            Ok(())
        });

        assert!(matches!(result, Err(TestError::Visit(_))));
        assert_eq!(visited.into_inner().unwrap().len(), 4);
    }

    #[test]
    fn nested_target_root_is_not_walked() {
        let tmp = tree(&["a.md", "build/stale.md"]);
        let target = tmp.path().join("build");

        let visited: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());
        walk::<TestError, _>(tmp.path(), &target, &|source, _| {
            visited.lock().unwrap().push(source.to_path_buf());
            Ok(())
        })
        .unwrap();

        let visited = visited.into_inner().unwrap();
        assert_eq!(visited, vec![tmp.path().join("a.md")]);
    }

    #[test]
    fn missing_source_root_fails_the_walk() {
        let tmp = TempDir::new().unwrap();
        let result = walk::<TestError, _>(
            &tmp.path().join("nope"),
            &tmp.path().join("out"),
            &|_, _| Ok(()),
        );
        assert!(matches!(result, Err(TestError::Walk(_))));
    }
}
