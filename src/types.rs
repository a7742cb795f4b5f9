//! Shared types serialized into the published output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata for a single blog post, extracted from a markdown file's
/// YAML frontmatter.
///
/// A post is serialized three times per run: into the post's own
/// `index.json`, into the aggregate `index.json` at the target root, and
/// (title + permalink only) into the rendered `index.html` listing.
///
/// `permalink` starts life as the author-supplied value — a directory name
/// relative to the file's mirrored parent directory — and is rewritten in
/// place to the full target-root-relative path before the post is indexed
/// or written anywhere. Consumers only ever see the rewritten value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post title, shown in the index listing
    pub title: String,
    /// Target-root-relative path of the post directory (rewritten from the
    /// author-supplied relative value during publishing)
    pub permalink: String,
    /// Any further frontmatter fields, carried through verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_frontmatter_fields_survive_serialization() {
        let yaml = "title: Hi\npermalink: hi\ndate: 2020-01-01\ntags: [a, b]";
        let post: Post = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(post.title, "Hi");
        assert_eq!(post.permalink, "hi");
        assert_eq!(post.extra.len(), 2);

        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(back, post);
    }

    #[test]
    fn title_and_permalink_are_required() {
        assert!(serde_yaml::from_str::<Post>("title: Hi").is_err());
        assert!(serde_yaml::from_str::<Post>("permalink: hi").is_err());
    }
}
