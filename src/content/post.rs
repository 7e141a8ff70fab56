//! Post summary and collection models

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Opaque handle to a post body.
///
/// Only the [`ContentSource`](super::ContentSource) that issued it knows how
/// to turn it back into markdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BodyRef(String);

impl BodyRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Source key (e.g. the path relative to the posts directory)
    pub fn key(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The minimal view of one post used for listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    /// Route segment, unique across a collection
    pub identifier: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub publish_date: NaiveDate,

    /// Where the body lives
    pub body_ref: BodyRef,
}

impl PostSummary {
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        publish_date: NaiveDate,
        body_ref: BodyRef,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            publish_date,
            body_ref,
        }
    }
}

/// A set of post summaries with unique identifiers.
///
/// Order is whatever the source produced; the page composer sorts before
/// display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostCollection {
    posts: Vec<PostSummary>,
}

impl PostCollection {
    /// Build a collection, returning the first clashing identifier on failure
    pub fn from_posts(posts: Vec<PostSummary>) -> Result<Self, (PostSummary, PostSummary)> {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(posts.len());
        for (i, post) in posts.iter().enumerate() {
            if let Some(&first) = seen.get(post.identifier.as_str()) {
                return Err((posts[first].clone(), post.clone()));
            }
            seen.insert(&post.identifier, i);
        }
        Ok(Self { posts })
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PostSummary> {
        self.posts.iter()
    }

    pub fn get(&self, identifier: &str) -> Option<&PostSummary> {
        self.posts.iter().find(|p| p.identifier == identifier)
    }

    /// Summaries newest first; equal dates keep their relative order
    pub fn sorted_newest_first(&self) -> Vec<&PostSummary> {
        let mut sorted: Vec<&PostSummary> = self.posts.iter().collect();
        // sort_by is stable
        sorted.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
        sorted
    }
}

impl<'a> IntoIterator for &'a PostCollection {
    type Item = &'a PostSummary;
    type IntoIter = std::slice::Iter<'a, PostSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}
