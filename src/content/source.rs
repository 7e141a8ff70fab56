//! Content sources - produce post collections and resolve post bodies

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{BodyRef, FrontMatter, PostCollection, PostSummary};
use crate::error::{ContentLoadError, RenderError};

/// Directory under the source dir holding posts
pub const POSTS_DIR: &str = "_posts";

/// Supplies post summaries and the bodies behind them.
///
/// `list_posts` makes no promise about ordering.
pub trait ContentSource {
    /// Load every published post, validating required metadata
    fn list_posts(&self) -> Result<PostCollection, ContentLoadError>;

    /// Markdown body (front-matter stripped) behind a reference this source issued
    fn resolve_body(&self, body_ref: &BodyRef) -> Result<String, RenderError>;
}

/// Posts stored as markdown files under `<source_dir>/_posts`
pub struct DirectorySource {
    posts_dir: PathBuf,
    include_drafts: bool,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(source_dir: P, include_drafts: bool) -> Self {
        Self {
            posts_dir: source_dir.as_ref().join(POSTS_DIR),
            include_drafts,
        }
    }

    fn source_key(&self, path: &Path) -> String {
        path.strip_prefix(&self.posts_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

impl ContentSource for DirectorySource {
    fn list_posts(&self) -> Result<PostCollection, ContentLoadError> {
        if !self.posts_dir.exists() {
            tracing::debug!("No posts directory at {:?}", self.posts_dir);
            return Ok(PostCollection::default());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.posts_dir).to_path_buf();
                ContentLoadError::Io {
                    path,
                    error: e.into(),
                }
            })?;
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let raw = fs::read_to_string(path).map_err(|error| ContentLoadError::Io {
                path: path.to_path_buf(),
                error,
            })?;
            let key = self.source_key(path);
            let default_id = default_identifier(&key);
            if let Some(post) = summarize(&key, &default_id, &raw, self.include_drafts)? {
                posts.push(post);
            }
        }

        let collection = collect_unique(posts)?;
        tracing::debug!("Loaded {} posts from {:?}", collection.len(), self.posts_dir);
        Ok(collection)
    }

    fn resolve_body(&self, body_ref: &BodyRef) -> Result<String, RenderError> {
        let path = self.posts_dir.join(body_ref.key());
        if !path.is_file() {
            return Err(RenderError::UnresolvedBody(body_ref.to_string()));
        }
        let raw = fs::read_to_string(&path).map_err(|error| RenderError::Io {
            key: body_ref.to_string(),
            error,
        })?;
        strip_front_matter(body_ref, &raw)
    }
}

/// Posts held in memory, keyed by document name
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<(String, String)>,
    include_drafts: bool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw document (front-matter plus markdown body)
    pub fn with_document(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.documents.push((name.into(), raw.into()));
        self
    }

    pub fn include_drafts(mut self, include: bool) -> Self {
        self.include_drafts = include;
        self
    }

    fn document(&self, name: &str) -> Option<&str> {
        self.documents
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, raw)| raw.as_str())
    }
}

impl ContentSource for MemorySource {
    fn list_posts(&self) -> Result<PostCollection, ContentLoadError> {
        let mut posts = Vec::with_capacity(self.documents.len());
        for (name, raw) in &self.documents {
            let default_id = default_identifier(name);
            if let Some(post) = summarize(name, &default_id, raw, self.include_drafts)? {
                posts.push(post);
            }
        }
        collect_unique(posts)
    }

    fn resolve_body(&self, body_ref: &BodyRef) -> Result<String, RenderError> {
        let raw = self
            .document(body_ref.key())
            .ok_or_else(|| RenderError::UnresolvedBody(body_ref.to_string()))?;
        strip_front_matter(body_ref, raw)
    }
}

/// Validate one document's front-matter into a summary.
///
/// `Ok(None)` for unpublished documents when drafts are excluded.
fn summarize(
    key: &str,
    default_id: &str,
    raw: &str,
    include_drafts: bool,
) -> Result<Option<PostSummary>, ContentLoadError> {
    let (fm, _) = FrontMatter::parse(raw).map_err(|e| ContentLoadError::InvalidFrontMatter {
        source_key: key.to_string(),
        message: e.to_string(),
    })?;

    let title = fm
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ContentLoadError::MissingField {
            source_key: key.to_string(),
            field: "title",
        })?;

    let publish_date = match fm.parse_date() {
        Some(Ok(date)) => date,
        Some(Err(value)) => {
            return Err(ContentLoadError::InvalidDate {
                source_key: key.to_string(),
                value,
            })
        }
        None => {
            return Err(ContentLoadError::MissingField {
                source_key: key.to_string(),
                field: "date",
            })
        }
    };

    if !fm.published && !include_drafts {
        tracing::debug!("Skipping unpublished post {}", key);
        return Ok(None);
    }

    let identifier = fm
        .slug
        .as_deref()
        .map(slug::slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default_id.to_string());
    if identifier.is_empty() {
        return Err(ContentLoadError::MissingField {
            source_key: key.to_string(),
            field: "slug",
        });
    }

    Ok(Some(PostSummary::new(
        identifier,
        title,
        publish_date,
        BodyRef::new(key),
    )))
}

fn collect_unique(posts: Vec<PostSummary>) -> Result<PostCollection, ContentLoadError> {
    PostCollection::from_posts(posts).map_err(|(first, second)| {
        ContentLoadError::DuplicateIdentifier {
            identifier: second.identifier,
            first: first.body_ref.to_string(),
            second: second.body_ref.to_string(),
        }
    })
}

fn strip_front_matter(body_ref: &BodyRef, raw: &str) -> Result<String, RenderError> {
    FrontMatter::parse(raw)
        .map(|(_, body)| body.to_string())
        .map_err(|e| RenderError::Markdown {
            key: body_ref.to_string(),
            message: e.to_string(),
        })
}

/// Identifier from a source key (a path relative to the posts dir).
///
/// `foo/index.md` uses the directory name; a top-level `index.md` keeps its stem.
fn default_identifier(key: &str) -> String {
    let path = Path::new(key);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let name = if stem == "index" {
        path.parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or(stem)
    } else {
        stem
    };
    slug::slugify(name)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
