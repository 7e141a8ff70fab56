//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::POSTS_DIR;
use crate::Blog;

/// Write a new post with `title` and today's `date`, returning its path
pub fn create_post(blog: &Blog, title: &str, path: Option<&str>) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        anyhow::bail!("Post title must not be empty");
    }

    let now = chrono::Local::now();
    let target_dir = blog.source_dir.join(POSTS_DIR);
    fs::create_dir_all(&target_dir)?;

    let name = match path {
        Some(p) => p.trim_end_matches(".md").to_string(),
        None => slug::slugify(title),
    };
    if name.is_empty() {
        anyhow::bail!("Cannot derive a file name from {:?}", title);
    }
    let file_path = target_dir.join(format!("{}.md", name));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    // Quote the title so YAML never reinterprets it
    let content = format!(
        "---\ntitle: {}\ndate: {}\n---\n\n<!-- more -->\n",
        serde_json::to_string(title)?,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
