//! List site content

use anyhow::Result;

use crate::content::{ContentSource, PostCollection};
use crate::helpers::{date_iso, post_url};
use crate::Blog;

/// One line per post, newest first
pub fn format_posts(blog: &Blog, posts: &PostCollection) -> Vec<String> {
    posts
        .sorted_newest_first()
        .into_iter()
        .map(|post| {
            format!(
                "  {}  {}  {}",
                date_iso(&post.publish_date),
                post.title,
                post_url(&blog.config, &post.identifier)
            )
        })
        .collect()
}

/// Print the posts of a site
pub fn run(blog: &Blog) -> Result<()> {
    let posts = blog.content_source().list_posts()?;

    println!("Posts ({}):", posts.len());
    for line in format_posts(blog, &posts) {
        println!("{}", line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemorySource;
    use tempfile::TempDir;

    #[test]
    fn test_format_posts_newest_first() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        let posts = MemorySource::new()
            .with_document("a.md", "---\ntitle: First\ndate: 2021-01-05\n---\n")
            .with_document("b.md", "---\ntitle: Second\ndate: 2021-02-10\n---\n")
            .list_posts()
            .unwrap();

        assert_eq!(
            format_posts(&blog, &posts),
            vec![
                "  2021-02-10  Second  /b/".to_string(),
                "  2021-01-05  First  /a/".to_string(),
            ]
        );
    }
}
