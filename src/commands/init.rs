//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::POSTS_DIR;
use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: Blog
subtitle: ''
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
source_dir: source
public_dir: public

# Writing
render_drafts: false
highlight:
  line_number: true
  theme: base16-ocean.dark

# Listing
date_format: MMMM DD, YYYY
read_more: Read more
listing:
  heading: Latest
  tagline: All the latest posts.
about:
  title: About
  tagline: ''

# Social-sharing metadata
social:
  twitter_card: summary_large_image
  twitter_handle: ''
  image: ''
  og_type: article
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    let posts_dir = target_dir.join("source").join(POSTS_DIR);
    fs::create_dir_all(&posts_dir)?;
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
---

Welcome! This is your very first post. Everything above the marker below
shows up on the listing page.

<!-- more -->

## Quick Start

```bash
$ postdeck new "My New Post"
$ postdeck server
```
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );
    fs::write(posts_dir.join("hello-world.md"), sample_post)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentSource;
    use crate::Blog;
    use tempfile::TempDir;

    #[test]
    fn test_init_site_is_loadable() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        let blog = Blog::new(tmp.path()).unwrap();
        assert_eq!(blog.config.listing.heading, "Latest");
        let posts = blog.content_source().list_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts.get("hello-world").is_some());

        assert!(init_site(tmp.path()).is_err());
    }
}
