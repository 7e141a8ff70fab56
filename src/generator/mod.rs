//! Generator module - writes the static HTML pages using the built-in templates

use anyhow::{bail, Context as _, Result};
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::compose::{PageComposer, RenderedCard};
use crate::content::{ContentSource, PostCollection, POSTS_DIR};
use crate::helpers::{meta_generator, social_meta_tags, url_for};
use crate::templates::{NavData, TemplateRenderer, STYLESHEET, STYLESHEET_PATH};
use crate::Blog;

/// Route of the about page
pub const ABOUT_DIR: &str = "about";

/// What a generation run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Posts on the listing page
    pub posts: usize,
    /// Cards rendered as placeholders
    pub placeholders: usize,
    /// Static files copied from the source dir
    pub assets: usize,
}

/// Static site generator using Tera templates
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
    composer: PageComposer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            blog: blog.clone(),
            renderer: TemplateRenderer::new()?,
            composer: PageComposer::new(&blog.config)?,
        })
    }

    /// Generate the entire site from a content source.
    ///
    /// A content load failure aborts before anything is written.
    pub fn generate(&self, source: &dyn ContentSource) -> Result<GenerateReport> {
        let posts = source.list_posts()?;
        self.check_routes(&posts)?;
        self.clear_public_dir()?;

        fs::create_dir_all(&self.blog.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.blog.public_dir))?;

        let assets = self.copy_source_assets()?;
        self.write_stylesheet()?;

        let cards = self.composer.render_list(&posts, source);
        let placeholders = cards.iter().filter(|c| !c.body.is_available()).count();
        self.generate_index_page(&cards)?;

        for post in posts.iter() {
            let page = self.composer.render_post(post, source);
            self.generate_post_page(&page)?;
        }

        self.generate_about_page()?;

        Ok(GenerateReport {
            posts: cards.len(),
            placeholders,
            assets,
        })
    }

    /// Post routes share the public dir with the about page and stylesheet
    fn check_routes(&self, posts: &PostCollection) -> Result<()> {
        let reserved = [ABOUT_DIR, stylesheet_dir()];
        if let Some(post) = posts
            .iter()
            .find(|p| reserved.contains(&p.identifier.as_str()))
        {
            bail!(
                "Post identifier `{}` ({}) collides with a built-in route",
                post.identifier,
                post.body_ref
            );
        }
        Ok(())
    }

    /// Remove the previous output so no page outlives its post
    fn clear_public_dir(&self) -> Result<()> {
        let public_dir = &self.blog.public_dir;
        if self.blog.source_dir.starts_with(public_dir)
            || self.blog.base_dir.starts_with(public_dir)
        {
            bail!(
                "Refusing to clear public dir {:?}: it contains the site sources",
                public_dir
            );
        }
        if public_dir.exists() {
            fs::remove_dir_all(public_dir)
                .with_context(|| format!("Failed to clear {:?}", public_dir))?;
            tracing::debug!("Cleared {:?}", public_dir);
        }
        Ok(())
    }

    /// Create a base context with common variables
    fn create_base_context(&self, page_title: &str) -> Context {
        let config = &self.blog.config;
        let mut context = Context::new();
        context.insert("config", config);
        context.insert("generator", &meta_generator());
        context.insert("meta_tags", &Vec::<crate::helpers::MetaTag>::new());
        context.insert("stylesheet", &url_for(config, STYLESHEET_PATH));
        context.insert("page_title", page_title);
        context.insert(
            "nav",
            &NavData {
                home: url_for(config, "/"),
                about: url_for(config, &format!("{}/", ABOUT_DIR)),
            },
        );
        context
    }

    /// Generate the post listing
    fn generate_index_page(&self, cards: &[RenderedCard]) -> Result<()> {
        let mut context = self.create_base_context("");
        context.insert("meta_tags", &social_meta_tags(&self.blog.config));
        context.insert("description", self.blog.config.meta_description());
        context.insert("cards", cards);

        let html = self.renderer.render("index.html", &context)?;
        let output_path = self.blog.public_dir.join("index.html");
        write_page(&output_path, &html)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Generate one post page at `/<identifier>/`
    fn generate_post_page(&self, post: &RenderedCard) -> Result<()> {
        let mut context = self.create_base_context(&post.title);
        context.insert("post", post);

        let html = self.renderer.render("post.html", &context)?;
        let output_path = self
            .blog
            .public_dir
            .join(&post.identifier)
            .join("index.html");
        write_page(&output_path, &html)?;
        tracing::debug!("Generated post: {:?}", output_path);
        Ok(())
    }

    /// Generate the about page
    fn generate_about_page(&self) -> Result<()> {
        let context = self.create_base_context(&self.blog.config.about.title);
        let html = self.renderer.render("about.html", &context)?;
        let output_path = self.blog.public_dir.join(ABOUT_DIR).join("index.html");
        write_page(&output_path, &html)?;
        tracing::debug!("Generated page: {:?}", output_path);
        Ok(())
    }

    /// Write the built-in stylesheet unless the site ships its own
    fn write_stylesheet(&self) -> Result<()> {
        let output_path = self.blog.public_dir.join(STYLESHEET_PATH);
        if self.blog.source_dir.join(STYLESHEET_PATH).exists() {
            return Ok(());
        }
        write_page(&output_path, STYLESHEET)
    }

    /// Copy source assets (images, etc.) to public directory
    fn copy_source_assets(&self) -> Result<usize> {
        let source_dir = &self.blog.source_dir;
        if !source_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.file_name() != POSTS_DIR && !is_hidden(e.path()))
        {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            // Markdown outside _posts is not part of the site
            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("markdown")) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            let dest = self.blog.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            copied += 1;
        }

        Ok(copied)
    }
}

fn stylesheet_dir() -> &'static str {
    STYLESHEET_PATH.split('/').next().unwrap_or(STYLESHEET_PATH)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

fn write_page(output_path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(output_path, contents)
        .with_context(|| format!("Failed to write {:?}", output_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{DirectorySource, MemorySource};
    use tempfile::TempDir;

    fn blog_in(dir: &Path) -> Blog {
        Blog::new(dir).unwrap()
    }

    fn post(title: &str, date: &str) -> String {
        format!("---\ntitle: {}\ndate: {}\n---\nBody of {}.", title, date, title)
    }

    #[test]
    fn test_generate_writes_pages() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(tmp.path());
        let source = MemorySource::new()
            .with_document("first.md", post("First", "2021-01-05"))
            .with_document("second.md", post("Second", "2021-02-10"));

        let report = Generator::new(&blog).unwrap().generate(&source).unwrap();
        assert_eq!(report.posts, 2);
        assert_eq!(report.placeholders, 0);

        let index = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        let second = index.find("Second").unwrap();
        let first = index.find("First").unwrap();
        assert!(second < first, "newest post should come first");
        assert!(index.contains(r#"href="/first/""#));
        assert!(index.contains("January 05, 2021"));
        assert!(index.contains(r#"property="og:type" content="article""#));

        let page = fs::read_to_string(blog.public_dir.join("first/index.html")).unwrap();
        assert!(page.contains("Body of First."));
        assert!(blog.public_dir.join("about/index.html").exists());
        assert!(blog.public_dir.join(STYLESHEET_PATH).exists());
    }

    #[test]
    fn test_load_error_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(tmp.path());
        let source = MemorySource::new()
            .with_document("first.md", post("First", "2021-01-05"))
            .with_document("undated.md", "---\ntitle: Undated\n---\nbody");

        let err = Generator::new(&blog).unwrap().generate(&source).unwrap_err();
        assert!(err.to_string().contains("date"));
        assert!(!blog.public_dir.join("index.html").exists());
    }

    #[test]
    fn test_stale_pages_removed_on_regenerate() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(tmp.path());
        let both = MemorySource::new()
            .with_document("kept.md", post("Kept", "2021-01-05"))
            .with_document("gone.md", post("Gone", "2021-01-06"));
        let generator = Generator::new(&blog).unwrap();
        generator.generate(&both).unwrap();
        assert!(blog.public_dir.join("gone/index.html").exists());

        let kept = MemorySource::new().with_document("kept.md", post("Kept", "2021-01-05"));
        generator.generate(&kept).unwrap();
        assert!(blog.public_dir.join("kept/index.html").exists());
        assert!(!blog.public_dir.join("gone").exists());

        // A failed load leaves the last good output in place
        let broken = MemorySource::new().with_document("undated.md", "---\ntitle: U\n---\n");
        assert!(generator.generate(&broken).is_err());
        assert!(blog.public_dir.join("kept/index.html").exists());
    }

    #[test]
    fn test_refuses_public_dir_holding_sources() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(crate::CONFIG_FILE), "public_dir: .\n").unwrap();
        let blog = blog_in(tmp.path());
        let source = MemorySource::new().with_document("a.md", post("A", "2021-01-05"));

        let err = Generator::new(&blog).unwrap().generate(&source).unwrap_err();
        assert!(err.to_string().contains("Refusing to clear"));
        assert!(tmp.path().join(crate::CONFIG_FILE).exists());
    }

    #[test]
    fn test_reserved_identifier_rejected() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(tmp.path());
        let source = MemorySource::new().with_document("about.md", post("About me", "2021-01-05"));

        let err = Generator::new(&blog).unwrap().generate(&source).unwrap_err();
        assert!(err.to_string().contains("collides"));
    }

    #[test]
    fn test_copies_assets_but_not_posts() {
        let tmp = TempDir::new().unwrap();
        let blog = blog_in(tmp.path());
        fs::create_dir_all(blog.source_dir.join("img")).unwrap();
        fs::write(blog.source_dir.join("img/twitter-card.jpg"), b"jpg").unwrap();
        fs::create_dir_all(blog.source_dir.join(POSTS_DIR)).unwrap();
        fs::write(
            blog.source_dir.join(POSTS_DIR).join("hello.md"),
            post("Hello", "2021-01-05"),
        )
        .unwrap();
        fs::write(blog.source_dir.join(POSTS_DIR).join("cover.png"), b"png").unwrap();

        let source = DirectorySource::new(&blog.source_dir, false);
        let report = Generator::new(&blog).unwrap().generate(&source).unwrap();
        assert_eq!(report.assets, 1);
        assert!(blog.public_dir.join("img/twitter-card.jpg").exists());
        assert!(!blog.public_dir.join("cover.png").exists());
        assert!(blog.public_dir.join("hello/index.html").exists());
    }
}
