//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Writing
    pub render_drafts: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Listing
    pub date_format: String,
    pub read_more: String,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub about: AboutConfig,

    // Meta
    #[serde(default)]
    pub social: SocialConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            render_drafts: false,
            highlight: HighlightConfig::default(),

            date_format: "MMMM DD, YYYY".to_string(),
            read_more: "Read more".to_string(),
            listing: ListingConfig::default(),
            about: AboutConfig::default(),

            social: SocialConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Description used for the listing page metadata, falling back to the subtitle
    pub fn meta_description(&self) -> &str {
        if self.description.is_empty() {
            &self.subtitle
        } else {
            &self.description
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub line_number: bool,
    /// Name of a syntect default theme
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            line_number: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// Heading block shown above the post list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub heading: String,
    pub tagline: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            heading: "Latest".to_string(),
            tagline: "All the latest posts.".to_string(),
        }
    }
}

/// The fixed "about" page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    pub title: String,
    pub tagline: String,
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            title: "About".to_string(),
            tagline: String::new(),
        }
    }
}

/// Social-sharing metadata emitted on the listing page.
///
/// Constant per deployment; nothing here is derived from post content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub twitter_card: String,
    /// Handle used for both `twitter:site` and `twitter:creator`
    pub twitter_handle: String,
    /// Preview image, relative to the site root or absolute
    pub image: String,
    pub og_type: String,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            twitter_card: "summary_large_image".to_string(),
            twitter_handle: String::new(),
            image: String::new(),
            og_type: "article".to_string(),
        }
    }
}
