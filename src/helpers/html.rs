//! HTML helper functions

use serde::Serialize;

use super::url::full_url_for;
use crate::config::SiteConfig;

/// One `<meta>` tag in the page head
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaTag {
    /// `name` or `property`
    pub attr: &'static str,
    pub key: String,
    pub content: String,
}

impl MetaTag {
    fn name(key: &str, content: impl Into<String>) -> Self {
        Self {
            attr: "name",
            key: key.to_string(),
            content: content.into(),
        }
    }

    fn property(key: &str, content: impl Into<String>) -> Self {
        Self {
            attr: "property",
            key: key.to_string(),
            content: content.into(),
        }
    }
}

/// Twitter card and Open Graph tags for the listing page.
///
/// Everything comes from site configuration; tags with nothing to say are
/// left out.
pub fn social_meta_tags(config: &SiteConfig) -> Vec<MetaTag> {
    let social = &config.social;
    let description = config.meta_description();
    let image = if social.image.is_empty() {
        None
    } else if social.image.starts_with("http://") || social.image.starts_with("https://") {
        Some(social.image.clone())
    } else {
        Some(full_url_for(config, &social.image))
    };
    let site_url = full_url_for(config, "/");

    let mut tags = vec![MetaTag::name("twitter:card", &social.twitter_card)];
    if !social.twitter_handle.is_empty() {
        tags.push(MetaTag::name("twitter:site", &social.twitter_handle));
        tags.push(MetaTag::name("twitter:creator", &social.twitter_handle));
    }
    tags.push(MetaTag::name("twitter:title", &config.title));
    if !description.is_empty() {
        tags.push(MetaTag::name("twitter:description", description));
    }
    if let Some(image) = &image {
        tags.push(MetaTag::name("twitter:image", image));
    }

    tags.push(MetaTag::property("og:url", site_url));
    tags.push(MetaTag::property("og:type", &social.og_type));
    tags.push(MetaTag::property("og:title", &config.title));
    if !description.is_empty() {
        tags.push(MetaTag::property("og:description", description));
    }
    if let Some(image) = image {
        tags.push(MetaTag::property("og:image", image));
    }

    tags
}

/// Meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="postdeck {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
