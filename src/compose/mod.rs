//! Page composer - turns a post collection into displayable cards
//!
//! Composition is a pure, single pass over an injected [`PostCollection`].
//! A post whose body cannot be resolved or rendered does not abort the page:
//! its card keeps title, date and link and carries [`CardBody::Unavailable`]
//! in place of the excerpt.

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{ContentSource, MarkdownRenderer, PostCollection, PostSummary};
use crate::error::RenderError;
use crate::helpers::{check_date_format, date_iso, format_date, post_url};

/// Rendered body of a card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum CardBody {
    /// Rendered HTML
    Excerpt(String),
    /// Placeholder; holds the reason the body failed to render
    Unavailable(String),
}

impl CardBody {
    pub fn html(&self) -> Option<&str> {
        match self {
            CardBody::Excerpt(html) => Some(html),
            CardBody::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, CardBody::Excerpt(_))
    }
}

/// One post, ready for a template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCard {
    pub identifier: String,
    pub title: String,
    /// Route of the post page
    pub link: String,
    /// `YYYY-MM-DD`, for `<time datetime>`
    pub date_iso: String,
    /// Human-readable date, e.g. "January 05, 2021"
    pub date_display: String,
    pub body: CardBody,
}

/// Binds post summaries into cards
pub struct PageComposer {
    config: SiteConfig,
    renderer: MarkdownRenderer,
}

impl PageComposer {
    /// Fails when `date_format` cannot render a calendar date
    pub fn new(config: &SiteConfig) -> Result<Self> {
        check_date_format(&config.date_format)
            .with_context(|| format!("Invalid date_format {:?}", config.date_format))?;
        let renderer =
            MarkdownRenderer::with_options(&config.highlight.theme, config.highlight.line_number);
        Ok(Self {
            config: config.clone(),
            renderer,
        })
    }

    /// Cards for the listing page, newest first.
    ///
    /// Posts published on the same day keep their order from `collection`.
    /// Always returns one card per post.
    pub fn render_list(
        &self,
        collection: &PostCollection,
        source: &dyn ContentSource,
    ) -> Vec<RenderedCard> {
        collection
            .sorted_newest_first()
            .into_iter()
            .map(|post| {
                let body = self.render_body(post, source, |body| {
                    MarkdownRenderer::excerpt(body).to_string()
                });
                self.card(post, body)
            })
            .collect()
    }

    /// Card for a post page, carrying the full body instead of the excerpt
    pub fn render_post(&self, post: &PostSummary, source: &dyn ContentSource) -> RenderedCard {
        let body = self.render_body(post, source, MarkdownRenderer::strip_more);
        self.card(post, body)
    }

    fn render_body(
        &self,
        post: &PostSummary,
        source: &dyn ContentSource,
        select: impl Fn(&str) -> String,
    ) -> CardBody {
        match self.try_render_body(post, source, select) {
            Ok(html) => CardBody::Excerpt(html),
            Err(e) => {
                tracing::warn!(identifier = %post.identifier, "Rendering placeholder: {}", e);
                CardBody::Unavailable(e.to_string())
            }
        }
    }

    fn try_render_body(
        &self,
        post: &PostSummary,
        source: &dyn ContentSource,
        select: impl Fn(&str) -> String,
    ) -> Result<String, RenderError> {
        let markdown = source.resolve_body(&post.body_ref)?;
        self.renderer
            .render(&select(&markdown))
            .map_err(|e| RenderError::Markdown {
                key: post.body_ref.to_string(),
                message: e.to_string(),
            })
    }

    fn card(&self, post: &PostSummary, body: CardBody) -> RenderedCard {
        RenderedCard {
            identifier: post.identifier.clone(),
            title: post.title.clone(),
            link: post_url(&self.config, &post.identifier),
            date_iso: date_iso(&post.publish_date),
            // Format was checked in `new`
            date_display: format_date(&post.publish_date, &self.config.date_format)
                .unwrap_or_else(|_| date_iso(&post.publish_date)),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BodyRef, MemorySource};
    use chrono::NaiveDate;

    fn doc(title: &str, date: &str, body: &str) -> String {
        format!("---\ntitle: {}\ndate: {}\n---\n{}", title, date, body)
    }

    fn composer() -> PageComposer {
        PageComposer::new(&SiteConfig::default()).unwrap()
    }

    fn ids(cards: &[RenderedCard]) -> Vec<&str> {
        cards.iter().map(|c| c.identifier.as_str()).collect()
    }

    #[test]
    fn test_newest_first() {
        let source = MemorySource::new()
            .with_document("a.md", doc("First", "2021-01-05", "Hello from January."))
            .with_document("b.md", doc("Second", "2021-02-10", "Hello from February."));
        let posts = source.list_posts().unwrap();

        let cards = composer().render_list(&posts, &source);
        assert_eq!(ids(&cards), vec!["b", "a"]);

        let first = &cards[0];
        assert_eq!(first.title, "Second");
        assert_eq!(first.link, "/b/");
        assert_eq!(first.date_iso, "2021-02-10");
        assert_eq!(first.date_display, "February 10, 2021");
        assert_eq!(first.body.html(), Some("<p>Hello from February.</p>\n"));
    }

    #[test]
    fn test_same_day_keeps_input_order() {
        let day = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let other = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let source = MemorySource::new();

        // Every position of the odd one out around the tied pair
        for pos in 0..3 {
            let mut posts = vec![
                PostSummary::new("p", "P", day, BodyRef::new("p")),
                PostSummary::new("q", "Q", day, BodyRef::new("q")),
            ];
            posts.insert(pos, PostSummary::new("o", "O", other, BodyRef::new("o")));
            let collection = PostCollection::from_posts(posts).unwrap();

            let cards = composer().render_list(&collection, &source);
            assert_eq!(ids(&cards), vec!["p", "q", "o"]);
        }
    }

    #[test]
    fn test_render_list_is_idempotent() {
        let source = MemorySource::new()
            .with_document("a.md", doc("A", "2021-01-05", "a"))
            .with_document("b.md", doc("B", "2021-01-05", "b"))
            .with_document("c.md", doc("C", "2020-12-31", "c"));
        let posts = source.list_posts().unwrap();
        let composer = composer();

        assert_eq!(
            composer.render_list(&posts, &source),
            composer.render_list(&posts, &source)
        );
    }

    #[test]
    fn test_unresolvable_body_renders_placeholder() {
        let source =
            MemorySource::new().with_document("ok.md", doc("Fine", "2021-01-05", "Body."));
        let jan = NaiveDate::from_ymd_opt(2021, 1, 5).unwrap();
        let feb = NaiveDate::from_ymd_opt(2021, 2, 1).unwrap();
        let collection = PostCollection::from_posts(vec![
            PostSummary::new("ok", "Fine", jan, BodyRef::new("ok.md")),
            PostSummary::new("broken", "Broken", feb, BodyRef::new("missing.md")),
        ])
        .unwrap();

        let cards = composer().render_list(&collection, &source);
        assert_eq!(cards.len(), collection.len());

        let broken = &cards[0];
        assert_eq!(broken.identifier, "broken");
        assert_eq!(broken.title, "Broken");
        assert_eq!(broken.link, "/broken/");
        assert!(!broken.body.is_available());
        assert!(matches!(
            &broken.body,
            CardBody::Unavailable(reason) if reason.contains("missing.md")
        ));

        let ok = &cards[1];
        assert_eq!(ok.title, "Fine");
        assert_eq!(ok.date_display, "January 05, 2021");
        assert_eq!(ok.link, "/ok/");
        assert!(ok.body.is_available());
    }

    #[test]
    fn test_excerpt_stops_at_more_marker() {
        let source = MemorySource::new().with_document(
            "a.md",
            doc("A", "2021-01-05", "Teaser.\n\n<!-- more -->\n\nThe rest."),
        );
        let posts = source.list_posts().unwrap();
        let composer = composer();

        let card = &composer.render_list(&posts, &source)[0];
        let excerpt = card.body.html().unwrap();
        assert!(excerpt.contains("Teaser."));
        assert!(!excerpt.contains("The rest."));

        let page = composer.render_post(posts.get("a").unwrap(), &source);
        let full = page.body.html().unwrap();
        assert!(full.contains("Teaser."));
        assert!(full.contains("The rest."));
    }

    #[test]
    fn test_custom_date_format() {
        let mut config = SiteConfig::default();
        config.date_format = "YYYY-MM-DD".to_string();
        let source = MemorySource::new().with_document("a.md", doc("A", "2021-01-05", "a"));
        let posts = source.list_posts().unwrap();

        let cards = PageComposer::new(&config)
            .unwrap()
            .render_list(&posts, &source);
        assert_eq!(cards[0].date_display, "2021-01-05");
    }

    #[test]
    fn test_bad_date_format_rejected_up_front() {
        for format in ["MMMM DD, YYYY (100%)", "%Q", "YYYY-MM-DD %H:%M"] {
            let mut config = SiteConfig::default();
            config.date_format = format.to_string();
            let err = PageComposer::new(&config).err().unwrap();
            assert!(err.to_string().contains("Invalid date_format"));
        }
    }

    #[test]
    fn test_empty_collection() {
        let cards = composer().render_list(&PostCollection::default(), &MemorySource::new());
        assert!(cards.is_empty());
    }
}
