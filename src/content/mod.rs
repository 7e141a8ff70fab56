//! Content module - post documents, their metadata and where they come from

mod frontmatter;
mod markdown;
mod post;
mod source;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use markdown::{MarkdownRenderer, MORE_MARKER};
pub use post::{BodyRef, PostCollection, PostSummary};
pub use source::{ContentSource, DirectorySource, MemorySource, POSTS_DIR};
