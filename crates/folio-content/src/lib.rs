//! Markdown content trees for documentation pages.
//!
//! This crate turns authored Markdown into a [`ContentTree`]: a small,
//! renderer-agnostic element tree that a page registry can store and hand
//! to a layout untouched. It also provides:
//!
//! - [`MarkdownParser`]: pulldown-cmark events to [`ContentTree`], with unique
//!   heading anchors and relative `.md` link resolution
//! - [`TocEntry`] and [`ContentTree::toc`]: table of contents extraction
//! - [`to_html`]: HTML serialization of a tree
//! - [`split_front_matter`]: separates a leading `---` YAML block from the body
//!
//! # Example
//!
//! ```
//! use folio_content::{MarkdownParser, to_html};
//!
//! let tree = MarkdownParser::new().parse("# Hello\n\n**Bold** text");
//! assert_eq!(tree.title().as_deref(), Some("Hello"));
//! assert_eq!(
//!     to_html(&tree),
//!     r#"<h1 id="hello">Hello</h1><p><strong>Bold</strong> text</p>"#
//! );
//! ```

mod front_matter;
mod html;
mod node;
mod parser;
mod toc;
mod util;

pub use front_matter::split_front_matter;
pub use html::{escape_html, to_html, write_html};
pub use node::{ContentTree, Element, Node};
pub use parser::MarkdownParser;
pub use toc::{HeadingIds, TocEntry, TocRange, slugify};
pub use util::resolve_link;
