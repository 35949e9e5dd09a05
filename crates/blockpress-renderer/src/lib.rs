//! Block tree to HTML renderer.
//!
//! Walks a [`Page`](blockpress_model::Page) depth first and writes indented
//! HTML for every block. Each block kind has a default routine, called on
//! entry and exit; a caller-supplied [`BlockOverride`] runs first and can
//! replace it for any block.
//!
//! # Architecture
//!
//! - [`HtmlRenderer`] holds configuration and hooks.
//! - [`Render`] is the traversal state of one render call. Overrides write
//!   through it with the same primitives the default routines use.
//! - Consecutive list items share one `<ol>`/`<ul>`, collection views
//!   become tables, dates are formatted from their display format.
//!
//! Input problems (an unknown block kind, a malformed date) are logged and
//! rendered around. In strict mode they abort the render instead; see
//! [`RenderError`].
//!
//! # Example
//!
//! ```
//! use blockpress_model::{Block, BlockKind, InlineSpan, Page};
//! use blockpress_renderer::HtmlRenderer;
//!
//! let root = Block::new(BlockKind::Page, "p")
//!     .with_child(Block::new(BlockKind::BulletedList, "a").with_spans(vec![InlineSpan::text("one")]))
//!     .with_child(Block::new(BlockKind::BulletedList, "b").with_spans(vec![InlineSpan::text("two")]));
//!
//! let html = HtmlRenderer::new()
//!     .with_id_attributes(true)
//!     .render_to_string(&Page::new("p", root))
//!     .unwrap();
//! assert_eq!(html.matches("<ul ").count(), 1);
//! assert!(html.contains(r#"<li class="notion-bulleted-list" id="a">"#));
//! ```

mod blocks;
mod context;
mod date;
mod error;
mod inline;
mod list;
mod renderer;
mod table;
mod util;
mod walker;
mod writer;

pub use context::Render;
pub use date::translate_format;
pub use error::{Failure, Invariant, RenderError};
pub use inline::{EMPTY_PLACEHOLDER, default_link_markup};
pub use list::ListKind;
pub use renderer::{BlockOverride, HtmlRenderer, LinkOverride, LogSink, to_html};
pub use util::escape_html;
