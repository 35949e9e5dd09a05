//! Block tree data model for blockpress.
//!
//! A [`Page`] is a tree of heterogeneously typed [`Block`]s. Each block
//! carries an ordered list of [`InlineSpan`]s and, depending on its
//! [`BlockKind`], a type-specific payload (code, media formats, collection
//! views).
//!
//! The model is consumed read-only by `blockpress-renderer`. Decoding it
//! from a wire format is left to the caller; with the `serde` feature
//! enabled every type implements [`serde::Deserialize`].
//!
//! # Example
//!
//! ```
//! use blockpress_model::{Block, BlockKind, InlineSpan, Page};
//!
//! let root = Block::new(BlockKind::Page, "5f2d-11aa")
//!     .with_child(Block::new(BlockKind::Text, "77ab-01").with_spans(vec![InlineSpan::text("Hello")]));
//! let page = Page::new("5f2d-11aa", root);
//! assert_eq!(page.root.content.len(), 1);
//! ```

mod block;
mod collection;
mod date;
mod id;
mod inline;

pub use block::{Block, BlockKind, EmbedFormat, Page, VideoFormat};
pub use collection::{Collection, CollectionRow, CollectionView, CollectionViewInfo, ColumnSchema, TableProperty};
pub use date::{Date, DateKind};
pub use id::to_no_dash_id;
pub use inline::{AttrFlags, InlineParseError, InlineParser, InlineSpan, PlainValueParser};
