//! Blocks and pages.

use std::fmt;

use crate::collection::CollectionViewInfo;
use crate::inline::InlineSpan;

/// Type tag of a [`Block`].
///
/// The set is closed; tags the renderer doesn't know are preserved in
/// [`Unknown`](Self::Unknown) so they can be reported by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(from = "String"))]
pub enum BlockKind {
    Page,
    Text,
    NumberedList,
    BulletedList,
    Header,
    SubHeader,
    SubSubHeader,
    Todo,
    Toggle,
    Quote,
    Divider,
    Code,
    Bookmark,
    Image,
    ColumnList,
    Column,
    CollectionView,
    Embed,
    Gist,
    Tweet,
    Video,
    File,
    Pdf,
    /// Tag not recognised by this version of the model.
    Unknown(String),
}

impl BlockKind {
    /// Parse a wire tag such as `"numbered_list"`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "page" => Self::Page,
            "text" => Self::Text,
            "numbered_list" => Self::NumberedList,
            "bulleted_list" => Self::BulletedList,
            "header" => Self::Header,
            "sub_header" => Self::SubHeader,
            "sub_sub_header" => Self::SubSubHeader,
            "to_do" => Self::Todo,
            "toggle" => Self::Toggle,
            "quote" => Self::Quote,
            "divider" => Self::Divider,
            "code" => Self::Code,
            "bookmark" => Self::Bookmark,
            "image" => Self::Image,
            "column_list" => Self::ColumnList,
            "column" => Self::Column,
            "collection_view" => Self::CollectionView,
            "embed" => Self::Embed,
            "gist" => Self::Gist,
            "tweet" => Self::Tweet,
            "video" => Self::Video,
            "file" => Self::File,
            "pdf" => Self::Pdf,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Wire tag for this kind.
    #[must_use]
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Page => "page",
            Self::Text => "text",
            Self::NumberedList => "numbered_list",
            Self::BulletedList => "bulleted_list",
            Self::Header => "header",
            Self::SubHeader => "sub_header",
            Self::SubSubHeader => "sub_sub_header",
            Self::Todo => "to_do",
            Self::Toggle => "toggle",
            Self::Quote => "quote",
            Self::Divider => "divider",
            Self::Code => "code",
            Self::Bookmark => "bookmark",
            Self::Image => "image",
            Self::ColumnList => "column_list",
            Self::Column => "column",
            Self::CollectionView => "collection_view",
            Self::Embed => "embed",
            Self::Gist => "gist",
            Self::Tweet => "tweet",
            Self::Video => "video",
            Self::File => "file",
            Self::Pdf => "pdf",
            Self::Unknown(tag) => tag,
        }
    }
}

impl Default for BlockKind {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<&str> for BlockKind {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl From<String> for BlockKind {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Sizing information of a video block.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct VideoFormat {
    pub block_width: i64,
    pub block_height: i64,
    pub block_aspect_ratio: f64,
    /// Embeddable URL; falls back to [`Block::source`] when empty.
    pub display_source: String,
}

/// Display information of an embed block.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct EmbedFormat {
    pub display_source: String,
}

/// A node of the document tree.
///
/// Children are owned by their parent through [`content`](Self::content).
/// There is no stored back-reference: the renderer tracks the parent of
/// the node being visited in its own traversal state.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct Block {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: BlockKind,
    /// Parent id as recorded by the source, not the traversal parent.
    pub parent_id: Option<String>,
    pub content: Vec<Block>,
    pub inline_content: Vec<InlineSpan>,
    pub title: String,
    pub link: String,
    pub source: String,
    pub image_url: String,
    pub code: String,
    pub code_language: String,
    pub is_checked: bool,
    pub format_video: Option<VideoFormat>,
    pub format_embed: Option<EmbedFormat>,
    pub collection_views: Vec<CollectionViewInfo>,
}

impl Block {
    /// Create an empty block of the given kind.
    #[must_use]
    pub fn new(kind: BlockKind, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            ..Self::default()
        }
    }

    /// Append a child block, recording this block as its source parent.
    #[must_use]
    pub fn with_child(mut self, mut child: Block) -> Self {
        if child.parent_id.is_none() {
            child.parent_id = Some(self.id.clone());
        }
        self.content.push(child);
        self
    }

    /// Append several child blocks.
    #[must_use]
    pub fn with_children(self, children: impl IntoIterator<Item = Block>) -> Self {
        children.into_iter().fold(self, Block::with_child)
    }

    /// Replace the inline content.
    #[must_use]
    pub fn with_spans(mut self, spans: Vec<InlineSpan>) -> Self {
        self.inline_content = spans;
        self
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// True when the block has child blocks.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.content.is_empty()
    }
}

/// A document: the root block plus the page identifier.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct Page {
    pub id: String,
    pub root: Block,
}

impl Page {
    #[must_use]
    pub fn new(id: impl Into<String>, root: Block) -> Self {
        Self {
            id: id.into(),
            root,
        }
    }
}
