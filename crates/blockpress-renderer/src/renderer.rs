//! Renderer configuration and the render entry point.

use std::any::Any;

use blockpress_config::{DEFAULT_PAGE_LINK_BASE, RenderConfig};
use blockpress_model::{Block, InlineParser, InlineSpan, Page, PlainValueParser};

use crate::context::Render;
use crate::error::RenderError;

/// Hook called on entry and exit of every block before the default routine.
///
/// Returning `Ok(true)` skips the default routine for that event.
pub type BlockOverride =
    Box<dyn Fn(&mut Render<'_, '_>, &Block, bool) -> Result<bool, RenderError>>;

/// Hook replacing the markup of a linked span when it returns `Some`.
pub type LinkOverride = Box<dyn Fn(&InlineSpan) -> Option<String>>;

/// Receives the message of every soft failure.
pub type LogSink = Box<dyn Fn(&str)>;

/// Block tree to HTML renderer.
///
/// Holds configuration only; every [`render`](Self::render) call builds
/// its own traversal state, so one renderer can render many pages.
///
/// # Example
///
/// ```
/// use blockpress_model::{Block, BlockKind, InlineSpan, Page};
/// use blockpress_renderer::HtmlRenderer;
///
/// let root = Block::new(BlockKind::Page, "p").with_child(
///     Block::new(BlockKind::Text, "t").with_spans(vec![InlineSpan::text("Hello")]),
/// );
/// let html = HtmlRenderer::new()
///     .render_to_string(&Page::new("p", root))
///     .unwrap();
/// assert!(html.contains(r#"<div class="notion-text">"#));
/// ```
pub struct HtmlRenderer {
    pub(crate) add_id_attribute: bool,
    pub(crate) strict: bool,
    pub(crate) page_link_base: String,
    pub(crate) block_override: Option<BlockOverride>,
    pub(crate) link_override: Option<LinkOverride>,
    pub(crate) log_sink: Option<LogSink>,
    pub(crate) caller_data: Option<Box<dyn Any>>,
    pub(crate) inline_parser: Box<dyn InlineParser>,
}

impl HtmlRenderer {
    /// Create a renderer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            add_id_attribute: false,
            strict: false,
            page_link_base: DEFAULT_PAGE_LINK_BASE.to_owned(),
            block_override: None,
            link_override: None,
            log_sink: None,
            caller_data: None,
            inline_parser: Box::new(PlainValueParser),
        }
    }

    /// Create a renderer from the `[render]` configuration section.
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new()
            .with_id_attributes(config.add_id_attribute)
            .with_strict_mode(config.strict)
            .with_page_link_base(config.page_link_base.clone())
    }

    /// Emit `id="<dash-free block id>"` on block elements.
    #[must_use]
    pub fn with_id_attributes(mut self, enabled: bool) -> Self {
        self.add_id_attribute = enabled;
        self
    }

    /// Abort on the first soft failure instead of degrading.
    #[must_use]
    pub fn with_strict_mode(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Prefix for links to sub-pages and linked pages.
    #[must_use]
    pub fn with_page_link_base(mut self, base: impl Into<String>) -> Self {
        self.page_link_base = base.into();
        self
    }

    /// Set the per-block hook. See [`BlockOverride`].
    #[must_use]
    pub fn with_block_override<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Render<'_, '_>, &Block, bool) -> Result<bool, RenderError> + 'static,
    {
        self.block_override = Some(Box::new(f));
        self
    }

    /// Set the link hook. See [`LinkOverride`].
    #[must_use]
    pub fn with_link_override<F>(mut self, f: F) -> Self
    where
        F: Fn(&InlineSpan) -> Option<String> + 'static,
    {
        self.link_override = Some(Box::new(f));
        self
    }

    /// Receive soft failure messages, in addition to `tracing`.
    #[must_use]
    pub fn with_log_sink<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + 'static,
    {
        self.log_sink = Some(Box::new(f));
        self
    }

    /// Attach data for overrides, retrieved with [`Render::caller_data`].
    #[must_use]
    pub fn with_caller_data<T: Any>(mut self, data: T) -> Self {
        self.caller_data = Some(Box::new(data));
        self
    }

    /// Parser for collection cell values.
    #[must_use]
    pub fn with_inline_parser<P: InlineParser + 'static>(mut self, parser: P) -> Self {
        self.inline_parser = Box::new(parser);
        self
    }

    /// Render `page` to HTML bytes.
    ///
    /// # Errors
    ///
    /// [`RenderError::Strict`] on a soft failure in strict mode,
    /// [`RenderError::Invariant`] when the traversal bookkeeping breaks
    /// (typically an override that left a buffer or level unbalanced).
    pub fn render(&self, page: &Page) -> Result<Vec<u8>, RenderError> {
        self.render_to_string(page).map(String::into_bytes)
    }

    /// Like [`render`](Self::render), returning a `String`.
    pub fn render_to_string(&self, page: &Page) -> Result<String, RenderError> {
        tracing::debug!(page_id = %page.id, "Rendering page");
        let mut cx = Render::new(self, page);
        let result = cx.render_root();
        debug_assert_eq!(cx.buffer_depth(), 0);
        let html = result?;
        tracing::debug!(page_id = %page.id, bytes = html.len(), "Rendered page");
        Ok(html)
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `page` with default settings.
pub fn to_html(page: &Page) -> Result<Vec<u8>, RenderError> {
    HtmlRenderer::new().render(page)
}
