//! Per-invocation render state.
//!
//! A [`Render`] is created for every call to
//! [`HtmlRenderer::render`](crate::HtmlRenderer::render) and dropped when it
//! returns, so one renderer can be reused for any number of pages. Block
//! overrides receive it and write through the same primitives the default
//! routines use.

use std::any::Any;

use blockpress_model::{Block, BlockKind, Page, to_no_dash_id};

use crate::error::{Failure, RenderError};
use crate::renderer::HtmlRenderer;
use crate::util::{escape_html, is_self_closing};
use crate::writer::Output;

/// Position of the block being visited within its sibling list.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'d> {
    pub(crate) siblings: &'d [Block],
    pub(crate) index: usize,
}

/// Traversal state of one render.
///
/// `'r` borrows the configured [`HtmlRenderer`], `'d` the page being
/// rendered.
pub struct Render<'r, 'd> {
    pub(crate) renderer: &'r HtmlRenderer,
    pub(crate) page: &'d Page,
    pub(crate) out: Output,
    pub(crate) cursor: Cursor<'d>,
    /// Ancestors of the block being visited, innermost last.
    pub(crate) parents: Vec<&'d Block>,
}

impl<'r, 'd> Render<'r, 'd> {
    pub(crate) fn new(renderer: &'r HtmlRenderer, page: &'d Page) -> Self {
        Self {
            renderer,
            page,
            out: Output::new(),
            cursor: Cursor {
                siblings: std::slice::from_ref(&page.root),
                index: 0,
            },
            parents: Vec::new(),
        }
    }

    /// The page being rendered.
    #[must_use]
    pub fn page(&self) -> &'d Page {
        self.page
    }

    /// Data attached with [`HtmlRenderer::with_caller_data`], if it has type `T`.
    #[must_use]
    pub fn caller_data<T: Any>(&self) -> Option<&'r T> {
        self.renderer.caller_data.as_deref()?.downcast_ref()
    }

    /// Current nesting level.
    #[must_use]
    pub fn level(&self) -> usize {
        self.out.level()
    }

    /// Number of buffers pushed and not yet popped.
    #[must_use]
    pub fn buffer_depth(&self) -> usize {
        self.out.depth()
    }

    /// Append a string verbatim.
    pub fn write_string(&mut self, s: &str) {
        self.out.write_str(s);
    }

    /// End the current line unless it is already ended.
    pub fn newline(&mut self) {
        self.out.newline();
    }

    /// Write two spaces per nesting level.
    pub fn write_indent(&mut self) {
        self.out.write_indent();
    }

    /// Write indentation for `level + add`.
    pub fn write_indent_plus(&mut self, add: usize) {
        self.out.write_indent_plus(add);
    }

    /// Start capturing output into a fresh buffer.
    ///
    /// Must be paired with exactly one [`pop_buffer`](Self::pop_buffer).
    pub fn push_new_buffer(&mut self) {
        self.out.push_new_buffer();
    }

    /// Stop capturing and return what was written since the matching push.
    ///
    /// # Errors
    ///
    /// [`Invariant::BufferUnderflow`](crate::Invariant::BufferUnderflow) when
    /// no buffer is pushed.
    pub fn pop_buffer(&mut self) -> Result<String, RenderError> {
        Ok(self.out.pop_buffer()?)
    }

    /// Run `f` against a fresh buffer and return what it wrote.
    ///
    /// The buffer is popped even when `f` fails.
    pub fn capture<F>(&mut self, f: F) -> Result<String, RenderError>
    where
        F: FnOnce(&mut Self) -> Result<(), RenderError>,
    {
        self.out.push_new_buffer();
        let result = f(self);
        let captured = self.out.pop_buffer()?;
        result.map(|()| captured)
    }

    /// Parent of the block being visited; `None` for the root.
    ///
    /// Only meaningful while a block is being visited.
    #[must_use]
    pub fn parent(&self) -> Option<&'d Block> {
        self.parents.last().copied()
    }

    /// Sibling preceding the block being visited.
    #[must_use]
    pub fn prev_block(&self) -> Option<&'d Block> {
        let index = self.cursor.index.checked_sub(1)?;
        self.cursor.siblings.get(index)
    }

    /// Sibling following the block being visited.
    #[must_use]
    pub fn next_block(&self) -> Option<&'d Block> {
        self.cursor.siblings.get(self.cursor.index + 1)
    }

    #[must_use]
    pub fn is_prev_block_of_kind(&self, kind: &BlockKind) -> bool {
        self.prev_block().is_some_and(|b| &b.kind == kind)
    }

    #[must_use]
    pub fn is_next_block_of_kind(&self, kind: &BlockKind) -> bool {
        self.next_block().is_some_and(|b| &b.kind == kind)
    }

    /// ` id="…"` for `block` when id attributes are enabled, else empty.
    #[must_use]
    pub fn id_attr(&self, block: &Block) -> String {
        if self.renderer.add_id_attribute {
            format!(r#" id="{}""#, escape_html(&to_no_dash_id(&block.id)))
        } else {
            String::new()
        }
    }

    /// Write an element for `block`.
    ///
    /// On entry writes the opening tag with `attrs` (values escaped), the
    /// optional pre-rendered `content` on its own line, then the block's
    /// inline content. On exit writes the closing tag unless `tag` is
    /// self-closing.
    pub fn write_element(
        &mut self,
        block: &Block,
        tag: &str,
        attrs: &[(&str, &str)],
        content: &str,
        entering: bool,
    ) -> Result<(), RenderError> {
        if !entering {
            if !is_self_closing(tag) {
                self.out.write_indent();
                self.out.write_str(&format!("</{tag}>"));
                self.out.newline();
            }
            return Ok(());
        }

        let mut open = format!("<{tag}");
        for (name, value) in attrs {
            open.push_str(&format!(r#" {name}="{}""#, escape_html(value)));
        }
        open.push_str(&self.id_attr(block));
        open.push('>');

        self.out.write_indent();
        self.out.write_str(&open);
        self.out.newline();
        if !content.is_empty() {
            self.out.write_indent();
            self.out.write_str(content);
            self.out.newline();
        }
        self.render_inlines(&block.inline_content)?;
        self.out.newline();
        Ok(())
    }

    /// Report a soft failure.
    ///
    /// Always logged; fails the render only in strict mode.
    pub(crate) fn soft_failure(&self, failure: Failure) -> Result<(), RenderError> {
        let message = failure.to_string();
        tracing::warn!(page_id = %self.page.id, error = %message, "Degraded render");
        if let Some(sink) = &self.renderer.log_sink {
            sink(&message);
        }
        if self.renderer.strict {
            return Err(RenderError::Strict(failure));
        }
        Ok(())
    }
}
