//! Depth-first traversal of the block tree.

use blockpress_model::Block;

use crate::blocks::{BlockRenderFn, needs_wrapper};
use crate::context::{Cursor, Render};
use crate::error::{Failure, Invariant, RenderError};

impl<'r, 'd> Render<'r, 'd> {
    /// Render the page root into a fresh buffer and return the markup.
    ///
    /// Whatever happens, the buffer stack is back at depth zero afterwards.
    pub(crate) fn render_root(&mut self) -> Result<String, RenderError> {
        let page = self.page;
        self.out.push_new_buffer();
        let result = self.render_block(&page.root).and_then(|()| self.finish());
        self.out.unwind();
        result
    }

    fn finish(&mut self) -> Result<String, RenderError> {
        let html = self.out.pop_buffer()?;
        if self.out.level() != 0 {
            return Err(Invariant::UnbalancedLevel(self.out.level()).into());
        }
        if self.out.depth() != 0 {
            return Err(Invariant::UnclosedBuffers(self.out.depth()).into());
        }
        Ok(html)
    }

    /// Visit `block` and its subtree.
    ///
    /// A block whose kind has no routine, and which the override did not
    /// handle, writes no markup of its own; its children are rendered at
    /// its level. They still form their own sibling list, so list items
    /// among them do not join a run that surrounds the block.
    pub(crate) fn render_block(&mut self, block: &'d Block) -> Result<(), RenderError> {
        let routine = Self::resolve(&block.kind);
        let handled = self.dispatch(routine, block, true)?;
        let flatten = routine.is_none() && !handled;

        let wrap = needs_wrapper(block);
        if wrap {
            self.out.newline();
            self.out.write_indent();
            self.out.write_str(r#"<div class="notion-wrap">"#);
            self.out.newline();
        }

        if !flatten {
            self.out.enter_level();
        }
        let saved = self.cursor;
        self.parents.push(block);
        for (index, child) in block.content.iter().enumerate() {
            self.cursor = Cursor {
                siblings: &block.content,
                index,
            };
            self.render_block(child)?;
        }
        self.parents.pop();
        self.cursor = saved;
        if !flatten {
            self.out.leave_level()?;
        }

        if wrap {
            self.out.newline();
            self.out.write_indent();
            self.out.write_str("</div>");
            self.out.newline();
        }

        self.dispatch(routine, block, false)?;
        Ok(())
    }

    /// Run the override, then the default routine unless the override
    /// handled the event. Returns whether anything handled it.
    fn dispatch(
        &mut self,
        routine: Option<BlockRenderFn<'r, 'd>>,
        block: &'d Block,
        entering: bool,
    ) -> Result<bool, RenderError> {
        let renderer = self.renderer;
        if let Some(block_override) = &renderer.block_override
            && block_override(self, block, entering)?
        {
            return Ok(true);
        }
        match routine {
            Some(routine) => routine(self, block, entering),
            None => {
                if entering {
                    self.soft_failure(Failure::UnknownBlockType {
                        kind: block.kind.to_string(),
                        block_id: block.id.clone(),
                        page_id: self.page.id.clone(),
                    })?;
                }
                Ok(false)
            }
        }
    }
}
