//! Grouping of consecutive list items under one `<ol>`/`<ul>`.
//!
//! The source model has no list container: numbered and bulleted items are
//! plain siblings. A wrapper is opened when the previous sibling is not an
//! item of the same kind and closed when the next one isn't. Only the
//! neighbouring siblings decide; an override that takes over part of a run
//! gets whatever markup it writes, and the default wrappers around it are
//! still written by the items it leaves alone.

use blockpress_model::{Block, BlockKind};

use crate::context::Render;
use crate::error::RenderError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Numbered,
    Bulleted,
}

impl ListKind {
    /// List kind of a block, if it is a list item.
    #[must_use]
    pub fn of(kind: &BlockKind) -> Option<Self> {
        match kind {
            BlockKind::NumberedList => Some(Self::Numbered),
            BlockKind::BulletedList => Some(Self::Bulleted),
            _ => None,
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Numbered => "notion-numbered-list",
            Self::Bulleted => "notion-bulleted-list",
        }
    }

    fn wrapper_tag(self) -> &'static str {
        match self {
            Self::Numbered => "ol",
            Self::Bulleted => "ul",
        }
    }
}

impl Render<'_, '_> {
    pub(crate) fn render_list_item(
        &mut self,
        block: &Block,
        kind: ListKind,
        entering: bool,
    ) -> Result<bool, RenderError> {
        if entering {
            let continues_run = self
                .prev_block()
                .is_some_and(|prev| ListKind::of(&prev.kind) == Some(kind));
            if !continues_run {
                self.open_list(kind);
            }
            self.write_element(block, "li", &[("class", kind.class())], "", true)?;
        } else {
            self.write_element(block, "li", &[], "", false)?;
            let run_continues = self
                .next_block()
                .is_some_and(|next| ListKind::of(&next.kind) == Some(kind));
            if !run_continues {
                self.close_list(kind);
            }
        }
        Ok(true)
    }

    fn open_list(&mut self, kind: ListKind) {
        self.out.write_indent();
        self.out
            .write_str(&format!(r#"<{} class="{}">"#, kind.wrapper_tag(), kind.class()));
        self.out.newline();
    }

    fn close_list(&mut self, kind: ListKind) {
        self.out.write_indent();
        self.out.write_str(&format!("</{}>", kind.wrapper_tag()));
        self.out.newline();
    }
}
