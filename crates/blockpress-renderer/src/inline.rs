//! Inline span rendering.

use blockpress_model::{AttrFlags, InlineSpan};

use crate::context::Render;
use crate::error::RenderError;
use crate::util::escape_html;

/// Written in place of inline content that renders to nothing, so empty
/// blocks still take up space.
pub const EMPTY_PLACEHOLDER: &str = "&nbsp;";

/// Wrapper tags per attribute, outermost first.
const ATTR_TAGS: [(AttrFlags, &str, &str); 4] = [
    (AttrFlags::BOLD, "<b>", "</b>"),
    (AttrFlags::ITALIC, "<i>", "</i>"),
    (AttrFlags::STRIKETHROUGH, "<strike>", "</strike>"),
    (AttrFlags::CODE, "<code>", "</code>"),
];

/// Default markup for a linked span.
#[must_use]
pub fn default_link_markup(span: &InlineSpan, link: &str) -> String {
    format!(
        r#"<a class="notion-link" href="{}">{}</a>"#,
        escape_html(link),
        escape_html(&span.text)
    )
}

impl Render<'_, '_> {
    /// Render one span into the active buffer.
    ///
    /// The body is the link markup, the user mention, the date, or the
    /// escaped text, whichever comes first in that order. Spans whose body
    /// is empty write nothing, attribute wrappers included.
    pub fn render_inline(&mut self, span: &InlineSpan) -> Result<(), RenderError> {
        let body = if let Some(link) = &span.link {
            self.link_markup(span, link)
        } else if let Some(user_id) = &span.user_id {
            format!(r#"<span class="notion-user">@{}</span>"#, escape_html(user_id))
        } else if let Some(date) = &span.date {
            self.format_date(date)?
        } else {
            escape_html(&span.text)
        };
        if body.is_empty() {
            return Ok(());
        }

        let mut open = String::new();
        let mut close = String::new();
        for (flag, start, end) in ATTR_TAGS {
            if span.attrs.contains(flag) {
                open.push_str(start);
                close.insert_str(0, end);
            }
        }

        self.out.write_str(&open);
        self.out.write_str(&body);
        self.out.write_str(&close);
        Ok(())
    }

    /// Render spans on their own line, one level deeper than the current
    /// element, writing the placeholder when they produce nothing.
    pub fn render_inlines(&mut self, spans: &[InlineSpan]) -> Result<(), RenderError> {
        self.out.write_indent_plus(1);
        let start = self.out.len();
        for span in spans {
            self.render_inline(span)?;
        }
        if self.out.len() == start {
            self.out.write_str(EMPTY_PLACEHOLDER);
        }
        Ok(())
    }

    /// Like [`render_inlines`](Self::render_inlines) but returns the markup
    /// instead of writing it, without indentation.
    pub fn inline_string(&mut self, spans: &[InlineSpan]) -> Result<String, RenderError> {
        let html = self.capture(|cx| {
            for span in spans {
                cx.render_inline(span)?;
            }
            Ok(())
        })?;
        if html.is_empty() {
            return Ok(EMPTY_PLACEHOLDER.to_owned());
        }
        Ok(html)
    }

    fn link_markup(&self, span: &InlineSpan, link: &str) -> String {
        self.renderer
            .link_override
            .as_ref()
            .and_then(|f| f(span))
            .unwrap_or_else(|| default_link_markup(span, link))
    }
}
