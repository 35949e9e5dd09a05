//! Block dispatch and the default routine for each block kind.
//!
//! Every routine is called twice per block, once on entry before the
//! children are rendered and once on exit after them. The returned flag
//! only matters for overrides; defaults always report the event handled.

use blockpress_model::{Block, BlockKind, VideoFormat, to_no_dash_id};

use crate::context::Render;
use crate::error::{Failure, RenderError};
use crate::list::ListKind;
use crate::util::{base_name, escape_html};

/// Default routine for one block kind.
pub(crate) type BlockRenderFn<'r, 'd> =
    fn(&mut Render<'r, 'd>, &Block, bool) -> Result<bool, RenderError>;

/// Whether the children of `block` get an indentation wrapper.
pub(crate) fn needs_wrapper(block: &Block) -> bool {
    block.kind == BlockKind::Text && block.has_children()
}

/// How a page block relates to the block rendering it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PageKind {
    TopLevel,
    SubPage,
    Link,
}

impl<'r, 'd> Render<'r, 'd> {
    /// Default routine for `kind`; `None` for unknown kinds.
    pub(crate) fn resolve(kind: &BlockKind) -> Option<BlockRenderFn<'r, 'd>> {
        let routine: BlockRenderFn<'r, 'd> = match kind {
            BlockKind::Page => Self::render_page,
            BlockKind::Text => Self::render_text,
            BlockKind::NumberedList => Self::render_numbered_list,
            BlockKind::BulletedList => Self::render_bulleted_list,
            BlockKind::Header => Self::render_header,
            BlockKind::SubHeader => Self::render_sub_header,
            BlockKind::SubSubHeader => Self::render_sub_sub_header,
            BlockKind::Todo => Self::render_todo,
            BlockKind::Toggle => Self::render_toggle,
            BlockKind::Quote => Self::render_quote,
            BlockKind::Divider => Self::render_divider,
            BlockKind::Code => Self::render_code,
            BlockKind::Bookmark => Self::render_bookmark,
            BlockKind::Image => Self::render_image,
            BlockKind::ColumnList => Self::render_column_list,
            BlockKind::Column => Self::render_column,
            BlockKind::CollectionView => Self::render_collection_view,
            BlockKind::Embed => Self::render_embed,
            BlockKind::Gist => Self::render_gist,
            BlockKind::Tweet => Self::render_tweet,
            BlockKind::Video => Self::render_video,
            BlockKind::File => Self::render_file,
            BlockKind::Pdf => Self::render_pdf,
            BlockKind::Unknown(_) => return None,
        };
        Some(routine)
    }

    fn page_kind(&self, block: &Block) -> PageKind {
        match self.parent() {
            None => PageKind::TopLevel,
            Some(parent) if block.parent_id.as_deref() == Some(parent.id.as_str()) => {
                PageKind::SubPage
            }
            Some(_) => PageKind::Link,
        }
    }

    fn render_page(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        let kind = self.page_kind(block);
        if kind == PageKind::TopLevel {
            let content = format!(
                r#"<div class="notion-page-content">{}</div>"#,
                escape_html(&block.title)
            );
            self.write_element(block, "div", &[("class", "notion-page")], &content, entering)?;
            return Ok(true);
        }
        if !entering {
            return Ok(true);
        }

        let class = if kind == PageKind::SubPage {
            "notion-sub-page"
        } else {
            "notion-page-link"
        };
        let href = format!("{}{}", self.renderer.page_link_base, to_no_dash_id(&block.id));
        let line = format!(
            r#"<div class="{class}"{}><a href="{}">{}</a></div>"#,
            self.id_attr(block),
            escape_html(&href),
            escape_html(&block.title)
        );
        self.out.write_indent();
        self.out.write_str(&line);
        self.out.newline();
        Ok(true)
    }

    fn render_text(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        self.write_element(block, "div", &[("class", "notion-text")], "", entering)?;
        Ok(true)
    }

    fn render_numbered_list(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        self.render_list_item(block, ListKind::Numbered, entering)
    }

    fn render_bulleted_list(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        self.render_list_item(block, ListKind::Bulleted, entering)
    }

    fn render_header_level(
        &mut self,
        block: &Block,
        level: u8,
        entering: bool,
    ) -> Result<bool, RenderError> {
        let tag = format!("h{level}");
        let class = format!("notion-header-{level}");
        self.write_element(block, &tag, &[("class", class.as_str())], "", entering)?;
        Ok(true)
    }

    fn render_header(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        self.render_header_level(block, 1, entering)
    }

    fn render_sub_header(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        self.render_header_level(block, 2, entering)
    }

    fn render_sub_sub_header(
        &mut self,
        block: &Block,
        entering: bool,
    ) -> Result<bool, RenderError> {
        self.render_header_level(block, 3, entering)
    }

    fn render_todo(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        let class = if block.is_checked {
            "notion-todo-checked"
        } else {
            "notion-todo"
        };
        self.write_element(block, "div", &[("class", class)], "", entering)?;
        Ok(true)
    }

    /// The toggle's own line comes first; its children go in a wrapper
    /// that can be collapsed.
    fn render_toggle(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        if entering {
            self.write_element(block, "div", &[("class", "notion-toggle")], "", true)?;
            self.out.write_indent();
            self.out.write_str(r#"<div class="notion-toggle-wrapper">"#);
            self.out.newline();
        } else {
            self.out.write_indent();
            self.out.write_str("</div>");
            self.out.newline();
            self.write_element(block, "div", &[], "", false)?;
        }
        Ok(true)
    }

    fn render_quote(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        self.write_element(block, "blockquote", &[("class", "notion-quote")], "", entering)?;
        Ok(true)
    }

    fn render_divider(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        if entering {
            let line = format!(r#"<hr class="notion-divider"{}>"#, self.id_attr(block));
            self.out.write_indent();
            self.out.write_str(&line);
            self.out.newline();
        }
        Ok(true)
    }

    /// Code is written verbatim (escaped) right after the opening tag, with
    /// no indentation, so whitespace inside `<pre>` is preserved.
    fn render_code(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        if !entering {
            self.out.write_str("</code></pre>");
            self.out.newline();
            return Ok(true);
        }
        let mut class = String::from("notion-code");
        let lang = block.code_language.trim().to_lowercase();
        if !lang.is_empty() {
            class.push_str(" notion-lang-");
            class.push_str(&lang);
        }
        let open = format!(
            r#"<pre class="{}"{}><code>{}"#,
            escape_html(&class),
            self.id_attr(block),
            escape_html(&block.code)
        );
        self.out.write_indent();
        self.out.write_str(&open);
        Ok(true)
    }

    fn render_bookmark(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        let link = escape_html(&block.link);
        let content = format!(r#"<a href="{link}">{link}</a>"#);
        self.write_element(block, "div", &[("class", "notion-bookmark")], &content, entering)?;
        Ok(true)
    }

    fn render_image(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        let attrs = [("class", "notion-image"), ("src", block.image_url.as_str())];
        self.write_element(block, "img", &attrs, "", entering)?;
        Ok(true)
    }

    fn render_column_list(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        if block.content.is_empty() {
            if entering {
                self.soft_failure(Failure::NoColumns {
                    block_id: block.id.clone(),
                })?;
            }
            return Ok(true);
        }
        self.write_element(block, "div", &[("class", "notion-column-list")], "", entering)?;
        Ok(true)
    }

    fn render_column(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        self.write_element(block, "div", &[("class", "notion-column")], "", entering)?;
        Ok(true)
    }

    fn render_embed(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        let url = block
            .format_embed
            .as_ref()
            .map_or("", |f| f.display_source.as_str());
        let content = format!("Oembed: {}", link_with_title(url, &block.title));
        self.write_element(block, "div", &[("class", "notion-embed")], &content, entering)?;
        Ok(true)
    }

    fn render_gist(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        let src = format!("{}.js", block.source);
        let attrs = [("src", src.as_str()), ("class", "notion-embed-gist")];
        self.write_element(block, "script", &attrs, "", entering)?;
        Ok(true)
    }

    fn render_tweet(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        let url = escape_html(&block.source);
        let content = format!(r#"Embedded tweet <a href="{url}">{url}</a>"#);
        self.write_element(block, "div", &[("class", "notion-embed")], &content, entering)?;
        Ok(true)
    }

    fn render_video(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        let fallback = VideoFormat::default();
        let format = block.format_video.as_ref().unwrap_or(&fallback);
        let src = if format.display_source.is_empty() {
            block.source.as_str()
        } else {
            format.display_source.as_str()
        };
        let width = format.block_width.to_string();
        let mut attrs = vec![
            ("class", "notion-video"),
            ("width", width.as_str()),
            ("src", src),
            ("frameborder", "0"),
            ("allow", "encrypted-media"),
            ("allowfullscreen", "true"),
        ];
        let height = video_height(format.block_width, format.block_height, format.block_aspect_ratio)
            .map(|h| h.to_string());
        if let Some(height) = &height {
            attrs.push(("height", height.as_str()));
        }
        self.write_element(block, "iframe", &attrs, "", entering)?;
        Ok(true)
    }

    fn render_file(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        let content = format!(
            "Embedded file: {}",
            link_with_title(&block.source, &block.title)
        );
        self.write_element(block, "div", &[("class", "notion-embed")], &content, entering)?;
        Ok(true)
    }

    fn render_pdf(&mut self, block: &Block, entering: bool) -> Result<bool, RenderError> {
        let content = format!(
            "Embedded PDF: {}",
            link_with_title(&block.source, &block.title)
        );
        self.write_element(block, "div", &[("class", "notion-embed")], &content, entering)?;
        Ok(true)
    }
}

/// `<a>` to `url`, titled `title` or the last segment of the URL.
fn link_with_title(url: &str, title: &str) -> String {
    let title = if title.is_empty() {
        base_name(url)
    } else {
        title
    };
    format!(
        r#"<a href="{}">{}</a>"#,
        escape_html(url),
        escape_html(title)
    )
}

/// Frame height: the explicit height, else derived from the aspect ratio.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn video_height(width: i64, height: i64, aspect_ratio: f64) -> Option<i64> {
    let height = if height == 0 {
        (width as f64 * aspect_ratio) as i64
    } else {
        height
    };
    (height > 0).then_some(height)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use blockpress_model::{EmbedFormat, InlineSpan, Page};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::HtmlRenderer;

    fn render_child(child: Block) -> String {
        let page = Page::new("p", Block::new(BlockKind::Page, "p").with_child(child));
        HtmlRenderer::new().render_to_string(&page).unwrap()
    }

    #[test]
    fn test_resolve_covers_known_kinds() {
        for tag in [
            "page", "text", "numbered_list", "bulleted_list", "header", "sub_header",
            "sub_sub_header", "to_do", "toggle", "quote", "divider", "code", "bookmark", "image",
            "column_list", "column", "collection_view", "embed", "gist", "tweet", "video", "file",
            "pdf",
        ] {
            assert!(Render::resolve(&BlockKind::from_tag(tag)).is_some(), "{tag}");
        }
        assert!(Render::resolve(&BlockKind::Unknown("callout".to_owned())).is_none());
    }

    #[test]
    fn test_needs_wrapper_only_for_text_with_children() {
        let text = Block::new(BlockKind::Text, "t");
        assert!(!needs_wrapper(&text));
        assert!(needs_wrapper(&text.clone().with_child(Block::new(BlockKind::Text, "c"))));
        let toggle = Block::new(BlockKind::Toggle, "g").with_child(Block::new(BlockKind::Text, "c"));
        assert!(!needs_wrapper(&toggle));
    }

    #[test]
    fn test_video_height() {
        assert_eq!(video_height(640, 360, 0.0), Some(360));
        assert_eq!(video_height(640, 0, 0.5625), Some(360));
        assert_eq!(video_height(640, 0, 0.0), None);
        assert_eq!(video_height(0, -5, 1.0), None);
    }

    #[test]
    fn test_link_with_title_falls_back_to_basename() {
        assert_eq!(
            link_with_title("https://x.com/a/b.pdf", ""),
            r#"<a href="https://x.com/a/b.pdf">b.pdf</a>"#
        );
        assert_eq!(
            link_with_title("https://x.com/a/b.pdf", "Report <1>"),
            r#"<a href="https://x.com/a/b.pdf">Report &lt;1&gt;</a>"#
        );
    }

    #[test]
    fn test_headers() {
        for (kind, n) in [
            (BlockKind::Header, 1),
            (BlockKind::SubHeader, 2),
            (BlockKind::SubSubHeader, 3),
        ] {
            let html = render_child(Block::new(kind, "h").with_spans(vec![InlineSpan::text("T")]));
            assert!(html.contains(&format!(r#"<h{n} class="notion-header-{n}">"#)));
            assert!(html.contains(&format!("</h{n}>")));
        }
    }

    #[test]
    fn test_todo_checked_class() {
        let mut todo = Block::new(BlockKind::Todo, "t");
        assert!(render_child(todo.clone()).contains(r#"<div class="notion-todo">"#));
        todo.is_checked = true;
        assert!(render_child(todo).contains(r#"<div class="notion-todo-checked">"#));
    }

    #[test]
    fn test_toggle_wraps_children() {
        let toggle = Block::new(BlockKind::Toggle, "g")
            .with_spans(vec![InlineSpan::text("More")])
            .with_child(Block::new(BlockKind::Text, "c").with_spans(vec![InlineSpan::text("hidden")]));
        let html = render_child(toggle);

        let wrapper = html.find(r#"<div class="notion-toggle-wrapper">"#).unwrap();
        let child = html.find("hidden").unwrap();
        let toggle_open = html.find(r#"<div class="notion-toggle">"#).unwrap();
        assert!(toggle_open < wrapper);
        assert!(wrapper < child);
        assert_eq!(html.matches("<div").count(), html.matches("</div>").count());
    }

    #[test]
    fn test_quote_uses_blockquote() {
        let html = render_child(Block::new(BlockKind::Quote, "q"));
        assert!(html.contains(r#"<blockquote class="notion-quote">"#));
        assert!(html.contains("</blockquote>"));
    }

    #[test]
    fn test_divider() {
        let html = render_child(Block::new(BlockKind::Divider, "d"));
        assert!(html.contains("  <hr class=\"notion-divider\">\n"));
        assert!(!html.contains("</hr>"));
    }

    #[test]
    fn test_code_block() {
        let mut code = Block::new(BlockKind::Code, "c");
        code.code = "if a < b {\n    go();\n}".to_owned();
        code.code_language = "  Rust ".to_owned();
        let html = render_child(code);
        assert!(html.contains(
            "<pre class=\"notion-code notion-lang-rust\"><code>if a &lt; b {\n    go();\n}</code></pre>\n"
        ));
    }

    #[test]
    fn test_code_block_without_language() {
        let mut code = Block::new(BlockKind::Code, "c");
        code.code = "x".to_owned();
        let html = render_child(code);
        assert!(html.contains(r#"<pre class="notion-code"><code>x</code></pre>"#));
    }

    #[test]
    fn test_bookmark() {
        let mut bookmark = Block::new(BlockKind::Bookmark, "b");
        bookmark.link = "https://example.com/?a&b".to_owned();
        let html = render_child(bookmark);
        assert!(html.contains(
            r#"<a href="https://example.com/?a&amp;b">https://example.com/?a&amp;b</a>"#
        ));
        assert!(html.contains(r#"<div class="notion-bookmark">"#));
    }

    #[test]
    fn test_image_is_self_closing() {
        let mut image = Block::new(BlockKind::Image, "i");
        image.image_url = "https://img/x.png".to_owned();
        let html = render_child(image);
        assert!(html.contains(r#"<img class="notion-image" src="https://img/x.png">"#));
        assert!(!html.contains("</img>"));
    }

    #[test]
    fn test_video_attributes() {
        let mut video = Block::new(BlockKind::Video, "v");
        video.source = "https://youtu.be/raw".to_owned();
        video.format_video = Some(VideoFormat {
            block_width: 640,
            block_height: 0,
            block_aspect_ratio: 0.5,
            display_source: "https://youtube.com/embed/x".to_owned(),
        });
        let html = render_child(video);
        assert!(html.contains(concat!(
            r#"<iframe class="notion-video" width="640" src="https://youtube.com/embed/x" "#,
            r#"frameborder="0" allow="encrypted-media" allowfullscreen="true" height="320">"#
        )));
    }

    #[test]
    fn test_video_falls_back_to_source() {
        let mut video = Block::new(BlockKind::Video, "v");
        video.source = "https://youtu.be/raw".to_owned();
        let html = render_child(video);
        assert!(html.contains(r#"src="https://youtu.be/raw""#));
        assert!(!html.contains("height="));
    }

    #[test]
    fn test_embed_title_fallback() {
        let mut embed = Block::new(BlockKind::Embed, "e");
        embed.format_embed = Some(EmbedFormat {
            display_source: "https://maps.example.com/view/place".to_owned(),
        });
        let html = render_child(embed);
        assert!(html.contains(
            r#"Oembed: <a href="https://maps.example.com/view/place">place</a>"#
        ));
    }

    #[test]
    fn test_file_and_pdf() {
        let mut file = Block::new(BlockKind::File, "f");
        file.source = "https://s3/bucket/notes.txt".to_owned();
        assert!(render_child(file).contains(
            r#"Embedded file: <a href="https://s3/bucket/notes.txt">notes.txt</a>"#
        ));

        let mut pdf = Block::new(BlockKind::Pdf, "f");
        pdf.source = "https://s3/bucket/paper.pdf".to_owned();
        pdf.title = "Paper".to_owned();
        assert!(render_child(pdf).contains(
            r#"Embedded PDF: <a href="https://s3/bucket/paper.pdf">Paper</a>"#
        ));
    }

    #[test]
    fn test_gist_and_tweet() {
        let mut gist = Block::new(BlockKind::Gist, "g");
        gist.source = "https://gist.github.com/u/1".to_owned();
        let html = render_child(gist);
        assert!(html.contains(
            r#"<script src="https://gist.github.com/u/1.js" class="notion-embed-gist">"#
        ));
        assert!(html.contains("</script>"));

        let mut tweet = Block::new(BlockKind::Tweet, "t");
        tweet.source = "https://twitter.com/u/status/1".to_owned();
        assert!(render_child(tweet).contains(
            r#"Embedded tweet <a href="https://twitter.com/u/status/1">https://twitter.com/u/status/1</a>"#
        ));
    }

    #[test]
    fn test_column_list() {
        let columns = Block::new(BlockKind::ColumnList, "cl")
            .with_child(Block::new(BlockKind::Column, "c1"))
            .with_child(Block::new(BlockKind::Column, "c2"));
        let html = render_child(columns);
        assert_eq!(html.matches(r#"<div class="notion-column-list">"#).count(), 1);
        assert_eq!(html.matches(r#"<div class="notion-column">"#).count(), 2);
    }

    #[test]
    fn test_column_list_without_columns_renders_nothing() {
        let logged = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&logged);
        let renderer =
            HtmlRenderer::new().with_log_sink(move |msg| sink.borrow_mut().push(msg.to_owned()));
        let page = Page::new(
            "p",
            Block::new(BlockKind::Page, "p").with_child(Block::new(BlockKind::ColumnList, "cl")),
        );

        let html = renderer.render_to_string(&page).unwrap();

        assert!(!html.contains("notion-column-list"));
        assert_eq!(logged.borrow().len(), 1);
        assert!(logged.borrow()[0].contains("cl"));
    }

    #[test]
    fn test_column_list_without_columns_aborts_in_strict_mode() {
        let page = Page::new(
            "p",
            Block::new(BlockKind::Page, "p").with_child(Block::new(BlockKind::ColumnList, "cl")),
        );
        let err = HtmlRenderer::new()
            .with_strict_mode(true)
            .render(&page)
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::Strict(Failure::NoColumns { ref block_id }) if block_id == "cl"
        ));
    }

    #[test]
    fn test_top_level_page() {
        let page = Page::new("p", Block::new(BlockKind::Page, "p").with_title("A & B"));
        let html = HtmlRenderer::new().render_to_string(&page).unwrap();
        assert!(html.starts_with(
            "<div class=\"notion-page\">\n<div class=\"notion-page-content\">A &amp; B</div>\n"
        ));
        assert!(html.ends_with("</div>\n"));
    }

    #[test]
    fn test_sub_page_and_page_link() {
        let sub = Block::new(BlockKind::Page, "aa-bb").with_title("Child");
        let mut linked = Block::new(BlockKind::Page, "cc-dd").with_title("Elsewhere");
        linked.parent_id = Some("other".to_owned());
        let page = Page::new(
            "p",
            Block::new(BlockKind::Page, "p")
                .with_child(sub)
                .with_child(linked),
        );

        let html = HtmlRenderer::new()
            .with_page_link_base("https://wiki.example.com/")
            .render_to_string(&page)
            .unwrap();

        assert!(html.contains(
            r#"<div class="notion-sub-page"><a href="https://wiki.example.com/aabb">Child</a></div>"#
        ));
        assert!(html.contains(
            r#"<div class="notion-page-link"><a href="https://wiki.example.com/ccdd">Elsewhere</a></div>"#
        ));
    }
}
