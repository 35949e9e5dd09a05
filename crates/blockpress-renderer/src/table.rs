//! Collection views rendered as tables.
//!
//! Only the first view of a collection view block is rendered. Rows and
//! columns keep the order of the source; nothing is sorted or filtered.

use blockpress_model::{Block, CollectionRow, InlineSpan};

use crate::context::Render;
use crate::error::{Failure, RenderError};
use crate::util::escape_html;

impl Render<'_, '_> {
    pub(crate) fn render_collection_view(
        &mut self,
        block: &Block,
        entering: bool,
    ) -> Result<bool, RenderError> {
        if !entering {
            return Ok(true);
        }
        let Some(info) = block.collection_views.first() else {
            self.soft_failure(Failure::NoCollectionView {
                block_id: block.id.clone(),
            })?;
            return Ok(true);
        };
        let columns = &info.view.table_properties;
        if columns.is_empty() {
            self.soft_failure(Failure::EmptyTableSchema {
                block_id: block.id.clone(),
            })?;
            return Ok(true);
        }

        self.out.newline();
        self.out.write_indent();
        let open = format!(
            r#"<table class="notion-collection-view"{}>"#,
            self.id_attr(block)
        );
        self.out.write_str(&open);
        self.out.newline();

        self.write_line(1, "<thead>");
        self.write_line(2, "<tr>");
        for column in columns {
            let name = info.collection.column_name(&column.property);
            self.write_line(3, &format!("<th>{}</th>", escape_html(name)));
        }
        self.write_line(2, "</tr>");
        self.write_line(1, "</thead>");

        self.write_line(1, "<tbody>");
        for row in &info.rows {
            self.write_line(2, "<tr>");
            for column in columns {
                let cell = self.cell_html(row, &column.property)?;
                self.write_line(3, &format!("<td>{cell}</td>"));
            }
            self.write_line(2, "</tr>");
        }
        self.write_line(1, "</tbody>");

        self.write_line(0, "</table>");
        Ok(true)
    }

    fn write_line(&mut self, add: usize, s: &str) {
        self.out.write_indent_plus(add);
        self.out.write_str(s);
        self.out.newline();
    }

    /// Inline markup of one cell; a value that fails to parse renders empty.
    fn cell_html(&mut self, row: &CollectionRow, column: &str) -> Result<String, RenderError> {
        let spans: Vec<InlineSpan> = match row.properties.get(column) {
            None => Vec::new(),
            Some(value) => match self.renderer.inline_parser.parse(value) {
                Ok(spans) => spans,
                Err(source) => {
                    self.soft_failure(Failure::InlineParse {
                        column: column.to_owned(),
                        row_id: row.id.clone(),
                        source,
                    })?;
                    Vec::new()
                }
            },
        };
        self.inline_string(&spans)
    }
}
