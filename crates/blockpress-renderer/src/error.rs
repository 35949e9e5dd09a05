//! Render errors.
//!
//! Two channels exist. A [`Failure`] is a problem with the input (an
//! unknown block type, a malformed date, a degenerate table); it is logged
//! and the render degrades, unless strict mode turns it into
//! [`RenderError::Strict`]. An [`Invariant`] is a bug in the renderer or
//! in an override and always aborts.

use blockpress_model::InlineParseError;

/// Input the renderer can skip or degrade around.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error("unsupported block type '{kind}' (block {block_id}) in page {page_id}")]
    UnknownBlockType {
        kind: String,
        block_id: String,
        page_id: String,
    },
    #[error("cannot parse '{input}' as '{pattern}': {source}")]
    MalformedDate {
        input: String,
        pattern: &'static str,
        #[source]
        source: chrono::ParseError,
    },
    #[error("date range starting {start} has no end date")]
    IncompleteDateRange { start: String },
    #[error("date pattern '{pattern}' cannot be formatted")]
    DateFormat { pattern: String },
    #[error("column list {block_id} has no columns")]
    NoColumns { block_id: String },
    #[error("collection view {block_id} has no views")]
    NoCollectionView { block_id: String },
    #[error("collection view {block_id} has no table columns")]
    EmptyTableSchema { block_id: String },
    #[error("cell in column '{column}' of row {row_id}: {source}")]
    InlineParse {
        column: String,
        row_id: String,
        #[source]
        source: InlineParseError,
    },
}

/// Broken renderer bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Invariant {
    #[error("nesting level would become negative")]
    NegativeLevel,
    #[error("buffer popped with no buffer pushed")]
    BufferUnderflow,
    #[error("nesting level is {0} after render, should be 0")]
    UnbalancedLevel(usize),
    #[error("{0} pushed buffer(s) left after render")]
    UnclosedBuffers(usize),
}

/// Error returned by [`HtmlRenderer::render`](crate::HtmlRenderer::render).
///
/// Output produced before the error is discarded.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render aborted in strict mode: {0}")]
    Strict(#[source] Failure),
    #[error("renderer invariant violated: {0}")]
    Invariant(#[from] Invariant),
}
