//! Inline spans and the inline-content parser seam.

use bitflags::bitflags;
use serde_json::Value;

use crate::date::Date;

bitflags! {
    /// Text attributes of an [`InlineSpan`].
    ///
    /// ```
    /// use blockpress_model::AttrFlags;
    ///
    /// let attrs = AttrFlags::BOLD | AttrFlags::CODE;
    /// assert!(attrs.contains(AttrFlags::BOLD));
    /// assert!(!attrs.contains(AttrFlags::ITALIC));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(transparent))]
    pub struct AttrFlags: u8 {
        const BOLD = 0b0001;
        const ITALIC = 0b0010;
        const STRIKETHROUGH = 0b0100;
        const CODE = 0b1000;
    }
}

/// A run of text sharing one set of attributes.
///
/// `link`, `user_id` and `date` replace the text when rendered. Any
/// combination may be set; the renderer resolves precedence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct InlineSpan {
    pub text: String,
    pub attrs: AttrFlags,
    pub link: Option<String>,
    pub user_id: Option<String>,
    pub date: Option<Date>,
}

impl InlineSpan {
    /// Plain text span.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Add attributes.
    #[must_use]
    pub fn with_attrs(mut self, attrs: AttrFlags) -> Self {
        self.attrs |= attrs;
        self
    }

    /// Attach a link target.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Attach a user mention.
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Attach a date.
    #[must_use]
    pub fn with_date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }
}

/// Error returned by an [`InlineParser`].
#[derive(Debug, thiserror::Error)]
#[error("cannot parse inline content from {value}: {message}")]
pub struct InlineParseError {
    /// Compact rendering of the offending value.
    pub value: String,
    pub message: String,
}

/// Converts an opaque collection cell value into inline spans.
pub trait InlineParser {
    /// Parse a raw cell value.
    ///
    /// # Errors
    ///
    /// Returns [`InlineParseError`] when the value has a shape the parser
    /// doesn't understand.
    fn parse(&self, value: &Value) -> Result<Vec<InlineSpan>, InlineParseError>;
}

/// Default [`InlineParser`] for scalar cell values.
///
/// Strings become a single plain span, numbers and booleans their textual
/// form, `null` no spans. Arrays and objects are rejected.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainValueParser;

impl InlineParser for PlainValueParser {
    fn parse(&self, value: &Value) -> Result<Vec<InlineSpan>, InlineParseError> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::String(s) => Ok(vec![InlineSpan::text(s.as_str())]),
            Value::Number(n) => Ok(vec![InlineSpan::text(n.to_string())]),
            Value::Bool(b) => Ok(vec![InlineSpan::text(b.to_string())]),
            Value::Array(_) | Value::Object(_) => Err(InlineParseError {
                value: value.to_string(),
                message: "structured values are not supported".to_owned(),
            }),
        }
    }
}
