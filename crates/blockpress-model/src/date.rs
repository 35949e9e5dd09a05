//! Dates embedded in inline content.

/// What a [`Date`] describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum DateKind {
    #[default]
    Date,
    DateTime,
    DateRange,
    DateTimeRange,
}

impl DateKind {
    /// True for the kinds that carry an end point.
    #[must_use]
    pub fn is_range(self) -> bool {
        matches!(self, Self::DateRange | Self::DateTimeRange)
    }
}

/// A date, date-time, or range in the source's compact notation.
///
/// Dates are `YYYY-MM-DD`, times `HH:MM`. `date_format` uses the `YYYY`,
/// `MM`, `DD`, `MMM` tokens; `time_format` is `H:mm` for a 24-hour clock,
/// anything else selects 12-hour with meridiem.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct Date {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: DateKind,
    pub start_date: String,
    pub start_time: Option<String>,
    /// Only read when [`kind`](Self::kind) is a range.
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub date_format: String,
    pub time_format: String,
}

impl Date {
    /// A plain date with the default display format.
    #[must_use]
    pub fn on(start_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_range() {
        assert!(DateKind::DateRange.is_range());
        assert!(DateKind::DateTimeRange.is_range());
        assert!(!DateKind::Date.is_range());
        assert!(!DateKind::DateTime.is_range());
    }
}
