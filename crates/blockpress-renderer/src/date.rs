//! Date formatting.
//!
//! Dates arrive as `YYYY-MM-DD` with an optional `HH:MM` time and a display
//! format written in the source's token language (`YYYY`, `MMM`, `MM`,
//! `DD`). Display formats are translated to `chrono` strftime patterns.

use std::fmt::Write;

use blockpress_model::Date;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::context::Render;
use crate::error::{Failure, RenderError};
use crate::util::escape_html;

const DATE_PATTERN: &str = "%Y-%m-%d";
const DATE_TIME_PATTERN: &str = "%Y-%m-%d %H:%M";

/// Used for empty and `relative` display formats.
const DEFAULT_DISPLAY_FORMAT: &str = "MMM DD, YYYY";

/// `time_format` value selecting a 24-hour clock.
const TIME_FORMAT_24H: &str = "H:mm";

/// Parse a date and optional time in canonical notation.
fn parse_date_time(date: &str, time: Option<&str>) -> Result<NaiveDateTime, Failure> {
    match time {
        Some(time) => {
            let input = format!("{date} {time}");
            NaiveDateTime::parse_from_str(&input, DATE_TIME_PATTERN).map_err(|source| {
                Failure::MalformedDate {
                    input,
                    pattern: DATE_TIME_PATTERN,
                    source,
                }
            })
        }
        None => NaiveDate::parse_from_str(date, DATE_PATTERN)
            .map(|day| day.and_time(NaiveTime::MIN))
            .map_err(|source| Failure::MalformedDate {
                input: date.to_owned(),
                pattern: DATE_PATTERN,
                source,
            }),
    }
}

/// Translate a display format into a strftime pattern.
///
/// `MMM` is replaced before `MM` so the named month is not read as a
/// numeric one. With `with_time` a time suffix is appended: 24-hour when
/// `time_format` is `H:mm`, 12-hour with meridiem otherwise. Relative
/// formats are not supported and fall back to `MMM DD, YYYY`.
///
/// # Example
///
/// ```
/// use blockpress_renderer::translate_format;
///
/// assert_eq!(translate_format("YYYY-MM-DD", "", false), "%Y-%m-%d");
/// assert_eq!(translate_format("MMM DD, YYYY", "H:mm", true), "%b %d, %Y %H:%M");
/// ```
#[must_use]
pub fn translate_format(date_format: &str, time_format: &str, with_time: bool) -> String {
    let format = match date_format {
        "" | "relative" => DEFAULT_DISPLAY_FORMAT,
        other => other,
    };
    let mut pattern = format
        .replace('%', "%%")
        .replace("MMM", "%b")
        .replace("MM", "%m")
        .replace("DD", "%d")
        .replace("YYYY", "%Y");
    if with_time {
        if time_format == TIME_FORMAT_24H {
            pattern.push_str(" %H:%M");
        } else {
            pattern.push_str(" %-I:%M %p");
        }
    }
    pattern
}

impl Render<'_, '_> {
    /// Parse a date/time, substituting the zero timestamp on failure.
    pub(crate) fn parse_date_time(
        &self,
        date: &str,
        time: Option<&str>,
    ) -> Result<NaiveDateTime, RenderError> {
        match parse_date_time(date, time) {
            Ok(parsed) => Ok(parsed),
            Err(failure) => {
                self.soft_failure(failure)?;
                Ok(NaiveDateTime::default())
            }
        }
    }

    fn format_date_time(
        &self,
        date: &Date,
        day: &str,
        time: Option<&str>,
    ) -> Result<String, RenderError> {
        let time = time.filter(|t| !t.is_empty());
        let parsed = self.parse_date_time(day, time)?;
        let pattern = translate_format(&date.date_format, &date.time_format, time.is_some());

        let mut formatted = String::new();
        if write!(formatted, "{}", parsed.format(&pattern)).is_err() {
            self.soft_failure(Failure::DateFormat { pattern })?;
            formatted.clear();
        }
        Ok(formatted)
    }

    /// Format a date, or both ends of a range joined by an arrow, as a
    /// `notion-date` span.
    pub fn format_date(&self, date: &Date) -> Result<String, RenderError> {
        let mut text = self.format_date_time(date, &date.start_date, date.start_time.as_deref())?;
        if date.kind.is_range() {
            match date.end_date.as_deref().filter(|d| !d.is_empty()) {
                Some(end) => {
                    let end = self.format_date_time(date, end, date.end_time.as_deref())?;
                    text.push_str(" → ");
                    text.push_str(&end);
                }
                None => self.soft_failure(Failure::IncompleteDateRange {
                    start: date.start_date.clone(),
                })?,
            }
        }
        Ok(format!(
            r#"<span class="notion-date">@{}</span>"#,
            escape_html(&text)
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use blockpress_model::{Block, BlockKind, DateKind, Page};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::HtmlRenderer;

    fn format(renderer: &HtmlRenderer, date: &Date) -> Result<String, RenderError> {
        let page = Page::new("p", Block::new(BlockKind::Page, "p"));
        let cx = Render::new(renderer, &page);
        cx.format_date(date)
    }

    #[test]
    fn test_translate_numeric_tokens() {
        let pattern = translate_format("YYYY-MM-DD", "", false);
        assert_eq!(pattern, "%Y-%m-%d");
        for token in ["YYYY", "MM", "DD"] {
            assert!(!pattern.contains(token));
        }
    }

    #[test]
    fn test_translate_named_month_before_numeric() {
        assert_eq!(translate_format("MMM DD, YYYY", "", false), "%b %d, %Y");
        assert_eq!(translate_format("DD/MM/YYYY", "", false), "%d/%m/%Y");
    }

    #[test]
    fn test_translate_24_hour_time() {
        assert_eq!(
            translate_format("MMM DD, YYYY", "H:mm", true),
            "%b %d, %Y %H:%M"
        );
    }

    #[test]
    fn test_translate_12_hour_time_is_default() {
        assert_eq!(
            translate_format("MMM DD, YYYY", "h:mm A", true),
            "%b %d, %Y %-I:%M %p"
        );
        assert_eq!(
            translate_format("MMM DD, YYYY", "", true),
            "%b %d, %Y %-I:%M %p"
        );
    }

    #[test]
    fn test_translate_relative_and_empty_fall_back() {
        assert_eq!(translate_format("relative", "", false), "%b %d, %Y");
        assert_eq!(translate_format("", "", false), "%b %d, %Y");
    }

    #[test]
    fn test_translate_escapes_percent() {
        assert_eq!(translate_format("YYYY %", "", false), "%Y %%");
    }

    #[test]
    fn test_parse_date_only() {
        let parsed = parse_date_time("2019-04-09", None).unwrap();
        assert_eq!(parsed.to_string(), "2019-04-09 00:00:00");
    }

    #[test]
    fn test_parse_date_and_time() {
        let parsed = parse_date_time("2019-04-09", Some("00:35")).unwrap();
        assert_eq!(parsed.to_string(), "2019-04-09 00:35:00");
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_date_time("2019-13-45", None).unwrap_err();
        assert!(matches!(err, Failure::MalformedDate { .. }));
    }

    #[test]
    fn test_format_default_display() {
        let html = format(&HtmlRenderer::new(), &Date::on("2019-04-09")).unwrap();
        assert_eq!(html, r#"<span class="notion-date">@Apr 09, 2019</span>"#);
    }

    #[test]
    fn test_format_with_12_hour_time() {
        let date = Date {
            kind: DateKind::DateTime,
            start_time: Some("00:35".to_owned()),
            ..Date::on("2019-04-09")
        };
        let html = format(&HtmlRenderer::new(), &date).unwrap();
        assert_eq!(
            html,
            r#"<span class="notion-date">@Apr 09, 2019 12:35 AM</span>"#
        );
    }

    #[test]
    fn test_format_with_24_hour_time() {
        let date = Date {
            kind: DateKind::DateTime,
            start_time: Some("17:05".to_owned()),
            date_format: "YYYY-MM-DD".to_owned(),
            time_format: "H:mm".to_owned(),
            ..Date::on("2019-04-09")
        };
        let html = format(&HtmlRenderer::new(), &date).unwrap();
        assert_eq!(html, r#"<span class="notion-date">@2019-04-09 17:05</span>"#);
    }

    #[test]
    fn test_format_range() {
        let date = Date {
            kind: DateKind::DateRange,
            end_date: Some("2019-03-28".to_owned()),
            date_format: "YYYY-MM-DD".to_owned(),
            ..Date::on("2019-03-26")
        };
        let html = format(&HtmlRenderer::new(), &date).unwrap();
        assert_eq!(
            html,
            r#"<span class="notion-date">@2019-03-26 → 2019-03-28</span>"#
        );
    }

    #[test]
    fn test_end_ignored_when_not_range() {
        let date = Date {
            end_date: Some("2019-03-28".to_owned()),
            date_format: "YYYY-MM-DD".to_owned(),
            ..Date::on("2019-03-26")
        };
        let html = format(&HtmlRenderer::new(), &date).unwrap();
        assert_eq!(html, r#"<span class="notion-date">@2019-03-26</span>"#);
    }

    #[test]
    fn test_range_without_end_degrades() {
        let logged = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&logged);
        let renderer =
            HtmlRenderer::new().with_log_sink(move |msg| sink.borrow_mut().push(msg.to_owned()));
        let date = Date {
            kind: DateKind::DateRange,
            date_format: "YYYY-MM-DD".to_owned(),
            ..Date::on("2019-03-26")
        };

        let html = format(&renderer, &date).unwrap();

        assert_eq!(html, r#"<span class="notion-date">@2019-03-26</span>"#);
        assert_eq!(logged.borrow().len(), 1);
    }

    #[test]
    fn test_malformed_date_uses_zero_timestamp() {
        let logged = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&logged);
        let renderer =
            HtmlRenderer::new().with_log_sink(move |msg| sink.borrow_mut().push(msg.to_owned()));

        let html = format(&renderer, &Date::on("2019-13-45")).unwrap();

        assert_eq!(html, r#"<span class="notion-date">@Jan 01, 1970</span>"#);
        assert_eq!(logged.borrow().len(), 1);
        assert!(logged.borrow()[0].contains("2019-13-45"));
    }

    #[test]
    fn test_malformed_date_aborts_in_strict_mode() {
        let renderer = HtmlRenderer::new().with_strict_mode(true);
        let err = format(&renderer, &Date::on("not-a-date")).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Strict(Failure::MalformedDate { .. })
        ));
    }
}
