//! Record parser: delimited `start,stop,action` rows to [`Event`]s.
//!
//! Parsing never fails as a whole. Rows that cannot become an event at all
//! (too few fields, empty label) are rejected and counted; rows whose time
//! fields do not parse are kept with [`Instant::UNPARSEABLE`] in place of
//! the bad field and counted as degraded.

use chrono::TimeZone;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::event::Event;
use crate::time::parse_instant;
use crate::types::{Instant, Label, ValidationError};

/// UTF-8 byte order mark (`EF BB BF`).
const BOM: &str = "\u{feff}";

/// Fields per row: start, stop, action.
const FIELD_COUNT: usize = 3;

/// How the source text is split into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Single-byte field delimiter.
    pub delimiter: u8,
    /// Whether the first row is a header to skip.
    pub has_header: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }
}

/// Row accounting for one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Data rows seen, excluding the header.
    pub rows_read: usize,
    /// Rows that became events.
    pub accepted: usize,
    /// Accepted rows with at least one unparseable time field.
    pub degraded: usize,
    /// Rows skipped entirely.
    pub rejected: usize,
}

/// Events in row order plus the accounting that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSchedule {
    pub events: Vec<Event>,
    pub report: LoadReport,
}

/// Why a row was skipped.
#[derive(Debug, Error)]
enum RowRejection {
    #[error("expected {expected} fields, found {0}", expected = FIELD_COUNT)]
    TooFewFields(usize),

    #[error(transparent)]
    Label(#[from] ValidationError),
}

/// A parsed row and whether any time field fell back to the sentinel.
struct ParsedRow {
    event: Event,
    degraded: bool,
}

/// Parses the full text of a schedule source.
pub fn parse_records<Tz: TimeZone>(text: &str, options: ParseOptions, tz: &Tz) -> ParsedSchedule {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_header)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut parsed = ParsedSchedule::default();

    for (index, result) in reader.records().enumerate() {
        let row = index + 1;
        parsed.report.rows_read += 1;

        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!(row, error = %err, "rejected unreadable schedule row");
                parsed.report.rejected += 1;
                continue;
            }
        };

        match parse_row(&record, index == 0, tz) {
            Ok(ParsedRow { event, degraded }) => {
                debug!(row, label = %event.label, "parsed schedule row");
                if degraded {
                    parsed.report.degraded += 1;
                }
                parsed.report.accepted += 1;
                parsed.events.push(event);
            }
            Err(reason) => {
                warn!(row, %reason, "rejected schedule row");
                parsed.report.rejected += 1;
            }
        }
    }

    parsed
}

fn parse_row<Tz: TimeZone>(
    record: &StringRecord,
    first_row: bool,
    tz: &Tz,
) -> Result<ParsedRow, RowRejection> {
    if record.len() < FIELD_COUNT {
        return Err(RowRejection::TooFewFields(record.len()));
    }

    let strip_bom = |field: &str| -> String {
        if first_row {
            field.strip_prefix(BOM).unwrap_or(field).to_string()
        } else {
            field.to_string()
        }
    };

    let label = Label::new(strip_bom(&record[2]))?;
    let mut degraded = false;
    let mut time_field = |name: &'static str, field: &str| {
        parse_instant(field, tz).unwrap_or_else(|err| {
            warn!(field = name, error = %err, "unparseable time, using sentinel");
            degraded = true;
            Instant::UNPARSEABLE
        })
    };

    let start = time_field("start", &strip_bom(&record[0]));
    let stop = time_field("stop", &record[1]);

    Ok(ParsedRow {
        event: Event::new(start, stop, label),
        degraded,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::time::format_full;

    fn parse(text: &str) -> ParsedSchedule {
        parse_records(text, ParseOptions::default(), &Utc)
    }

    fn summary(parsed: &ParsedSchedule) -> Vec<(String, String, String)> {
        parsed
            .events
            .iter()
            .map(|e| {
                (
                    format_full(e.start, &Utc),
                    format_full(e.stop, &Utc),
                    e.label.to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn parses_rows_after_header_in_order() {
        let parsed = parse(
            "start,stop,action\n\
             2025/6/8 14:00,2025/6/8 15:00,プレゼン\n\
             2025/6/8 9:00,2025/6/8 10:00,会議\n",
        );

        assert_eq!(
            summary(&parsed),
            vec![
                (
                    "2025/06/08 14:00:00".to_string(),
                    "2025/06/08 15:00:00".to_string(),
                    "プレゼン".to_string()
                ),
                (
                    "2025/06/08 09:00:00".to_string(),
                    "2025/06/08 10:00:00".to_string(),
                    "会議".to_string()
                ),
            ]
        );
        assert_eq!(
            parsed.report,
            LoadReport {
                rows_read: 2,
                accepted: 2,
                degraded: 0,
                rejected: 0
            }
        );
    }

    #[test]
    fn empty_text_yields_empty_schedule() {
        assert_eq!(parse(""), ParsedSchedule::default());
        assert_eq!(parse("start,stop,action\n"), ParsedSchedule::default());
    }

    #[test]
    fn strips_bom_before_header() {
        let parsed = parse("\u{feff}start,stop,action\n2025/6/8 9:00,2025/6/8 10:00,会議\n");
        assert_eq!(parsed.events.len(), 1);
        assert_eq!(parsed.events[0].label.as_str(), "会議");
    }

    #[test]
    fn strips_bom_from_first_data_row_without_header() {
        let options = ParseOptions {
            has_header: false,
            ..ParseOptions::default()
        };
        let parsed = parse_records(
            "\u{feff}2025/6/8 9:00,2025/6/8 10:00,会議\n2025/6/8 11:00,2025/6/8 12:00,昼食\n",
            options,
            &Utc,
        );
        assert_eq!(parsed.report.degraded, 0);
        assert_eq!(
            format_full(parsed.events[0].start, &Utc),
            "2025/06/08 09:00:00"
        );
    }

    #[test]
    fn bom_only_stripped_on_first_data_row() {
        let parsed = parse(
            "start,stop,action\n\
             2025/6/8 9:00,2025/6/8 10:00,\u{feff}first\n\
             2025/6/8 11:00,2025/6/8 12:00,\u{feff}second\n",
        );
        assert_eq!(parsed.events[0].label.as_str(), "first");
        assert_eq!(parsed.events[1].label.as_str(), "\u{feff}second");
    }

    #[test]
    fn label_is_kept_verbatim() {
        let parsed = parse("start,stop,action\n2025/6/8 9:00,2025/6/8 10:00,  spaced out  \n");
        assert_eq!(parsed.events[0].label.as_str(), "  spaced out  ");
    }

    #[test]
    fn quoted_label_may_contain_delimiter() {
        let parsed = parse("start,stop,action\n2025/6/8 9:00,2025/6/8 10:00,\"Review, part 2\"\n");
        assert_eq!(parsed.events[0].label.as_str(), "Review, part 2");
    }

    #[test]
    fn custom_delimiter() {
        let options = ParseOptions {
            delimiter: b';',
            ..ParseOptions::default()
        };
        let parsed = parse_records(
            "start;stop;action\n2025/6/8 9:00;2025/6/8 10:00;a,b\n",
            options,
            &Utc,
        );
        assert_eq!(parsed.events[0].label.as_str(), "a,b");
    }

    #[test]
    fn unparseable_time_degrades_to_sentinel() {
        let parsed = parse(
            "start,stop,action\n\
             soon,2025/6/8 10:00,broken start\n\
             2025/6/8 9:00,later,broken stop\n",
        );

        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.events[0].start, Instant::UNPARSEABLE);
        assert!(!parsed.events[0].stop.is_unparseable());
        assert_eq!(parsed.events[1].stop, Instant::UNPARSEABLE);
        assert_eq!(parsed.report.degraded, 2);
        assert_eq!(parsed.report.accepted, 2);
    }

    #[test]
    fn short_rows_and_empty_labels_are_rejected() {
        let parsed = parse(
            "start,stop,action\n\
             2025/6/8 9:00,2025/6/8 10:00\n\
             2025/6/8 9:00,2025/6/8 10:00,\n\
             2025/6/8 11:00,2025/6/8 12:00,kept\n",
        );

        assert_eq!(parsed.events.len(), 1);
        assert_eq!(parsed.events[0].label.as_str(), "kept");
        assert_eq!(
            parsed.report,
            LoadReport {
                rows_read: 3,
                accepted: 1,
                degraded: 0,
                rejected: 2
            }
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        let parsed = parse("start,stop,action\n2025/6/8 9:00,2025/6/8 10:00,会議,room 3\n");
        assert_eq!(parsed.events[0].label.as_str(), "会議");
    }

    #[test]
    fn crlf_line_endings() {
        let parsed = parse("start,stop,action\r\n2025/6/8 9:00,2025/6/8 10:00,会議\r\n");
        assert_eq!(parsed.events[0].label.as_str(), "会議");
    }
}
