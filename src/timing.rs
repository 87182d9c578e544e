//! Per-question response time computation.
//!
//! Question 1 is measured from the attempt's start row to its save row; every
//! later answered question from the previous save. Questions with no save row
//! are backfilled with zero up to their declared number.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::config::TimingMarkers;
use crate::error::ExtractError;
use crate::parser::{QuestionBlock, TimingRow};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseTime {
    /// Elapsed seconds up to this question's save row.
    Recorded(f64),
    /// No save row for this question number.
    Missing,
}

impl ResponseTime {
    /// Value written to the result table; missing questions count as 0.
    pub fn seconds(&self) -> f64 {
        match self {
            ResponseTime::Recorded(s) => *s,
            ResponseTime::Missing => 0.0,
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, ResponseTime::Recorded(_))
    }
}

pub fn parse_timestamp(value: &str, format: &str) -> Result<NaiveDateTime, ExtractError> {
    NaiveDateTime::parse_from_str(value, format).map_err(|source| ExtractError::InvalidTimestamp {
        value: value.to_string(),
        format: format.to_string(),
        source,
    })
}

/// Signed elapsed seconds from `start` to `end`.
pub fn seconds_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}

/// Computes one entry per question, indexed by question number - 1.
///
/// # Errors
///
/// Fails if a timestamp does not match `markers.timestamp_format`, if the
/// first save row has no start row to measure from, or if a matched row
/// lacks its timestamp cell.
pub fn response_times(
    blocks: &[QuestionBlock],
    markers: &TimingMarkers,
) -> Result<Vec<ResponseTime>, ExtractError> {
    let mut times = Vec::new();
    let mut previous_saved: Option<NaiveDateTime> = None;

    for block in blocks {
        if let Some(table) = &block.timing {
            if let Some(saved_row) = table.find(&markers.saved) {
                let saved = read_timestamp(saved_row, block.number, &markers.saved, markers)?;

                let baseline = match previous_saved {
                    Some(previous) => previous,
                    None => {
                        let started_row = table.find(&markers.started).ok_or_else(|| {
                            ExtractError::MissingMarkerRow {
                                question: block.number,
                                marker: markers.started.clone(),
                            }
                        })?;
                        read_timestamp(started_row, block.number, &markers.started, markers)?
                    }
                };

                let elapsed = seconds_between(baseline, saved);
                if elapsed < 0.0 {
                    warn!(question = block.number, elapsed, "Save timestamp precedes baseline");
                }

                previous_saved = Some(saved);
                times.push(ResponseTime::Recorded(elapsed));
            }
        }

        while times.len() < block.number {
            times.push(ResponseTime::Missing);
        }
    }

    Ok(times)
}

fn read_timestamp(
    row: &TimingRow,
    question: usize,
    marker: &str,
    markers: &TimingMarkers,
) -> Result<NaiveDateTime, ExtractError> {
    let value = row
        .timestamp
        .as_deref()
        .ok_or_else(|| ExtractError::MissingTimestampCell {
            question,
            marker: marker.to_string(),
        })?;

    parse_timestamp(value, &markers.timestamp_format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TimingTable;

    fn row(text: &str, ts: &str) -> TimingRow {
        TimingRow {
            text: text.to_string(),
            timestamp: Some(ts.to_string()),
        }
    }

    fn block(number: usize, rows: Vec<TimingRow>) -> QuestionBlock {
        QuestionBlock {
            number,
            timing: Some(TimingTable { rows }),
        }
    }

    fn seconds(times: &[ResponseTime]) -> Vec<f64> {
        times.iter().map(ResponseTime::seconds).collect()
    }

    #[test]
    fn test_first_question_measured_from_start() {
        let blocks = vec![block(
            1,
            vec![
                row("1 Iniciado/a", "01/01/24, 00:00:00"),
                row("2 Guardada: B", "01/01/24, 00:00:10"),
            ],
        )];

        let times = response_times(&blocks, &TimingMarkers::default()).unwrap();
        assert_eq!(times, vec![ResponseTime::Recorded(10.0)]);
    }

    #[test]
    fn test_later_question_measured_from_previous_save() {
        let blocks = vec![
            block(
                1,
                vec![
                    row("Iniciado/a", "01/01/24, 00:00:00"),
                    row("Guardada:", "01/01/24, 00:00:10"),
                ],
            ),
            block(
                2,
                vec![
                    row("Iniciado/a", "01/01/24, 00:00:00"),
                    row("Guardada:", "01/01/24, 00:00:25"),
                ],
            ),
        ];

        let times = response_times(&blocks, &TimingMarkers::default()).unwrap();
        assert_eq!(seconds(&times), vec![10.0, 15.0]);
    }

    #[test]
    fn test_unsaved_question_is_backfilled_with_zero() {
        let blocks = vec![
            block(
                1,
                vec![
                    row("Iniciado/a", "01/01/24, 00:00:00"),
                    row("Guardada:", "01/01/24, 00:00:10"),
                ],
            ),
            block(2, vec![row("Iniciado/a", "01/01/24, 00:00:00")]),
            block(3, vec![row("Guardada:", "01/01/24, 00:01:00")]),
        ];

        let times = response_times(&blocks, &TimingMarkers::default()).unwrap();
        assert_eq!(
            times,
            vec![
                ResponseTime::Recorded(10.0),
                ResponseTime::Missing,
                ResponseTime::Recorded(50.0)
            ]
        );
    }

    #[test]
    fn test_question_without_table_is_backfilled() {
        let blocks = vec![
            QuestionBlock {
                number: 1,
                timing: None,
            },
            block(
                2,
                vec![
                    row("Iniciado/a", "01/01/24, 10:00:00"),
                    row("Guardada:", "01/01/24, 10:02:00"),
                ],
            ),
        ];

        let times = response_times(&blocks, &TimingMarkers::default()).unwrap();
        assert_eq!(times, vec![ResponseTime::Missing, ResponseTime::Recorded(120.0)]);
    }

    #[test]
    fn test_padding_is_appended_after_the_recorded_value() {
        let blocks = vec![block(
            3,
            vec![
                row("Iniciado/a", "01/01/24, 00:00:00"),
                row("Guardada:", "01/01/24, 00:00:05"),
            ],
        )];

        let times = response_times(&blocks, &TimingMarkers::default()).unwrap();
        assert_eq!(seconds(&times), vec![5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_start_row_is_fatal() {
        let blocks = vec![block(1, vec![row("Guardada:", "01/01/24, 00:00:05")])];

        let err = response_times(&blocks, &TimingMarkers::default()).unwrap_err();
        assert!(matches!(err, ExtractError::MissingMarkerRow { question: 1, .. }));
    }

    #[test]
    fn test_malformed_timestamp_is_fatal() {
        let blocks = vec![block(
            1,
            vec![
                row("Iniciado/a", "2024-01-01 00:00:00"),
                row("Guardada:", "01/01/24, 00:00:05"),
            ],
        )];

        let err = response_times(&blocks, &TimingMarkers::default()).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_missing_timestamp_cell_is_fatal() {
        let blocks = vec![block(
            1,
            vec![TimingRow {
                text: "Guardada:".to_string(),
                timestamp: None,
            }],
        )];

        let err = response_times(&blocks, &TimingMarkers::default()).unwrap_err();
        assert!(matches!(err, ExtractError::MissingTimestampCell { .. }));
    }

    #[test]
    fn test_custom_markers_and_format() {
        let markers = TimingMarkers {
            started: "Started".to_string(),
            saved: "Saved".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
        };
        let blocks = vec![block(
            1,
            vec![
                row("Started", "2024-01-31 23:59:50"),
                row("Saved: answer", "2024-02-01 00:00:20"),
            ],
        )];

        let times = response_times(&blocks, &markers).unwrap();
        assert_eq!(seconds(&times), vec![30.0]);
    }

    #[test]
    fn test_no_blocks_no_times() {
        let times = response_times(&[], &TimingMarkers::default()).unwrap();
        assert!(times.is_empty());
    }

    #[test]
    fn test_save_before_baseline_keeps_negative_value() {
        let blocks = vec![
            block(
                1,
                vec![
                    row("Iniciado/a", "01/01/24, 00:00:00"),
                    row("Guardada:", "01/01/24, 00:01:00"),
                ],
            ),
            block(2, vec![row("Guardada:", "01/01/24, 00:00:40")]),
            block(3, vec![row("Guardada:", "01/01/24, 00:00:50")]),
        ];

        let times = response_times(&blocks, &TimingMarkers::default()).unwrap();
        assert_eq!(
            times,
            vec![
                ResponseTime::Recorded(60.0),
                ResponseTime::Recorded(-20.0),
                ResponseTime::Recorded(10.0)
            ]
        );
    }
}
