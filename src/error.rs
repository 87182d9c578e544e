//! Typed failures raised while reading exam exports.
//!
//! Every variant is fatal for the run; callers attach the offending file
//! through `anyhow::Context`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("question block #{index} has no `qno` label")]
    MissingQuestionNumber { index: usize },

    #[error("question label {label:?} does not end in a question number")]
    InvalidQuestionNumber { label: String },

    #[error("question {question}: no timing row containing {marker:?}")]
    MissingMarkerRow { question: usize, marker: String },

    #[error("question {question}: timing row {marker:?} has no timestamp cell")]
    MissingTimestampCell { question: usize, marker: String },

    #[error("timestamp {value:?} does not match format {format:?}: {source}")]
    InvalidTimestamp {
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid CSS selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}
