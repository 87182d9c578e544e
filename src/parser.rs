//! HTML parser for exam export documents.
//!
//! A question is a `div.que` carrying a `span.qno` label. Its timing table is
//! the first `table.generaltable` that follows the container's opening tag in
//! document order. In exports it sits after the container as a sibling, so
//! the lookup is positional rather than by nesting.

use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractError;

const QUESTION_OR_TABLE: &str = "div.que, table.generaltable";
const QUESTION_LABEL: &str = "span.qno";
const ROW: &str = "tr";
const CELL: &str = "td";

/// One `<tr>` of a timing table.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRow {
    /// Concatenated text of the whole row, used for marker matching.
    pub text: String,
    /// Trimmed text of the second `<td>`, if the row has one.
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingTable {
    pub rows: Vec<TimingRow>,
}

impl TimingTable {
    /// First row whose text contains `marker`.
    pub fn find(&self, marker: &str) -> Option<&TimingRow> {
        self.rows.iter().find(|row| row.text.contains(marker))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBlock {
    /// Declared 1-based question number.
    pub number: usize,
    /// `None` when no timing table follows the question.
    pub timing: Option<TimingTable>,
}

/// Pre-compiled selectors for reading exports.
pub struct QuestionParser {
    anchors: Selector,
    label: Selector,
    row: Selector,
    cell: Selector,
}

impl QuestionParser {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            anchors: selector(QUESTION_OR_TABLE)?,
            label: selector(QUESTION_LABEL)?,
            row: selector(ROW)?,
            cell: selector(CELL)?,
        })
    }

    /// Extracts question blocks in document order.
    ///
    /// # Errors
    ///
    /// Fails when a question container has no `qno` label, or when the label
    /// does not end in an integer.
    pub fn parse(&self, html: &str) -> Result<Vec<QuestionBlock>, ExtractError> {
        let document = Html::parse_document(html);
        let anchors: Vec<ElementRef> = document.select(&self.anchors).collect();

        let mut blocks = Vec::new();

        for (pos, element) in anchors.iter().enumerate() {
            if !is_question(element) {
                continue;
            }

            let label = element
                .select(&self.label)
                .next()
                .ok_or(ExtractError::MissingQuestionNumber {
                    index: blocks.len() + 1,
                })?;
            let number = parse_question_number(&element_text(label))?;

            let timing = anchors[pos + 1..]
                .iter()
                .find(|e| is_timing_table(e))
                .map(|table| self.read_table(*table));

            blocks.push(QuestionBlock { number, timing });
        }

        Ok(blocks)
    }

    fn read_table(&self, table: ElementRef) -> TimingTable {
        let rows = table
            .select(&self.row)
            .map(|row| TimingRow {
                text: row.text().collect(),
                timestamp: row.select(&self.cell).nth(1).map(element_text),
            })
            .collect();

        TimingTable { rows }
    }
}

/// Parses the integer a question label ends with, e.g. `"3"` or `"Pregunta 3"`.
pub fn parse_question_number(label: &str) -> Result<usize, ExtractError> {
    let trimmed = label.trim();
    let digits_start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);

    digits_start
        .and_then(|start| trimmed[start..].parse().ok())
        .ok_or_else(|| ExtractError::InvalidQuestionNumber {
            label: label.to_string(),
        })
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector {
        selector: css.to_string(),
        reason: format!("{e:?}"),
    })
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn has_class(element: &ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

fn is_question(element: &ElementRef) -> bool {
    element.value().name() == "div" && has_class(element, "que")
}

fn is_timing_table(element: &ElementRef) -> bool {
    element.value().name() == "table" && has_class(element, "generaltable")
}
