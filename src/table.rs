//! Question-by-file result table.
//!
//! Rows are 1-based question numbers, columns are input files in processing
//! order. A file with fewer questions than the table has rows leaves those
//! cells absent, which writers render as blanks.

/// One input file's column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    columns: Vec<Column>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column; insertion order is column order.
    pub fn push_column(&mut self, label: impl Into<String>, values: Vec<f64>) {
        self.columns.push(Column {
            label: label.into(),
            values,
        });
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.label.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Longest column, i.e. the highest question number seen.
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(|c| c.values.len()).max().unwrap_or(0)
    }

    /// Cell at 1-based `question` in column `column`; `None` when absent.
    pub fn cell(&self, question: usize, column: usize) -> Option<f64> {
        let index = question.checked_sub(1)?;
        self.columns.get(column)?.values.get(index).copied()
    }

    /// Iterates `(question, cells)` for rows 1..=row_count.
    pub fn rows(&self) -> impl Iterator<Item = (usize, Vec<Option<f64>>)> + '_ {
        (1..=self.row_count()).map(move |question| {
            let cells = (0..self.columns.len())
                .map(|column| self.cell(question, column))
                .collect();
            (question, cells)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = ResultTable::new();
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.rows().count(), 0);
    }

    #[test]
    fn test_uneven_columns_leave_absent_cells() {
        let mut table = ResultTable::new();
        table.push_column("b.html", vec![10.0, 15.0, 0.0]);
        table.push_column("a.html", vec![7.0]);

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_labels().collect::<Vec<_>>(), vec!["b.html", "a.html"]);
        assert_eq!(table.cell(1, 1), Some(7.0));
        assert_eq!(table.cell(2, 1), None);
        assert_eq!(table.cell(3, 0), Some(0.0));

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0], (1, vec![Some(10.0), Some(7.0)]));
        assert_eq!(rows[2], (3, vec![Some(0.0), None]));
    }

    #[test]
    fn test_cell_out_of_range() {
        let mut table = ResultTable::new();
        table.push_column("a.html", vec![1.0]);

        assert_eq!(table.cell(0, 0), None);
        assert_eq!(table.cell(1, 5), None);
    }

    #[test]
    fn test_file_without_questions_still_has_column() {
        let mut table = ResultTable::new();
        table.push_column("blank.html", vec![]);

        assert_eq!(table.column_count(), 1);
        assert_eq!(table.row_count(), 0);
    }
}
