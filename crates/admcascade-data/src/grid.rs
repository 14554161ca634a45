//! In-memory sheet contents and A1 column naming.

/// A fully loaded worksheet, addressed by 0-indexed (row, column)
///
/// Row 0 is the header row. Rows may be ragged; reading past the end of a
/// row or past the last row yields an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetGrid {
    /// Sheet name as it appears in the workbook
    name: String,
    /// Cell values, row-major
    rows: Vec<Vec<String>>,
}

impl SheetGrid {
    /// Create a grid from row-major string data
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Convenience constructor for string slices (mostly for tests)
    pub fn from_str_rows(name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        Self::new(name, rows)
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows, including the header row
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// The header row (row 0), empty if the sheet is empty
    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Read a cell; missing cells read as ""
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Iterate over data rows (everything after the header) with their index
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, r)| (i, r.as_slice()))
    }

    /// Row-major access to the underlying data
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

/// Convert a 0-indexed column number to letters (0 = A, 25 = Z, 26 = AA)
pub fn column_name(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
