use serde::{Deserialize, Serialize};

/// One decoded spreadsheet cell.
///
/// Deserializes untagged, so a JSON array-of-arrays from any decoder maps
/// directly: `null` → `Empty`, numbers → `Number`, strings → `Text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// True for `Empty` and for the empty string. Whitespace is not blank here;
    /// callers that need trimming do it themselves.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// True for a `Number` holding NaN or an infinity.
    pub fn is_non_finite(&self) -> bool {
        matches!(self, Cell::Number(n) if !n.is_finite())
    }

    /// String form of the cell. Integral numbers render without a fraction
    /// (`12345.0` → `"12345"`), matching how the value reads in a sheet.
    pub fn to_display_string(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n as f64)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or_default()
    }
}

/// Decoded sheet content: header names plus rows positionally aligned with them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetData {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Position of the first header equal to `name`.
    pub fn header_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}
