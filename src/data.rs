use std::{borrow::Cow, fmt};

/// A single cell as produced by the row matrix loader or configured as a column default.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    Null,
}

impl CellValue {
    /// Text rendering shared by header indexing and SQL formatting.
    ///
    /// Whole numbers render without a fractional part so spreadsheet cells
    /// holding `42.0` match the `42` a user would type in a mapping.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Number(f) => Cow::Owned(format_number(*f)),
            CellValue::Boolean(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            CellValue::Null => Cow::Borrowed(""),
        }
    }

    /// Trimmed text, or `None` when the cell is blank.
    pub fn trimmed_text(&self) -> Option<Cow<'_, str>> {
        match self.display_text() {
            Cow::Borrowed(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then_some(Cow::Borrowed(trimmed))
            }
            Cow::Owned(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| Cow::Owned(trimmed.to_string()))
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed_text().is_none()
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_drop_fraction() {
        assert_eq!(CellValue::Number(42.0).display_text(), "42");
        assert_eq!(CellValue::Number(-3.0).display_text(), "-3");
        assert_eq!(CellValue::Number(1.5).display_text(), "1.5");
    }

    #[test]
    fn blank_covers_null_and_whitespace() {
        assert!(CellValue::Null.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(CellValue::from("").is_blank());
        assert!(!CellValue::from(" x ").is_blank());
        assert!(!CellValue::Boolean(false).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn trimmed_text_strips_surrounding_whitespace() {
        assert_eq!(
            CellValue::from("  Ann ").trimmed_text().as_deref(),
            Some("Ann")
        );
        assert_eq!(CellValue::Null.trimmed_text(), None);
    }
}
