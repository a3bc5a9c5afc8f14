//! Calculator extension for evaluating math expressions

use crate::extension::{Extension, ResultCollection};

use super::Entry;

/// Evaluate a math expression and return the result
/// Returns None if the expression is invalid or not a math expression
pub fn evaluate(expr: &str) -> Option<f64> {
    let expr = expr.trim();

    if expr.is_empty() {
        return None;
    }

    // Must contain at least one digit
    if !expr.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    match meval::eval_str(expr) {
        Ok(result) if result.is_finite() => Some(result),
        _ => None,
    }
}

/// Format a result for display
/// Removes unnecessary decimal places (e.g., 4.0 -> "4")
pub fn format_result(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e12 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.10}", value);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Answers arithmetic queries with a single entry, synchronously.
#[derive(Debug, Default)]
pub struct CalculatorExtension;

impl Extension<Entry> for CalculatorExtension {
    fn name(&self) -> &str {
        "calculator"
    }

    fn search(&self, query: &str) -> ResultCollection<Entry> {
        let entries = evaluate(query)
            .map(|value| {
                let title = format!("= {}", format_result(value));
                vec![Entry::new(title).with_subtitle(query.trim())]
            })
            .unwrap_or_default();
        ResultCollection::Ready(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_math() {
        assert_eq!(evaluate("2+2"), Some(4.0));
        assert_eq!(evaluate("10 - 3"), Some(7.0));
        assert_eq!(evaluate("5 * 6"), Some(30.0));
        assert_eq!(evaluate("20 / 4"), Some(5.0));
    }

    #[test]
    fn test_complex_expressions() {
        assert_eq!(evaluate("2^10"), Some(1024.0));
        assert_eq!(evaluate("sqrt(16)"), Some(4.0));
        assert_eq!(evaluate("(10 + 5) * 2"), Some(30.0));
    }

    #[test]
    fn test_invalid_expressions() {
        assert_eq!(evaluate("hello"), None);
        assert_eq!(evaluate(""), None);
        assert_eq!(evaluate("abc + def"), None);
        assert_eq!(evaluate("1/0"), None);
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(4.0), "4");
        assert_eq!(format_result(1.23456), "1.23456");
        assert_eq!(format_result(-42.0), "-42");
    }

    #[tokio::test]
    async fn test_extension_yields_ready_entry() {
        let collection = CalculatorExtension.search(" 6 * 7 ");
        assert!(collection.is_ready());
        let entries = collection.resolve().await.unwrap();
        assert_eq!(entries, vec![Entry::new("= 42").with_subtitle("6 * 7")]);
    }

    #[tokio::test]
    async fn test_extension_ignores_non_math() {
        let entries = CalculatorExtension.search("firefox").resolve().await.unwrap();
        assert!(entries.is_empty());
    }
}
