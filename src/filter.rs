//! The month and free-text filter applied to every query and aggregation.
//!
//! A filter is built once from the request's query parameters and translated
//! into a SQL `WHERE` clause, so the listing, count and every aggregation for
//! a request all see the same predicate.

use rusqlite::types::Value;
use time::Month;

/// Which calendar months a request selects.
///
/// The month parameter is matched case-insensitively against either the full
/// English month name or the (optionally zero-padded) month number, so "3",
/// "03" and "March" are equivalent. The day and year of a sale play no part
/// in filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthSelection {
    /// No month parameter was given; every record matches.
    Any,
    /// Only records whose sale date falls in this month match.
    Month(Month),
    /// A month parameter was given but named no real month. Nothing matches;
    /// this is an empty result, not an error.
    Unmatched,
}

impl MonthSelection {
    /// Parse an optional `month` query parameter.
    pub fn parse(param: Option<&str>) -> Self {
        let text = match param {
            Some(text) => text.trim(),
            None => return Self::Any,
        };

        if text.is_empty() {
            return Self::Any;
        }

        if text.chars().all(|c| c.is_ascii_digit()) {
            return match text.parse::<u8>().ok().and_then(|n| Month::try_from(n).ok()) {
                Some(month) => Self::Month(month),
                None => Self::Unmatched,
            };
        }

        match text.to_ascii_lowercase().as_str() {
            "january" => Self::Month(Month::January),
            "february" => Self::Month(Month::February),
            "march" => Self::Month(Month::March),
            "april" => Self::Month(Month::April),
            "may" => Self::Month(Month::May),
            "june" => Self::Month(Month::June),
            "july" => Self::Month(Month::July),
            "august" => Self::Month(Month::August),
            "september" => Self::Month(Month::September),
            "october" => Self::Month(Month::October),
            "november" => Self::Month(Month::November),
            "december" => Self::Month(Month::December),
            _ => Self::Unmatched,
        }
    }
}

/// The combination of month and search constraints applied before pagination,
/// counting, or aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    /// The months to include.
    pub month: MonthSelection,
    /// Free-text search over title, description and price.
    pub search: Option<String>,
}

impl TransactionFilter {
    /// Build a filter from the raw `month` and `search` query parameters.
    ///
    /// A missing or empty search string means no search constraint.
    pub fn new(month: Option<&str>, search: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned);

        Self {
            month: MonthSelection::parse(month),
            search,
        }
    }

    /// A filter that matches records in `month` with no search constraint.
    pub fn for_month(month: Option<&str>) -> Self {
        Self::new(month, None)
    }

    /// Render the filter as a SQL `WHERE` clause and its bound parameters.
    ///
    /// Returns an empty string when the filter matches everything. The clause
    /// uses only `?` placeholders, in the same order as the returned values.
    pub fn where_clause(&self) -> (String, Vec<Value>) {
        let mut clause_parts = Vec::new();
        let mut parameters = Vec::new();

        match self.month {
            MonthSelection::Any => {}
            MonthSelection::Month(month) => {
                clause_parts
                    .push("CAST(strftime('%m', date_of_sale) AS INTEGER) = ?".to_string());
                parameters.push(Value::Integer(u8::from(month) as i64));
            }
            // Keep the shape of the query identical for a month that names
            // nothing so callers get an empty result set, not an error.
            MonthSelection::Unmatched => clause_parts.push("0 = 1".to_string()),
        }

        if let Some(search) = &self.search {
            let pattern = format!("%{}%", escape_like(search));
            let price = search.trim().parse::<f64>().unwrap_or(0.0);

            clause_parts.push(
                "(title LIKE ? ESCAPE '\\' OR description LIKE ? ESCAPE '\\' OR price = ?)"
                    .to_string(),
            );
            parameters.push(Value::Text(pattern.clone()));
            parameters.push(Value::Text(pattern));
            parameters.push(Value::Real(price));
        }

        if clause_parts.is_empty() {
            (String::new(), parameters)
        } else {
            (format!("WHERE {}", clause_parts.join(" AND ")), parameters)
        }
    }
}

/// Escape the SQL LIKE wildcards in `text` so it matches as a literal
/// substring.
fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod month_selection_tests {
    use time::Month;

    use super::MonthSelection;

    #[test]
    fn missing_or_blank_month_matches_everything() {
        assert_eq!(MonthSelection::parse(None), MonthSelection::Any);
        assert_eq!(MonthSelection::parse(Some("")), MonthSelection::Any);
        assert_eq!(MonthSelection::parse(Some("   ")), MonthSelection::Any);
    }

    #[test]
    fn name_and_number_forms_are_equivalent() {
        let want = MonthSelection::Month(Month::March);

        assert_eq!(MonthSelection::parse(Some("3")), want);
        assert_eq!(MonthSelection::parse(Some("03")), want);
        assert_eq!(MonthSelection::parse(Some("March")), want);
        assert_eq!(MonthSelection::parse(Some("march")), want);
        assert_eq!(MonthSelection::parse(Some("MARCH")), want);
    }

    #[test]
    fn unknown_month_matches_nothing() {
        assert_eq!(MonthSelection::parse(Some("13")), MonthSelection::Unmatched);
        assert_eq!(MonthSelection::parse(Some("0")), MonthSelection::Unmatched);
        assert_eq!(
            MonthSelection::parse(Some("Smarch")),
            MonthSelection::Unmatched
        );
    }
}
