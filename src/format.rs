//! Formatting helpers for summaries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number formatting passed explicitly to whatever renders text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub thousands_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            thousands_separator: ',',
        }
    }
}

impl NumberFormat {
    /// Group digits in threes, e.g. 1234567 -> "1,234,567"
    pub fn format(&self, value: u64) -> String {
        let digits = value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.thousands_separator);
            }
            out.push(ch);
        }

        out
    }
}

/// Format a ratio as a percentage; non-positive or non-finite values give "0.0%"
pub fn to_percent(ratio: f64, digits: usize) -> String {
    if !ratio.is_finite() || ratio <= 0.0 {
        return "0.0%".to_string();
    }
    format!("{:.*}%", digits, ratio * 100.0)
}

/// "Jan 30", or "--" when missing
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%b %-d").to_string(),
        None => "--".to_string(),
    }
}

/// "Jan 30 - Feb 3", or "--" when either end is missing
pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(_), Some(_)) => format!("{} - {}", format_date(start), format_date(end)),
        _ => "--".to_string(),
    }
}

/// Month name for a `YYYY-MM` label
pub fn month_name(label: &str) -> Option<&'static str> {
    let month: u32 = label.get(5..7)?.parse().ok()?;
    let name = match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => return None,
    };
    Some(name)
}
