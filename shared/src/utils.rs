//! # Shared Utility Functions
//!
//! Display formatting shared by the client library and the CLI.
//!
//! ## Money
//!
//! - [`format_rupiah`] - Format an amount with `.` thousand separators (`Rp 1.250.000`)
//!
//! ## Calendar
//!
//! - [`month_name`] - Indonesian month name (`Januari`..`Desember`)
//! - [`period_label`] - Billing period label (`Maret 2025`)
//! - [`format_date`] - Long Indonesian date (`10 Maret 2025`)
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_rupiah, period_label};
//!
//! assert_eq!(format_rupiah(1_250_000), "Rp 1.250.000");
//! assert_eq!(period_label(3, 2025), "Maret 2025");
//! ```

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Format a rupiah amount using Indonesian grouping.
///
/// Negative amounts keep their sign in front of the currency symbol.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_rupiah;
///
/// assert_eq!(format_rupiah(0), "Rp 0");
/// assert_eq!(format_rupiah(999), "Rp 999");
/// assert_eq!(format_rupiah(150_000), "Rp 150.000");
/// assert_eq!(format_rupiah(-2_500), "-Rp 2.500");
/// ```
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Indonesian name of a month (1-based). Out-of-range months yield `None`.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTHS.get(month.checked_sub(1)? as usize).copied()
}

/// Label for a billing period, e.g. `Maret 2025`.
///
/// Falls back to `MM/YYYY` when the month is out of range.
pub fn period_label(month: u32, year: i32) -> String {
    match month_name(month) {
        Some(name) => format!("{} {}", name, year),
        None => format!("{:02}/{}", month, year),
    }
}

/// Long Indonesian date, e.g. `10 Maret 2025`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}", date.day(), period_label(date.month(), date.year()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rupiah_grouping() {
        assert_eq!(format_rupiah(1_000), "Rp 1.000");
        assert_eq!(format_rupiah(12_345), "Rp 12.345");
        assert_eq!(format_rupiah(1_234_567_890), "Rp 1.234.567.890");
        assert_eq!(format_rupiah(i64::MIN), "-Rp 9.223.372.036.854.775.808");
    }

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), Some("Januari"));
        assert_eq!(month_name(12), Some("Desember"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_period_label_fallback() {
        assert_eq!(period_label(8, 2024), "Agustus 2024");
        assert_eq!(period_label(13, 2024), "13/2024");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(format_date(date), "10 Maret 2025");
    }
}
