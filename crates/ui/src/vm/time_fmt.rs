use chrono::NaiveDate;

/// Placeholder shown for a missing date.
pub const EMPTY_DATE: &str = "—";

/// `DD/MM/YYYY` for a calendar date.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Convert a stored `YYYY-MM-DD` string for display.
///
/// Blank input shows the placeholder; anything not shaped like `Y-M-D` is
/// returned unchanged.
#[must_use]
pub fn display_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return EMPTY_DATE.to_owned();
    }
    let parts: Vec<&str> = raw.split('-').collect();
    match parts.as_slice() {
        [year, month, day] if [year, month, day].iter().all(|p| !p.is_empty()) => {
            format!("{day}/{month}/{year}")
        }
        _ => raw.to_owned(),
    }
}
