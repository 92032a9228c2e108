//! Labels for Tomorrow.io `weatherCode` values.

use std::borrow::Cow;

const LABELS: [(i64, &str); 11] = [
    (1000, "Clear"),
    (1001, "Cloudy"),
    (1100, "Mostly Clear"),
    (1101, "Partly Cloudy"),
    (1102, "Mostly Cloudy"),
    (2000, "Fog"),
    (4000, "Drizzle"),
    (4200, "Light Rain"),
    (4201, "Heavy Rain"),
    (5000, "Snow"),
    (8000, "Thunderstorm"),
];

/// Human-readable label for a Tomorrow.io weather code.
///
/// Codes outside the table come back as `"Code <N>"`.
pub fn describe(code: i64) -> Cow<'static, str> {
    LABELS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| Cow::Borrowed(*label))
        .unwrap_or_else(|| Cow::Owned(format!("Code {code}")))
}
