use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Text form used for date equality and for the merged output.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

static LEADING_SLASH_DATE: OnceLock<Regex> = OnceLock::new();
static ACCEPTED_FORMATS: OnceLock<Vec<AcceptedFormat>> = OnceLock::new();

struct AcceptedFormat {
    shape: Regex,
    pattern: &'static str,
    two_digit_year: bool,
}

// Two-digit years below this land in 20xx, the rest in 19xx.
const CENTURY_PIVOT: i32 = 69;

fn leading_slash_date() -> &'static Regex {
    LEADING_SLASH_DATE.get_or_init(|| {
        Regex::new(r"^([0-9]{1,2}/[0-9]{1,2}/[0-9]{4})").expect("valid leading date pattern")
    })
}

// chrono accepts any number of year digits for %Y, so each format is gated on
// an exact shape first. Order matters: four-digit years are tried before the
// two-digit fallbacks.
fn accepted_formats() -> &'static [AcceptedFormat] {
    ACCEPTED_FORMATS.get_or_init(|| {
        const FORMATS: &[(&str, &str, bool)] = &[
            (r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$", "%m/%d/%Y", false),
            (r"^[0-9]{1,2}-[0-9]{1,2}-[0-9]{4}$", "%m-%d-%Y", false),
            (r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{2}$", "%m/%d/%y", true),
            (r"^[0-9]{1,2}-[0-9]{1,2}-[0-9]{2}$", "%m-%d-%y", true),
        ];

        FORMATS
            .iter()
            .map(|&(shape, pattern, two_digit_year)| AcceptedFormat {
                shape: Regex::new(shape).expect("valid date shape pattern"),
                pattern,
                two_digit_year,
            })
            .collect()
    })
}

/// Extracts a calendar date from a free-form cell such as
/// `"10/19/2023 14:00 - Jennifer"`. Returns `None` for anything that does not
/// parse; this never fails.
pub fn normalize_date(value: Option<&str>) -> Option<NaiveDate> {
    let raw = value?;
    let mut candidate = raw.split_whitespace().next()?;

    if let Some(prefix) = leading_slash_date().captures(raw).and_then(|caps| caps.get(1)) {
        candidate = prefix.as_str();
    }

    accepted_formats()
        .iter()
        .filter(|format| format.shape.is_match(candidate))
        .find_map(|format| {
            let date = NaiveDate::parse_from_str(candidate, format.pattern).ok()?;
            if format.two_digit_year {
                apply_century_pivot(date)
            } else {
                Some(date)
            }
        })
        .filter(|date| date.year() >= 1)
}

// chrono's %y pivots at 70; 69 belongs to the 1900s here.
fn apply_century_pivot(date: NaiveDate) -> Option<NaiveDate> {
    let short_year = date.year().rem_euclid(100);
    let century = if short_year < CENTURY_PIVOT { 2000 } else { 1900 };
    date.with_year(century + short_year)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}
