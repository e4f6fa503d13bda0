//! Release-date resolution for the catalog's `aired.from` field.
//!
//! Upstream sends full RFC 3339 timestamps for most entries, but older or
//! incomplete entries carry strings such as `"Apr 2011"` or `"2011"`. The
//! resolver walks a fixed chain and never fails:
//!
//! 1. absent or empty input resolves to `None`;
//! 2. the first ten characters parsed as `YYYY-MM-DD`;
//! 3. the last whitespace-separated token, when it is exactly four digits,
//!    as January 1 of that year;
//! 4. otherwise `None`.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const ISO_DATE_LEN: usize = 10;

#[must_use]
pub fn parse_aired_date(aired_from: Option<&str>) -> Option<NaiveDate> {
    let raw = aired_from?;
    if raw.is_empty() {
        return None;
    }

    parse_iso_prefix(raw).or_else(|| parse_trailing_year(raw))
}

fn parse_iso_prefix(raw: &str) -> Option<NaiveDate> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid regex"));

    let prefix = raw.get(..ISO_DATE_LEN)?;
    if !re.is_match(prefix) {
        return None;
    }
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn parse_trailing_year(raw: &str) -> Option<NaiveDate> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[0-9]{4}$").expect("Invalid regex"));

    let last = raw.split_whitespace().next_back()?;
    if !re.is_match(last) {
        return None;
    }
    let year: i32 = last.parse().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}
