pub mod anime;
pub mod category;
pub mod watch_list;

/// Builds a `LIKE` pattern matching `text` anywhere, case-folded to match the
/// lowercased key columns.
pub(crate) fn contains_pattern(text: &str) -> String {
    let folded = text.to_lowercase();
    let mut pattern = String::with_capacity(folded.len() + 2);
    pattern.push('%');
    for c in folded.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Steins;Gate"), "%steins;gate%");
        assert_eq!(contains_pattern("100%_Done"), "%100\\%\\_done%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }
}
