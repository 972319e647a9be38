/// Canonicalize a raw name for comparison.
///
/// Missing input yields an empty string. Otherwise the text is lower-cased,
/// every character outside `[a-z0-9 ]` becomes a space, whitespace runs are
/// collapsed and the result is trimmed.
pub fn normalize(raw: Option<&str>) -> String {
    raw.map(normalize_str).unwrap_or_default()
}

pub fn normalize_str(raw: &str) -> String {
    raw.to_lowercase()
        .replace(
            |c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '),
            " ",
        )
        .split(' ')
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Coarse grouping key: the first token of a normalized name.
pub fn block_key(normalized: &str) -> String {
    match normalized.split_once(' ') {
        Some((first, _)) => first.to_string(),
        None => normalized.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_normalization() {
        assert_eq!(normalize_str("Global Traders Inc"), "global traders inc");
        assert_eq!(normalize_str("Global-Traders"), "global traders");
        assert_eq!(normalize_str(" ACME  LTD. "), "acme ltd");
        assert_eq!(normalize_str("Beta\tCo\n"), "beta co");
    }

    #[test]
    fn test_non_ascii_becomes_space() {
        assert_eq!(normalize_str("Société Générale"), "soci t g n rale");
        assert_eq!(normalize_str("AT&T"), "at t");
        assert_eq!(normalize_str("***"), "");
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
        assert_eq!(normalize(Some("   ")), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Global Traders Inc",
            "  O'Brien & Sons, LLC  ",
            "Müller GmbH",
            "123 Industries",
            "",
            "\u{212A}elvin Corp",
        ];
        for sample in samples {
            let once = normalize_str(sample);
            assert_eq!(normalize_str(&once), once, "input: {:?}", sample);
        }
    }

    #[test]
    fn test_block_key() {
        assert_eq!(block_key("global traders inc"), "global");
        assert_eq!(block_key("acme"), "acme");
        assert_eq!(block_key(""), "");
    }
}
