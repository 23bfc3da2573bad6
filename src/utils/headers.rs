use crate::utils::constants::MONETARY_SUFFIX;
use std::collections::HashSet;
use tracing::warn;

/// Canonical form of a raw EM-DAT header.
///
/// Monetary headers (`"Total Damage ('000 US$)"`) are kept verbatim so the
/// monetary stage can match them by their unit suffix. Everything else keeps
/// only its alphanumeric characters: `"No. Injured"` becomes `NoInjured`.
pub fn canonical_column_name(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('\u{FEFF}').trim();
    if trimmed.ends_with(MONETARY_SUFFIX.trim_start()) {
        return trimmed.to_string();
    }
    trimmed.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Canonicalize a full header row, de-duplicating collisions with a numeric suffix.
pub fn canonicalize_headers<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    dedupe(raw.into_iter().map(canonical_column_name))
}

/// Header row as read, trimmed, with repeated names made unique the same way
/// as [`canonicalize_headers`].
pub fn unique_headers<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    dedupe(
        raw.into_iter()
            .map(|h| h.trim_start_matches('\u{FEFF}').trim().to_string()),
    )
}

fn dedupe(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::new();

    for (index, header) in names.enumerate() {
        let mut name = if header.is_empty() {
            format!("Column{}", index + 1)
        } else {
            header
        };

        if !seen.insert(name.clone()) {
            let mut n = 2;
            let mut candidate = format!("{}{}", name, n);
            while seen.contains(&candidate) {
                n += 1;
                candidate = format!("{}{}", name, n);
            }
            warn!(
                "Header '{}' collides with an earlier column; renamed to '{}'",
                name, candidate
            );
            seen.insert(candidate.clone());
            name = candidate;
        }

        headers.push(name);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_column_name() {
        assert_eq!(canonical_column_name("DisNo."), "DisNo");
        assert_eq!(canonical_column_name("Start Year"), "StartYear");
        assert_eq!(canonical_column_name("No. Injured"), "NoInjured");
        assert_eq!(canonical_column_name("OFDA/BHA Response"), "OFDABHAResponse");
        assert_eq!(canonical_column_name("\u{FEFF}DisNo."), "DisNo");
        assert_eq!(canonical_column_name("StartYear"), "StartYear");
    }

    #[test]
    fn test_monetary_headers_kept_verbatim() {
        assert_eq!(
            canonical_column_name(" Total Damage ('000 US$) "),
            "Total Damage ('000 US$)"
        );
        assert_eq!(
            canonical_column_name("Insured Damage, Adjusted ('000 US$)"),
            "Insured Damage, Adjusted ('000 US$)"
        );
    }

    #[test]
    fn test_collisions_get_suffix() {
        let headers = canonicalize_headers(["Start Year", "StartYear", "", "Start-Year"]);
        assert_eq!(headers, vec!["StartYear", "StartYear2", "Column3", "StartYear3"]);
    }

    #[test]
    fn test_unique_headers_keep_raw_text() {
        let headers = unique_headers(["DisNo.", " Notes", "Notes", "", "Notes"]);
        assert_eq!(headers, vec!["DisNo.", "Notes", "Notes2", "Column4", "Notes3"]);
        assert_eq!(canonicalize_headers(headers.iter().map(String::as_str)), vec![
            "DisNo", "Notes", "Notes2", "Column4", "Notes3"
        ]);
    }
}
