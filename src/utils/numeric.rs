//! Lenient numeric parsing for spreadsheet-exported text.
//!
//! Values arrive as plain decimals, thousands-grouped figures (`1,234,567`,
//! `1 234`, `1'234`), European decimal commas (`1.234,5`) or placeholder
//! tokens such as `N/A`. Parsing never fails: anything that does not resolve
//! to a finite number is `None`.

/// Characters used as thousands separators besides `,` and `.`.
const GROUP_SEPARATORS: [char; 4] = [' ', '\u{00A0}', '\u{202F}', '\''];

/// Parse a number, returning `None` for empty, non-numeric or non-finite input.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let compact: String = trimmed
        .chars()
        .filter(|c| !GROUP_SEPARATORS.contains(c))
        .collect();

    let normalized = normalize_separators(&compact)?;
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a whole number. Integral floats such as `2010.0` are accepted.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let value = parse_number(raw)?;
    if value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Rewrite `,`/`.` usage into a plain `.`-decimal literal.
fn normalize_separators(s: &str) -> Option<String> {
    let commas = s.matches(',').count();
    let dots = s.matches('.').count();

    match (commas, dots) {
        (0, _) if dots <= 1 => Some(s.to_string()),
        // 1.234.567 style grouping
        (0, _) => is_grouped(s, '.').then(|| s.replace('.', "")),
        (_, 0) if is_grouped(s, ',') => Some(s.replace(',', "")),
        (1, 0) => Some(s.replace(',', ".")),
        (_, 0) => None,
        _ => {
            let last_comma = s.rfind(',')?;
            let last_dot = s.rfind('.')?;
            if last_dot > last_comma {
                // 1,234.5
                (dots == 1).then(|| s.replace(',', ""))
            } else {
                // 1.234,5
                (commas == 1).then(|| s.replace('.', "").replace(',', "."))
            }
        }
    }
}

/// True when `s` reads as `d{1,3}(<sep>ddd)+` with an optional decimal tail.
fn is_grouped(s: &str, sep: char) -> bool {
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    let integral = match sep {
        ',' => body.split('.').next().unwrap_or(body),
        _ => body.split(',').next().unwrap_or(body),
    };

    let mut groups = integral.split(sep);
    let head = match groups.next() {
        Some(head) => head,
        None => return false,
    };
    // a leading zero group ("0,123") is a decimal, not a grouping
    let head_ok = (1..=3).contains(&head.len())
        && !head.starts_with('0')
        && head.chars().all(|c| c.is_ascii_digit());
    let mut rest = groups.peekable();
    rest.peek().is_some()
        && head_ok
        && rest.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}
