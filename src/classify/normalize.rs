// ============================================================================
// Content-key normalization helpers (pure string functions)
// ============================================================================

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// The `N` of a trailing `_option_<N>` (or `_options_<N>`), if any.
pub fn numbered_option(key: &str) -> Option<&str> {
    let (head, digits) = key.rsplit_once('_')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if head.ends_with("_option") || head.ends_with("_options") {
        Some(digits)
    } else {
        None
    }
}

pub fn is_placeholder_key(key: &str) -> bool {
    key.ends_with("_ph")
}

/// Strip the suffixes that describe a row's role rather than its field:
/// `_option_<N>`, `_ph`, then each of `role_suffixes` (in order).
pub fn strip_role_suffixes(key: &str, role_suffixes: &[String]) -> String {
    let mut base = key;

    if let Some(digits) = numbered_option(base) {
        let cut = base.len() - digits.len() - 1;
        base = &base[..cut];
        base = base
            .strip_suffix("_options")
            .or_else(|| base.strip_suffix("_option"))
            .unwrap_or(base);
    }

    base = base
        .strip_suffix("_options_ph")
        .or_else(|| base.strip_suffix("_ph"))
        .unwrap_or(base);

    for suffix in role_suffixes {
        if let Some(stripped) = base.strip_suffix(suffix.as_str()) {
            if let Some(stripped) = stripped.strip_suffix('_') {
                base = stripped;
            }
        }
    }

    base.to_string()
}

/// Last `_`-delimited token of the key, used when nothing better identifies
/// an option.
pub fn last_token(key: &str) -> &str {
    key.rsplit('_').next().unwrap_or(key)
}

/// True when `key` ends with `token` on a `_` or `.` boundary (or is `token`).
pub fn ends_with_token(key: &str, token: &str) -> bool {
    match key.strip_suffix(token) {
        Some("") => true,
        Some(head) => head.ends_with('_') || head.ends_with('.'),
        None => false,
    }
}
