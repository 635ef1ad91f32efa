//! Derivation of environment, flag, and path names from declared field
//! names and their metadata overrides.

pub(crate) const ENV_SEPARATOR: &str = "_";
pub(crate) const FLAG_SEPARATOR: &str = "-";
pub(crate) const PATH_SEPARATOR: &str = ".";
pub(crate) const FLAG_PREFIX: &str = "--";

/// Joins `name` onto `prefix` with `separator`; either side being empty
/// leaves `name` untouched.
pub(crate) fn add_prefix(name: &str, prefix: &str, separator: &str) -> String {
    if name.is_empty() || prefix.is_empty() {
        return name.to_owned();
    }
    format!("{prefix}{separator}{name}")
}

/// Explicit metadata wins; `"-"` opts the name out entirely; absent or
/// empty metadata falls back to `fallback` (the rendered declared name).
pub(crate) fn tag_or_name(tag: Option<&str>, fallback: &str) -> String {
    match tag {
        Some("-") => String::new(),
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => fallback.to_owned(),
    }
}

/// Splits an identifier into sub-words at case-transition boundaries.
///
/// A lowercase-to-uppercase transition starts a new word at the uppercase
/// letter. A run of two or more uppercase letters followed by a lowercase
/// letter starts a new word at the run's final letter, keeping acronyms
/// whole: `"DBMSKey"` becomes `["DBMS", "Key"]` and `"AnyDBMS"` becomes
/// `["Any", "DBMS"]`. Empty input yields no words.
pub(crate) fn split_case_transitions(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut start = 0;
    for i in 1..chars.len() {
        if !chars[i].is_uppercase() {
            continue;
        }
        if chars[i - 1].is_lowercase() {
            words.push(chars[start..i].iter().collect());
            start = i;
        } else if i + 1 < chars.len() && chars[i + 1].is_lowercase() {
            // End of an uppercase run: the last capital opens the next word.
            words.push(chars[start..i].iter().collect());
            start = i;
        }
    }
    words.push(chars[start..].iter().collect());
    words
}

fn render(s: &str, separator: &str) -> String {
    let mut words = Vec::new();
    for part in s.split('_').filter(|part| !part.is_empty()) {
        words.extend(split_case_transitions(part));
    }
    words.join(separator)
}

/// Renders an identifier in the environment-name convention. Declared Rust
/// field names are usually snake_case already, so this also normalises
/// mixed-case names like `anyDBMSKey`.
pub(crate) fn to_snake_case(s: &str) -> String {
    render(s, ENV_SEPARATOR)
}

/// Renders an identifier in the flag-name convention.
pub(crate) fn to_kebab_case(s: &str) -> String {
    render(s, FLAG_SEPARATOR)
}
