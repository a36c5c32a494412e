//! City and station name normalization.
//!
//! Rate sheets are typed by hand, so the same place shows up as "Moscow",
//! "г. Москва" or " moskva ". Everything that compares names goes through
//! [`normalize`] first.

use std::fmt;

/// Leading abbreviations dropped before comparison, compared case-insensitively.
const CITY_PREFIXES: &[&str] = &["г.", "g.", "city of "];

/// Known alternative spellings, keyed by lowercase form.
const ALIASES: &[(&str, &str)] = &[
    ("moskva", "Moscow"),
    ("москва", "Moscow"),
    ("st. petersburg", "Saint Petersburg"),
    ("st petersburg", "Saint Petersburg"),
    ("sankt-peterburg", "Saint Petersburg"),
    ("санкт-петербург", "Saint Petersburg"),
    ("владивосток", "Vladivostok"),
    ("восточный", "Vostochny"),
    ("novosibirsk-glavny", "Novosibirsk"),
    ("новосибирск", "Novosibirsk"),
    ("екатеринбург", "Yekaterinburg"),
    ("ekaterinburg", "Yekaterinburg"),
];

/// A name in canonical display form together with its comparison key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    display: String,
    key: String,
}

impl NormalizedName {
    /// The canonical form, suitable for showing to users.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The case-folded form used for equality.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The part before any parenthesized qualifier, as a comparison key.
    ///
    /// `"Vladivostok (VMTP)"` has base key `"vladivostok"`.
    pub fn base_key(&self) -> &str {
        match self.key.find('(') {
            Some(idx) => self.key[..idx].trim_end(),
            None => &self.key,
        }
    }

    /// The first whitespace-separated token of the comparison key.
    pub fn first_token(&self) -> &str {
        self.key.split_whitespace().next().unwrap_or("")
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Normalize a free-text city or station name.
///
/// Never fails: input that matches no prefix or alias normalizes to itself
/// (trimmed, with internal whitespace collapsed).
///
/// ```
/// use quote_server::matching::normalize;
///
/// let name = normalize("  г. Москва ");
/// assert_eq!(name.display(), "Moscow");
/// assert_eq!(name.key(), "moscow");
///
/// assert_eq!(normalize("Busan").display(), "Busan");
/// ```
pub fn normalize(raw: &str) -> NormalizedName {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut rest = collapsed.as_str();
    while let Some(stripped) = CITY_PREFIXES
        .iter()
        .find_map(|prefix| strip_prefix_ci(rest, prefix))
    {
        rest = stripped.trim_start();
    }
    let rest = rest.to_string();
    let lowered = rest.to_lowercase();

    let display = ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(rest);
    let key = display.to_lowercase();

    NormalizedName { display, key }
}

/// True if two names refer to the same place after normalization.
pub fn same_place(a: &str, b: &str) -> bool {
    normalize(a).key == normalize(b).key
}

/// Case-insensitive substring test on raw text.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Strip `prefix` from the start of `s`, ignoring case.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = s.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    match chars.next() {
        Some((idx, _)) => Some(&s[idx..]),
        None => Some(""),
    }
}
