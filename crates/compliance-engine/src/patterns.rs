//! Phrase matchers and canned replacement phrases

use regex::Regex;

/// Replacement phrases per rule category, keyed by a contained substring.
///
/// Keys are tried in order, so "guarantee" also covers "guaranteed".
const SUGGESTION_TABLE: &[(&str, &[(&str, &str)])] = &[
    (
        "False Promise",
        &[
            ("guarantee", "may help"),
            ("promise", "aim to"),
        ],
    ),
    (
        "False Guarantee",
        &[
            ("guarantee", "may help"),
            ("sure thing", "strong option"),
            ("can't lose", "well-positioned"),
        ],
    ),
    (
        "Urgency Tactic",
        &[
            ("exclusive", "special"),
            ("limited time", "current"),
            ("act now", "learn more"),
            ("hurry", "explore"),
        ],
    ),
    (
        "Superlative Claim",
        &[
            ("best", "leading"),
            ("#1", "top-rated"),
            ("number one", "highly rated"),
            ("top", "excellent"),
        ],
    ),
];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Build a case-insensitive matcher for a list of literal phrases.
///
/// A word boundary is only required on a side of the phrase that begins or
/// ends with a word character, so `#1` and `100%` still match in running text.
pub fn phrase_regex(phrases: &[&str]) -> Regex {
    let alternatives: Vec<String> = phrases
        .iter()
        .map(|phrase| {
            let lead = match phrase.chars().next() {
                Some(c) if is_word_char(c) => r"\b",
                _ => "",
            };
            let trail = match phrase.chars().last() {
                Some(c) if is_word_char(c) => r"\b",
                _ => "",
            };
            format!("{}{}{}", lead, regex::escape(phrase), trail)
        })
        .collect();

    Regex::new(&format!("(?i)(?:{})", alternatives.join("|"))).unwrap()
}

/// Look up a compliant replacement for a matched phrase.
///
/// Returns the matched text unchanged when no better alternative is known.
pub fn suggest_replacement(matched: &str, category: &str) -> String {
    if category.is_empty() {
        return matched.to_string();
    }
    let lower = matched.to_lowercase();

    for (table_category, replacements) in SUGGESTION_TABLE {
        if !(category.contains(table_category) || table_category.contains(category)) {
            continue;
        }
        for (original, replacement) in replacements.iter() {
            if lower.contains(original) {
                return replacement.to_string();
            }
        }
    }

    matched.to_string()
}

/// True when a replacement would actually change the text.
pub fn is_meaningful_replacement(original: &str, replacement: &str) -> bool {
    !replacement.trim().is_empty() && original.to_lowercase() != replacement.to_lowercase()
}
