//! core::naming
//!
//! Display-name rules for command names and descriptions.
//!
//! # Features
//!
//! - Turn command names into human-readable labels
//! - Normalize known domain acronyms in free text
//! - Small text filters shared with page templates

use std::collections::BTreeMap;

/// Acronyms recognized out of the box.
pub const DEFAULT_ACRONYMS: &[&str] = &[
    "AI", "API", "CDN", "CLI", "DNS", "HTTP", "HTTPS", "ID", "IP", "JSON", "RCA", "SLA", "SSL",
    "TLS", "UI", "URL", "WAF", "XC", "YAML",
];

/// Whole-word acronym table.
///
/// Lookup is case-insensitive; the replacement is the canonical spelling
/// the acronym was registered with.
///
/// # Example
///
/// ```
/// use specdocs::core::naming::Naming;
///
/// let naming = Naming::default();
/// assert_eq!(naming.normalize_acronyms("Get api status"), "Get API status");
/// assert_eq!(naming.humanize("ai-hints"), "AI Hints");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    acronyms: BTreeMap<String, String>,
}

impl Default for Naming {
    fn default() -> Self {
        Self::with_acronyms(DEFAULT_ACRONYMS.iter().copied())
    }
}

impl Naming {
    /// Build a table from the given acronyms only.
    pub fn with_acronyms<I, S>(acronyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut naming = Self {
            acronyms: BTreeMap::new(),
        };
        naming.extend(acronyms);
        naming
    }

    /// Add acronyms to the table. Later spellings override earlier ones.
    pub fn extend<I, S>(&mut self, acronyms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for acronym in acronyms {
            let acronym = acronym.as_ref().trim();
            if !acronym.is_empty() {
                self.acronyms
                    .insert(acronym.to_ascii_lowercase(), acronym.to_string());
            }
        }
    }

    /// Replace every whole word that is a known acronym with its canonical form.
    ///
    /// Characters outside alphanumeric runs are copied through unchanged.
    pub fn normalize_acronyms(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut word = String::new();

        for c in text.chars() {
            if c.is_alphanumeric() {
                word.push(c);
            } else {
                self.flush_word(&mut word, &mut out);
                out.push(c);
            }
        }
        self.flush_word(&mut word, &mut out);
        out
    }

    fn flush_word(&self, word: &mut String, out: &mut String) {
        if word.is_empty() {
            return;
        }
        match self.acronyms.get(&word.to_lowercase()) {
            Some(canonical) => out.push_str(canonical),
            None => out.push_str(word),
        }
        word.clear();
    }

    /// Convert a command name into a display label.
    ///
    /// `-` and `_` separate words; each word is capitalized and the result
    /// is acronym-normalized.
    pub fn humanize(&self, name: &str) -> String {
        let words = name
            .split(['-', '_'])
            .filter(|w| !w.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");
        self.normalize_acronyms(&words)
    }
}

/// Uppercase the first character, leave the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalize every whitespace-separated word.
pub fn to_title_case(text: &str) -> String {
    text.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Replace underscores with spaces.
pub fn underscore_to_space(text: &str) -> String {
    text.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_basic() {
        let naming = Naming::default();
        assert_eq!(naming.humanize("components"), "Components");
        assert_eq!(naming.humanize("list"), "List");
        assert_eq!(naming.humanize("exit_codes"), "Exit Codes");
    }

    #[test]
    fn humanize_applies_acronyms() {
        let naming = Naming::default();
        assert_eq!(naming.humanize("api-keys"), "API Keys");
        assert_eq!(naming.humanize("dns-zone"), "DNS Zone");
    }

    #[test]
    fn humanize_handles_empty() {
        assert_eq!(Naming::default().humanize(""), "");
        assert_eq!(Naming::default().humanize("--"), "");
    }

    #[test]
    fn normalize_is_whole_word_only() {
        let naming = Naming::default();
        assert_eq!(naming.normalize_acronyms("identity api"), "identity API");
        assert_eq!(naming.normalize_acronyms("Show the Ip"), "Show the IP");
        assert_eq!(naming.normalize_acronyms("tips"), "tips");
    }

    #[test]
    fn normalize_preserves_punctuation() {
        let naming = Naming::default();
        assert_eq!(
            naming.normalize_acronyms("Check (dns), then url."),
            "Check (DNS), then URL."
        );
    }

    #[test]
    fn extend_adds_custom_acronyms() {
        let mut naming = Naming::default();
        naming.extend(["BGP"]);
        assert_eq!(naming.humanize("bgp-peers"), "BGP Peers");
    }

    #[test]
    fn title_case_and_underscores() {
        assert_eq!(to_title_case("cloud status page"), "Cloud Status Page");
        assert_eq!(underscore_to_space("exit_codes_list"), "exit codes list");
    }
}
