//! First-degree relative urgency detection.

use serde::{Deserialize, Serialize};

use crate::config::KeywordConfig;

/// Keywords that matched a description.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UrgencyMatch {
    /// The first relation keyword found.
    pub relation: Option<String>,
    /// The first urgency keyword found.
    pub urgency: Option<String>,
}

impl UrgencyMatch {
    /// True only if both a relation and an urgent event were mentioned.
    pub fn is_urgent(&self) -> bool {
        self.relation.is_some() && self.urgency.is_some()
    }
}

/// Case-insensitive keyword matcher for close-family emergencies.
///
/// Text and keywords are folded before comparison: Turkish `İ`, `I`, `ı`
/// and `i` all compare equal, so upper-case Turkish input matches.
/// Exclusion words are blanked out of the description before relations
/// are searched.
///
/// # Examples
///
/// ```
/// use leave_adjudicator::config::KeywordConfig;
/// use leave_adjudicator::rules::UrgencyKeywords;
///
/// let keywords = UrgencyKeywords::new(&KeywordConfig {
///     relations: vec!["annem".to_string(), "mother".to_string()],
///     urgencies: vec!["ameliyat".to_string(), "surgery".to_string()],
///     exclusions: vec!["babaanne".to_string()],
/// });
///
/// assert!(keywords.detect("Annem yarın ameliyat olacak").is_urgent());
/// assert!(keywords.detect("ANNEM AMELİYAT OLACAK").is_urgent());
/// assert!(!keywords.detect("Babaannem ameliyat olacak").is_urgent());
/// assert!(!keywords.detect("My mother is visiting").is_urgent());
/// assert!(!keywords.detect("Knee surgery").is_urgent());
/// ```
#[derive(Debug, Clone)]
pub struct UrgencyKeywords {
    relations: Vec<Keyword>,
    urgencies: Vec<Keyword>,
    exclusions: Vec<String>,
}

#[derive(Debug, Clone)]
struct Keyword {
    label: String,
    folded: String,
}

impl UrgencyKeywords {
    /// Builds a matcher from the configured keyword sets.
    pub fn new(config: &KeywordConfig) -> Self {
        let mut exclusions: Vec<String> = normalize(&config.exclusions)
            .into_iter()
            .map(|k| k.folded)
            .collect();
        // Longest first, so a phrase goes before any exclusion it contains.
        exclusions.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));

        Self {
            relations: normalize(&config.relations),
            urgencies: normalize(&config.urgencies),
            exclusions,
        }
    }

    /// Searches `description` for a relation and an urgency keyword.
    pub fn detect(&self, description: &str) -> UrgencyMatch {
        let text = fold_case(description);
        let relation_text = self
            .exclusions
            .iter()
            .fold(text.clone(), |acc, excluded| acc.replace(excluded.as_str(), " "));

        UrgencyMatch {
            relation: first_match(&relation_text, &self.relations),
            urgency: first_match(&text, &self.urgencies),
        }
    }
}

/// Lower-cases `text`, collapsing the four Turkish i forms to `i`.
fn fold_case(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'I' | 'İ' | 'ı' => folded.push('i'),
            '\u{307}' => {}
            _ => folded.extend(c.to_lowercase()),
        }
    }
    folded
}

fn normalize(keywords: &[String]) -> Vec<Keyword> {
    keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| Keyword {
            label: k.to_lowercase(),
            folded: fold_case(k),
        })
        .collect()
}

fn first_match(text: &str, keywords: &[Keyword]) -> Option<String> {
    keywords
        .iter()
        .find(|k| text.contains(k.folded.as_str()))
        .map(|k| k.label.clone())
}
