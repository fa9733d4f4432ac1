//! Tolerant extraction of a [`Decision`] from free reasoning text.
//!
//! The reasoning backend is asked for a fixed line format, but its output is
//! untrusted. Parsing therefore never fails: text with no recognizable
//! structure yields [`DecisionStatus::Undetermined`] with the narrative kept
//! verbatim. A JSON object (optionally inside a fenced code block) is accepted
//! as well, for backends that answer in structured form.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{Decision, DecisionStatus};

const STATUS_LABEL: &str = "Status:";
const ALTERNATIVE_LABEL: &str = "Alternative Suggestion:";

/// Values that mean "no alternative" when they fill the alternative line.
const EMPTY_ALTERNATIVES: &[&str] = &["none", "n/a", "na", "-", "yok"];

#[derive(Debug, Deserialize)]
struct StructuredDecision {
    status: String,
    #[serde(default)]
    justifications: Vec<String>,
    #[serde(default, alias = "alternativeSuggestion", alias = "alternative")]
    alternative_suggestion: Option<String>,
}

/// Parses reasoning narratives into decisions.
///
/// # Example
///
/// ```
/// use leave_adjudicator::adjudication::DecisionParser;
/// use leave_adjudicator::models::DecisionStatus;
/// use chrono::Utc;
///
/// let text = "Status: RejectionRecommended\n\
///             - Overlaps the year-end closing\n\
///             Alternative Suggestion: 06.01.2025-10.01.2025";
/// let decision = DecisionParser::parse(text, Utc::now());
///
/// assert_eq!(decision.status, DecisionStatus::RejectionRecommended);
/// assert_eq!(decision.justifications, vec!["Overlaps the year-end closing"]);
/// assert_eq!(decision.alternative_suggestion.as_deref(), Some("06.01.2025-10.01.2025"));
/// assert_eq!(decision.raw_narrative, text);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionParser;

impl DecisionParser {
    /// Extracts a decision from `text`, stamping it with `timestamp`.
    pub fn parse(text: &str, timestamp: DateTime<Utc>) -> Decision {
        let (status, justifications, alternative_suggestion) = match parse_structured(text) {
            Some(structured) => structured,
            None => parse_lines(text),
        };

        Decision {
            status,
            justifications,
            alternative_suggestion,
            raw_narrative: text.to_string(),
            timestamp,
        }
    }
}

type Extracted = (DecisionStatus, Vec<String>, Option<String>);

fn parse_structured(text: &str) -> Option<Extracted> {
    let body = strip_code_fence(text.trim());
    if !body.starts_with('{') {
        return None;
    }
    let structured: StructuredDecision = serde_json::from_str(body).ok()?;

    let justifications = structured
        .justifications
        .into_iter()
        .map(|j| j.trim().to_string())
        .filter(|j| !j.is_empty())
        .collect();

    Some((
        map_status(&structured.status),
        justifications,
        structured
            .alternative_suggestion
            .as_deref()
            .and_then(normalize_alternative),
    ))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let Some((_, inner)) = rest.split_once('\n') else {
        return text;
    };
    inner.trim_end().trim_end_matches("```").trim()
}

fn parse_lines(text: &str) -> Extracted {
    let mut status = None;
    let mut justifications = Vec::new();
    let mut alternative = None;
    let mut alternative_seen = false;

    for line in text.lines() {
        let line = line.trim();

        if let Some(item) = line.strip_prefix('-') {
            let item = item.trim();
            // `---` rules and bare dashes are layout, not reasons.
            if !item.is_empty() && !item.chars().all(|c| c == '-') {
                justifications.push(item.to_string());
            }
            continue;
        }

        let unmarked = line.trim_start_matches(['*', '#', '_']).trim_start();

        if status.is_none() {
            if let Some(value) = strip_label(unmarked, STATUS_LABEL) {
                status = Some(map_status(value));
                continue;
            }
        }

        if !alternative_seen {
            if let Some(value) = strip_label(unmarked, ALTERNATIVE_LABEL) {
                alternative_seen = true;
                alternative = normalize_alternative(value);
            }
        }
    }

    (
        status.unwrap_or(DecisionStatus::Undetermined),
        justifications,
        alternative,
    )
}

/// Returns the value after `label` if `line` starts with it, ignoring case
/// and markdown emphasis around the value.
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    Some(line[label.len()..].trim().trim_matches(['*', '_']).trim())
}

fn map_status(value: &str) -> DecisionStatus {
    let normalized: String = value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();

    match normalized.as_str() {
        "approvalrecommended" | "approval" | "approve" | "approved" | "onay"
        | "onaylandı" | "onayönerilir" => DecisionStatus::ApprovalRecommended,
        "rejectionrecommended" | "rejection" | "reject" | "rejected" | "ret" | "red"
        | "reddedildi" | "retönerilir" | "redönerilir" => DecisionStatus::RejectionRecommended,
        _ => DecisionStatus::Undetermined,
    }
}

fn normalize_alternative(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty()
        || EMPTY_ALTERNATIVES
            .iter()
            .any(|empty| value.trim_end_matches('.').eq_ignore_ascii_case(empty))
    {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_canonical_format_round_trip() {
        let text = "Status: ApprovalRecommended\n\
                    - Tenure of 8 years grants 20 days\n\
                    - No restricted period overlaps the request\n\
                    - The request bridges 23 April; one extra day is recommended\n\
                    Alternative Suggestion: Consider 17.06.2024-21.06.2024";
        let decision = DecisionParser::parse(text, at());

        assert_eq!(decision.status, DecisionStatus::ApprovalRecommended);
        assert_eq!(
            decision.justifications,
            vec![
                "Tenure of 8 years grants 20 days",
                "No restricted period overlaps the request",
                "The request bridges 23 April; one extra day is recommended",
            ]
        );
        assert_eq!(
            decision.alternative_suggestion.as_deref(),
            Some("Consider 17.06.2024-21.06.2024")
        );
        assert_eq!(decision.raw_narrative, text);
        assert_eq!(decision.timestamp, at());
    }

    #[test]
    fn test_garbage_text_is_undetermined() {
        let text = "I am not sure what to make of this request.";
        let decision = DecisionParser::parse(text, at());

        assert_eq!(decision.status, DecisionStatus::Undetermined);
        assert!(decision.justifications.is_empty());
        assert!(decision.alternative_suggestion.is_none());
        assert_eq!(decision.raw_narrative, text);
    }

    #[test]
    fn test_empty_text_is_undetermined() {
        let decision = DecisionParser::parse("", at());
        assert_eq!(decision.status, DecisionStatus::Undetermined);
        assert_eq!(decision.raw_narrative, "");
    }

    #[test]
    fn test_unknown_status_value_is_undetermined() {
        let decision = DecisionParser::parse("Status: Maybe later\n- Needs review", at());
        assert_eq!(decision.status, DecisionStatus::Undetermined);
        assert_eq!(decision.justifications, vec!["Needs review"]);
    }

    #[test]
    fn test_status_variants_are_recognized() {
        let cases = [
            ("Status: approval recommended", DecisionStatus::ApprovalRecommended),
            ("status: APPROVED.", DecisionStatus::ApprovalRecommended),
            ("**Status:** RejectionRecommended", DecisionStatus::RejectionRecommended),
            ("## Status: Rejection_Recommended", DecisionStatus::RejectionRecommended),
            ("Status: Onay", DecisionStatus::ApprovalRecommended),
            ("Status: Ret", DecisionStatus::RejectionRecommended),
        ];
        for (text, expected) in cases {
            assert_eq!(DecisionParser::parse(text, at()).status, expected, "{}", text);
        }
    }

    #[test]
    fn test_first_status_line_wins() {
        let text = "Status: RejectionRecommended\nStatus: ApprovalRecommended";
        let decision = DecisionParser::parse(text, at());
        assert_eq!(decision.status, DecisionStatus::RejectionRecommended);
    }

    #[test]
    fn test_empty_alternative_is_absent() {
        for line in [
            "Alternative Suggestion:",
            "Alternative Suggestion: None",
            "Alternative Suggestion: N/A",
            "Alternative Suggestion: none.",
        ] {
            let text = format!("Status: ApprovalRecommended\n{}", line);
            let decision = DecisionParser::parse(&text, at());
            assert!(decision.alternative_suggestion.is_none(), "{}", line);
        }
    }

    #[test]
    fn test_horizontal_rules_are_not_justifications() {
        let text = "Status: ApprovalRecommended\n---\n- Eligible\n-\n";
        let decision = DecisionParser::parse(text, at());
        assert_eq!(decision.justifications, vec!["Eligible"]);
    }

    #[test]
    fn test_structured_json_is_accepted() {
        let text = r#"{
            "status": "RejectionRecommended",
            "justifications": ["Summer quota exceeded", "  "],
            "alternativeSuggestion": "Split into two shorter periods"
        }"#;
        let decision = DecisionParser::parse(text, at());

        assert_eq!(decision.status, DecisionStatus::RejectionRecommended);
        assert_eq!(decision.justifications, vec!["Summer quota exceeded"]);
        assert_eq!(
            decision.alternative_suggestion.as_deref(),
            Some("Split into two shorter periods")
        );
        assert_eq!(decision.raw_narrative, text);
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let text = "```json\n{\"status\": \"approve\", \"justifications\": [\"Eligible\"]}\n```";
        let decision = DecisionParser::parse(text, at());
        assert_eq!(decision.status, DecisionStatus::ApprovalRecommended);
        assert_eq!(decision.justifications, vec!["Eligible"]);
        assert!(decision.alternative_suggestion.is_none());
    }

    #[test]
    fn test_malformed_json_falls_back_to_lines() {
        let text = "{ not json\nStatus: ApprovalRecommended\n- Eligible";
        let decision = DecisionParser::parse(text, at());
        assert_eq!(decision.status, DecisionStatus::ApprovalRecommended);
        assert_eq!(decision.justifications, vec!["Eligible"]);
    }

    #[test]
    fn test_non_ascii_prefix_does_not_panic() {
        let decision = DecisionParser::parse("Ş\nİzin durumu: belirsiz", at());
        assert_eq!(decision.status, DecisionStatus::Undetermined);
    }
}
