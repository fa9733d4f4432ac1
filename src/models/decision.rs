//! Adjudication decision models.
//!
//! A [`Decision`] is the structured outcome of one evaluation: the parsed
//! recommendation plus the unabridged narrative the reasoning backend produced.
//! It serializes to the `aiAnalysis` record shape stored on a leave request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The recommendation extracted from the reasoning narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionStatus {
    /// The request should be approved.
    ApprovalRecommended,
    /// The request should be rejected.
    RejectionRecommended,
    /// The narrative did not state a recognizable recommendation.
    Undetermined,
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionStatus::ApprovalRecommended => write!(f, "ApprovalRecommended"),
            DecisionStatus::RejectionRecommended => write!(f, "RejectionRecommended"),
            DecisionStatus::Undetermined => write!(f, "Undetermined"),
        }
    }
}

/// A structured, auditable leave recommendation.
///
/// # Example
///
/// ```
/// use leave_adjudicator::models::{Decision, DecisionStatus};
/// use chrono::Utc;
///
/// let decision = Decision {
///     status: DecisionStatus::ApprovalRecommended,
///     justifications: vec!["Sufficient tenure".to_string()],
///     alternative_suggestion: None,
///     raw_narrative: "Status: ApprovalRecommended\n- Sufficient tenure".to_string(),
///     timestamp: Utc::now(),
/// };
/// let json = serde_json::to_value(&decision).unwrap();
/// assert_eq!(json["status"], "ApprovalRecommended");
/// assert!(json.get("alternativeSuggestion").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// The recommended outcome.
    pub status: DecisionStatus,
    /// Reasons given for the recommendation, in narrative order.
    #[serde(default)]
    pub justifications: Vec<String>,
    /// Alternative dates or arrangement suggested by the reviewer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_suggestion: Option<String>,
    /// The full narrative text, verbatim.
    #[serde(rename = "analysis")]
    pub raw_narrative: String,
    /// When the decision was produced.
    pub timestamp: DateTime<Utc>,
}

impl Decision {
    /// Returns true if a concrete approve/reject recommendation was extracted.
    pub fn is_determined(&self) -> bool {
        self.status != DecisionStatus::Undetermined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_decision() -> Decision {
        Decision {
            status: DecisionStatus::RejectionRecommended,
            justifications: vec![
                "Overlaps the year-end closing".to_string(),
                "Summer quota exceeded".to_string(),
            ],
            alternative_suggestion: Some("Move the leave to 06.01.2025".to_string()),
            raw_narrative: "Status: RejectionRecommended".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_serializes_to_ai_analysis_shape() {
        let json = serde_json::to_value(sample_decision()).unwrap();

        assert_eq!(json["analysis"], "Status: RejectionRecommended");
        assert_eq!(json["status"], "RejectionRecommended");
        assert_eq!(json["justifications"].as_array().unwrap().len(), 2);
        assert_eq!(
            json["alternativeSuggestion"],
            "Move the leave to 06.01.2025"
        );
        assert_eq!(json["timestamp"], "2024-05-20T09:30:00Z");
    }

    #[test]
    fn test_deserializes_without_optional_fields() {
        let json = r#"{
            "analysis": "no structure here",
            "timestamp": "2024-05-20T09:30:00Z",
            "status": "Undetermined"
        }"#;

        let decision: Decision = serde_json::from_str(json).unwrap();
        assert_eq!(decision.status, DecisionStatus::Undetermined);
        assert!(decision.justifications.is_empty());
        assert!(decision.alternative_suggestion.is_none());
        assert!(!decision.is_determined());
    }

    #[test]
    fn test_status_display_matches_wire_format() {
        for status in [
            DecisionStatus::ApprovalRecommended,
            DecisionStatus::RejectionRecommended,
            DecisionStatus::Undetermined,
        ] {
            let wire = serde_json::to_string(&status).unwrap();
            assert_eq!(wire, format!("\"{}\"", status));
        }
    }
}
