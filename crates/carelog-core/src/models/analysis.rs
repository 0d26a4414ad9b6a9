//! Analysis result models.
//!
//! The external model's output is decided once at parse time into a tagged
//! `AnalysisOutcome`: either a structured report or a raw-text fallback.
//! Every structured field is optional; downstream code must treat absent
//! keys as missing data, never as an error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants;

/// Structured analysis of a medical report, as returned by the external
/// generative model. All fields are optional by contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abnormal_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Document date as written by the model; parsed leniently via `parsed_date`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Present only when the upload carried a question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_to_user: Option<String>,
}

impl ReportAnalysis {
    /// Fixed fallback substituted when the analysis stage fails.
    pub fn fallback() -> Self {
        ReportAnalysis {
            title: Some(constants::FALLBACK_TITLE.to_string()),
            record_type: Some(constants::DEFAULT_RECORD_TYPE.to_string()),
            provider: Some(constants::UNKNOWN_PROVIDER.to_string()),
            summary: Some(constants::FALLBACK_SUMMARY.to_string()),
            date: None,
            ..Default::default()
        }
    }

    /// Drop empty and whitespace-only values so absence has a single
    /// representation. The prompt instructs the model to use empty strings
    /// for anything the report does not state; after this pass those read
    /// as `None` everywhere downstream, so fallback defaults apply.
    pub fn without_empty_fields(mut self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.trim().is_empty())
        }

        self.patient_name = non_empty(self.patient_name);
        self.diagnosis = non_empty(self.diagnosis);
        self.risk_level = non_empty(self.risk_level);
        self.summary = non_empty(self.summary);
        self.title = non_empty(self.title);
        self.record_type = non_empty(self.record_type);
        self.provider = non_empty(self.provider);
        self.date = non_empty(self.date);
        self.answer_to_user = non_empty(self.answer_to_user);
        self.abnormal_values.retain(|v| !v.trim().is_empty());
        self
    }

    /// Parse the model-supplied date: RFC 3339 first, then plain `YYYY-MM-DD`
    /// at midnight UTC. Returns None when absent or unparseable.
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|ndt| ndt.and_utc())
    }
}

/// Outcome of the analysis stage, decided once at parse time.
///
/// Serialized untagged: a structured outcome is the analysis object itself,
/// a raw fallback is `{"raw": "<unparsed model output>"}`. `RawFallback`
/// must stay first so the distinguished `raw` key wins on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    RawFallback { raw: String },
    Structured(ReportAnalysis),
}

impl AnalysisOutcome {
    pub fn structured(&self) -> Option<&ReportAnalysis> {
        match self {
            AnalysisOutcome::Structured(analysis) => Some(analysis),
            AnalysisOutcome::RawFallback { .. } => None,
        }
    }

    /// User-facing result string, in priority order: the direct answer to
    /// the user's question, else the general summary, else None.
    pub fn user_result(&self) -> Option<&str> {
        match self {
            AnalysisOutcome::Structured(analysis) => analysis
                .answer_to_user
                .as_deref()
                .or(analysis.summary.as_deref()),
            AnalysisOutcome::RawFallback { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_analysis_constants() {
        let fallback = ReportAnalysis::fallback();
        assert_eq!(fallback.title.as_deref(), Some("Uploaded Document"));
        assert_eq!(fallback.record_type.as_deref(), Some("Other"));
        assert_eq!(fallback.provider.as_deref(), Some("Unknown"));
        assert!(fallback.date.is_none());
        assert!(fallback.summary.is_some());
        assert!(fallback.answer_to_user.is_none());
    }

    #[test]
    fn test_without_empty_fields_drops_blank_values() {
        let analysis = ReportAnalysis {
            patient_name: Some(String::new()),
            title: Some("  ".to_string()),
            provider: Some("".to_string()),
            record_type: Some("".to_string()),
            summary: Some("Glucose is elevated.".to_string()),
            answer_to_user: Some("".to_string()),
            abnormal_values: vec!["".to_string(), "glucose".to_string()],
            ..Default::default()
        }
        .without_empty_fields();

        assert!(analysis.patient_name.is_none());
        assert!(analysis.title.is_none());
        assert!(analysis.provider.is_none());
        assert!(analysis.record_type.is_none());
        assert!(analysis.answer_to_user.is_none());
        assert_eq!(analysis.summary.as_deref(), Some("Glucose is elevated."));
        assert_eq!(analysis.abnormal_values, vec!["glucose"]);
    }

    #[test]
    fn test_user_result_after_dropping_blank_answer() {
        let outcome = AnalysisOutcome::Structured(
            ReportAnalysis {
                summary: Some("Glucose is elevated.".to_string()),
                answer_to_user: Some("".to_string()),
                ..Default::default()
            }
            .without_empty_fields(),
        );
        assert_eq!(outcome.user_result(), Some("Glucose is elevated."));
    }

    #[test]
    fn test_parsed_date_rfc3339() {
        let analysis = ReportAnalysis {
            date: Some("2024-03-01T10:30:00Z".to_string()),
            ..Default::default()
        };
        let parsed = analysis.parsed_date().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T10:30:00+00:00");
    }

    #[test]
    fn test_parsed_date_plain() {
        let analysis = ReportAnalysis {
            date: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        let parsed = analysis.parsed_date().unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2024-03-01 00:00");
    }

    #[test]
    fn test_parsed_date_garbage_is_none() {
        let analysis = ReportAnalysis {
            date: Some("early March, probably".to_string()),
            ..Default::default()
        };
        assert!(analysis.parsed_date().is_none());

        let empty = ReportAnalysis {
            date: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(empty.parsed_date().is_none());
    }

    #[test]
    fn test_outcome_untagged_roundtrip() {
        let structured = AnalysisOutcome::Structured(ReportAnalysis {
            summary: Some("All values normal.".to_string()),
            record_type: Some("Lab Report".to_string()),
            ..Default::default()
        });
        let json = serde_json::to_value(&structured).unwrap();
        assert_eq!(json["type"], "Lab Report");
        let back: AnalysisOutcome = serde_json::from_value(json).unwrap();
        assert_eq!(back, structured);

        let raw = AnalysisOutcome::RawFallback {
            raw: "not json at all".to_string(),
        };
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json["raw"], "not json at all");
        let back: AnalysisOutcome = serde_json::from_value(json).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_user_result_priority() {
        let both = AnalysisOutcome::Structured(ReportAnalysis {
            summary: Some("general summary".to_string()),
            answer_to_user: Some("your sugar level is normal".to_string()),
            ..Default::default()
        });
        assert_eq!(both.user_result(), Some("your sugar level is normal"));

        let summary_only = AnalysisOutcome::Structured(ReportAnalysis {
            summary: Some("general summary".to_string()),
            ..Default::default()
        });
        assert_eq!(summary_only.user_result(), Some("general summary"));

        let raw = AnalysisOutcome::RawFallback {
            raw: "???".to_string(),
        };
        assert_eq!(raw.user_result(), None);
    }
}
