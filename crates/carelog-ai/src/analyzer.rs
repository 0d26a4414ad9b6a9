//! Report analyzer: prompt the generative model and parse its response.

use std::sync::Arc;

use carelog_core::models::{AnalysisOutcome, ReportAnalysis};

use crate::client::GenerativeModel;
use crate::error::AiResult;
use crate::prompt::build_prompt;

/// Analyzes extracted report text through an injected generative model.
///
/// The analyzer forwards whatever text it is given verbatim into the prompt
/// (including extraction-failure placeholders) and parses the response
/// defensively: a successful JSON parse becomes `Structured`, anything else
/// becomes `RawFallback` with the unparsed text. Service failures propagate
/// as `AiError`; degrading on them is the orchestrator's decision.
pub struct ReportAnalyzer {
    model: Arc<dyn GenerativeModel>,
}

impl ReportAnalyzer {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub async fn analyze(
        &self,
        report_text: &str,
        question: Option<&str>,
    ) -> AiResult<AnalysisOutcome> {
        let prompt = build_prompt(report_text, question);
        let response = self.model.generate(&prompt).await?;

        let outcome = parse_model_output(&response);
        match &outcome {
            AnalysisOutcome::Structured(_) => {
                tracing::debug!(model = self.model.model_name(), "Analysis parsed as JSON");
            }
            AnalysisOutcome::RawFallback { raw } => {
                tracing::warn!(
                    model = self.model.model_name(),
                    response_len = raw.len(),
                    "Analysis response was not valid JSON, keeping raw text"
                );
            }
        }

        Ok(outcome)
    }
}

/// Decide the outcome shape once, here. Models frequently wrap JSON in
/// Markdown code fences, so those are stripped before parsing. The prompt
/// asks for empty strings on unknown fields; those are dropped to `None`
/// here so fallback defaults apply downstream.
pub fn parse_model_output(raw: &str) -> AnalysisOutcome {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<ReportAnalysis>(cleaned) {
        Ok(analysis) => AnalysisOutcome::Structured(analysis.without_empty_fields()),
        Err(_) => AnalysisOutcome::RawFallback {
            raw: raw.trim().to_string(),
        },
    }
}

/// Strip a surrounding ```/```json fence, if present.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the fence's language tag line ("json", "JSON", or empty)
    let rest = match rest.split_once('\n') {
        Some((_tag, body)) => body,
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AiError;
    use async_trait::async_trait;

    struct CannedModel {
        response: Result<String, String>,
    }

    #[async_trait]
    impl GenerativeModel for CannedModel {
        async fn generate(&self, _prompt: &str) -> AiResult<String> {
            self.response
                .clone()
                .map_err(|e| AiError::Request(e))
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    fn analyzer_with(response: Result<String, String>) -> ReportAnalyzer {
        ReportAnalyzer::new(Arc::new(CannedModel { response }))
    }

    #[tokio::test]
    async fn test_analyze_parses_structured_response() {
        let analyzer = analyzer_with(Ok(
            r#"{"summary":"Glucose is elevated.","risk_level":"moderate","abnormal_values":["glucose"]}"#
                .to_string(),
        ));
        let outcome = analyzer.analyze("Glucose: 210", None).await.unwrap();
        let analysis = outcome.structured().expect("structured outcome");
        assert_eq!(analysis.summary.as_deref(), Some("Glucose is elevated."));
        assert_eq!(analysis.abnormal_values, vec!["glucose"]);
        assert!(analysis.patient_name.is_none());
    }

    #[tokio::test]
    async fn test_analyze_degrades_to_raw_fallback() {
        let analyzer =
            analyzer_with(Ok("I could not produce JSON for this report.".to_string()));
        let outcome = analyzer.analyze("text", None).await.unwrap();
        match outcome {
            AnalysisOutcome::RawFallback { raw } => {
                assert_eq!(raw, "I could not produce JSON for this report.")
            }
            other => panic!("Expected RawFallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_analyze_propagates_service_failure() {
        let analyzer = analyzer_with(Err("connection refused".to_string()));
        let err = analyzer.analyze("text", None).await.unwrap_err();
        assert!(matches!(err, AiError::Request(_)));
    }

    #[test]
    fn test_parse_strips_json_code_fence() {
        let fenced = "```json\n{\"summary\":\"ok\"}\n```";
        let outcome = parse_model_output(fenced);
        assert_eq!(
            outcome.structured().unwrap().summary.as_deref(),
            Some("ok")
        );

        let bare_fence = "```\n{\"summary\":\"ok\"}\n```";
        assert!(parse_model_output(bare_fence).structured().is_some());
    }

    #[test]
    fn test_parse_tolerates_missing_and_unknown_keys() {
        let outcome = parse_model_output(r#"{"summary":"ok","confidence":0.93}"#);
        let analysis = outcome.structured().unwrap();
        assert_eq!(analysis.summary.as_deref(), Some("ok"));
        assert!(analysis.diagnosis.is_none());
        assert!(analysis.abnormal_values.is_empty());
    }

    #[test]
    fn test_parse_drops_empty_string_fields() {
        let outcome = parse_model_output(
            r#"{"title":"","provider":"","type":"","date":"","summary":"Glucose is elevated.","answer_to_user":"","abnormal_values":[]}"#,
        );
        let analysis = outcome.structured().unwrap();
        assert!(analysis.title.is_none());
        assert!(analysis.provider.is_none());
        assert!(analysis.record_type.is_none());
        assert!(analysis.date.is_none());
        assert!(analysis.answer_to_user.is_none());

        // With the blank answer gone, the summary is the user-facing result.
        assert_eq!(outcome.user_result(), Some("Glucose is elevated."));
    }

    #[test]
    fn test_parse_non_object_is_raw_fallback() {
        assert!(matches!(
            parse_model_output(r#"["a","b"]"#),
            AnalysisOutcome::RawFallback { .. }
        ));
        assert!(matches!(
            parse_model_output("null"),
            AnalysisOutcome::RawFallback { .. }
        ));
    }
}
