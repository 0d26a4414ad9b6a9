//! Fixed prompt template for medical report analysis.

/// Substituted into the prompt when the upload carries no question.
pub const NO_QUESTION_PLACEHOLDER: &str = "No question was asked.";

/// Build the analysis prompt embedding the report text and the optional
/// user question. The template demands a single JSON object with a fixed
/// key set; the analyzer parses defensively regardless.
pub fn build_prompt(report_text: &str, question: Option<&str>) -> String {
    let question = match question {
        Some(q) if !q.trim().is_empty() => q.trim(),
        _ => NO_QUESTION_PLACEHOLDER,
    };

    format!(
        r#"You are a medical AI assistant.

Analyze this medical report and return ONLY a JSON object with exactly these keys:

{{
  "patient_name": "",
  "diagnosis": "",
  "abnormal_values": [],
  "risk_level": "",
  "summary": "",
  "title": "",
  "type": "",
  "provider": "",
  "date": "",
  "answer_to_user": ""
}}

Use an empty string or empty list for anything the report does not state.
"type" is a short document category (e.g. "Lab Report", "Prescription", "Imaging").
"date" must be the document's date in YYYY-MM-DD format, or "" if not stated.
Include "answer_to_user" only when a question is asked; answer it directly and plainly.

Patient question:
{question}

Report:
{report_text}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_report_and_question() {
        let prompt = build_prompt("Glucose: 210 mg/dL", Some("Is my sugar level high?"));
        assert!(prompt.contains("Glucose: 210 mg/dL"));
        assert!(prompt.contains("Is my sugar level high?"));
        assert!(!prompt.contains(NO_QUESTION_PLACEHOLDER));
    }

    #[test]
    fn test_prompt_uses_placeholder_without_question() {
        let prompt = build_prompt("Glucose: 92 mg/dL", None);
        assert!(prompt.contains(NO_QUESTION_PLACEHOLDER));

        let blank = build_prompt("Glucose: 92 mg/dL", Some("   "));
        assert!(blank.contains(NO_QUESTION_PLACEHOLDER));
    }

    #[test]
    fn test_prompt_names_all_expected_keys() {
        let prompt = build_prompt("text", None);
        for key in [
            "patient_name",
            "diagnosis",
            "abnormal_values",
            "risk_level",
            "summary",
            "title",
            "type",
            "provider",
            "date",
            "answer_to_user",
        ] {
            assert!(prompt.contains(key), "prompt should name key {}", key);
        }
    }
}
