//! Builds the grading instruction for an essay, sends it to the model and
//! unwraps the reply. The reply is handed back as text; it is expected to be
//! JSON but is never parsed here.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{ModelClient, ModelError};

/// Substituted when a submission arrives without a topic.
pub const NO_TOPIC_PLACEHOLDER: &str = "No topic provided";

/// Prefix of the text returned in place of an analysis when the model call fails.
pub const ERROR_MARKER: &str = "Error from Gemini API: ";

const TOPIC_PLACEHOLDER: &str = "{topic}";

const CANONICAL_TEMPLATE: &str = r#"Analyze this student essay in detail. The assigned topic is: "{topic}"

Output ONLY valid JSON (no extra text) with these exact keys:
{
  "ratings": {
    "grammar": number,
    "structure": number,
    "content": number,
    "coherence": number,
    "originality": number,
    "topic_relevance": number,
    "overall": number
  },
  "strengths": [string],
  "weaknesses": [string],
  "detailed_comments": {
    "grammar": "string",
    "structure": "string",
    "content": "string",
    "coherence": "string",
    "originality": "string",
    "topic_relevance": "Detailed feedback on how well the essay addresses the assigned topic"
  },
  "suggestions": [string],
  "word_count_feedback": "string",
  "key_insights": [string]
}
All ratings are numbers from 0 to 10.
"#;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("No essay provided")]
    EmptyEssay,
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl AnalyzeError {
    /// Text delivered in the `analysis` field when the backend failed.
    pub fn analysis_text(&self) -> String {
        format!("{ERROR_MARKER}{self}")
    }
}

/// Instruction text with a `{topic}` slot. The essay is always appended
/// after the template, never interpolated into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Returns `None` when the text has nowhere to put the topic.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        text.contains(TOPIC_PLACEHOLDER).then_some(Self { text })
    }

    /// The full rubric schema, restated on every call.
    pub fn canonical() -> Self {
        Self {
            text: CANONICAL_TEMPLATE.to_string(),
        }
    }

    pub fn render(&self, topic: &str, essay: &str) -> String {
        let mut prompt = self.text.replace(TOPIC_PLACEHOLDER, topic);
        if !prompt.ends_with("\n\n") {
            prompt.push_str(if prompt.ends_with('\n') { "\n" } else { "\n\n" });
        }
        prompt.push_str("Essay:\n");
        prompt.push_str(essay);
        prompt
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Removes a Markdown code fence wrapped around the whole reply.
///
/// Both an opening ```` ``` ```` and a closing ```` ``` ```` must be present;
/// otherwise the trimmed input comes back untouched. A language tag on the
/// opening line (`json`, `JSON`, `jsonc`, ...) is dropped with it.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed
        .strip_suffix("```")
        .and_then(|rest| rest.strip_prefix("```"))
    else {
        return trimmed;
    };
    let inner = match body.split_once('\n') {
        Some((tag, rest)) if !tag.contains(['{', '[']) => rest,
        Some(_) => body,
        None => body.strip_prefix("json").unwrap_or(body),
    };
    inner.trim()
}

pub struct EssayAnalyzer {
    client: Arc<dyn ModelClient>,
    template: PromptTemplate,
}

impl EssayAnalyzer {
    pub fn new(client: Arc<dyn ModelClient>, template: PromptTemplate) -> Self {
        Self { client, template }
    }

    pub fn model_id(&self) -> &str {
        self.client.model_id()
    }

    pub fn build_prompt(&self, essay: &str, topic: Option<&str>) -> String {
        let topic = topic
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(NO_TOPIC_PLACEHOLDER);
        self.template.render(topic, essay)
    }

    /// Makes exactly one model call for a non-blank essay and none otherwise.
    pub async fn analyze(
        &self,
        essay: Option<&str>,
        topic: Option<&str>,
    ) -> Result<String, AnalyzeError> {
        let essay = essay
            .filter(|e| !e.trim().is_empty())
            .ok_or(AnalyzeError::EmptyEssay)?;

        debug!(
            essay_chars = essay.chars().count(),
            has_topic = topic.is_some(),
            "analyzing essay"
        );

        let prompt = self.build_prompt(essay, topic);
        let raw = self.client.generate(&prompt).await.map_err(|err| {
            warn!(model = self.model_id(), error = %err, "model call failed");
            AnalyzeError::Model(err)
        })?;

        Ok(strip_code_fence(&raw).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MockModelClient;

    fn analyzer(client: Arc<MockModelClient>) -> EssayAnalyzer {
        EssayAnalyzer::new(client, PromptTemplate::canonical())
    }

    #[test]
    fn strips_json_fence() {
        let raw = "```json\n{\"ratings\": {\"overall\": 7}}\n```";
        assert_eq!(strip_code_fence(raw), "{\"ratings\": {\"overall\": 7}}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_code_fence("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn strips_fence_with_any_language_tag() {
        for tag in ["JSON", "jsonc", "javascript", "json5 "] {
            let raw = format!("```{tag}\n{{\"a\": 1}}\n```");
            assert_eq!(strip_code_fence(&raw), "{\"a\": 1}", "tag {tag:?}");
        }
    }

    #[test]
    fn keeps_json_on_the_opening_line() {
        assert_eq!(strip_code_fence("```{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```[1,\n2]```"), "[1,\n2]");
        assert_eq!(strip_code_fence("```json{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn unfenced_text_is_unchanged() {
        let raw = "{\"a\": \"```not a fence```\"}";
        assert_eq!(strip_code_fence(raw), raw);
    }

    #[test]
    fn one_sided_fence_is_left_alone() {
        let raw = "```json\n{\"a\": 1}";
        assert_eq!(strip_code_fence(raw), raw);
        let raw = "{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(raw), raw);
    }

    #[test]
    fn lone_fence_marker_is_left_alone() {
        assert_eq!(strip_code_fence("```"), "```");
    }

    #[test]
    fn canonical_prompt_embeds_topic_schema_and_trailing_essay() {
        let prompt = PromptTemplate::canonical().render("Drones", "My essay.\n  Indented line.");
        assert!(prompt.contains("The assigned topic is: \"Drones\""));
        for key in [
            "\"ratings\"",
            "\"topic_relevance\": number",
            "\"overall\"",
            "\"strengths\"",
            "\"weaknesses\"",
            "\"detailed_comments\"",
            "\"suggestions\"",
            "\"word_count_feedback\"",
            "\"key_insights\"",
        ] {
            assert!(prompt.contains(key), "missing {key}");
        }
        assert!(prompt.ends_with("\n\nEssay:\nMy essay.\n  Indented line."));
    }

    #[test]
    fn template_requires_topic_placeholder() {
        assert!(PromptTemplate::new("Grade this.").is_none());
        let template = PromptTemplate::new("Topic: {topic}").unwrap();
        assert_eq!(template.render("X", "body"), "Topic: X\n\nEssay:\nbody");
    }

    #[test]
    fn essay_is_not_interpolated() {
        let template = PromptTemplate::new("Topic: {topic}").unwrap();
        let prompt = template.render("X", "I wrote {topic} literally");
        assert!(prompt.ends_with("I wrote {topic} literally"));
    }

    #[test]
    fn missing_or_blank_topic_uses_placeholder() {
        let analyzer = analyzer(Arc::new(MockModelClient::replying("{}")));
        for topic in [None, Some(""), Some("   ")] {
            let prompt = analyzer.build_prompt("essay", topic);
            assert!(prompt.contains("\"No topic provided\""));
        }
    }

    #[test]
    fn supplied_topic_is_embedded_as_given() {
        let analyzer = analyzer(Arc::new(MockModelClient::replying("{}")));
        let prompt = analyzer.build_prompt("essay", Some("  Drones in Cities "));
        assert!(prompt.contains("The assigned topic is: \"  Drones in Cities \""));
    }

    #[tokio::test]
    async fn empty_essay_makes_no_model_call() {
        let client = Arc::new(MockModelClient::replying("{}"));
        let analyzer = analyzer(client.clone());
        for essay in [None, Some(""), Some(" \n\t")] {
            let err = analyzer.analyze(essay, Some("Drones")).await.unwrap_err();
            assert!(matches!(err, AnalyzeError::EmptyEssay));
        }
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn valid_essay_makes_one_call_and_strips_fence() {
        let client = Arc::new(MockModelClient::replying("```json\n{\"ratings\": {}}\n```"));
        let analyzer = analyzer(client.clone());

        let analysis = analyzer
            .analyze(Some("This is my essay."), Some("Drones"))
            .await
            .unwrap();

        assert_eq!(analysis, "{\"ratings\": {}}");
        assert_eq!(client.calls(), 1);
        let prompt = &client.prompts()[0];
        assert!(prompt.contains("\"Drones\""));
        assert!(prompt.ends_with("Essay:\nThis is my essay."));
    }

    #[tokio::test]
    async fn malformed_output_passes_through() {
        let client = Arc::new(MockModelClient::replying("I'd rate this a 7/10."));
        let analysis = analyzer(client).analyze(Some("essay"), None).await.unwrap();
        assert_eq!(analysis, "I'd rate this a 7/10.");
    }

    #[tokio::test]
    async fn model_failure_carries_marker_and_detail() {
        let client = Arc::new(MockModelClient::failing(|| ModelError::Status {
            status: 429,
            body: "quota exceeded".to_string(),
        }));
        let err = analyzer(client).analyze(Some("essay"), None).await.unwrap_err();
        let text = err.analysis_text();
        assert!(text.starts_with(ERROR_MARKER));
        assert!(text.contains("429"));
        assert!(text.contains("quota exceeded"));
    }
}
