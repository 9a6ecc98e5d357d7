use serde_json::Value;

use super::types::PolicyExtraction;
use super::ExtractionError;

/// Parse a provider success envelope into a [`PolicyExtraction`].
pub fn parse_extraction_response(envelope: &Value) -> Result<PolicyExtraction, ExtractionError> {
    let text = candidate_text(envelope)?;
    parse_extraction_text(text)
}

/// Pull the first candidate's reply text out of the success envelope.
fn candidate_text(envelope: &Value) -> Result<&str, ExtractionError> {
    envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| ExtractionError::MalformedResponse("no candidate text in envelope".into()))
}

/// Parse a raw model reply into a [`PolicyExtraction`].
///
/// Fence markers are stripped wherever they appear; the remainder must be a
/// single JSON object. Field values are taken as-is; date validation and
/// range checks happen downstream.
pub fn parse_extraction_text(text: &str) -> Result<PolicyExtraction, ExtractionError> {
    let cleaned = strip_formatting_fences(text);

    let raw: Value = serde_json::from_str(&cleaned)
        .map_err(|e| ExtractionError::JsonParsing(e.to_string()))?;
    if !raw.is_object() {
        return Err(ExtractionError::JsonParsing(
            "reply is not a JSON object".into(),
        ));
    }

    let mut extraction: PolicyExtraction = serde_json::from_value(raw.clone())
        .map_err(|e| ExtractionError::JsonParsing(e.to_string()))?;
    extraction.raw = raw;
    Ok(extraction)
}

/// Remove the code-fence markers models wrap JSON output in.
fn strip_formatting_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}
