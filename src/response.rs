use crate::error::{PipelineError, Result};
use crate::model::PromptResponse;

/// Parse the model's reply into a [`PromptResponse`]
///
/// The reply must be exactly one JSON object with the four expected fields.
/// Fenced code blocks, prose around the object, and extra or missing fields
/// are all rejected; the offending text is kept on the error.
pub fn parse_response(raw: &str) -> Result<PromptResponse> {
    serde_json::from_str(raw).map_err(|source| PipelineError::MalformedResponse {
        raw: raw.to_string(),
        source,
    })
}
