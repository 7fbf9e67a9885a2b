//! Token and cost estimates recorded on every prompt.
//!
//! The token count is a character-based approximation, not a tokenizer.
//! Stored costs were computed with this exact formula, so it must not change.

use std::collections::HashMap;

use crate::config::ModelPricing;
use crate::error::{PipelineError, Result};

/// Approximate token count: one token per four UTF-16 code units, rounded up
pub fn estimate_token_count(text: &str) -> u64 {
    (text.encode_utf16().count() as u64).div_ceil(4)
}

/// Estimated cost in USD for a call with the given token counts
///
/// Fails when the model has no entry in `pricing`.
pub fn estimate_cost(
    input_tokens: u64,
    output_tokens: u64,
    model: &str,
    pricing: &HashMap<String, ModelPricing>,
) -> Result<f64> {
    let price = pricing
        .get(model)
        .ok_or_else(|| PipelineError::UnknownModelPricing(model.to_string()))?;

    Ok((input_tokens as f64 / 1000.0) * price.input
        + (output_tokens as f64 / 1000.0) * price.output)
}
