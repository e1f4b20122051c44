//! The structured-output data contract for a comparison result.
//!
//! This module is the single definition of what the analysis service must
//! return: the Rust type the response deserializes into, and the JSON
//! response schema the request declares. The prompt builder attaches the
//! schema to every payload and the client parses against the same type, so
//! the two sides cannot drift apart.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Which thumbnail the service judged more likely to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    A,
    B,
    #[serde(rename = "DRAW")]
    Draw,
}

/// The parsed comparison verdict.
///
/// Every field is required on the wire; a response missing any of
/// them fails deserialization and surfaces as `MalformedResponse` rather
/// than a partially-filled result. Score and CTR ranges are intent, not
/// enforced constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisVerdict {
    /// Technical score out of 100 for thumbnail A
    pub score_a: f64,
    /// Technical score out of 100 for thumbnail B
    pub score_b: f64,
    /// Estimated click-through rate for A (0–25)
    pub ctr_estimate_a: f64,
    /// Estimated click-through rate for B (0–25)
    pub ctr_estimate_b: f64,
    /// Declared winner
    pub winner: Winner,
    /// Free-form explanation of the verdict
    pub reasoning: String,
    /// Actionable improvement list for A (may be empty)
    pub improvements_a: Vec<String>,
    /// Actionable improvement list for B (may be empty)
    pub improvements_b: Vec<String>,
    /// Simulated eye-tracking narrative
    pub eye_tracking_notes: String,
}

/// Wire-format field names, in schema order. Shared between the schema
/// declaration and its required-field list.
const FIELDS: [&str; 9] = [
    "scoreA",
    "scoreB",
    "ctrEstimateA",
    "ctrEstimateB",
    "winner",
    "reasoning",
    "improvementsA",
    "improvementsB",
    "eyeTrackingNotes",
];

/// The strict response schema declared on every request.
///
/// Field names, types, and the three-value winner enum must match
/// [`AnalysisVerdict`] exactly; the service is expected to return content
/// conforming to this schema with no omissions and no extra wrapping.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "scoreA": { "type": "NUMBER" },
            "scoreB": { "type": "NUMBER" },
            "ctrEstimateA": { "type": "NUMBER", "description": "Estimated CTR as a number between 0 and 25" },
            "ctrEstimateB": { "type": "NUMBER", "description": "Estimated CTR as a number between 0 and 25" },
            "winner": { "type": "STRING", "enum": ["A", "B", "DRAW"], "description": "Must be 'A', 'B', or 'DRAW'" },
            "reasoning": { "type": "STRING" },
            "improvementsA": { "type": "ARRAY", "items": { "type": "STRING" } },
            "improvementsB": { "type": "ARRAY", "items": { "type": "STRING" } },
            "eyeTrackingNotes": { "type": "STRING" }
        },
        "required": FIELDS,
    })
}

/// Parse the service's response text against the contract.
///
/// Never coerces or guesses: invalid JSON, a missing required field, or a
/// `winner` outside the enum all map to `MalformedResponse`.
pub fn parse_verdict(text: &str) -> Result<AnalysisVerdict, AnalysisError> {
    serde_json::from_str(text.trim()).map_err(|e| AnalysisError::MalformedResponse {
        message: e.to_string(),
    })
}
