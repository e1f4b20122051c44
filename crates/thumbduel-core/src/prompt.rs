//! Prompt construction for a thumbnail comparison.
//!
//! One fixed instruction template, parameterized only by the two titles,
//! followed by the two inlined images. The deliverables the template asks
//! for correspond one-to-one with the fields of [`crate::contract`]'s
//! response schema — the payload always carries both, so the instruction
//! and the schema cannot drift apart.

use crate::contract;
use crate::error::AnalysisError;
use crate::gemini::{Content, GenerateContentRequest, GenerationConfig, InlineData, Part};
use crate::types::AnalysisRequest;

/// Render the evaluation instruction block for the two titles.
pub fn build_prompt(title_a: &str, title_b: &str) -> String {
    format!(
        "Act as a world-class YouTube growth expert. Compare these two thumbnails (A and B) and their titles.\n\
         \n\
         Thumbnail A Title: \"{title_a}\"\n\
         Thumbnail B Title: \"{title_b}\"\n\
         \n\
         Evaluate based on:\n\
         1. Visual clarity and focal point.\n\
         2. Emotional hook and curiosity gap.\n\
         3. Readability of text (if any).\n\
         4. Color theory and saturation for mobile viewers.\n\
         5. Title-to-Thumbnail alignment.\n\
         \n\
         Tasks:\n\
         - Provide a technical score out of 100 for each.\n\
         - Provide a realistic estimated CTR percentage for each (as a number between 0 and 25).\n\
         - Identify the clear winner based on likely performance in a competitive feed.\n\
         - Provide actionable improvements for both.\n\
         - Include a brief section on simulated \"eye-tracking\" focus (e.g., where the eye lands first)."
    )
}

/// Compose the full multi-part payload for one comparison.
///
/// Fails fast with `IncompleteInput` before building anything, so an
/// invalid request never costs a network round-trip.
pub fn build_payload(request: &AnalysisRequest) -> Result<GenerateContentRequest, AnalysisError> {
    request.validate()?;

    let parts = vec![
        Part::Text {
            text: build_prompt(&request.title_a, &request.title_b),
        },
        Part::InlineData {
            inline_data: InlineData {
                mime_type: request.image_a.media_type.clone(),
                data: request.image_a.data.clone(),
            },
        },
        Part::InlineData {
            inline_data: InlineData {
                mime_type: request.image_b.media_type.clone(),
                data: request.image_b.data.clone(),
            },
        },
    ];

    Ok(GenerateContentRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: contract::response_schema(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageInput;

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            image_a: ImageInput::from_bytes(&[1, 2, 3], "png"),
            image_b: ImageInput::from_bytes(&[4, 5, 6], "jpeg"),
            title_a: "Title A".to_string(),
            title_b: "Title B".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_both_titles() {
        let prompt = build_prompt("How I Built It", "Building It Wrong");
        assert!(prompt.contains("Thumbnail A Title: \"How I Built It\""));
        assert!(prompt.contains("Thumbnail B Title: \"Building It Wrong\""));
    }

    #[test]
    fn test_prompt_covers_rubric_and_deliverables() {
        let prompt = build_prompt("a", "b");
        assert!(prompt.contains("Visual clarity and focal point"));
        assert!(prompt.contains("Emotional hook and curiosity gap"));
        assert!(prompt.contains("Readability of text"));
        assert!(prompt.contains("Color theory and saturation"));
        assert!(prompt.contains("Title-to-Thumbnail alignment"));
        assert!(prompt.contains("score out of 100"));
        assert!(prompt.contains("between 0 and 25"));
        assert!(prompt.contains("clear winner"));
        assert!(prompt.contains("actionable improvements"));
        assert!(prompt.contains("eye-tracking"));
    }

    #[test]
    fn test_payload_has_text_then_two_images() {
        let payload = build_payload(&request()).unwrap();
        assert_eq!(payload.contents.len(), 1);
        let parts = &payload.contents[0].parts;
        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[0], Part::Text { .. }));
        match (&parts[1], &parts[2]) {
            (
                Part::InlineData { inline_data: a },
                Part::InlineData { inline_data: b },
            ) => {
                assert_eq!(a.mime_type, "image/png");
                assert_eq!(b.mime_type, "image/jpeg");
                assert_ne!(a.data, b.data);
            }
            other => panic!("Expected two image parts, got {other:?}"),
        }
    }

    #[test]
    fn test_payload_declares_contract_schema() {
        let payload = build_payload(&request()).unwrap();
        assert_eq!(payload.generation_config.response_mime_type, "application/json");
        assert_eq!(
            payload.generation_config.response_schema,
            crate::contract::response_schema()
        );
    }

    #[test]
    fn test_payload_rejects_incomplete_request() {
        let mut req = request();
        req.title_b.clear();
        let err = build_payload(&req).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::IncompleteInput { field: "title_b" }
        ));
    }
}
