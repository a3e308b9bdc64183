//! Wire types for the `generateContent` REST endpoint.

use serde::{Deserialize, Serialize};

use super::{Citation, CollabError, GenerateResponse};

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub(super) struct Tool {
    #[serde(rename = "google_search")]
    pub google_search: GoogleSearch,
}

impl Tool {
    pub(super) fn google_search() -> Self {
        Self {
            google_search: GoogleSearch {},
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct GoogleSearch {}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Candidate {
    #[serde(default)]
    pub content: Content,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

/// Flatten a wire response into collaborator output.
///
/// Text is joined across the first candidate's parts; chunks without a
/// web source are skipped, and a citation missing its title falls back
/// to the URI.
pub(super) fn into_response(wire: GenerateContentResponse) -> Result<GenerateResponse, CollabError> {
    let Some(candidate) = wire.candidates.into_iter().next() else {
        return Err(CollabError::EmptyResponse);
    };

    let text = candidate
        .content
        .parts
        .iter()
        .map(|part| part.text.as_str())
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_string();
    if text.is_empty() {
        return Err(CollabError::EmptyResponse);
    }

    let citations = candidate
        .grounding_metadata
        .map(|metadata| {
            metadata
                .grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .filter(|web| !web.uri.is_empty())
                .map(|web| Citation {
                    title: if web.title.is_empty() {
                        web.uri.clone()
                    } else {
                        web.title
                    },
                    uri: web.uri,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(GenerateResponse { text, citations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).expect("wire response should deserialize")
    }

    #[test]
    fn request_serializes_to_expected_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".into(),
                }],
            }],
            tools: vec![Tool::google_search()],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert!(value["tools"][0]["google_search"].is_object());
    }

    #[test]
    fn ungrounded_request_omits_tools() {
        let request = GenerateContentRequest {
            contents: vec![Content { parts: vec![] }],
            tools: vec![],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn response_text_joins_candidate_parts() {
        let wire = parse(json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "Hello "}, {"text": "world."}]
                }
            }]
        }));

        let response = into_response(wire).unwrap();
        assert_eq!(response.text, "Hello world.");
        assert!(response.citations.is_empty());
    }

    #[test]
    fn response_extracts_grounding_citations() {
        let wire = parse(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Grounded answer."}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://example.com/a", "title": "Example A"}},
                        {"web": {"uri": "https://example.com/b"}},
                        {"web": {"uri": ""}},
                        {}
                    ]
                }
            }]
        }));

        let response = into_response(wire).unwrap();
        assert_eq!(
            response.citations,
            vec![
                Citation {
                    title: "Example A".into(),
                    uri: "https://example.com/a".into()
                },
                Citation {
                    title: "https://example.com/b".into(),
                    uri: "https://example.com/b".into()
                },
            ]
        );
    }

    #[test]
    fn empty_candidates_is_an_error() {
        let wire = parse(json!({"candidates": []}));
        assert!(matches!(
            into_response(wire),
            Err(CollabError::EmptyResponse)
        ));
    }

    #[test]
    fn whitespace_only_text_is_an_error() {
        let wire = parse(json!({
            "candidates": [{"content": {"parts": [{"text": "   "}]}}]
        }));
        assert!(matches!(
            into_response(wire),
            Err(CollabError::EmptyResponse)
        ));
    }

    #[test]
    fn missing_content_defaults_to_empty() {
        let wire = parse(json!({"candidates": [{}]}));
        assert!(matches!(
            into_response(wire),
            Err(CollabError::EmptyResponse)
        ));
    }
}
