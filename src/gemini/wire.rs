//! `generateContent` wire types.
//!
//! Responses are only partially structured: every field the backend may
//! omit is an `Option` or defaults to empty, and callers destructure with
//! defaults instead of probing.

use serde::{Deserialize, Serialize};

use super::error::StudioError;

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest<'a> {
    pub contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'a str>,
    pub parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TextPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub google_search: GoogleSearch,
}

/// Serializes as `{}`; presence of the key enables search grounding.
#[derive(Debug, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig<'a> {
    pub image_config: ImageConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig<'a> {
    pub aspect_ratio: &'a str,
}

impl<'a> Content<'a> {
    fn user(text: &'a str) -> Self {
        Self { role: Some("user"), parts: vec![TextPart { text }] }
    }

    fn instruction(text: &'a str) -> Self {
        Self { role: None, parts: vec![TextPart { text }] }
    }
}

pub fn chat_request<'a>(system_instruction: &'a str, message: &'a str) -> GenerateRequest<'a> {
    let system_instruction = (!system_instruction.trim().is_empty()).then(|| Content::instruction(system_instruction));
    GenerateRequest {
        contents: vec![Content::user(message)],
        system_instruction,
        tools: Vec::new(),
        generation_config: None,
    }
}

pub fn grounded_request(query: &str) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: vec![Content::user(query)],
        system_instruction: None,
        tools: vec![ToolSpec { google_search: GoogleSearch {} }],
        generation_config: None,
    }
}

pub fn image_request<'a>(prompt: &'a str, aspect_ratio: &'a str) -> GenerateRequest<'a> {
    GenerateRequest {
        contents: vec![Content { role: None, parts: vec![TextPart { text: prompt }] }],
        system_instruction: None,
        tools: Vec::new(),
        generation_config: Some(GenerationConfig { image_config: ImageConfig { aspect_ratio } }),
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub text: Option<String>,
    #[serde(default)]
    pub thought: bool,
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub data: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebChunk>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
}

pub fn parse_response(body: &str) -> Result<GenerateResponse, StudioError> {
    serde_json::from_str(body).map_err(|e| StudioError::Parse(e.to_string()))
}

impl GenerateResponse {
    fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    fn parts(&self) -> &[Part] {
        match self.first_candidate() {
            Some(Candidate { content: Some(content), .. }) => &content.parts,
            _ => &[],
        }
    }

    /// Concatenated text of the first candidate, thought parts excluded.
    pub fn text(&self) -> String {
        self.parts()
            .iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text.as_deref())
            .collect()
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.first_candidate().and_then(|c| c.finish_reason.as_deref())
    }

    /// Web citations in backend order; chunks without a `web` entry are skipped.
    pub fn web_chunks(&self) -> impl Iterator<Item = &WebChunk> {
        self.first_candidate()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| meta.grounding_chunks.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
    }

    /// Base64 payload of the first part carrying inline data.
    pub fn inline_image(&self) -> Option<&str> {
        self.parts().iter().find_map(|part| match &part.inline_data {
            Some(InlineData { data: Some(data), .. }) if !data.is_empty() => Some(data.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;
