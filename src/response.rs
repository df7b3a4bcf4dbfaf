use crate::Error;

#[derive(Debug, serde::Deserialize)]
pub struct Part {
    // Non-text parts (inline data, function calls) have no text.
    pub text: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, serde::Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, serde::Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    pub fn from_json(body: &str) -> Result<Self, Error> {
        serde_json::from_str(body).map_err(Error::DeserializationError)
    }

    /// Returns `candidates[0].content.parts[0].text`.
    pub fn first_text(&self) -> Result<&str, Error> {
        let candidate = self
            .candidates
            .first()
            .ok_or_else(|| Error::MalformedResponseError("no candidates".into()))?;
        let content = candidate
            .content
            .as_ref()
            .ok_or_else(|| Error::MalformedResponseError("first candidate has no content".into()))?;
        let part = content
            .parts
            .first()
            .ok_or_else(|| Error::MalformedResponseError("first candidate has no parts".into()))?;

        part.text
            .as_deref()
            .ok_or_else(|| Error::MalformedResponseError("first part has no text".into()))
    }
}
