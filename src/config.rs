use std::env;

use crate::Error;

const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
const GEMINI_API_BASE: &str = "GEMINI_API_BASE";
const GEMINI_MODEL: &str = "GEMINI_MODEL";

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Where the `generateContent` request goes, and with which key.
#[derive(Clone, PartialEq)]
pub struct Endpoint {
    base_uri: String,
    model: String,
    api_key: Option<String>,
}

// Keeps the key out of logs and panics.
impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_uri", &self.base_uri)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Endpoint {
    /// Creates a new `Endpoint` without checking environment variables.
    ///
    /// # Arguments
    ///
    /// * `base_uri`: The base URI of the API, without the `/v1beta` path.
    /// * `model`: The model name, e.g. `gemini-1.5-flash`.
    /// * `api_key`: The API key, or `None` if the endpoint doesn't need one.
    ///
    /// # Returns
    ///
    /// If `base_uri` or `model` is empty, an error will be returned.
    /// If `base_uri` is the Google API base URI and `api_key` is `None`, an error will be returned.
    pub fn new(base_uri: String, model: String, api_key: Option<String>) -> Result<Endpoint, Error> {
        let base_uri = base_uri.trim_end_matches('/').to_string();

        if base_uri.is_empty() {
            return Err(Error::BadConfigurationError("No base URI given".into()));
        }

        if model.is_empty() {
            return Err(Error::BadConfigurationError("No model given".into()));
        }

        // Mock servers and proxies may not want a key, Google always does.
        if base_uri == DEFAULT_API_BASE && api_key.is_none() {
            return Err(Error::BadConfigurationError(format!(
                "Missing api key, set {} or {}",
                GEMINI_API_KEY, GOOGLE_API_KEY
            )));
        }

        Ok(Self {
            base_uri,
            model,
            api_key,
        })
    }

    /// Creates a new `Endpoint` from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    /// `GEMINI_API_BASE` and `GEMINI_MODEL` fall back to their defaults when
    /// unset; the key is read from `GEMINI_API_KEY`, then `GOOGLE_API_KEY`.
    pub fn from_environment() -> Result<Endpoint, Error> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(Error::BadConfigurationError(err.to_string()));
            }
        }

        let base_uri = non_empty_var(GEMINI_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.into());
        let model = non_empty_var(GEMINI_MODEL).unwrap_or_else(|| DEFAULT_MODEL.into());
        let api_key = non_empty_var(GEMINI_API_KEY).or_else(|| non_empty_var(GOOGLE_API_KEY));

        Self::new(base_uri, model, api_key)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request URL. The key is sent in a header, never in the URL.
    pub fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_uri, self.model
        )
    }

    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_model_but_not_key() -> Result<(), Error> {
        let endpoint = Endpoint::new(
            "https://generativelanguage.googleapis.com/".into(),
            DEFAULT_MODEL.into(),
            Some("secret".into()),
        )?;

        assert_eq!(
            endpoint.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert!(!endpoint.url().contains("secret"));
        assert_eq!(endpoint.api_key(), Some("secret"));

        Ok(())
    }

    #[test]
    fn custom_base_does_not_need_a_key() -> Result<(), Error> {
        let endpoint = Endpoint::new("http://127.0.0.1:8080".into(), "mock".into(), None)?;

        assert_eq!(
            endpoint.url(),
            "http://127.0.0.1:8080/v1beta/models/mock:generateContent"
        );

        Ok(())
    }

    #[test]
    fn google_base_requires_a_key() {
        let result = Endpoint::new(DEFAULT_API_BASE.into(), DEFAULT_MODEL.into(), None);
        assert!(matches!(result, Err(Error::BadConfigurationError(_))));
    }

    #[test]
    fn empty_base_is_rejected() {
        let result = Endpoint::new("".into(), DEFAULT_MODEL.into(), Some("key".into()));
        assert!(matches!(result, Err(Error::BadConfigurationError(_))));
    }

    #[test]
    fn debug_output_hides_the_key() -> Result<(), Error> {
        let endpoint = Endpoint::new(
            DEFAULT_API_BASE.into(),
            DEFAULT_MODEL.into(),
            Some("secret".into()),
        )?;

        let debug = format!("{:?}", endpoint);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));

        Ok(())
    }
}
