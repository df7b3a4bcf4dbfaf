use crate::config::Endpoint;
use crate::request::GenerateContent;
use crate::Error;

/// Status and body of an HTTP response, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Sends one `generateContent` request.
///
/// Only transport failures are errors: a response with any status code is
/// returned as a [`RawResponse`].
pub trait Transport {
    fn send(&self, request: &GenerateContent) -> Result<RawResponse, Error>;
}

#[cfg(feature = "ureq")]
struct ClientImpl {
    client: ureq::Agent,
}

#[cfg(feature = "ureq")]
impl ClientImpl {
    fn new() -> Result<ClientImpl, Error> {
        // ureq 2 always bounds the connect phase (30 s); reads and writes are
        // left unbounded.
        Ok(Self {
            client: ureq::AgentBuilder::new().build(),
        })
    }

    fn do_request(&self, url: &str, api_key: Option<&str>, body: String) -> Result<RawResponse, Error> {
        let mut request = self
            .client
            .post(url)
            .set("Content-Type", "application/json");

        if let Some(key) = api_key {
            request = request.set(API_KEY_HEADER, key);
        }

        let result = request.send_string(&body);

        // ureq reports 4xx and 5xx as errors, they are still responses here.
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(Error::NetworkError(e.to_string())),
        };

        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| Error::NetworkError(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(feature = "reqwest")]
struct ClientImpl {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "reqwest")]
impl ClientImpl {
    fn new() -> Result<ClientImpl, Error> {
        let client = reqwest::blocking::ClientBuilder::new()
            .timeout(None)
            .build()
            .map_err(|e| Error::BadConfigurationError(e.to_string()))?;

        Ok(Self { client })
    }

    fn do_request(&self, url: &str, api_key: Option<&str>, body: String) -> Result<RawResponse, Error> {
        let mut request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if let Some(key) = api_key {
            let mut value = reqwest::header::HeaderValue::from_str(key)
                .map_err(|e| Error::BadConfigurationError(e.to_string()))?;
            value.set_sensitive(true);
            request = request.header(API_KEY_HEADER, value);
        }

        let response = request
            .body(body)
            .send()
            .map_err(|e| Error::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| Error::NetworkError(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

pub struct Client {
    inner: ClientImpl,
    endpoint: Endpoint,
}

impl Client {
    /// Creates a new `Client` for the given endpoint.
    pub fn new(endpoint: Endpoint) -> Result<Client, Error> {
        let inner = ClientImpl::new()?;
        Ok(Self { inner, endpoint })
    }

    /// Creates a new `Client` from environment variables.
    ///
    /// See [`Endpoint::from_environment`] for the variables read.
    pub fn new_from_environment() -> Result<Client, Error> {
        Self::new(Endpoint::from_environment()?)
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Sends a `generateContent` request to the configured model.
    ///
    /// The request is sent once, as JSON, and the call blocks until the whole
    /// response has been read. There is no timeout.
    ///
    /// # Arguments
    ///
    /// * `request`: The `GenerateContent` struct containing the prompt and generation parameters.
    ///
    /// # Returns
    ///
    /// A `Result` containing the status and raw body of the response, or an `Error` if the request
    /// could not be serialized or the server could not be reached.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use gemini_probe::{Client, GenerateContent};
    ///
    /// let client = Client::new_from_environment().unwrap();
    /// let response = client.generate_content(&GenerateContent::new("Say hello.")).unwrap();
    ///
    /// println!("{} {}", response.status, response.body);
    /// ```
    pub fn generate_content(&self, request: &GenerateContent) -> Result<RawResponse, Error> {
        let body = serde_json::to_string(request).map_err(Error::SerializationError)?;

        tracing::debug!(
            model = self.endpoint.model(),
            bytes = body.len(),
            "sending generateContent request"
        );

        let response = self
            .inner
            .do_request(&self.endpoint.url(), self.endpoint.api_key(), body)?;

        tracing::debug!(status = response.status, bytes = response.body.len(), "response received");

        Ok(response)
    }
}

impl Transport for Client {
    fn send(&self, request: &GenerateContent) -> Result<RawResponse, Error> {
        self.generate_content(request)
    }
}
