use aerodesk_booking::{DirectoryError, FlightDirectory};
use aerodesk_core::{Flight, NewFlight, Profile};
use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid directory URL {0}")]
    InvalidUrl(String),
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Directory rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the flight/profile directory service.
#[derive(Clone)]
pub struct DirectoryClient {
    base_url: Url,
    http: reqwest::Client,
}

impl DirectoryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    pub async fn list_flights(&self) -> Result<Vec<Flight>, ClientError> {
        let response = self.http.get(self.url(&["api", "flights"])).send().await?;
        Self::parse(response).await
    }

    pub async fn create_flight(&self, flight: &NewFlight) -> Result<Flight, ClientError> {
        let response = self
            .http
            .post(self.url(&["api", "flights"]))
            .json(flight)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn list_users(&self) -> Result<Vec<Profile>, ClientError> {
        let response = self.http.get(self.url(&["api", "users"])).send().await?;
        Self::parse(response).await
    }

    pub async fn create_profile(&self, profile: &Profile) -> Result<Profile, ClientError> {
        let response = self
            .http
            .post(self.url(&["api", "profile"]))
            .json(profile)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn remove_user(&self, email: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&["api", "users", email]))
            .send()
            .await?;
        let _: serde_json::Value = Self::parse(response).await?;
        Ok(())
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        debug!("{} {}", status, response.url());

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl FlightDirectory for DirectoryClient {
    async fn flights(&self) -> Result<Vec<Flight>, DirectoryError> {
        self.list_flights().await.map_err(|e| match e {
            ClientError::Rejected { status, message } => {
                DirectoryError::BadResponse(format!("{}: {}", status, message))
            }
            other => DirectoryError::Unreachable(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_segment_is_encoded() {
        let client = DirectoryClient::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        let url = client.url(&["api", "users", "a b/c@example.com"]);
        assert_eq!(url.as_str(), "http://localhost:5000/api/users/a%20b%2Fc@example.com");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(matches!(
            DirectoryClient::new("mailto:ops@example.com", Duration::from_secs(1)),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(DirectoryClient::new("not a url", Duration::from_secs(1)).is_err());
    }
}
