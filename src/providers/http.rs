//! HTTP helpers shared by every web-backed provider.
//!
//! Each provider builds its own [`reqwest::Client`] in `connect()` and then
//! goes through these helpers, so status handling is identical everywhere:
//! 404 means "nothing here", 429 means rate limited, anything else that is
//! not a success is an [`ProviderError::Http`].

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::domain::ProviderError;

/// User agent string - MusicBrainz rejects anonymous clients
pub const USER_AGENT: &str = concat!(
    "Mp3Organizer/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/mp3-organizer)"
);

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client used by a provider.
pub fn build_client() -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ProviderError::Network(e.to_string()))
}

/// Send a GET request and check the status.
///
/// Returns `Ok(None)` on 404.
async fn get(
    client: &reqwest::Client,
    url: &str,
) -> Result<Option<reqwest::Response>, ProviderError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited);
    }

    if !status.is_success() {
        return Err(ProviderError::Http {
            status: status.as_u16(),
        });
    }

    Ok(Some(response))
}

/// GET a JSON document and deserialize it.
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<Option<T>, ProviderError> {
    let Some(response) = get(client, url).await? else {
        return Ok(None);
    };
    response
        .json::<T>()
        .await
        .map(Some)
        .map_err(|e| ProviderError::Parse(e.to_string()))
}

/// GET a page as text.
pub async fn get_text(
    client: &reqwest::Client,
    url: &str,
) -> Result<Option<String>, ProviderError> {
    let Some(response) = get(client, url).await? else {
        return Ok(None);
    };
    response
        .text()
        .await
        .map(Some)
        .map_err(|e| ProviderError::Network(e.to_string()))
}

/// GET raw bytes (images).
pub async fn get_bytes(
    client: &reqwest::Client,
    url: &str,
) -> Result<Option<Vec<u8>>, ProviderError> {
    let Some(response) = get(client, url).await? else {
        return Ok(None);
    };
    response
        .bytes()
        .await
        .map(|b| Some(b.to_vec()))
        .map_err(|e| ProviderError::Network(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        assert!(USER_AGENT.starts_with("Mp3Organizer/"));
        assert!(USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client().is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = build_client().unwrap();
        // Port 9 (discard) on localhost is closed on any sane test machine
        let result = get_text(&client, "http://127.0.0.1:9/").await;
        assert!(matches!(result, Err(ProviderError::Network(_))));
    }
}
