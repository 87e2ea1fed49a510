use crate::core::deadline::Deadline;
use crate::utils::error::SourceError;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

pub const USER_AGENT: &str = concat!("cep-race/", env!("CARGO_PKG_VERSION"));

pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(USER_AGENT).build()
}

/// Appends `segments` to `base`, percent-encoding each one.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url, SourceError> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| SourceError::UnsupportedBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Single GET bounded by `deadline`. Anything but a 2xx with a decodable body
/// is an error.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
    deadline: Deadline,
) -> Result<T, SourceError> {
    tracing::debug!("Making provider request to: {}", url);

    deadline
        .run(async {
            let response = client
                .get(url)
                .header(ACCEPT, "application/json")
                .timeout(deadline.remaining())
                .send()
                .await?;

            let status = response.status();
            tracing::debug!("Provider response status: {}", status);

            if !status.is_success() {
                return Err(SourceError::Status(status));
            }

            let body = response.bytes().await?;
            Ok::<T, SourceError>(serde_json::from_slice(&body)?)
        })
        .await?
}
