pub use dotenv::var;
pub use reqwest::Client as HttpClient;

use reqwest::header::HeaderMap;
use tracing::error;

/// GET `url` with optional headers and query parameters.
///
/// Fails on any non-2xx status before the body is touched; callers do not
/// retry.
pub async fn get(
    client: &HttpClient,
    url: &str,
    headers: Option<HeaderMap>,
    query: Option<&[(&str, &str)]>,
) -> anyhow::Result<reqwest::Response> {
    let mut request = client.get(url);
    if let Some(headers) = headers {
        request = request.headers(headers);
    }
    if let Some(query) = query {
        request = request.query(query);
    }

    let response = request.send().await.map_err(|err| {
        error!("failed to fetch {url}, error({err})");
        err
    })?;

    Ok(response.error_for_status().map_err(|err| {
        error!("{url} returned an error status, error({err})");
        err
    })?)
}
