pub mod fundamentals;
pub mod psx;

/// Shared HTTP plumbing for all scrapes.
pub mod http;

/// How the per-sector company requests are issued.
///
/// Both modes carry identical request semantics; `Concurrent` is just a
/// non-blocking fan-out over the same calls, joined before any results
/// are used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchMode {
    /// One request at a time.
    Serial,

    /// All requests at once; the first failure aborts the batch.
    #[default]
    Concurrent,
}

/// Default client build; browser-like User-Agent, since the PSX endpoints
/// reject the reqwest default.
pub(crate) fn std_client_build() -> http::HttpClient {
    reqwest::ClientBuilder::new()
        .user_agent("Mozilla/5.0")
        .build()
        .expect("failed to build reqwest client")
}

/// Readable elapsed-time suffix for log lines.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.2}s", time.elapsed().as_secs_f64())
}
