use crate::http::{self, var};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

// RATE_LIMIT = 25 /day on the free tier, so requests stay sequential
//
// overview = `https://www.alphavantage.co/query?function=OVERVIEW&symbol=...`,
// per symbol

const OVERVIEW_URL: &str = "https://www.alphavantage.co/query";

/// Symbols fetched when the caller does not supply any.
pub const DEFAULT_SYMBOLS: &[&str] = &["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA"];

/////////////////////////////////////////////////////////////////////////////////
// core
/////////////////////////////////////////////////////////////////////////////////

/// Fetch the company overview for each symbol, one call per symbol.
pub async fn scrape(symbols: &[String], tui: bool) -> anyhow::Result<Vec<Overview>> {
    let time = std::time::Instant::now();
    let key = var("ALPHAVANTAGE_API_KEY").expect("environment variable ALPHAVANTAGE_API_KEY");
    let client = crate::std_client_build();

    if tui {
        println!(
            "{bar}\n{name:^40}\n{bar}",
            bar = "=".repeat(40),
            name = "Alpha Vantage Overviews"
        );
    }

    // progress bar
    let pb = if tui {
        let pb = ProgressBar::new(symbols.len() as u64).with_style(
            ProgressStyle::default_bar()
                .template(
                    "{msg} {spinner:.magenta}\n\
                    [{elapsed_precise:.magenta}] |{bar:40.cyan/blue}| {human_pos}/{human_len} \
                    [Rate: {per_sec:.magenta}, ETA: {eta:.blue}]",
                )?
                .progress_chars("##-"),
        );
        pb.set_message("collecting overviews ...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut overviews = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        debug!("fetching overview for {symbol}");

        let overview: Overview = http::get(
            &client,
            OVERVIEW_URL,
            None,
            Some(&[
                ("function", "OVERVIEW"),
                ("symbol", symbol.as_str()),
                ("apikey", key.as_str()),
            ]),
        )
        .await?
        .json()
        .await
        .map_err(|err| {
            error!("failed to deserialize overview for {symbol}, error({err})");
            err
        })?;

        overviews.push(overview);
        pb.inc(1);
    }

    pb.finish_and_clear();
    if tui {
        println!("collecting overviews ... done\n");
    }

    info!(
        "{} company overviews collected, {}",
        overviews.len(),
        crate::time_elapsed(time)
    );

    Ok(overviews)
}

// de
// ----------------------------------------------------------------------------

/// Company overview as returned by the Alpha Vantage `OVERVIEW` function.
///
/// Numeric fields arrive as strings and are kept that way; nothing
/// downstream computes with them.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Overview {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub market_capitalization: String,
    #[serde(rename = "PERatio")]
    pub pe_ratio: String,
    pub dividend_yield: String,
}

/////////////////////////////////////////////////////////////////////////////////
// tests
/////////////////////////////////////////////////////////////////////////////////
