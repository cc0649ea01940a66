use crate::cli::Endpoint;
use psx_spider as spider;
use spider::FetchMode;
use tracing::info;

/// Run the requested spider processes in order.
pub(crate) async fn run(
    endpoints: Vec<Endpoint>,
    mode: FetchMode,
    symbols: Vec<String>,
    tui: bool,
) -> anyhow::Result<()> {
    let time = std::time::Instant::now();

    for endpoint in endpoints {
        match endpoint {
            Endpoint::Listings => {
                let time = std::time::Instant::now();

                let companies = spider::psx::listings::scrape(mode, tui).await?;

                info!(
                    "{} listed companies collected, time elapsed: {:?}",
                    companies.len(),
                    time.elapsed()
                );
            }
            Endpoint::Fundamentals => {
                let time = std::time::Instant::now();

                let overviews = spider::fundamentals::alpha_vantage::scrape(&symbols, tui).await?;

                info!(
                    "{} company overviews collected, time elapsed: {:?}",
                    overviews.len(),
                    time.elapsed()
                );
            }
        }
    }

    info!(
        "spider finished collecting data, time elapsed: {:?}",
        time.elapsed()
    );

    Ok(())
}
