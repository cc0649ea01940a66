use super::companies::{self, ListedCompany};
use crate::http;
use crate::FetchMode;
use futures::future;
use indicatif::{ProgressBar, ProgressStyle};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, error, info, trace};

// listings page = `https://www.psx.com.pk/psx/resources-and-tools/listings/listed-companies`
//
// The page embeds a session token (XID) in a hidden input, plus a sector
// <select>; one search call per sector value returns that sector's
// companies as JSON. The token and sector set are scoped to a single run.

const COMPANY_LISTINGS_URL: &str =
    "https://www.psx.com.pk/psx/resources-and-tools/listings/listed-companies";

const SECTOR_CONTAINER_CLASS: &str = "notice-update-div";

// the "all sectors" placeholder option, always excluded
const ALL_SECTORS_SENTINEL: &str = "0";

/////////////////////////////////////////////////////////////////////////////////
// core
/////////////////////////////////////////////////////////////////////////////////

/// Collect every listed company, grouped by sector, from the live PSX
/// endpoints.
pub async fn scrape(mode: FetchMode, tui: bool) -> anyhow::Result<Vec<ListedCompany>> {
    scrape_from(
        COMPANY_LISTINGS_URL,
        companies::SEARCH_COMPANY_URL,
        mode,
        tui,
    )
    .await
}

/// Same flow against caller-supplied endpoints.
pub async fn scrape_from(
    listings_url: &str,
    search_url: &str,
    mode: FetchMode,
    tui: bool,
) -> anyhow::Result<Vec<ListedCompany>> {
    let time = std::time::Instant::now();
    let client = crate::std_client_build();

    if tui {
        println!(
            "{bar}\n{name:^40}\n{bar}",
            bar = "=".repeat(40),
            name = "PSX Listed Companies"
        );
    }

    debug!("fetching PSX listings page");
    let page = http::get(&client, listings_url, None, None)
        .await?
        .text()
        .await
        .map_err(|err| {
            error!("failed to read listings page body, error({err})");
            err
        })?;
    trace!("listings page fetched ({} bytes)", page.len());

    let (xid, sectors) = parse_listings(&page)?;
    debug!("session token extracted; {} sectors found", sectors.len());

    // progress bar
    let pb = if tui {
        let pb = ProgressBar::new(sectors.len() as u64).with_style(
            ProgressStyle::default_bar()
                .template(
                    "{msg} {spinner:.magenta}\n\
                    [{elapsed_precise:.magenta}] |{bar:40.cyan/blue}| {human_pos}/{human_len} \
                    [Rate: {per_sec:.magenta}, ETA: {eta:.blue}]",
                )?
                .progress_chars("##-"),
        );
        pb.set_message("collecting companies per sector ...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };

    let companies = match mode {
        FetchMode::Serial => {
            let mut all = Vec::new();
            for sector in &sectors {
                all.extend(
                    companies::fetch_sector_companies(&client, search_url, sector, &xid).await?,
                );
                pb.inc(1);
            }
            all
        }
        FetchMode::Concurrent => {
            // unbounded fan-out; results are only aggregated once every
            // sector call has completed
            let results = future::try_join_all(sectors.iter().map(|sector| {
                let client = &client;
                let pb = pb.clone();
                let xid = &xid;
                async move {
                    let found =
                        companies::fetch_sector_companies(client, search_url, sector, xid).await?;
                    pb.inc(1);
                    Ok::<_, anyhow::Error>(found)
                }
            }))
            .await?;
            results.into_iter().flatten().collect()
        }
    };

    pb.finish_and_clear();
    if tui {
        println!("collecting companies per sector ... done\n");
    }

    info!(
        "{} listed companies collected across {} sectors, {}",
        companies.len(),
        sectors.len(),
        crate::time_elapsed(time)
    );

    Ok(companies)
}

/////////////////////////////////////////////////////////////////////////////////
// parsing
/////////////////////////////////////////////////////////////////////////////////

/// An industry classification grouping listed companies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sector {
    pub id: String,
    pub name: String,
}

/// Failures while pulling the session token and sector list out of the
/// listings page.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("element with class `{0}` not found in the listings page")]
    MissingContainer(&'static str),

    #[error("`XID` input field not found in the sector container")]
    MissingXid,

    #[error("`XID` input field is present but has no value")]
    EmptyXid,

    #[error("sector `<select>` not found in the sector container")]
    MissingSectorSelect,

    #[error("sector `<select>` contains no options")]
    NoSectors,
}

/// Extract the session token and the sector list from the listings page
/// HTML.
pub fn parse_listings(html: &str) -> Result<(String, Vec<Sector>), ParseError> {
    let doc = Html::parse_document(html);
    let container = sector_container(&doc)?;
    let xid = extract_xid(&container)?;
    let sectors = extract_sectors(&container)?;
    Ok((xid, sectors))
}

// the unique element holding both the token input and the sector select
fn sector_container(doc: &Html) -> Result<ElementRef<'_>, ParseError> {
    let selector =
        Selector::parse(&format!(".{SECTOR_CONTAINER_CLASS}")).expect("valid container selector");
    doc.select(&selector)
        .next()
        .ok_or(ParseError::MissingContainer(SECTOR_CONTAINER_CLASS))
}

fn extract_xid(container: &ElementRef<'_>) -> Result<String, ParseError> {
    let selector = Selector::parse("input#XID").expect("valid XID selector");
    let input = container
        .select(&selector)
        .next()
        .ok_or(ParseError::MissingXid)?;

    match input.value().attr("value") {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ParseError::EmptyXid),
    }
}

fn extract_sectors(container: &ElementRef<'_>) -> Result<Vec<Sector>, ParseError> {
    let select_selector =
        Selector::parse(r#"select[name="sector"]"#).expect("valid sector select selector");
    let option_selector = Selector::parse("option").expect("valid option selector");

    let select = container
        .select(&select_selector)
        .next()
        .ok_or(ParseError::MissingSectorSelect)?;

    let options: Vec<ElementRef<'_>> = select.select(&option_selector).collect();
    if options.is_empty() {
        return Err(ParseError::NoSectors);
    }

    Ok(options
        .into_iter()
        .filter_map(|option| option.value().attr("value").map(|id| (id, option)))
        .filter(|(id, _)| *id != ALL_SECTORS_SENTINEL)
        .map(|(id, option)| Sector {
            id: id.to_string(),
            name: option.text().collect::<String>().trim().to_string(),
        })
        .collect())
}

/////////////////////////////////////////////////////////////////////////////////
// tests
/////////////////////////////////////////////////////////////////////////////////
