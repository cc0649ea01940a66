use super::listings::Sector;
use crate::http::{self, HttpClient};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};
use serde::Deserialize;
use tracing::{error, trace};

// search endpoint = `https://www.psx.com.pk/psx/custom-templates/companiesSearch-sector`,
// per sector; requires the XID session token from the listings page

pub(crate) const SEARCH_COMPANY_URL: &str =
    "https://www.psx.com.pk/psx/custom-templates/companiesSearch-sector";

// the endpoint only answers AJAX-shaped requests
fn search_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        "X-Requested-With",
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(
        REFERER,
        HeaderValue::from_static(
            "https://www.psx.com.pk/psx/resources-and-tools/listings/listed-companies",
        ),
    );
    headers
}

/////////////////////////////////////////////////////////////////////////////////
// core
/////////////////////////////////////////////////////////////////////////////////

/// One company listed under a single sector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListedCompany {
    pub sector_id: String,
    pub symbol: String,
    pub name: String,
}

/// Fetch all companies listed under `sector`.
pub async fn fetch_sector_companies(
    client: &HttpClient,
    url: &str,
    sector: &Sector,
    xid: &str,
) -> anyhow::Result<Vec<ListedCompany>> {
    trace!("fetching companies for sector [{}] {}", sector.id, sector.name);

    let response = http::get(
        client,
        url,
        Some(search_headers()),
        Some(&[("sector", sector.id.as_str()), ("XID", xid)]),
    )
    .await?;

    let rows: Vec<CompanyRow> = response.json().await.map_err(|err| {
        error!(
            "failed to deserialize companies for sector [{}] {}, error({err})",
            sector.id, sector.name
        );
        err
    })?;

    Ok(into_companies(&sector.id, rows))
}

// de
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CompanyRow {
    symbol_code: String,
    company_name: String,
}

fn into_companies(sector_id: &str, rows: Vec<CompanyRow>) -> Vec<ListedCompany> {
    rows.into_iter()
        .map(|row| ListedCompany {
            sector_id: sector_id.to_string(),
            symbol: row.symbol_code,
            name: row.company_name,
        })
        .collect()
}

/////////////////////////////////////////////////////////////////////////////////
// tests
/////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_map_into_listed_companies() {
        let rows: Vec<CompanyRow> = serde_json::from_str(
            r#"[
                {"symbol_code": "HBL", "company_name": "Habib Bank Limited"},
                {"symbol_code": "MCB", "company_name": "MCB Bank Limited"}
            ]"#,
        )
        .unwrap();

        let companies = into_companies("1", rows);
        assert_eq!(
            companies,
            vec![
                ListedCompany {
                    sector_id: "1".into(),
                    symbol: "HBL".into(),
                    name: "Habib Bank Limited".into()
                },
                ListedCompany {
                    sector_id: "1".into(),
                    symbol: "MCB".into(),
                    name: "MCB Bank Limited".into()
                },
            ]
        );
    }

    #[test]
    fn row_missing_a_field_fails_deserialization() {
        let malformed = r#"[{"symbol_code": "HBL"}]"#;
        assert!(serde_json::from_str::<Vec<CompanyRow>>(malformed).is_err());
    }
}
