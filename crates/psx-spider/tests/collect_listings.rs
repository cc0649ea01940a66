use psx_spider::psx::listings;
use psx_spider::FetchMode;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTINGS_PAGE: &str = r#"<html><body>
    <div class="notice-update-div">
        <input type="hidden" id="XID" value="T1">
        <select name="sector">
            <option value="0">All sectors</option>
            <option value="1">Commercial Banks</option>
            <option value="2">Cement</option>
        </select>
    </div>
</body></html>"#;

async fn mock_exchange() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTINGS_PAGE))
        .mount(&server)
        .await;

    // one company per sector; both mocks require the session token, so a
    // run that drops the XID finds no matching mock and fails
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("sector", "1"))
        .and(query_param("XID", "T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"symbol_code": "HBL", "company_name": "Habib Bank Limited"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("sector", "2"))
        .and(query_param("XID", "T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"symbol_code": "LUCK", "company_name": "Lucky Cement Limited"}
        ])))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn collects_one_company_per_sector_concurrently() {
    let server = mock_exchange().await;

    let companies = listings::scrape_from(
        &format!("{}/listings", server.uri()),
        &format!("{}/search", server.uri()),
        FetchMode::Concurrent,
        false,
    )
    .await
    .unwrap();

    assert_eq!(companies.len(), 2);

    let mut symbols: Vec<&str> = companies.iter().map(|c| c.symbol.as_str()).collect();
    symbols.sort();
    assert_eq!(symbols, vec!["HBL", "LUCK"]);

    for company in &companies {
        match company.sector_id.as_str() {
            "1" => assert_eq!(company.name, "Habib Bank Limited"),
            "2" => assert_eq!(company.name, "Lucky Cement Limited"),
            other => panic!("unexpected sector id: {other}"),
        }
    }
}

#[tokio::test]
async fn serial_mode_collects_the_same_set() {
    let server = mock_exchange().await;

    let companies = listings::scrape_from(
        &format!("{}/listings", server.uri()),
        &format!("{}/search", server.uri()),
        FetchMode::Serial,
        false,
    )
    .await
    .unwrap();

    assert_eq!(companies.len(), 2);
}

#[tokio::test]
async fn get_fails_on_not_found_before_any_parsing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let result = psx_spider::http::get(
        &client,
        &format!("{}/missing", server.uri()),
        None,
        None,
    )
    .await;

    let err = result.unwrap_err();
    let status = err
        .downcast_ref::<reqwest::Error>()
        .and_then(|err| err.status());
    assert_eq!(status, Some(reqwest::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn one_failing_sector_aborts_the_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTINGS_PAGE))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("sector", "1"))
        .and(query_param("XID", "T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"symbol_code": "HBL", "company_name": "Habib Bank Limited"}
        ])))
        .mount(&server)
        .await;

    // sector 2 has no mock; wiremock answers 404
    let result = listings::scrape_from(
        &format!("{}/listings", server.uri()),
        &format!("{}/search", server.uri()),
        FetchMode::Concurrent,
        false,
    )
    .await;

    assert!(result.is_err());
}
