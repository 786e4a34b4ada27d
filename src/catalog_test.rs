use super::*;

fn search_body(items: serde_json::Value) -> String {
    serde_json::json!({
        "status": 200,
        "response": { "items": { "current_page": 1, "data": items } }
    })
    .to_string()
}

#[test]
fn parse_search_items() {
    let json = search_body(serde_json::json!([
        { "uuid": "a1", "name": "heart", "urls": { "thumb": "https://cdn.test/a1.png", "original": "x" } },
        { "uuid": "b2", "urls": { "thumb": "https://cdn.test/b2.png" } }
    ]));
    let items = parse_search_response(&json).unwrap();
    assert_eq!(
        items,
        vec![
            CatalogItem { id: "a1".into(), thumbnail_url: "https://cdn.test/a1.png".into() },
            CatalogItem { id: "b2".into(), thumbnail_url: "https://cdn.test/b2.png".into() },
        ]
    );
}

#[test]
fn parse_search_missing_data_is_empty() {
    let json = serde_json::json!({ "response": { "items": {} } }).to_string();
    assert!(parse_search_response(&json).unwrap().is_empty());
}

#[test]
fn parse_search_invalid_json() {
    let err = parse_search_response("not json").unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn parse_search_item_without_thumb_fails() {
    let json = search_body(serde_json::json!([{ "uuid": "a1", "urls": {} }]));
    assert!(matches!(parse_search_response(&json), Err(CatalogError::Parse(_))));
}

#[test]
fn parse_asset_url() {
    let json = serde_json::json!({ "response": { "download": { "url": "https://cdn.test/a1.svg" } } }).to_string();
    assert_eq!(parse_asset_response(&json).unwrap(), AssetSource::Url("https://cdn.test/a1.svg".into()));
}

#[test]
fn parse_asset_prefers_url_over_markup() {
    let json = serde_json::json!({
        "response": { "download": { "url": "https://cdn.test/a1.svg", "svg": "<svg/>" } }
    })
    .to_string();
    assert_eq!(parse_asset_response(&json).unwrap(), AssetSource::Url("https://cdn.test/a1.svg".into()));
}

#[test]
fn parse_asset_markup_only() {
    let json = serde_json::json!({ "response": { "download": { "svg": "<svg/>" } } }).to_string();
    assert_eq!(parse_asset_response(&json).unwrap(), AssetSource::Markup("<svg/>".into()));
}

#[test]
fn parse_asset_empty_download_fails() {
    let json = serde_json::json!({ "response": { "download": {} } }).to_string();
    assert!(matches!(parse_asset_response(&json), Err(CatalogError::Parse(_))));
}

#[test]
fn client_builds_from_default_config() {
    let client = HttpCatalog::new(CatalogConfig::default()).unwrap();
    let debug = format!("{client:?}");
    assert!(debug.contains("api.iconscout.com"));
}

#[test]
fn debug_redacts_api_key() {
    let config = CatalogConfig { api_key: Some("sk-secret".into()), ..CatalogConfig::default() };
    let client = HttpCatalog::new(config).unwrap();
    let debug = format!("{client:?}");
    assert!(!debug.contains("sk-secret"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn error_messages() {
    let err = CatalogError::Response { status: 429, body: "slow down".into() };
    assert_eq!(err.to_string(), "catalog response error: status 429");
}
