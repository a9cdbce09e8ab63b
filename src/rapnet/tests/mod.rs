//! Unit tests for the RapNet API module.


use crate::config::Config;
use crate::rapnet::RapNetApi;
use std::path::PathBuf;

/// API client pointed at a wiremock server.
pub(crate) fn api_with_mock(mock_uri: &str) -> RapNetApi {
    let config = Config {
        token: "test_token".to_string(),
        saved_searches: vec!["MyList".to_string()],
        size_ranges: vec![],
        colors: vec![],
        clarities: vec![],
        base_url: mock_uri.to_string(),
        filter_template: PathBuf::from("filter.json"),
    };
    RapNetApi::new(&config).unwrap()
}
