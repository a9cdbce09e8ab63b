//! End-to-end run against a mock RapNet server: config → fetch → export,
//! verified by reading the written workbook back.

use std::io::Write;

use calamine::{open_workbook, Reader, Xlsx};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use diamond_export::export::write_workbooks;
use diamond_export::pipeline::fetch_listings;
use diamond_export::{Config, RapNetApi};

fn listing(company: &str, price_per_carat: f64) -> serde_json::Value {
    json!({
        "seller": {"companyName": company, "irrelevant": "dropped"},
        "location": {"countryCode": "BE"},
        "shape": "Round",
        "displaySize": "1.20",
        "color": "D",
        "clarity": "VS1",
        "cut": "EX",
        "polish": "EX",
        "symmetry": "VG",
        "displayFluorescence": "None",
        "displayPrice": {
            "displayPricePerCarat": price_per_carat,
            "displayListDiscount": "-38%",
            "displayTotalPrice": 7500
        },
        "displayDepthPercent": "61.8",
        "displayTablePercent": "57",
        "displayMeasurments": "6.80 x 6.84 x 4.22",
        "shade": null,
        "displayInclusions": "Cloud",
        "displayLabComment": "",
        "displayKeyToSymbols": "Cloud, Feather",
        "memberComment": "eye clean",
        "sellerID": 9911
    })
}

async fn mount_rapnet_mocks(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/savesearch/names"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"namesList": [
                {"id": 42, "name": "MyList"},
                {"id": 77, "name": "NotRequested"}
            ]}
        })))
        .mount(mock_server)
        .await;

    // stored filter has no size/color/clarity of its own
    Mock::given(method("POST"))
        .and(path("/savesearch/list"))
        .and(body_json(json!({
            "pageNumber": 1,
            "recordsPerPage": 1,
            "savedSearchIDs": [42]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"savedSearchList": [
                {"filter": {"shape": {"shapes": ["Round"]}}}
            ]}
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/diamondsearch/aggregations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"totalDiamondCount": 5}
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/diamondsearch/search"))
        .and(query_param("start", "1"))
        .and(query_param("size", "250"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"diamonds": [
                listing("Antwerp Gems", 5100.0),
                listing("Mumbai Stones", 5150.0),
                listing("Ramat Gan Diamonds", 5200.0),
                listing("NYC Diamond Co", 5250.0),
                listing("Dubai Gems", 5300.0)
            ]}
        })))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn full_run_writes_one_workbook_with_one_sheet() {
    let mock_server = MockServer::start().await;
    mount_rapnet_mocks(&mock_server).await;

    let work_dir = tempfile::tempdir().unwrap();
    let template_path = work_dir.path().join("filter.json");
    std::fs::write(
        &template_path,
        r#"{"pageNumber": 1, "recordsPerPage": 250, "sort": {"sortBy": "priceperct"}, "filter": {}}"#,
    )
    .unwrap();

    let config_path = work_dir.path().join("market_input.txt");
    let mut config_file = std::fs::File::create(&config_path).unwrap();
    writeln!(config_file, "token=secret-token").unwrap();
    writeln!(config_file, "load_saved_search=MyList").unwrap();
    writeln!(config_file, "size_range=1.00:1.49").unwrap();
    writeln!(config_file, "colors=D").unwrap();
    writeln!(config_file, "clarities=VS1").unwrap();
    writeln!(config_file, "base_url={}", mock_server.uri()).unwrap();
    writeln!(config_file, "filter_template={}", template_path.display()).unwrap();

    let config = Config::load(&config_path).unwrap();
    let api = RapNetApi::new(&config).unwrap();

    let results = fetch_listings(&api, &config).await;
    assert_eq!(results.combination_count(), 1);
    assert_eq!(results.listing_count(), 5);

    let output_dir = tempfile::tempdir().unwrap();
    let timestamp = "2026-08-06_09-30-00";
    let written = write_workbooks(&results, output_dir.path(), timestamp);

    assert_eq!(written.len(), 1);
    assert_eq!(
        written[0].file_name().unwrap().to_string_lossy(),
        format!("MyList100149_{timestamp}.xlsx")
    );

    let mut workbook: Xlsx<_> = open_workbook(&written[0]).unwrap();
    assert_eq!(workbook.sheet_names().to_owned(), vec!["MyListDVS1"]);

    let range = workbook.worksheet_range("MyListDVS1").unwrap();

    // summary header and values
    assert_eq!(range.get_value((0, 0)).unwrap().to_string(), "SHAPE");
    assert_eq!(range.get_value((0, 2)).unwrap().to_string(), "SIZE");
    assert_eq!(range.get_value((1, 0)).unwrap().to_string(), "Round");
    assert_eq!(range.get_value((1, 1)).unwrap().to_string(), "D");
    assert_eq!(range.get_value((1, 2)).unwrap().to_string(), "1.00 - 1.49");
    assert_eq!(range.get_value((1, 3)).unwrap().to_string(), "VS1");

    // listing header row uses the short column codes
    assert_eq!(range.get_value((3, 0)).unwrap().to_string(), "SELLER");
    assert_eq!(range.get_value((3, 1)).unwrap().to_string(), "CTY");
    assert_eq!(range.get_value((3, 2)).unwrap().to_string(), "SHAPE");
    assert_eq!(range.get_value((3, 10)).unwrap().to_string(), "$/CT");

    // five data rows
    assert_eq!(range.get_value((4, 0)).unwrap().to_string(), "Antwerp Gems");
    assert_eq!(range.get_value((8, 0)).unwrap().to_string(), "Dubai Gems");
    assert_eq!(range.get_value((4, 10)).unwrap().to_string(), "5100.0");
    assert_eq!(range.height(), 9);
}

#[tokio::test]
async fn failed_search_still_leaves_summary_sheet() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/savesearch/names"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"namesList": [{"id": 42, "name": "MyList"}]}
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/savesearch/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"savedSearchList": [{"filter": {}}]}
        })))
        .mount(&mock_server)
        .await;
    // aggregation fails; no search mock should ever be hit
    Mock::given(method("POST"))
        .and(path("/diamondsearch/aggregations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let work_dir = tempfile::tempdir().unwrap();
    let template_path = work_dir.path().join("filter.json");
    std::fs::write(&template_path, r#"{"filter": {}}"#).unwrap();

    let config_path = work_dir.path().join("market_input.txt");
    let mut config_file = std::fs::File::create(&config_path).unwrap();
    writeln!(config_file, "token=secret-token").unwrap();
    writeln!(config_file, "load_saved_search=MyList").unwrap();
    writeln!(config_file, "size_range=1.00:1.49").unwrap();
    writeln!(config_file, "colors=D").unwrap();
    writeln!(config_file, "clarities=VS1").unwrap();
    writeln!(config_file, "base_url={}", mock_server.uri()).unwrap();
    writeln!(config_file, "filter_template={}", template_path.display()).unwrap();

    let config = Config::load(&config_path).unwrap();
    let api = RapNetApi::new(&config).unwrap();

    let results = fetch_listings(&api, &config).await;
    assert_eq!(results.combination_count(), 1);
    assert_eq!(results.listing_count(), 0);

    let output_dir = tempfile::tempdir().unwrap();
    let written = write_workbooks(&results, output_dir.path(), "2026-08-06_09-30-00");
    assert_eq!(written.len(), 1);

    let mut workbook: Xlsx<_> = open_workbook(&written[0]).unwrap();
    let range = workbook.worksheet_range("MyListDVS1").unwrap();
    // summary rows only
    assert_eq!(range.height(), 2);
    assert_eq!(range.get_value((1, 3)).unwrap().to_string(), "VS1");
}
