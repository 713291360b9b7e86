//! In-process API tests.
//!
//! These tests drive the router directly through `tower::ServiceExt::oneshot`:
//! - Health, config and metrics endpoints
//! - Release name parsing
//! - Naming pattern testing, rendering and legacy migration
//! - Search result filtering

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestFixture;
use sickle_core::{Quality, SearchConfig};

// =============================================================================
// Health, config and metrics
// =============================================================================

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_config_reports_effective_settings() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/config").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["naming"]["pattern"], "%SN - %Sx%0E - %EN");
    assert_eq!(response.body["naming"]["multi_ep_style"], "repeat");
    assert_eq!(response.body["search"]["min_seeders"], 1);
    assert_eq!(response.body["search"]["quality_preference"][0], "full_hd_web_dl");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new();
    fixture.get("/api/v1/health").await;

    let response = fixture.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("sickle_http_requests_total"));
    assert!(response.text.contains("# TYPE"));
}

#[tokio::test]
async fn test_unknown_route() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/nope").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Parsing
// =============================================================================

#[tokio::test]
async fn test_parse_release() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/parse",
            json!({ "name": "Show.Name.S02E03.720p.HDTV.x264-GROUP" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = &response.body;
    assert_eq!(body["series_name"], "Show Name");
    assert_eq!(body["numbering"]["kind"], "season");
    assert_eq!(body["numbering"]["season"], 2);
    assert_eq!(body["numbering"]["episodes"], json!([3]));
    assert_eq!(body["quality"], "hd_tv");
    assert_eq!(body["release_group"], "GROUP");
    assert_eq!(body["is_proper"], false);
}

#[tokio::test]
async fn test_parse_anime_release() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/parse",
            json!({ "name": "[Tsuki] Bleach - 301 [1280x720][61D1D4EE]", "anime": true }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["numbering"]["kind"], "absolute");
    assert_eq!(response.body["numbering"]["numbers"], json!([301]));
    assert_eq!(response.body["release_group"], "Tsuki");
}

#[tokio::test]
async fn test_parse_errors() {
    let fixture = TestFixture::new();

    let response = fixture
        .post("/api/v1/parse", json!({ "name": "Just A Movie Title" }))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("could not determine episode numbering"));

    let response = fixture.post("/api/v1/parse", json!({ "name": "   " })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = fixture.post_raw("/api/v1/parse", "{not json").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Naming
// =============================================================================

#[tokio::test]
async fn test_naming_presets() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/naming/presets").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["standard"][0], "%SN - %Sx%0E - %EN");
    assert_eq!(response.body["air_by_date"].as_array().unwrap().len(), 3);
    assert_eq!(response.body["anime"], response.body["standard"]);
}

#[tokio::test]
async fn test_naming_test_valid_multi_episode() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/naming/test",
            json!({ "pattern": "%S.N.S%0SE%0E.%E.N", "multi_ep_style": "limited_extend" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["valid"], true);
    assert!(response.body.get("reason").is_none());
    assert!(response.body["sample"]["filename"]
        .as_str()
        .unwrap()
        .contains("S02E03-05"));
}

#[tokio::test]
async fn test_naming_test_invalid_pattern() {
    let fixture = TestFixture::new();

    let response = fixture
        .post("/api/v1/naming/test", json!({ "pattern": "%SN - %EN" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["valid"], false);
    assert_eq!(response.body["reason"], "unparseable");
    assert_eq!(response.body["sample"]["filename"], "Show Name - Ep Name");
}

#[tokio::test]
async fn test_naming_test_air_by_date() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/naming/test",
            json!({ "pattern": "%SN - %A.D - %EN", "air_by_date": true }),
        )
        .await;

    assert_eq!(response.body["valid"], true);
    assert_eq!(
        response.body["sample"]["filename"],
        "Show Name - 2011.03.09 - Ep Name"
    );
}

#[tokio::test]
async fn test_naming_render() {
    let fixture = TestFixture::new();
    let episode = json!({
        "show_name": "Show Name",
        "season": 2,
        "episode": 3,
        "scene_season": 2,
        "scene_episode": 3,
        "name": "Ep Name"
    });

    let response = fixture
        .post(
            "/api/v1/naming/render",
            json!({ "pattern": "Season %0S/%SN - S%0SE%0E - %EN", "episode": episode }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["directory"], "Season 02");
    assert_eq!(response.body["filename"], "Show Name - S02E03 - Ep Name");
    assert_eq!(response.body["path"], "Season 02/Show Name - S02E03 - Ep Name");

    // Without a pattern the configured one is used
    let response = fixture
        .post("/api/v1/naming/render", json!({ "episode": episode }))
        .await;
    assert_eq!(response.body["filename"], "Show Name - 2x03 - Ep Name");

    let response = fixture
        .post(
            "/api/v1/naming/render",
            json!({ "pattern": "", "episode": episode }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_naming_legacy() {
    let fixture = TestFixture::new();

    let response = fixture.post("/api/v1/naming/legacy", json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["pattern"], "%SN - %Sx%0E - %EN");
    assert_eq!(response.body["valid"], true);

    let response = fixture
        .post(
            "/api/v1/naming/legacy",
            json!({ "use_periods": true, "ep_type": 2, "season_folders_format": "Season %02d" }),
        )
        .await;
    assert_eq!(response.body["pattern"], "Season %0S/%S.N.-.S%0SE%0E.-.%E.N");
}

// =============================================================================
// Result filtering
// =============================================================================

#[tokio::test]
async fn test_filter_results() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/results/filter",
            json!({
                "hits": [
                    {
                        "title": "Show.Name.S02E03.720p.HDTV.x264-GRP",
                        "download_locator": "magnet:?xt=urn:btih:1",
                        "seeders": 10,
                        "leechers": 1
                    },
                    {
                        "title": "Show.Name.S02E04.720p.HDTV.x264-GRP",
                        "download_locator": "magnet:?xt=urn:btih:2",
                        "seeders": 10
                    },
                    {
                        "title": "Show.Name.S02E03.1080p.WEB-DL.DD5.1.H.264-LOW",
                        "download_locator": "magnet:?xt=urn:btih:3",
                        "seeders": -1
                    }
                ],
                "wanted": {
                    "show_names": ["Show Name"],
                    "numbering": { "kind": "season", "season": 2, "episodes": [3] }
                }
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = &response.body;
    assert_eq!(body["best"]["hit"]["title"], "Show.Name.S02E03.720p.HDTV.x264-GRP");
    assert_eq!(body["accepted"].as_array().unwrap().len(), 1);

    let reasons: Vec<&str> = body["rejected"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["rejection_reason"].as_str())
        .collect();
    assert!(reasons.contains(&"wrong_episode"));
    assert!(reasons.contains(&"not_enough_peers"));
}

#[tokio::test]
async fn test_filter_results_uses_configured_policy() {
    let fixture = TestFixture::with_search(SearchConfig {
        quality_preference: vec![Quality::FullHdWebDl],
        ..SearchConfig::default()
    });

    let response = fixture
        .post(
            "/api/v1/results/filter",
            json!({
                "hits": [{
                    "title": "Show.Name.S02E03.720p.HDTV.x264-GRP",
                    "download_locator": "magnet:?xt=urn:btih:1",
                    "seeders": 10
                }],
                "wanted": {
                    "show_names": ["Show Name"],
                    "numbering": { "kind": "season", "season": 2, "episodes": [3] }
                }
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("best").is_none());
    assert_eq!(
        response.body["rejected"][0]["rejection_reason"],
        "unwanted_quality"
    );
}

#[tokio::test]
async fn test_filter_results_non_seed_aware_provider() {
    let fixture = TestFixture::new();
    let hit = common::fixtures::search_hit("Show.Name.S02E03.720p.HDTV.x264-NZB", 0);

    let response = fixture
        .post(
            "/api/v1/results/filter",
            json!({
                "hits": [{ "title": hit.title, "download_locator": hit.download_locator }],
                "wanted": {
                    "show_names": ["Show Name"],
                    "numbering": { "kind": "season", "season": 2, "episodes": [3] }
                },
                "capabilities": { "seed_aware": false }
            }),
        )
        .await;

    assert_eq!(response.body["accepted"].as_array().unwrap().len(), 1);
}
