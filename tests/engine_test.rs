// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Passive Engine Integration Tests
 * Whole-registry scans over captured messages
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use lonkero_passive::{
    Alert, AlertThreshold, DetectorRegistry, HttpMessage, HttpRequest, HttpResponse,
};
use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Honors RUST_LOG so detector debug output is visible when a test fails.
fn init_tracing() {
    INIT_TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn captured(uri: &str, content_type: &str, body: &str) -> HttpMessage {
    init_tracing();
    let mut response = HttpResponse::new(200);
    response
        .headers
        .push(("Content-Type".to_string(), content_type.to_string()));
    response.body = body.to_string();
    HttpMessage::new(HttpRequest::new("GET", uri), response)
}

fn sorted_for_comparison(mut alerts: Vec<Alert>) -> Vec<String> {
    let mut keys: Vec<String> = alerts
        .drain(..)
        .map(|a| serde_json::to_string(&a).unwrap())
        .collect();
    keys.sort();
    keys
}

#[test]
fn test_scan_is_idempotent() {
    let registry = DetectorRegistry::default_set().unwrap();
    let msg = captured(
        "https://example.com/i.php?name=foo",
        "text/html",
        r#"<html><body deploy="1704114087"><img src="x" onerror="alert(1);foo"></body></html>"#,
    );

    let first = registry.scan(&msg);
    let second = registry.scan(&msg);

    assert!(!first.is_empty());
    assert_eq!(
        sorted_for_comparison(first),
        sorted_for_comparison(second),
        "Identical messages yield identical alert sets"
    );
}

#[test]
fn test_reflected_event_end_to_end() {
    let registry = DetectorRegistry::default_set().unwrap();
    let msg = captured(
        "https://example.com/i.php?name=foo",
        "text/html",
        r#"<html><body><img src="x" onerror="alert(1);foo"></body></html>"#,
    );

    let alerts: Vec<Alert> = registry
        .scan(&msg)
        .into_iter()
        .filter(|a| a.plugin_id == 10043)
        .collect();

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].param.as_deref(), Some("name"));
    assert_eq!(alerts[0].evidence, "alert(1);foo");
    let info = alerts[0].other_info.as_deref().unwrap();
    assert!(info.contains("onerror"));
    assert!(info.contains("alert(1);foo"));
}

#[test]
fn test_timestamp_threshold_monotonicity_through_registry() {
    let now = chrono::Utc::now().timestamp();
    let body = format!("recent={now} older=1704114087 ancient=1000000000");

    let alert_count = |threshold: AlertThreshold| {
        let mut registry = DetectorRegistry::default_set().unwrap();
        assert!(registry.set_threshold(10096, threshold));
        registry
            .scan(&captured("https://example.com/status", "text/plain", &body))
            .into_iter()
            .filter(|a| a.plugin_id == 10096)
            .count()
    };

    let low = alert_count(AlertThreshold::Low);
    let medium = alert_count(AlertThreshold::Medium);
    let high = alert_count(AlertThreshold::High);

    assert!(low >= medium && medium >= high, "{low} >= {medium} >= {high}");
    assert_eq!(low, 3);
    assert_eq!(medium, 2);
    assert_eq!(high, 1);
}

#[test]
fn test_timestamp_boundary_cases() {
    let registry = DetectorRegistry::default_set().unwrap();

    let alerts = registry.scan(&captured(
        "https://example.com/a",
        "text/plain",
        "t=1704114087",
    ));
    let timestamps: Vec<&Alert> = alerts.iter().filter(|a| a.plugin_id == 10096).collect();
    assert_eq!(timestamps.len(), 1);
    assert_eq!(timestamps[0].evidence, "1704114087");
    assert!(timestamps[0].other_info.as_deref().unwrap().contains("2024-01-01"));

    // 8 and 9 digit numbers never match; a trailing % disqualifies
    for body in ["t=17041140", "t=170411408", "t=1704114087%"] {
        let alerts = registry.scan(&captured("https://example.com/a", "text/plain", body));
        assert!(
            alerts.iter().all(|a| a.plugin_id != 10096),
            "unexpected timestamp alert for {body:?}"
        );
    }
}

#[test]
fn test_openssl_banner_exact_membership() {
    let registry = DetectorRegistry::default_set().unwrap();

    let mut msg = captured("https://example.com/", "text/html", "<html></html>");
    msg.response.headers.push((
        "Server".to_string(),
        "Apache/2.2.22 (Debian) OpenSSL/1.0.1e".to_string(),
    ));
    let hits: Vec<Alert> = registry
        .scan(&msg)
        .into_iter()
        .filter(|a| a.plugin_id == 10034)
        .collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].evidence, "OpenSSL/1.0.1e");

    let mut msg = captured("https://example.com/", "text/html", "<html></html>");
    msg.response.headers.push((
        "Server".to_string(),
        "Apache/2.2.22 (Debian) OpenSSL/1.0.2a".to_string(),
    ));
    assert!(registry.scan(&msg).iter().all(|a| a.plugin_id != 10034));
}

#[test]
fn test_cache_control_presence_and_absence() {
    let registry = DetectorRegistry::default_set().unwrap();

    let msg = captured("https://example.com/account", "text/html", "<html>account</html>");
    let hits: Vec<Alert> = registry
        .scan(&msg)
        .into_iter()
        .filter(|a| a.plugin_id == 10015)
        .collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].evidence, "");

    let mut msg = captured("https://example.com/account", "text/html", "<html>account</html>");
    msg.response.headers.push((
        "Cache-Control".to_string(),
        "no-store, no-cache, must-revalidate".to_string(),
    ));
    assert!(registry.scan(&msg).iter().all(|a| a.plugin_id != 10015));
}

#[test]
fn test_no_parameter_short_circuit_with_matching_attributes() {
    let registry = DetectorRegistry::default_set().unwrap();
    let msg = captured(
        "https://example.com/static.html",
        "text/html",
        r#"<html><body onload="init()"><img onerror="alert(1)"></body></html>"#,
    );
    assert!(registry.scan(&msg).iter().all(|a| a.plugin_id != 10043));
}

#[test]
fn test_alert_serialization_shape() {
    let registry = DetectorRegistry::default_set().unwrap();
    let msg = captured("https://example.com/account", "text/html", "<html>account</html>");
    let alerts = registry.scan(&msg);
    assert!(!alerts.is_empty());

    let json = serde_json::to_value(&alerts[0]).unwrap();
    assert!(json.get("pluginId").is_some());
    assert!(json.get("cweId").is_some());
    assert!(json.get("risk").is_some());
}
