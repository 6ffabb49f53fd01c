// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Cache-Control Detector
 * Flags secure-channel content served without the directives that keep
 * it out of shared and browser caches
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use once_cell::sync::Lazy;
use tracing::debug;

use crate::classifier;
use crate::message::HttpMessage;
use crate::tags::{self, TagMap};
use crate::types::{Alert, AlertBuilder, AlertSink, AlertThreshold, Confidence, Risk};

use super::PassiveDetector;

pub const PLUGIN_ID: u32 = 10015;
const NAME: &str = "Re-examine Cache-control Directives";
const CACHE_CONTROL_HEADER: &str = "Cache-Control";

static ALERT_TAGS: Lazy<TagMap> = Lazy::new(|| {
    tags::tag_map(&[
        tags::WSTG_V42_ATHN_06_CACHE_WEAKNESS,
        (tags::POLICY_PENTEST, ""),
    ])
});

pub struct CacheControlDetector {
    threshold: AlertThreshold,
}

impl CacheControlDetector {
    pub fn new() -> Self {
        Self {
            threshold: AlertThreshold::default(),
        }
    }

    pub fn with_threshold(threshold: AlertThreshold) -> Self {
        Self { threshold }
    }

    fn build_alert(&self, evidence: &str) -> AlertBuilder {
        AlertBuilder::new(PLUGIN_ID, NAME)
            .risk(Risk::Info)
            .confidence(Confidence::Low)
            .description(
                "The cache-control header has not been set properly or is \
                 missing, allowing the browser and proxies to cache content \
                 that was served over a secure channel.",
            )
            .param(CACHE_CONTROL_HEADER)
            .solution(
                "For secure content, ensure the cache-control HTTP header is \
                 set with \"no-cache, no-store, must-revalidate\".",
            )
            .references(
                "https://cheatsheetseries.owasp.org/cheatsheets/Session_Management_Cheat_Sheet.html#web-content-caching",
            )
            .evidence(evidence)
            // CWE-525: Use of Web Browser Cache Containing Sensitive
            // Information
            .cwe_id(525)
            .wasc_id(13)
    }
}

impl Default for CacheControlDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PassiveDetector for CacheControlDetector {
    fn plugin_id(&self) -> u32 {
        PLUGIN_ID
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn alert_tags(&self) -> &'static TagMap {
        &ALERT_TAGS
    }

    fn threshold(&self) -> AlertThreshold {
        self.threshold
    }

    fn set_threshold(&mut self, threshold: AlertThreshold) {
        self.threshold = threshold;
    }

    fn inspect(&self, msg: &HttpMessage, sink: &mut dyn AlertSink) {
        if !msg.request.is_secure()
            || msg.response.body.is_empty()
            || msg.request.method.eq_ignore_ascii_case("POST")
            || classifier::is_image(msg)
        {
            return;
        }

        // Covers HTML, XML, JSON and TEXT while excluding JS and CSS
        let status = msg.response.status_code;
        if self.threshold != AlertThreshold::Low
            && (classifier::is_redirect(status)
                || classifier::is_client_error(status)
                || classifier::is_server_error(status)
                || !classifier::is_text(msg)
                || classifier::is_javascript(msg)
                || classifier::is_css(msg))
        {
            return;
        }

        let cache_control = msg
            .response
            .header_values(CACHE_CONTROL_HEADER)
            .join(", ")
            .to_lowercase();

        // Any single absent directive is sufficient cause: the OR is
        // deliberate and must not be tightened to require all three missing
        if cache_control.is_empty()
            || !cache_control.contains("no-store")
            || !cache_control.contains("no-cache")
            || !cache_control.contains("must-revalidate")
        {
            debug!("Cache-Control directives incomplete on {}", msg.request.uri);
            sink.raise(self.build_alert(&cache_control).build());
        }
    }

    fn example_alerts(&self) -> Vec<Alert> {
        vec![self.build_alert("no-store, must-revalidate").build()]
    }
}
