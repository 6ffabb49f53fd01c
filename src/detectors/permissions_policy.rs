// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Permissions Policy Detector
 * Reports pages that still send the deprecated Feature-Policy header or
 * send no Permissions-Policy header at all
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use once_cell::sync::Lazy;
use std::time::Instant;
use tracing::debug;

use crate::classifier;
use crate::message::HttpMessage;
use crate::tags::{self, TagMap};
use crate::types::{Alert, AlertBuilder, AlertSink, AlertThreshold, Confidence, Risk};

use super::PassiveDetector;

pub const PLUGIN_ID: u32 = 10063;
const NAME: &str = "Permissions Policy Header Not Set";
const PERMISSIONS_POLICY_HEADER: &str = "Permissions-Policy";
const DEPRECATED_HEADER: &str = "Feature-Policy";

static ALERT_TAGS: Lazy<TagMap> = Lazy::new(|| {
    tags::tag_map(&[
        tags::OWASP_2021_A01_BROKEN_AC,
        tags::OWASP_2017_A05_BROKEN_AC,
        (tags::POLICY_PENTEST, ""),
        (tags::POLICY_QA_STD, ""),
    ])
});

pub struct PermissionsPolicyDetector {
    threshold: AlertThreshold,
}

impl PermissionsPolicyDetector {
    pub fn new() -> Self {
        Self {
            threshold: AlertThreshold::default(),
        }
    }

    pub fn with_threshold(threshold: AlertThreshold) -> Self {
        Self { threshold }
    }

    fn builder(&self) -> AlertBuilder {
        AlertBuilder::new(PLUGIN_ID, NAME)
            .risk(Risk::Low)
            .confidence(Confidence::Medium)
    }

    /// Feature-Policy was replaced by Permissions-Policy; a response still
    /// carrying it gets the dedicated variant so the remediation text names
    /// the exact condition.
    fn build_deprecated_alert(&self) -> AlertBuilder {
        self.builder()
            .name("Deprecated Feature Policy Header Set")
            .description(
                "The header has been renamed to Permissions-Policy; \
                 Feature-Policy is deprecated and support is being removed \
                 from browsers.",
            )
            .solution("Ensure that your web server, application server, load balancer, etc. is configured to set the Permissions-Policy header instead of the Feature-Policy header.")
            .references("https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Feature-Policy")
            .evidence(DEPRECATED_HEADER)
            // CWE-16: Configuration
            .cwe_id(16)
            // WASC-15: Application Misconfiguration
            .wasc_id(15)
            .alert_ref(format!("{}-2", PLUGIN_ID))
    }

    fn build_missing_alert(&self) -> AlertBuilder {
        self.builder()
            .description(
                "Permissions Policy Header is an added layer of security that \
                 helps to restrict from unauthorized access or usage of \
                 browser/client features by web resources.",
            )
            .solution("Ensure that your web server, application server, load balancer, etc. is configured to set the Permissions-Policy header.")
            .references("https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Permissions-Policy")
            // CWE-693: Protection Mechanism Failure
            .cwe_id(693)
            .wasc_id(15)
            .alert_ref(format!("{}-1", PLUGIN_ID))
    }
}

impl Default for PermissionsPolicyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PassiveDetector for PermissionsPolicyDetector {
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
        let start = Instant::now();

        if !classifier::is_html(msg) && !classifier::is_javascript(msg) {
            return;
        }
        if classifier::is_redirect(msg.response.status_code)
            && self.threshold != AlertThreshold::Low
        {
            return;
        }

        let feature_policy = msg.response.header_values(DEPRECATED_HEADER);
        let permissions_policy = msg.response.header_values(PERMISSIONS_POLICY_HEADER);
        if !feature_policy.is_empty() {
            sink.raise(self.build_deprecated_alert().build());
        } else if permissions_policy.is_empty() {
            sink.raise(self.build_missing_alert().build());
        }

        debug!(
            "Permissions policy scan of {} took {:?}",
            msg.request.uri,
            start.elapsed()
        );
    }

    fn example_alerts(&self) -> Vec<Alert> {
        vec![
            self.build_missing_alert().build(),
            self.build_deprecated_alert().build(),
        ]
    }
}
