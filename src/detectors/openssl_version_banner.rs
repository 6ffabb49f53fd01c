// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - OpenSSL Version Banner Detector
 * Matches Server header banners against the OpenSSL versions vulnerable
 * to Heartbleed (CVE-2014-0160)
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::message::HttpMessage;
use crate::tags::{self, TagMap};
use crate::types::{Alert, AlertBuilder, AlertSink, AlertThreshold, Confidence, Risk};

use super::PassiveDetector;

pub const PLUGIN_ID: u32 = 10034;
const NAME: &str = "Heartbleed OpenSSL Vulnerability (Indicative)";
const CVE: &str = "CVE-2014-0160";

/// Banner pattern for Apache-style Server headers. Nginx has no equivalent
/// banner, so there is nothing to match there.
static OPENSSL_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(OpenSSL/([0-9.]+[a-z0-9-]+))").unwrap());

/// Known-vulnerable versions per https://nvd.nist.gov/vuln/detail/CVE-2014-0160.
/// Deliberately an enumerated list compared by exact string equality: vendor
/// back-ports make naive range comparison unsafe.
const VULNERABLE_VERSIONS: &[&str] = &[
    "1.0.1-Beta1",
    "1.0.1-Beta2",
    "1.0.1-Beta3",
    "1.0.1",
    "1.0.1a",
    "1.0.1b",
    "1.0.1c",
    "1.0.1d",
    "1.0.1e",
    "1.0.1f",
    // Not in the NVD entry, but reported elsewhere to be vulnerable
    "1.0.2-beta",
];

static ALERT_TAGS: Lazy<TagMap> = Lazy::new(|| {
    let mut map = tags::tag_map(&[
        tags::OWASP_2021_A06_VULN_COMP,
        tags::OWASP_2017_A09_VULN_COMP,
        tags::WSTG_V42_CRYP_01_TLS,
        (tags::POLICY_PENTEST, ""),
    ]);
    tags::put_cve(&mut map, CVE, "https://nvd.nist.gov/vuln/detail/CVE-2014-0160");
    map
});

pub struct OpensslVersionBannerDetector {
    threshold: AlertThreshold,
}

impl OpensslVersionBannerDetector {
    pub fn new() -> Self {
        Self {
            threshold: AlertThreshold::default(),
        }
    }

    pub fn with_threshold(threshold: AlertThreshold) -> Self {
        Self { threshold }
    }

    fn is_vulnerable(version: &str) -> bool {
        VULNERABLE_VERSIONS
            .iter()
            .any(|vulnerable| vulnerable.eq_ignore_ascii_case(version))
    }

    fn build_alert(&self, full_version: &str) -> AlertBuilder {
        // Suspicious rather than conclusive: the reported version could
        // carry a security back-port, hence Low confidence.
        AlertBuilder::new(PLUGIN_ID, NAME)
            .risk(Risk::High)
            .confidence(Confidence::Low)
            .description(
                "The server banner advertises an OpenSSL version vulnerable \
                 to the Heartbleed bug (CVE-2014-0160), which allows remote \
                 reads of process memory including private keys.",
            )
            .other_info(format!(
                "The server banner reports version {}, which appears in the \
                 list of builds vulnerable to Heartbleed.",
                full_version
            ))
            .solution("Upgrade OpenSSL to 1.0.1g or later, or re-compile with the handshake removed. Then revoke and re-issue any certificates whose keys may have been exposed.")
            .references("https://nvd.nist.gov/vuln/detail/CVE-2014-0160")
            .evidence(full_version)
            // CWE-119: Failure to Constrain Operations within the Bounds of
            // a Memory Buffer
            .cwe_id(119)
            // WASC-20: Improper Input Handling
            .wasc_id(20)
    }
}

impl Default for OpensslVersionBannerDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PassiveDetector for OpensslVersionBannerDetector {
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
        for value in msg.response.header_values("Server") {
            for captures in OPENSSL_VERSION.captures_iter(value) {
                let full_version = &captures[1]; // e.g. OpenSSL/1.0.1e
                let version = &captures[2]; // e.g. 1.0.1e

                if Self::is_vulnerable(version) {
                    debug!("Vulnerable OpenSSL banner on {}: {}", msg.request.uri, full_version);
                    sink.raise(self.build_alert(full_version).build());
                    // The vulnerability is binary per message; one hit is
                    // enough
                    return;
                }
            }
        }
    }

    fn example_alerts(&self) -> Vec<Alert> {
        vec![self.build_alert("OpenSSL/1.0.1e").build()]
    }
}
