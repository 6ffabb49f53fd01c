// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Timestamp Disclosure Detector
 * Finds bare Unix timestamps leaked in response headers and bodies.
 * These may reveal deploy times, session issue times or internal clocks.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use chrono::{DateTime, Months, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::classifier;
use crate::message::HttpMessage;
use crate::tags::{self, TagMap};
use crate::types::{Alert, AlertBuilder, AlertSink, AlertThreshold, Confidence, Risk};

use super::PassiveDetector;

pub const PLUGIN_ID: u32 = 10096;
const NAME: &str = "Timestamp Disclosure";

// 8-digit values match CSS RGBA colors and 9-digit values only reach
// September 2001, so only 10 digits are worth looking at. The upper bound is
// the posix clock rollover, 2147483647.
//
// The regex crate has no lookahead, so a trailing % (a percentage, not a
// timestamp) is rejected with a byte check after each match.
static UNIX_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:1\d|2[0-2])\d{8}\b").unwrap());

const EPOCH_Y2038: i64 = 2_147_483_647;

/// Response headers that routinely carry numeric-but-not-timestamp values.
const RESPONSE_HEADERS_TO_IGNORE: &[&str] = &[
    "Keep-Alive",
    "Cache-Control",
    "ETag",
    "Age",
    "Strict-Transport-Security",
    "Report-To",
    "NEL",
    "Expect-CT",
    "RateLimit-Reset",
    "X-RateLimit-Reset",
    "X-Rate-Limit-Reset",
];

/// Plausibility windows, epoch seconds, fixed at first use.
struct Windows {
    range_start: i64,
    range_stop: i64,
    one_year_ago: i64,
    one_year_from_now: i64,
}

static WINDOWS: Lazy<Windows> = Lazy::new(|| {
    let now = Utc::now();
    Windows {
        range_start: now.checked_sub_months(Months::new(120)).unwrap().timestamp(),
        range_stop: EPOCH_Y2038.min(now.checked_add_months(Months::new(120)).unwrap().timestamp()),
        one_year_ago: now.checked_sub_months(Months::new(12)).unwrap().timestamp(),
        one_year_from_now: now.checked_add_months(Months::new(12)).unwrap().timestamp(),
    }
});

static ALERT_TAGS: Lazy<TagMap> = Lazy::new(|| {
    tags::tag_map(&[
        tags::OWASP_2021_A01_BROKEN_AC,
        tags::OWASP_2017_A03_DATA_EXPOSED,
        (tags::POLICY_PENTEST, ""),
    ])
});

pub struct TimestampDisclosureDetector {
    threshold: AlertThreshold,
}

impl TimestampDisclosureDetector {
    pub fn new() -> Self {
        Self {
            threshold: AlertThreshold::default(),
        }
    }

    pub fn with_threshold(threshold: AlertThreshold) -> Self {
        Self { threshold }
    }

    fn is_ignored_header(name: &str) -> bool {
        RESPONSE_HEADERS_TO_IGNORE
            .iter()
            .any(|ignored| ignored.eq_ignore_ascii_case(name))
    }

    /// True when the parsed value survives the threshold's window. Low
    /// accepts every pattern match; the default accepts now +/- 10 years
    /// capped at the 2038 rollover; High narrows to now +/- 1 year.
    fn accepts(&self, seconds: i64) -> bool {
        let w = &*WINDOWS;
        if self.threshold != AlertThreshold::Low
            && (seconds < w.range_start || seconds > w.range_stop)
        {
            return false;
        }
        if self.threshold == AlertThreshold::High
            && !(seconds > w.one_year_ago && seconds < w.one_year_from_now)
        {
            return false;
        }
        true
    }

    fn build_alert(&self, evidence: &str, param: &str, seconds: i64) -> AlertBuilder {
        let formatted = DateTime::<Utc>::from_timestamp(seconds, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        AlertBuilder::new(PLUGIN_ID, format!("{} - Unix", NAME))
            .risk(Risk::Low)
            .confidence(Confidence::Low)
            .description(
                "The response contains what appears to be a Unix timestamp. \
                 Timestamps may disclose deployment times or other information \
                 useful to an attacker - Unix",
            )
            .param(param)
            .other_info(format!("{}, which evaluates to: {} UTC", evidence, formatted))
            .solution("Manually confirm that the timestamp data is not sensitive, and that the data cannot be aggregated to disclose exploitable patterns.")
            .references("https://cwe.mitre.org/data/definitions/200.html")
            .evidence(evidence)
            // CWE-497: Exposure of Sensitive System Information to an
            // Unauthorized Control Sphere
            .cwe_id(497)
            .wasc_id(13)
    }
}

impl Default for TimestampDisclosureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PassiveDetector for TimestampDisclosureDetector {
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
        if classifier::is_font(msg)
            || (self.threshold == AlertThreshold::High && classifier::is_javascript(msg))
        {
            return;
        }

        debug!("Checking message {} for timestamps", msg.request.uri);

        // Every response header minus the ignore list, plus a synthetic
        // empty-name field for the body.
        let mut parts: Vec<(&str, &str)> = msg
            .response
            .headers
            .iter()
            .filter(|(name, _)| !Self::is_ignored_header(name))
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        parts.push(("", msg.response.body.as_str()));

        for (name, haystack) in parts {
            for m in UNIX_TIMESTAMP.find_iter(haystack) {
                // A trailing % means a percentage, not a timestamp
                if haystack.as_bytes().get(m.end()) == Some(&b'%') {
                    continue;
                }
                let evidence = m.as_str();
                // Values past i32::MAX are not valid second-epoch timestamps
                let seconds = match evidence.parse::<i32>() {
                    Ok(seconds) => i64::from(seconds),
                    Err(_) => continue,
                };
                if !self.accepts(seconds) {
                    continue;
                }
                debug!("Found a Unix timestamp candidate: {}", evidence);
                sink.raise(self.build_alert(evidence, name, seconds).build());
                // No early exit: every timestamp in the message is reported
            }
        }
    }

    fn example_alerts(&self) -> Vec<Alert> {
        vec![self
            .build_alert("1704114087", "registeredAt", 1_704_114_087)
            .build()]
    }
}
