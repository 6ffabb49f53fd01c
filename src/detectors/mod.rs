// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Passive Detectors
 * One module per detector; each implements a matching algorithm against
 * a single captured message and raises alerts into the supplied sink
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use crate::message::HttpMessage;
use crate::tags::TagMap;
use crate::types::{Alert, AlertSink, AlertThreshold};

pub mod cache_control;
pub mod openssl_version_banner;
pub mod permissions_policy;
pub mod timestamp_disclosure;
pub mod user_controlled_js_event;

pub use cache_control::CacheControlDetector;
pub use openssl_version_banner::OpensslVersionBannerDetector;
pub use permissions_policy::PermissionsPolicyDetector;
pub use timestamp_disclosure::TimestampDisclosureDetector;
pub use user_controlled_js_event::UserControlledJsEventDetector;

/// A passive detector: static metadata, a configurable alert threshold and
/// one synchronous `inspect` pass over a captured message.
///
/// Invocations are self-contained. A detector holds no state across calls
/// beyond its immutable configuration, so the registry may run detectors
/// concurrently across different messages.
pub trait PassiveDetector: Send + Sync {
    /// Stable integer identity, globally unique across all detectors.
    /// External reporting correlates repeated findings by this id.
    fn plugin_id(&self) -> u32;

    /// Human-readable detector name.
    fn name(&self) -> &'static str;

    /// Policy/classification tags consumed by external reporting.
    fn alert_tags(&self) -> &'static TagMap;

    fn threshold(&self) -> AlertThreshold;

    /// Injected by the hosting registry before a scan run.
    fn set_threshold(&mut self, threshold: AlertThreshold);

    /// Inspect one fully-received message, raising zero or more alerts as
    /// they are found. Absent or malformed data is "no finding", never an
    /// error.
    fn inspect(&self, msg: &HttpMessage, sink: &mut dyn AlertSink);

    /// One fully-populated example alert per distinct variant this detector
    /// can raise, built from fixed inputs. Used to validate metadata
    /// completeness independent of any live scan.
    fn example_alerts(&self) -> Vec<Alert>;
}
