// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Detector Registry
 * Owns the detector set, validates its static metadata at startup and
 * runs every detector once per captured message
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use std::collections::HashMap;
use tracing::{debug, info};

use crate::detectors::{
    CacheControlDetector, OpensslVersionBannerDetector, PassiveDetector,
    PermissionsPolicyDetector, TimestampDisclosureDetector, UserControlledJsEventDetector,
};
use crate::errors::EngineError;
use crate::message::HttpMessage;
use crate::types::{Alert, AlertSink, AlertThreshold};

pub struct DetectorRegistry {
    detectors: Vec<Box<dyn PassiveDetector>>,
}

impl DetectorRegistry {
    /// Build a registry from an explicit detector set. Contract violations
    /// (empty set, duplicate plugin ids, incomplete metadata) are fatal here,
    /// never mid-scan.
    pub fn new(detectors: Vec<Box<dyn PassiveDetector>>) -> Result<Self, EngineError> {
        if detectors.is_empty() {
            return Err(EngineError::EmptyRegistry);
        }

        let mut seen: HashMap<u32, &'static str> = HashMap::new();
        for detector in &detectors {
            let plugin_id = detector.plugin_id();
            if detector.name().is_empty() {
                return Err(EngineError::InvalidMetadata {
                    plugin_id,
                    reason: "empty detector name".to_string(),
                });
            }
            if let Some(first) = seen.insert(plugin_id, detector.name()) {
                return Err(EngineError::DuplicatePluginId {
                    plugin_id,
                    first: first.to_string(),
                    second: detector.name().to_string(),
                });
            }
        }

        info!("Detector registry initialized with {} detectors", detectors.len());
        Ok(Self { detectors })
    }

    /// The full built-in detector set at the default threshold.
    pub fn default_set() -> Result<Self, EngineError> {
        Self::new(vec![
            Box::new(TimestampDisclosureDetector::new()),
            Box::new(UserControlledJsEventDetector::new()),
            Box::new(CacheControlDetector::new()),
            Box::new(PermissionsPolicyDetector::new()),
            Box::new(OpensslVersionBannerDetector::new()),
        ])
    }

    pub fn detectors(&self) -> impl Iterator<Item = &dyn PassiveDetector> {
        self.detectors.iter().map(|d| d.as_ref())
    }

    /// Set the alert threshold of one detector ahead of a scan run. Returns
    /// false when no detector carries that plugin id.
    pub fn set_threshold(&mut self, plugin_id: u32, threshold: AlertThreshold) -> bool {
        for detector in &mut self.detectors {
            if detector.plugin_id() == plugin_id {
                detector.set_threshold(threshold);
                return true;
            }
        }
        false
    }

    /// Run every detector against one captured message, raising alerts into
    /// the supplied sink as they are found. Detectors are independent; no
    /// ordering between them is guaranteed or required.
    pub fn scan_into(&self, msg: &HttpMessage, sink: &mut dyn AlertSink) {
        for detector in &self.detectors {
            debug!("Running detector {} ({})", detector.name(), detector.plugin_id());
            detector.inspect(msg, sink);
        }
    }

    /// Convenience wrapper collecting the alerts of one message scan.
    pub fn scan(&self, msg: &HttpMessage) -> Vec<Alert> {
        let mut alerts = Vec::new();
        self.scan_into(msg, &mut alerts);
        alerts
    }
}
