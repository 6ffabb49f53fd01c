// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Passive Engine Error Types
 * Startup and contract-violation errors with thiserror
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use thiserror::Error;

/// Errors raised while assembling the detector registry.
///
/// These are programming-contract violations caught at startup; a running
/// scan never produces them. Per-message inspection treats absent or
/// malformed data as "no finding" and returns quietly.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Two detectors were registered with the same plugin id
    #[error("Duplicate plugin id {plugin_id}: {first} and {second}")]
    DuplicatePluginId {
        plugin_id: u32,
        first: String,
        second: String,
    },

    /// A detector was registered with incomplete static metadata
    #[error("Invalid metadata for plugin {plugin_id}: {reason}")]
    InvalidMetadata { plugin_id: u32, reason: String },

    /// Registry built with no detectors at all
    #[error("Detector registry is empty")]
    EmptyRegistry,
}
