// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Passive Detection Engine
 * Inspects already-captured HTTP request/response pairs for security
 * weaknesses without sending any probe traffic.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

pub mod classifier;
pub mod errors;
pub mod message;
pub mod registry;
pub mod tags;
pub mod types;

// Detector modules
pub mod detectors;

pub use errors::EngineError;
pub use message::{HttpMessage, HttpRequest, HttpResponse, ParamOrigin, Parameter};
pub use registry::DetectorRegistry;
pub use types::{Alert, AlertBuilder, AlertSink, AlertThreshold, Confidence, Risk};
