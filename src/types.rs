// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Passive Alert Model
 * Structured findings with risk, confidence, evidence and remediation
 * metadata, plus the builder detectors assemble them with
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use serde::{Deserialize, Serialize};

/// Severity of a finding. Fixed per detector variant, never derived from
/// message content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Risk {
    Info,
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Risk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Risk::Info => write!(f, "INFO"),
            Risk::Low => write!(f, "LOW"),
            Risk::Medium => write!(f, "MEDIUM"),
            Risk::High => write!(f, "HIGH"),
        }
    }
}

/// How certain the detector is about a finding. Independent of Risk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
    Confirmed,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "LOW"),
            Confidence::Medium => write!(f, "MEDIUM"),
            Confidence::High => write!(f, "HIGH"),
            Confidence::Confirmed => write!(f, "CONFIRMED"),
        }
    }
}

/// Strictness dial for a detector: Low trades precision for recall, High
/// the other way around. The same pattern match is filtered at different
/// strictness rather than re-scanned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertThreshold {
    Low,
    #[default]
    Medium,
    High,
}

impl AlertThreshold {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertThreshold::Low => "low",
            AlertThreshold::Medium => "medium",
            AlertThreshold::High => "high",
        }
    }
}

/// One structured finding. Atomic: fully populated before it crosses the
/// engine boundary, or never raised at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub plugin_id: u32,
    pub name: String,
    pub risk: Risk,
    pub confidence: Confidence,
    pub description: String,
    pub solution: String,
    pub references: String,
    pub cwe_id: u32,
    pub wasc_id: u32,
    /// The literal substring that justified the finding; "" when the
    /// finding is about something absent rather than present.
    pub evidence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_info: Option<String>,
    /// Sub-identifier for detectors with more than one distinct finding
    /// variant, e.g. "10063-2" for the deprecated-header case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_ref: Option<String>,
}

/// Pure assembly of an [`Alert`] from a detector's static metadata plus the
/// per-finding variable fields. No I/O, no defaults beyond the optionals.
#[derive(Debug, Clone)]
pub struct AlertBuilder {
    alert: Alert,
}

impl AlertBuilder {
    pub fn new(plugin_id: u32, name: impl Into<String>) -> Self {
        Self {
            alert: Alert {
                plugin_id,
                name: name.into(),
                risk: Risk::Info,
                confidence: Confidence::Low,
                description: String::new(),
                solution: String::new(),
                references: String::new(),
                cwe_id: 0,
                wasc_id: 0,
                evidence: String::new(),
                param: None,
                other_info: None,
                alert_ref: None,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.alert.name = name.into();
        self
    }

    pub fn risk(mut self, risk: Risk) -> Self {
        self.alert.risk = risk;
        self
    }

    pub fn confidence(mut self, confidence: Confidence) -> Self {
        self.alert.confidence = confidence;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.alert.description = description.into();
        self
    }

    pub fn solution(mut self, solution: impl Into<String>) -> Self {
        self.alert.solution = solution.into();
        self
    }

    pub fn references(mut self, references: impl Into<String>) -> Self {
        self.alert.references = references.into();
        self
    }

    pub fn cwe_id(mut self, cwe_id: u32) -> Self {
        self.alert.cwe_id = cwe_id;
        self
    }

    pub fn wasc_id(mut self, wasc_id: u32) -> Self {
        self.alert.wasc_id = wasc_id;
        self
    }

    pub fn evidence(mut self, evidence: impl Into<String>) -> Self {
        self.alert.evidence = evidence.into();
        self
    }

    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.alert.param = Some(param.into());
        self
    }

    pub fn other_info(mut self, other_info: impl Into<String>) -> Self {
        self.alert.other_info = Some(other_info.into());
        self
    }

    pub fn alert_ref(mut self, alert_ref: impl Into<String>) -> Self {
        self.alert.alert_ref = Some(alert_ref.into());
        self
    }

    pub fn build(self) -> Alert {
        self.alert
    }
}

/// Where detectors hand findings as they are found. The hosting pipeline
/// supplies the real sink; `Vec<Alert>` works for collection and tests.
pub trait AlertSink {
    fn raise(&mut self, alert: Alert);
}

impl AlertSink for Vec<Alert> {
    fn raise(&mut self, alert: Alert) {
        self.push(alert);
    }
}
