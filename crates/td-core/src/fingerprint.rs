// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Fingerprint record and tri-state health (spec §4.6).

use std::collections::BTreeMap;

/// Health of a fingerprinted feature.
///
/// `Undetected` means the feature is absent on this host, which is not the
/// same as `Unhealthy` (present but broken) — callers that alert on
/// `Unhealthy` should not fire for hosts that never had the feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Health {
    Healthy,
    Unhealthy,
    Undetected,
}

crate::simple_display!(Health {
    Healthy => "healthy",
    Unhealthy => "unhealthy",
    Undetected => "undetected",
});

/// A single fingerprint attribute value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    String(String),
    Int(i64),
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::String(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::String(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

/// Self-describing health record a driver publishes from its fingerprint
/// subscription. `attributes` keys are dotted names (`"driver.exec"`,
/// `"jvm.version"`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FingerprintRecord {
    pub attributes: BTreeMap<String, AttributeValue>,
    pub health: Health,
    pub description: String,
}

impl FingerprintRecord {
    pub fn healthy(description: impl Into<String>) -> Self {
        Self { attributes: BTreeMap::new(), health: Health::Healthy, description: description.into() }
    }

    pub fn unhealthy(description: impl Into<String>) -> Self {
        Self { attributes: BTreeMap::new(), health: Health::Unhealthy, description: description.into() }
    }

    pub fn undetected(description: impl Into<String>) -> Self {
        Self { attributes: BTreeMap::new(), health: Health::Undetected, description: description.into() }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Tri-state cache of the last fingerprint outcome, used to suppress
/// repeated warnings on a persistent failure.
///
/// `None` means no fingerprint has run yet; it is distinct from both
/// `Some(Health::Healthy)` and `Some(Health::Unhealthy)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LastOutcome(Option<Health>);

impl LastOutcome {
    pub fn unknown() -> Self {
        Self(None)
    }

    /// Records a new outcome, returning whether this is a transition away
    /// from the previous recorded health (used to gate warning logs).
    pub fn record(&mut self, health: Health) -> bool {
        let changed = self.0 != Some(health);
        self.0 = Some(health);
        changed
    }

    pub fn get(&self) -> Option<Health> {
        self.0
    }
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;
