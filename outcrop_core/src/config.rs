// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance configuration.
//!
//! [`RevealConfig`] is resolved once at construction and never mutated;
//! per-element overrides (data attributes on the source) are read live at
//! apply time by the backend and take precedence over these values.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::margin::{MarginParseError, RootMargin};

/// Class added to a source element on reveal when none is configured.
pub const DEFAULT_CLASS: &str = "outcrop-visible";

/// Immutable per-instance configuration snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    /// Classes added on reveal (and removed on revert).
    pub classes: Vec<String>,
    /// Visibility fraction (0.0–1.0) at which an element counts as entered.
    ///
    /// A single value only; collection thresholds are unrepresentable by
    /// construction.
    pub threshold: f64,
    /// Margin applied to the viewport bounds for intersection purposes.
    pub root_margin: RootMargin,
    /// Whether reveal state is permanent once triggered (one-shot
    /// detection). When `false`, elements revert on exit.
    pub persistent: bool,
    /// Fixed inter-item wait in milliseconds when revealing a batch.
    /// Zero disables staggering.
    pub stagger_ms: u32,
    /// Delay in milliseconds before a non-staggered reveal is applied.
    pub delay_ms: u32,
    /// Whether the debug overlay is requested.
    pub debug: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            classes: Self::split_classes(DEFAULT_CLASS),
            threshold: 0.1,
            root_margin: RootMargin::ZERO,
            persistent: true,
            stagger_ms: 0,
            delay_ms: 0,
            debug: false,
        }
    }
}

impl RevealConfig {
    /// Splits a space-separated class list into its parts.
    ///
    /// Empty input yields an empty list (revealing then toggles nothing,
    /// but the callback still fires).
    #[must_use]
    pub fn split_classes(list: &str) -> Vec<String> {
        list.split_whitespace().map(String::from).collect()
    }

    /// Validates boundary constraints, returning the config unchanged.
    ///
    /// Rejects thresholds outside 0.0–1.0 (including NaN).
    pub fn validated(self) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Threshold(self.threshold));
        }
        Ok(self)
    }
}

/// Error constructing a [`RevealConfig`] from caller options.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Threshold outside the 0.0–1.0 range (or NaN).
    Threshold(f64),
    /// Root-margin string failed to parse.
    Margin(MarginParseError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Threshold(t) => {
                write!(f, "threshold {t} is outside the 0.0-1.0 range")
            }
            Self::Margin(e) => write!(f, "invalid root margin: {e}"),
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Threshold(_) => None,
            Self::Margin(e) => Some(e),
        }
    }
}

impl From<MarginParseError> for ConfigError {
    fn from(e: MarginParseError) -> Self {
        Self::Margin(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RevealConfig::default();
        assert_eq!(config.classes, [DEFAULT_CLASS]);
        assert_eq!(config.threshold, 0.1);
        assert_eq!(config.root_margin, RootMargin::ZERO);
        assert!(config.persistent);
        assert_eq!(config.stagger_ms, 0);
        assert_eq!(config.delay_ms, 0);
        assert!(!config.debug);
    }

    #[test]
    fn split_classes_handles_multiple_and_extra_whitespace() {
        assert_eq!(
            RevealConfig::split_classes("  fade-in   slide-up "),
            ["fade-in", "slide-up"]
        );
        assert!(RevealConfig::split_classes("").is_empty());
    }

    #[test]
    fn threshold_bounds_are_inclusive() {
        for t in [0.0, 0.5, 1.0] {
            let config = RevealConfig {
                threshold: t,
                ..RevealConfig::default()
            };
            assert!(config.validated().is_ok(), "threshold {t} should pass");
        }
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        for t in [-0.1, 1.5, f64::NAN] {
            let config = RevealConfig {
                threshold: t,
                ..RevealConfig::default()
            };
            assert!(
                matches!(config.validated(), Err(ConfigError::Threshold(_))),
                "threshold {t} should be rejected"
            );
        }
    }

    #[test]
    fn margin_error_converts() {
        let err = RootMargin::parse("bogus").unwrap_err();
        let config_err: ConfigError = err.clone().into();
        assert_eq!(config_err, ConfigError::Margin(err));
    }
}
