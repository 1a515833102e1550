//! Layout mode derived from the viewport width.
//!
//! The mode only drives guidance copy; nothing else branches on it.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Breakpoints (inclusive upper bounds) for the compact layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutThresholds {
    /// Widths up to and including this value use the mobile layout.
    pub mobile_max: u16,
    /// Widths up to and including this value use the tablet layout.
    pub tablet_max: u16,
}

impl Default for LayoutThresholds {
    fn default() -> Self {
        Self {
            mobile_max: 54,
            tablet_max: 90,
        }
    }
}

impl LayoutThresholds {
    /// Breakpoints must be ordered.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.mobile_max < self.tablet_max,
            "layout.mobile_max ({}) must be below layout.tablet_max ({})",
            self.mobile_max,
            self.tablet_max
        );
        Ok(())
    }
}

/// Coarse viewport classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Full seat map with side controls.
    Desktop,
    /// Condensed map with stacked controls.
    Tablet,
    /// Sector view with a bottom booking bar.
    Mobile,
}

impl LayoutMode {
    /// Classify `width` against the given breakpoints.
    pub fn for_width(width: u16, thresholds: &LayoutThresholds) -> Self {
        if width <= thresholds.mobile_max {
            LayoutMode::Mobile
        } else if width <= thresholds.tablet_max {
            LayoutMode::Tablet
        } else {
            LayoutMode::Desktop
        }
    }
}

/// Text shown to explain the current layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutGuide {
    /// Classified mode.
    pub mode: LayoutMode,
    /// One-line description of the layout.
    pub label: &'static str,
    /// Short usage hint for the controls.
    pub hint: &'static str,
}

impl LayoutGuide {
    /// Guide for a viewport `width` columns wide.
    pub fn for_width(width: u16, thresholds: &LayoutThresholds) -> Self {
        Self::for_mode(LayoutMode::for_width(width, thresholds))
    }

    /// Guide text for a known mode.
    pub fn for_mode(mode: LayoutMode) -> Self {
        let (label, hint) = match mode {
            LayoutMode::Desktop => (
                "Desktop layout · full seat map with side controls.",
                "Arrows move, Space selects. Use c to clear or Enter to continue.",
            ),
            LayoutMode::Tablet => (
                "Tablet layout · condensed map and stacked controls.",
                "Arrows move, Space selects. Summary appears beside the map.",
            ),
            LayoutMode::Mobile => (
                "Mobile layout · sector view with bottom booking bar.",
                "Pick a sector (1-4) to zoom, then Space to select seats.",
            ),
        };
        Self { mode, label, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_are_inclusive() {
        let thresholds = LayoutThresholds::default();
        assert_eq!(LayoutMode::for_width(54, &thresholds), LayoutMode::Mobile);
        assert_eq!(LayoutMode::for_width(55, &thresholds), LayoutMode::Tablet);
        assert_eq!(LayoutMode::for_width(90, &thresholds), LayoutMode::Tablet);
        assert_eq!(LayoutMode::for_width(91, &thresholds), LayoutMode::Desktop);
    }

    #[test]
    fn guide_is_idempotent() {
        let thresholds = LayoutThresholds {
            mobile_max: 540,
            tablet_max: 900,
        };
        let first = LayoutGuide::for_width(800, &thresholds);
        assert_eq!(first, LayoutGuide::for_width(800, &thresholds));
        assert_eq!(first.mode, LayoutMode::Tablet);
    }

    #[test]
    fn unordered_breakpoints_are_rejected() {
        let thresholds = LayoutThresholds {
            mobile_max: 100,
            tablet_max: 80,
        };
        assert!(thresholds.validate().is_err());
    }
}
