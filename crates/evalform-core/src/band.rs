//! Performance labels for a form's scoring band.
//!
//! The label is picked from the band midpoint and comes with coaching
//! guidance for the evaluator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ScoringBand;

/// Midpoint below which a band reads as "needs improvement".
pub const NEEDS_IMPROVEMENT_BELOW: f64 = 33.3;
/// Midpoint below which a band reads as "meets expectations".
pub const MEETS_EXPECTATIONS_BELOW: f64 = 66.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PerformanceLabel {
    NeedsImprovement,
    MeetsExpectations,
    ExceedsExpectations,
}

impl PerformanceLabel {
    /// Label for a score midpoint.
    pub fn for_midpoint(midpoint: f64) -> Self {
        if midpoint < NEEDS_IMPROVEMENT_BELOW {
            PerformanceLabel::NeedsImprovement
        } else if midpoint < MEETS_EXPECTATIONS_BELOW {
            PerformanceLabel::MeetsExpectations
        } else {
            PerformanceLabel::ExceedsExpectations
        }
    }

    pub fn for_band(band: &ScoringBand) -> Self {
        Self::for_midpoint(band.midpoint())
    }

    /// Display colour used by the HTML preview.
    pub fn color(&self) -> &'static str {
        match self {
            PerformanceLabel::NeedsImprovement => "#ff0000",
            PerformanceLabel::MeetsExpectations => "#003399",
            PerformanceLabel::ExceedsExpectations => "#50bf73",
        }
    }

    /// Coaching notes shown under the label.
    pub fn guidance(&self) -> &'static [&'static str] {
        match self {
            PerformanceLabel::NeedsImprovement => &[
                "The employee performs below the expected level.",
                "Long resolution times.",
                "Lacking clarity when explaining solutions.",
                "Receiving frequent customer complaints.",
                "Failing to follow call scripts and guidelines.",
                "Low productivity.",
                "Needs coaching and close follow-up.",
            ],
            PerformanceLabel::MeetsExpectations => &[
                "The employee performs at a satisfactory level.",
                "Resolving customer issues within expected times.",
                "Clear and polite communication.",
                "Consistently achieving quality targets.",
                "Following call scripts and guidelines.",
                "Meeting call volume targets.",
                "Can improve efficiency with further training.",
            ],
            PerformanceLabel::ExceedsExpectations => &[
                "The employee consistently exceeds expectations.",
                "Quick and effective issue resolution.",
                "Engaging and empathetic with customers.",
                "High rate of positive customer feedback.",
                "Mastering guidelines and procedures.",
                "Handling calls that others escalate.",
                "Eligible for rewards and recognition.",
            ],
        }
    }
}

impl fmt::Display for PerformanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceLabel::NeedsImprovement => write!(f, "Needs improvement"),
            PerformanceLabel::MeetsExpectations => write!(f, "Meets expectations"),
            PerformanceLabel::ExceedsExpectations => write!(f, "Exceeds expectations"),
        }
    }
}
