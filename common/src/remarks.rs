//! Canned remarks
//!
//! Each category has four remarks; the score picks one.

use crate::layout::Category;
use serde::{Deserialize, Serialize};

pub const EXCELLENT_THRESHOLD: f64 = 8.0;
pub const GOOD_THRESHOLD: f64 = 6.5;
pub const MODERATE_THRESHOLD: f64 = 5.0;

/// Remark tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemarkTier {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl RemarkTier {
    /// First matching threshold wins; NaN falls through to `Low`
    pub fn for_score(score: f64) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            RemarkTier::Excellent
        } else if score >= GOOD_THRESHOLD {
            RemarkTier::Good
        } else if score >= MODERATE_THRESHOLD {
            RemarkTier::Moderate
        } else {
            RemarkTier::Low
        }
    }
}

/// Four remarks of one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemarkSet {
    pub excellent: &'static str,
    pub good: &'static str,
    pub moderate: &'static str,
    pub low: &'static str,
}

impl RemarkSet {
    pub fn get(&self, tier: RemarkTier) -> &'static str {
        match tier {
            RemarkTier::Excellent => self.excellent,
            RemarkTier::Good => self.good,
            RemarkTier::Moderate => self.moderate,
            RemarkTier::Low => self.low,
        }
    }

    pub fn for_category(category: Category) -> &'static RemarkSet {
        match category {
            Category::Discipline => &DISCIPLINE_REMARKS,
            Category::Consistency => &CONSISTENCY_REMARKS,
            Category::SelfMotivation => &SELF_MOTIVATION_REMARKS,
            Category::Accountability => &ACCOUNTABILITY_REMARKS,
            Category::StressHandling => &STRESS_REMARKS,
        }
    }
}

/// Remark for a score from the given set
pub fn select_remark(score: f64, set: &RemarkSet) -> &'static str {
    set.get(RemarkTier::for_score(score))
}

pub const DISCIPLINE_REMARKS: RemarkSet = RemarkSet {
    excellent: "Demonstrates exceptional discipline with strong adherence to schedule and academic commitments.",
    good: "Maintains good discipline and generally follows instructions and routines effectively.",
    moderate: "Shows moderate discipline but needs consistency in maintaining structured study habits.",
    low: "Requires improvement in maintaining discipline and following structured routines regularly.",
};

pub const CONSISTENCY_REMARKS: RemarkSet = RemarkSet {
    excellent: "Displays remarkable consistency in study effort and performance stability.",
    good: "Shows good consistency with steady academic engagement.",
    moderate: "Consistency fluctuates at times and requires improved regularity.",
    low: "Needs to develop stable and consistent study habits.",
};

pub const SELF_MOTIVATION_REMARKS: RemarkSet = RemarkSet {
    excellent: "Highly self-driven and proactive in academic preparation.",
    good: "Shows good initiative and willingness to take responsibility for learning.",
    moderate: "Requires occasional external push to maintain motivation.",
    low: "Needs to develop stronger self-motivation and independent learning habits.",
};

pub const ACCOUNTABILITY_REMARKS: RemarkSet = RemarkSet {
    excellent: "Demonstrates strong ownership of responsibilities and timely responses.",
    good: "Maintains reasonable accountability with minor scope for improvement.",
    moderate: "Needs to improve response time and responsibility handling.",
    low: "Requires significant improvement in accountability and follow-through.",
};

pub const STRESS_REMARKS: RemarkSet = RemarkSet {
    excellent: "Handles academic pressure exceptionally well and maintains composure.",
    good: "Manages stress effectively with good emotional balance.",
    moderate: "Shows moderate stress management but may struggle during pressure situations.",
    low: "Needs to improve emotional regulation and stress handling skills.",
};
