use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tiers::{Tier, TierTable};

/// Follow-up priority derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadCategory {
    Hot,
    Warm,
    Cold,
}

const HOT_POINTS: u16 = 2;
const WARM_POINTS: u16 = 1;
const COLD_POINTS: u16 = 0;

/// Score cutoffs, encoded as a tier table whose "points" are the category rank.
pub const CATEGORY_TIERS: TierTable<u16> = TierTable::new(
    &[
        Tier {
            lower_bound: 70,
            points: HOT_POINTS,
        },
        Tier {
            lower_bound: 40,
            points: WARM_POINTS,
        },
    ],
    COLD_POINTS,
);

impl LeadCategory {
    pub const ALL: [LeadCategory; 3] = [LeadCategory::Hot, LeadCategory::Warm, LeadCategory::Cold];

    pub fn from_score(score: u16) -> Self {
        match CATEGORY_TIERS.points_for(score) {
            HOT_POINTS => LeadCategory::Hot,
            WARM_POINTS => LeadCategory::Warm,
            _ => LeadCategory::Cold,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadCategory::Hot => "hot",
            LeadCategory::Warm => "warm",
            LeadCategory::Cold => "cold",
        }
    }
}

impl fmt::Display for LeadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lead category '{0}' (expected hot, warm or cold)")]
pub struct UnknownCategory(pub String);

impl FromStr for LeadCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hot" => Ok(LeadCategory::Hot),
            "warm" => Ok(LeadCategory::Warm),
            "cold" => Ok(LeadCategory::Cold),
            _ => Err(UnknownCategory(value.to_string())),
        }
    }
}
