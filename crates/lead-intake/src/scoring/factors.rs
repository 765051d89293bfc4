use super::domain::{LeadSubmission, Timeline};
use super::tiers::{Tier, TierTable};
use super::{FactorScore, LeadFactor};

pub const BUDGET_TIERS: TierTable<f64> = TierTable::new(
    &[
        Tier {
            lower_bound: 10_000.0,
            points: 40,
        },
        Tier {
            lower_bound: 5_000.0,
            points: 30,
        },
        Tier {
            lower_bound: 2_000.0,
            points: 20,
        },
    ],
    10,
);

/// Unrecognized timelines earn nothing; there is no floor for this factor.
pub const TIMELINE_POINTS: [(Timeline, u16); 4] = [
    (Timeline::Immediate, 30),
    (Timeline::OneToThreeMonths, 20),
    (Timeline::ThreeToSixMonths, 10),
    (Timeline::SixPlusMonths, 5),
];

pub const COMPANY_SIZE_TIERS: TierTable<i64> = TierTable::new(
    &[
        Tier {
            lower_bound: 100,
            points: 15,
        },
        Tier {
            lower_bound: 50,
            points: 10,
        },
        Tier {
            lower_bound: 10,
            points: 5,
        },
    ],
    2,
);

/// Free-text answers longer than this many UTF-16 code units count as detailed.
pub const DETAILED_TEXT_THRESHOLD: usize = 50;

/// Engagement bracket keyed on selected tag count, optionally requiring detailed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementTier {
    pub min_items: usize,
    pub requires_detail: bool,
    pub points: u16,
}

pub const ENGAGEMENT_TIERS: [EngagementTier; 2] = [
    EngagementTier {
        min_items: 5,
        requires_detail: true,
        points: 15,
    },
    EngagementTier {
        min_items: 3,
        requires_detail: false,
        points: 8,
    },
];

pub const ENGAGEMENT_FLOOR: u16 = 3;

pub fn budget_points(budget: f64) -> u16 {
    BUDGET_TIERS.points_for(budget)
}

pub fn timeline_points(timeline: Timeline) -> u16 {
    TIMELINE_POINTS
        .iter()
        .find(|(known, _)| *known == timeline)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

pub fn company_size_points(company_size: i64) -> u16 {
    COMPANY_SIZE_TIERS.points_for(company_size)
}

pub fn has_detailed_text(submission: &LeadSubmission) -> bool {
    is_detailed(&submission.pain_points_text) || is_detailed(&submission.automation_needs_text)
}

fn is_detailed(text: &str) -> bool {
    text.encode_utf16().count() > DETAILED_TEXT_THRESHOLD
}

pub fn engagement_points(submission: &LeadSubmission) -> u16 {
    let total_items = submission.total_items();
    let detailed = has_detailed_text(submission);

    ENGAGEMENT_TIERS
        .iter()
        .find(|tier| total_items >= tier.min_items && (detailed || !tier.requires_detail))
        .map(|tier| tier.points)
        .unwrap_or(ENGAGEMENT_FLOOR)
}

pub(crate) fn score_factors(submission: &LeadSubmission) -> Vec<FactorScore> {
    let budget = budget_points(submission.budget);
    let timeline = timeline_points(submission.timeline);
    let company_size = company_size_points(submission.company_size);
    let engagement = engagement_points(submission);

    vec![
        FactorScore {
            factor: LeadFactor::Budget,
            points: budget,
            notes: format!("budget {:.0}", submission.budget),
        },
        FactorScore {
            factor: LeadFactor::Timeline,
            points: timeline,
            notes: format!("timeline {}", submission.timeline),
        },
        FactorScore {
            factor: LeadFactor::CompanySize,
            points: company_size,
            notes: format!("{} employees", submission.company_size),
        },
        FactorScore {
            factor: LeadFactor::Engagement,
            points: engagement,
            notes: format!(
                "{} selected items{}",
                submission.total_items(),
                if has_detailed_text(submission) {
                    ", detailed description"
                } else {
                    ""
                }
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(count: usize, prefix: &str) -> std::collections::BTreeSet<String> {
        (0..count).map(|idx| format!("{prefix}-{idx}")).collect()
    }

    fn engagement(pain: usize, needs: usize, text: &str) -> u16 {
        engagement_points(&LeadSubmission {
            pain_points: tags(pain, "pain"),
            automation_needs: tags(needs, "need"),
            pain_points_text: text.to_string(),
            ..LeadSubmission::default()
        })
    }

    #[test]
    fn budget_tiers() {
        assert_eq!(budget_points(50_000.0), 40);
        assert_eq!(budget_points(10_000.0), 40);
        assert_eq!(budget_points(9_999.99), 30);
        assert_eq!(budget_points(5_000.0), 30);
        assert_eq!(budget_points(4_999.0), 20);
        assert_eq!(budget_points(2_000.0), 20);
        assert_eq!(budget_points(1_999.0), 10);
        assert_eq!(budget_points(0.0), 10);
        assert_eq!(budget_points(-250.0), 10);
        assert_eq!(budget_points(f64::NAN), 10);
    }

    #[test]
    fn budget_points_never_decrease() {
        let mut previous = 0;
        for budget in (-1_000..=20_000).step_by(250) {
            let points = budget_points(budget as f64);
            assert!(points >= previous, "budget {budget} dropped to {points}");
            previous = points;
        }
    }

    #[test]
    fn timeline_table() {
        assert_eq!(timeline_points(Timeline::Immediate), 30);
        assert_eq!(timeline_points(Timeline::OneToThreeMonths), 20);
        assert_eq!(timeline_points(Timeline::ThreeToSixMonths), 10);
        assert_eq!(timeline_points(Timeline::SixPlusMonths), 5);
        assert_eq!(timeline_points(Timeline::Unrecognized), 0);
        assert_eq!(timeline_points(Timeline::from_label("someday")), 0);
    }

    #[test]
    fn company_size_tiers() {
        assert_eq!(company_size_points(5_000), 15);
        assert_eq!(company_size_points(100), 15);
        assert_eq!(company_size_points(99), 10);
        assert_eq!(company_size_points(50), 10);
        assert_eq!(company_size_points(49), 5);
        assert_eq!(company_size_points(10), 5);
        assert_eq!(company_size_points(9), 2);
        assert_eq!(company_size_points(0), 2);
        assert_eq!(company_size_points(-4), 2);
    }

    #[test]
    fn engagement_tiers() {
        let sixty = "x".repeat(60);
        assert_eq!(engagement(3, 2, &sixty), 15);
        assert_eq!(engagement(2, 2, ""), 8);
        assert_eq!(engagement(1, 0, ""), 3);
        assert_eq!(engagement(0, 0, &sixty), 3);
    }

    #[test]
    fn many_items_without_detail_stay_in_middle_tier() {
        assert_eq!(engagement(6, 6, "short"), 8);
    }

    #[test]
    fn detail_threshold_is_strict() {
        assert_eq!(engagement(5, 0, &"y".repeat(50)), 8);
        assert_eq!(engagement(5, 0, &"y".repeat(51)), 15);
    }

    #[test]
    fn automation_needs_text_also_counts_as_detail() {
        let submission = LeadSubmission {
            pain_points: tags(2, "pain"),
            automation_needs: tags(3, "need"),
            automation_needs_text: "é".repeat(51),
            ..LeadSubmission::default()
        };
        assert!(has_detailed_text(&submission));
        assert_eq!(engagement_points(&submission), 15);
    }

    #[test]
    fn text_length_counts_utf16_units() {
        // 26 emoji are 26 chars but 52 UTF-16 units.
        let emoji = "\u{1F600}".repeat(26);
        assert_eq!(emoji.chars().count(), 26);
        assert_eq!(engagement(5, 0, &emoji), 15);

        // BMP characters are one unit each.
        assert_eq!(engagement(5, 0, &"\u{4E2D}".repeat(50)), 8);
        assert_eq!(engagement(5, 0, &"\u{4E2D}".repeat(51)), 15);
    }

    #[test]
    fn caps_match_factor_maximums() {
        assert_eq!(BUDGET_TIERS.cap(), 40);
        assert_eq!(BUDGET_TIERS.floor(), 10);
        assert_eq!(COMPANY_SIZE_TIERS.cap(), 15);
        assert_eq!(COMPANY_SIZE_TIERS.floor(), 2);
        assert_eq!(
            TIMELINE_POINTS.iter().map(|(_, points)| *points).max(),
            Some(30)
        );
        assert_eq!(
            ENGAGEMENT_TIERS.iter().map(|tier| tier.points).max(),
            Some(15)
        );
    }
}
