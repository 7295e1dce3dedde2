use observatory_common::Risk;

/// Risks at or above this `score_2026` are near-term.
pub const NEAR_TERM_THRESHOLD: f64 = 7.0;
/// Risks at or above this (and below near-term) are mid-term.
pub const MID_TERM_THRESHOLD: f64 = 4.0;

/// Grouping of risks by current severity.
///
/// Always decided on `score_2026`, whatever year the slider shows, and with
/// the literal thresholds regardless of the dataset's score scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    NearTerm,
    MidTerm,
    LongTerm,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::NearTerm, Tier::MidTerm, Tier::LongTerm];

    pub fn for_score(score_2026: f64) -> Tier {
        if score_2026 >= NEAR_TERM_THRESHOLD {
            Tier::NearTerm
        } else if score_2026 >= MID_TERM_THRESHOLD {
            Tier::MidTerm
        } else {
            Tier::LongTerm
        }
    }

    pub fn of(risk: &Risk) -> Tier {
        Self::for_score(risk.score_2026)
    }

    pub fn title(self) -> &'static str {
        match self {
            Tier::NearTerm => "Critical (Now)",
            Tier::MidTerm => "Emerging (2030s)",
            Tier::LongTerm => "Horizon (2040s)",
        }
    }

    pub fn default_open(self) -> bool {
        matches!(self, Tier::NearTerm)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Tier::NearTerm => 0,
            Tier::MidTerm => 1,
            Tier::LongTerm => 2,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Disjoint, exhaustive split of a risk list. Input order is kept inside
/// each tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TieredRisks<'a> {
    pub near_term: Vec<&'a Risk>,
    pub mid_term: Vec<&'a Risk>,
    pub long_term: Vec<&'a Risk>,
}

impl<'a> TieredRisks<'a> {
    pub fn partition(risks: &'a [Risk]) -> Self {
        let mut tiers = Self::default();
        for risk in risks {
            match Tier::of(risk) {
                Tier::NearTerm => tiers.near_term.push(risk),
                Tier::MidTerm => tiers.mid_term.push(risk),
                Tier::LongTerm => tiers.long_term.push(risk),
            }
        }
        tiers
    }

    pub fn get(&self, tier: Tier) -> &[&'a Risk] {
        match tier {
            Tier::NearTerm => &self.near_term,
            Tier::MidTerm => &self.mid_term,
            Tier::LongTerm => &self.long_term,
        }
    }

    pub fn len(&self) -> usize {
        self.near_term.len() + self.mid_term.len() + self.long_term.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_edges() {
        assert_eq!(Tier::for_score(7.0), Tier::NearTerm);
        assert_eq!(Tier::for_score(6.99), Tier::MidTerm);
        assert_eq!(Tier::for_score(4.0), Tier::MidTerm);
        assert_eq!(Tier::for_score(3.99), Tier::LongTerm);
        assert_eq!(Tier::for_score(0.0), Tier::LongTerm);
    }

    #[test]
    fn test_hundred_point_scores_all_land_near_term() {
        // Thresholds stay literal on 0-100 datasets.
        for score in [78.0, 88.0, 95.0] {
            assert_eq!(Tier::for_score(score), Tier::NearTerm);
        }
    }

    #[test]
    fn test_only_near_term_opens_by_default() {
        assert!(Tier::NearTerm.default_open());
        assert!(!Tier::MidTerm.default_open());
        assert!(!Tier::LongTerm.default_open());
    }
}
