use observatory_common::Risk;

pub const MIN_YEAR: u16 = 2026;
pub const MAX_YEAR: u16 = 2050;
/// Last year for which the displayed severity is `score_2026`.
pub const LAST_CURRENT_SCORE_YEAR: u16 = 2030;

/// Position of the year slider, always within `MIN_YEAR..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(u16);

impl Year {
    /// Out-of-range values are clamped to the slider bounds.
    pub fn new(year: i32) -> Self {
        let clamped = year.clamp(i32::from(MIN_YEAR), i32::from(MAX_YEAR));
        Self(clamped as u16)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Whether the slider has moved past the current-score horizon.
    pub fn shows_projection(self) -> bool {
        self.0 > LAST_CURRENT_SCORE_YEAR
    }
}

impl Default for Year {
    fn default() -> Self {
        Self(MIN_YEAR)
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity shown next to a risk for the given slider position. Tiering
/// does not use this.
pub fn display_score(risk: &Risk, year: Year) -> f64 {
    if year.shows_projection() {
        risk.score_2035
    } else {
        risk.score_2026
    }
}
