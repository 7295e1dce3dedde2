use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// --- Collections ---

/// The two top-level collections of the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Risks,
    Solutions,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Risks => "risks",
            Collection::Solutions => "solutions",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Enums ---

/// Qualitative rate of change of a risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Velocity {
    Critical,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Velocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Velocity::Critical => write!(f, "Critical"),
            Velocity::High => write!(f, "High"),
            Velocity::Medium => write!(f, "Medium"),
            Velocity::Low => write!(f, "Low"),
        }
    }
}

// --- Shared narrative types ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimelineNarrative {
    #[serde(default)]
    pub near_term: String,
    #[serde(default)]
    pub mid_term: String,
    #[serde(default)]
    pub long_term: String,
}

/// A dated citation backing a risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SignalEvidence {
    /// Free-form as stored: `2024-10-31` in one dataset, `11/26` in another.
    pub date: String,
    #[serde(rename = "isNew", default)]
    pub is_new: bool,
    pub headline: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// --- Records ---

/// A tracked societal or technological hazard.
///
/// `connected_to` holds ids of other risks. They are resolved at read time
/// and may point at records that are not loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Risk {
    pub id: String,
    pub risk_name: String,
    pub category: String,
    pub score_2026: f64,
    pub score_2035: f64,
    pub velocity: Velocity,
    #[serde(default)]
    pub connected_to: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub deep_dive: String,
    #[serde(default)]
    pub who_affected: Vec<String>,
    #[serde(default)]
    pub timeline_narrative: TimelineNarrative,
    #[serde(default)]
    pub mitigation_strategies: Vec<String>,
    #[serde(default)]
    pub signal_evidence: Vec<SignalEvidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert_severity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_perception: Option<f64>,
}

/// A mitigation or response, attached to one parent risk by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Solution {
    pub id: String,
    pub parent_risk_id: String,
    pub solution_title: String,
    pub solution_type: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub deep_dive: String,
    #[serde(default)]
    pub implementation_stage: String,
    pub adoption_score_2026: f64,
    pub adoption_score_2035: f64,
    #[serde(default)]
    pub key_players: Vec<String>,
    #[serde(default)]
    pub barriers: Vec<String>,
    #[serde(default)]
    pub timeline_narrative: TimelineNarrative,
}

// --- Score scale ---

/// Numeric scale a dataset snapshot uses for its scores.
///
/// Datasets disagree (0–10 vs 0–100), so the scale is read off the data.
/// It only affects how a score maps onto a bar; thresholds stay literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    Ten,
    Hundred,
}

impl ScoreScale {
    pub fn max(self) -> f64 {
        match self {
            ScoreScale::Ten => 10.0,
            ScoreScale::Hundred => 100.0,
        }
    }

    /// `Hundred` as soon as any observed value exceeds 10.
    pub fn detect(values: impl IntoIterator<Item = f64>) -> Self {
        if values.into_iter().any(|v| v > 10.0) {
            ScoreScale::Hundred
        } else {
            ScoreScale::Ten
        }
    }

    pub fn for_risks(risks: &[Risk]) -> Self {
        Self::detect(risks.iter().flat_map(|r| {
            [Some(r.score_2026), Some(r.score_2035), r.expert_severity, r.public_perception]
                .into_iter()
                .flatten()
        }))
    }

    pub fn for_solutions(solutions: &[Solution]) -> Self {
        Self::detect(
            solutions
                .iter()
                .flat_map(|s| [s.adoption_score_2026, s.adoption_score_2035]),
        )
    }

    /// Position of `score` on this scale, clamped to 0.0..=1.0.
    pub fn fraction(self, score: f64) -> f64 {
        (score / self.max()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn risk_json() -> serde_json::Value {
        json!({
            "id": "R01",
            "risk_name": "Deepfake Fraud",
            "category": "Security",
            "score_2026": 9.5,
            "score_2035": 4,
            "connected_to": ["R05", "R09"],
            "velocity": "High",
            "summary": "Synthetic media used for fraud.",
            "deep_dive": "...",
            "who_affected": ["Consumers"],
            "timeline_narrative": {
                "near_term": "now",
                "mid_term": "soon",
                "long_term": "later"
            },
            "mitigation_strategies": ["C2PA"],
            "signal_evidence": [
                {
                    "date": "11/26",
                    "isNew": true,
                    "headline": "h",
                    "source": "s",
                    "url": "https://example.com"
                },
                { "date": "2024-02-20", "isNew": false, "headline": "h2", "source": "s2" }
            ],
            "expert_severity": 9.5,
            "public_perception": 6.2
        })
    }

    #[test]
    fn test_risk_deserializes_stored_shape() {
        let risk: Risk = serde_json::from_value(risk_json()).unwrap();
        assert_eq!(risk.velocity, Velocity::High);
        assert_eq!(risk.score_2035, 4.0);
        assert!(risk.signal_evidence[0].is_new);
        assert_eq!(risk.signal_evidence[1].url, None);
        assert_eq!(risk.public_perception, Some(6.2));
    }

    #[test]
    fn test_risk_tolerates_missing_optional_fields() {
        let risk: Risk = serde_json::from_value(json!({
            "id": "R42",
            "risk_name": "Sparse",
            "category": "Tech",
            "score_2026": 1,
            "score_2035": 2,
            "velocity": "Low"
        }))
        .unwrap();
        assert!(risk.connected_to.is_empty());
        assert_eq!(risk.expert_severity, None);
        assert_eq!(risk.timeline_narrative, TimelineNarrative::default());
    }

    #[test]
    fn test_unknown_velocity_is_rejected() {
        let mut value = risk_json();
        value["velocity"] = json!("Glacial");
        assert!(serde_json::from_value::<Risk>(value).is_err());
    }

    #[test]
    fn test_scale_detection() {
        let mut risk: Risk = serde_json::from_value(risk_json()).unwrap();
        assert_eq!(ScoreScale::for_risks(std::slice::from_ref(&risk)), ScoreScale::Ten);

        risk.score_2026 = 78.0;
        assert_eq!(ScoreScale::for_risks(&[risk]), ScoreScale::Hundred);
        assert_eq!(ScoreScale::for_risks(&[]), ScoreScale::Ten);
    }

    #[test]
    fn test_scale_fraction_clamps() {
        assert_eq!(ScoreScale::Ten.fraction(9.5), 0.95);
        assert_eq!(ScoreScale::Hundred.fraction(85.0), 0.85);
        assert_eq!(ScoreScale::Ten.fraction(12.0), 1.0);
        assert_eq!(ScoreScale::Ten.fraction(-1.0), 0.0);
    }
}
