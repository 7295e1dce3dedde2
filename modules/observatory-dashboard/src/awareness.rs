use observatory_common::Risk;

/// Expert severity must exceed public perception by more than this.
/// Same units as the dataset's scores; not normalized across scales.
pub const AWARENESS_GAP_THRESHOLD: f64 = 2.0;

/// `expert_severity - public_perception`, when both are recorded.
pub fn awareness_gap(risk: &Risk) -> Option<f64> {
    Some(risk.expert_severity? - risk.public_perception?)
}

pub fn has_awareness_gap(risk: &Risk) -> bool {
    awareness_gap(risk).is_some_and(|gap| gap > AWARENESS_GAP_THRESHOLD)
}
