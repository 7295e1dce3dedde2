use observatory_common::{Risk, Solution};

/// Everything the dashboard resolves from the selected id.
///
/// References are looked up at read time; an id that matches nothing simply
/// resolves to `None` or is left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection<'a> {
    pub risk: Option<&'a Risk>,
    pub solution: Option<&'a Solution>,
    /// First solution whose parent is the selected id.
    pub related_solution: Option<&'a Solution>,
    /// Parent of the selected solution, if it is loaded.
    pub parent_risk: Option<&'a Risk>,
    /// `connected_to` of the selected risk, resolved in order.
    pub connected_risks: Vec<&'a Risk>,
}

impl<'a> Selection<'a> {
    pub fn resolve(
        risks: &'a [Risk],
        solutions: &'a [Solution],
        selected_id: Option<&str>,
    ) -> Self {
        let Some(id) = selected_id else {
            return Self::default();
        };

        let risk = find_risk(risks, id);
        let solution = solutions.iter().find(|s| s.id == id);
        let related_solution = solutions.iter().find(|s| s.parent_risk_id == id);
        let parent_risk = solution.and_then(|s| find_risk(risks, &s.parent_risk_id));
        let connected_risks = risk
            .map(|r| connected_risks(risks, r))
            .unwrap_or_default();

        Self {
            risk,
            solution,
            related_solution,
            parent_risk,
            connected_risks,
        }
    }
}

pub fn find_risk<'a>(risks: &'a [Risk], id: &str) -> Option<&'a Risk> {
    risks.iter().find(|r| r.id == id)
}

/// Resolve `risk.connected_to` against `risks`, dropping ids that are not
/// loaded and keeping the stored order.
pub fn connected_risks<'a>(risks: &'a [Risk], risk: &Risk) -> Vec<&'a Risk> {
    risk.connected_to
        .iter()
        .filter_map(|id| find_risk(risks, id))
        .collect()
}
