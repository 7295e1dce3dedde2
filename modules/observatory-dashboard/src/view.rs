use observatory_common::{Risk, ScoreScale, Solution};
use observatory_store::RepositoryState;

use crate::awareness::{awareness_gap, has_awareness_gap};
use crate::selection::Selection;
use crate::state::{DashboardState, Mode};
use crate::tier::{Tier, TieredRisks};
use crate::year::{display_score, Year};

#[derive(Debug, Clone, PartialEq)]
pub struct RiskEntry<'a> {
    pub risk: &'a Risk,
    pub display_score: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolutionEntry<'a> {
    pub solution: &'a Solution,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierSection<'a> {
    pub tier: Tier,
    pub open: bool,
    pub entries: Vec<RiskEntry<'a>>,
}

/// Left-hand list of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexPanel<'a> {
    Loading,
    /// Fetch of the collection this mode browses failed.
    Error(String),
    /// Non-empty tiers only, near-term first.
    Risks(Vec<TierSection<'a>>),
    Solutions(Vec<SolutionEntry<'a>>),
}

/// Cross-references under the list.
#[derive(Debug, Clone, PartialEq)]
pub enum LinksPanel<'a> {
    ConnectedRisks(Vec<&'a Risk>),
    ParentRisk(&'a Risk),
    Empty,
}

/// Centre and right panels.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail<'a> {
    Risk {
        risk: &'a Risk,
        related_solution: Option<&'a Solution>,
        awareness_gap: Option<f64>,
        significant_gap: bool,
    },
    Solution {
        solution: &'a Solution,
    },
    Nothing,
}

/// Everything needed to draw the dashboard for one state/snapshot pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView<'a> {
    pub mode: Mode,
    pub year: Year,
    pub index: IndexPanel<'a>,
    pub links: LinksPanel<'a>,
    pub detail: Detail<'a>,
    pub risk_scale: ScoreScale,
    pub solution_scale: ScoreScale,
}

impl<'a> DashboardView<'a> {
    pub fn build(state: &DashboardState, snapshot: &'a RepositoryState) -> Self {
        let risks: &'a [Risk] = &snapshot.risks;
        let solutions: &'a [Solution] = &snapshot.solutions;
        let selection = Selection::resolve(risks, solutions, state.selected_id.as_deref());

        Self {
            mode: state.mode,
            year: state.year,
            index: index_panel(state, snapshot),
            links: links_panel(state.mode, &selection),
            detail: detail(state.mode, &selection),
            risk_scale: ScoreScale::for_risks(risks),
            solution_scale: ScoreScale::for_solutions(solutions),
        }
    }
}

fn index_panel<'a>(state: &DashboardState, snapshot: &'a RepositoryState) -> IndexPanel<'a> {
    if snapshot.loading {
        return IndexPanel::Loading;
    }
    if let Some(err) = snapshot.error_for(state.mode.browses()) {
        return IndexPanel::Error(err.to_string());
    }

    match state.mode {
        Mode::Monitor => {
            let tiers = TieredRisks::partition(&snapshot.risks);
            let sections = Tier::ALL
                .into_iter()
                .filter(|tier| !tiers.get(*tier).is_empty())
                .map(|tier| TierSection {
                    tier,
                    open: state.sections.is_open(tier),
                    entries: tiers
                        .get(tier)
                        .iter()
                        .map(|&risk| RiskEntry {
                            risk,
                            display_score: display_score(risk, state.year),
                            selected: state.is_selected(&risk.id),
                        })
                        .collect(),
                })
                .collect();
            IndexPanel::Risks(sections)
        }
        Mode::Solution => IndexPanel::Solutions(
            snapshot
                .solutions
                .iter()
                .map(|solution| SolutionEntry {
                    solution,
                    selected: state.is_selected(&solution.id),
                })
                .collect(),
        ),
    }
}

fn links_panel<'a>(mode: Mode, selection: &Selection<'a>) -> LinksPanel<'a> {
    match (mode, selection.parent_risk) {
        (Mode::Monitor, _) if !selection.connected_risks.is_empty() => {
            LinksPanel::ConnectedRisks(selection.connected_risks.clone())
        }
        (Mode::Solution, Some(parent)) => LinksPanel::ParentRisk(parent),
        _ => LinksPanel::Empty,
    }
}

fn detail<'a>(mode: Mode, selection: &Selection<'a>) -> Detail<'a> {
    match (mode, selection.risk, selection.solution) {
        (Mode::Monitor, Some(risk), _) => Detail::Risk {
            risk,
            related_solution: selection.related_solution,
            awareness_gap: awareness_gap(risk),
            significant_gap: has_awareness_gap(risk),
        },
        (Mode::Solution, _, Some(solution)) => Detail::Solution { solution },
        _ => Detail::Nothing,
    }
}
