//! Plain-text rendering of a [`DashboardView`].

use std::fmt;

use observatory_common::{Risk, ScoreScale, Solution, TimelineNarrative};
use observatory_dashboard::{DashboardView, Detail, IndexPanel, LinksPanel, Mode, TierSection};

const BAR_WIDTH: usize = 20;

pub struct Rendered<'v, 'a>(pub &'v DashboardView<'a>);

impl fmt::Display for Rendered<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let horizon = if view.year.shows_projection() {
            "2035 projection"
        } else {
            "current"
        };
        writeln!(
            f,
            "AI 4 Society Observatory [{}] {} ({horizon} scores)",
            view.mode, view.year
        )?;
        writeln!(f)?;

        match &view.index {
            IndexPanel::Loading => writeln!(f, "Loading...")?,
            IndexPanel::Error(message) => writeln!(f, "Error: {message}")?,
            IndexPanel::Risks(sections) => {
                for section in sections {
                    write_section(f, section, view.risk_scale)?;
                }
            }
            IndexPanel::Solutions(entries) => {
                for entry in entries {
                    let marker = if entry.selected { '>' } else { ' ' };
                    writeln!(
                        f,
                        "{marker} {:<4} {}",
                        entry.solution.id, entry.solution.solution_title
                    )?;
                }
            }
        }

        match &view.links {
            LinksPanel::ConnectedRisks(risks) => {
                writeln!(f)?;
                writeln!(f, "Connected risks:")?;
                for risk in risks {
                    writeln!(f, "  {} {}", risk.id, risk.risk_name)?;
                }
            }
            LinksPanel::ParentRisk(risk) => {
                writeln!(f)?;
                writeln!(f, "Addresses: {} {}", risk.id, risk.risk_name)?;
            }
            LinksPanel::Empty => {}
        }

        writeln!(f)?;
        match &view.detail {
            Detail::Risk {
                risk,
                related_solution,
                awareness_gap,
                significant_gap,
            } => {
                write_risk(f, risk, view.risk_scale)?;
                match awareness_gap {
                    Some(gap) if *significant_gap => {
                        writeln!(f, "Awareness gap: {gap:.1} (significant)")?
                    }
                    Some(gap) => writeln!(f, "Awareness gap: {gap:.1}")?,
                    None => {}
                }
                if let Some(solution) = related_solution {
                    writeln!(
                        f,
                        "Explore solution: {} {}",
                        solution.id, solution.solution_title
                    )?;
                }
            }
            Detail::Solution { solution } => write_solution(f, solution, view.solution_scale)?,
            Detail::Nothing => {
                let hint = match view.mode {
                    Mode::Monitor => "Select a risk",
                    Mode::Solution => "Select a solution",
                };
                writeln!(f, "{hint}")?;
            }
        }
        Ok(())
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    section: &TierSection<'_>,
    scale: ScoreScale,
) -> fmt::Result {
    if !section.open {
        return writeln!(f, "+ {} ({})", section.tier, section.entries.len());
    }
    writeln!(f, "- {}", section.tier)?;
    for entry in &section.entries {
        let marker = if entry.selected { '>' } else { ' ' };
        writeln!(
            f,
            "  {marker} {:<4} {:<36} {:>5.1} {}",
            entry.risk.id,
            entry.risk.risk_name,
            entry.display_score,
            bar(scale.fraction(entry.display_score))
        )?;
    }
    Ok(())
}

fn write_risk(f: &mut fmt::Formatter<'_>, risk: &Risk, scale: ScoreScale) -> fmt::Result {
    writeln!(f, "{} {}", risk.id, risk.risk_name)?;
    writeln!(f, "{} | velocity {}", risk.category, risk.velocity)?;
    write_text(f, None, &risk.summary)?;
    write_text(f, Some("Deep dive"), &risk.deep_dive)?;
    score_line(f, "Severity 2026", risk.score_2026, scale)?;
    score_line(f, "Severity 2035", risk.score_2035, scale)?;
    if let Some(expert) = risk.expert_severity {
        score_line(f, "Expert severity", expert, scale)?;
    }
    if let Some(public) = risk.public_perception {
        score_line(f, "Public perception", public, scale)?;
    }
    if !risk.who_affected.is_empty() {
        writeln!(f, "Who is affected: {}", risk.who_affected.join(", "))?;
    }
    write_timeline(f, "Evolution timeline", &risk.timeline_narrative)?;
    write_list(f, "Mitigation strategies", &risk.mitigation_strategies)?;
    if !risk.signal_evidence.is_empty() {
        writeln!(f, "Signal evidence:")?;
    }
    for signal in &risk.signal_evidence {
        let new = if signal.is_new { " [new]" } else { "" };
        write!(
            f,
            "  {} {} ({}){new}",
            signal.date, signal.headline, signal.source
        )?;
        match &signal.url {
            Some(url) => writeln!(f, " <{url}>")?,
            None => writeln!(f)?,
        }
    }
    Ok(())
}

fn write_solution(
    f: &mut fmt::Formatter<'_>,
    solution: &Solution,
    scale: ScoreScale,
) -> fmt::Result {
    writeln!(f, "{} {}", solution.id, solution.solution_title)?;
    writeln!(
        f,
        "{} | {}",
        solution.solution_type, solution.implementation_stage
    )?;
    write_text(f, None, &solution.summary)?;
    write_text(f, Some("How it works"), &solution.deep_dive)?;
    score_line(f, "Adoption 2026", solution.adoption_score_2026, scale)?;
    score_line(f, "Adoption 2035", solution.adoption_score_2035, scale)?;
    write_timeline(f, "Adoption trajectory", &solution.timeline_narrative)?;
    if !solution.key_players.is_empty() {
        writeln!(f, "Key players: {}", solution.key_players.join(", "))?;
    }
    write_list(f, "Barriers", &solution.barriers)?;
    Ok(())
}

fn write_text(f: &mut fmt::Formatter<'_>, heading: Option<&str>, text: &str) -> fmt::Result {
    if text.is_empty() {
        return Ok(());
    }
    if let Some(heading) = heading {
        writeln!(f, "{heading}:")?;
    }
    writeln!(f, "{text}")
}

fn write_list(f: &mut fmt::Formatter<'_>, heading: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "{heading}:")?;
    for item in items {
        writeln!(f, "  * {item}")?;
    }
    Ok(())
}

fn write_timeline(
    f: &mut fmt::Formatter<'_>,
    heading: &str,
    timeline: &TimelineNarrative,
) -> fmt::Result {
    let stages = [
        ("Near term", &timeline.near_term),
        ("Mid term", &timeline.mid_term),
        ("Long term", &timeline.long_term),
    ];
    if stages.iter().all(|(_, text)| text.is_empty()) {
        return Ok(());
    }
    writeln!(f, "{heading}:")?;
    for (label, text) in stages {
        if !text.is_empty() {
            writeln!(f, "  {label}: {text}")?;
        }
    }
    Ok(())
}

fn score_line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    score: f64,
    scale: ScoreScale,
) -> fmt::Result {
    writeln!(f, "{label:<18} {score:>5.1} {}", bar(scale.fraction(score)))
}

fn bar(fraction: f64) -> String {
    let filled = (fraction * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use observatory_common::{Collection, FetchError, SeedDataset};
    use observatory_dashboard::{DashboardEvent, DashboardState};
    use observatory_store::RepositoryState;
    use serde_json::json;

    fn snapshot() -> RepositoryState {
        let risks: Vec<Risk> = serde_json::from_value(json!([
            {
                "id": "R01", "risk_name": "Deepfake Fraud", "category": "Security",
                "score_2026": 9.5, "score_2035": 4.0, "velocity": "High",
                "connected_to": ["R02"], "expert_severity": 9.5, "public_perception": 6.2
            },
            {
                "id": "R02", "risk_name": "Labour Displacement", "category": "Economic",
                "score_2026": 3.0, "score_2035": 9.8, "velocity": "Medium"
            }
        ]))
        .unwrap();
        let solutions: Vec<Solution> = serde_json::from_value(json!([
            {
                "id": "S01", "parent_risk_id": "R01", "solution_title": "Content Provenance",
                "solution_type": "Technical", "adoption_score_2026": 2.5, "adoption_score_2035": 7.0
            }
        ]))
        .unwrap();
        loaded(risks, solutions)
    }

    fn loaded(risks: Vec<Risk>, solutions: Vec<Solution>) -> RepositoryState {
        RepositoryState {
            risks: risks.into(),
            solutions: solutions.into(),
            loading: false,
            errors: Vec::new(),
            loaded_at: None,
        }
    }

    fn production() -> (SeedDataset, RepositoryState) {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../data")
            .join("production.json");
        let dataset = SeedDataset::from_path(&path).unwrap();
        let snapshot = loaded(dataset.risks.clone(), dataset.solutions.clone());
        (dataset, snapshot)
    }

    fn render(state: &DashboardState, snapshot: &RepositoryState) -> String {
        Rendered(&DashboardView::build(state, snapshot)).to_string()
    }

    #[test]
    fn test_bar_scales_to_width() {
        assert_eq!(bar(0.0), ".".repeat(BAR_WIDTH));
        assert_eq!(bar(1.0), "#".repeat(BAR_WIDTH));
        assert_eq!(bar(0.5).matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_default_view_lists_open_tier_and_detail() {
        let out = render(&DashboardState::default(), &snapshot());
        assert!(out.contains("- Critical (Now)"));
        assert!(out.contains("+ Horizon (2040s) (1)"));
        assert!(!out.contains("Emerging"), "empty tier is hidden");
        assert!(out.contains("Awareness gap: 3.3 (significant)"));
        assert!(out.contains("Explore solution: S01 Content Provenance"));
        assert!(out.contains("Connected risks:"));
    }

    #[test]
    fn test_risk_panel_shows_full_record() {
        let (dataset, snapshot) = production();
        let out = render(&DashboardState::default(), &snapshot);
        let r01 = dataset.risks.iter().find(|r| r.id == "R01").unwrap();

        assert!(out.contains("Deep dive:"));
        assert!(out.contains(&r01.deep_dive));
        assert!(out.contains("Evolution timeline:"));
        let timeline = &r01.timeline_narrative;
        assert!(out.contains(&format!("Near term: {}", timeline.near_term)));
        assert!(out.contains(&format!("Long term: {}", timeline.long_term)));
        assert!(out.contains("Mitigation strategies:"));
        for strategy in &r01.mitigation_strategies {
            assert!(out.contains(&format!("  * {strategy}")));
        }
        assert!(out.contains("<https://example.com/deepfake-senator>"));
    }

    #[test]
    fn test_solution_panel_shows_full_record() {
        let (dataset, snapshot) = production();
        let mut state = DashboardState::default();
        state.apply(DashboardEvent::ToggleMode);
        let out = render(&state, &snapshot);
        let s01 = dataset.solutions.iter().find(|s| s.id == "S01").unwrap();

        assert!(out.contains("How it works:"));
        assert!(out.contains(&s01.deep_dive));
        assert!(out.contains("Adoption trajectory:"));
        let timeline = &s01.timeline_narrative;
        assert!(out.contains(&format!("Near term: {}", timeline.near_term)));
        assert!(out.contains(&format!("Mid term: {}", timeline.mid_term)));
        assert!(out.contains("Barriers:"));
    }

    #[test]
    fn test_sparse_records_skip_empty_blocks() {
        let out = render(&DashboardState::default(), &snapshot());
        assert!(!out.contains("Deep dive:"));
        assert!(!out.contains("Evolution timeline:"));
        assert!(!out.contains("Mitigation strategies:"));
        assert!(!out.contains("Signal evidence:"));
    }

    #[test]
    fn test_solution_mode_shows_parent() {
        let mut state = DashboardState::default();
        state.apply(DashboardEvent::ToggleMode);
        let out = render(&state, &snapshot());
        assert!(out.contains("Addresses: R01 Deepfake Fraud"));
        assert!(out.contains("Adoption 2035"));
    }

    #[test]
    fn test_browsed_collection_error_is_inline() {
        let mut failed = snapshot();
        failed.solutions = Vec::new().into();
        failed
            .errors
            .push(FetchError::new(Collection::Solutions, "unavailable"));

        let mut state = DashboardState::default();
        state.apply(DashboardEvent::ToggleMode);
        let out = render(&state, &failed);
        assert!(out.contains("Error: Failed to fetch solutions: unavailable"));
        assert!(out.contains("Select a solution"));
    }

    #[test]
    fn test_loading_placeholder() {
        let out = render(&DashboardState::default(), &RepositoryState::initial());
        assert!(out.contains("Loading..."));
    }
}
