use observatory_common::Collection;
use tracing::debug;

use crate::tier::Tier;
use crate::year::Year;

pub const DEFAULT_RISK_ID: &str = "R01";
pub const DEFAULT_SOLUTION_ID: &str = "S01";

/// The two browsing contexts. Each browses its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Monitor,
    Solution,
}

impl Mode {
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Monitor => Mode::Solution,
            Mode::Solution => Mode::Monitor,
        }
    }

    /// Id selected whenever this mode is entered.
    pub fn default_selection(self) -> &'static str {
        match self {
            Mode::Monitor => DEFAULT_RISK_ID,
            Mode::Solution => DEFAULT_SOLUTION_ID,
        }
    }

    pub fn browses(self) -> Collection {
        match self {
            Mode::Monitor => Collection::Risks,
            Mode::Solution => Collection::Solutions,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Monitor => write!(f, "monitor"),
            Mode::Solution => write!(f, "solution"),
        }
    }
}

/// Open/closed flag per tier section. Starts from each tier's static default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionState {
    open: [bool; 3],
}

impl Default for AccordionState {
    fn default() -> Self {
        Self {
            open: Tier::ALL.map(Tier::default_open),
        }
    }
}

impl AccordionState {
    pub fn is_open(&self, tier: Tier) -> bool {
        self.open[tier.index()]
    }

    pub fn toggle(&mut self, tier: Tier) {
        let slot = &mut self.open[tier.index()];
        *slot = !*slot;
    }
}

/// User interactions the dashboard reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// Click on a list item or a linked risk.
    Select(String),
    ClearSelection,
    /// Flip mode; selection resets to the new mode's default id.
    ToggleMode,
    SetYear(i32),
    ToggleSection(Tier),
    /// "Explore solution" from a risk: solution mode with that solution selected.
    ExploreSolution(String),
    /// "Addresses" link from a solution: monitor mode with that risk selected.
    OpenParentRisk(String),
}

/// Client-local dashboard state. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub mode: Mode,
    pub year: Year,
    pub selected_id: Option<String>,
    pub sections: AccordionState,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            mode: Mode::Monitor,
            year: Year::default(),
            selected_id: Some(DEFAULT_RISK_ID.to_string()),
            sections: AccordionState::default(),
        }
    }
}

impl DashboardState {
    pub fn apply(&mut self, event: DashboardEvent) {
        debug!(?event, mode = %self.mode, "Dashboard event");
        match event {
            DashboardEvent::Select(id) => self.selected_id = Some(id),
            DashboardEvent::ClearSelection => self.selected_id = None,
            DashboardEvent::ToggleMode => {
                self.mode = self.mode.toggled();
                self.selected_id = Some(self.mode.default_selection().to_string());
            }
            DashboardEvent::SetYear(year) => self.year = Year::new(year),
            DashboardEvent::ToggleSection(tier) => self.sections.toggle(tier),
            DashboardEvent::ExploreSolution(id) => {
                self.mode = Mode::Solution;
                self.selected_id = Some(id);
            }
            DashboardEvent::OpenParentRisk(id) => {
                self.mode = Mode::Monitor;
                self.selected_id = Some(id);
            }
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id.as_deref() == Some(id)
    }
}
