//! Selection and filtering over a loaded risk/solution snapshot.
//!
//! Everything here is a pure derivation from the repository state plus the
//! client-local dashboard state (mode, year, selected id, open sections).

pub mod awareness;
pub mod selection;
pub mod state;
pub mod tier;
pub mod view;
pub mod year;

pub use awareness::{awareness_gap, has_awareness_gap, AWARENESS_GAP_THRESHOLD};
pub use selection::{connected_risks, Selection};
pub use state::{
    AccordionState, DashboardEvent, DashboardState, Mode, DEFAULT_RISK_ID, DEFAULT_SOLUTION_ID,
};
pub use tier::{Tier, TieredRisks, MID_TERM_THRESHOLD, NEAR_TERM_THRESHOLD};
pub use view::{
    DashboardView, Detail, IndexPanel, LinksPanel, RiskEntry, SolutionEntry, TierSection,
};
pub use year::{display_score, Year};
