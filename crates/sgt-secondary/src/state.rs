//! Cross-tick state for one steam generator secondary side.
//!
//! Everything the transient carries between ticks lives here, including
//! the continuity-governor memory, so independent generator instances
//! never share hidden state.

use serde::{Deserialize, Serialize};

/// Heat-transfer regime of the secondary pool as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Regime {
    /// Closed subcooled pool; no steam production.
    #[default]
    Subcooled,
    /// At least one node at local saturation, open boiling.
    Boiling,
    /// Secondary pressure held at the regulation setpoint.
    PressureRegulated,
}

/// Which branch produced the committed pressure this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PressureSource {
    /// Configured nitrogen-blanket floor.
    #[default]
    Floor,
    /// Saturation pressure of the hottest node (open venting).
    Saturation,
    /// Ideal-gas sum over tracked nitrogen and steam inventory (closed).
    InventoryDerived,
}

/// Drain progress. `Complete` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrainPhase {
    #[default]
    Idle,
    Active,
    Complete,
}

/// One vertical node of the secondary pool, index 0 = uppermost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeState {
    /// Bulk temperature in degF
    pub temp_f: f64,
    /// Heat into this node last tick, BTU/hr
    pub heat_btu_per_hr: f64,
    /// Effective wetted-area fraction of total heat area
    pub effective_area_frac: f64,
    /// Heat-transfer coefficient last tick, BTU/(hr.ft2.degF)
    pub htc: f64,
    /// Blend between the subcooled and boiling laws, 0..1
    pub boil_blend: f64,
    /// Node classified at local saturation this tick
    pub boiling: bool,
}

/// Drain bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrainState {
    pub phase: DrainPhase,
    /// Cumulative mass removed by draining, lbm
    pub drained_lbm: f64,
    /// Simulation time draining was requested, s
    pub started_at_s: Option<f64>,
}

/// Continuity-governor memory (previous-tick snapshot).
///
/// `last_total_mw` is `None` exactly once, before the first update, which
/// is why the first tick is never clamped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GovernorMemory {
    pub last_total_mw: Option<f64>,
    pub last_pump_count: u32,
    pub last_regime: Regime,
}

/// Full secondary-side state, created by `SecondarySide::init_state` and
/// mutated only through the per-tick update and the two narrow commands
/// (begin draining, set isolation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Stratification nodes, top to bottom. Length is fixed after init.
    pub nodes: Vec<NodeState>,

    pub regime: Regime,

    /// Thermocline height above the bundle bottom, ft
    pub thermocline_ft: f64,
    /// Accumulated time with forced circulation running, s
    pub active_time_s: f64,

    /// Liquid mass in the secondary, lbm
    pub secondary_mass_lbm: f64,
    /// Cumulative mass vaporized since init, lbm
    pub vaporized_total_lbm: f64,
    /// Steam held in the gas space while isolated, lbm
    pub steam_inventory_lbm: f64,
    /// Gas/steam space above the liquid, ft3
    pub steam_space_ft3: f64,
    /// Inert blanket gas mass, lbm
    pub nitrogen_mass_lbm: f64,

    /// Committed secondary pressure, psia
    pub pressure_psia: f64,
    /// Saturation temperature at the committed pressure, degF
    pub sat_temp_f: f64,
    pub pressure_source: PressureSource,

    pub drain: DrainState,
    /// Wide-range level indication, 0..1
    pub level_wide_frac: f64,
    /// Narrow-range level indication, 0..1
    pub level_narrow_frac: f64,

    /// Secondary boundary closed (true) or venting (false)
    pub isolated: bool,

    /// Steam-line lumped metal temperature, degF
    pub line_sink_temp_f: f64,

    pub governor: GovernorMemory,
}

impl SimulationState {
    /// Mass-weighted bulk temperature in degF.
    pub fn bulk_temp_f(&self, mass_fractions: &[f64]) -> f64 {
        self.nodes
            .iter()
            .zip(mass_fractions)
            .map(|(n, f)| n.temp_f * f)
            .sum()
    }

    /// Hottest node temperature in degF. Nodes are kept sorted hot-on-top
    /// only loosely; scan rather than trust index 0.
    pub fn hottest_temp_f(&self) -> f64 {
        self.nodes
            .iter()
            .map(|n| n.temp_f)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Sum of per-node effective area fractions, 0..1.
    pub fn active_area_frac(&self) -> f64 {
        self.nodes.iter().map(|n| n.effective_area_frac).sum()
    }
}
