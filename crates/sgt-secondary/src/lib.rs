//! sgt-secondary: multi-node secondary-side thermal-regime engine.
//!
//! A vertically stratified lumped-node model of one steam generator
//! secondary during plant heatup: subcooled closed pool, open boiling,
//! then pressure-regulated heat rejection, with mass/energy conservation
//! across the transitions and explicit anti-discontinuity smoothing.
//!
//! Contains:
//! - config (validated plant constants)
//! - state (`SimulationState`, `NodeState`, regime/pressure/drain enums)
//! - stratify (thermocline tracking, per-node effective area)
//! - regime (per-tick three-way classification)
//! - heat (blended subcooled/boiling node energy balance)
//! - pressure (floor / saturation / inventory branch selection)
//! - ledger (steam production, draining, levels, conservation check)
//! - governor (tick-to-tick continuity clamp)
//! - engine (`SecondarySide`: the operation surface)

pub mod config;
pub mod engine;
pub mod error;
pub mod state;

mod governor;
mod heat;
mod ledger;
mod pressure;
mod regime;
mod stratify;

pub use config::SecondaryConfig;
pub use engine::{SecondarySide, TickInputs, UpdateResult};
pub use error::{SecondaryError, SecondaryResult};
pub use state::{
    DrainPhase, DrainState, GovernorMemory, NodeState, PressureSource, Regime, SimulationState,
};
