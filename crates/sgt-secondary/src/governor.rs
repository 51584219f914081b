//! Continuity governor: bounds the tick-to-tick change of reported total
//! heat removal.
//!
//! Per-node blending absorbs most regime-boundary discontinuities; this
//! clamp catches the residue. Genuine boundary-condition changes pass
//! through unclamped: a change in circulation-unit count, or the tick the
//! pool first enters pressure regulation. The memory lives in
//! `SimulationState` so independent generator instances never share clamp
//! history; `last_total_mw` starts `None`, which exempts the first tick.

use crate::config::SecondaryConfig;
use crate::state::{Regime, SimulationState};
use tracing::debug;

/// Clamp `total_mw` against the previous tick and refresh the memory.
pub(crate) fn apply(
    cfg: &SecondaryConfig,
    state: &mut SimulationState,
    total_mw: f64,
    pump_count: u32,
    regime: Regime,
) -> f64 {
    let mem = &state.governor;
    let pump_edge = pump_count != mem.last_pump_count;
    let regulation_edge =
        regime == Regime::PressureRegulated && mem.last_regime != Regime::PressureRegulated;

    let reported = match mem.last_total_mw {
        Some(prev) if !pump_edge && !regulation_edge => {
            let clamped = total_mw.clamp(prev - cfg.governor_clamp_mw, prev + cfg.governor_clamp_mw);
            if clamped != total_mw {
                debug!(raw_mw = total_mw, clamped_mw = clamped, "continuity clamp engaged");
            }
            clamped
        }
        _ => total_mw,
    };

    state.governor.last_total_mw = Some(reported);
    state.governor.last_pump_count = pump_count;
    state.governor.last_regime = regime;
    reported
}
