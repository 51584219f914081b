//! Mass and energy bookkeeping: steam production net of the steam-line
//! condensation sink, scheduled draining, steam inventory, level maps,
//! and the conservation self-check.
//!
//! Every subtraction is floored at zero; the ledger can distort nothing
//! upstream of it. Conservation drift surfaces through the diagnostic
//! sink at two severities and never alters the physics.

use crate::config::SecondaryConfig;
use crate::state::{DrainPhase, SimulationState};
use sgt_core::constants::GAL_PER_FT3;
use sgt_core::unit_ramp;
use sgt_water::SteamTables;
use tracing::{debug, error, warn};

/// Relative drift that earns a warning; ten-thousandth earns an error.
const DRIFT_WARN: f64 = 1e-6;
const DRIFT_ERROR: f64 = 1e-4;

/// Rates reported out of one ledger tick.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LedgerRates {
    /// Steam production, lbm/hr
    pub steam_lbm_per_hr: f64,
    /// Draining removal, lbm/hr
    pub drain_lbm_per_hr: f64,
}

/// Advance the ledger one tick. `latent_btu_per_hr` is the blend-weighted
/// heat attributed to steam production by the node engine.
pub(crate) fn advance(
    cfg: &SecondaryConfig,
    tables: &dyn SteamTables,
    state: &mut SimulationState,
    latent_btu_per_hr: f64,
    dt_s: f64,
) -> LedgerRates {
    let dt_hr = dt_s.max(0.0) / 3_600.0;
    let mut rates = LedgerRates::default();

    // steam-line condensation sink: a lumped metal mass warming toward
    // saturation soaks up part of the latent heat, capped so production
    // stays positive whenever latent heat is positive
    let q_sink = line_sink_heat(cfg, state, latent_btu_per_hr, dt_s);
    let q_net = (latent_btu_per_hr - q_sink).max(0.0);

    let h_fg = tables.h_fg_btu_per_lbm(state.pressure_psia).max(1.0);
    let produced_lbm = (q_net * dt_hr / h_fg).min(state.secondary_mass_lbm);
    if produced_lbm > 0.0 {
        state.secondary_mass_lbm -= produced_lbm;
        state.vaporized_total_lbm += produced_lbm;
        rates.steam_lbm_per_hr = if dt_hr > 0.0 { produced_lbm / dt_hr } else { 0.0 };
    }

    // steam inventory only accumulates behind a closed boundary; open,
    // the outflow equals production and the space holds no tracked steam
    if state.isolated {
        state.steam_inventory_lbm += produced_lbm;
    } else {
        state.steam_inventory_lbm = 0.0;
    }

    rates.drain_lbm_per_hr = advance_drain(cfg, tables, state, dt_hr);

    let initial = cfg.initial_mass_lbm;
    state.level_wide_frac = level_frac(state.secondary_mass_lbm, initial, cfg.wide_range_span);
    state.level_narrow_frac = level_frac(state.secondary_mass_lbm, initial, cfg.narrow_range_span);

    check_conservation(cfg, state);
    rates
}

/// Energy into the steam-line metal this tick, BTU/hr, capped at the
/// configured fraction of latent heat. The metal temperature moves by the
/// capped energy, not the free relaxation, so the books stay closed.
fn line_sink_heat(
    cfg: &SecondaryConfig,
    state: &mut SimulationState,
    latent_btu_per_hr: f64,
    dt_s: f64,
) -> f64 {
    let capacity = cfg.line_sink_mass_lbm * cfg.line_sink_cp;
    if capacity <= 0.0 || latent_btu_per_hr <= 0.0 || dt_s <= 0.0 {
        return 0.0;
    }
    let dt_hr = dt_s / 3_600.0;
    let alpha = (dt_s / cfg.line_sink_tau_s).min(1.0);
    let rise_wanted = ((state.sat_temp_f - state.line_sink_temp_f) * alpha).max(0.0);
    let q_wanted = rise_wanted * capacity / dt_hr;
    let q_taken = q_wanted.min(cfg.line_sink_max_frac * latent_btu_per_hr);
    state.line_sink_temp_f += q_taken * dt_hr / capacity;
    q_taken
}

/// Scheduled draining at a fixed volumetric rate until the target mass
/// fraction, then permanently complete.
fn advance_drain(
    cfg: &SecondaryConfig,
    tables: &dyn SteamTables,
    state: &mut SimulationState,
    dt_hr: f64,
) -> f64 {
    if state.drain.phase != DrainPhase::Active {
        return 0.0;
    }
    let target_lbm = cfg.drain_target_frac * cfg.initial_mass_lbm;
    if state.secondary_mass_lbm <= target_lbm {
        state.drain.phase = DrainPhase::Complete;
        debug!(drained_lbm = state.drain.drained_lbm, "draining complete");
        return 0.0;
    }

    let t_bottom = state.nodes.last().map_or(100.0, |n| n.temp_f);
    let rho = tables.rho_liquid_lbm_per_ft3(t_bottom, state.pressure_psia);
    let rate_lbm_per_hr = cfg.drain_rate_gpm * 60.0 / GAL_PER_FT3 * rho;
    let removed = (rate_lbm_per_hr * dt_hr)
        .min(state.secondary_mass_lbm - target_lbm)
        .min(state.secondary_mass_lbm);
    state.secondary_mass_lbm -= removed;
    state.drain.drained_lbm += removed;
    if state.secondary_mass_lbm <= target_lbm {
        state.drain.phase = DrainPhase::Complete;
        debug!(drained_lbm = state.drain.drained_lbm, "draining complete");
    }
    rate_lbm_per_hr
}

/// Linear level indication from the mass fraction, clamped to [0, 1].
fn level_frac(mass_lbm: f64, initial_lbm: f64, span: (f64, f64)) -> f64 {
    let frac = if initial_lbm > 0.0 { mass_lbm / initial_lbm } else { 0.0 };
    unit_ramp(frac, span.0, span.1)
}

/// Non-fatal conservation self-check: initial fill should equal remaining
/// mass plus everything vaporized and drained.
fn check_conservation(cfg: &SecondaryConfig, state: &SimulationState) {
    let accounted =
        state.secondary_mass_lbm + state.vaporized_total_lbm + state.drain.drained_lbm;
    let drift = (cfg.initial_mass_lbm - accounted).abs() / cfg.initial_mass_lbm;
    if drift > DRIFT_ERROR {
        error!(drift, accounted_lbm = accounted, "secondary mass ledger drift");
    } else if drift > DRIFT_WARN {
        warn!(drift, accounted_lbm = accounted, "secondary mass ledger drift");
    }
}
