//! Secondary pressure selection: floor, saturation tracking, or gas-law
//! inventory, with a hysteresis guard on reversion.
//!
//! All three candidate pressures are computed every tick; the committed
//! value comes from an explicit branch state machine recorded in
//! `SimulationState::pressure_source`. Once saturation tracking has lifted
//! pressure off the floor, a transient dip of the hottest node below local
//! saturation does not hand authority back: reversion waits until the
//! saturation-implied pressure falls to the inventory-derived value, which
//! is what prevents a several-hundred-psi snap mid-transient.

use crate::config::SecondaryConfig;
use crate::state::{PressureSource, SimulationState};
use sgt_core::constants::rankine;
use sgt_water::{SteamTables, gas};
use tracing::debug;

/// All three candidates for one tick, kept for diagnostics and tests.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PressureCandidates {
    pub floor_psia: f64,
    pub saturation_psia: f64,
    pub inventory_psia: f64,
}

/// Refresh the gas-space volume from current liquid inventory.
pub(crate) fn refresh_steam_space(
    cfg: &SecondaryConfig,
    tables: &dyn SteamTables,
    state: &mut SimulationState,
) {
    let rho = tables.rho_liquid_lbm_per_ft3(state.hottest_temp_f(), state.pressure_psia);
    let liquid_ft3 = if rho > 0.0 {
        state.secondary_mass_lbm / rho
    } else {
        0.0
    };
    state.steam_space_ft3 = (cfg.secondary_volume_ft3 - liquid_ft3).max(cfg.min_steam_space_ft3);
}

/// Ideal-gas partial-pressure sum over nitrogen and tracked steam.
pub(crate) fn inventory_pressure_psia(state: &SimulationState) -> f64 {
    let t_r = rankine(state.hottest_temp_f());
    gas::partial_pressure_psia(state.nitrogen_mass_lbm, gas::R_NITROGEN, t_r, state.steam_space_ft3)
        + gas::partial_pressure_psia(
            state.steam_inventory_lbm,
            gas::R_STEAM,
            t_r,
            state.steam_space_ft3,
        )
}

/// Compute the candidates, run the branch selection, and commit pressure
/// and saturation temperature into the state.
pub(crate) fn select(
    cfg: &SecondaryConfig,
    tables: &dyn SteamTables,
    state: &mut SimulationState,
) -> PressureCandidates {
    refresh_steam_space(cfg, tables, state);

    let floor = cfg.floor_pressure_psia;
    let p_sat_hot = tables.p_sat_psia(state.hottest_temp_f());
    let sat_cap = cfg.ceiling_psia.min(cfg.setpoint_psia);
    let candidates = PressureCandidates {
        floor_psia: floor,
        saturation_psia: p_sat_hot.clamp(floor, sat_cap),
        inventory_psia: inventory_pressure_psia(state).min(cfg.ceiling_psia),
    };

    let previous = state.pressure_source;
    let (source, pressure) = if state.isolated {
        // closed boundary: the tracked gas inventory is authoritative
        (PressureSource::InventoryDerived, candidates.inventory_psia)
    } else {
        match previous {
            PressureSource::Floor => {
                if p_sat_hot > floor {
                    (PressureSource::Saturation, candidates.saturation_psia)
                } else {
                    (PressureSource::Floor, candidates.floor_psia)
                }
            }
            PressureSource::Saturation => {
                // reversion guard: stay authoritative through dips of the
                // hottest node below saturation
                if p_sat_hot <= candidates.inventory_psia {
                    if candidates.inventory_psia > floor {
                        (PressureSource::InventoryDerived, candidates.inventory_psia)
                    } else {
                        (PressureSource::Floor, candidates.floor_psia)
                    }
                } else {
                    (PressureSource::Saturation, candidates.saturation_psia)
                }
            }
            PressureSource::InventoryDerived => {
                if p_sat_hot > candidates.inventory_psia.max(floor) {
                    (PressureSource::Saturation, candidates.saturation_psia)
                } else if candidates.inventory_psia > floor {
                    (PressureSource::InventoryDerived, candidates.inventory_psia)
                } else {
                    (PressureSource::Floor, candidates.floor_psia)
                }
            }
        }
    };

    if source != previous {
        debug!(
            from = ?previous,
            to = ?source,
            pressure_psia = pressure,
            "pressure source changed"
        );
    }

    state.pressure_source = source;
    state.pressure_psia = pressure;
    state.sat_temp_f = tables.t_sat_f(pressure);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DrainState, GovernorMemory, NodeState, Regime};
    use sgt_water::CorrelationTables;

    fn state_with(top_temp_f: f64) -> SimulationState {
        SimulationState {
            nodes: vec![
                NodeState {
                    temp_f: top_temp_f,
                    heat_btu_per_hr: 0.0,
                    effective_area_frac: 0.1,
                    htc: 0.0,
                    boil_blend: 0.0,
                    boiling: false,
                },
                NodeState {
                    temp_f: 100.0,
                    heat_btu_per_hr: 0.0,
                    effective_area_frac: 0.1,
                    htc: 0.0,
                    boil_blend: 0.0,
                    boiling: false,
                },
            ],
            regime: Regime::Subcooled,
            thermocline_ft: 30.0,
            active_time_s: 0.0,
            secondary_mass_lbm: 180_000.0,
            vaporized_total_lbm: 0.0,
            steam_inventory_lbm: 0.0,
            steam_space_ft3: 1_000.0,
            nitrogen_mass_lbm: 110.0,
            pressure_psia: 17.0,
            sat_temp_f: 219.4,
            pressure_source: PressureSource::Floor,
            drain: DrainState::default(),
            level_wide_frac: 1.0,
            level_narrow_frac: 1.0,
            isolated: false,
            line_sink_temp_f: 100.0,
            governor: GovernorMemory::default(),
        }
    }

    fn fixture() -> (SecondaryConfig, CorrelationTables) {
        (SecondaryConfig::default(), CorrelationTables::new().unwrap())
    }

    #[test]
    fn cold_pool_stays_on_floor() {
        let (cfg, tables) = fixture();
        let mut s = state_with(150.0);
        select(&cfg, &tables, &mut s);
        assert_eq!(s.pressure_source, PressureSource::Floor);
        assert_eq!(s.pressure_psia, cfg.floor_pressure_psia);
    }

    #[test]
    fn hot_node_lifts_to_saturation_branch() {
        let (cfg, tables) = fixture();
        let mut s = state_with(250.0);
        select(&cfg, &tables, &mut s);
        assert_eq!(s.pressure_source, PressureSource::Saturation);
        assert!(s.pressure_psia > cfg.floor_pressure_psia);
        assert!((s.sat_temp_f - 250.0).abs() < 0.5);
    }

    #[test]
    fn saturation_branch_survives_single_tick_dip() {
        let (cfg, tables) = fixture();
        let mut s = state_with(400.0);
        select(&cfg, &tables, &mut s);
        assert_eq!(s.pressure_source, PressureSource::Saturation);
        let p_high = s.pressure_psia;
        assert!(p_high > 200.0);

        // hottest node dips below local saturation for one tick
        s.nodes[0].temp_f = s.sat_temp_f - 5.0;
        select(&cfg, &tables, &mut s);
        assert_eq!(s.pressure_source, PressureSource::Saturation);
        assert!(
            s.pressure_psia > 0.8 * p_high,
            "dip snapped pressure from {p_high} to {}",
            s.pressure_psia
        );
    }

    #[test]
    fn saturation_reverts_once_implied_pressure_collapses() {
        let (cfg, tables) = fixture();
        let mut s = state_with(250.0);
        select(&cfg, &tables, &mut s);
        assert_eq!(s.pressure_source, PressureSource::Saturation);

        // cool everything far below the floor's saturation temperature
        s.nodes[0].temp_f = 120.0;
        s.nodes[1].temp_f = 100.0;
        select(&cfg, &tables, &mut s);
        assert_ne!(s.pressure_source, PressureSource::Saturation);
        assert!(s.pressure_psia <= cfg.floor_pressure_psia + 1.0);
    }

    #[test]
    fn saturation_clamped_at_setpoint() {
        let (cfg, tables) = fixture();
        let mut s = state_with(600.0);
        select(&cfg, &tables, &mut s);
        assert_eq!(s.pressure_source, PressureSource::Saturation);
        assert!(s.pressure_psia <= cfg.setpoint_psia + 1e-9);
    }

    #[test]
    fn isolation_makes_inventory_authoritative() {
        let (cfg, tables) = fixture();
        let mut s = state_with(300.0);
        s.isolated = true;
        s.steam_inventory_lbm = 500.0;
        select(&cfg, &tables, &mut s);
        assert_eq!(s.pressure_source, PressureSource::InventoryDerived);

        // more trapped steam, more pressure
        let p1 = s.pressure_psia;
        s.steam_inventory_lbm = 1_000.0;
        select(&cfg, &tables, &mut s);
        assert!(s.pressure_psia > p1);
    }

    #[test]
    fn steam_space_respects_minimum_cushion() {
        let (cfg, tables) = fixture();
        let mut s = state_with(200.0);
        s.secondary_mass_lbm = 1.0e9; // absurd overfill
        refresh_steam_space(&cfg, &tables, &mut s);
        assert_eq!(s.steam_space_ft3, cfg.min_steam_space_ft3);
    }
}
