//! The secondary-side model and its operation surface.
//!
//! `SecondarySide` owns the validated configuration and the derived node
//! geometry; all transient data lives in `SimulationState`, which it
//! creates and mutates. The property provider is borrowed per call so one
//! provider can back any number of generator instances.

use crate::config::SecondaryConfig;
use crate::error::SecondaryResult;
use crate::state::{
    DrainPhase, DrainState, GovernorMemory, NodeState, PressureSource, Regime, SimulationState,
};
use crate::{governor, heat, ledger, pressure, regime, stratify};
use serde::{Deserialize, Serialize};
use sgt_core::constants::btu_per_hr_to_mw;
use sgt_core::{PiecewiseLinear, Pressure, Temperature};
use sgt_water::SteamTables;
use std::fmt::Write as _;
use tracing::debug;
use uom::si::pressure::pound_force_per_square_inch;
use uom::si::thermodynamic_temperature::degree_fahrenheit;

/// Boundary conditions supplied by the engine loop each tick.
#[derive(Debug, Clone, Copy)]
pub struct TickInputs {
    /// Primary-side bulk temperature
    pub primary_temp: Temperature,
    /// Reactor coolant pumps (or equivalent forced-circulation units) running
    pub pumps_active: u32,
    /// Primary-side pressure; pass-through telemetry for the debug stream
    pub primary_pressure: Pressure,
    /// Simulation clock, s
    pub sim_time_s: f64,
}

/// Everything the surrounding engine reads back from one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResult {
    pub heat_total_mw: f64,
    pub heat_total_btu_per_hr: f64,
    pub bulk_temp_f: f64,
    pub top_temp_f: f64,
    pub bottom_temp_f: f64,
    pub thermocline_ft: f64,
    pub active_area_frac: f64,
    pub regime: Regime,
    pub steam_rate_lbm_per_hr: f64,
    pub secondary_mass_lbm: f64,
    pub drain_phase: DrainPhase,
    pub drain_rate_lbm_per_hr: f64,
    pub level_wide_frac: f64,
    pub level_narrow_frac: f64,
    pub pressure_psia: f64,
    pub sat_temp_f: f64,
    pub pressure_source: PressureSource,
    pub steam_inventory_lbm: f64,
    pub isolated: bool,
}

/// One steam generator secondary side.
pub struct SecondarySide {
    config: SecondaryConfig,
    /// Node vertical extents (bottom, top) in ft, index 0 = top
    spans: Vec<(f64, f64)>,
    temp_eff: PiecewiseLinear,
}

impl SecondarySide {
    /// Validate the configuration and derive the node geometry.
    pub fn new(config: SecondaryConfig) -> SecondaryResult<Self> {
        config.validate()?;
        let temp_eff = PiecewiseLinear::new(config.temp_effectiveness.clone())?;

        // stack nodes top-down, heights proportional to mass fraction
        let mut top = config.total_height_ft;
        let spans = config
            .node_mass_fractions
            .iter()
            .map(|f| {
                let bottom = top - f * config.total_height_ft;
                let span = (bottom, top);
                top = bottom;
                span
            })
            .collect();

        Ok(Self {
            config,
            spans,
            temp_eff,
        })
    }

    pub fn config(&self) -> &SecondaryConfig {
        &self.config
    }

    /// Fresh state: all nodes at the initial temperature, thermocline at
    /// the top of the bundle, pressure on the floor.
    pub fn init_state(&self, tables: &dyn SteamTables, initial_temp: Temperature) -> SimulationState {
        let cfg = &self.config;
        let t_f = initial_temp.get::<degree_fahrenheit>();
        let mut state = SimulationState {
            nodes: vec![
                NodeState {
                    temp_f: t_f,
                    heat_btu_per_hr: 0.0,
                    effective_area_frac: 0.0,
                    htc: 0.0,
                    boil_blend: 0.0,
                    boiling: false,
                };
                cfg.n_nodes()
            ],
            regime: Regime::Subcooled,
            thermocline_ft: cfg.total_height_ft,
            active_time_s: 0.0,
            secondary_mass_lbm: cfg.initial_mass_lbm,
            vaporized_total_lbm: 0.0,
            steam_inventory_lbm: 0.0,
            steam_space_ft3: cfg.min_steam_space_ft3,
            nitrogen_mass_lbm: cfg.nitrogen_mass_lbm,
            pressure_psia: cfg.floor_pressure_psia,
            sat_temp_f: tables.t_sat_f(cfg.floor_pressure_psia),
            pressure_source: PressureSource::Floor,
            drain: DrainState::default(),
            level_wide_frac: 1.0,
            level_narrow_frac: 1.0,
            isolated: false,
            line_sink_temp_f: t_f,
            governor: GovernorMemory::default(),
        };
        pressure::refresh_steam_space(cfg, tables, &mut state);
        stratify::advance(cfg, &self.spans, &mut state, false, 0.0);
        state
    }

    /// Advance one tick. Step order: stratification, pressure selection,
    /// regime classification, node heat transfer and temperature
    /// integration, mass/energy ledger, gas-space refresh, continuity
    /// governor, report.
    pub fn update(
        &self,
        tables: &dyn SteamTables,
        state: &mut SimulationState,
        inputs: &TickInputs,
        dt_s: f64,
    ) -> UpdateResult {
        let cfg = &self.config;
        let t_primary_f = inputs.primary_temp.get::<degree_fahrenheit>();
        let pump_frac =
            (f64::from(inputs.pumps_active) / f64::from(cfg.pump_count_rated)).min(1.0);
        let circulating = inputs.pumps_active > 0;

        stratify::advance(cfg, &self.spans, state, circulating, dt_s);
        pressure::select(cfg, tables, state);

        let prev_regime = state.regime;
        let regime_now = regime::classify(cfg.setpoint_psia, state);
        if regime_now != prev_regime {
            debug!(from = ?prev_regime, to = ?regime_now, "regime transition");
        }

        let split = heat::advance(cfg, &self.temp_eff, tables, state, t_primary_f, pump_frac, dt_s);
        let rates = ledger::advance(cfg, tables, state, split.latent_btu_per_hr, dt_s);

        // post-ledger refresh so the recorded gas space and, behind a
        // closed boundary, the committed pressure reflect this tick's
        // inventory
        pressure::refresh_steam_space(cfg, tables, state);
        if state.isolated {
            state.pressure_psia = pressure::inventory_pressure_psia(state).min(cfg.ceiling_psia);
            state.sat_temp_f = tables.t_sat_f(state.pressure_psia);
        }

        let total_mw = governor::apply(
            cfg,
            state,
            btu_per_hr_to_mw(split.total_btu_per_hr),
            inputs.pumps_active,
            regime_now,
        );

        debug!(
            sim_time_s = inputs.sim_time_s,
            primary_temp_f = t_primary_f,
            primary_pressure_psia = inputs.primary_pressure.get::<pound_force_per_square_inch>(),
            heat_total_mw = total_mw,
            pressure_psia = state.pressure_psia,
            regime = ?regime_now,
            "secondary tick"
        );

        UpdateResult {
            heat_total_mw: total_mw,
            heat_total_btu_per_hr: sgt_core::constants::mw_to_btu_per_hr(total_mw),
            bulk_temp_f: state.bulk_temp_f(&cfg.node_mass_fractions),
            top_temp_f: state.nodes.first().map_or(0.0, |n| n.temp_f),
            bottom_temp_f: state.nodes.last().map_or(0.0, |n| n.temp_f),
            thermocline_ft: state.thermocline_ft,
            active_area_frac: state.active_area_frac(),
            regime: regime_now,
            steam_rate_lbm_per_hr: rates.steam_lbm_per_hr,
            secondary_mass_lbm: state.secondary_mass_lbm,
            drain_phase: state.drain.phase,
            drain_rate_lbm_per_hr: rates.drain_lbm_per_hr,
            level_wide_frac: state.level_wide_frac,
            level_narrow_frac: state.level_narrow_frac,
            pressure_psia: state.pressure_psia,
            sat_temp_f: state.sat_temp_f,
            pressure_source: state.pressure_source,
            steam_inventory_lbm: state.steam_inventory_lbm,
            isolated: state.isolated,
        }
    }

    /// Start the scheduled drain. Idempotent: a second request, or a
    /// request after completion, does nothing.
    pub fn begin_draining(&self, state: &mut SimulationState, sim_time_s: f64) {
        if state.drain.phase != DrainPhase::Idle {
            return;
        }
        state.drain.phase = DrainPhase::Active;
        state.drain.started_at_s = Some(sim_time_s);
        debug!(sim_time_s, "secondary draining started");
    }

    /// Open or close the secondary boundary. Opening vents any tracked
    /// steam inventory.
    pub fn set_isolation(&self, state: &mut SimulationState, isolated: bool) {
        if state.isolated == isolated {
            return;
        }
        state.isolated = isolated;
        if !isolated {
            state.steam_inventory_lbm = 0.0;
        }
        debug!(isolated, "secondary isolation changed");
    }

    /// Human-readable state dump for the operator console. No parseable
    /// contract; use `UpdateResult` for anything programmatic.
    pub fn diagnostic_summary(&self, state: &SimulationState, primary_temp: Temperature) -> String {
        let mut out = String::new();
        let t_primary_f = primary_temp.get::<degree_fahrenheit>();
        let _ = writeln!(out, "secondary side @ primary {t_primary_f:7.1} F");
        let _ = writeln!(
            out,
            "  regime {:?}  pressure {:7.1} psia ({:?})  t_sat {:6.1} F",
            state.regime, state.pressure_psia, state.pressure_source, state.sat_temp_f
        );
        let _ = writeln!(
            out,
            "  mass {:9.0} lbm  vaporized {:8.0} lbm  drained {:8.0} lbm ({:?})",
            state.secondary_mass_lbm,
            state.vaporized_total_lbm,
            state.drain.drained_lbm,
            state.drain.phase
        );
        let _ = writeln!(
            out,
            "  level wide {:5.1}%  narrow {:5.1}%  thermocline {:5.2} ft  isolated {}",
            100.0 * state.level_wide_frac,
            100.0 * state.level_narrow_frac,
            state.thermocline_ft,
            state.isolated
        );
        for (i, node) in state.nodes.iter().enumerate() {
            let _ = writeln!(
                out,
                "  node {i}: {:6.1} F  q {:10.0} BTU/hr  area {:5.3}  blend {:4.2}{}",
                node.temp_f,
                node.heat_btu_per_hr,
                node.effective_area_frac,
                node.boil_blend,
                if node.boiling { "  boiling" } else { "" }
            );
        }
        out
    }
}
