//! Per-node heat transfer with blended subcooled/boiling laws.
//!
//! Both laws are evaluated for every node every tick. A per-node blend
//! factor ramps from the subcooled law to the boiling law over a fixed
//! time constant once the node reaches local saturation, so coefficient,
//! driving temperature difference, and wetted area never step. The blend
//! resets to zero the first tick a node is not boiling; there is no
//! reverse ramp (downstream energy bookkeeping assumes the hard reset).

use crate::config::SecondaryConfig;
use crate::state::SimulationState;
use sgt_core::{PiecewiseLinear, lerp, smoothstep, unit_ramp};
use sgt_water::SteamTables;

/// Heat-capacity floor for a node, BTU/degF. Keeps the temperature
/// integration finite if draining empties a node.
const MIN_NODE_CAPACITY: f64 = 1.0;

/// Aggregate of one tick of node heat transfer.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HeatSplit {
    /// Total primary-to-secondary heat, BTU/hr
    pub total_btu_per_hr: f64,
    /// Blend-weighted share attributed to steam production, BTU/hr
    pub latent_btu_per_hr: f64,
}

/// Compute per-node heat rates, integrate node temperatures, and apply
/// inter-node diffusion. Boiling flags must be fresh (the classifier runs
/// first); `pump_frac` is the forced-circulation fraction in [0, 1].
pub(crate) fn advance(
    cfg: &SecondaryConfig,
    temp_eff: &PiecewiseLinear,
    tables: &dyn SteamTables,
    state: &mut SimulationState,
    t_primary_f: f64,
    pump_frac: f64,
    dt_s: f64,
) -> HeatSplit {
    let dt_hr = dt_s.max(0.0) / 3_600.0;
    let sat_f = state.sat_temp_f;
    let p_psia = state.pressure_psia;

    // Forced-side scale shared by the boiling coefficient and the film
    // back-solve. The common floor keeps |h_boil / h_film| below one, so
    // the lagged wall temperature stays a contraction at any pump count.
    let forced_scale = pump_frac.max(0.05);

    let h_sub_base = lerp(cfg.htc_noflow, cfg.htc_forced, pump_frac) * temp_eff.eval(t_primary_f);
    let p_frac = unit_ramp(p_psia, cfg.boil_htc_low_psia, cfg.boil_htc_high_psia);
    let h_boil = lerp(cfg.boil_htc_low, cfg.boil_htc_high, p_frac) * forced_scale;
    let h_film = cfg.primary_film_htc * forced_scale;

    let mut split = HeatSplit::default();
    let blend_step = dt_s / cfg.blend_ramp_s;
    let sat_pull = (dt_s / cfg.sat_pull_tau_s).min(1.0);

    for i in 0..state.nodes.len() {
        let cap = node_capacity(cfg, tables, state, i);
        let node = &mut state.nodes[i];
        let area_geom_frac = cfg.node_area_fractions[i];
        let area_geom_ft2 = area_geom_frac * cfg.heat_area_ft2;

        // subcooled law: stratified area, bulk driving difference, with a
        // smoothstepped bonus once the node carries positive superheat
        let superheat = node.temp_f - sat_f;
        let bonus = 1.0 + cfg.superheat_bonus * smoothstep(superheat / cfg.superheat_bonus_span_f);
        let h_sub = h_sub_base * bonus;
        let dt_sub = t_primary_f - node.temp_f;
        let area_sub_frac = node.effective_area_frac;

        // boiling law: full geometric area, wall-to-saturation driving
        // difference; the wall is back-solved from last tick's heat rate
        // through the primary-side film resistance
        let t_wall = (t_primary_f - node.heat_btu_per_hr / (h_film * area_geom_ft2))
            .clamp(sat_f.min(t_primary_f), t_primary_f);
        let dt_boil = t_wall - sat_f;

        if node.boiling {
            node.boil_blend = (node.boil_blend + blend_step).min(1.0);
        } else {
            node.boil_blend = 0.0;
        }
        let b = node.boil_blend;

        let h = lerp(h_sub, h_boil, b);
        let area_frac = lerp(area_sub_frac, area_geom_frac, b);
        let dt_drive = lerp(dt_sub, dt_boil, b);
        let q = (h * area_frac * cfg.heat_area_ft2 * dt_drive * cfg.bundle_penalty).max(0.0);

        node.htc = h;
        node.heat_btu_per_hr = q;
        split.total_btu_per_hr += q;
        split.latent_btu_per_hr += b * q;

        // sensible integration on the non-latent share
        node.temp_f += (1.0 - b) * q * dt_hr / cap;

        // pull a partially blended node toward saturation so nothing jumps
        // when the blend saturates and the node pins
        node.temp_f += (sat_f - node.temp_f) * b * sat_pull;
        if node.boiling {
            node.temp_f = node.temp_f.min(sat_f + cfg.max_superheat_f);
        }
    }

    diffuse(cfg, tables, state, dt_hr);
    split
}

/// Conductive exchange between adjacent nodes. Enhanced when exactly one
/// neighbor boils; skipped when both do (both pinned at saturation).
///
/// Pair energies are computed from the pre-step temperature field and
/// applied afterwards, so one tick moves heat one node at most.
fn diffuse(
    cfg: &SecondaryConfig,
    tables: &dyn SteamTables,
    state: &mut SimulationState,
    dt_hr: f64,
) {
    let n = state.nodes.len();
    if n < 2 {
        return;
    }
    let temps: Vec<f64> = state.nodes.iter().map(|node| node.temp_f).collect();
    let mut delta_f = vec![0.0_f64; n];
    for i in 0..n - 1 {
        let upper_boiling = state.nodes[i].boiling;
        let lower_boiling = state.nodes[i + 1].boiling;
        if upper_boiling && lower_boiling {
            continue;
        }
        let ua = if upper_boiling || lower_boiling {
            cfg.internode_ua * cfg.internode_boil_factor
        } else {
            cfg.internode_ua
        };
        let energy_btu = ua * (temps[i] - temps[i + 1]) * dt_hr;
        delta_f[i] -= energy_btu / node_capacity(cfg, tables, state, i);
        delta_f[i + 1] += energy_btu / node_capacity(cfg, tables, state, i + 1);
    }
    for (node, delta) in state.nodes.iter_mut().zip(delta_f) {
        node.temp_f += delta;
    }
}

/// Water-plus-metal heat capacity of one node, BTU/degF, floored.
fn node_capacity(
    cfg: &SecondaryConfig,
    tables: &dyn SteamTables,
    state: &SimulationState,
    i: usize,
) -> f64 {
    let water_lbm = cfg.node_mass_fractions[i] * state.secondary_mass_lbm;
    let metal_lbm = cfg.node_area_fractions[i] * cfg.tube_metal_mass_lbm;
    let cp_water = tables.cp_liquid_btu_per_lbm_f(state.nodes[i].temp_f, state.pressure_psia);
    (water_lbm * cp_water + metal_lbm * cfg.tube_metal_cp).max(MIN_NODE_CAPACITY)
}
