//! Per-tick regime classification.
//!
//! Stateless: the decision is re-derived each tick from node temperatures
//! and the committed pressure. First match wins: setpoint pressure beats
//! boiling beats subcooled. Reversion from Boiling back to Subcooled is
//! legitimate when every node cools below saturation.

use crate::state::{Regime, SimulationState};

/// Node-versus-saturation comparisons tolerate this much under-read so a
/// node pinned at saturation never flickers out of the boiling set on a
/// property round-trip.
pub(crate) const BOIL_EPS_F: f64 = 1e-3;

/// Pressure-versus-setpoint tolerance, same role as `BOIL_EPS_F`.
pub(crate) const SETPOINT_EPS_PSIA: f64 = 1e-3;

/// Classify the pool and refresh every node's boiling flag.
pub(crate) fn classify(setpoint_psia: f64, state: &mut SimulationState) -> Regime {
    let sat = state.sat_temp_f;
    let mut any_boiling = false;
    for node in &mut state.nodes {
        node.boiling = node.temp_f >= sat - BOIL_EPS_F;
        any_boiling |= node.boiling;
    }

    let regime = if state.pressure_psia >= setpoint_psia - SETPOINT_EPS_PSIA {
        Regime::PressureRegulated
    } else if any_boiling {
        Regime::Boiling
    } else {
        Regime::Subcooled
    };
    state.regime = regime;
    regime
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DrainState, GovernorMemory, NodeState, PressureSource};

    fn state_with(temps: &[f64], pressure_psia: f64, sat_temp_f: f64) -> SimulationState {
        SimulationState {
            nodes: temps
                .iter()
                .map(|&t| NodeState {
                    temp_f: t,
                    heat_btu_per_hr: 0.0,
                    effective_area_frac: 0.1,
                    htc: 0.0,
                    boil_blend: 0.0,
                    boiling: false,
                })
                .collect(),
            regime: Regime::Subcooled,
            thermocline_ft: 30.0,
            active_time_s: 0.0,
            secondary_mass_lbm: 180_000.0,
            vaporized_total_lbm: 0.0,
            steam_inventory_lbm: 0.0,
            steam_space_ft3: 1_000.0,
            nitrogen_mass_lbm: 110.0,
            pressure_psia,
            sat_temp_f,
            pressure_source: PressureSource::Floor,
            drain: DrainState::default(),
            level_wide_frac: 1.0,
            level_narrow_frac: 1.0,
            isolated: false,
            line_sink_temp_f: 100.0,
            governor: GovernorMemory::default(),
        }
    }

    #[test]
    fn cold_pool_is_subcooled() {
        let mut s = state_with(&[120.0, 110.0, 100.0], 17.0, 219.4);
        assert_eq!(classify(1_020.0, &mut s), Regime::Subcooled);
        assert!(s.nodes.iter().all(|n| !n.boiling));
    }

    #[test]
    fn one_hot_node_makes_boiling() {
        let mut s = state_with(&[225.0, 180.0, 150.0], 18.0, 219.4);
        assert_eq!(classify(1_020.0, &mut s), Regime::Boiling);
        assert!(s.nodes[0].boiling);
        assert!(!s.nodes[1].boiling);
    }

    #[test]
    fn setpoint_pressure_wins_over_boiling() {
        let mut s = state_with(&[560.0, 550.0, 548.0], 1_020.0, 546.8);
        assert_eq!(classify(1_020.0, &mut s), Regime::PressureRegulated);
        // nodes keep their boiling flags for the blend logic
        assert!(s.nodes[0].boiling && s.nodes[1].boiling);
    }

    #[test]
    fn node_pinned_exactly_at_saturation_counts_as_boiling() {
        let mut s = state_with(&[219.4, 100.0, 100.0], 17.0, 219.4);
        classify(1_020.0, &mut s);
        assert!(s.nodes[0].boiling);
    }

    #[test]
    fn reversion_to_subcooled_when_all_nodes_cool() {
        let mut s = state_with(&[225.0, 100.0, 100.0], 18.0, 219.4);
        assert_eq!(classify(1_020.0, &mut s), Regime::Boiling);
        s.nodes[0].temp_f = 200.0;
        assert_eq!(classify(1_020.0, &mut s), Regime::Subcooled);
    }
}
