//! Mass-ledger conservation under arbitrary operating histories.
//!
//! The per-tick identity is exact by construction:
//! `mass(t+1) = mass(t) - vaporized(t) - drained(t)`, with every term
//! non-negative. The property test shakes it with random pump schedules
//! and command timing.

use proptest::prelude::*;
use sgt_core::{degf, psia};
use sgt_secondary::{SecondaryConfig, SecondarySide, TickInputs};
use sgt_water::CorrelationTables;

fn model() -> (SecondarySide, CorrelationTables) {
    (
        SecondarySide::new(SecondaryConfig::default()).expect("default config validates"),
        CorrelationTables::new().expect("correlation tables build"),
    )
}

fn tick(primary_f: f64, pumps: u32, t_s: f64) -> TickInputs {
    TickInputs {
        primary_temp: degf(primary_f),
        pumps_active: pumps,
        primary_pressure: psia(400.0),
        sim_time_s: t_s,
    }
}

#[test]
fn per_tick_mass_identity_through_boiling_and_draining() {
    let (model, tables) = model();
    let mut state = model.init_state(&tables, degf(100.0));
    let dt = 10.0;

    for i in 0..4_000 {
        let t_s = i as f64 * dt;
        let primary = (100.0 + 60.0 * t_s / 3_600.0).min(557.0);
        if primary > 250.0 {
            model.begin_draining(&mut state, t_s);
        }

        let mass_before = state.secondary_mass_lbm;
        let vaporized_before = state.vaporized_total_lbm;
        let drained_before = state.drain.drained_lbm;

        model.update(&tables, &mut state, &tick(primary, 4, t_s), dt);

        let produced = state.vaporized_total_lbm - vaporized_before;
        let drained = state.drain.drained_lbm - drained_before;
        assert!(produced >= 0.0, "vaporized total must be monotone");
        assert!(drained >= 0.0, "drained total must be monotone");
        let expected = mass_before - produced - drained;
        assert!(
            (state.secondary_mass_lbm - expected).abs() < 1e-6,
            "tick {i}: mass {} != {mass_before} - {produced} - {drained}",
            state.secondary_mass_lbm
        );
        assert!(state.secondary_mass_lbm >= 0.0);
    }

    assert!(
        state.vaporized_total_lbm > 0.0,
        "the driven heatup must have boiled"
    );
    assert!(state.drain.drained_lbm > 0.0, "draining must have run");
}

#[test]
fn thermocline_monotone_under_intermittent_circulation() {
    let (model, tables) = model();
    let mut state = model.init_state(&tables, degf(100.0));

    let mut prev = state.thermocline_ft;
    for i in 0..1_000 {
        let pumps = if (i / 100) % 2 == 0 { 4 } else { 0 };
        model.update(&tables, &mut state, &tick(300.0, pumps, i as f64 * 10.0), 10.0);
        if pumps > 0 {
            assert!(
                state.thermocline_ft <= prev + 1e-12,
                "thermocline rose under circulation at tick {i}"
            );
        } else {
            assert!(
                (state.thermocline_ft - prev).abs() < 1e-12,
                "thermocline moved without circulation at tick {i}"
            );
        }
        prev = state.thermocline_ft;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn ledger_closed_under_random_operation(
        pump_schedule in prop::collection::vec(0u32..=4, 50..200),
        primary_start_f in 100.0_f64..250.0,
        ramp_f_per_hr in 0.0_f64..120.0,
        drain_after_tick in 0usize..150,
        isolate_after_tick in 0usize..150,
        dt_s in 1.0_f64..60.0,
    ) {
        let (model, tables) = model();
        let mut state = model.init_state(&tables, degf(primary_start_f));

        for (i, &pumps) in pump_schedule.iter().enumerate() {
            let t_s = i as f64 * dt_s;
            if i == drain_after_tick {
                model.begin_draining(&mut state, t_s);
            }
            if i == isolate_after_tick {
                model.set_isolation(&mut state, true);
            }
            let primary = (primary_start_f + ramp_f_per_hr * t_s / 3_600.0).min(580.0);

            let mass_before = state.secondary_mass_lbm;
            let vaporized_before = state.vaporized_total_lbm;
            let drained_before = state.drain.drained_lbm;

            let result = model.update(&tables, &mut state, &tick(primary, pumps, t_s), dt_s);

            let produced = state.vaporized_total_lbm - vaporized_before;
            let drained = state.drain.drained_lbm - drained_before;
            prop_assert!(produced >= 0.0 && drained >= 0.0);
            prop_assert!(
                (state.secondary_mass_lbm - (mass_before - produced - drained)).abs() < 1e-6
            );
            prop_assert!(state.secondary_mass_lbm >= 0.0);
            prop_assert!(state.steam_inventory_lbm >= 0.0);
            prop_assert!(result.pressure_psia.is_finite() && result.pressure_psia > 0.0);
            for node in &state.nodes {
                prop_assert!((0.0..=1.0).contains(&node.boil_blend));
                prop_assert!(node.temp_f.is_finite());
            }
        }
    }
}
