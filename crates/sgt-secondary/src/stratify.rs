//! Thermocline tracking and per-node effective heat-transfer area.
//!
//! An actively-heated layer grows downward from the top of the bundle
//! while forced circulation runs; the thermocline is its lower boundary.
//! Area above the thermocline works at the node's stagnant effectiveness,
//! area below at a small residual, with a finite transition band so a
//! node's effective area never steps discontinuously as the boundary
//! crosses it.

use crate::config::SecondaryConfig;
use crate::state::SimulationState;

/// Advance the thermocline and refresh every node's effective area
/// fraction. `spans` are (bottom, top) node extents in ft, index 0 = top.
pub(crate) fn advance(
    cfg: &SecondaryConfig,
    spans: &[(f64, f64)],
    state: &mut SimulationState,
    circulating: bool,
    dt_s: f64,
) {
    if circulating {
        state.active_time_s += dt_s.max(0.0);
    }
    let depth_ft = (4.0 * cfg.thermocline_diffusivity_ft2_per_s * state.active_time_s).sqrt();
    state.thermocline_ft = (cfg.total_height_ft - depth_ft).max(0.0);

    for i in 0..state.nodes.len() {
        let above = fraction_above(spans[i], state.thermocline_ft, cfg.transition_band_ft);
        let effectiveness = cfg.stagnant_effectiveness[i] * above
            + cfg.residual_effectiveness * (1.0 - above);
        state.nodes[i].effective_area_frac = cfg.node_area_fractions[i] * effectiveness;
    }
}

/// Fraction of the span `(lo, hi)` lying above the thermocline, smeared
/// over a `band_ft`-wide linear ramp centered on the boundary.
fn fraction_above(span: (f64, f64), thermocline_ft: f64, band_ft: f64) -> f64 {
    let (lo, hi) = span;
    let w = band_ft.max(1e-9);
    let a = thermocline_ft - 0.5 * w;
    let b = thermocline_ft + 0.5 * w;

    // length fully above the band counts at 1
    let full = (hi - b.max(lo)).max(0.0);
    // overlap with the band counts at the ramp average
    let c = lo.max(a);
    let d = hi.min(b);
    let ramped = if d > c {
        ((d - a).powi(2) - (c - a).powi(2)) / (2.0 * w)
    } else {
        0.0
    };

    ((full + ramped) / (hi - lo)).clamp(0.0, 1.0)
}
