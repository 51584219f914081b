//! Ideal-gas partial pressures for the steam/nitrogen space.

/// Specific gas constant for steam [ft.lbf/(lbm.degR)].
pub const R_STEAM: f64 = 85.78;

/// Specific gas constant for nitrogen [ft.lbf/(lbm.degR)].
pub const R_NITROGEN: f64 = 55.16;

/// Square inches per square foot, for the psia conversion.
const IN2_PER_FT2: f64 = 144.0;

/// Ideal-gas partial pressure [psia] of `mass_lbm` of a gas with specific
/// constant `r` [ft.lbf/(lbm.degR)] at `t_rankine` in `volume_ft3`.
///
/// Degenerate inputs (non-positive volume or temperature, negative mass)
/// contribute no pressure; the gas space geometry upstream keeps them out.
pub fn partial_pressure_psia(mass_lbm: f64, r: f64, t_rankine: f64, volume_ft3: f64) -> f64 {
    debug_assert!(volume_ft3 > 0.0, "gas space volume must be positive");
    debug_assert!(t_rankine > 0.0, "gas temperature must be positive");
    if volume_ft3 <= 0.0 || t_rankine <= 0.0 || mass_lbm <= 0.0 {
        return 0.0;
    }
    mass_lbm * r * t_rankine / (IN2_PER_FT2 * volume_ft3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steam_partial_pressure_anchor() {
        // 1 lbm steam, 1 ft3, 200 F: p = 85.78 * 659.67 / 144
        let p = partial_pressure_psia(1.0, R_STEAM, 659.67, 1.0);
        assert!((p - 392.98).abs() < 0.1, "p = {p}");
    }

    #[test]
    fn scales_linearly_with_mass_and_inverse_volume() {
        let base = partial_pressure_psia(10.0, R_NITROGEN, 560.0, 1_000.0);
        let doubled = partial_pressure_psia(20.0, R_NITROGEN, 560.0, 1_000.0);
        let squeezed = partial_pressure_psia(10.0, R_NITROGEN, 560.0, 500.0);
        assert!((doubled - 2.0 * base).abs() < 1e-9);
        assert!((squeezed - 2.0 * base).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_contribute_nothing() {
        assert_eq!(partial_pressure_psia(-1.0, R_STEAM, 560.0, 100.0), 0.0);
        assert_eq!(partial_pressure_psia(0.0, R_STEAM, 560.0, 100.0), 0.0);
    }
}
