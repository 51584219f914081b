//! IAPWS-IF97 region-4 saturation line with degF/psia wrappers.
//!
//! Forward direction is the six-coefficient saturation-pressure equation;
//! the inverse is a Newton solve on the same equation. Both wrappers clamp
//! to the supported band, so callers never see a NaN from a wandering
//! transient.

/// Critical-point pressure [MPa].
const P4_STAR_MPA: f64 = 22.064;
/// Critical-point temperature [K].
const T4_STAR_K: f64 = 647.096;
/// Region-4 saturation coefficients.
const R4_N: [f64; 6] = [
    -7.859_517_83,
    1.844_082_59,
    -11.786_649_7,
    22.680_741_1,
    -15.961_871_9,
    1.801_225_02,
];

/// Triple-point temperature [K]; Newton iterates never go below this.
const T_TRIPLE_K: f64 = 273.16;

/// Supported saturation band in plant units.
pub const T_MIN_F: f64 = 32.0;
pub const T_MAX_F: f64 = 700.0;
pub const P_MIN_PSIA: f64 = 0.1;
pub const P_MAX_PSIA: f64 = 3_200.0;

const PSIA_PER_MPA: f64 = 145.037_738;

#[inline]
fn f_to_k(t_f: f64) -> f64 {
    (t_f + 459.67) / 1.8
}

#[inline]
fn k_to_f(t_k: f64) -> f64 {
    t_k * 1.8 - 459.67
}

/// Temperature-side sum of the region-4 equation at reduced argument
/// `theta = 1 - T/T*`.
fn theta_sum(theta: f64) -> f64 {
    R4_N[0] * theta
        + R4_N[1] * theta.powf(1.5)
        + R4_N[2] * theta.powi(3)
        + R4_N[3] * theta.powf(3.5)
        + R4_N[4] * theta.powi(4)
        + R4_N[5] * theta.powf(7.5)
}

/// d(theta_sum)/d(theta).
fn theta_sum_prime(theta: f64) -> f64 {
    R4_N[0]
        + 1.5 * R4_N[1] * theta.sqrt()
        + 3.0 * R4_N[2] * theta.powi(2)
        + 3.5 * R4_N[3] * theta.powf(2.5)
        + 4.0 * R4_N[4] * theta.powi(3)
        + 7.5 * R4_N[5] * theta.powf(6.5)
}

/// Saturation pressure [psia] at temperature [degF], clamped to the
/// supported band.
pub fn p_sat_psia(t_f: f64) -> f64 {
    let t_f = if t_f.is_finite() {
        t_f.clamp(T_MIN_F, T_MAX_F)
    } else {
        T_MIN_F
    };
    let t_k = f_to_k(t_f);
    let theta = 1.0 - t_k / T4_STAR_K;
    let p_mpa = P4_STAR_MPA * ((T4_STAR_K / t_k) * theta_sum(theta)).exp();
    p_mpa * PSIA_PER_MPA
}

/// Saturation temperature [degF] at pressure [psia], clamped to the
/// supported band.
///
/// Newton iteration on the region-4 equation in `ln(p)`; iterates are
/// clamped to `[T_triple, T*]` so the fractional powers of `theta` stay
/// real even when a step overshoots.
pub fn t_sat_f(p_psia: f64) -> f64 {
    let p_psia = if p_psia.is_finite() {
        p_psia.clamp(P_MIN_PSIA, P_MAX_PSIA)
    } else {
        P_MIN_PSIA
    };
    let ln_pr = (p_psia / PSIA_PER_MPA / P4_STAR_MPA).ln();

    let mut t_k = 373.15_f64;
    for _ in 0..30 {
        let theta = 1.0 - t_k / T4_STAR_K;
        let sum = theta_sum(theta);
        let f = (T4_STAR_K / t_k) * sum - ln_pr;
        let df_dt = -(T4_STAR_K / (t_k * t_k)) * sum - theta_sum_prime(theta) / t_k;
        let delta = f / df_dt;
        t_k = (t_k - delta).clamp(T_TRIPLE_K, T4_STAR_K);
        if delta.abs() < 1e-8 {
            break;
        }
    }
    k_to_f(t_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atmospheric_boiling_point() {
        let p = p_sat_psia(212.0);
        assert!((p - 14.71).abs() < 0.05, "p_sat(212F) = {p} psia");
        let t = t_sat_f(14.696);
        assert!((t - 212.0).abs() < 0.1, "t_sat(14.696 psia) = {t} F");
    }

    #[test]
    fn high_pressure_anchors() {
        // steam-table anchors: 100 psia -> 327.8F, 1000 psia -> 544.6F
        let t100 = t_sat_f(100.0);
        assert!((t100 - 327.8).abs() < 1.0, "t_sat(100 psia) = {t100} F");
        let t1000 = t_sat_f(1_000.0);
        assert!((t1000 - 544.6).abs() < 1.0, "t_sat(1000 psia) = {t1000} F");
        let p545 = p_sat_psia(544.6);
        assert!((p545 - 1_000.0).abs() < 10.0, "p_sat(544.6F) = {p545} psia");
    }

    #[test]
    fn round_trip_through_band() {
        for t_f in [40.0, 120.0, 212.0, 300.0, 420.0, 545.0, 650.0] {
            let back = t_sat_f(p_sat_psia(t_f));
            assert!(
                (back - t_f).abs() < 0.01,
                "round trip at {t_f} F came back as {back} F"
            );
        }
    }

    #[test]
    fn curve_is_monotonic() {
        let mut prev = p_sat_psia(T_MIN_F);
        let mut t = T_MIN_F + 5.0;
        while t <= T_MAX_F {
            let p = p_sat_psia(t);
            assert!(p > prev, "saturation curve not increasing at {t} F");
            prev = p;
            t += 5.0;
        }
    }

    #[test]
    fn out_of_band_inputs_clamp() {
        assert_eq!(p_sat_psia(-400.0), p_sat_psia(T_MIN_F));
        assert_eq!(p_sat_psia(2_000.0), p_sat_psia(T_MAX_F));
        assert_eq!(t_sat_f(0.0), t_sat_f(P_MIN_PSIA));
        assert_eq!(t_sat_f(f64::NAN), t_sat_f(P_MIN_PSIA));
        assert!(t_sat_f(1e9).is_finite());
    }
}
