//! Property interface consumed by the transient model.

/// Saturated-water property provider.
///
/// Implementations must be thread-safe (Send + Sync) so a provider can be
/// shared by a driver thread and a diagnostics thread. All methods are
/// total: implementations clamp their inputs to the supported band
/// (roughly 32..700 degF and 0.1..3200 psia) and always return a finite,
/// physically plausible value.
pub trait SteamTables: Send + Sync {
    /// Provider name (for diagnostics).
    fn name(&self) -> &str;

    /// Saturation temperature [degF] at the given pressure [psia].
    fn t_sat_f(&self, p_psia: f64) -> f64;

    /// Saturation pressure [psia] at the given temperature [degF].
    fn p_sat_psia(&self, t_f: f64) -> f64;

    /// Latent heat of vaporization [BTU/lbm] at the given pressure [psia].
    fn h_fg_btu_per_lbm(&self, p_psia: f64) -> f64;

    /// Liquid density [lbm/ft3] at temperature [degF] and pressure [psia].
    ///
    /// Pressure dependence is the weak compressed-liquid correction; the
    /// dominant variable is temperature.
    fn rho_liquid_lbm_per_ft3(&self, t_f: f64, p_psia: f64) -> f64;

    /// Liquid specific heat [BTU/(lbm.degF)] at temperature [degF] and
    /// pressure [psia].
    fn cp_liquid_btu_per_lbm_f(&self, t_f: f64, p_psia: f64) -> f64;
}
