//! Plant constants and tuning for the secondary-side model.
//!
//! Defaults describe one steam generator of a four-loop plant during
//! heatup from wet layup. All of it is data: the model never hardcodes a
//! plant number outside this module.

use crate::error::{SecondaryError, SecondaryResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryConfig {
    // -- geometry and inventories --
    /// Heated bundle height, ft
    pub total_height_ft: f64,
    /// Total primary-to-secondary heat-transfer area, ft2
    pub heat_area_ft2: f64,
    /// Total secondary free volume, ft3
    pub secondary_volume_ft3: f64,
    /// Liquid fill at initialization, lbm
    pub initial_mass_lbm: f64,
    /// Nitrogen blanket mass, lbm
    pub nitrogen_mass_lbm: f64,
    /// Minimum gas-space cushion, ft3
    pub min_steam_space_ft3: f64,
    /// Tube-bundle metal participating in node thermal inertia, lbm
    pub tube_metal_mass_lbm: f64,
    /// Tube metal specific heat, BTU/(lbm.degF)
    pub tube_metal_cp: f64,

    // -- node layout, top to bottom --
    /// Node share of liquid mass; must sum to 1
    pub node_mass_fractions: Vec<f64>,
    /// Node share of geometric heat area; must sum to 1
    pub node_area_fractions: Vec<f64>,
    /// Area effectiveness of a node above the thermocline, 0..1
    pub stagnant_effectiveness: Vec<f64>,

    // -- stratification --
    /// Effective thermal diffusivity driving thermocline descent, ft2/s
    pub thermocline_diffusivity_ft2_per_s: f64,
    /// Vertical smearing of the thermocline cutoff, ft
    pub transition_band_ft: f64,
    /// Area effectiveness left below the thermocline, 0..1
    pub residual_effectiveness: f64,

    // -- heat transfer --
    /// Subcooled coefficient with no circulation, BTU/(hr.ft2.degF)
    pub htc_noflow: f64,
    /// Subcooled coefficient at rated circulation, BTU/(hr.ft2.degF)
    pub htc_forced: f64,
    /// Primary-side film coefficient for the wall back-solve, BTU/(hr.ft2.degF)
    pub primary_film_htc: f64,
    /// Nucleate-boiling coefficient at `boil_htc_low_psia`, BTU/(hr.ft2.degF)
    pub boil_htc_low: f64,
    /// Nucleate-boiling coefficient at `boil_htc_high_psia`, BTU/(hr.ft2.degF)
    pub boil_htc_high: f64,
    pub boil_htc_low_psia: f64,
    pub boil_htc_high_psia: f64,
    /// Bundle-average degradation applied to every node heat rate, 0..1
    pub bundle_penalty: f64,
    /// Temperature-efficiency breakpoints (primary degF, factor)
    pub temp_effectiveness: Vec<(f64, f64)>,
    /// Extra subcooled-coefficient multiplier at full superheat bonus
    pub superheat_bonus: f64,
    /// Node superheat over which the bonus smoothsteps in, degF
    pub superheat_bonus_span_f: f64,
    /// Hard cap on node superheat while boiling, degF
    pub max_superheat_f: f64,
    /// Blend ramp from subcooled to boiling law, s
    pub blend_ramp_s: f64,
    /// Time constant of the saturation pull on boiling nodes, s
    pub sat_pull_tau_s: f64,
    /// Conductance between adjacent nodes, BTU/(hr.degF)
    pub internode_ua: f64,
    /// Conductance multiplier when one neighbor boils
    pub internode_boil_factor: f64,

    // -- pressure --
    /// Nitrogen blanket floor, psia
    pub floor_pressure_psia: f64,
    /// Pressure-regulation setpoint, psia
    pub setpoint_psia: f64,
    /// Safety ceiling for the inventory branch, psia
    pub ceiling_psia: f64,

    // -- steam-line condensation sink --
    /// Lumped steam-line metal mass, lbm
    pub line_sink_mass_lbm: f64,
    /// Steam-line metal specific heat, BTU/(lbm.degF)
    pub line_sink_cp: f64,
    /// Warmup time constant of the line metal, s
    pub line_sink_tau_s: f64,
    /// Largest share of latent heat the sink may take in a tick, 0..1
    pub line_sink_max_frac: f64,

    // -- draining --
    /// Drain rate, gpm
    pub drain_rate_gpm: f64,
    /// Mass fraction of initial fill at which draining halts
    pub drain_target_frac: f64,

    // -- level maps: mass fraction at 0% and at 100% indication --
    pub wide_range_span: (f64, f64),
    pub narrow_range_span: (f64, f64),

    // -- continuity governor --
    /// Largest allowed tick-to-tick change in reported total heat, MW
    pub governor_clamp_mw: f64,
    /// Circulation unit count treated as full forced flow
    pub pump_count_rated: u32,
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            total_height_ft: 30.0,
            heat_area_ft2: 55_000.0,
            secondary_volume_ft3: 4_300.0,
            initial_mass_lbm: 180_000.0,
            nitrogen_mass_lbm: 110.0,
            min_steam_space_ft3: 120.0,
            tube_metal_mass_lbm: 180_000.0,
            tube_metal_cp: 0.11,

            node_mass_fractions: vec![0.24, 0.22, 0.20, 0.18, 0.16],
            node_area_fractions: vec![0.30, 0.25, 0.20, 0.15, 0.10],
            stagnant_effectiveness: vec![0.85, 0.75, 0.65, 0.55, 0.45],

            thermocline_diffusivity_ft2_per_s: 2.0e-3,
            transition_band_ft: 3.0,
            residual_effectiveness: 0.03,

            htc_noflow: 0.10,
            htc_forced: 180.0,
            primary_film_htc: 900.0,
            boil_htc_low: 300.0,
            boil_htc_high: 650.0,
            boil_htc_low_psia: 50.0,
            boil_htc_high_psia: 1_000.0,
            bundle_penalty: 0.85,
            temp_effectiveness: vec![(100.0, 0.35), (250.0, 0.60), (400.0, 1.0)],
            superheat_bonus: 1.5,
            superheat_bonus_span_f: 10.0,
            max_superheat_f: 5.0,
            blend_ramp_s: 60.0,
            sat_pull_tau_s: 15.0,
            internode_ua: 25_000.0,
            internode_boil_factor: 4.0,

            floor_pressure_psia: 17.0,
            setpoint_psia: 1_020.0,
            ceiling_psia: 1_106.0,

            line_sink_mass_lbm: 12_000.0,
            line_sink_cp: 0.11,
            line_sink_tau_s: 600.0,
            line_sink_max_frac: 0.5,

            drain_rate_gpm: 150.0,
            drain_target_frac: 0.72,

            wide_range_span: (0.20, 1.00),
            narrow_range_span: (0.64, 0.92),

            governor_clamp_mw: 0.5,
            pump_count_rated: 4,
        }
    }
}

impl SecondaryConfig {
    pub fn n_nodes(&self) -> usize {
        self.node_mass_fractions.len()
    }

    /// Structural validation, run once at model construction.
    pub fn validate(&self) -> SecondaryResult<()> {
        let n = self.node_mass_fractions.len();
        if n == 0 {
            return Err(SecondaryError::InvalidArg {
                what: "node layout must have at least one node",
            });
        }
        if self.node_area_fractions.len() != n || self.stagnant_effectiveness.len() != n {
            return Err(SecondaryError::InvalidArg {
                what: "node layout vectors must share one length",
            });
        }
        for &f in &self.node_mass_fractions {
            if !(f > 0.0) {
                return Err(SecondaryError::InvalidArg {
                    what: "node mass fractions must be positive",
                });
            }
        }
        for &f in &self.node_area_fractions {
            if !(f > 0.0) {
                return Err(SecondaryError::InvalidArg {
                    what: "node area fractions must be positive",
                });
            }
        }
        let mass_sum: f64 = self.node_mass_fractions.iter().sum();
        if (mass_sum - 1.0).abs() > 1e-6 {
            return Err(SecondaryError::InvalidArg {
                what: "node mass fractions must sum to 1",
            });
        }
        let area_sum: f64 = self.node_area_fractions.iter().sum();
        if (area_sum - 1.0).abs() > 1e-6 {
            return Err(SecondaryError::InvalidArg {
                what: "node area fractions must sum to 1",
            });
        }
        for &e in &self.stagnant_effectiveness {
            if !(e > 0.0 && e <= 1.0) {
                return Err(SecondaryError::InvalidArg {
                    what: "stagnant effectiveness must lie in (0, 1]",
                });
            }
        }
        if !(self.residual_effectiveness >= 0.0 && self.residual_effectiveness <= 1.0) {
            return Err(SecondaryError::InvalidArg {
                what: "residual effectiveness must lie in [0, 1]",
            });
        }

        if !(self.total_height_ft > 0.0)
            || !(self.heat_area_ft2 > 0.0)
            || !(self.secondary_volume_ft3 > 0.0)
            || !(self.initial_mass_lbm > 0.0)
        {
            return Err(SecondaryError::InvalidArg {
                what: "geometry and initial fill must be positive",
            });
        }
        if !(self.min_steam_space_ft3 > 0.0 && self.min_steam_space_ft3 < self.secondary_volume_ft3)
        {
            return Err(SecondaryError::InvalidArg {
                what: "minimum steam space must be positive and below total volume",
            });
        }
        if self.nitrogen_mass_lbm < 0.0 || self.tube_metal_mass_lbm < 0.0 {
            return Err(SecondaryError::InvalidArg {
                what: "masses must be non-negative",
            });
        }
        if !(self.tube_metal_cp > 0.0) || !(self.line_sink_cp > 0.0) {
            return Err(SecondaryError::InvalidArg {
                what: "specific heats must be positive",
            });
        }

        if !(self.thermocline_diffusivity_ft2_per_s > 0.0) || !(self.transition_band_ft > 0.0) {
            return Err(SecondaryError::InvalidArg {
                what: "stratification constants must be positive",
            });
        }

        if !(self.htc_noflow > 0.0) || !(self.htc_forced >= self.htc_noflow) {
            return Err(SecondaryError::InvalidArg {
                what: "subcooled coefficients must satisfy 0 < noflow <= forced",
            });
        }
        if !(self.primary_film_htc > 0.0) || !(self.boil_htc_low > 0.0) || !(self.boil_htc_high > 0.0)
        {
            return Err(SecondaryError::InvalidArg {
                what: "film and boiling coefficients must be positive",
            });
        }
        if !(self.boil_htc_low_psia < self.boil_htc_high_psia) {
            return Err(SecondaryError::InvalidArg {
                what: "boiling coefficient pressure anchors must be ordered",
            });
        }
        if !(self.bundle_penalty > 0.0 && self.bundle_penalty <= 1.0) {
            return Err(SecondaryError::InvalidArg {
                what: "bundle penalty must lie in (0, 1]",
            });
        }
        if self.temp_effectiveness.len() < 2 {
            return Err(SecondaryError::InvalidArg {
                what: "temperature-efficiency table needs at least two points",
            });
        }
        if self.superheat_bonus < 0.0
            || !(self.superheat_bonus_span_f > 0.0)
            || !(self.max_superheat_f > 0.0)
        {
            return Err(SecondaryError::InvalidArg {
                what: "superheat constants must be positive",
            });
        }
        if !(self.blend_ramp_s > 0.0) || !(self.sat_pull_tau_s > 0.0) {
            return Err(SecondaryError::InvalidArg {
                what: "blend ramp and saturation pull time constants must be positive",
            });
        }
        if self.internode_ua < 0.0 || self.internode_boil_factor < 1.0 {
            return Err(SecondaryError::InvalidArg {
                what: "internode conductance must be non-negative with factor >= 1",
            });
        }

        if !(self.floor_pressure_psia > 0.0)
            || !(self.floor_pressure_psia < self.setpoint_psia)
            || !(self.setpoint_psia <= self.ceiling_psia)
        {
            return Err(SecondaryError::InvalidArg {
                what: "pressure constants must satisfy 0 < floor < setpoint <= ceiling",
            });
        }

        if self.line_sink_mass_lbm < 0.0
            || !(self.line_sink_tau_s > 0.0)
            || !(self.line_sink_max_frac >= 0.0 && self.line_sink_max_frac < 1.0)
        {
            return Err(SecondaryError::InvalidArg {
                what: "line sink constants must be non-negative with max fraction below 1",
            });
        }

        if !(self.drain_rate_gpm > 0.0)
            || !(self.drain_target_frac > 0.0 && self.drain_target_frac < 1.0)
        {
            return Err(SecondaryError::InvalidArg {
                what: "drain rate must be positive and target fraction inside (0, 1)",
            });
        }

        for span in [self.wide_range_span, self.narrow_range_span] {
            if !(span.0 < span.1) {
                return Err(SecondaryError::InvalidArg {
                    what: "level spans must be ordered low to high",
                });
            }
        }

        if !(self.governor_clamp_mw > 0.0) || self.pump_count_rated == 0 {
            return Err(SecondaryError::InvalidArg {
                what: "governor clamp and rated pump count must be positive",
            });
        }

        Ok(())
    }
}
