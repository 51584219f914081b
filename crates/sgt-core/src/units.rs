// sgt-core/src/units.rs

use uom::si::f64::{
    Mass as UomMass, Power as UomPower, Pressure as UomPressure, Ratio as UomRatio,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
};

// Public canonical unit types (f64). Internal state stays in plant units
// (degF, psia, lbm, BTU/hr); uom appears at API boundaries only.
pub type Mass = UomMass;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

#[inline]
pub fn degf(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

#[inline]
pub fn psia(v: f64) -> Pressure {
    use uom::si::pressure::pound_force_per_square_inch;
    Pressure::new::<pound_force_per_square_inch>(v)
}

#[inline]
pub fn lbm(v: f64) -> Mass {
    use uom::si::mass::pound;
    Mass::new::<pound>(v)
}

#[inline]
pub fn mw(v: f64) -> Power {
    use uom::si::power::megawatt;
    Power::new::<megawatt>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

pub mod constants {
    /// Fahrenheit to Rankine offset.
    pub const RANKINE_OFFSET_F: f64 = 459.67;

    /// BTU/hr per megawatt.
    pub const BTU_PER_HR_PER_MW: f64 = 3.412_142e6;

    /// US gallons per cubic foot.
    pub const GAL_PER_FT3: f64 = 7.480_52;

    #[inline]
    pub fn rankine(t_f: f64) -> f64 {
        t_f + RANKINE_OFFSET_F
    }

    #[inline]
    pub fn btu_per_hr_to_mw(q: f64) -> f64 {
        q / BTU_PER_HR_PER_MW
    }

    #[inline]
    pub fn mw_to_btu_per_hr(q: f64) -> f64 {
        q * BTU_PER_HR_PER_MW
    }
}
