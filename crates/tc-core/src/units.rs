// tc-core/src/units.rs

use uom::si::f64::{
    Force as UomForce, MassDensity as UomMassDensity, MassRate as UomMassRate,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
    Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Force = UomForce;
pub type MassRate = UomMassRate;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn newtons(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

pub mod constants {
    /// Exact international foot.
    pub const METERS_PER_FOOT: f64 = 0.3048;

    pub const SECONDS_PER_HOUR: f64 = 3600.0;

    #[inline]
    pub fn feet_to_meters(feet: f64) -> f64 {
        feet * METERS_PER_FOOT
    }
}
