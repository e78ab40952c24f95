//! Built-in measurement families.

use std::{f64::consts::PI, time::Duration};

use crate::{Converter, Dimensions, Domain, Family, Measure, MeasureError, UnitOfMeasure};

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const METRES_PER_INCH: f64 = 0.0254;
pub const METRES_PER_FOOT: f64 = 0.3048;
pub const METRES_PER_YARD: f64 = 0.9144;
pub const METRES_PER_MILE: f64 = 1609.344;
pub const METRES_PER_NAUTICAL_MILE: f64 = 1852.0;
pub const KILOGRAMS_PER_POUND: f64 = 0.453_592_37;
pub const RADIANS_PER_DEGREE: f64 = PI / 180.0;

const fn unit(symbol: &'static str, factor: f64, dimensions: Dimensions) -> UnitOfMeasure {
    UnitOfMeasure::new(symbol, Converter::LinearScale(factor), dimensions)
}

const fn canonical(symbol: &'static str, dimensions: Dimensions) -> UnitOfMeasure {
    UnitOfMeasure::new(symbol, Converter::Identity, dimensions)
}

/// Relative or absolute time. Never negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Time;

static TIME_UNITS: [UnitOfMeasure; 5] = [
    canonical("s", Dimensions::TIME),
    unit("ms", 1e-3, Dimensions::TIME),
    unit("min", SECONDS_PER_MINUTE, Dimensions::TIME),
    unit("h", SECONDS_PER_HOUR, Dimensions::TIME),
    unit("d", SECONDS_PER_DAY, Dimensions::TIME),
];

impl Family for Time {
    const NAME: &'static str = "Time";
    const DIMENSIONS: Dimensions = Dimensions::TIME;
    const DOMAIN: Domain = Domain::NonNegative;

    fn units() -> &'static [UnitOfMeasure] {
        &TIME_UNITS
    }
}

impl Measure<Time> {
    /// `None` when the value exceeds what a [`Duration`] can hold.
    pub fn to_duration(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.value()).ok()
    }
}

impl TryFrom<Duration> for Measure<Time> {
    type Error = MeasureError;
    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        Measure::new(duration.as_secs_f64())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Length;

static LENGTH_UNITS: [UnitOfMeasure; 8] = [
    canonical("m", Dimensions::LENGTH),
    unit("mm", 1e-3, Dimensions::LENGTH),
    unit("cm", 1e-2, Dimensions::LENGTH),
    unit("km", 1e3, Dimensions::LENGTH),
    unit("in", METRES_PER_INCH, Dimensions::LENGTH),
    unit("ft", METRES_PER_FOOT, Dimensions::LENGTH),
    unit("yd", METRES_PER_YARD, Dimensions::LENGTH),
    unit("mi", METRES_PER_MILE, Dimensions::LENGTH),
];

impl Family for Length {
    const NAME: &'static str = "Length";
    const DIMENSIONS: Dimensions = Dimensions::LENGTH;

    fn units() -> &'static [UnitOfMeasure] {
        &LENGTH_UNITS
    }
}

/// Plane angle, stored in radians.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Angle;

static ANGLE_UNITS: [UnitOfMeasure; 5] = [
    canonical("rad", Dimensions::ANGLE),
    unit("deg", RADIANS_PER_DEGREE, Dimensions::ANGLE),
    unit("arcmin", RADIANS_PER_DEGREE / 60.0, Dimensions::ANGLE),
    unit("arcsec", RADIANS_PER_DEGREE / 3600.0, Dimensions::ANGLE),
    unit("rev", 2.0 * PI, Dimensions::ANGLE),
];

impl Family for Angle {
    const NAME: &'static str = "Angle";
    const DIMENSIONS: Dimensions = Dimensions::ANGLE;

    fn units() -> &'static [UnitOfMeasure] {
        &ANGLE_UNITS
    }
}

impl Measure<Angle> {
    pub fn from_degrees(degrees: f64) -> Result<Self, MeasureError> {
        Self::new(degrees * RADIANS_PER_DEGREE)
    }

    pub fn to_degrees(&self) -> f64 {
        self.value() / RADIANS_PER_DEGREE
    }

    pub fn sin(&self) -> f64 {
        self.value().sin()
    }

    pub fn cos(&self) -> f64 {
        self.value().cos()
    }

    pub fn tan(&self) -> f64 {
        self.value().tan()
    }
}

/// Mass. Never negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Mass;

static MASS_UNITS: [UnitOfMeasure; 4] = [
    canonical("kg", Dimensions::MASS),
    unit("g", 1e-3, Dimensions::MASS),
    unit("t", 1e3, Dimensions::MASS),
    unit("lb", KILOGRAMS_PER_POUND, Dimensions::MASS),
];

impl Family for Mass {
    const NAME: &'static str = "Mass";
    const DIMENSIONS: Dimensions = Dimensions::MASS;
    const DOMAIN: Domain = Domain::NonNegative;

    fn units() -> &'static [UnitOfMeasure] {
        &MASS_UNITS
    }
}

/// Absolute temperature. Only scales anchored at absolute zero are offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Temperature;

static TEMPERATURE_UNITS: [UnitOfMeasure; 2] = [
    canonical("K", Dimensions::TEMPERATURE),
    unit("°R", 5.0 / 9.0, Dimensions::TEMPERATURE),
];

impl Family for Temperature {
    const NAME: &'static str = "Temperature";
    const DIMENSIONS: Dimensions = Dimensions::TEMPERATURE;
    const DOMAIN: Domain = Domain::NonNegative;

    fn units() -> &'static [UnitOfMeasure] {
        &TEMPERATURE_UNITS
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Current;

static CURRENT_UNITS: [UnitOfMeasure; 2] = [
    canonical("A", Dimensions::CURRENT),
    unit("mA", 1e-3, Dimensions::CURRENT),
];

impl Family for Current {
    const NAME: &'static str = "Current";
    const DIMENSIONS: Dimensions = Dimensions::CURRENT;

    fn units() -> &'static [UnitOfMeasure] {
        &CURRENT_UNITS
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LuminousIntensity;

static LUMINOUS_INTENSITY_UNITS: [UnitOfMeasure; 1] = [canonical("cd", Dimensions::LUMINOSITY)];

impl Family for LuminousIntensity {
    const NAME: &'static str = "LuminousIntensity";
    const DIMENSIONS: Dimensions = Dimensions::LUMINOSITY;
    const DOMAIN: Domain = Domain::NonNegative;

    fn units() -> &'static [UnitOfMeasure] {
        &LUMINOUS_INTENSITY_UNITS
    }
}

const AREA: Dimensions = Dimensions::LENGTH.powi(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Area;

static AREA_UNITS: [UnitOfMeasure; 3] = [
    canonical("m^2", AREA),
    unit("km^2", 1e6, AREA),
    unit("ha", 1e4, AREA),
];

impl Family for Area {
    const NAME: &'static str = "Area";
    const DIMENSIONS: Dimensions = AREA;
    const DOMAIN: Domain = Domain::NonNegative;

    fn units() -> &'static [UnitOfMeasure] {
        &AREA_UNITS
    }
}

const VELOCITY: Dimensions = Dimensions::LENGTH.divide(Dimensions::TIME);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Velocity;

static VELOCITY_UNITS: [UnitOfMeasure; 4] = [
    canonical("m/s", VELOCITY),
    unit("km/h", 1e3 / SECONDS_PER_HOUR, VELOCITY),
    unit("mph", METRES_PER_MILE / SECONDS_PER_HOUR, VELOCITY),
    unit("kn", METRES_PER_NAUTICAL_MILE / SECONDS_PER_HOUR, VELOCITY),
];

impl Family for Velocity {
    const NAME: &'static str = "Velocity";
    const DIMENSIONS: Dimensions = VELOCITY;

    fn units() -> &'static [UnitOfMeasure] {
        &VELOCITY_UNITS
    }
}

const ANGULAR_VELOCITY: Dimensions = Dimensions::ANGLE.divide(Dimensions::TIME);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AngularVelocity;

static ANGULAR_VELOCITY_UNITS: [UnitOfMeasure; 3] = [
    canonical("rad/s", ANGULAR_VELOCITY),
    unit("deg/s", RADIANS_PER_DEGREE, ANGULAR_VELOCITY),
    unit("rpm", 2.0 * PI / SECONDS_PER_MINUTE, ANGULAR_VELOCITY),
];

impl Family for AngularVelocity {
    const NAME: &'static str = "AngularVelocity";
    const DIMENSIONS: Dimensions = ANGULAR_VELOCITY;

    fn units() -> &'static [UnitOfMeasure] {
        &ANGULAR_VELOCITY_UNITS
    }
}
