//! Dimensionally-safe arithmetic on physical quantities.
//!
//! Values of a declared family such as [`Time`] or [`Length`] are held in a
//! [`Measure`], always in the family's canonical (SI) unit. Adding values of
//! different families does not type-check. Products and quotients of any two
//! quantities produce a [`GenericMeasure`], whose dimensions are tracked at
//! run time as a [`Dimensions`] exponent vector.
//!
//! ```
//! use facsim_measure::{FamilyRegistry, Length, Measure, Quantity, Time};
//!
//! let distance: Measure<Length> = "10 m".parse().unwrap();
//! let time: Measure<Time> = "2 s".parse().unwrap();
//! let speed = distance.divide(&time).unwrap().generic().unwrap();
//!
//! assert_eq!(speed.value(), 5.0);
//! assert_eq!(FamilyRegistry::global().describe(speed.dimensions()), "Velocity");
//! ```
//!
//! The [`FamilyRegistry`] maps dimensions and unit symbols back to families.
//! It is used for labeling and parsing only, never for arithmetic.

pub mod dimension;
pub mod error;
pub mod family;
pub mod generic;
pub mod kinds;
pub mod measure;
pub mod registry;
pub mod unit;

pub use dimension::Dimensions;
pub use error::{InvalidReason, MeasureError, ParseError, RegistryError};
pub use family::{Domain, Family};
pub use generic::GenericMeasure;
pub use kinds::{
    Angle, AngularVelocity, Area, Current, Length, LuminousIntensity, Mass, Temperature, Time,
    Velocity,
};
pub use measure::{Measure, Quantity, Quotient};
pub use registry::{FamilyInfo, FamilyRegistry, FamilyRegistryBuilder};
pub use unit::{Converter, UnitOfMeasure};
