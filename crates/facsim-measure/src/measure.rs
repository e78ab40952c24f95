use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops,
    str::FromStr,
};

use crate::{Dimensions, Family, GenericMeasure, MeasureError, ParseError, UnitOfMeasure};

/// Anything holding a canonical value with a dimension.
///
/// Products and quotients across quantities are computed here, so they work
/// between any mix of declared and generic measures.
pub trait Quantity {
    /// The value in the canonical (SI) unit of its dimension.
    fn value(&self) -> f64;

    fn dimensions(&self) -> Dimensions;

    /// Product of two quantities. The result is always a [`GenericMeasure`],
    /// even when its dimensions match a declared family.
    fn multiply<Q: Quantity + ?Sized>(&self, other: &Q) -> Result<GenericMeasure, MeasureError> {
        GenericMeasure::new(
            self.value() * other.value(),
            self.dimensions() * other.dimensions(),
        )
    }

    /// Quotient of two quantities. Identical dimensions cancel to a plain
    /// number; anything else yields a [`GenericMeasure`].
    fn divide<Q: Quantity + ?Sized>(&self, other: &Q) -> Result<Quotient, MeasureError> {
        let value = self.value() / other.value();
        if self.dimensions() == other.dimensions() {
            ratio(value).map(Quotient::Scalar)
        } else {
            GenericMeasure::new(value, self.dimensions() / other.dimensions())
                .map(Quotient::Generic)
        }
    }
}

/// Result of dividing one quantity by another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Quotient {
    Scalar(f64),
    Generic(GenericMeasure),
}

impl Quotient {
    pub fn scalar(self) -> Option<f64> {
        match self {
            Quotient::Scalar(v) => Some(v),
            Quotient::Generic(_) => None,
        }
    }

    pub fn generic(self) -> Option<GenericMeasure> {
        match self {
            Quotient::Scalar(_) => None,
            Quotient::Generic(g) => Some(g),
        }
    }
}

impl fmt::Display for Quotient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quotient::Scalar(v) => write!(f, "{v}"),
            Quotient::Generic(g) => write!(f, "{g}"),
        }
    }
}

/// A dimensionless ratio must still be finite.
pub(crate) fn ratio(value: f64) -> Result<f64, MeasureError> {
    crate::Domain::Unbounded.validate("Dimensionless", value)
}

/// Feed a canonical value to a hasher so that `0.0` and `-0.0` collide, as
/// they compare equal.
pub(crate) fn hash_value<H: Hasher>(value: f64, state: &mut H) {
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_bits().hash(state);
}

/// An immutable value of the declared family `F`, stored in the family's
/// canonical unit.
///
/// Every constructor and every arithmetic result is checked against the
/// family invariants, so a `Measure` always holds a finite value inside
/// `F::DOMAIN`. Values of different families cannot be added:
///
/// ```compile_fail
/// use facsim_measure::{Length, Measure, Time};
///
/// let t = Measure::<Time>::new(1.0).unwrap();
/// let l = Measure::<Length>::new(1.0).unwrap();
/// let _ = t + l;
/// ```
#[derive(Clone, Copy)]
pub struct Measure<F: Family> {
    value: f64,
    family: PhantomData<F>,
}

impl<F: Family> Measure<F> {
    /// The family factory: build from a canonical value.
    pub fn new(value: f64) -> Result<Self, MeasureError> {
        let value = F::DOMAIN.validate(F::NAME, value)?;
        Ok(Self {
            value,
            family: PhantomData,
        })
    }

    pub const fn zero() -> Self {
        Self {
            value: 0.0,
            family: PhantomData,
        }
    }

    /// Build from a raw value expressed in `unit`.
    pub fn from_unit(raw: f64, unit: &UnitOfMeasure) -> Result<Self, MeasureError> {
        if unit.dimensions() != F::DIMENSIONS {
            return Err(MeasureError::mismatch(F::DIMENSIONS, unit.dimensions()));
        }
        Self::new(unit.import_value(raw))
    }

    /// Build from a raw value in the unit with the given symbol.
    pub fn from_symbol(raw: f64, symbol: &str) -> Result<Self, MeasureError> {
        let unit = F::unit(symbol).ok_or_else(|| ParseError::UnknownUnit(symbol.to_string()))?;
        Self::from_unit(raw, unit)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Express this value in `unit`.
    pub fn to_unit(&self, unit: &UnitOfMeasure) -> Result<f64, MeasureError> {
        if unit.dimensions() != F::DIMENSIONS {
            return Err(MeasureError::mismatch(F::DIMENSIONS, unit.dimensions()));
        }
        Ok(unit.export_value(self.value))
    }

    pub fn scale(&self, factor: f64) -> Result<Self, MeasureError> {
        Self::new(self.value * factor)
    }

    /// Divide by a plain number. Division by zero is reported as an invalid
    /// value, never as a separate error.
    pub fn divide_by_scalar(&self, divisor: f64) -> Result<Self, MeasureError> {
        Self::new(self.value / divisor)
    }
}

impl<F: Family> Quantity for Measure<F> {
    fn value(&self) -> f64 {
        self.value
    }

    fn dimensions(&self) -> Dimensions {
        F::DIMENSIONS
    }
}

impl<F: Family> Default for Measure<F> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<F: Family> ops::Add for Measure<F> {
    type Output = Result<Measure<F>, MeasureError>;
    fn add(self, rhs: Self) -> Self::Output {
        Measure::new(self.value + rhs.value)
    }
}

impl<F: Family> ops::Sub for Measure<F> {
    type Output = Result<Measure<F>, MeasureError>;
    fn sub(self, rhs: Self) -> Self::Output {
        Measure::new(self.value - rhs.value)
    }
}

impl<F: Family> ops::Add<GenericMeasure> for Measure<F> {
    type Output = Result<Measure<F>, MeasureError>;
    fn add(self, rhs: GenericMeasure) -> Self::Output {
        if rhs.dimensions() != F::DIMENSIONS {
            return Err(MeasureError::mismatch(F::DIMENSIONS, rhs.dimensions()));
        }
        Measure::new(self.value + rhs.value())
    }
}

impl<F: Family> ops::Sub<GenericMeasure> for Measure<F> {
    type Output = Result<Measure<F>, MeasureError>;
    fn sub(self, rhs: GenericMeasure) -> Self::Output {
        if rhs.dimensions() != F::DIMENSIONS {
            return Err(MeasureError::mismatch(F::DIMENSIONS, rhs.dimensions()));
        }
        Measure::new(self.value - rhs.value())
    }
}

impl<F: Family> ops::Mul<f64> for Measure<F> {
    type Output = Result<Measure<F>, MeasureError>;
    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl<F: Family> ops::Div<f64> for Measure<F> {
    type Output = Result<Measure<F>, MeasureError>;
    fn div(self, rhs: f64) -> Self::Output {
        self.divide_by_scalar(rhs)
    }
}

/// Same family: the dimensions cancel, leaving a plain ratio.
impl<F: Family> ops::Div for Measure<F> {
    type Output = Result<f64, MeasureError>;
    fn div(self, rhs: Self) -> Self::Output {
        ratio(self.value / rhs.value)
    }
}

impl<F: Family> PartialEq for Measure<F> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

// Values are never NaN.
impl<F: Family> Eq for Measure<F> {}

impl<F: Family> Hash for Measure<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        F::DIMENSIONS.hash(state);
        hash_value(self.value, state);
    }
}

impl<F: Family> PartialOrd for Measure<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Family> Ord for Measure<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .partial_cmp(&other.value)
            .unwrap_or(Ordering::Equal)
    }
}

impl<F: Family> fmt::Debug for Measure<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Measure")
            .field("family", &F::NAME)
            .field("value", &self.value)
            .finish()
    }
}

impl<F: Family> fmt::Display for Measure<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if F::DIMENSIONS.is_unitless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, F::DIMENSIONS)
        }
    }
}

/// Split "1.5 min" or "1.5min" into its number and unit symbol.
pub(crate) fn split_quantity(s: &str) -> Result<(f64, &str), ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::InvalidFormat(s.to_string()));
    }

    let (number_str, unit_str) = match s.split_once(char::is_whitespace) {
        Some((number, unit)) => (number, unit.trim()),
        None => s.split_at(number_len(s)),
    };
    if number_str.is_empty() {
        return Err(ParseError::InvalidFormat(s.to_string()));
    }
    let number = number_str
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(number_str.to_string()))?;
    Ok((number, unit_str))
}

/// Length of the leading number in "2.5e-3s": an optional sign, digits and
/// dots, then an exponent only when a digit follows the `e`.
fn number_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
            i += 1;
        }
        i
    };

    let start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mantissa_end = digits_from(start);
    if !matches!(bytes.get(mantissa_end), Some(b'e' | b'E')) {
        return mantissa_end;
    }
    let mut exp = mantissa_end + 1;
    if matches!(bytes.get(exp), Some(b'+' | b'-')) {
        exp += 1;
    }
    if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
        let mut end = exp;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        end
    } else {
        mantissa_end
    }
}

impl<F: Family> FromStr for Measure<F> {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        log::trace!("Parsing {} from {s:?}", F::NAME);
        let (number, symbol) = split_quantity(s)?;
        if symbol.is_empty() {
            return Self::new(number);
        }
        Self::from_symbol(number, symbol)
    }
}

impl<F: Family> From<Measure<F>> for f64 {
    fn from(measure: Measure<F>) -> f64 {
        measure.value
    }
}

impl<F: Family> TryFrom<f64> for Measure<F> {
    type Error = MeasureError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<F: Family> serde::Serialize for Measure<F> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.value)
    }
}

impl<'de, F: Family> serde::Deserialize<'de> for Measure<F> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Angle, Length, Mass, Temperature, Time, Velocity};
    use std::collections::HashSet;

    fn time(v: f64) -> Measure<Time> {
        Measure::new(v).unwrap()
    }

    fn length(v: f64) -> Measure<Length> {
        Measure::new(v).unwrap()
    }

    fn assert_invalid<T: fmt::Debug>(result: Result<T, MeasureError>) {
        assert!(
            matches!(result, Err(MeasureError::InvalidValue { .. })),
            "expected InvalidValue, got {result:?}"
        );
    }

    #[test]
    fn test_construction_rejects_non_finite() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_invalid(Measure::<Time>::new(bad));
            assert_invalid(Measure::<Length>::new(bad));
            assert_invalid(Measure::<Angle>::new(bad));
            assert_invalid(Measure::<Mass>::new(bad));
            assert_invalid(Measure::<Temperature>::new(bad));
            assert_invalid(Measure::<Velocity>::new(bad));
        }
    }

    #[test]
    fn test_construction_domain() {
        assert_invalid(Measure::<Time>::new(-1.0));
        assert_invalid(Measure::<Time>::new(-f64::MIN_POSITIVE));
        assert_invalid(Measure::<Mass>::new(-f64::MAX));
        assert!(Measure::<Time>::new(0.0).is_ok());
        assert!(Measure::<Time>::new(f64::MAX).is_ok());
        assert!(Measure::<Length>::new(-1.0).is_ok());
        assert_eq!(Measure::<Time>::zero(), time(0.0));
        assert_eq!(Measure::<Time>::default(), Measure::<Time>::zero());
    }

    #[test]
    fn test_add_subtract() {
        let five = time(5.0);
        assert_eq!((five + Measure::zero()).unwrap(), five);
        assert_eq!((five + five).unwrap(), time(5.0 + 5.0));

        let m1 = length(12.75);
        let m2 = length(-3.5);
        let back = ((m1 + m2).unwrap() - m2).unwrap();
        assert!((back.value() - m1.value()).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic_revalidates_domain() {
        assert_invalid(time(1.0) - time(2.0));
        assert_invalid(time(f64::MAX) + time(f64::MAX));
        assert_invalid(time(2.0).scale(-1.0));
        assert_invalid(time(2.0) * f64::NAN);
        assert!(length(1.0).scale(-1.0).is_ok());
    }

    #[test]
    fn test_scale() {
        let scaled = time(2.0).scale(3.0).unwrap();
        assert_eq!(scaled.value(), 6.0);
        assert_eq!(scaled.dimensions(), Dimensions::TIME);
        assert_eq!((time(2.0) * 3.0).unwrap(), scaled);
    }

    #[test]
    fn test_divide_by_scalar() {
        assert_eq!(time(6.0).divide_by_scalar(4.0).unwrap().value(), 1.5);
        assert_eq!((length(6.0) / 2.0).unwrap(), length(3.0));
        assert_invalid(time(6.0).divide_by_scalar(0.0));
        assert_invalid(length(-6.0) / 0.0);
        assert_invalid(length(0.0) / 0.0);
    }

    #[test]
    fn test_same_family_ratio() {
        assert_eq!((length(10.0) / length(4.0)).unwrap(), 2.5);
        assert_invalid(length(10.0) / length(0.0));

        let quotient = time(9.0).divide(&time(3.0)).unwrap();
        assert_eq!(quotient, Quotient::Scalar(3.0));
        assert_eq!(quotient.scalar(), Some(3.0));
        assert_eq!(quotient.generic(), None);
    }

    #[test]
    fn test_cross_family_divide() {
        let speed = length(10.0)
            .divide(&time(2.0))
            .unwrap()
            .generic()
            .unwrap();
        assert_eq!(speed.value(), 5.0);
        assert_eq!(speed.dimensions(), Length::DIMENSIONS.divide(Time::DIMENSIONS));
    }

    #[test]
    fn test_multiply_always_generic() {
        let area = length(3.0).multiply(&length(4.0)).unwrap();
        assert_eq!(area.value(), 12.0);
        assert_eq!(area.dimensions(), Dimensions::LENGTH.powi(2));

        // Dimensions match the declared velocity family but the product stays generic.
        let velocity: Measure<Velocity> = Measure::new(2.0).unwrap();
        let distance = velocity.multiply(&time(3.0)).unwrap();
        assert_eq!(distance.dimensions(), Length::DIMENSIONS);
        assert_eq!(distance.value(), 6.0);

        assert_invalid(length(f64::MAX).multiply(&length(f64::MAX)));
    }

    #[test]
    fn test_equality_and_hash() {
        assert_eq!(length(0.0), length(-0.0));
        assert_ne!(length(1.0), length(2.0));

        let set: HashSet<_> = [length(0.0), length(-0.0), length(1.0), length(1.0)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_ordering() {
        let mut times = vec![time(10.0), time(9.0), time(11.0), time(10.0)];
        times.sort();
        assert_eq!(times, vec![time(9.0), time(10.0), time(10.0), time(11.0)]);
        assert!(time(9.0) < time(11.0));
        assert_eq!(time(10.0).cmp(&time(10.0)), Ordering::Equal);
        assert_eq!(time(3.0).min(time(2.0)), time(2.0));
        assert_eq!(time(3.0).max(time(2.0)), time(3.0));
    }

    #[test]
    fn test_units() {
        let minute = Time::unit("min").unwrap();
        assert_eq!(Measure::<Time>::from_unit(1.0, minute).unwrap(), time(60.0));
        assert_eq!(time(90.0).to_unit(minute).unwrap(), 1.5);

        let metre = Length::unit("m").unwrap();
        assert!(matches!(
            Measure::<Time>::from_unit(1.0, metre),
            Err(MeasureError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            time(1.0).to_unit(metre),
            Err(MeasureError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            Measure::<Time>::from_symbol(1.0, "fortnight"),
            Err(MeasureError::Parse(ParseError::UnknownUnit(_)))
        ));
    }

    #[test]
    fn test_parse() {
        for (input, expected) in [
            ("1.5 min", 90.0),
            ("1.5min", 90.0),
            ("2 h", 7200.0),
            ("250ms", 0.25),
            ("42", 42.0),
            ("  3 s ", 3.0),
            ("1e3 s", 1000.0),
            ("1e3s", 1000.0),
            ("2.5e-3s", 0.0025),
            ("1E+2min", 6000.0),
            ("+4s", 4.0),
        ] {
            let parsed: Measure<Time> = input.parse().unwrap();
            assert!(
                (parsed.value() - expected).abs() < 1e-9,
                "'{input}' parsed as {parsed:?}"
            );
        }

        for input in ["", "min", "1.2.3 s", "5 parsecs", "2e", "3es"] {
            assert!(input.parse::<Measure<Time>>().is_err(), "'{input}'");
        }
        assert_invalid("-1 s".parse::<Measure<Time>>());
    }

    #[test]
    fn test_display() {
        assert_eq!(time(60.0).to_string(), "60 s");
        assert_eq!(length(-2.5).to_string(), "-2.5 m");
        let v: Measure<Velocity> = Measure::new(5.0).unwrap();
        assert_eq!(v.to_string(), "5 m/s");
        assert_eq!(
            format!("{:?}", time(1.0)),
            "Measure { family: \"Time\", value: 1.0 }"
        );
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&time(1.5)).unwrap();
        assert_eq!(json, "1.5");
        let back: Measure<Time> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time(1.5));

        let err = serde_json::from_str::<Measure<Time>>("-2.0").unwrap_err();
        assert!(err.to_string().contains("negative"));
    }
}
