use std::{fmt, str::FromStr};

use crate::error::ParseError;

/// Exponents of the seven base dimensions a quantity is built from.
///
/// Two quantities share a dimension exactly when their vectors are
/// structurally equal. Products add exponents and quotients subtract them, so
/// `LENGTH / TIME` is the dimension of a velocity whether or not a velocity
/// family was ever declared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub time: i8,
    pub length: i8,
    pub angle: i8,
    pub mass: i8,
    pub temperature: i8,
    pub current: i8,
    pub luminosity: i8,
}

impl Dimensions {
    pub const UNITLESS: Self = Self::new(0, 0, 0, 0, 0, 0, 0);
    pub const TIME: Self = Self::new(1, 0, 0, 0, 0, 0, 0);
    pub const LENGTH: Self = Self::new(0, 1, 0, 0, 0, 0, 0);
    pub const ANGLE: Self = Self::new(0, 0, 1, 0, 0, 0, 0);
    pub const MASS: Self = Self::new(0, 0, 0, 1, 0, 0, 0);
    pub const TEMPERATURE: Self = Self::new(0, 0, 0, 0, 1, 0, 0);
    pub const CURRENT: Self = Self::new(0, 0, 0, 0, 0, 1, 0);
    pub const LUMINOSITY: Self = Self::new(0, 0, 0, 0, 0, 0, 1);

    pub const fn new(
        time: i8,
        length: i8,
        angle: i8,
        mass: i8,
        temperature: i8,
        current: i8,
        luminosity: i8,
    ) -> Self {
        Self {
            time,
            length,
            angle,
            mass,
            temperature,
            current,
            luminosity,
        }
    }

    /// Dimension of a product: exponents are summed.
    pub const fn multiply(self, other: Self) -> Self {
        Self::new(
            self.time + other.time,
            self.length + other.length,
            self.angle + other.angle,
            self.mass + other.mass,
            self.temperature + other.temperature,
            self.current + other.current,
            self.luminosity + other.luminosity,
        )
    }

    /// Dimension of a quotient: exponents are subtracted.
    pub const fn divide(self, other: Self) -> Self {
        Self::new(
            self.time - other.time,
            self.length - other.length,
            self.angle - other.angle,
            self.mass - other.mass,
            self.temperature - other.temperature,
            self.current - other.current,
            self.luminosity - other.luminosity,
        )
    }

    pub const fn powi(self, n: i8) -> Self {
        Self::new(
            self.time * n,
            self.length * n,
            self.angle * n,
            self.mass * n,
            self.temperature * n,
            self.current * n,
            self.luminosity * n,
        )
    }

    /// Like [`Dimensions::multiply`], but `None` when an exponent leaves the `i8` range.
    pub fn checked_multiply(self, other: Self) -> Option<Self> {
        self.zip_with(other, i8::checked_add)
    }

    pub fn checked_divide(self, other: Self) -> Option<Self> {
        self.zip_with(other, i8::checked_sub)
    }

    pub fn checked_powi(self, n: i8) -> Option<Self> {
        self.zip_with(Self::UNITLESS, |exponent, _| exponent.checked_mul(n))
    }

    fn zip_with(self, other: Self, op: impl Fn(i8, i8) -> Option<i8>) -> Option<Self> {
        Some(Self::new(
            op(self.time, other.time)?,
            op(self.length, other.length)?,
            op(self.angle, other.angle)?,
            op(self.mass, other.mass)?,
            op(self.temperature, other.temperature)?,
            op(self.current, other.current)?,
            op(self.luminosity, other.luminosity)?,
        ))
    }

    pub const fn recip(self) -> Self {
        Self::UNITLESS.divide(self)
    }

    pub const fn is_unitless(&self) -> bool {
        self.time == 0
            && self.length == 0
            && self.angle == 0
            && self.mass == 0
            && self.temperature == 0
            && self.current == 0
            && self.luminosity == 0
    }

    fn base(symbol: &str) -> Option<Self> {
        let dims = match symbol {
            "s" => Self::TIME,
            "m" => Self::LENGTH,
            "rad" => Self::ANGLE,
            "kg" => Self::MASS,
            "K" => Self::TEMPERATURE,
            "A" => Self::CURRENT,
            "cd" => Self::LUMINOSITY,
            _ => return None,
        };
        Some(dims)
    }

    /// Base symbols paired with their exponents, in rendering order.
    fn exponents(&self) -> [(&'static str, i8); 7] {
        [
            ("kg", self.mass),
            ("m", self.length),
            ("rad", self.angle),
            ("A", self.current),
            ("K", self.temperature),
            ("cd", self.luminosity),
            ("s", self.time),
        ]
    }

    fn fmt_unit(&self) -> String {
        let mut num = Vec::new();
        let mut den = Vec::new();
        for (sym, exponent) in self.exponents() {
            match exponent {
                0 => {}
                1 => num.push(sym.to_string()),
                -1 => den.push(sym.to_string()),
                n if n > 1 => num.push(format!("{sym}^{n}")),
                n => den.push(format!("{sym}^{}", -(n as i16))),
            }
        }
        let format_units = |units: &[String]| {
            let joined = units.join("·");
            if units.len() > 1 {
                format!("({})", joined)
            } else {
                joined
            }
        };

        match (num.is_empty(), den.is_empty()) {
            (true, true) => String::new(),
            (false, true) => num.join("·"),
            (true, false) => format!("1/{}", format_units(&den)),
            (false, false) => format!("{}/{}", num.join("·"), format_units(&den)),
        }
    }
}

impl std::ops::Mul for Dimensions {
    type Output = Dimensions;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl std::ops::Div for Dimensions {
    type Output = Dimensions;
    fn div(self, rhs: Self) -> Self::Output {
        self.divide(rhs)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fmt_unit())
    }
}

/// Parse a product of base symbols like "kg·m^2" and multiply them together
fn gather_factors(list: &str, original: &str) -> Result<Dimensions, ParseError> {
    let list = list
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(list);

    let mut acc = Dimensions::UNITLESS;
    for token in list
        .split(['·', '*'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        let (symbol, exponent) = match token.split_once('^') {
            Some((symbol, exp)) => {
                let exp: i8 = exp
                    .trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidDimensions(original.to_string()))?;
                (symbol.trim(), exp)
            }
            None => (token, 1),
        };
        let invalid = || ParseError::InvalidDimensions(original.to_string());
        acc = Dimensions::base(symbol)
            .and_then(|base| base.checked_powi(exponent))
            .and_then(|factor| acc.checked_multiply(factor))
            .ok_or_else(invalid)?;
    }
    Ok(acc)
}

impl FromStr for Dimensions {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        log::trace!("Parsing dimensions from {s:?}");

        let (num, den) = match s.split_once('/') {
            None => (s, None),
            Some((lhs, rhs)) => {
                if rhs.contains('/') {
                    return Err(ParseError::InvalidDimensions(s.to_string()));
                }
                let lhs = lhs.trim();
                let lhs = if lhs == "1" { "" } else { lhs };
                if rhs.trim().is_empty() {
                    return Err(ParseError::InvalidDimensions(s.to_string()));
                }
                (lhs, Some(rhs.trim()))
            }
        };

        let mut dims = gather_factors(num, s)?;
        if let Some(den) = den {
            dims = dims
                .checked_divide(gather_factors(den, s)?)
                .ok_or_else(|| ParseError::InvalidDimensions(s.to_string()))?;
        }
        Ok(dims)
    }
}

impl serde::Serialize for Dimensions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Dimensions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
