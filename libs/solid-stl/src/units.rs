//! Length units at the file boundary.
//!
//! Mesh coordinates are millimetres. Files may use any [`LengthUnit`];
//! conversion is a single uniform scale applied on read and write.

use std::fmt;

/// A unit of length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthUnit {
    /// 1 mm
    #[default]
    Millimetre,
    /// 10 mm
    Centimetre,
    /// 1000 mm
    Metre,
    /// 25.4 mm
    Inch,
    /// 304.8 mm
    Foot,
}

impl LengthUnit {
    /// Length of one unit in millimetres.
    pub fn millimetres(self) -> f64 {
        match self {
            Self::Millimetre => 1.0,
            Self::Centimetre => 10.0,
            Self::Metre => 1000.0,
            Self::Inch => 25.4,
            Self::Foot => 304.8,
        }
    }

    /// Factor converting a length in `self` to a length in `other`.
    ///
    /// ```rust
    /// use solid_stl::LengthUnit;
    /// assert!((LengthUnit::Foot.factor_to(LengthUnit::Inch) - 12.0).abs() < 1e-12);
    /// assert_eq!(LengthUnit::Metre.factor_to(LengthUnit::Millimetre), 1000.0);
    /// ```
    pub fn factor_to(self, other: LengthUnit) -> f64 {
        if self == other {
            return 1.0;
        }
        self.millimetres() / other.millimetres()
    }

    /// Short symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Millimetre => "mm",
            Self::Centimetre => "cm",
            Self::Metre => "m",
            Self::Inch => "in",
            Self::Foot => "ft",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
