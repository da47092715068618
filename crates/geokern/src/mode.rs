//! Numeric mode codes.
//!
//! The integer values are a frozen external contract: new modes take unused
//! codes, existing ones are never renumbered.

use crate::error::{GeomError, GeomResult};

macro_rules! mode_enum {
    (
        $(#[$meta:meta])* $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            #[inline]
            pub fn code(self) -> i32 {
                self as i32
            }
        }

        impl TryFrom<i32> for $name {
            type Error = GeomError;

            fn try_from(code: i32) -> GeomResult<Self> {
                match code {
                    $($code => Ok($name::$variant),)+
                    _ => Err(GeomError::UnknownMode(code)),
                }
            }
        }
    };
}

mode_enum! {
    /// Scalar queries.
    ValueMode {
        Length = 0,
        Width = 1,
        Height = 2,
        Area = 3,
    }
}

mode_enum! {
    /// Geometry-producing queries.
    GeoMode {
        Clone = 10,
        Label = 11,
        Center = 12,
        Centroid = 13,
        Envelope = 14,
        OrientedEnvelope = 15,
        EnclosingCircle = 16,
        InnerRect = 17,
        InnerSquare = 18,
        InnerCircle = 19,
        ConvexHull = 20,
        Simplify = 21,
        SimplifyPreserve = 22,
        Boundary = 23,
    }
}

mode_enum! {
    /// Vertex edits taking a threshold parameter.
    ModifyMode {
        /// Drop vertices within the threshold of the previous kept one.
        RemoveRepeat = 40,
        /// Douglas–Peucker with the threshold as distance.
        Douglas = 41,
        /// Reverse point order; the threshold is ignored.
        Reverse = 42,
    }
}

mode_enum! {
    CombineMode {
        Union = 50,
        Intersection = 51,
        Difference = 52,
        SymDifference = 53,
    }
}

mode_enum! {
    RelationMode {
        Disjoint = 60,
        Intersect = 61,
        Contain = 62,
        Cross = 63,
        Equal = 64,
        Touch = 65,
        Overlap = 66,
        Within = 67,
    }
}

mode_enum! {
    /// Single-answer validity checks.
    CheckMode {
        Simple = 80,
        Closed = 81,
        GoodDirection = 82,
        SelfCross = 83,
        Repeat = 84,
        Lap = 85,
    }
}

/// Any mode code, tagged by family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Value(ValueMode),
    Geo(GeoMode),
    Modify(ModifyMode),
    Combine(CombineMode),
    Relation(RelationMode),
    Check(CheckMode),
}

impl Mode {
    pub fn code(self) -> i32 {
        match self {
            Mode::Value(m) => m.code(),
            Mode::Geo(m) => m.code(),
            Mode::Modify(m) => m.code(),
            Mode::Combine(m) => m.code(),
            Mode::Relation(m) => m.code(),
            Mode::Check(m) => m.code(),
        }
    }
}

impl TryFrom<i32> for Mode {
    type Error = GeomError;

    fn try_from(code: i32) -> GeomResult<Self> {
        Ok(match code {
            0..=9 => Mode::Value(code.try_into()?),
            10..=39 => Mode::Geo(code.try_into()?),
            40..=49 => Mode::Modify(code.try_into()?),
            50..=59 => Mode::Combine(code.try_into()?),
            60..=79 => Mode::Relation(code.try_into()?),
            80..=99 => Mode::Check(code.try_into()?),
            _ => return Err(GeomError::UnknownMode(code)),
        })
    }
}
