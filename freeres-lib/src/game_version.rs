use std::fmt;

use num_enum::TryFromPrimitive;

use crate::{Error, Result};

/// A build of Diablo II, as reported by the host.
///
/// Declaration order is release order, so versions compare chronologically.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, TryFromPrimitive)]
#[repr(u32)]
pub enum GameVersion {
    V1_07Beta = 0,
    V1_07,
    V1_08,
    V1_09,
    V1_09B,
    V1_09D,
    V1_10Beta,
    V1_10SBeta,
    V1_10,
    V1_11,
    V1_11B,
    V1_12A,
    V1_13ABeta,
    V1_13C,
    V1_13D,
    ClassicV1_14A,
    LodV1_14A,
    ClassicV1_14B,
    LodV1_14B,
    ClassicV1_14C,
    LodV1_14C,
    ClassicV1_14D,
    LodV1_14D,
}

impl GameVersion {
    #[track_caller]
    pub fn from_tag(value: u32) -> Result<Self> {
        Self::try_from(value).map_err(|_| Error::unsupported_version(format!("tag {}", value)))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::V1_07Beta => "1.07 Beta",
            Self::V1_07 => "1.07",
            Self::V1_08 => "1.08",
            Self::V1_09 => "1.09",
            Self::V1_09B => "1.09B",
            Self::V1_09D => "1.09D",
            Self::V1_10Beta => "1.10 Beta",
            Self::V1_10SBeta => "1.10s Beta",
            Self::V1_10 => "1.10",
            Self::V1_11 => "1.11",
            Self::V1_11B => "1.11B",
            Self::V1_12A => "1.12A",
            Self::V1_13ABeta => "1.13A Beta",
            Self::V1_13C => "1.13C",
            Self::V1_13D => "1.13D",
            Self::ClassicV1_14A => "Classic 1.14A",
            Self::LodV1_14A => "LoD 1.14A",
            Self::ClassicV1_14B => "Classic 1.14B",
            Self::LodV1_14B => "LoD 1.14B",
            Self::ClassicV1_14C => "Classic 1.14C",
            Self::LodV1_14C => "LoD 1.14C",
            Self::ClassicV1_14D => "Classic 1.14D",
            Self::LodV1_14D => "LoD 1.14D",
        }
    }

    /// 1.14 and later ship every game library inside Game.exe.
    pub fn is_1_14_plus(self) -> bool {
        self >= Self::ClassicV1_14A
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
