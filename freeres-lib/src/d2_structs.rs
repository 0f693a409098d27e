use num_enum::TryFromPrimitive;

use crate::{Error, Result};

macro_rules! from_tag {
    ($type:ty, $kind:literal) => {
        impl $type {
            #[track_caller]
            pub fn from_tag(value: u32) -> Result<Self> {
                Self::try_from(value).map_err(|_| Error::unsupported($kind, value))
            }
        }
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum ScreenOpenMode {
    None = 0,
    Right = 1,
    Left = 2,
    Both = 3,
}
from_tag!(ScreenOpenMode, "screen open mode");

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum VideoMode {
    Gdi = 1,
    Software = 2,
    DirectDraw = 3,
    Glide = 4,
    OpenGl = 5,
    Direct3D = 6,
}
from_tag!(VideoMode, "video mode");

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum Glide3xLibraryVersion {
    Sven1_4_4_21 = 0,
    Sven1_4_6_1,
    Sven1_4_8_3,
    NGlide3_10_0_658,
    /// D2DX exposes its own resolution API, so nothing in glide3x gets patched.
    D2dx,
}
from_tag!(Glide3xLibraryVersion, "glide3x library version");

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum DrawEffect {
    OneFourthOpaque = 0,
    HalfOpaque = 1,
    ThreeFourthsOpaque = 2,
    Unknown3 = 3,
    Unknown4 = 4,
    None = 5,
    Unknown6 = 6,
    Unknown7 = 7,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum TextFont {
    Formal10 = 0,
    Exocet16 = 1,
    DiabloMenu30 = 2,
    DiabloMenu42 = 3,
    Formal12 = 4,
    Formal6 = 5,
    Formal8 = 6,
    Exocet8 = 8,
    Formal11 = 9,
}
from_tag!(TextFont, "text font");

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum TextColor {
    White = 0,
    Red = 1,
    Green = 2,
    Blue = 3,
    Gold = 4,
    Grey = 5,
    Black = 6,
    Tan = 7,
    Orange = 8,
    Yellow = 9,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum InventoryArrangeMode {
    Res640x480 = 0,
    Res800x600 = 1,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GameResolution {
    pub width: i32,
    pub height: i32,
}

impl GameResolution {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct PositionalRectangle {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl PositionalRectangle {
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
            top: self.top + dy,
            bottom: self.bottom + dy,
        }
    }
}

/// Where an inventory grid sits and how big its cells are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct GridLayout {
    pub num_columns: u8,
    pub num_rows: u8,
    pub position: PositionalRectangle,
    pub cell_width: u8,
    pub cell_height: u8,
}

impl GridLayout {
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..*self
        }
    }
}
