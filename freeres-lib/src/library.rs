use std::fmt;

use crate::GameVersion;

/// A module loaded into the game process that offsets are relative to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Library {
    Game,
    BnClient,
    D2Client,
    D2Cmp,
    D2Common,
    D2DDraw,
    D2Direct3D,
    D2Game,
    D2Gdi,
    D2Gfx,
    D2Glide,
    D2Lang,
    D2Launch,
    D2McpClient,
    D2Multi,
    D2Net,
    D2Sound,
    D2Win,
    Fog,
    Storm,
    /// The Glide wrapper installed next to the game, not a Blizzard library.
    Glide3x,
}

impl Library {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Game => "Game.exe",
            Self::BnClient => "BNClient.dll",
            Self::D2Client => "D2Client.dll",
            Self::D2Cmp => "D2CMP.dll",
            Self::D2Common => "D2Common.dll",
            Self::D2DDraw => "D2DDraw.dll",
            Self::D2Direct3D => "D2Direct3D.dll",
            Self::D2Game => "D2Game.dll",
            Self::D2Gdi => "D2Gdi.dll",
            Self::D2Gfx => "D2Gfx.dll",
            Self::D2Glide => "D2Glide.dll",
            Self::D2Lang => "D2Lang.dll",
            Self::D2Launch => "D2Launch.dll",
            Self::D2McpClient => "D2MCPClient.dll",
            Self::D2Multi => "D2Multi.dll",
            Self::D2Net => "D2Net.dll",
            Self::D2Sound => "D2Sound.dll",
            Self::D2Win => "D2Win.dll",
            Self::Fog => "Fog.dll",
            Self::Storm => "Storm.dll",
            Self::Glide3x => "glide3x.dll",
        }
    }

    /// Name of the module that actually holds this library's code for `version`.
    pub fn module_name(self, version: GameVersion) -> &'static str {
        if version.is_1_14_plus() && self != Self::Glide3x {
            return Self::Game.file_name();
        }
        self.file_name()
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
