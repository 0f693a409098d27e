mod address;
mod branch;
pub mod d2_structs;
mod error;
pub mod fatal;
mod game_version;
mod library;
mod macros;
mod memory;
mod multiversion;
mod patch;
pub mod surface;
mod version_patch;

pub use address::{GameAddress, GameOffset, PatchContext};
pub use branch::{decode_branch, encode_branch, BranchType, BRANCH_LEN, NOP};
pub use d2_structs::{
    DrawEffect, GameResolution, Glide3xLibraryVersion, GridLayout, InventoryArrangeMode,
    PositionalRectangle, ScreenOpenMode, TextColor, TextFont, VideoMode,
};
pub use error::{Error, Result};
pub use game_version::GameVersion;
pub use library::Library;
#[cfg(windows)]
pub use memory::LoadedModules;
pub use memory::{ModuleIntrospection, ModuleTable};
pub use multiversion::{MultiversionPatch, PatchDefinition};
pub use patch::GamePatch;
pub use version_patch::{PatchSet, VersionPatch};
