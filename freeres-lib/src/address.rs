use std::fmt;

use crate::{
    memory::ModuleIntrospection, Error, GameVersion, Glide3xLibraryVersion, Library, Result,
    VideoMode,
};

/// A fixed displacement inside one library, precomputed per game version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOffset {
    pub library: Library,
    pub offset: usize,
}

impl GameOffset {
    pub const fn new(library: Library, offset: usize) -> Self {
        Self { library, offset }
    }
}

/// An absolute address inside a loaded module of the game process.
///
/// Only produced by [`PatchContext::resolve`], so holding one means the module
/// was loaded when it was computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameAddress(usize);

impl GameAddress {
    pub fn raw(self) -> usize {
        self.0
    }

    pub fn add(self, delta: usize) -> Self {
        Self(self.0 + delta)
    }
}

impl fmt::Display for GameAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Everything a patch needs to decide whether and how it applies.
///
/// Built once at startup and passed by reference to every patch.
pub struct PatchContext<'a> {
    pub game_version: GameVersion,
    pub video_mode: VideoMode,
    /// `None` unless the game runs on Glide.
    pub glide3x_library_version: Option<Glide3xLibraryVersion>,
    pub modules: &'a dyn ModuleIntrospection,
}

impl PatchContext<'_> {
    pub fn resolve(&self, offset: GameOffset) -> Result<GameAddress> {
        let module = offset.library.module_name(self.game_version);
        let base = self
            .modules
            .base_address(module)
            .ok_or(Error::LibraryNotLoaded {
                library: offset.library,
                module,
            })?;
        Ok(GameAddress(base + offset.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModuleTable;

    fn context(modules: &ModuleTable, game_version: GameVersion) -> PatchContext<'_> {
        PatchContext {
            game_version,
            video_mode: VideoMode::DirectDraw,
            glide3x_library_version: None,
            modules,
        }
    }

    #[test]
    fn adds_offset_to_module_base() {
        let modules = unsafe {
            ModuleTable::new([
                ("D2Client.dll".to_owned(), 0x6fab0000),
                ("Game.exe".to_owned(), 0x400000),
            ])
        };
        let offset = GameOffset::new(Library::D2Client, 0xE5F18);

        let ctx = context(&modules, GameVersion::V1_09D);
        assert_eq!(ctx.resolve(offset).unwrap().raw(), 0x6fb95f18);

        let ctx = context(&modules, GameVersion::LodV1_14D);
        assert_eq!(ctx.resolve(offset).unwrap().raw(), 0x4e5f18);
    }

    #[test]
    fn fails_for_unloaded_library() {
        let modules = ModuleTable::default();
        let ctx = context(&modules, GameVersion::V1_13C);
        let err = ctx
            .resolve(GameOffset::new(Library::D2Gdi, 0x114A))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::LibraryNotLoaded {
                library: Library::D2Gdi,
                ..
            }
        ));
    }
}
