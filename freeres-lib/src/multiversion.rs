use tracing::{debug, info};

use crate::{PatchContext, Result, VersionPatch};

/// A feature that is patched differently depending on the running game.
pub trait PatchDefinition {
    const NAME: &'static str;

    fn is_applicable(ctx: &PatchContext) -> bool;

    /// Picks and builds the version patch for `ctx.game_version`. Only called
    /// when [`Self::is_applicable`] holds.
    fn init_patch(ctx: &PatchContext) -> Result<Box<dyn VersionPatch>>;

    fn build(ctx: &PatchContext) -> Result<MultiversionPatch>
    where
        Self: Sized,
    {
        MultiversionPatch::new(Self::NAME, Self::is_applicable(ctx), || {
            Self::init_patch(ctx)
        })
    }
}

pub enum MultiversionPatch {
    Inapplicable {
        name: &'static str,
    },
    Active {
        name: &'static str,
        patch: Box<dyn VersionPatch>,
    },
}

impl MultiversionPatch {
    pub fn new(
        name: &'static str,
        is_applicable: bool,
        init: impl FnOnce() -> Result<Box<dyn VersionPatch>>,
    ) -> Result<Self> {
        if !is_applicable {
            debug!("{} is not applicable", name);
            return Ok(Self::Inapplicable { name });
        }
        Ok(Self::Active {
            name,
            patch: init()?,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Inapplicable { name } | Self::Active { name, .. } => *name,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn apply(&mut self) -> Result<()> {
        let Self::Active { name, patch } = self else {
            return Ok(());
        };
        patch.apply()?;
        info!("applied {}", name);
        Ok(())
    }

    pub fn remove(&mut self) -> Result<()> {
        let Self::Active { name, patch } = self else {
            return Ok(());
        };
        patch.remove()?;
        info!("removed {}", name);
        Ok(())
    }

    pub fn unload(mut self) -> Result<()> {
        self.remove()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{
        Error, GameAddress, GameOffset, GamePatch, GameVersion, Library, ModuleTable, PatchSet,
        VideoMode,
    };

    struct Recorder {
        log: Rc<Cell<(u32, u32)>>,
    }

    impl VersionPatch for Recorder {
        fn apply(&mut self) -> Result<()> {
            let (applied, removed) = self.log.get();
            self.log.set((applied + 1, removed));
            Ok(())
        }

        fn remove(&mut self) -> Result<()> {
            let (applied, removed) = self.log.get();
            self.log.set((applied, removed + 1));
            Ok(())
        }
    }

    #[test]
    fn inapplicable_patch_never_builds() {
        let mut patch = MultiversionPatch::new("test", false, || -> Result<Box<dyn VersionPatch>> {
            panic!("init must not run")
        })
        .unwrap();
        assert!(!patch.is_applicable());
        patch.apply().unwrap();
        patch.remove().unwrap();
    }

    #[test]
    fn active_patch_delegates() {
        let log = Rc::new(Cell::new((0, 0)));
        let recorder = Recorder { log: log.clone() };
        let mut patch =
            MultiversionPatch::new("test", true, || Ok(Box::new(recorder) as Box<dyn VersionPatch>))
                .unwrap();
        assert_eq!(patch.name(), "test");
        patch.apply().unwrap();
        assert_eq!(log.get(), (1, 0));
        patch.unload().unwrap();
        assert_eq!(log.get(), (1, 1));
    }

    struct OnlyOn1_09D;

    impl PatchDefinition for OnlyOn1_09D {
        const NAME: &'static str = "only on 1.09D";

        fn is_applicable(ctx: &PatchContext) -> bool {
            ctx.video_mode == VideoMode::Glide
        }

        fn init_patch(ctx: &PatchContext) -> Result<Box<dyn VersionPatch>> {
            let address: GameAddress = match ctx.game_version {
                GameVersion::V1_09D => ctx.resolve(GameOffset::new(Library::D2Glide, 0x20))?,
                version => return Err(Error::unsupported_version(version)),
            };
            Ok(Box::new(PatchSet::new(vec![GamePatch::nop(address, 8)])))
        }
    }

    fn context(
        modules: &ModuleTable,
        game_version: GameVersion,
        video_mode: VideoMode,
    ) -> PatchContext<'_> {
        PatchContext {
            game_version,
            video_mode,
            glide3x_library_version: None,
            modules,
        }
    }

    #[test]
    fn unmapped_version_fails_without_writing() {
        let mut image = vec![0x11u8; 0x40];
        let modules =
            unsafe { ModuleTable::new([("D2Glide.dll".to_owned(), image.as_mut_ptr() as usize)]) };
        let ctx = context(&modules, GameVersion::V1_13C, VideoMode::Glide);

        let err = OnlyOn1_09D::build(&ctx).err().unwrap();
        let Error::UnsupportedVersion { value, .. } = err else {
            panic!("expected an unsupported version");
        };
        assert_eq!(value, "1.13C");
        assert!(image.iter().all(|&b| b == 0x11));
    }

    #[test]
    fn predicate_is_checked_before_the_version() {
        let modules = ModuleTable::default();
        let ctx = context(&modules, GameVersion::V1_13C, VideoMode::DirectDraw);
        assert!(!OnlyOn1_09D::build(&ctx).unwrap().is_applicable());
    }

    #[test]
    fn mapped_version_round_trips() {
        let mut image = vec![0x11u8; 0x40];
        let modules =
            unsafe { ModuleTable::new([("D2Glide.dll".to_owned(), image.as_mut_ptr() as usize)]) };
        let ctx = context(&modules, GameVersion::V1_09D, VideoMode::Glide);

        let mut patch = OnlyOn1_09D::build(&ctx).unwrap();
        patch.apply().unwrap();
        assert_eq!(image[0x20..0x28], [0x90; 8]);
        patch.remove().unwrap();
        assert!(image.iter().all(|&b| b == 0x11));
    }
}
