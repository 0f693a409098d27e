use std::{
    mem::transmute,
    sync::atomic::{AtomicUsize, Ordering},
};

use freeres_lib::{
    fatal::or_exit, version_patch, BranchType, Error, GameAddress, GameOffset, GamePatch,
    GameVersion, Library, PatchContext, PatchDefinition, PatchSet, Result, VersionPatch,
};

use crate::{
    draw::draw_screen_background, interception, props, resolution::ingame_resolution_from_id,
    Props,
};

static ORIGINAL_DRAW_SCREENS: AtomicUsize = AtomicUsize::new(0);

/// Fills the sides of the screen next to open panels before the panels are
/// drawn.
pub struct DrawScreenBackground;

impl PatchDefinition for DrawScreenBackground {
    const NAME: &'static str = "draw screen background";

    fn is_applicable(_ctx: &PatchContext) -> bool {
        true
    }

    fn init_patch(ctx: &PatchContext) -> Result<Box<dyn VersionPatch>> {
        let destination = interception::stubs().draw_screen_background;
        match ctx.game_version {
            GameVersion::V1_09D | GameVersion::V1_13C | GameVersion::V1_13D => Ok(Box::new(
                DrawScreenBackground1_09D::new(ctx, destination)?,
            )),
            GameVersion::LodV1_14C | GameVersion::LodV1_14D => Ok(Box::new(
                DrawScreenBackgroundLod1_14C::new(ctx, destination)?,
            )),
            version => Err(Error::unsupported_version(version)),
        }
    }
}

fn hook_draw_screens(
    site: GameAddress,
    branch_type: BranchType,
    destination: usize,
) -> Result<PatchSet> {
    let patch = GamePatch::branch(site, branch_type, destination, 5)?;
    let original = patch
        .original_branch_destination()
        .ok_or_else(|| Error::unsupported("call site", site))?;
    ORIGINAL_DRAW_SCREENS.store(original, Ordering::Relaxed);
    Ok(PatchSet::new(vec![patch]))
}

/// Versions that call DrawScreens.
pub struct DrawScreenBackground1_09D {
    patches: PatchSet,
}
version_patch!(DrawScreenBackground1_09D);

impl DrawScreenBackground1_09D {
    pub fn new(ctx: &PatchContext, destination: usize) -> Result<Self> {
        let offset = match ctx.game_version {
            GameVersion::V1_09D => 0x5F3C7,
            GameVersion::V1_13C => 0x2770C,
            GameVersion::V1_13D => 0x56EB6,
            version => return Err(Error::unsupported_version(version)),
        };
        let site = ctx.resolve(GameOffset::new(Library::D2Client, offset))?;
        Ok(Self {
            patches: hook_draw_screens(site, BranchType::Call, destination)?,
        })
    }
}

/// Versions that tail-jump into DrawScreens.
pub struct DrawScreenBackgroundLod1_14C {
    patches: PatchSet,
}
version_patch!(DrawScreenBackgroundLod1_14C);

impl DrawScreenBackgroundLod1_14C {
    pub fn new(ctx: &PatchContext, destination: usize) -> Result<Self> {
        let offset = match ctx.game_version {
            GameVersion::LodV1_14C => 0x53B67,
            GameVersion::LodV1_14D => 0x56F97,
            version => return Err(Error::unsupported_version(version)),
        };
        let site = ctx.resolve(GameOffset::new(Library::D2Client, offset))?;
        Ok(Self {
            patches: hook_draw_screens(site, BranchType::Jump, destination)?,
        })
    }
}

fn draw(props: &Props) -> anyhow::Result<()> {
    let resolution = ingame_resolution_from_id(props.host.resolution_mode(), &props.config)?;
    let screen_open_mode = props.host.screen_open_mode()?;
    draw_screen_background(&props.host, &props.config, resolution, screen_open_mode)
}

pub(crate) extern "C" fn on_draw_screen_background() {
    or_exit(draw(props()));

    let original = ORIGINAL_DRAW_SCREENS.load(Ordering::Relaxed);
    let draw_screens = unsafe { transmute::<usize, extern "C" fn()>(original) };
    draw_screens();
}
