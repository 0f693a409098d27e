use freeres_lib::{
    fatal::or_exit, version_patch, BranchType, Error, GameOffset, GamePatch, GameVersion,
    Library, PatchContext, PatchDefinition, PatchSet, Result, VersionPatch, VideoMode,
};

use crate::{display::display_width_and_height, interception, props};

/// Makes D2Glide open its display at the configured resolution.
pub struct SetDisplayWidthAndHeight;

impl PatchDefinition for SetDisplayWidthAndHeight {
    const NAME: &'static str = "D2Glide display width and height";

    fn is_applicable(ctx: &PatchContext) -> bool {
        ctx.video_mode == VideoMode::Glide && ctx.game_version <= GameVersion::V1_10
    }

    fn init_patch(ctx: &PatchContext) -> Result<Box<dyn VersionPatch>> {
        let destination = interception::stubs().set_display_width_and_height;
        match ctx.game_version {
            GameVersion::V1_09D => Ok(Box::new(SetDisplayWidthAndHeight1_09D::new(
                ctx,
                destination,
            )?)),
            version => Err(Error::unsupported_version(version)),
        }
    }
}

pub struct SetDisplayWidthAndHeight1_09D {
    patches: PatchSet,
}
version_patch!(SetDisplayWidthAndHeight1_09D);

impl SetDisplayWidthAndHeight1_09D {
    pub fn new(ctx: &PatchContext, destination: usize) -> Result<Self> {
        let size_selection = ctx.resolve(GameOffset::new(Library::D2Glide, 0x1B8B))?;
        let mode_check = ctx.resolve(GameOffset::new(Library::D2Glide, 0x1BB6))?;
        Ok(Self {
            patches: PatchSet::new(vec![
                GamePatch::branch(size_selection, BranchType::Call, destination, 0x1B9F - 0x1B8B)?,
                // nop x5; cmp eax, 1; jne +0x11
                GamePatch::buffer(
                    mode_check,
                    &[0x90, 0x90, 0x90, 0x90, 0x90, 0x83, 0xF8, 0x01, 0x75, 0x11],
                ),
            ]),
        })
    }
}

pub(crate) extern "C" fn on_set_display_width_and_height(
    resolution_mode: u32,
    width: *mut i32,
    height: *mut i32,
    glide_res_id: *mut u32,
) {
    let (resolution, id) =
        or_exit(display_width_and_height(resolution_mode, &props().config).map_err(Into::into));
    unsafe {
        *width = resolution.width;
        *height = resolution.height;
        *glide_res_id = id;
    }
}
