use freeres_lib::{
    fatal::or_exit, version_patch, BranchType, Error, GameOffset, GamePatch, GameVersion,
    Library, PatchContext, PatchDefinition, PatchSet, Result, VersionPatch, VideoMode,
};

use crate::{interception, props, resolution::ingame_resolution_from_id};

/// Sizes the D2GDI bit block buffer for the configured resolution.
pub struct SetBitBlockWidthAndHeight;

impl PatchDefinition for SetBitBlockWidthAndHeight {
    const NAME: &'static str = "D2GDI bit block width and height";

    fn is_applicable(ctx: &PatchContext) -> bool {
        ctx.video_mode == VideoMode::Gdi && ctx.game_version <= GameVersion::V1_10
    }

    fn init_patch(ctx: &PatchContext) -> Result<Box<dyn VersionPatch>> {
        let destination = interception::stubs().set_bit_block_width_and_height;
        Ok(Box::new(SetBitBlockWidthAndHeight1_07::new(
            ctx,
            destination,
        )?))
    }
}

/// 1.07 Beta through 1.10.
pub struct SetBitBlockWidthAndHeight1_07 {
    patches: PatchSet,
}
version_patch!(SetBitBlockWidthAndHeight1_07);

impl SetBitBlockWidthAndHeight1_07 {
    pub fn new(ctx: &PatchContext, destination: usize) -> Result<Self> {
        let (offset, size) = match ctx.game_version {
            GameVersion::V1_07Beta => (0x115A, 0x60),
            GameVersion::V1_07
            | GameVersion::V1_08
            | GameVersion::V1_09
            | GameVersion::V1_09B
            | GameVersion::V1_09D
            | GameVersion::V1_10Beta
            | GameVersion::V1_10SBeta
            | GameVersion::V1_10 => (0x114A, 0x60),
            version => return Err(Error::unsupported_version(version)),
        };
        let address = ctx.resolve(GameOffset::new(Library::D2Gdi, offset))?;
        Ok(Self {
            patches: PatchSet::new(vec![GamePatch::branch(
                address,
                BranchType::Call,
                destination,
                size,
            )?]),
        })
    }
}

pub(crate) extern "C" fn on_set_bit_block_width_and_height() {
    let props = props();
    let resolution = or_exit(
        ingame_resolution_from_id(props.host.resolution_mode(), &props.config).map_err(Into::into),
    );
    props
        .host
        .set_bit_block_width_and_height(resolution.width, resolution.height);
}
