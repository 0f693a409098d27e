use freeres_lib::{
    fatal::or_exit, version_patch, BranchType, Error, GameOffset, GamePatch, GameVersion,
    Library, PatchContext, PatchDefinition, PatchSet, PositionalRectangle, Result, VersionPatch,
};

use crate::{
    interception, inventory::global_inventory_position, props,
    resolution::ingame_resolution_from_id,
};

/// Replaces D2Common's inventory placement so panels follow the screen centre.
pub struct GetGlobalInventoryPosition;

impl PatchDefinition for GetGlobalInventoryPosition {
    const NAME: &'static str = "get global inventory position";

    fn is_applicable(_ctx: &PatchContext) -> bool {
        true
    }

    fn init_patch(ctx: &PatchContext) -> Result<Box<dyn VersionPatch>> {
        let destination = interception::stubs().get_global_inventory_position;
        Ok(Box::new(GetGlobalInventoryPositionPatch::new(
            ctx,
            destination,
        )?))
    }
}

pub struct GetGlobalInventoryPositionPatch {
    patches: PatchSet,
}
version_patch!(GetGlobalInventoryPositionPatch);

impl GetGlobalInventoryPositionPatch {
    pub fn new(ctx: &PatchContext, destination: usize) -> Result<Self> {
        let offset = match ctx.game_version {
            GameVersion::V1_09D => 0x80E0,
            GameVersion::V1_13C => 0x2B640,
            GameVersion::V1_13D => 0x1BD00,
            GameVersion::LodV1_14C => 0x2615F0,
            GameVersion::LodV1_14D => 0x263470,
            version => return Err(Error::unsupported_version(version)),
        };
        let entry = ctx.resolve(GameOffset::new(Library::D2Common, offset))?;
        Ok(Self {
            patches: PatchSet::new(vec![GamePatch::branch(
                entry,
                BranchType::Jump,
                destination,
                5,
            )?]),
        })
    }
}

/// The arrange mode the game asks for is ignored; it is picked from the
/// current resolution instead.
pub(crate) extern "C" fn on_get_global_inventory_position(
    record_index: u32,
    _arrange_mode: u32,
    out: *mut PositionalRectangle,
) {
    let props = props();
    let resolution = or_exit(
        ingame_resolution_from_id(props.host.resolution_mode(), &props.config).map_err(Into::into),
    );
    let position = global_inventory_position(resolution, |mode| {
        props.host.inventory_position(record_index, mode as u32)
    });
    unsafe { *out = position };
}

#[cfg(test)]
mod tests {
    use freeres_lib::VideoMode;

    use super::*;
    use crate::patches::test_image::TestImage;

    #[test]
    fn unmapped_version_is_unsupported_in_every_video_mode() {
        let image = TestImage::new();
        for video_mode in [VideoMode::Gdi, VideoMode::Glide, VideoMode::Direct3D] {
            let ctx = image.context(GameVersion::V1_12A, video_mode, None);
            assert!(matches!(
                GetGlobalInventoryPosition::build(&ctx),
                Err(Error::UnsupportedVersion { .. })
            ));
        }
    }

    #[test]
    fn jumps_from_the_function_entry() {
        let image = TestImage::new();
        for (version, offset) in [
            (GameVersion::V1_09D, 0x80E0),
            (GameVersion::V1_13D, 0x1BD00),
            (GameVersion::LodV1_14C, 0x2615F0),
        ] {
            let ctx = image.context(version, VideoMode::Direct3D, None);
            let mut patch =
                GetGlobalInventoryPositionPatch::new(&ctx, image.destination()).unwrap();
            patch.apply().unwrap();
            assert_eq!(image.bytes(offset, 1), [0xE9]);
            patch.remove().unwrap();
            assert!(image.is_pristine());
        }
    }
}
