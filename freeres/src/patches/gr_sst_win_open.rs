use freeres_lib::{
    fatal::or_exit, version_patch, BranchType, Error, GameOffset, GamePatch,
    Glide3xLibraryVersion, Library, PatchContext, PatchDefinition, PatchSet, Result,
    VersionPatch, VideoMode,
};

use crate::{display::window_width_and_height, interception, props};

/// Makes glide3x open its window at the configured resolution.
pub struct GrSstWinOpen;

impl PatchDefinition for GrSstWinOpen {
    const NAME: &'static str = "glide3x grSstWinOpen";

    fn is_applicable(ctx: &PatchContext) -> bool {
        ctx.video_mode == VideoMode::Glide
            && ctx.glide3x_library_version != Some(Glide3xLibraryVersion::D2dx)
    }

    fn init_patch(ctx: &PatchContext) -> Result<Box<dyn VersionPatch>> {
        let destination = interception::stubs().gr_sst_win_open;
        Ok(Box::new(GrSstWinOpenPatch::new(ctx, destination)?))
    }
}

/// One patch for every supported glide3x, differing only in where the window
/// size is picked.
pub struct GrSstWinOpenPatch {
    patches: PatchSet,
}
version_patch!(GrSstWinOpenPatch);

impl GrSstWinOpenPatch {
    pub fn new(ctx: &PatchContext, destination: usize) -> Result<Self> {
        let (offset, size) = match ctx.glide3x_library_version {
            Some(Glide3xLibraryVersion::Sven1_4_4_21 | Glide3xLibraryVersion::Sven1_4_6_1) => {
                (0xB2A5, 0x17)
            }
            Some(Glide3xLibraryVersion::Sven1_4_8_3) => (0xB8E5, 0x17),
            Some(Glide3xLibraryVersion::NGlide3_10_0_658) => (0x1CA2E, 0x10),
            Some(Glide3xLibraryVersion::D2dx) => {
                return Err(Error::unsupported("glide3x library version", "D2DX"))
            }
            None => return Err(Error::unsupported("glide3x library version", "unknown")),
        };
        let address = ctx.resolve(GameOffset::new(Library::Glide3x, offset))?;
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

pub(crate) extern "C" fn on_gr_sst_win_open(glide_res_id: u32, width: *mut i32, height: *mut i32) {
    let props = props();
    let resolution = or_exit(
        window_width_and_height(glide_res_id, props.host.resolution_mode(), &props.config)
            .map_err(Into::into),
    );
    unsafe {
        *width = resolution.width;
        *height = resolution.height;
    }
}

#[cfg(test)]
mod tests {
    use freeres_lib::GameVersion;

    use super::*;
    use crate::patches::test_image::TestImage;

    #[test]
    fn skipped_for_d2dx_and_other_video_modes() {
        let image = TestImage::new();
        let ctx = image.context(
            GameVersion::V1_13C,
            VideoMode::Glide,
            Some(Glide3xLibraryVersion::D2dx),
        );
        assert!(!GrSstWinOpen::build(&ctx).unwrap().is_applicable());
        let ctx = image.context(GameVersion::V1_13C, VideoMode::Direct3D, None);
        assert!(!GrSstWinOpen::build(&ctx).unwrap().is_applicable());
    }

    #[test]
    fn unknown_glide3x_is_unsupported() {
        let image = TestImage::new();
        let ctx = image.context(GameVersion::V1_13C, VideoMode::Glide, None);
        let Err(Error::UnsupportedVersion { kind, .. }) = GrSstWinOpen::build(&ctx) else {
            panic!("a glide3x without offsets must not be patched");
        };
        assert_eq!(kind, "glide3x library version");
        assert!(image.is_pristine());
    }

    #[test]
    fn older_sven_builds_share_a_site() {
        let image = TestImage::new();
        for version in [
            Glide3xLibraryVersion::Sven1_4_4_21,
            Glide3xLibraryVersion::Sven1_4_6_1,
        ] {
            let ctx = image.context(GameVersion::V1_13C, VideoMode::Glide, Some(version));
            let mut patch = GrSstWinOpenPatch::new(&ctx, image.destination()).unwrap();
            patch.apply().unwrap();
            assert_eq!(image.bytes(0xB2A5, 1), [0xE8]);
            assert!(image.bytes(0xB2AA, 0x17 - 5).iter().all(|&b| b == 0x90));
            patch.remove().unwrap();
            assert!(image.is_pristine());
        }
    }

    #[test]
    fn nglide_round_trips() {
        let image = TestImage::new();
        let ctx = image.context(
            GameVersion::LodV1_14D,
            VideoMode::Glide,
            Some(Glide3xLibraryVersion::NGlide3_10_0_658),
        );
        let mut patch = GrSstWinOpenPatch::new(&ctx, image.destination()).unwrap();
        patch.apply().unwrap();
        assert_eq!(image.bytes(0x1CA2E, 1), [0xE8]);
        patch.remove().unwrap();
        assert!(image.is_pristine());
    }
}
