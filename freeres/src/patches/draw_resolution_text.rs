use std::sync::atomic::{AtomicUsize, Ordering};

use freeres_lib::{
    fatal::or_exit, version_patch, BranchType, Error, GameOffset, GamePatch, GameVersion,
    Library, PatchContext, PatchDefinition, PatchSet, Result, VersionPatch,
};

use crate::{
    draw::draw_resolution_text, interception, props, resolution::ingame_resolution_from_id,
};

/// The options menu function the patched call used to reach.
pub(crate) static ORIGINAL_DRAW_OPTION_CEL: AtomicUsize = AtomicUsize::new(0);
/// Address the options menu passes as the cel file of the resolution option.
static RESOLUTION_CEL_FILE: AtomicUsize = AtomicUsize::new(0);

/// Shows the current resolution as text in the video options menu.
pub struct DrawResolutionText;

impl PatchDefinition for DrawResolutionText {
    const NAME: &'static str = "draw resolution text";

    fn is_applicable(_ctx: &PatchContext) -> bool {
        true
    }

    fn init_patch(ctx: &PatchContext) -> Result<Box<dyn VersionPatch>> {
        let destination = interception::stubs().draw_resolution_text;
        Ok(Box::new(DrawResolutionTextPatch::new(ctx, destination)?))
    }
}

pub struct DrawResolutionTextPatch {
    patches: PatchSet,
}
version_patch!(DrawResolutionTextPatch);

impl DrawResolutionTextPatch {
    pub fn new(ctx: &PatchContext, destination: usize) -> Result<Self> {
        let (call_site, resolution_cel_file) = match ctx.game_version {
            GameVersion::V1_09D => (0x1D1A4, 0xE5F18),
            GameVersion::V1_13C => (0x8F2B3, 0xEA568),
            GameVersion::V1_13D => (0x1C8E3, 0xE48D0),
            GameVersion::LodV1_14C => (0x4F1E6, 0x319280),
            GameVersion::LodV1_14D => (0x52226, 0x31ACA0),
            version => return Err(Error::unsupported_version(version)),
        };
        let call_site = ctx.resolve(GameOffset::new(Library::D2Client, call_site))?;
        let resolution_cel_file =
            ctx.resolve(GameOffset::new(Library::D2Client, resolution_cel_file))?;

        let patch = GamePatch::branch(call_site, BranchType::Call, destination, 5)?;
        let original = patch
            .original_branch_destination()
            .ok_or_else(|| Error::unsupported("call site", call_site))?;
        ORIGINAL_DRAW_OPTION_CEL.store(original, Ordering::Relaxed);
        RESOLUTION_CEL_FILE.store(resolution_cel_file.raw(), Ordering::Relaxed);

        Ok(Self {
            patches: PatchSet::new(vec![patch]),
        })
    }
}

/// Returns non-zero when the option was drawn here.
pub(crate) extern "C" fn on_draw_resolution_text(
    cel_file: usize,
    offset_value: i32,
    right: i32,
    top: i32,
) -> u32 {
    let props = props();
    let resolution = or_exit(
        ingame_resolution_from_id(props.host.resolution_mode(), &props.config).map_err(Into::into),
    );
    draw_resolution_text(
        &props.host,
        cel_file == RESOLUTION_CEL_FILE.load(Ordering::Relaxed),
        offset_value,
        right,
        top,
        resolution,
    ) as u32
}

#[cfg(test)]
mod tests {
    use freeres_lib::VideoMode;

    use super::*;
    use crate::patches::test_image::TestImage;

    #[test]
    fn unmapped_version_is_unsupported() {
        let image = TestImage::new();
        let ctx = image.context(GameVersion::V1_10, VideoMode::Direct3D, None);
        assert!(matches!(
            DrawResolutionText::build(&ctx),
            Err(Error::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn requires_a_call_at_the_site() {
        let image = TestImage::new();
        let ctx = image.context(GameVersion::V1_13C, VideoMode::Direct3D, None);
        let Err(Error::UnsupportedVersion { kind, .. }) =
            DrawResolutionTextPatch::new(&ctx, image.destination())
        else {
            panic!("0xCC is not a call");
        };
        assert_eq!(kind, "call site");
    }

    #[test]
    fn chains_to_the_replaced_call() {
        let mut image = TestImage::new();
        let original = image.plant_call(0x52226);
        let planted = image.bytes(0x52226, 5).to_vec();
        let ctx = image.context(GameVersion::LodV1_14D, VideoMode::Direct3D, None);
        let mut patch = DrawResolutionTextPatch::new(&ctx, image.destination()).unwrap();
        assert_eq!(ORIGINAL_DRAW_OPTION_CEL.load(Ordering::Relaxed), original);

        patch.apply().unwrap();
        assert_ne!(image.bytes(0x52226, 5), planted);
        patch.remove().unwrap();
        assert_eq!(image.bytes(0x52226, 5), planted);
    }

    #[test]
    fn hook_draws_for_the_resolution_option() {
        crate::fake_props();
        let mut image = TestImage::new();
        image.plant_call(0x1D1A4);
        let ctx = image.context(GameVersion::V1_09D, VideoMode::Direct3D, None);
        DrawResolutionTextPatch::new(&ctx, image.destination()).unwrap();
        let cel_file = ctx
            .resolve(GameOffset::new(Library::D2Client, 0xE5F18))
            .unwrap()
            .raw();

        assert_eq!(on_draw_resolution_text(cel_file, 0x154, 500, 300), 1);
        assert!(crate::host::fake::drawn_texts().contains(&"1920x1080".to_owned()));
        assert_eq!(on_draw_resolution_text(cel_file + 4, 0x154, 500, 300), 0);
        assert_eq!(on_draw_resolution_text(cel_file, 0x150, 500, 300), 0);
    }
}
