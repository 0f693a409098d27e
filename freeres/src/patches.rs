mod draw_resolution_text;
mod draw_screen_background;
mod get_global_inventory_grid_layout;
mod get_global_inventory_position;
mod gr_sst_win_open;
mod set_bit_block_width_and_height;
mod set_display_width_and_height;

use freeres_lib::{MultiversionPatch, PatchContext, PatchDefinition, Result};
use tracing::debug;

pub(crate) use draw_resolution_text::on_draw_resolution_text;
#[cfg(all(target_arch = "x86", windows))]
pub(crate) use draw_resolution_text::ORIGINAL_DRAW_OPTION_CEL;
pub(crate) use draw_screen_background::on_draw_screen_background;
pub(crate) use get_global_inventory_grid_layout::on_get_global_inventory_grid_layout;
pub(crate) use get_global_inventory_position::on_get_global_inventory_position;
pub(crate) use gr_sst_win_open::on_gr_sst_win_open;
pub(crate) use set_bit_block_width_and_height::on_set_bit_block_width_and_height;
pub(crate) use set_display_width_and_height::on_set_display_width_and_height;

use draw_resolution_text::DrawResolutionText;
use draw_screen_background::DrawScreenBackground;
use get_global_inventory_grid_layout::GetGlobalInventoryGridLayout;
use get_global_inventory_position::GetGlobalInventoryPosition;
use gr_sst_win_open::GrSstWinOpen;
use set_bit_block_width_and_height::SetBitBlockWidthAndHeight;
use set_display_width_and_height::SetDisplayWidthAndHeight;

/// Every patch of the mod, built for one running game.
pub struct Patches {
    patches: Vec<MultiversionPatch>,
}

impl Patches {
    /// Builds every patch without writing anything, so an unsupported game
    /// leaves memory untouched.
    pub fn new(ctx: &PatchContext) -> Result<Self> {
        let patches = vec![
            SetDisplayWidthAndHeight::build(ctx)?,
            SetBitBlockWidthAndHeight::build(ctx)?,
            GrSstWinOpen::build(ctx)?,
            DrawResolutionText::build(ctx)?,
            DrawScreenBackground::build(ctx)?,
            GetGlobalInventoryPosition::build(ctx)?,
            GetGlobalInventoryGridLayout::build(ctx)?,
        ];
        for patch in &patches {
            debug!("{}: applicable={}", patch.name(), patch.is_applicable());
        }
        Ok(Self { patches })
    }

    pub fn apply(&mut self) -> Result<()> {
        self.patches.iter_mut().try_for_each(|patch| patch.apply())
    }

    pub fn remove(&mut self) -> Result<()> {
        self.patches.iter_mut().rev().try_for_each(|patch| patch.remove())
    }
}


#[cfg(test)]
mod tests {
    use freeres_lib::{Error, GameVersion, Glide3xLibraryVersion, VideoMode};

    use super::{test_image::TestImage, *};
    use crate::interception::{self, Stubs};

    #[test]
    fn unsupported_game_fails_before_writing() {
        let image = TestImage::new();
        let ctx = image.context(GameVersion::V1_12A, VideoMode::Direct3D, None);
        let Err(Error::UnsupportedVersion { value, .. }) = Patches::new(&ctx) else {
            panic!("1.12A has no mapped offsets");
        };
        assert_eq!(value, "1.12A");
        assert!(image.is_pristine());
    }

    #[test]
    fn removing_restores_every_supported_game() {
        // (version, DrawScreens site, options menu call site)
        let games = [
            (GameVersion::V1_09D, 0x5F3C7, 0x1D1A4),
            (GameVersion::V1_13C, 0x2770C, 0x8F2B3),
            (GameVersion::V1_13D, 0x56EB6, 0x1C8E3),
            (GameVersion::LodV1_14C, 0x53B67, 0x4F1E6),
            (GameVersion::LodV1_14D, 0x56F97, 0x52226),
        ];
        let renderers = [
            (VideoMode::Direct3D, None),
            (VideoMode::Glide, Some(Glide3xLibraryVersion::Sven1_4_4_21)),
            (VideoMode::Glide, Some(Glide3xLibraryVersion::NGlide3_10_0_658)),
            (VideoMode::Gdi, None),
        ];
        for (version, draw_screens, draw_option) in games {
            for (video_mode, glide3x_library_version) in renderers {
                let mut image = TestImage::new();
                image.plant_call(draw_screens);
                image.plant_call(draw_option);
                let snapshot = image.snapshot();
                interception::redirect(Stubs::all(image.destination()));

                let ctx = image.context(version, video_mode, glide3x_library_version);
                let mut patches = Patches::new(&ctx).unwrap();
                patches.apply().unwrap();
                assert_ne!(image.snapshot(), snapshot, "{} {:?}", version, video_mode);
                patches.remove().unwrap();
                assert!(
                    image.snapshot() == snapshot,
                    "{} {:?} {:?}",
                    version,
                    video_mode,
                    glide3x_library_version
                );
            }
        }
    }
}
