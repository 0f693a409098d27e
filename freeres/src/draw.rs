mod resolution_text;
mod screen_background;
mod screen_border;
mod screen_ribbon;

use anyhow::{bail, Result};
use freeres_lib::{
    surface::{Cel, CelFile, DrawingSurface},
    GameResolution, ScreenOpenMode,
};

use crate::config::Config;

pub use resolution_text::draw_resolution_text;

/// Height of the panel area of the 640x480 interface, without the control bar.
const PANEL_HEIGHT: i32 = 256 + 176;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Vertical extent of a custom border, centred on the panel area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BorderExtent {
    top: i32,
    bottom: i32,
}

impl BorderExtent {
    fn new(side_piece: &impl CelFile, resolution: GameResolution) -> Result<Self> {
        let screen_top = (resolution.height - 480) / 2;
        let mut side_height = 0;
        for frame in 0..side_piece.num_frames() {
            side_height += checked_cel(side_piece, frame)?.height;
        }
        Ok(Self {
            top: screen_top + (PANEL_HEIGHT - side_height) / 2,
            bottom: screen_top + (PANEL_HEIGHT + side_height) / 2,
        })
    }
}

/// Loops over frames stop on the covered size, so an empty cel would never
/// terminate them.
fn checked_cel(cel_file: &impl CelFile, frame: u32) -> Result<Cel> {
    let cel = cel_file.cel(0, frame);
    if cel.width <= 0 || cel.height <= 0 {
        bail!(
            "frame {} is {}x{}, which cannot be tiled",
            frame,
            cel.width,
            cel.height
        );
    }
    Ok(cel)
}

fn draw_side<S: DrawingSurface>(
    surface: &S,
    config: &Config,
    resolution: GameResolution,
    side: Side,
) -> Result<()> {
    screen_background::draw(surface, config, resolution, side)?;
    if !config.is_enable_screen_border_frame {
        return Ok(());
    }
    // The 800x600 frame already spans the ribbon area, so ribbons only go with
    // the custom border.
    if config.is_use_original_screen_border_frame {
        screen_border::draw_original(surface, resolution, side)
    } else {
        screen_border::draw_custom(surface, config, resolution, side)?;
        screen_ribbon::draw(surface, config, resolution, side)
    }
}

/// Fills the area a left or right panel leaves uncovered at resolutions above
/// 640x480.
pub fn draw_screen_background<S: DrawingSurface>(
    surface: &S,
    config: &Config,
    resolution: GameResolution,
    screen_open_mode: ScreenOpenMode,
) -> Result<()> {
    match screen_open_mode {
        ScreenOpenMode::None => Ok(()),
        ScreenOpenMode::Left => draw_side(surface, config, resolution, Side::Left),
        ScreenOpenMode::Right => draw_side(surface, config, resolution, Side::Right),
        ScreenOpenMode::Both => {
            draw_side(surface, config, resolution, Side::Left)?;
            draw_side(surface, config, resolution, Side::Right)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{
        fake::{DrawCall, FakeSurface},
        *,
    };

    fn surface(config: &Config) -> FakeSurface {
        let border = &config.custom_left_screen_border;
        let right_border = &config.custom_right_screen_border;
        FakeSurface::new()
            .with_cel_file(&config.screen_background_image_path, vec![Cel::new(64, 64); 8])
            .with_cel_file(&border.left, vec![Cel::new(20, 144); 3])
            .with_cel_file(&border.top, vec![Cel::new(100, 10); 2])
            .with_cel_file(&border.top_right, vec![Cel::new(40, 10)])
            .with_cel_file(&border.bottom, vec![Cel::new(100, 10); 2])
            .with_cel_file(&border.bottom_right, vec![Cel::new(40, 10)])
            .with_cel_file(&right_border.right, vec![Cel::new(20, 144); 3])
            .with_cel_file(&right_border.top_left, vec![Cel::new(40, 10)])
            .with_cel_file(&right_border.bottom_left, vec![Cel::new(40, 10)])
            .with_cel_file(&config.screen_border_horizontal_ribbon_image_path, vec![Cel::new(50, 8)])
            .with_cel_file(&config.screen_border_vertical_ribbon_image_path, vec![Cel::new(8, 50)])
    }

    fn first_rectangle_lefts(calls: &[DrawCall]) -> Vec<i32> {
        calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Rectangle { left, .. } => Some(*left),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn closed_screens_draw_nothing() {
        let config = Config::default();
        let surface = surface(&config);
        draw_screen_background(
            &surface,
            &config,
            GameResolution::new(1068, 600),
            ScreenOpenMode::None,
        )
        .unwrap();
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn both_screens_draw_left_then_right() {
        let config = Config::default();
        let resolution = GameResolution::new(1068, 600);

        let left = surface(&config);
        draw_screen_background(&left, &config, resolution, ScreenOpenMode::Left).unwrap();
        let right = surface(&config);
        draw_screen_background(&right, &config, resolution, ScreenOpenMode::Right).unwrap();
        let both = surface(&config);
        draw_screen_background(&both, &config, resolution, ScreenOpenMode::Both).unwrap();

        let mut expected = left.calls();
        expected.extend(right.calls());
        assert_eq!(both.calls(), expected);
        assert_eq!(first_rectangle_lefts(&both.calls()), [0, 534]);
    }

    #[test]
    fn disabled_border_draws_only_the_background() {
        let config = Config {
            is_enable_screen_border_frame: false,
            ..Default::default()
        };
        let surface = surface(&config);
        draw_screen_background(
            &surface,
            &config,
            GameResolution::new(800, 600),
            ScreenOpenMode::Right,
        )
        .unwrap();
        let calls = surface.calls();
        assert_eq!(
            calls.len(),
            1 + surface.frames_of(&config.screen_background_image_path).len()
        );
    }

    #[test]
    fn original_border_frame_has_no_ribbons() {
        let config = Config {
            is_use_original_screen_border_frame: true,
            ..Default::default()
        };
        let surface = surface(&config).with_cel_file(
            screen_border::ORIGINAL_SCREEN_BORDER_FRAME_PATH,
            vec![Cel::new(144, 256); 10],
        );
        draw_screen_background(
            &surface,
            &config,
            GameResolution::new(1068, 600),
            ScreenOpenMode::Both,
        )
        .unwrap();
        assert_eq!(
            surface
                .frames_of(screen_border::ORIGINAL_SCREEN_BORDER_FRAME_PATH)
                .len(),
            10
        );
        assert!(surface
            .frames_of(&config.screen_border_horizontal_ribbon_image_path)
            .is_empty());
        assert!(surface
            .frames_of(&config.screen_border_vertical_ribbon_image_path)
            .is_empty());
    }

    #[test]
    fn extent_is_centred_on_the_panel() {
        let surface = FakeSurface::new().with_cel_file("side", vec![Cel::new(20, 144); 3]);
        let side = surface.cel_file("side").unwrap();
        let extent = BorderExtent::new(&side, GameResolution::new(1068, 600)).unwrap();
        assert_eq!(extent, BorderExtent { top: 60, bottom: 492 });
    }

    #[test]
    fn empty_cels_are_rejected() {
        let surface = FakeSurface::new().with_cel_file("side", vec![Cel::new(20, 0)]);
        let side = surface.cel_file("side").unwrap();
        assert!(BorderExtent::new(&side, GameResolution::new(800, 600)).is_err());
    }
}
