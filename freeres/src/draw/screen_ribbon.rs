use anyhow::{bail, Result};
use freeres_lib::{
    surface::{Cel, CelFile, DrawingSurface},
    GameResolution,
};

use super::{checked_cel, BorderExtent, Side};
use crate::config::Config;

/// Places frames of `ribbon` one after another, cycling through the file,
/// until they cover `length`.
fn repeat(
    ribbon: &impl CelFile,
    length: i32,
    extent_of: impl Fn(Cel) -> i32,
    mut draw: impl FnMut(i32, Cel, u32),
) -> Result<()> {
    let num_frames = ribbon.num_frames();
    if num_frames == 0 {
        bail!("a ribbon needs at least one frame");
    }
    let mut covered = 0;
    let mut frame = 0;
    while covered < length {
        let cel = checked_cel(ribbon, frame)?;
        draw(covered, cel, frame);
        covered += extent_of(cel);
        frame = (frame + 1) % num_frames;
    }
    Ok(())
}

/// Extends a custom border to the edges of the screen: horizontal ribbons
/// outwards along its top and bottom edges, vertical ribbons up and down along
/// its inner and outer sides.
pub(super) fn draw<S: DrawingSurface>(
    surface: &S,
    config: &Config,
    resolution: GameResolution,
    side: Side,
) -> Result<()> {
    let horizontal = surface.cel_file(&config.screen_border_horizontal_ribbon_image_path)?;
    let vertical = surface.cel_file(&config.screen_border_vertical_ribbon_image_path)?;
    let outer = surface.cel_file(match side {
        Side::Left => &config.custom_left_screen_border.left,
        Side::Right => &config.custom_right_screen_border.right,
    })?;

    let extent = BorderExtent::new(&outer, resolution)?;
    let outer_width = checked_cel(&outer, 0)?.width;
    let centre = resolution.width / 2;

    match side {
        Side::Left => {
            let border_left = (resolution.width - 640) / 2 - outer_width;
            repeat(&horizontal, border_left, |cel| cel.width, |covered, cel, frame| {
                let x = border_left - covered - cel.width;
                horizontal.draw_frame(x, extent.top + cel.height, 0, frame);
                horizontal.draw_frame(x, extent.bottom, 0, frame);
            })?;
            draw_vertical(&vertical, resolution, extent, |cel| {
                [border_left, centre - cel.width]
            })
        }
        Side::Right => {
            let border_right = (resolution.width + 640) / 2 + outer_width;
            repeat(
                &horizontal,
                resolution.width - border_right,
                |cel| cel.width,
                |covered, cel, frame| {
                    let x = border_right + covered;
                    horizontal.draw_frame(x, extent.top + cel.height, 0, frame);
                    horizontal.draw_frame(x, extent.bottom, 0, frame);
                },
            )?;
            draw_vertical(&vertical, resolution, extent, |cel| {
                [centre, border_right - cel.width]
            })
        }
    }
}

fn draw_vertical(
    vertical: &impl CelFile,
    resolution: GameResolution,
    extent: BorderExtent,
    columns: impl Fn(Cel) -> [i32; 2],
) -> Result<()> {
    repeat(vertical, extent.top, |cel| cel.height, |covered, cel, frame| {
        for x in columns(cel) {
            vertical.draw_frame(x, extent.top - covered, 0, frame);
        }
    })?;
    repeat(
        vertical,
        resolution.height - extent.bottom,
        |cel| cel.height,
        |covered, cel, frame| {
            for x in columns(cel) {
                vertical.draw_frame(x, extent.bottom + covered + cel.height, 0, frame);
            }
        },
    )
}
