use anyhow::{bail, Result};
use freeres_lib::{
    surface::{Cel, CelFile, DrawingSurface},
    DrawEffect, GameResolution,
};

use super::{checked_cel, Side};
use crate::config::Config;

/// Tiles one half of the screen, starting at the centre line.
///
/// Odd rows take their frames from the second half of the file, so the
/// pattern alternates between rows.
fn tile(
    background: &impl CelFile,
    half_width: i32,
    height: i32,
    side: Side,
) -> Result<()> {
    let half_num_frames = background.num_frames() / 2;
    if half_num_frames == 0 {
        bail!("a screen background needs at least two frames");
    }

    let mut height_covered = 0;
    let mut width_covered = 0;
    let mut column = 0;
    let mut row = 0;
    while height_covered < height {
        let frame = (row % 2) * half_num_frames + column % half_num_frames;
        let cel: Cel = checked_cel(background, frame)?;

        let x = match side {
            Side::Left => half_width - width_covered - cel.width,
            Side::Right => half_width + width_covered,
        };
        background.draw_frame(x, height_covered + cel.height, 0, frame);

        width_covered += cel.width;
        if width_covered < half_width {
            column += 1;
        } else {
            width_covered = 0;
            column = 0;
            height_covered += cel.height;
            row += 1;
        }
    }
    Ok(())
}

pub(super) fn draw<S: DrawingSurface>(
    surface: &S,
    config: &Config,
    resolution: GameResolution,
    side: Side,
) -> Result<()> {
    let half_width = resolution.width / 2;
    let (left, right) = match side {
        Side::Left => (0, half_width),
        Side::Right => (half_width, resolution.width),
    };
    // Black underlay; background files may be partly transparent.
    surface.draw_rectangle(left, 0, right, resolution.height, 0, DrawEffect::None);

    let background = surface.cel_file(&config.screen_background_image_path)?;
    tile(&background, half_width, resolution.height, side)
}
