use anyhow::Result;
use freeres_lib::{
    surface::{CelFile, DrawingSurface},
    GameResolution,
};

use super::{checked_cel, BorderExtent, Side};
use crate::config::Config;

pub(super) const ORIGINAL_SCREEN_BORDER_FRAME_PATH: &str = "data\\global\\UI\\Panel\\800BorderFrame";

/// Frames 0..5 of the original file frame the left panel, 5..10 the right one.
const NUM_ORIGINAL_FRAMES_PER_SIDE: u32 = 5;

/// Redraws the 800x600 border of the game around the panels, centred on the
/// screen.
pub(super) fn draw_original<S: DrawingSurface>(
    surface: &S,
    resolution: GameResolution,
    side: Side,
) -> Result<()> {
    let frames = surface.cel_file(ORIGINAL_SCREEN_BORDER_FRAME_PATH)?;
    let top = (resolution.height - 600) / 2 - 3;

    let first_frame = match side {
        Side::Left => 0,
        Side::Right => NUM_ORIGINAL_FRAMES_PER_SIDE,
    };
    let mut cels = Vec::with_capacity(NUM_ORIGINAL_FRAMES_PER_SIDE as usize);
    for frame in first_frame..first_frame + NUM_ORIGINAL_FRAMES_PER_SIDE {
        cels.push(checked_cel(&frames, frame)?);
    }

    match side {
        Side::Left => {
            let left = (resolution.width - 800) / 2;
            let draw = |x, y, i: usize| frames.draw_frame(x, y, 0, i as u32);
            draw(left, top + cels[0].height, 0);
            draw(left + cels[0].width, top + cels[1].height, 1);
            draw(left, top + cels[0].height + cels[2].height, 2);
            draw(
                left,
                top + cels[0].height + cels[2].height + cels[3].height,
                3,
            );
            draw(
                left + cels[3].width,
                top + cels[0].height + cels[2].height + cels[4].height,
                4,
            );
        }
        Side::Right => {
            let right = (resolution.width + 800) / 2;
            let draw = |x, y, i: usize| frames.draw_frame(x, y, 0, first_frame + i as u32);
            draw(right - cels[1].width, top + cels[1].height, 1);
            draw(
                right - cels[1].width - cels[0].width,
                top + cels[0].height,
                0,
            );
            draw(right - cels[1].width, top + cels[1].height + cels[2].height, 2);
            draw(
                right - cels[3].width,
                top + cels[1].height + cels[2].height + cels[3].height,
                3,
            );
            draw(
                right - cels[3].width,
                top + cels[1].height + cels[2].height + cels[4].height,
                4,
            );
        }
    }
    Ok(())
}

/// Draws the frames of `piece` side by side, growing away from `start_x`.
/// Returns the total width.
fn draw_row(
    piece: &impl CelFile,
    start_x: i32,
    side: Side,
    y_of: impl Fn(i32) -> i32,
) -> Result<i32> {
    let mut width = 0;
    match side {
        Side::Left => {
            for frame in (0..piece.num_frames()).rev() {
                let cel = checked_cel(piece, frame)?;
                piece.draw_frame(start_x - width - cel.width, y_of(cel.height), 0, frame);
                width += cel.width;
            }
        }
        Side::Right => {
            for frame in 0..piece.num_frames() {
                let cel = checked_cel(piece, frame)?;
                piece.draw_frame(start_x + width, y_of(cel.height), 0, frame);
                width += cel.width;
            }
        }
    }
    Ok(width)
}

/// Draws a border assembled from five user supplied pieces: the corners next to
/// the screen centre, the top and bottom edges, and the outer side.
pub(super) fn draw_custom<S: DrawingSurface>(
    surface: &S,
    config: &Config,
    resolution: GameResolution,
    side: Side,
) -> Result<()> {
    let (outer, top, top_corner, bottom, bottom_corner) = match side {
        Side::Left => {
            let paths = &config.custom_left_screen_border;
            (
                &paths.left,
                &paths.top,
                &paths.top_right,
                &paths.bottom,
                &paths.bottom_right,
            )
        }
        Side::Right => {
            let paths = &config.custom_right_screen_border;
            (
                &paths.right,
                &paths.top,
                &paths.top_left,
                &paths.bottom,
                &paths.bottom_left,
            )
        }
    };
    let outer = surface.cel_file(outer)?;
    let top = surface.cel_file(top)?;
    let top_corner = surface.cel_file(top_corner)?;
    let bottom = surface.cel_file(bottom)?;
    let bottom_corner = surface.cel_file(bottom_corner)?;

    let extent = BorderExtent::new(&outer, resolution)?;
    let centre = resolution.width / 2;
    let offset = |width: i32| match side {
        Side::Left => centre - width,
        Side::Right => centre + width,
    };

    let corner_width = draw_row(&top_corner, centre, side, |height| extent.top + height)?;
    draw_row(&top, offset(corner_width), side, |height| extent.top + height)?;

    let corner_width = draw_row(&bottom_corner, centre, side, |_| extent.bottom)?;
    draw_row(&bottom, offset(corner_width), side, |_| extent.bottom)?;

    let mut height_covered = 0;
    for frame in 0..outer.num_frames() {
        let cel = checked_cel(&outer, frame)?;
        let x = match side {
            Side::Left => (resolution.width - 640) / 2 - cel.width,
            Side::Right => (resolution.width + 640) / 2,
        };
        outer.draw_frame(x, extent.top + height_covered + cel.height, 0, frame);
        height_covered += cel.height;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use freeres_lib::surface::Cel;

    use super::*;
    use crate::draw::fake::FakeSurface;

    #[test]
    fn original_frames_surround_the_800x600_area() {
        let cels = vec![
            Cel::new(256, 256),
            Cel::new(144, 256),
            Cel::new(256, 176),
            Cel::new(256, 48),
            Cel::new(144, 48),
        ];
        let mut frames = cels.clone();
        frames.extend(cels);
        let surface =
            FakeSurface::new().with_cel_file(ORIGINAL_SCREEN_BORDER_FRAME_PATH, frames);
        let resolution = GameResolution::new(1068, 600);

        draw_original(&surface, resolution, Side::Left).unwrap();
        let left = surface.frames_of(ORIGINAL_SCREEN_BORDER_FRAME_PATH);
        assert_eq!(
            left,
            [
                (134, -3 + 256, 0),
                (134 + 256, -3 + 256, 1),
                (134, -3 + 256 + 176, 2),
                (134, -3 + 256 + 176 + 48, 3),
                (134 + 256, -3 + 256 + 176 + 48, 4),
            ]
        );

        draw_original(&surface, resolution, Side::Right).unwrap();
        let frames = surface.frames_of(ORIGINAL_SCREEN_BORDER_FRAME_PATH);
        let right = &frames[5..];
        assert_eq!(right[0], (934 - 144, -3 + 256, 6));
        assert_eq!(right[1], (934 - 144 - 256, -3 + 256, 5));
        assert!(right.iter().all(|&(x, _, _)| x < 934));
    }

    #[test]
    fn custom_left_border_grows_from_the_centre() {
        let config = Config::default();
        let paths = &config.custom_left_screen_border;
        let surface = FakeSurface::new()
            .with_cel_file(&paths.left, vec![Cel::new(20, 144); 3])
            .with_cel_file(&paths.top, vec![Cel::new(100, 10), Cel::new(90, 10)])
            .with_cel_file(&paths.top_right, vec![Cel::new(40, 12)])
            .with_cel_file(&paths.bottom, vec![Cel::new(100, 10), Cel::new(90, 10)])
            .with_cel_file(&paths.bottom_right, vec![Cel::new(40, 12)]);
        let resolution = GameResolution::new(1068, 600);

        draw_custom(&surface, &config, resolution, Side::Left).unwrap();

        // extent: top 60, bottom 492
        assert_eq!(surface.frames_of(&paths.top_right), [(534 - 40, 72, 0)]);
        assert_eq!(
            surface.frames_of(&paths.top),
            [(534 - 40 - 90, 70, 1), (534 - 40 - 90 - 100, 70, 0)]
        );
        assert_eq!(surface.frames_of(&paths.bottom_right), [(494, 492, 0)]);
        assert_eq!(
            surface.frames_of(&paths.left),
            [(194, 204, 0), (194, 348, 1), (194, 492, 2)]
        );
    }

    #[test]
    fn custom_right_border_mirrors_the_left() {
        let config = Config::default();
        let paths = &config.custom_right_screen_border;
        let surface = FakeSurface::new()
            .with_cel_file(&paths.right, vec![Cel::new(20, 144); 3])
            .with_cel_file(&paths.top, vec![Cel::new(100, 10), Cel::new(90, 10)])
            .with_cel_file(&paths.top_left, vec![Cel::new(40, 12)])
            .with_cel_file(&paths.bottom, vec![Cel::new(100, 10), Cel::new(90, 10)])
            .with_cel_file(&paths.bottom_left, vec![Cel::new(40, 12)]);
        let resolution = GameResolution::new(1068, 600);

        draw_custom(&surface, &config, resolution, Side::Right).unwrap();

        assert_eq!(surface.frames_of(&paths.top_left), [(534, 72, 0)]);
        assert_eq!(surface.frames_of(&paths.top), [(574, 70, 0), (674, 70, 1)]);
        assert_eq!(surface.frames_of(&paths.right)[0], (854, 204, 0));
    }
}
