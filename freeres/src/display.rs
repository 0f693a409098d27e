use freeres_lib::{Error, GameResolution};

use crate::{
    config::Config,
    resolution::{ingame_resolution_from_id, RESOLUTION_640X480, RESOLUTION_800X600},
};

pub const GR_RESOLUTION_640X480: u32 = 0x7;
pub const GR_RESOLUTION_800X600: u32 = 0x8;
/// Tells glide3x the window size is passed separately.
pub const GR_RESOLUTION_NONE: u32 = 0xFF;

/// The size D2Glide opens its display with, and the Glide resolution id it
/// passes to `grSstWinOpen` for it.
pub fn display_width_and_height(
    resolution_mode: u32,
    config: &Config,
) -> freeres_lib::Result<(GameResolution, u32)> {
    let resolution = ingame_resolution_from_id(resolution_mode, config)?;
    let glide_res_id = match resolution_mode {
        0 => GR_RESOLUTION_640X480,
        1 => GR_RESOLUTION_800X600,
        _ => GR_RESOLUTION_NONE,
    };
    Ok((resolution, glide_res_id))
}

/// The window size `grSstWinOpen` should use for `glide_res_id`.
#[track_caller]
pub fn window_width_and_height(
    glide_res_id: u32,
    resolution_mode: u32,
    config: &Config,
) -> freeres_lib::Result<GameResolution> {
    match glide_res_id {
        GR_RESOLUTION_640X480 => Ok(RESOLUTION_640X480),
        GR_RESOLUTION_800X600 => Ok(RESOLUTION_800X600),
        GR_RESOLUTION_NONE => ingame_resolution_from_id(resolution_mode, config),
        id => Err(Error::unsupported("glide resolution id", format!("{:#x}", id))),
    }
}
