use freeres_lib::{Error, GameResolution};

use crate::config::{Config, NUM_STOCK_RESOLUTIONS};

pub const RESOLUTION_640X480: GameResolution = GameResolution::new(640, 480);
pub const RESOLUTION_800X600: GameResolution = GameResolution::new(800, 600);

/// Maps the game's resolution mode to a size. Modes past the two the game
/// ships with index the configured list.
pub fn ingame_resolution_from_id(
    id: u32,
    config: &Config,
) -> freeres_lib::Result<GameResolution> {
    match id {
        0 => Ok(RESOLUTION_640X480),
        1 => Ok(RESOLUTION_800X600),
        id => config
            .ingame_resolutions
            .get(id as usize - NUM_STOCK_RESOLUTIONS)
            .copied()
            .map(GameResolution::from)
            .ok_or_else(|| Error::unsupported("resolution mode", id)),
    }
}
