use freeres_lib::{GameResolution, GridLayout, InventoryArrangeMode, PositionalRectangle};

use crate::resolution::{RESOLUTION_640X480, RESOLUTION_800X600};

/// The stock layout to start from, and how far to move it.
fn arrangement(resolution: GameResolution) -> (InventoryArrangeMode, i32, i32) {
    if resolution == RESOLUTION_640X480 {
        return (InventoryArrangeMode::Res640x480, 0, 0);
    }
    (
        InventoryArrangeMode::Res800x600,
        (resolution.width - RESOLUTION_800X600.width) / 2,
        (resolution.height - RESOLUTION_800X600.height) / 2,
    )
}

/// Positions an inventory panel for `resolution`.
///
/// Above 640x480 the 800x600 layout is used and moved along with the screen
/// centre, so the panels stay attached to the middle of the screen.
pub fn global_inventory_position(
    resolution: GameResolution,
    layout: impl FnOnce(InventoryArrangeMode) -> PositionalRectangle,
) -> PositionalRectangle {
    let (mode, dx, dy) = arrangement(resolution);
    layout(mode).offset(dx, dy)
}

/// Places an item grid so it stays inside the panel moved by
/// [`global_inventory_position`].
pub fn global_inventory_grid_layout(
    resolution: GameResolution,
    layout: impl FnOnce(InventoryArrangeMode) -> GridLayout,
) -> GridLayout {
    let (mode, dx, dy) = arrangement(resolution);
    layout(mode).offset(dx, dy)
}
