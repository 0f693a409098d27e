// Game code only exists in 32-bit Windows processes. Elsewhere the hooks stand
// in for the stubs, so patch construction can be exercised on any host.

use super::Stubs;
use crate::patches::{
    on_draw_resolution_text, on_draw_screen_background, on_get_global_inventory_grid_layout,
    on_get_global_inventory_position, on_gr_sst_win_open, on_set_bit_block_width_and_height,
    on_set_display_width_and_height,
};

pub fn stubs() -> Stubs {
    Stubs {
        set_display_width_and_height: on_set_display_width_and_height as usize,
        set_bit_block_width_and_height: on_set_bit_block_width_and_height as usize,
        gr_sst_win_open: on_gr_sst_win_open as usize,
        draw_resolution_text: on_draw_resolution_text as usize,
        draw_screen_background: on_draw_screen_background as usize,
        get_global_inventory_position: on_get_global_inventory_position as usize,
        get_global_inventory_grid_layout: on_get_global_inventory_grid_layout as usize,
    }
}
