//! Entry points that patched game code branches to.
//!
//! The game calls them with its own register conventions, so on the real
//! target they are assembly stubs that translate into a C call to the hooks in
//! [`crate::patches`].

#[cfg(test)]
use std::cell::Cell;

#[cfg(not(all(target_arch = "x86", windows)))]
mod generic;
#[cfg(all(target_arch = "x86", windows))]
mod x86;

#[cfg(not(all(target_arch = "x86", windows)))]
use generic as imp;
#[cfg(all(target_arch = "x86", windows))]
use x86 as imp;

/// Branch destinations, one per patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stubs {
    pub set_display_width_and_height: usize,
    pub set_bit_block_width_and_height: usize,
    pub gr_sst_win_open: usize,
    pub draw_resolution_text: usize,
    pub draw_screen_background: usize,
    pub get_global_inventory_position: usize,
    pub get_global_inventory_grid_layout: usize,
}

#[cfg(test)]
thread_local! {
    static REDIRECT: Cell<Option<Stubs>> = const { Cell::new(None) };
}

pub fn stubs() -> Stubs {
    #[cfg(test)]
    if let Some(stubs) = REDIRECT.with(Cell::get) {
        return stubs;
    }
    imp::stubs()
}

#[cfg(test)]
impl Stubs {
    pub fn all(destination: usize) -> Self {
        Self {
            set_display_width_and_height: destination,
            set_bit_block_width_and_height: destination,
            gr_sst_win_open: destination,
            draw_resolution_text: destination,
            draw_screen_background: destination,
            get_global_inventory_position: destination,
            get_global_inventory_grid_layout: destination,
        }
    }
}

/// Makes [`stubs`] return `stubs` on the calling thread, so branches can target
/// a test image.
#[cfg(test)]
pub fn redirect(stubs: Stubs) {
    REDIRECT.with(|redirect| redirect.set(Some(stubs)));
}
