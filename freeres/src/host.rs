use std::{
    collections::HashMap,
    ffi::{c_char, c_void, CString},
    iter::once,
    ptr::NonNull,
    sync::Mutex,
};

use anyhow::{anyhow, bail, Result};
use freeres_lib::{
    surface::{Cel, CelFile, DrawingSurface},
    DrawEffect, GameVersion, Glide3xLibraryVersion, GridLayout, PositionalRectangle, ScreenOpenMode,
    TextColor, TextFont, VideoMode,
};
use tracing::{debug, warn};

/// Game accessors provided by the loader that injects this DLL.
///
/// Every entry must stay callable for the lifetime of the process.
#[repr(C)]
pub struct HostApi {
    pub game_version: extern "C" fn() -> u32,
    pub video_mode: extern "C" fn() -> u32,
    pub glide3x_library_version: extern "C" fn() -> u32,
    pub resolution_mode: extern "C" fn() -> u32,
    pub set_resolution_mode: extern "C" fn(mode: u32),
    pub screen_open_mode: extern "C" fn() -> u32,
    pub load_mpq: extern "C" fn(path: *const c_char) -> bool,
    /// Returns null if the file cannot be loaded.
    pub load_cel_file: extern "C" fn(path: *const c_char) -> *mut c_void,
    pub cel_file_num_frames: extern "C" fn(cel_file: *mut c_void) -> u32,
    pub cel_size: extern "C" fn(
        cel_file: *mut c_void,
        direction: u32,
        frame: u32,
        width: *mut i32,
        height: *mut i32,
    ),
    pub draw_cel: extern "C" fn(cel_file: *mut c_void, x: i32, y: i32, direction: u32, frame: u32),
    pub draw_rectangle:
        extern "C" fn(left: i32, top: i32, right: i32, bottom: i32, color: u8, effect: u32),
    pub set_text_font: extern "C" fn(font: u32) -> u32,
    /// `text` is NUL-terminated UTF-16.
    pub text_width: extern "C" fn(text: *const u16) -> i32,
    pub draw_text: extern "C" fn(text: *const u16, x: i32, y: i32, color: u32, centered: bool),
    pub set_bit_block_width_and_height: extern "C" fn(width: i32, height: i32),
    /// Reads the inventory record itself. It must not call D2Common's
    /// `GetGlobalInventoryPosition`, which gets patched to call back here.
    pub inventory_position:
        extern "C" fn(record_index: u32, arrange_mode: u32, out: *mut PositionalRectangle),
    /// Same as `inventory_position`, for D2Common's `GetGlobalInventoryGridLayout`.
    pub inventory_grid_layout:
        extern "C" fn(record_index: u32, arrange_mode: u32, out: *mut GridLayout),
}

fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(once(0)).collect()
}

pub struct Host {
    api: &'static HostApi,
    cel_files: Mutex<HashMap<String, usize>>,
}

impl Host {
    pub fn new(api: &'static HostApi) -> Self {
        Self {
            api,
            cel_files: Mutex::new(HashMap::new()),
        }
    }

    pub fn game_version(&self) -> freeres_lib::Result<GameVersion> {
        GameVersion::from_tag((self.api.game_version)())
    }

    pub fn video_mode(&self) -> freeres_lib::Result<VideoMode> {
        VideoMode::from_tag((self.api.video_mode)())
    }

    pub fn glide3x_library_version(&self) -> freeres_lib::Result<Glide3xLibraryVersion> {
        Glide3xLibraryVersion::from_tag((self.api.glide3x_library_version)())
    }

    pub fn resolution_mode(&self) -> u32 {
        (self.api.resolution_mode)()
    }

    pub fn set_resolution_mode(&self, mode: u32) {
        (self.api.set_resolution_mode)(mode)
    }

    pub fn screen_open_mode(&self) -> freeres_lib::Result<ScreenOpenMode> {
        ScreenOpenMode::from_tag((self.api.screen_open_mode)())
    }

    pub fn load_mpq(&self, path: &str) -> Result<()> {
        let c_path = CString::new(path)?;
        if !(self.api.load_mpq)(c_path.as_ptr()) {
            bail!("failed to load MPQ {}", path);
        }
        Ok(())
    }

    pub fn set_bit_block_width_and_height(&self, width: i32, height: i32) {
        (self.api.set_bit_block_width_and_height)(width, height)
    }

    pub fn inventory_position(
        &self,
        record_index: u32,
        arrange_mode: u32,
    ) -> PositionalRectangle {
        let mut position = PositionalRectangle::default();
        (self.api.inventory_position)(record_index, arrange_mode, &mut position);
        position
    }

    pub fn inventory_grid_layout(&self, record_index: u32, arrange_mode: u32) -> GridLayout {
        let mut grid_layout = GridLayout::default();
        (self.api.inventory_grid_layout)(record_index, arrange_mode, &mut grid_layout);
        grid_layout
    }
}

#[derive(Clone, Copy)]
pub struct HostCelFile {
    api: &'static HostApi,
    handle: NonNull<c_void>,
}

impl CelFile for HostCelFile {
    fn num_frames(&self) -> u32 {
        (self.api.cel_file_num_frames)(self.handle.as_ptr())
    }

    fn cel(&self, direction: u32, frame: u32) -> Cel {
        let mut cel = Cel::new(0, 0);
        (self.api.cel_size)(
            self.handle.as_ptr(),
            direction,
            frame,
            &mut cel.width,
            &mut cel.height,
        );
        cel
    }

    fn draw_frame(&self, x: i32, y: i32, direction: u32, frame: u32) {
        (self.api.draw_cel)(self.handle.as_ptr(), x, y, direction, frame)
    }
}

impl DrawingSurface for Host {
    type CelFile = HostCelFile;

    /// Loads each path once and keeps it for the rest of the process.
    fn cel_file(&self, path: &str) -> Result<HostCelFile> {
        let mut cel_files = self
            .cel_files
            .lock()
            .map_err(|_| anyhow!("cel file cache poisoned"))?;
        let handle = match cel_files.get(path) {
            Some(&handle) => handle,
            None => {
                let c_path = CString::new(path)?;
                let handle = (self.api.load_cel_file)(c_path.as_ptr());
                if handle.is_null() {
                    warn!("failed to load cel file {}", path);
                    bail!("failed to load cel file {}", path);
                }
                debug!("loaded cel file {}", path);
                cel_files.insert(path.to_owned(), handle as usize);
                handle as usize
            }
        };
        let handle = NonNull::new(handle as *mut c_void)
            .ok_or_else(|| anyhow!("null cel file {}", path))?;
        Ok(HostCelFile {
            api: self.api,
            handle,
        })
    }

    fn draw_rectangle(
        &self,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        color: u8,
        effect: DrawEffect,
    ) {
        (self.api.draw_rectangle)(left, top, right, bottom, color, effect as u32)
    }

    fn set_text_font(&self, font: TextFont) -> TextFont {
        let old = (self.api.set_text_font)(font as u32);
        TextFont::from_tag(old).unwrap_or_else(|err| {
            warn!("{}", err);
            TextFont::Formal10
        })
    }

    fn text_width(&self, text: &str) -> i32 {
        (self.api.text_width)(to_wide(text).as_ptr())
    }

    fn draw_text(&self, text: &str, x: i32, y: i32, color: TextColor, centered: bool) {
        (self.api.draw_text)(to_wide(text).as_ptr(), x, y, color as u32, centered)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::{
        ffi::CStr,
        sync::{
            atomic::{AtomicU32, Ordering},
            Mutex,
        },
    };

    use super::*;

    pub static LOADS: AtomicU32 = AtomicU32::new(0);
    static mut CEL_FILE: u8 = 0;
    static DRAWN_TEXTS: Mutex<Vec<String>> = Mutex::new(Vec::new());

    pub fn drawn_texts() -> Vec<String> {
        DRAWN_TEXTS.lock().unwrap().clone()
    }

    extern "C" fn tag() -> u32 {
        5
    }
    extern "C" fn set_mode(_: u32) {}
    extern "C" fn load_mpq(_: *const c_char) -> bool {
        false
    }
    extern "C" fn load_cel_file(path: *const c_char) -> *mut c_void {
        let path = unsafe { CStr::from_ptr(path) };
        if path.to_bytes() == b"missing" {
            return std::ptr::null_mut();
        }
        LOADS.fetch_add(1, Ordering::SeqCst);
        unsafe { std::ptr::addr_of_mut!(CEL_FILE) as *mut c_void }
    }
    extern "C" fn num_frames(_: *mut c_void) -> u32 {
        4
    }
    extern "C" fn cel_size(
        _: *mut c_void,
        _: u32,
        frame: u32,
        width: *mut i32,
        height: *mut i32,
    ) {
        unsafe {
            *width = 64 + frame as i32;
            *height = 32;
        }
    }
    extern "C" fn draw_cel(_: *mut c_void, _: i32, _: i32, _: u32, _: u32) {}
    extern "C" fn draw_rectangle(_: i32, _: i32, _: i32, _: i32, _: u8, _: u32) {}
    extern "C" fn set_text_font(_: u32) -> u32 {
        2
    }
    extern "C" fn text_width(text: *const u16) -> i32 {
        let mut len = 0;
        while unsafe { *text.add(len) } != 0 {
            len += 1;
        }
        len as i32 * 10
    }
    extern "C" fn draw_text(text: *const u16, _: i32, _: i32, _: u32, _: bool) {
        let mut len = 0;
        while unsafe { *text.add(len) } != 0 {
            len += 1;
        }
        let text = unsafe { std::slice::from_raw_parts(text, len) };
        DRAWN_TEXTS
            .lock()
            .unwrap()
            .push(String::from_utf16_lossy(text));
    }
    extern "C" fn set_size(_: i32, _: i32) {}
    extern "C" fn inventory_position(_: u32, _: u32, out: *mut PositionalRectangle) {
        unsafe {
            *out = PositionalRectangle {
                left: 400,
                right: 720,
                top: 0,
                bottom: 441,
            }
        }
    }
    extern "C" fn inventory_grid_layout(_: u32, arrange_mode: u32, out: *mut GridLayout) {
        unsafe {
            *out = GridLayout {
                num_columns: 10,
                num_rows: 4,
                position: PositionalRectangle {
                    left: 417 - 80 * (1 - arrange_mode as i32),
                    right: 707 - 80 * (1 - arrange_mode as i32),
                    top: 316,
                    bottom: 431,
                },
                cell_width: 29,
                cell_height: 29,
            }
        }
    }

    /// Reports tag 5 for everything: 1.09D, OpenGL, resolution mode 5.
    pub static API: HostApi = HostApi {
        game_version: tag,
        video_mode: tag,
        glide3x_library_version: tag,
        resolution_mode: tag,
        set_resolution_mode: set_mode,
        screen_open_mode: tag,
        load_mpq,
        load_cel_file,
        cel_file_num_frames: num_frames,
        cel_size,
        draw_cel,
        draw_rectangle,
        set_text_font,
        text_width,
        draw_text,
        set_bit_block_width_and_height: set_size,
        inventory_position,
        inventory_grid_layout,
    };
}
