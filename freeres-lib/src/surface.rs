//! Rendering primitives of the game, as seen by the drawing features.

use crate::{DrawEffect, TextColor, TextFont};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cel {
    pub width: i32,
    pub height: i32,
}

impl Cel {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// A loaded DC6 file.
///
/// Frames are drawn anchored at their bottom-left corner, so a frame whose top
/// edge should be at `top` is drawn at `y = top + height`.
pub trait CelFile {
    /// Frames per direction.
    fn num_frames(&self) -> u32;
    fn cel(&self, direction: u32, frame: u32) -> Cel;
    fn draw_frame(&self, x: i32, y: i32, direction: u32, frame: u32);
}

pub trait DrawingSurface {
    type CelFile: CelFile;

    fn cel_file(&self, path: &str) -> anyhow::Result<Self::CelFile>;
    fn draw_rectangle(
        &self,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        color: u8,
        effect: DrawEffect,
    );
    /// Returns the previous font.
    fn set_text_font(&self, font: TextFont) -> TextFont;
    fn text_width(&self, text: &str) -> i32;
    fn draw_text(&self, text: &str, x: i32, y: i32, color: TextColor, centered: bool);
}
