use freeres_lib::{surface::DrawingSurface, GameResolution, TextColor, TextFont};

/// Offset the options menu passes when it draws the value of the resolution
/// option.
pub const RESOLUTION_OPTION_OFFSET_VALUE: i32 = 0x154;

/// Replaces the "640x480"/"800x600" picture of the options menu with the
/// current resolution as text.
///
/// Returns `false` when the call is about some other option, in which case the
/// game draws it as usual.
pub fn draw_resolution_text<S: DrawingSurface>(
    surface: &S,
    is_resolution_cel_file: bool,
    offset_value: i32,
    right: i32,
    top: i32,
    resolution: GameResolution,
) -> bool {
    if !is_resolution_cel_file || offset_value != RESOLUTION_OPTION_OFFSET_VALUE {
        return false;
    }

    let text = format!("{}x{}", resolution.width, resolution.height);
    let old_font = surface.set_text_font(TextFont::DiabloMenu30);
    let width = surface.text_width(&text);
    surface.draw_text(&text, right - width, top, TextColor::White, false);
    surface.set_text_font(old_font);
    true
}
