use std::arch::global_asm;

use super::Stubs;
use crate::patches::{
    on_draw_resolution_text, on_draw_screen_background, on_get_global_inventory_grid_layout,
    on_get_global_inventory_position, on_gr_sst_win_open, on_set_bit_block_width_and_height,
    on_set_display_width_and_height, ORIGINAL_DRAW_OPTION_CEL,
};

extern "C" {
    fn freeres_d2glide_set_display_width_and_height();
    fn freeres_d2gdi_set_bit_block_width_and_height();
    fn freeres_glide3x_gr_sst_win_open();
    fn freeres_d2client_draw_resolution_text();
    fn freeres_d2client_draw_screen_background();
    fn freeres_d2common_get_global_inventory_position();
    fn freeres_d2common_get_global_inventory_grid_layout();
}

// in: esi = resolution mode
// out: eax = width, ecx = height, ebx = glide resolution id
global_asm!(
    ".globl _freeres_d2glide_set_display_width_and_height",
    "_freeres_d2glide_set_display_width_and_height:",
    "push ebp",
    "mov ebp, esp",
    "push edx",
    "sub esp, 12",
    "lea ebx, [esp]",
    "lea eax, [esp + 4]",
    "lea ecx, [esp + 8]",
    "push ecx",
    "push eax",
    "push ebx",
    "push esi",
    "call {hook}",
    "add esp, 16",
    "mov eax, [ebx]",
    "mov ecx, [ebx + 4]",
    "mov ebx, [ebx + 8]",
    "add esp, 12",
    "pop edx",
    "leave",
    "ret",
    hook = sym on_set_display_width_and_height,
);

global_asm!(
    ".globl _freeres_d2gdi_set_bit_block_width_and_height",
    "_freeres_d2gdi_set_bit_block_width_and_height:",
    "pushad",
    "call {hook}",
    "popad",
    "ret",
    hook = sym on_set_bit_block_width_and_height,
);

// in: eax = glide resolution id
// out: ecx = width, edx = height
global_asm!(
    ".globl _freeres_glide3x_gr_sst_win_open",
    "_freeres_glide3x_gr_sst_win_open:",
    "push ebp",
    "mov ebp, esp",
    "push eax",
    "sub esp, 8",
    "lea ecx, [esp]",
    "lea edx, [esp + 4]",
    "push edx",
    "push ecx",
    "push eax",
    "call {hook}",
    "add esp, 12",
    "mov ecx, [esp]",
    "mov edx, [esp + 4]",
    "mov eax, [ebp - 4]",
    "leave",
    "ret",
    hook = sym on_gr_sst_win_open,
);

// Replaces a stdcall (cel_file, offset_value, right, top). Falls through to the
// replaced function unless the hook drew the option itself.
global_asm!(
    ".globl _freeres_d2client_draw_resolution_text",
    "_freeres_d2client_draw_resolution_text:",
    "push ebp",
    "mov ebp, esp",
    "pushad",
    "push dword ptr [ebp + 20]",
    "push dword ptr [ebp + 16]",
    "push dword ptr [ebp + 12]",
    "push dword ptr [ebp + 8]",
    "call {hook}",
    "add esp, 16",
    "test eax, eax",
    "popad",
    "leave",
    "jnz 2f",
    "jmp dword ptr [{original}]",
    "2:",
    "ret 16",
    hook = sym on_draw_resolution_text,
    original = sym ORIGINAL_DRAW_OPTION_CEL,
);

global_asm!(
    ".globl _freeres_d2client_draw_screen_background",
    "_freeres_d2client_draw_screen_background:",
    "pushad",
    "call {hook}",
    "popad",
    "ret",
    hook = sym on_draw_screen_background,
);

// Replaces the whole stdcall (record_index, arrange_mode, out_position).
global_asm!(
    ".globl _freeres_d2common_get_global_inventory_position",
    "_freeres_d2common_get_global_inventory_position:",
    "push ebp",
    "mov ebp, esp",
    "push dword ptr [ebp + 16]",
    "push dword ptr [ebp + 12]",
    "push dword ptr [ebp + 8]",
    "call {hook}",
    "add esp, 12",
    "leave",
    "ret 12",
    hook = sym on_get_global_inventory_position,
);

// Replaces the whole stdcall (record_index, arrange_mode, out_grid_layout).
global_asm!(
    ".globl _freeres_d2common_get_global_inventory_grid_layout",
    "_freeres_d2common_get_global_inventory_grid_layout:",
    "push ebp",
    "mov ebp, esp",
    "push dword ptr [ebp + 16]",
    "push dword ptr [ebp + 12]",
    "push dword ptr [ebp + 8]",
    "call {hook}",
    "add esp, 12",
    "leave",
    "ret 12",
    hook = sym on_get_global_inventory_grid_layout,
);

pub fn stubs() -> Stubs {
    Stubs {
        set_display_width_and_height: freeres_d2glide_set_display_width_and_height as usize,
        set_bit_block_width_and_height: freeres_d2gdi_set_bit_block_width_and_height as usize,
        gr_sst_win_open: freeres_glide3x_gr_sst_win_open as usize,
        draw_resolution_text: freeres_d2client_draw_resolution_text as usize,
        draw_screen_background: freeres_d2client_draw_screen_background as usize,
        get_global_inventory_position: freeres_d2common_get_global_inventory_position as usize,
        get_global_inventory_grid_layout: freeres_d2common_get_global_inventory_grid_layout
            as usize,
    }
}
