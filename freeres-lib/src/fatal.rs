use std::process;

use tracing::error;
#[cfg(windows)]
use windows::{
    core::HSTRING,
    Win32::{
        Foundation::HWND,
        UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK},
    },
};

#[cfg(windows)]
pub fn show_error_dialog(msg: &str) {
    unsafe {
        MessageBoxW(
            HWND::default(),
            &HSTRING::from(msg),
            &HSTRING::from(env!("CARGO_PKG_NAME")),
            MB_ICONERROR | MB_OK,
        )
    };
}

#[cfg(not(windows))]
pub fn show_error_dialog(_msg: &str) {}

/// Logs and shows `err`, then terminates the game.
pub fn exit_on_error(err: &anyhow::Error) -> ! {
    error!("{:?}", err);
    show_error_dialog(&format!("{:#}", err));
    process::exit(1);
}

/// Unwraps `result` or takes the [`exit_on_error`] path.
pub fn or_exit<T>(result: anyhow::Result<T>) -> T {
    result.unwrap_or_else(|err| exit_on_error(&err))
}
