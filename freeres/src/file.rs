use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
#[cfg(windows)]
use windows::Win32::{
    Foundation::{HMODULE, MAX_PATH},
    System::LibraryLoader::GetModuleFileNameW,
};

#[cfg(windows)]
pub fn to_dll_path(module: HMODULE) -> Result<PathBuf> {
    let mut buf = [0u16; MAX_PATH as usize];
    let len = unsafe { GetModuleFileNameW(module, &mut buf) } as usize;
    if len == 0 {
        return Err(windows::core::Error::from_win32().into());
    }
    Ok(PathBuf::from(String::from_utf16(&buf[..len])?))
}

/// The config and the log sit next to the DLL and share its name.
#[derive(Debug, PartialEq, Eq)]
pub struct ModulePaths {
    pub dir: PathBuf,
    pub config_path: PathBuf,
    pub log_file_name: String,
}

impl ModulePaths {
    pub fn new(dll_path: &Path) -> Result<Self> {
        let dir = dll_path
            .parent()
            .ok_or_else(|| anyhow!("{} has no parent directory", dll_path.display()))?;
        let stem = dll_path
            .file_stem()
            .ok_or_else(|| anyhow!("{} has no file name", dll_path.display()))?
            .to_string_lossy();
        Ok(Self {
            dir: dir.to_owned(),
            config_path: dir.join(format!("{}.json", stem)),
            log_file_name: format!("{}.log", stem),
        })
    }
}
