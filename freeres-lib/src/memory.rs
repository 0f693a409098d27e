use std::{collections::HashMap, ptr::copy_nonoverlapping, slice};

#[cfg(windows)]
use std::{ffi::c_void, mem::size_of};

#[cfg(windows)]
use tracing::warn;
#[cfg(windows)]
use windows::{
    core::HSTRING,
    Win32::System::{
        Diagnostics::Debug::FlushInstructionCache,
        LibraryLoader::GetModuleHandleW,
        Memory::{VirtualProtect, PAGE_EXECUTE_READWRITE, PAGE_PROTECTION_FLAGS},
        ProcessStatus::{GetModuleInformation, MODULEINFO},
        Threading::GetCurrentProcess,
    },
};

use crate::Result;
#[cfg(windows)]
use crate::Error;

/// Looks up where modules of the game process are mapped.
///
/// # Safety
///
/// Every base address returned must be the start of a module image that stays
/// mapped for the rest of the process, because patches read and write at fixed
/// offsets from it without further checks.
pub unsafe trait ModuleIntrospection {
    fn base_address(&self, module_name: &str) -> Option<usize>;
}

/// Asks the Windows loader of the current process.
#[cfg(windows)]
pub struct LoadedModules;

#[cfg(windows)]
fn module_base_addr(module_name: &str) -> windows::core::Result<usize> {
    let module = unsafe { GetModuleHandleW(&HSTRING::from(module_name)) }?;
    let mut module_info: MODULEINFO = Default::default();
    unsafe {
        GetModuleInformation(
            GetCurrentProcess(),
            module,
            &mut module_info,
            size_of::<MODULEINFO>() as u32,
        )
    }?;
    Ok(module_info.lpBaseOfDll as usize)
}

#[cfg(windows)]
unsafe impl ModuleIntrospection for LoadedModules {
    fn base_address(&self, module_name: &str) -> Option<usize> {
        module_base_addr(module_name)
            .map_err(|err| warn!("GetModuleHandleW({}) failed: {}", module_name, err))
            .ok()
    }
}

/// Base addresses handed over explicitly, e.g. by a loader that already
/// enumerated the process.
#[derive(Default)]
pub struct ModuleTable {
    bases: HashMap<String, usize>,
}

impl ModuleTable {
    /// # Safety
    ///
    /// Each base must satisfy the contract of [`ModuleIntrospection`].
    pub unsafe fn new(bases: impl IntoIterator<Item = (String, usize)>) -> Self {
        Self {
            bases: bases
                .into_iter()
                .map(|(name, base)| (name.to_ascii_lowercase(), base))
                .collect(),
        }
    }
}

unsafe impl ModuleIntrospection for ModuleTable {
    fn base_address(&self, module_name: &str) -> Option<usize> {
        self.bases.get(&module_name.to_ascii_lowercase()).copied()
    }
}

pub(crate) unsafe fn read(addr: usize, len: usize) -> Vec<u8> {
    slice::from_raw_parts(addr as *const u8, len).to_vec()
}

#[cfg(windows)]
fn virtual_protect(
    addr: usize,
    size: usize,
    protect: PAGE_PROTECTION_FLAGS,
) -> Result<PAGE_PROTECTION_FLAGS> {
    let mut old: PAGE_PROTECTION_FLAGS = Default::default();
    unsafe { VirtualProtect(addr as *const c_void, size, protect, &mut old) }.map_err(|err| {
        warn!("VirtualProtect failed: {}", err);
        Error::Protect {
            address: addr,
            size,
        }
    })?;
    Ok(old)
}

/// Overwrites code or data of the game, restoring the page protection
/// afterwards.
#[cfg(windows)]
pub(crate) unsafe fn write(addr: usize, buffer: &[u8]) -> Result<()> {
    let old = virtual_protect(addr, buffer.len(), PAGE_EXECUTE_READWRITE)?;
    copy_nonoverlapping(buffer.as_ptr(), addr as *mut u8, buffer.len());
    virtual_protect(addr, buffer.len(), old)?;
    if let Err(err) = FlushInstructionCache(
        GetCurrentProcess(),
        Some(addr as *const c_void),
        buffer.len(),
    ) {
        warn!("FlushInstructionCache failed: {}", err);
    }
    Ok(())
}

#[cfg(not(windows))]
pub(crate) unsafe fn write(addr: usize, buffer: &[u8]) -> Result<()> {
    copy_nonoverlapping(buffer.as_ptr(), addr as *mut u8, buffer.len());
    Ok(())
}
