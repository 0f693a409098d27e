mod config;
mod display;
mod draw;
mod file;
mod host;
mod interception;
mod inventory;
mod patches;
mod resolution;
mod tracing_helper;

use anyhow::anyhow;
use freeres_lib::fatal::exit_on_error;
use once_cell::sync::OnceCell;

pub use crate::host::HostApi;
use crate::{config::Config, host::Host};

static PROPS: OnceCell<Props> = OnceCell::new();

/// Everything the hooks read. Set once before any patch is applied.
pub(crate) struct Props {
    host: Host,
    config: Config,
}

pub(crate) fn props() -> &'static Props {
    PROPS
        .get()
        .unwrap_or_else(|| exit_on_error(&anyhow!("a hook ran before Initialize")))
}

/// Props backed by the fake host, shared by every test that calls a hook.
#[cfg(test)]
pub(crate) fn fake_props() -> &'static Props {
    PROPS.get_or_init(|| Props {
        host: Host::new(&host::fake::API),
        config: Config::default(),
    })
}

#[cfg(windows)]
mod entry {
    use std::{
        ffi::c_void,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    use anyhow::{anyhow, Result};
    use freeres_lib::{fatal::or_exit, LoadedModules, PatchContext, VideoMode};
    use tracing::{error, info};
    use windows::Win32::{
        Foundation::{HINSTANCE, HMODULE},
        System::SystemServices::{DLL_PROCESS_ATTACH, DLL_PROCESS_DETACH},
    };

    use super::{props, Props, PROPS};
    use crate::{
        config::Config,
        file::{to_dll_path, ModulePaths},
        host::{Host, HostApi},
        patches::Patches,
        tracing_helper,
    };

    static MODULE: AtomicUsize = AtomicUsize::new(0);
    static PATCHES: Mutex<Option<Patches>> = Mutex::new(None);

    fn initialize(host_api: *const HostApi) -> Result<()> {
        if PROPS.get().is_some() {
            return Ok(());
        }
        let api = unsafe { host_api.as_ref() }.ok_or_else(|| anyhow!("host API is null"))?;

        let module = HMODULE(MODULE.load(Ordering::Relaxed) as *mut c_void);
        let paths = ModulePaths::new(&to_dll_path(module)?)?;
        tracing_helper::init_tracing(&paths.dir, &paths.log_file_name, false)?;
        info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

        let config = Config::load_or_create(&paths.config_path)?;
        let host = Host::new(api);
        host.set_resolution_mode(config.ingame_resolution_mode);
        if !config.custom_mpq_path.is_empty() {
            host.load_mpq(&config.custom_mpq_path)?;
        }
        PROPS
            .set(Props { host, config })
            .map_err(|_| anyhow!("initialized twice"))?;

        let host = &props().host;
        let video_mode = host.video_mode()?;
        let glide3x_library_version = match video_mode {
            VideoMode::Glide => Some(host.glide3x_library_version()?),
            _ => None,
        };
        let ctx = PatchContext {
            game_version: host.game_version()?,
            video_mode,
            glide3x_library_version,
            modules: &LoadedModules,
        };
        info!(
            "game {}, video mode {:?}, glide3x {:?}",
            ctx.game_version, ctx.video_mode, ctx.glide3x_library_version
        );

        let mut patches = Patches::new(&ctx)?;
        patches.apply()?;
        *PATCHES.lock().map_err(|_| anyhow!("patch registry is poisoned"))? = Some(patches);
        Ok(())
    }

    fn uninitialize() -> Result<()> {
        let mut patches = PATCHES
            .lock()
            .map_err(|_| anyhow!("patch registry is poisoned"))?;
        if let Some(mut patches) = patches.take() {
            patches.remove()?;
        }
        Ok(())
    }

    #[allow(non_snake_case)]
    #[no_mangle]
    pub extern "C" fn Initialize(host_api: *const HostApi) -> bool {
        or_exit(initialize(host_api));
        true
    }

    #[allow(non_snake_case)]
    #[no_mangle]
    pub extern "C" fn Uninitialize() {
        or_exit(uninitialize());
    }

    #[no_mangle]
    pub extern "system" fn DllMain(inst_dll: HINSTANCE, reason: u32, _reserved: *mut c_void) -> bool {
        match reason {
            DLL_PROCESS_ATTACH => MODULE.store(inst_dll.0 as usize, Ordering::Relaxed),
            DLL_PROCESS_DETACH => {
                // No dialogs under the loader lock.
                if let Err(err) = uninitialize() {
                    error!("{:?}", err);
                }
            }
            _ => {}
        }
        true
    }
}
