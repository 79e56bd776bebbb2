//! Desktop and browser providers; `create_platform` resolves to whichever
//! matches the build target.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

#[cfg(target_arch = "wasm32")]
pub use wasm::{
    create_platform, WasmRandomProvider, WasmSleepProvider, WasmStorageProvider, WasmTimeProvider,
};

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::{
    create_platform, DesktopRandomProvider, DesktopSleepProvider, DesktopStorageProvider,
    DesktopTimeProvider,
};
