//! BlockHaven web client.
//!
//! Quest authoring, server dashboards and sign-in. Native and browser targets
//! are selected at compile time with `cfg(target_arch = "wasm32")`.

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod state;
pub mod ui;

pub use ui::app;
pub use ui::use_platform;
