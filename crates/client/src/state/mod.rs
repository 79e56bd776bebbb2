//! Shared client state injected into the UI tree.

pub mod platform;

pub use platform::Platform;
