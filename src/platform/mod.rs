//! Platform layer
//!
//! Only the browser host exists; native builds run headless from `main`.

pub mod generation;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use generation::{MountGeneration, MountTicket};
