// File: src/lib.rs
pub mod client;
pub mod config;
pub mod home;
pub mod model;
pub mod paths;
pub mod search;

#[cfg(feature = "tui")]
pub mod tui;

// --- MOBILE SUPPORT ---
#[cfg(any(target_os = "android", target_os = "ios"))]
pub mod mobile;

#[cfg(any(target_os = "android", target_os = "ios"))]
uniffi::setup_scaffolding!();
