//! Hot corners for Windows.
//!
//! Watches the mouse pointer and plays a keyboard shortcut whenever it
//! enters one of the configured screen zones.
//!
//! # Modules
//! - `config`: zone configuration, key names and the properties file
//! - `platform`: pointer, keyboard and screen capabilities
//! - `monitor`: polling loop, zone matching and key injection
//! - `app`: wires configuration and platform into a running session
//! - `cli`: command line flags
//! - `diagnostics`: logging setup
//! - `winapi_utils`: Win32 backed platform (Windows only)

pub mod app;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod monitor;
pub mod platform;
#[cfg(windows)]
pub mod winapi_utils;
