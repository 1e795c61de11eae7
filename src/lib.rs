//! modelbook: edit the `custom_models` list of a local JSON config.
//!
//! The library holds the editor core ([`editor`], [`registry`], [`config`])
//! and the front ends ([`tui`], [`cli`]); `main.rs` only wires them up.

pub mod cli;
pub mod config;
pub mod constants;
pub mod editor;
pub mod form;
pub mod logging;
pub mod model;
pub mod registry;
pub mod settings;
pub mod status;
pub mod tui;
