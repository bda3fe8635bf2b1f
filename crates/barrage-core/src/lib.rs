//! Core types and definitions for the BARRAGE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, tick input, snapshots, events, the weapon catalog,
//! configuration and constants. It has no dependency on any windowing or
//! rendering framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
pub mod weapons;

pub use error::ConfigError;
