//! hb-core: item and random artifact generation for a Hengband-style roguelike
//!
//! This crate has no I/O beyond reading and writing an options file. Every
//! random decision goes through an explicit `GameRng`, so a seed always
//! forges the same artifact.

pub mod artifact;
pub mod errors;
pub mod object;
pub mod options;
pub mod player;

mod consts;
mod rng;

pub use consts::*;
pub use errors::{ObjectError, OptionsError};
pub use options::GenerationOptions;
pub use rng::GameRng;
