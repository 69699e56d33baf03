//! Core bundling pipeline.
//!
//! The pipeline turns a pre-built application directory into native
//! artifacts by driving external bundler engines: [`orchestrator`] owns
//! the pass, [`engine`] holds the engine contract and registry,
//! [`workarounds`] the toolchain-conditioned corrections, [`jnlp`] and
//! [`signing`] the post-processing of web-start output.

pub mod engine;
pub mod error;
pub mod jnlp;
pub mod orchestrator;
pub mod params;
pub mod platform;
pub mod resources;
pub mod settings;
pub mod signing;
pub mod utils;
pub mod workarounds;

pub use error::{Error, Result};
