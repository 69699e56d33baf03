//! fxpack - native bundling orchestrator for pre-built JVM applications.
//!
//! Assembles engine parameters from a bundle descriptor, selects and runs
//! external bundler engines, applies toolchain-conditioned workarounds and
//! post-processes generated JNLP output (path fixes, jar signing, size
//! recalculation).

pub mod bundler;
pub mod cli;
pub mod error;
