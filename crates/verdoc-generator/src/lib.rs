//! Static-site generator invocation for verdoc.
//!
//! This crate provides a [`SiteGenerator`] trait for the external commands the
//! pipeline runs after rendering content. This enables:
//!
//! - **Unit testing** the pipeline without spawning processes
//! - **Generator flexibility** through configurable argv templates
//!
//! # Architecture
//!
//! The crate provides:
//! - [`SiteGenerator`] trait with snapshot, build and cleanup operations
//! - [`CommandGenerator`] running argv templates as child processes
//! - [`RecordingGenerator`] for testing (behind `mock` feature flag)

mod command;
mod generator;
#[cfg(feature = "mock")]
mod mock;

pub use command::{CommandGenerator, CommandTemplate, GeneratorCommands};
pub use generator::{GeneratorError, SiteGenerator};
#[cfg(feature = "mock")]
pub use mock::{Invocation, RecordingGenerator};
