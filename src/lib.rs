//! imgcollect - gather JPEG and PNG images scattered across a directory tree
//!
//! This library detects images by their content signature, picks collision-free
//! names in a flat destination directory and copies the images there. Files are
//! never overwritten, and per-file failures never stop a run.

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod naming;
pub mod output;
pub mod report;
pub mod signature;

pub use collector::{CollectEvent, CollectOptions, CollectReport, Collector, CopyRecord};
pub use config::{CollectConfig, CompiledFilters, ConfigError};
pub use error::{CollectError, EntryError};
pub use signature::{ImageKind, classify};

pub use cli::{Cli, run};
