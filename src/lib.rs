//! `issueboard` - Issue board for small teams
//!
//! This crate provides the `ib` command-line front end over
//! [`issueboard_core`].
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered YAML configuration and board discovery
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - tracing subscriber setup
//! - [`storage`] - The `.issueboard/` workspace on disk

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod storage;

pub use cli::run;
pub use issueboard_core::{BoardError, Result};
