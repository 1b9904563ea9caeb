//! Core types shared across the tmenu workspace.
//!
//! The menu tree ([`menu::MenuNode`]) is built once from the configuration
//! document ([`config::MenuFile`]) and never mutated afterwards. The
//! [`runner::CommandRunner`] trait is the seam between the navigation engine
//! and whatever actually starts external processes.

pub mod config;
pub mod error;
pub mod menu;
pub mod runner;

pub use config::{MenuFile, MenuType, Palette};
pub use error::{ConfigError, LaunchError};
pub use menu::{CommandKind, CommandSpec, MenuNode};
pub use runner::CommandRunner;
