//! Process launching for tmenu.
//!
//! [`process::ProcessRunner`] is the production [`tmenu_types::CommandRunner`]:
//! it starts the child detached and returns immediately.

pub mod process;

pub use process::ProcessRunner;
