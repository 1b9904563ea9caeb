//! The process-runner seam.

use crate::error::LaunchError;
use crate::menu::CommandSpec;

/// Starts external processes for command entries.
///
/// Implementations must return as soon as the process has been started (or
/// has failed to start). The child's later exit status is never reported back.
pub trait CommandRunner {
    fn launch(&self, spec: &CommandSpec) -> Result<(), LaunchError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn launch(&self, spec: &CommandSpec) -> Result<(), LaunchError> {
        (**self).launch(spec)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn launch(&self, spec: &CommandSpec) -> Result<(), LaunchError> {
        (**self).launch(spec)
    }
}
