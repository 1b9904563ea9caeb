//! The immutable menu tree.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ConfigError;

/// How a command entry's payload is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Run the payload through the platform command shell.
    Shell,
    /// Run `python -m <payload...>`.
    PythonModule,
    /// Execute the payload as an executable followed by its arguments.
    Program,
}

impl CommandKind {
    /// The name used for this kind in the configuration document.
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Shell => "shell",
            CommandKind::PythonModule => "python",
            CommandKind::Program => "program",
        }
    }
}

impl FromStr for CommandKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shell" => Ok(CommandKind::Shell),
            "python" => Ok(CommandKind::PythonModule),
            "program" => Ok(CommandKind::Program),
            other => Err(ConfigError::UnknownCommandKind(other.to_string())),
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a runner needs to start one external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub kind: CommandKind,
    pub payload: String,
    /// Working directory for the child. `None` inherits the current one.
    pub working_dir: Option<PathBuf>,
}

/// One node of the menu tree.
///
/// Children are reference counted so open panels can hold on to the node they
/// were built from without borrowing the whole tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNode {
    Submenu {
        label: String,
        children: Vec<Arc<MenuNode>>,
    },
    /// A plain leaf that only acknowledges the choice.
    Action { label: String },
    Command { label: String, command: CommandSpec },
}

impl MenuNode {
    pub fn label(&self) -> &str {
        match self {
            MenuNode::Submenu { label, .. }
            | MenuNode::Action { label }
            | MenuNode::Command { label, .. } => label,
        }
    }

    /// Children of a submenu; leaves have none.
    pub fn children(&self) -> &[Arc<MenuNode>] {
        match self {
            MenuNode::Submenu { children, .. } => children,
            _ => &[],
        }
    }

    pub fn is_submenu(&self) -> bool {
        matches!(self, MenuNode::Submenu { .. })
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(|c| c.count()).sum::<usize>()
    }

    /// Depth of the deepest submenu chain. A lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}
