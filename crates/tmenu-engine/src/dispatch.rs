//! Runs leaf entries and turns the outcome into a result panel.

use tmenu_types::{CommandRunner, MenuNode};

use crate::panel::Panel;

/// Executes a leaf action and produces the panel that reports it.
///
/// Launch failures never escape: they become an "Error: ..." panel.
pub struct ActionDispatcher<R> {
    runner: R,
}

impl<R: CommandRunner> ActionDispatcher<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn run(&self, node: &MenuNode) -> Panel {
        match node {
            MenuNode::Command { label, command } => match self.runner.launch(command) {
                Ok(()) => Panel::message(label.as_str(), format!("Executing: {}", command.payload)),
                Err(e) => Panel::message(label.as_str(), format!("Error: {e}")),
            },
            MenuNode::Action { label } | MenuNode::Submenu { label, .. } => {
                Panel::message(label.as_str(), format!("You chose {label}"))
            }
        }
    }
}
