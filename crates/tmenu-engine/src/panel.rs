//! Panels: one screen's worth of menu entries.

use std::sync::Arc;

use tmenu_types::MenuNode;

use crate::stack::Topology;

/// Caption of the entry that closes a result panel.
pub const ACKNOWLEDGE_CAPTION: &str = "Ok";
/// Caption of the entry that ends the program from a replace-style panel.
pub const EXIT_CAPTION: &str = "Exit";
/// Marker appended to captions of entries that open a submenu.
pub const SUBMENU_MARKER: &str = " \u{2026}";

/// What activating a selectable entry does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    OpenSubmenu(Arc<MenuNode>),
    RunAction(Arc<MenuNode>),
    RunCommand(Arc<MenuNode>),
    /// Close the result panel, returning to where the choice was made.
    Acknowledge,
    /// End the program.
    Exit,
}

/// An entry that can take focus and be activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub caption: String,
    pub binding: Binding,
}

impl Item {
    /// The item that opens or runs `node`.
    pub fn for_node(node: &Arc<MenuNode>) -> Self {
        match node.as_ref() {
            MenuNode::Submenu { label, .. } => Item {
                caption: format!("{label}{SUBMENU_MARKER}"),
                binding: Binding::OpenSubmenu(node.clone()),
            },
            MenuNode::Action { label } => Item {
                caption: label.clone(),
                binding: Binding::RunAction(node.clone()),
            },
            MenuNode::Command { label, .. } => Item {
                caption: label.clone(),
                binding: Binding::RunCommand(node.clone()),
            },
        }
    }

    pub fn acknowledge() -> Self {
        Item {
            caption: ACKNOWLEDGE_CAPTION.to_string(),
            binding: Binding::Acknowledge,
        }
    }

    pub fn exit() -> Self {
        Item {
            caption: EXIT_CAPTION.to_string(),
            binding: Binding::Exit,
        }
    }
}

/// One line of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Heading(String),
    Divider,
    Blank,
    Text(String),
    Item(Item),
}

impl Entry {
    pub fn is_selectable(&self) -> bool {
        matches!(self, Entry::Item(_))
    }

    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Entry::Item(item) => Some(item),
            _ => None,
        }
    }
}

/// A renderable list of entries plus the index of the focused one.
///
/// Panels are built on demand and owned by the stack entry that shows them.
/// Reopening a submenu builds a fresh panel from the same node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    title: String,
    entries: Vec<Entry>,
    focus: Option<usize>,
}

impl Panel {
    /// Build a panel from arbitrary entries. Focus starts on the first
    /// selectable entry, or nowhere if there is none.
    pub fn new(title: impl Into<String>, entries: Vec<Entry>) -> Self {
        let focus = entries.iter().position(Entry::is_selectable);
        Self {
            title: title.into(),
            entries,
            focus,
        }
    }

    /// The panel listing a submenu's children under a heading.
    ///
    /// Replace-style panels get a trailing Exit entry since there is no other
    /// screen visible to fall back to.
    pub fn submenu(node: &Arc<MenuNode>, topology: Topology) -> Self {
        let mut entries = vec![Entry::Heading(node.label().to_string()), Entry::Divider];
        entries.extend(
            node.children()
                .iter()
                .map(|child| Entry::Item(Item::for_node(child))),
        );
        if topology == Topology::Replace {
            entries.push(Entry::Item(Item::exit()));
        }
        Self::new(node.label(), entries)
    }

    /// A result panel: a message and a single acknowledge entry.
    pub fn message(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            title,
            vec![
                Entry::Text(text.into()),
                Entry::Blank,
                Entry::Item(Item::acknowledge()),
            ],
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Move focus to `index` if that entry is selectable.
    pub fn set_focus(&mut self, index: usize) -> bool {
        match self.entries.get(index) {
            Some(entry) if entry.is_selectable() => {
                self.focus = Some(index);
                true
            }
            _ => false,
        }
    }

    pub fn focused_item(&self) -> Option<&Item> {
        self.focus
            .and_then(|i| self.entries.get(i))
            .and_then(Entry::as_item)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.entries.iter().filter_map(Entry::as_item)
    }

    /// Captions of all selectable entries, in order.
    pub fn captions(&self) -> Vec<&str> {
        self.items().map(|i| i.caption.as_str()).collect()
    }

    pub fn has_selectable(&self) -> bool {
        self.entries.iter().any(Entry::is_selectable)
    }

    /// The first text line, i.e. the message of a result panel.
    pub fn message_text(&self) -> Option<&str> {
        self.entries.iter().find_map(|e| match e {
            Entry::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }
}
