//! The menu configuration document.
//!
//! [`MenuFile`] mirrors the TOML document one-to-one so it can be loaded and
//! saved without loss. [`MenuFile::to_menu`] validates it into the
//! immutable [`MenuNode`] tree the engine works with.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::menu::{CommandKind, CommandSpec, MenuNode};

/// Navigation topology selected by `menu_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuType {
    /// One panel at a time, replaced in place.
    Simple,
    /// Side-by-side lanes that slide to the right.
    Horizontal,
    /// Nested boxes drawn inside each other.
    Cascading,
}

impl MenuType {
    pub fn as_str(self) -> &'static str {
        match self {
            MenuType::Simple => "simple",
            MenuType::Horizontal => "horizontal",
            MenuType::Cascading => "cascading",
        }
    }
}

impl FromStr for MenuType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(MenuType::Simple),
            "horizontal" => Ok(MenuType::Horizontal),
            "cascading" => Ok(MenuType::Cascading),
            other => Err(ConfigError::UnknownMenuType(other.to_string())),
        }
    }
}

impl fmt::Display for MenuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Raw document ────────────────────────────────────────────────────────────

fn default_menu_type() -> String {
    MenuType::Simple.as_str().to_string()
}

/// The whole configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuFile {
    #[serde(default = "default_menu_type")]
    pub menu_type: String,
    /// Interpreter used for `python` commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_structure: Option<MenuStructure>,
    #[serde(default)]
    pub menu_colors: Palette,
}

/// Top-level menu: a heading and its items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuStructure {
    #[serde(default)]
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<Vec<MenuItem>>,
}

/// One `{ name, submenu? , command? }` item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submenu: Option<Vec<MenuItem>>,
}

/// `command = { type, value, working_dir? }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

/// A validated menu: topology plus the root of the tree.
#[derive(Debug, Clone)]
pub struct Menu {
    pub menu_type: MenuType,
    pub root: Arc<MenuNode>,
}

impl MenuFile {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the document and build the menu tree.
    pub fn to_menu(&self) -> Result<Menu, ConfigError> {
        let menu_type = self.menu_type.parse()?;
        let structure = self
            .menu_structure
            .as_ref()
            .ok_or_else(|| ConfigError::MissingField {
                field: "menu_structure",
                context: "configuration root".to_string(),
            })?;
        if structure.heading.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "heading",
                context: "menu_structure".to_string(),
            });
        }
        let items = structure
            .menu
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField {
                field: "menu",
                context: "menu_structure".to_string(),
            })?;
        let children = build_items(items, &structure.heading)?;
        Ok(Menu {
            menu_type,
            root: Arc::new(MenuNode::Submenu {
                label: structure.heading.clone(),
                children,
            }),
        })
    }
}

fn build_items(items: &[MenuItem], parent: &str) -> Result<Vec<Arc<MenuNode>>, ConfigError> {
    items
        .iter()
        .map(|item| build_item(item, parent).map(Arc::new))
        .collect()
}

fn build_item(item: &MenuItem, parent: &str) -> Result<MenuNode, ConfigError> {
    if item.name.trim().is_empty() {
        return Err(ConfigError::MissingField {
            field: "name",
            context: format!("an item of menu \"{parent}\""),
        });
    }
    let label = item.name.clone();

    // Submenu wins when an item carries both.
    if let Some(sub) = &item.submenu {
        let children = build_items(sub, &label)?;
        return Ok(MenuNode::Submenu { label, children });
    }

    match &item.command {
        Some(cmd) => {
            let kind: CommandKind = cmd
                .kind
                .as_deref()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingField {
                    field: "type",
                    context: format!("command of item \"{label}\""),
                })?
                .parse()?;
            if cmd.value.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "value",
                    context: format!("command of item \"{label}\""),
                });
            }
            Ok(MenuNode::Command {
                label,
                command: CommandSpec {
                    kind,
                    payload: cmd.value.clone(),
                    working_dir: cmd.working_dir.clone(),
                },
            })
        }
        None => Ok(MenuNode::Action { label }),
    }
}

/// Read and parse a configuration file.
pub fn load_config(path: &Path) -> Result<MenuFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    MenuFile::from_toml_str(&text)
}

/// Write a configuration file, replacing any existing one.
pub fn save_config(path: &Path, file: &MenuFile) -> Result<(), ConfigError> {
    let text = file.to_toml_string()?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ── Palette ─────────────────────────────────────────────────────────────────

/// Named style roles, one per palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteRole {
    Default,
    Heading,
    Line,
    Options,
    FocusHeading,
    FocusLine,
    FocusOptions,
    Selected,
}

impl PaletteRole {
    pub const ALL: [PaletteRole; 8] = [
        PaletteRole::Default,
        PaletteRole::Heading,
        PaletteRole::Line,
        PaletteRole::Options,
        PaletteRole::FocusHeading,
        PaletteRole::FocusLine,
        PaletteRole::FocusOptions,
        PaletteRole::Selected,
    ];
}

/// `[menu_colors]`: foreground/background color names per role.
///
/// Every key is optional; missing keys use the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_heading_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_heading_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_line_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_line_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_options_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_options_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_bg: Option<String>,
}

const PLAIN_FG: &str = "black";
const PLAIN_BG: &str = "light gray";
const FOCUS_FG: &str = "white";
const FOCUS_BG: &str = "dark blue";

impl Palette {
    /// `(foreground, background)` color names for a role.
    pub fn colors(&self, role: PaletteRole) -> (&str, &str) {
        let (fg, bg, fg_default, bg_default) = match role {
            PaletteRole::Default => (&self.default_fg, &self.default_bg, PLAIN_FG, PLAIN_BG),
            PaletteRole::Heading => (&self.heading_fg, &self.heading_bg, PLAIN_FG, PLAIN_BG),
            PaletteRole::Line => (&self.line_fg, &self.line_bg, PLAIN_FG, PLAIN_BG),
            PaletteRole::Options => (&self.options_fg, &self.options_bg, PLAIN_FG, PLAIN_BG),
            PaletteRole::FocusHeading => (
                &self.focus_heading_fg,
                &self.focus_heading_bg,
                FOCUS_FG,
                FOCUS_BG,
            ),
            PaletteRole::FocusLine => (
                &self.focus_line_fg,
                &self.focus_line_bg,
                FOCUS_FG,
                FOCUS_BG,
            ),
            PaletteRole::FocusOptions => (
                &self.focus_options_fg,
                &self.focus_options_bg,
                FOCUS_FG,
                FOCUS_BG,
            ),
            PaletteRole::Selected => (&self.selected_fg, &self.selected_bg, FOCUS_FG, FOCUS_BG),
        };
        (
            fg.as_deref().unwrap_or(fg_default),
            bg.as_deref().unwrap_or(bg_default),
        )
    }
}
