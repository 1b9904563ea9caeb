//! Navigation engine for tmenu.
//!
//! Turns a [`tmenu_types::MenuNode`] tree into panels, keeps them on a
//! [`stack::PanelStack`] under one of three topologies, and routes each input
//! event to the focused entry through [`focus::FocusRouter`]. The host loop
//! only talks to [`engine::Engine`]: `handle_input` per event and
//! `current_view` per frame.

pub mod dispatch;
pub mod engine;
pub mod focus;
pub mod input;
pub mod layout;
pub mod panel;
pub mod stack;

pub use dispatch::ActionDispatcher;
pub use engine::{Control, Engine, PaneView, View};
pub use focus::{FocusRouter, Navigation};
pub use input::{InputEvent, Key};
pub use layout::{Area, LayoutHint};
pub use panel::{Binding, Entry, Item, Panel};
pub use stack::{BackResult, NavState, PanelStack, Topology};
