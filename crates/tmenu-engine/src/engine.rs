//! The engine: one panel stack, driven one event at a time by the host loop.

use std::fmt;
use std::sync::Arc;

use tmenu_types::config::Menu;
use tmenu_types::{CommandRunner, MenuNode};

use crate::dispatch::ActionDispatcher;
use crate::focus::{FocusRouter, Navigation};
use crate::input::InputEvent;
use crate::layout::{self, Area, LayoutHint};
use crate::panel::Panel;
use crate::stack::{NavState, PanelStack, Topology};

/// Viewport assumed until the host reports the real terminal size.
pub const DEFAULT_VIEWPORT: Area = Area::new(0, 0, 80, 24);

/// What the host loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Called after every event that changed the navigation state.
pub type TransitionHook = Box<dyn FnMut(&InputEvent, NavState, NavState)>;

/// One pane to draw.
#[derive(Debug, Clone, Copy)]
pub struct PaneView<'a> {
    pub panel: &'a Panel,
    pub area: Area,
    pub content: Area,
    pub bordered: bool,
    pub active: bool,
    pub hint: LayoutHint,
}

/// Everything the host needs to draw one frame, bottom-most pane first.
#[derive(Debug, Clone)]
pub struct View<'a> {
    pub topology: Topology,
    pub frame: Area,
    pub panes: Vec<PaneView<'a>>,
}

impl View<'_> {
    /// The pane holding the panel that receives input.
    pub fn active(&self) -> Option<&PaneView<'_>> {
        self.panes.iter().find(|p| p.active)
    }
}

pub struct Engine<R> {
    stack: PanelStack,
    dispatcher: ActionDispatcher<R>,
    viewport: Area,
    on_transition: Option<TransitionHook>,
}

impl<R: CommandRunner> Engine<R> {
    /// Build the engine and show the root panel.
    pub fn new(topology: Topology, root: Arc<MenuNode>, runner: R) -> Self {
        let stack = PanelStack::new(topology, Panel::submenu(&root, topology));
        Self {
            stack,
            dispatcher: ActionDispatcher::new(runner),
            viewport: DEFAULT_VIEWPORT,
            on_transition: None,
        }
    }

    pub fn from_menu(menu: &Menu, runner: R) -> Self {
        Self::new(menu.menu_type.into(), menu.root.clone(), runner)
    }

    /// Install the transition trace hook, replacing any previous one.
    pub fn on_transition(
        &mut self,
        hook: impl FnMut(&InputEvent, NavState, NavState) + 'static,
    ) {
        self.on_transition = Some(Box::new(hook));
    }

    /// Record the terminal size used for layout and mouse hit-testing.
    pub fn set_viewport(&mut self, viewport: Area) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Area {
        self.viewport
    }

    pub fn topology(&self) -> Topology {
        self.stack.topology()
    }

    pub fn current_panel(&self) -> &Panel {
        self.stack.current_panel()
    }

    pub fn nav_state(&self) -> NavState {
        self.stack.nav_state()
    }

    /// Process one event to completion.
    pub fn handle_input(&mut self, event: InputEvent) -> Control {
        let old = self.stack.nav_state();
        let router = FocusRouter::new(self.viewport);
        let nav = router.route(event, &mut self.stack, &self.dispatcher);

        let (control, new) = match nav {
            Navigation::AtRoot | Navigation::ExitRequested => (Control::Exit, NavState::Exit),
            _ => (Control::Continue, self.stack.nav_state()),
        };

        if old != new || nav == Navigation::Opened {
            if let Some(hook) = self.on_transition.as_mut() {
                hook(&event, old, new);
            }
        }
        control
    }

    pub fn current_view(&self) -> View<'_> {
        let panels = self.panels();
        let panes = layout::panes(&self.stack, self.viewport)
            .into_iter()
            .filter_map(|g| {
                panels.get(g.index).map(|panel| PaneView {
                    panel,
                    area: g.area,
                    content: g.content,
                    bordered: g.bordered,
                    active: g.active,
                    hint: g.hint,
                })
            })
            .collect();
        View {
            topology: self.stack.topology(),
            frame: layout::frame(self.viewport),
            panes,
        }
    }

    /// Panels in stack order, matching `PaneGeometry::index`.
    fn panels(&self) -> Vec<&Panel> {
        match &self.stack {
            PanelStack::Replace(_) => vec![self.stack.current_panel()],
            PanelStack::Lanes(s) => s.lanes().iter().map(|l| &l.panel).collect(),
            PanelStack::Nested(s) => s.boxes().iter().map(|b| &b.panel).collect(),
        }
    }
}

impl<R> fmt::Debug for Engine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("stack", &self.stack)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}
