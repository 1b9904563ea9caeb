//! Focus routing: one input event in, one navigation effect out.

use tmenu_types::CommandRunner;

use crate::dispatch::ActionDispatcher;
use crate::input::{InputEvent, Key};
use crate::layout::{self, Area};
use crate::panel::{Binding, Panel};
use crate::stack::{BackResult, PanelStack, Topology};

/// What routing an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Focus moved within a panel or to another lane.
    Focused,
    /// A panel was opened.
    Opened,
    /// A panel was closed, revealing the previous one.
    WentBack,
    /// Back was requested with nothing to go back to.
    AtRoot,
    /// An Exit entry was activated.
    ExitRequested,
    /// Nothing handled the event; the host may ignore it.
    Unhandled(InputEvent),
}

// ── Focus search ────────────────────────────────────────────────────────────

/// Move focus to the next selectable entry, wrapping past the end.
///
/// A panel without selectable entries keeps its focus unchanged.
pub fn focus_next(panel: &mut Panel) -> bool {
    let len = panel.entries().len();
    let start = panel.focus().map_or(0, |f| f + 1);
    let found = (0..len)
        .map(|step| (start + step) % len)
        .find(|&i| panel.entries()[i].is_selectable());
    found.is_some_and(|i| panel.set_focus(i))
}

/// Move focus to the previous selectable entry, wrapping past the start.
pub fn focus_prev(panel: &mut Panel) -> bool {
    let len = panel.entries().len();
    if len == 0 {
        return false;
    }
    let start = panel.focus().unwrap_or(0) + len - 1;
    let found = (0..len)
        .map(|step| (start + len - step) % len)
        .find(|&i| panel.entries()[i].is_selectable());
    found.is_some_and(|i| panel.set_focus(i))
}

pub fn focus_first(panel: &mut Panel) -> bool {
    let found = panel.entries().iter().position(|e| e.is_selectable());
    found.is_some_and(|i| panel.set_focus(i))
}

pub fn focus_last(panel: &mut Panel) -> bool {
    let found = panel.entries().iter().rposition(|e| e.is_selectable());
    found.is_some_and(|i| panel.set_focus(i))
}

// ── Router ──────────────────────────────────────────────────────────────────

/// Routes input to the focused entry of the current panel.
#[derive(Debug, Clone, Copy)]
pub struct FocusRouter {
    viewport: Area,
}

impl FocusRouter {
    /// `viewport` is the terminal area used to hit-test mouse clicks.
    pub fn new(viewport: Area) -> Self {
        Self { viewport }
    }

    pub fn route<R: CommandRunner>(
        &self,
        event: InputEvent,
        stack: &mut PanelStack,
        dispatcher: &ActionDispatcher<R>,
    ) -> Navigation {
        match event {
            InputEvent::Key(key) => self.route_key(key, event, stack, dispatcher),
            InputEvent::Click { column, row } => {
                self.route_click(column, row, event, stack, dispatcher)
            }
        }
    }

    fn route_key<R: CommandRunner>(
        &self,
        key: Key,
        event: InputEvent,
        stack: &mut PanelStack,
        dispatcher: &ActionDispatcher<R>,
    ) -> Navigation {
        let left_is_back = stack.topology() != Topology::Replace;
        match key {
            Key::Up => moved(focus_prev(stack.current_panel_mut()), event),
            Key::Down => moved(focus_next(stack.current_panel_mut()), event),
            Key::Home => moved(focus_first(stack.current_panel_mut()), event),
            Key::End => moved(focus_last(stack.current_panel_mut()), event),
            Key::Enter | Key::Right => activate(stack, dispatcher, event),
            Key::Esc => back(stack),
            Key::Left if left_is_back => back(stack),
            _ => Navigation::Unhandled(event),
        }
    }

    fn route_click<R: CommandRunner>(
        &self,
        column: u16,
        row: u16,
        event: InputEvent,
        stack: &mut PanelStack,
        dispatcher: &ActionDispatcher<R>,
    ) -> Navigation {
        // Only the active pane takes clicks, except in Lanes where any
        // visible lane can be clicked to focus it.
        let lanes = stack.topology() == Topology::Lanes;
        let hit = layout::panes(stack, self.viewport)
            .into_iter()
            .filter(|pane| pane.active || lanes)
            .find_map(|pane| pane.entry_at(column, row).map(|entry| (pane, entry)));

        let Some((pane, entry)) = hit else {
            return Navigation::Unhandled(event);
        };

        let switched_lane = !pane.active && stack.focus_lane(pane.index);
        if stack.current_panel_mut().set_focus(entry) {
            activate(stack, dispatcher, event)
        } else if switched_lane {
            Navigation::Focused
        } else {
            Navigation::Unhandled(event)
        }
    }
}

fn moved(changed: bool, event: InputEvent) -> Navigation {
    if changed {
        Navigation::Focused
    } else {
        Navigation::Unhandled(event)
    }
}

fn back(stack: &mut PanelStack) -> Navigation {
    match stack.back() {
        BackResult::Went(_) => Navigation::WentBack,
        BackResult::AtRoot => Navigation::AtRoot,
    }
}

fn activate<R: CommandRunner>(
    stack: &mut PanelStack,
    dispatcher: &ActionDispatcher<R>,
    event: InputEvent,
) -> Navigation {
    let Some(binding) = stack
        .current_panel()
        .focused_item()
        .map(|item| item.binding.clone())
    else {
        return Navigation::Unhandled(event);
    };

    match binding {
        Binding::OpenSubmenu(node) => {
            let panel = Panel::submenu(&node, stack.topology());
            stack.open(panel);
            Navigation::Opened
        }
        Binding::RunAction(node) | Binding::RunCommand(node) => {
            let panel = dispatcher.run(&node);
            stack.open(panel);
            Navigation::Opened
        }
        // Closing a result panel returns to the state before the choice.
        Binding::Acknowledge => back(stack),
        Binding::Exit => Navigation::ExitRequested,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dispatch::testing::RecordingRunner;
    use crate::panel::{Entry, Item};
    use crate::stack::NavState;
    use tmenu_types::MenuNode;

    const VIEWPORT: Area = Area::new(0, 0, 100, 50);

    fn item(name: &str) -> Entry {
        Entry::Item(Item::for_node(&Arc::new(MenuNode::Action {
            label: name.to_string(),
        })))
    }

    /// Selectable entries at 1, 3 and 4 out of 5.
    fn sparse_panel() -> Panel {
        Panel::new(
            "sparse",
            vec![
                Entry::Heading("h".to_string()),
                item("one"),
                Entry::Divider,
                item("three"),
                item("four"),
            ],
        )
    }

    fn tree() -> Arc<MenuNode> {
        Arc::new(MenuNode::Submenu {
            label: "Main".to_string(),
            children: vec![
                Arc::new(MenuNode::Submenu {
                    label: "Sub".to_string(),
                    children: vec![Arc::new(MenuNode::Action {
                        label: "X".to_string(),
                    })],
                }),
                Arc::new(MenuNode::Action {
                    label: "B".to_string(),
                }),
            ],
        })
    }

    fn key(k: Key) -> InputEvent {
        InputEvent::Key(k)
    }

    #[test]
    fn initial_focus_is_first_selectable() {
        assert_eq!(sparse_panel().focus(), Some(1));
    }

    #[test]
    fn vertical_moves_wrap_around() {
        let mut panel = sparse_panel();
        assert!(focus_prev(&mut panel));
        assert_eq!(panel.focus(), Some(4));
        assert!(focus_next(&mut panel));
        assert_eq!(panel.focus(), Some(1));
        assert!(focus_next(&mut panel));
        assert_eq!(panel.focus(), Some(3));
        assert!(focus_next(&mut panel));
        assert_eq!(panel.focus(), Some(4));
        assert!(focus_prev(&mut panel));
        assert_eq!(panel.focus(), Some(3));
    }

    #[test]
    fn single_selectable_entry_stays_focused() {
        let mut panel = Panel::message("t", "msg");
        let before = panel.focus();
        focus_next(&mut panel);
        assert_eq!(panel.focus(), before);
        focus_prev(&mut panel);
        assert_eq!(panel.focus(), before);
    }

    #[test]
    fn no_selectable_entries_is_a_noop() {
        let mut panel = Panel::new(
            "static",
            vec![Entry::Heading("h".to_string()), Entry::Divider],
        );
        assert!(!focus_next(&mut panel));
        assert!(!focus_prev(&mut panel));
        assert!(!focus_first(&mut panel));
        assert!(!focus_last(&mut panel));
        assert_eq!(panel.focus(), None);

        let mut empty = Panel::new("empty", Vec::new());
        assert!(!focus_next(&mut empty));
        assert!(!focus_prev(&mut empty));
    }

    #[test]
    fn home_and_end_jump() {
        let mut panel = sparse_panel();
        assert!(focus_last(&mut panel));
        assert_eq!(panel.focus(), Some(4));
        assert!(focus_first(&mut panel));
        assert_eq!(panel.focus(), Some(1));
    }

    #[test]
    fn enter_opens_submenu_and_esc_goes_back() {
        let runner = RecordingRunner::default();
        let dispatcher = ActionDispatcher::new(&runner);
        let router = FocusRouter::new(VIEWPORT);
        let mut stack = PanelStack::new(Topology::Nested, Panel::submenu(&tree(), Topology::Nested));

        assert_eq!(
            router.route(key(Key::Enter), &mut stack, &dispatcher),
            Navigation::Opened
        );
        assert_eq!(stack.current_panel().title(), "Sub");
        assert_eq!(stack.nav_state(), NavState::Level(2));

        assert_eq!(
            router.route(key(Key::Left), &mut stack, &dispatcher),
            Navigation::WentBack
        );
        assert_eq!(stack.current_panel().title(), "Main");
        assert_eq!(
            router.route(key(Key::Esc), &mut stack, &dispatcher),
            Navigation::AtRoot
        );
    }

    #[test]
    fn left_is_unhandled_in_replace() {
        let runner = RecordingRunner::default();
        let dispatcher = ActionDispatcher::new(&runner);
        let router = FocusRouter::new(VIEWPORT);
        let mut stack =
            PanelStack::new(Topology::Replace, Panel::submenu(&tree(), Topology::Replace));
        let ev = key(Key::Left);
        assert_eq!(
            router.route(ev, &mut stack, &dispatcher),
            Navigation::Unhandled(ev)
        );
    }

    #[test]
    fn unknown_keys_are_returned() {
        let runner = RecordingRunner::default();
        let dispatcher = ActionDispatcher::new(&runner);
        let router = FocusRouter::new(VIEWPORT);
        let mut stack = PanelStack::new(Topology::Lanes, Panel::submenu(&tree(), Topology::Lanes));
        let ev = key(Key::Char('x'));
        assert_eq!(
            router.route(ev, &mut stack, &dispatcher),
            Navigation::Unhandled(ev)
        );
        assert_eq!(stack.nav_state(), NavState::Level(1));
    }

    #[test]
    fn exit_entry_requests_exit() {
        let runner = RecordingRunner::default();
        let dispatcher = ActionDispatcher::new(&runner);
        let router = FocusRouter::new(VIEWPORT);
        let mut stack =
            PanelStack::new(Topology::Replace, Panel::submenu(&tree(), Topology::Replace));
        router.route(key(Key::End), &mut stack, &dispatcher);
        assert_eq!(
            stack.current_panel().focused_item().unwrap().binding,
            Binding::Exit
        );
        assert_eq!(
            router.route(key(Key::Enter), &mut stack, &dispatcher),
            Navigation::ExitRequested
        );
    }

    #[test]
    fn click_on_entry_activates_it() {
        let runner = RecordingRunner::default();
        let dispatcher = ActionDispatcher::new(&runner);
        let router = FocusRouter::new(VIEWPORT);
        let mut stack = PanelStack::new(Topology::Nested, Panel::submenu(&tree(), Topology::Nested));
        let content = layout::panes(&stack, VIEWPORT)[0].content;

        // Row 3 of the root box is "B".
        let nav = router.route(
            InputEvent::Click {
                column: content.x + 2,
                row: content.y + 3,
            },
            &mut stack,
            &dispatcher,
        );
        assert_eq!(nav, Navigation::Opened);
        assert_eq!(stack.current_panel().message_text(), Some("You chose B"));
    }

    #[test]
    fn nested_click_is_offset_by_parent_insets() {
        let runner = RecordingRunner::default();
        let dispatcher = ActionDispatcher::new(&runner);
        let router = FocusRouter::new(VIEWPORT);
        let mut stack = PanelStack::new(Topology::Nested, Panel::submenu(&tree(), Topology::Nested));
        router.route(key(Key::Enter), &mut stack, &dispatcher);

        let panes = layout::panes(&stack, VIEWPORT);
        let (root, sub) = (panes[0].content, panes[1].content);

        // Clicking the root box outside the inner box is not routed.
        let outside = InputEvent::Click {
            column: root.x,
            row: root.y,
        };
        assert_eq!(
            router.route(outside, &mut stack, &dispatcher),
            Navigation::Unhandled(outside)
        );

        // The inner box's "X" is at local row 2.
        let nav = router.route(
            InputEvent::Click {
                column: sub.x,
                row: sub.y + 2,
            },
            &mut stack,
            &dispatcher,
        );
        assert_eq!(nav, Navigation::Opened);
        assert_eq!(stack.current_panel().message_text(), Some("You chose X"));
        assert_eq!(stack.nav_state(), NavState::Level(3));
    }

    #[test]
    fn click_on_static_entry_is_unhandled() {
        let runner = RecordingRunner::default();
        let dispatcher = ActionDispatcher::new(&runner);
        let router = FocusRouter::new(VIEWPORT);
        let mut stack =
            PanelStack::new(Topology::Replace, Panel::submenu(&tree(), Topology::Replace));
        let content = layout::panes(&stack, VIEWPORT)[0].content;
        let heading = InputEvent::Click {
            column: content.x,
            row: content.y,
        };
        assert_eq!(
            router.route(heading, &mut stack, &dispatcher),
            Navigation::Unhandled(heading)
        );
        assert_eq!(stack.nav_state(), NavState::Level(1));
    }

    #[test]
    fn click_on_earlier_lane_refocuses_then_truncates_on_open() {
        let runner = RecordingRunner::default();
        let dispatcher = ActionDispatcher::new(&runner);
        let router = FocusRouter::new(VIEWPORT);
        let mut stack = PanelStack::new(Topology::Lanes, Panel::submenu(&tree(), Topology::Lanes));

        // Open "Sub", then choose "X" inside it: three lanes.
        router.route(key(Key::Enter), &mut stack, &dispatcher);
        router.route(key(Key::Enter), &mut stack, &dispatcher);
        let PanelStack::Lanes(lanes) = &stack else {
            panic!("expected lanes");
        };
        assert_eq!(lanes.lanes().len(), 3);

        // Three lanes do not fit the frame; the window shows lanes 1 and 2.
        // Go back once so lanes 0 and 1 are visible, then click "B" in lane 0.
        router.route(key(Key::Esc), &mut stack, &dispatcher);
        let root_lane = layout::panes(&stack, VIEWPORT)[0];
        assert_eq!(root_lane.index, 0);
        let nav = router.route(
            InputEvent::Click {
                column: root_lane.content.x,
                row: root_lane.content.y + 3,
            },
            &mut stack,
            &dispatcher,
        );
        assert_eq!(nav, Navigation::Opened);

        let PanelStack::Lanes(lanes) = &stack else {
            panic!("expected lanes");
        };
        let titles: Vec<&str> = lanes.lanes().iter().map(|l| l.panel.title()).collect();
        assert_eq!(titles, vec!["Main", "B"]);
        assert_eq!(lanes.focus_index(), 1);
    }
}
