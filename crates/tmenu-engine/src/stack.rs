//! Navigation state for the three topologies.
//!
//! - Replace: one panel on screen, previous panels kept as history.
//! - Lanes: side-by-side panels; each `open` snapshots the whole row.
//! - Nested: boxes drawn inside each other, one level per open panel.
//!
//! `back` with nothing to go back to is not an error: it yields
//! [`BackResult::AtRoot`], which the engine turns into program exit.

use tmenu_types::MenuType;

use crate::panel::Panel;

/// Width of every lane in the Lanes topology.
pub const LANE_WIDTH: u16 = 24;
/// Horizontal inward margin added per nesting level.
pub const INSET_STEP_X: u16 = 3;
/// Vertical inward margin added per nesting level.
pub const INSET_STEP_Y: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Replace,
    Lanes,
    Nested,
}

impl From<MenuType> for Topology {
    fn from(menu_type: MenuType) -> Self {
        match menu_type {
            MenuType::Simple => Topology::Replace,
            MenuType::Horizontal => Topology::Lanes,
            MenuType::Cascading => Topology::Nested,
        }
    }
}

/// Depth of the navigation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// Number of panels deep, starting at 1 for the root.
    Level(usize),
    /// Terminal state: the program should end.
    Exit,
}

#[derive(Debug)]
pub enum BackResult<'a> {
    /// Went back; this is the panel now showing.
    Went(&'a Panel),
    /// Nothing to go back to.
    AtRoot,
}

impl BackResult<'_> {
    pub fn is_at_root(&self) -> bool {
        matches!(self, BackResult::AtRoot)
    }
}

// ── Replace ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ReplaceStack {
    current: Panel,
    history: Vec<Panel>,
}

impl ReplaceStack {
    pub fn new(root: Panel) -> Self {
        Self {
            current: root,
            history: Vec::new(),
        }
    }

    pub fn open(&mut self, panel: Panel) {
        let previous = std::mem::replace(&mut self.current, panel);
        self.history.push(previous);
    }

    pub fn back(&mut self) -> BackResult<'_> {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                BackResult::Went(&self.current)
            }
            None => BackResult::AtRoot,
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

// ── Lanes ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    pub panel: Panel,
    pub width: u16,
}

/// `focus` always indexes into `lanes`, which is never empty.
#[derive(Debug, Clone)]
pub struct LaneStack {
    lanes: Vec<Lane>,
    focus: usize,
    snapshots: Vec<Vec<Lane>>,
}

impl LaneStack {
    pub fn new(root: Panel) -> Self {
        Self {
            lanes: vec![Lane {
                panel: root,
                width: LANE_WIDTH,
            }],
            focus: 0,
            snapshots: Vec::new(),
        }
    }

    /// Snapshot the row, drop everything right of the focused lane, then
    /// append `panel` as the new focused lane.
    pub fn open(&mut self, panel: Panel) {
        self.snapshots.push(self.lanes.clone());
        self.lanes.truncate(self.focus + 1);
        self.lanes.push(Lane {
            panel,
            width: LANE_WIDTH,
        });
        self.focus = self.lanes.len() - 1;
    }

    pub fn back(&mut self) -> BackResult<'_> {
        match self.snapshots.pop() {
            Some(lanes) => {
                self.lanes = lanes;
                self.focus = self.lanes.len() - 1;
                BackResult::Went(&self.lanes[self.focus].panel)
            }
            None => BackResult::AtRoot,
        }
    }

    /// Focus an existing lane without changing the row.
    pub fn focus_lane(&mut self, index: usize) -> bool {
        if index < self.lanes.len() {
            self.focus = index;
            true
        } else {
            false
        }
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn focus_index(&self) -> usize {
        self.focus
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}

// ── Nested ──────────────────────────────────────────────────────────────────

/// Inward margin of a nested box relative to the outer frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inset {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Inset {
    /// Margins for the box at `level` (0 for the root box). Each level moves
    /// every edge further in, so a deeper box sits inside its parent.
    pub fn for_level(level: usize) -> Self {
        let level = u16::try_from(level).unwrap_or(u16::MAX);
        let x = level.saturating_mul(INSET_STEP_X);
        let y = level.saturating_mul(INSET_STEP_Y);
        Self {
            left: x,
            right: x,
            top: y,
            bottom: y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedBox {
    pub panel: Panel,
    pub inset: Inset,
}

/// The level of a nested stack is the number of boxes; it is at least 1.
#[derive(Debug, Clone)]
pub struct NestedStack {
    boxes: Vec<NestedBox>,
}

impl NestedStack {
    pub fn new(root: Panel) -> Self {
        Self {
            boxes: vec![NestedBox {
                panel: root,
                inset: Inset::for_level(0),
            }],
        }
    }

    pub fn open(&mut self, panel: Panel) {
        let inset = Inset::for_level(self.level());
        self.boxes.push(NestedBox { panel, inset });
    }

    pub fn back(&mut self) -> BackResult<'_> {
        if self.boxes.len() > 1 {
            self.boxes.pop();
            BackResult::Went(&self.top().panel)
        } else {
            BackResult::AtRoot
        }
    }

    pub fn level(&self) -> usize {
        self.boxes.len()
    }

    pub fn boxes(&self) -> &[NestedBox] {
        &self.boxes
    }

    fn top(&self) -> &NestedBox {
        // `boxes` is never empty: `new` seeds the root and `back` keeps it.
        &self.boxes[self.boxes.len() - 1]
    }
}

// ── PanelStack ──────────────────────────────────────────────────────────────

/// Topology-agnostic navigation state owned by the engine.
#[derive(Debug, Clone)]
pub enum PanelStack {
    Replace(ReplaceStack),
    Lanes(LaneStack),
    Nested(NestedStack),
}

impl PanelStack {
    pub fn new(topology: Topology, root: Panel) -> Self {
        match topology {
            Topology::Replace => PanelStack::Replace(ReplaceStack::new(root)),
            Topology::Lanes => PanelStack::Lanes(LaneStack::new(root)),
            Topology::Nested => PanelStack::Nested(NestedStack::new(root)),
        }
    }

    pub fn topology(&self) -> Topology {
        match self {
            PanelStack::Replace(_) => Topology::Replace,
            PanelStack::Lanes(_) => Topology::Lanes,
            PanelStack::Nested(_) => Topology::Nested,
        }
    }

    pub fn open(&mut self, panel: Panel) {
        match self {
            PanelStack::Replace(s) => s.open(panel),
            PanelStack::Lanes(s) => s.open(panel),
            PanelStack::Nested(s) => s.open(panel),
        }
    }

    pub fn back(&mut self) -> BackResult<'_> {
        match self {
            PanelStack::Replace(s) => s.back(),
            PanelStack::Lanes(s) => s.back(),
            PanelStack::Nested(s) => s.back(),
        }
    }

    pub fn current_panel(&self) -> &Panel {
        match self {
            PanelStack::Replace(s) => &s.current,
            PanelStack::Lanes(s) => &s.lanes[s.focus].panel,
            PanelStack::Nested(s) => &s.top().panel,
        }
    }

    pub fn current_panel_mut(&mut self) -> &mut Panel {
        match self {
            PanelStack::Replace(s) => &mut s.current,
            PanelStack::Lanes(s) => &mut s.lanes[s.focus].panel,
            PanelStack::Nested(s) => {
                let last = s.boxes.len() - 1;
                &mut s.boxes[last].panel
            }
        }
    }

    /// Focus another lane. Only the Lanes topology has more than one
    /// focusable panel; elsewhere this is a no-op returning `false`.
    pub fn focus_lane(&mut self, index: usize) -> bool {
        match self {
            PanelStack::Lanes(s) => s.focus_lane(index),
            _ => false,
        }
    }

    pub fn nav_state(&self) -> NavState {
        NavState::Level(match self {
            PanelStack::Replace(s) => s.history.len() + 1,
            PanelStack::Lanes(s) => s.focus + 1,
            PanelStack::Nested(s) => s.level(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(name: &str) -> Panel {
        Panel::message(name, name)
    }

    fn all_topologies() -> [Topology; 3] {
        [Topology::Replace, Topology::Lanes, Topology::Nested]
    }

    #[test]
    fn open_then_back_restores_previous_panel_at_any_depth() {
        for topology in all_topologies() {
            let mut stack = PanelStack::new(topology, panel("root"));
            for depth in 1..6 {
                let before = stack.current_panel().clone();
                stack.open(panel(&format!("p{depth}")));
                assert_eq!(stack.current_panel().title(), format!("p{depth}"));
                match stack.back() {
                    BackResult::Went(p) => assert_eq!(p, &before, "{topology:?}"),
                    BackResult::AtRoot => panic!("{topology:?}: unexpected AtRoot"),
                }
                assert_eq!(stack.current_panel(), &before);
                // Descend one level for the next iteration.
                stack.open(panel(&format!("p{depth}")));
            }
        }
    }

    #[test]
    fn back_at_root_for_every_topology() {
        for topology in all_topologies() {
            let mut stack = PanelStack::new(topology, panel("root"));
            assert!(stack.back().is_at_root(), "{topology:?}");
            assert_eq!(stack.current_panel().title(), "root");
            assert_eq!(stack.nav_state(), NavState::Level(1));
        }
    }

    #[test]
    fn replace_history_is_lifo() {
        let mut stack = ReplaceStack::new(panel("root"));
        stack.open(panel("a"));
        stack.open(panel("b"));
        assert_eq!(stack.history_len(), 2);
        match stack.back() {
            BackResult::Went(p) => assert_eq!(p.title(), "a"),
            BackResult::AtRoot => panic!("expected Went"),
        }
        match stack.back() {
            BackResult::Went(p) => assert_eq!(p.title(), "root"),
            BackResult::AtRoot => panic!("expected Went"),
        }
        assert!(stack.back().is_at_root());
    }

    #[test]
    fn nested_level_tracks_opens_and_backs() {
        let mut stack = PanelStack::new(Topology::Nested, panel("root"));
        let k = 4;
        for i in 0..k {
            stack.open(panel(&format!("p{i}")));
        }
        assert_eq!(stack.nav_state(), NavState::Level(k + 1));
        for _ in 0..k {
            assert!(!stack.back().is_at_root());
        }
        assert_eq!(stack.nav_state(), NavState::Level(1));
        assert!(stack.back().is_at_root());
        assert_eq!(stack.nav_state(), NavState::Level(1));
    }

    #[test]
    fn nested_insets_grow_with_depth() {
        let mut stack = NestedStack::new(panel("root"));
        stack.open(panel("a"));
        stack.open(panel("b"));
        let insets: Vec<Inset> = stack.boxes().iter().map(|b| b.inset).collect();
        assert_eq!(insets[0], Inset::default());
        assert_eq!(
            insets[1],
            Inset {
                left: 3,
                right: 3,
                top: 2,
                bottom: 2
            }
        );
        assert_eq!(insets[2].left, 6);
        assert_eq!(insets[2].top, 4);
    }

    #[test]
    fn lanes_open_appends_fixed_width_lane() {
        let mut stack = LaneStack::new(panel("root"));
        stack.open(panel("a"));
        stack.open(panel("b"));
        assert_eq!(stack.lanes().len(), 3);
        assert_eq!(stack.focus_index(), 2);
        assert!(stack.lanes().iter().all(|l| l.width == LANE_WIDTH));
        assert_eq!(stack.snapshot_count(), 2);
    }

    #[test]
    fn lanes_open_from_earlier_lane_discards_lanes_to_the_right() {
        let mut stack = LaneStack::new(panel("root"));
        stack.open(panel("a"));
        stack.open(panel("b"));
        stack.open(panel("c"));
        assert!(stack.focus_lane(1));
        stack.open(panel("d"));

        let titles: Vec<&str> = stack.lanes().iter().map(|l| l.panel.title()).collect();
        assert_eq!(titles, vec!["root", "a", "d"]);
        assert_eq!(stack.focus_index(), 2);

        // Back restores the row exactly as it was before the divergent open.
        match stack.back() {
            BackResult::Went(p) => assert_eq!(p.title(), "c"),
            BackResult::AtRoot => panic!("expected Went"),
        }
        assert_eq!(stack.lanes().len(), 4);
    }

    #[test]
    fn lanes_focus_lane_rejects_out_of_range() {
        let mut stack = PanelStack::new(Topology::Lanes, panel("root"));
        assert!(!stack.focus_lane(3));
        assert!(stack.focus_lane(0));

        let mut replace = PanelStack::new(Topology::Replace, panel("root"));
        assert!(!replace.focus_lane(0));
    }

    #[test]
    fn menu_type_maps_to_topology() {
        assert_eq!(Topology::from(MenuType::Simple), Topology::Replace);
        assert_eq!(Topology::from(MenuType::Horizontal), Topology::Lanes);
        assert_eq!(Topology::from(MenuType::Cascading), Topology::Nested);
    }
}
