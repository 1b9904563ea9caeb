//! Screen geometry shared by drawing and mouse hit-testing.
//!
//! All panes live inside a centered frame. The host draws each pane at the
//! area computed here, and clicks are mapped back through the same areas, so
//! the two can never disagree.

use crate::stack::{Inset, PanelStack, LANE_WIDTH};

/// Frame size as a percentage of the viewport.
pub const FRAME_PERCENT: u16 = 60;
pub const FRAME_MIN_WIDTH: u16 = 20;
pub const FRAME_MIN_HEIGHT: u16 = 9;
/// Columns of padding on each side inside the frame.
pub const FRAME_PADDING: u16 = 2;
/// Gap between adjacent lanes.
pub const LANE_DIVIDER: u16 = 1;
/// Smallest nested box, including its border.
pub const BOX_MIN_WIDTH: u16 = 24;
pub const BOX_MIN_HEIGHT: u16 = 8;

/// A rectangle in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Area {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x && column < self.right() && row >= self.y && row < self.bottom()
    }

    /// Shrink every edge by the inset, never below zero size.
    pub fn shrink(&self, inset: Inset) -> Self {
        let width = self.width.saturating_sub(inset.left.saturating_add(inset.right));
        let height = self.height.saturating_sub(inset.top.saturating_add(inset.bottom));
        Self {
            x: self.x.saturating_add(inset.left.min(self.width)),
            y: self.y.saturating_add(inset.top.min(self.height)),
            width,
            height,
        }
    }

    /// Shrink by `margin` on all four sides.
    pub fn inner(&self, margin: u16) -> Self {
        self.shrink(Inset {
            left: margin,
            right: margin,
            top: margin,
            bottom: margin,
        })
    }

    /// A `width` x `height` area centered in `self`, clamped to fit.
    pub fn centered(&self, width: u16, height: u16) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Self {
            x: self.x + (self.width - width) / 2,
            y: self.y + (self.height - height) / 2,
            width,
            height,
        }
    }
}

/// Layout details that depend on the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutHint {
    /// The single Replace panel fills the frame.
    Full,
    Lane { index: usize, width: u16 },
    Nested { level: usize, inset: Inset },
}

/// Where one pane goes on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneGeometry {
    /// Index of the panel inside its stack (lane index or box level - 1).
    pub index: usize,
    /// Outer area, including the border when there is one.
    pub area: Area,
    /// Area where entries are drawn, one entry per row.
    pub content: Area,
    pub bordered: bool,
    /// Whether this pane holds the panel that receives input.
    pub active: bool,
    pub hint: LayoutHint,
}

impl PaneGeometry {
    /// Entry index under a click, in panel-local rows.
    pub fn entry_at(&self, column: u16, row: u16) -> Option<usize> {
        if self.content.contains(column, row) {
            Some(usize::from(row - self.content.y))
        } else {
            None
        }
    }
}

/// The centered frame that holds every pane.
pub fn frame(viewport: Area) -> Area {
    let width = (viewport.width as u32 * FRAME_PERCENT as u32 / 100) as u16;
    let height = (viewport.height as u32 * FRAME_PERCENT as u32 / 100) as u16;
    let outer = viewport.centered(width.max(FRAME_MIN_WIDTH), height.max(FRAME_MIN_HEIGHT));
    outer.shrink(Inset {
        left: FRAME_PADDING,
        right: FRAME_PADDING,
        top: 0,
        bottom: 0,
    })
}

/// Geometry of every visible pane, bottom-most first.
pub fn panes(stack: &PanelStack, viewport: Area) -> Vec<PaneGeometry> {
    let frame = frame(viewport);
    match stack {
        PanelStack::Replace(_) => vec![PaneGeometry {
            index: 0,
            area: frame,
            content: frame,
            bordered: false,
            active: true,
            hint: LayoutHint::Full,
        }],
        PanelStack::Lanes(s) => lane_panes(frame, s.lanes().len(), s.focus_index()),
        PanelStack::Nested(s) => {
            let top = s.level() - 1;
            s.boxes()
                .iter()
                .enumerate()
                .map(|(level, b)| {
                    let area = nested_box(frame, b.inset);
                    PaneGeometry {
                        index: level,
                        area,
                        content: area.inner(1),
                        bordered: true,
                        active: level == top,
                        hint: LayoutHint::Nested {
                            level,
                            inset: b.inset,
                        },
                    }
                })
                .collect()
        }
    }
}

/// Lanes are laid out left to right. When they do not all fit, the window
/// slides so the focused lane stays visible.
fn lane_panes(frame: Area, count: usize, focus: usize) -> Vec<PaneGeometry> {
    let stride = usize::from(LANE_WIDTH + LANE_DIVIDER);
    let capacity = ((usize::from(frame.width) + usize::from(LANE_DIVIDER)) / stride).max(1);
    let first = (focus + 1).saturating_sub(capacity);
    let last = count.min(first + capacity);

    (first..last)
        .enumerate()
        .map(|(slot, index)| {
            let offset = u16::try_from(slot * stride).unwrap_or(u16::MAX);
            let x = frame.x.saturating_add(offset);
            let width = LANE_WIDTH.min(frame.right().saturating_sub(x));
            let area = Area::new(x, frame.y, width, frame.height);
            PaneGeometry {
                index,
                area,
                content: area,
                bordered: false,
                active: index == focus,
                hint: LayoutHint::Lane {
                    index,
                    width: LANE_WIDTH,
                },
            }
        })
        .collect()
}

/// A nested box: the frame pulled in by its inset, kept at least the
/// minimum box size while the frame allows it.
fn nested_box(frame: Area, inset: Inset) -> Area {
    let shrunk = frame.shrink(inset);
    if shrunk.width >= BOX_MIN_WIDTH.min(frame.width)
        && shrunk.height >= BOX_MIN_HEIGHT.min(frame.height)
    {
        shrunk
    } else {
        frame.centered(
            shrunk.width.max(BOX_MIN_WIDTH),
            shrunk.height.max(BOX_MIN_HEIGHT),
        )
    }
}
