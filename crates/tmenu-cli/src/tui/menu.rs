//! Menu screen: draws an engine [`View`] pane by pane.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use tmenu_engine::{Area, Entry, PaneView, View};
use tmenu_types::config::PaletteRole;

use super::theme::{self, Theme};

const HINT: &str = "\u{2191}\u{2193} move  Enter select  Esc back  Ctrl+C quit";

pub fn draw(f: &mut Frame, view: &View<'_>, theme: &Theme) {
    let screen = f.area();
    f.render_widget(
        Block::default().style(theme.style(PaletteRole::Default)),
        screen,
    );

    for pane in &view.panes {
        draw_pane(f, pane, theme);
    }

    // Hint bar on the last row, below the frame.
    if screen.height > 0 && view.frame.bottom() < screen.bottom() {
        let row = Rect::new(screen.x, screen.bottom() - 1, screen.width, 1);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(HINT, theme.hint()))).centered(),
            row,
        );
    }
}

fn draw_pane(f: &mut Frame, pane: &PaneView<'_>, theme: &Theme) {
    let area = rect(pane.area);
    if area.width == 0 || area.height == 0 {
        return;
    }

    if pane.bordered {
        f.render_widget(Clear, area);
        let border = if pane.active {
            PaletteRole::FocusLine
        } else {
            PaletteRole::Line
        };
        f.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.style(border))
                .style(theme.style(PaletteRole::Options)),
            area,
        );
    } else {
        f.render_widget(
            Block::default().style(theme.style(PaletteRole::Options)),
            area,
        );
    }

    let content = rect(pane.content);
    let lines: Vec<Line> = pane
        .panel
        .entries()
        .iter()
        .enumerate()
        .take(usize::from(content.height))
        .map(|(index, entry)| entry_line(entry, index, pane, content.width, theme))
        .collect();
    f.render_widget(Paragraph::new(lines), content);
}

fn entry_line<'a>(
    entry: &'a Entry,
    index: usize,
    pane: &PaneView<'_>,
    width: u16,
    theme: &Theme,
) -> Line<'a> {
    let focused = pane.panel.focus() == Some(index);
    match entry {
        Entry::Heading(title) => {
            let role = if pane.active {
                PaletteRole::FocusHeading
            } else {
                PaletteRole::Heading
            };
            Line::from(Span::styled(title.as_str(), theme.style(role))).centered()
        }
        Entry::Divider => {
            let role = if pane.active {
                PaletteRole::FocusLine
            } else {
                PaletteRole::Line
            };
            Line::from(Span::styled(
                theme::DIVIDER.repeat(usize::from(width)),
                theme.style(role),
            ))
        }
        Entry::Blank => Line::from(""),
        Entry::Text(text) => Line::from(Span::styled(
            text.as_str(),
            theme.style(PaletteRole::Options),
        )),
        Entry::Item(item) => {
            let role = match (focused, pane.active) {
                (true, true) => PaletteRole::Selected,
                (true, false) => PaletteRole::FocusOptions,
                _ => PaletteRole::Options,
            };
            let style = theme.style(role);
            let text = format!("{}{}", theme::BULLET, item.caption);
            // Pad so the highlight spans the whole row.
            let padded = format!("{text:<w$}", w = usize::from(width));
            Line::from(Span::styled(padded, style))
        }
    }
}

fn rect(area: Area) -> Rect {
    Rect::new(area.x, area.y, area.width, area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;
    use tmenu_engine::{Engine, InputEvent, Key, Topology};
    use tmenu_types::{CommandRunner, CommandSpec, LaunchError, MenuNode};

    struct NoopRunner;

    impl CommandRunner for NoopRunner {
        fn launch(&self, _spec: &CommandSpec) -> Result<(), LaunchError> {
            Ok(())
        }
    }

    fn root() -> Arc<MenuNode> {
        Arc::new(MenuNode::Submenu {
            label: "Main".to_string(),
            children: vec![
                Arc::new(MenuNode::Action {
                    label: "Alpha".to_string(),
                }),
                Arc::new(MenuNode::Action {
                    label: "Beta".to_string(),
                }),
            ],
        })
    }

    fn render(engine: &mut Engine<NoopRunner>, width: u16, height: u16) -> Vec<String> {
        engine.set_viewport(Area::new(0, 0, width, height));
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| draw(f, &engine.current_view(), &theme))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn replace_panel_shows_heading_items_and_hint() {
        let mut engine = Engine::new(Topology::Replace, root(), NoopRunner);
        let rows = render(&mut engine, 80, 24);
        let screen = rows.join("\n");
        assert!(screen.contains("Main"));
        assert!(screen.contains("\u{2022} Alpha"));
        assert!(screen.contains("\u{2022} Beta"));
        assert!(screen.contains("\u{2022} Exit"));
        assert!(rows[23].contains("Enter select"));
    }

    #[test]
    fn nested_result_box_is_drawn_on_top() {
        let mut engine = Engine::new(Topology::Nested, root(), NoopRunner);
        engine.handle_input(InputEvent::Key(Key::Enter));
        let rows = render(&mut engine, 100, 40);
        let screen = rows.join("\n");
        assert!(screen.contains("You chose Alpha"));
        assert!(screen.contains("\u{2022} Ok"));
        // The box border covers part of the parent panel.
        assert!(screen.contains('\u{250c}'));
    }

    #[test]
    fn selected_row_uses_selected_style() {
        let mut engine = Engine::new(Topology::Replace, root(), NoopRunner);
        engine.set_viewport(Area::new(0, 0, 80, 24));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| draw(f, &engine.current_view(), &theme))
            .unwrap();

        let pane = engine.current_view().panes[0];
        let focus = engine.current_panel().focus().unwrap() as u16;
        let cell = &terminal.backend().buffer()[(pane.content.x, pane.content.y + focus)];
        assert_eq!(cell.bg, theme.style(PaletteRole::Selected).bg.unwrap());
    }
}
