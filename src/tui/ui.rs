//! TUI drawing logic for modelbook.
//!
//! Renders the model list beside the edit form (stacked on narrow
//! terminals), a bordered status bar, a help line, and the confirmation
//! dialog on top when one is open.

use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use super::app::{App, Focus};
use crate::constants::{MIN_FORM_WIDTH, MIN_SIDEBAR_WIDTH};
use crate::editor::SavePolicy;
use crate::form::Field;
use crate::model::Provider;
use crate::status::StatusKind;

const PRIMARY: Color = Color::Cyan;
const SECONDARY: Color = Color::DarkGray;

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub sidebar: Rect,
    pub form: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Splits the screen. Below `MIN_SIDEBAR_WIDTH + MIN_FORM_WIDTH` columns
/// the list sits above the form; otherwise it takes a third of the width.
pub fn areas(area: Rect) -> Areas {
    let [content, status, help] = Layout::vertical([
        Constraint::Min(4),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let [sidebar, form] = if area.width < MIN_SIDEBAR_WIDTH + MIN_FORM_WIDTH {
        let list_height = (content.height / 3).max(4);
        Layout::vertical([Constraint::Length(list_height), Constraint::Min(4)]).areas(content)
    } else {
        let width = (area.width / 3)
            .max(MIN_SIDEBAR_WIDTH)
            .min(area.width - MIN_FORM_WIDTH);
        Layout::horizontal([Constraint::Length(width), Constraint::Min(MIN_FORM_WIDTH)])
            .areas(content)
    };

    Areas {
        sidebar,
        form,
        status,
        help,
    }
}

/// Draws the whole frame.
pub fn draw(f: &mut Frame, app: &App) {
    let areas = areas(f.area());
    draw_sidebar(f, app, areas.sidebar);
    draw_form(f, app, areas.form);
    draw_status(f, app, areas.status);
    draw_help(f, app, areas.help);
    if let Some(confirm) = &app.confirm {
        draw_confirm(f, &confirm.message());
    }
}

fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { PRIMARY } else { SECONDARY }))
        .title(Span::styled(
            title,
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ))
}

fn provider_color(provider: Provider) -> Color {
    match provider {
        Provider::Anthropic => Color::Magenta,
        Provider::OpenAI => Color::Green,
        Provider::GenericChatCompletion => Color::Gray,
    }
}

fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let editor = &app.editor;
    let focused = app.focus == Focus::Sidebar;
    let title = if editor.is_dirty() {
        " YOUR MODELS * "
    } else {
        " YOUR MODELS "
    };
    let block = panel(title.to_string(), focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, list_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

    let select_all = if editor.all_marked() {
        "[a] Deselect All"
    } else {
        "[a] Select All"
    };
    let header_lines = vec![
        Line::from(Span::styled(
            "[n] New  [d] Delete",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(select_all, Style::default().fg(SECONDARY))),
    ];
    f.render_widget(Paragraph::new(header_lines), header);

    if editor.registry().is_empty() {
        let hint = Style::default().fg(SECONDARY).add_modifier(Modifier::ITALIC);
        let lines = vec![
            Line::from(Span::styled("No models configured", hint)),
            Line::from(Span::styled("Press 'n' to create your first model", hint)),
        ];
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), list_area);
        return;
    }

    let items: Vec<ListItem> = editor
        .registry()
        .iter()
        .enumerate()
        .map(|(i, (id, record))| {
            let checkbox = if editor.is_marked(id) {
                Span::styled("[x] ", Style::default().fg(Color::LightGreen))
            } else {
                Span::styled("[ ] ", Style::default().fg(SECONDARY))
            };
            ListItem::new(Line::from(vec![
                checkbox,
                Span::styled(
                    record.provider.badge(),
                    Style::default().fg(provider_color(record.provider)),
                ),
                Span::raw(format!(" {}. {}", i + 1, record.label())),
            ]))
        })
        .collect();

    let highlight = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let list = List::new(items).highlight_style(highlight);
    let mut state = ListState::default().with_selected(editor.selected_index());
    f.render_stateful_widget(list, list_area, &mut state);
}

/// Rendered text of a field's value.
fn field_text(app: &App, field: Field) -> String {
    let value = app.editor.form.value(field);
    match field {
        Field::Provider => format!("< {} >", value),
        Field::ApiKey if !app.show_api_key => "\u{2022}".repeat(value.chars().count()),
        _ => value.to_string(),
    }
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Form;
    let title = match app.editor.selected_record() {
        Some(record) => format!(" EDITING: {} ", record.label()),
        None => " NEW MODEL ".to_string(),
    };
    let block = panel(title, focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let error_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    let hint_style = Style::default().fg(SECONDARY).add_modifier(Modifier::ITALIC);

    let mut lines: Vec<Line> = Vec::new();
    let mut active_line = 0u16;
    let mut cursor = None;
    for field in Field::ALL {
        let active = focused && app.field == field;
        let mut label = vec![Span::styled(format!("{}:", field.label()), label_style)];
        if app.invalid_field == Some(field) {
            label.push(Span::styled(" ! invalid", error_style));
        }
        lines.push(Line::from(label));

        let text = field_text(app, field);
        let value_line = if text.is_empty() && field != Field::Provider {
            Line::from(Span::styled(
                format!("  {}", field.placeholder()),
                Style::default().fg(SECONDARY),
            ))
        } else {
            let style = if active {
                Style::default().fg(PRIMARY)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("  {}", text), style))
        };
        if active {
            active_line = lines.len() as u16;
            if field != Field::Provider {
                cursor = Some(2 + text.chars().count() as u16);
            }
        }
        lines.push(value_line);

        if active {
            lines.push(Line::from(Span::styled(format!("  {}", field.hint()), hint_style)));
        }
        lines.push(Line::from(""));
    }

    // Keep the active field's value and hint inside the panel.
    let scroll = (active_line + 2).saturating_sub(inner.height);
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);

    if let Some(x) = cursor {
        let y = active_line.saturating_sub(scroll);
        if x < inner.width && y < inner.height {
            f.set_cursor_position(Position::new(inner.x + x, inner.y + y));
        }
    }
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let message = match app.editor.status.current() {
        None => Span::styled("Ready", Style::default().fg(SECONDARY)),
        Some((kind, text)) => {
            let style = match kind {
                StatusKind::Info => Style::default().fg(PRIMARY),
                StatusKind::Success => Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
                StatusKind::Warning => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                StatusKind::Error => Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            };
            Span::styled(text.to_string(), style)
        }
    };
    let mut spans = vec![Span::raw("Status: "), message];
    if app.editor.policy() == SavePolicy::Manual {
        spans.push(Span::styled("  [manual save]", Style::default().fg(SECONDARY)));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(SECONDARY));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.focus {
        Focus::Sidebar => {
            "tab: form | \u{2191}\u{2193}/jk: nav | space: mark | a: all | n: new | d: del | ctrl+\u{2191}\u{2193}/JK: move | ctrl+s: apply | ctrl+w: write | ctrl+c: quit"
        }
        Focus::Form => {
            "tab/\u{2191}\u{2193}: fields | \u{2190}\u{2192}: provider | ctrl+v: show key | ctrl+u: clear | ctrl+s: apply | esc: back | ctrl+c: quit"
        }
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!(" {text}"), Style::default().fg(SECONDARY))),
        area,
    );
}

fn draw_confirm(f: &mut Frame, message: &str) {
    let width = f.area().width.saturating_sub(4).clamp(20, 48);
    let [row] = Layout::vertical([Constraint::Length(7)])
        .flex(Flex::Center)
        .areas(f.area());
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let warn = Style::default().fg(Color::Yellow);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(warn)
        .title(Span::styled(" CONFIRM ", warn.add_modifier(Modifier::BOLD)));
    let lines = vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "[Yes (y)]  [No (n/esc)]",
            Style::default().fg(SECONDARY),
        )),
    ];
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
