use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Table, TableState, Tabs, Wrap,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::app_core::catalog::{SkinSearchState, WeaponSkinsState, WeaponsState};
use crate::app_core::leaderboard::{LeaderboardFocus, LeaderboardState, LoadPhase};
use crate::app_core::route::NAV_TABS;
use crate::app_core::state::{AppState, InputMode, View};
use crate::model::Skin;
use crate::theme::ThemeConfig;

/// Main UI entry point that renders the entire application layout.
pub fn ui(f: &mut Frame, app: &AppState) {
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation tabs
            Constraint::Min(0),    // Current view
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let editing = app.input_mode == InputMode::Editing;
    let theme = &app.theme;
    match &app.view {
        View::Leaderboard(state) => render_leaderboard(f, theme, state, chunks[1]),
        View::Weapons(state) => render_weapons(f, theme, state, editing, chunks[1]),
        View::WeaponSkins(state) => render_weapon_skins(f, theme, state, chunks[1]),
        View::SkinSearch(state) => render_skin_search(f, theme, state, editing, chunks[1]),
    }

    render_status_bar(f, app, chunks[2]);

    if app.show_help {
        render_help_overlay(f, app);
    }
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .title(" vtracker ")
        .title_style(app.theme.title)
        .title_alignment(Alignment::Left);

    let titles: Vec<Line> = NAV_TABS
        .iter()
        .enumerate()
        .map(|(idx, name)| Line::from(format!("{} {}", idx + 1, name)))
        .collect();

    let tabs = Tabs::new(titles)
        .block(block)
        .style(app.theme.text)
        .highlight_style(app.theme.list_selected)
        .select(app.route.tab_index())
        .divider(" │ ");

    f.render_widget(tabs, area);
}

/// Splits `area` into an optional error box on top and the remaining space.
fn split_error(f: &mut Frame, theme: &ThemeConfig, error: Option<&str>, area: Rect) -> Rect {
    let Some(message) = error else {
        return area;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.error)
        .title(" Error ")
        .title_style(theme.error);
    f.render_widget(
        Paragraph::new(message)
            .block(block)
            .style(theme.error)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );
    chunks[1]
}

fn selector_block<'a>(theme: &ThemeConfig, title: &'a str, focused: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.border_selected
        } else {
            theme.border
        })
        .title(title)
        .title_style(theme.title)
}

fn render_leaderboard(f: &mut Frame, theme: &ThemeConfig, state: &LeaderboardState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Selectors
            Constraint::Min(0),    // Error + table
            Constraint::Length(1), // Loader status
        ])
        .split(area);

    let selectors = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(chunks[0]);

    let episode = state
        .selected_episode()
        .map(|e| e.name.as_str())
        .unwrap_or(if state.is_content_loading() { "…" } else { "—" });
    let act = state
        .selected_act()
        .map(|a| a.name.as_str())
        .unwrap_or(if state.is_content_loading() { "…" } else { "—" });

    for (idx, (title, value, focus)) in [
        (" Region ", state.region.label(), LeaderboardFocus::Region),
        (" Episode ", episode.to_string(), LeaderboardFocus::Episode),
        (" Act ", act.to_string(), LeaderboardFocus::Act),
    ]
    .into_iter()
    .enumerate()
    {
        let focused = state.focus == focus;
        let style = if focused { theme.title } else { theme.text };
        let line = Line::from(vec![
            Span::styled("◀ ", theme.muted),
            Span::styled(value, style),
            Span::styled(" ▶", theme.muted),
        ]);
        f.render_widget(
            Paragraph::new(line)
                .block(selector_block(theme, title, focused))
                .style(theme.text),
            selectors[idx],
        );
    }

    let table_area = split_error(f, theme, state.error.as_deref(), chunks[1]);
    render_player_table(f, theme, state, table_area);

    let mut status = vec![Span::styled(state.status_text(), theme.muted)];
    match state.phase() {
        LoadPhase::Ready {
            can_load_more: true,
        } => {
            status.push(Span::styled("  •  ", theme.muted));
            status.push(Span::styled("m", theme.title));
            status.push(Span::styled(" load more", theme.muted));
        }
        LoadPhase::Loading { page } if page > 0 => {
            status.push(Span::styled(format!("  •  loading page {}…", page + 1), theme.muted));
        }
        _ => {}
    }
    f.render_widget(
        Paragraph::new(Line::from(status)).alignment(Alignment::Right),
        chunks[2].inner(Margin::new(1, 0)),
    );
}

fn render_player_table(f: &mut Frame, theme: &ThemeConfig, state: &LeaderboardState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(format!(" Leaderboard ({}) ", state.players.len()))
        .title_style(theme.title)
        .title_bottom(Line::from(" Tab select • ←/→ change • r reload ").right_aligned())
        .style(theme.list_normal);

    if state.players.is_empty() {
        let message = match state.phase() {
            LoadPhase::Loading { .. } => "Loading…",
            _ if state.is_content_loading() => "Loading…",
            LoadPhase::Idle => "No act selected",
            LoadPhase::Ready { .. } => "No players",
        };
        f.render_widget(
            Paragraph::new(Span::styled(message, theme.muted))
                .block(block)
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let header = Row::new(["#", "Player", "Rating", "Wins", "Tier"]).style(theme.title);
    let rows: Vec<Row> = state
        .players
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(opt_num(p.leaderboard_rank)).style(theme.accent),
                Cell::from(p.display_name()),
                Cell::from(opt_num(p.ranked_rating)).style(theme.accent),
                Cell::from(opt_num(p.number_of_wins)),
                Cell::from(opt_num(p.competitive_tier)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .block(block)
    .style(theme.list_normal)
    .row_highlight_style(theme.list_selected);

    let mut table_state = TableState::default().with_selected(Some(state.selected_row));
    f.render_stateful_widget(table, area, &mut table_state);
    render_scrollbar(f, area, state.players.len(), state.selected_row);
}

fn render_scrollbar(f: &mut Frame, area: Rect, len: usize, position: usize) {
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
    let mut scrollbar_state = ScrollbarState::new(len).position(position);
    f.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

fn opt_num(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// `EEquippableCategory::Rifle` → `Rifle`.
pub fn short_category(category: &str) -> &str {
    category.rsplit("::").next().unwrap_or(category)
}

/// Renders a single-line text input with the cursor kept at the end.
fn render_input(
    f: &mut Frame,
    theme: &ThemeConfig,
    area: Rect,
    title: &str,
    text: &str,
    placeholder: &str,
    editing: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if editing {
            theme.border_selected
        } else {
            theme.border
        })
        .title(title)
        .title_style(theme.title)
        .title_bottom(if editing {
            Line::from(" Enter done • Ctrl+U clear ").right_aligned()
        } else {
            Line::from("")
        });

    let inner = block.inner(area);
    let scroll = input_scroll(text, inner.width);

    let content = if text.is_empty() && !editing {
        Text::from(Line::from(Span::styled(
            placeholder.to_string(),
            theme.text.add_modifier(Modifier::DIM | Modifier::ITALIC),
        )))
    } else {
        Text::from(text.to_string())
    };

    f.render_widget(
        Paragraph::new(content)
            .block(block)
            .style(theme.text)
            .scroll((0, scroll)),
        area,
    );

    if editing && inner.width > 0 && inner.height > 0 {
        let offset = (text.width() as u16).saturating_sub(scroll);
        let cursor_x = inner.x + offset.min(inner.width.saturating_sub(1));
        f.set_cursor_position((cursor_x, inner.y));
    }
}

/// Horizontal scroll that keeps the end of `text` visible in `visible_width` cells.
pub fn input_scroll(text: &str, visible_width: u16) -> u16 {
    if visible_width == 0 {
        return 0;
    }
    (text.width() as u16).saturating_sub(visible_width.saturating_sub(1))
}

fn render_weapons(
    f: &mut Frame,
    theme: &ThemeConfig,
    state: &WeaponsState,
    editing: bool,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_input(
        f,
        theme,
        chunks[0],
        " Filter (/) ",
        &state.filter,
        "name or category",
        editing,
    );

    let list_area = split_error(f, theme, state.weapons.error.as_deref(), chunks[1]);
    let visible = state.visible();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_selected)
        .title(format!(" Weapons ({}) · {} ", visible.len(), state.language))
        .title_style(theme.title)
        .title_bottom(Line::from(" ↑/↓ move • Enter skins • l language ").right_aligned())
        .style(theme.list_normal);

    if visible.is_empty() {
        let message = if state.weapons.is_loading() {
            "Loading…"
        } else {
            "No weapons"
        };
        f.render_widget(
            Paragraph::new(Span::styled(message, theme.muted))
                .block(block)
                .alignment(Alignment::Center),
            list_area,
        );
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|w| {
            let mut spans = vec![Span::raw(w.display_name.as_str())];
            if let Some(category) = w.category.as_deref() {
                spans.push(Span::styled(
                    format!("  {}", short_category(category)),
                    theme.muted,
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .style(theme.list_normal)
        .scroll_padding(2)
        .highlight_style(theme.list_selected);

    let mut list_state = ListState::default().with_selected(Some(state.selected));
    f.render_stateful_widget(list, list_area, &mut list_state);
    render_scrollbar(f, list_area, visible.len(), state.selected);
}

fn render_skin_table(
    f: &mut Frame,
    theme: &ThemeConfig,
    title: String,
    skins: &[Skin],
    selected: usize,
    loading: bool,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_selected)
        .title(title)
        .title_style(theme.title)
        .style(theme.list_normal);

    if skins.is_empty() {
        let message = if loading { "Loading…" } else { "No skins" };
        f.render_widget(
            Paragraph::new(Span::styled(message, theme.muted))
                .block(block)
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let header = Row::new(["Skin", "Levels", "Chromas", "Art"]).style(theme.title);
    let rows: Vec<Row> = skins
        .iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(s.display_name.as_str()),
                Cell::from(s.levels.len().to_string()),
                Cell::from(s.chromas.len().to_string()),
                Cell::from(if s.image().is_some() { "✓" } else { "–" }).style(theme.muted),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(4),
        ],
    )
    .header(header)
    .block(block)
    .style(theme.list_normal)
    .row_highlight_style(theme.list_selected);

    let mut table_state = TableState::default().with_selected(Some(selected));
    f.render_stateful_widget(table, area, &mut table_state);
    render_scrollbar(f, area, skins.len(), selected);
}

fn render_weapon_skins(f: &mut Frame, theme: &ThemeConfig, state: &WeaponSkinsState, area: Rect) {
    let area = split_error(f, theme, state.error(), area);
    let title = format!(
        " {} · {} skins · {} · Esc back ",
        state.title(),
        state.skins().len(),
        state.language
    );
    render_skin_table(
        f,
        theme,
        title,
        state.skins(),
        state.selected,
        state.is_loading(),
        area,
    );
}

fn render_skin_search(
    f: &mut Frame,
    theme: &ThemeConfig,
    state: &SkinSearchState,
    editing: bool,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_input(
        f,
        theme,
        chunks[0],
        " Search (/) ",
        &state.query,
        "skin name",
        editing,
    );

    let area = split_error(f, theme, state.skins.error.as_deref(), chunks[1]);
    let title = format!(" Results ({}) · {} ", state.skins().len(), state.language);
    render_skin_table(
        f,
        theme,
        title,
        state.skins(),
        state.selected,
        state.skins.is_loading(),
        area,
    );
}

/// Renders the multisection status bar at the bottom.
fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let area = Rect::new(
        area.x + 1,
        area.y,
        area.width.saturating_sub(2),
        area.height,
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    let key_style = app.theme.title;
    let bar_style = app.theme.text.add_modifier(Modifier::DIM);

    let shortcuts = Line::from(vec![
        Span::styled("1-3 ", key_style),
        Span::raw("pages  "),
        Span::styled("? ", key_style),
        Span::raw("help  "),
        Span::styled("q ", key_style),
        Span::raw("quit"),
    ]);
    f.render_widget(
        Paragraph::new(shortcuts)
            .style(bar_style)
            .alignment(Alignment::Left),
        chunks[0],
    );

    f.render_widget(
        Paragraph::new(Line::from(app.route.path()))
            .style(bar_style)
            .alignment(Alignment::Center),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new(Line::from(format!("{} {}", app.api_base, app.app_version)))
            .style(bar_style)
            .alignment(Alignment::Right),
        chunks[2],
    );
}

fn render_help_overlay(f: &mut Frame, app: &AppState) {
    let area = f.area();
    let popup_width = area.width.min(64).saturating_sub(4);
    let popup_height = 28.min(area.height.saturating_sub(2));
    if popup_width == 0 || popup_height == 0 {
        return;
    }
    let popup_rect = Rect::new(
        area.x + (area.width.saturating_sub(popup_width)) / 2,
        area.y + (area.height.saturating_sub(popup_height)) / 2,
        popup_width,
        popup_height,
    );

    f.render_widget(Clear, popup_rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_selected)
        .style(app.theme.text)
        .title(" Help ")
        .border_type(ratatui::widgets::BorderType::Double)
        .title_style(app.theme.title);

    let inner_area = block.inner(popup_rect).inner(Margin::new(1, 1));
    f.render_widget(block, popup_rect);

    let key_style = app.theme.title;
    let desc_style = app.theme.text;
    let header_style = key_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let format_section = |title: &str, items: Vec<(&str, &str)>| -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(title.to_string(), header_style))];
        for (key, desc) in items {
            lines.push(Line::from(vec![
                Span::styled(format!("{: <14}", key), key_style),
                Span::styled(desc.to_string(), desc_style),
            ]));
        }
        lines
    };

    let mut lines = format_section(
        "Global",
        vec![
            ("1 | 2 | 3", "leaderboard | skins | search"),
            ("?", "toggle help"),
            ("q", "quit"),
        ],
    );
    lines.push(Line::from(""));
    lines.extend(format_section(
        "Leaderboard",
        vec![
            ("Tab | S-Tab", "focus region / episode / act"),
            ("← | →", "change focused selector"),
            ("↑ | ↓", "move in table"),
            ("m | Enter", "load more"),
            ("r", "reload content"),
        ],
    ));
    lines.push(Line::from(""));
    lines.extend(format_section(
        "Skins",
        vec![
            ("/", "edit filter or search"),
            ("Enter", "open weapon skins"),
            ("Esc", "back to weapons"),
            ("l", "next language"),
        ],
    ));
    lines.push(Line::from(""));
    lines.extend(format_section(
        "Editing",
        vec![("Ctrl+U", "clear"), ("Enter | Esc", "stop editing")],
    ));

    f.render_widget(Paragraph::new(lines), inner_area);
}
