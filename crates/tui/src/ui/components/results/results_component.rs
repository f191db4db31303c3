use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use localmarket_types::{CardAction, Effect, Listing, Msg, format_price};
use localmarket_util::{truncate_to_width, wrap_to_width};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Borders, Paragraph, Wrap},
};

use super::state::{CARD_HEIGHT, CardHitArea, card_columns};
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::{
    Theme,
    theme_helpers::{self as th, ButtonRenderOptions, ButtonType, render_button},
};

/// Shown in place of the grid when the filters leave nothing visible.
pub const EMPTY_RESULTS_TEXT: &str = "No results found based on selected filters.";

const FEATURE_LINES: usize = 2;

#[derive(Debug, Default)]
pub struct ResultsComponent;

impl ResultsComponent {
    pub fn new() -> Self {
        Self
    }

    fn activate(app: &mut App, action: CardAction) -> Vec<Effect> {
        let Some(listing_id) = app.market.visible().nth(app.results.selected).map(|listing| listing.id) else {
            return Vec::new();
        };
        app.update(&Msg::CardAction { listing_id, action })
    }

    fn render_card(frame: &mut Frame, area: Rect, listing: &Listing, theme: &dyn Theme, selected: Option<CardAction>) -> CardHitArea {
        let title = format!(" {} ", listing.r#type);
        let block = th::block(theme, None, selected.is_some()).title(Span::styled(title, theme.accent_emphasis_style()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [body_area, buttons_area] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
        let width = usize::from(body_area.width);

        let mut lines: Vec<Line> = Vec::with_capacity(10);
        if let Some(location) = listing.location.as_deref() {
            lines.push(Line::from(Span::styled(
                truncate_to_width(location, width),
                theme.text_muted_style().add_modifier(Modifier::ITALIC),
            )));
        }
        let fields = [
            ("Theme", listing.theme.clone()),
            ("Activity", listing.activity.clone()),
            ("Price", format!("${}", format_price(listing.price))),
            ("Start Time", listing.start_time.clone()),
            ("Group Size", listing.group_size.clone()),
            ("Vehicle", listing.vehicle.clone()),
        ];
        for (label, value) in fields {
            let label = format!("{label}: ");
            let value = truncate_to_width(&value, width.saturating_sub(label.len()));
            lines.push(Line::from(vec![
                Span::styled(label, theme.text_secondary_style()),
                Span::styled(value, theme.text_primary_style()),
            ]));
        }
        let features = format!("Features: {}", listing.features_display());
        let mut wrapped = wrap_to_width(&features, width.max(1));
        if wrapped.len() > FEATURE_LINES {
            wrapped.truncate(FEATURE_LINES);
            if let Some(last) = wrapped.last_mut() {
                *last = truncate_to_width(&format!("{last} …"), width);
            }
        }
        lines.extend(wrapped.into_iter().map(|line| Line::from(Span::styled(line, theme.text_secondary_style()))));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body_area);

        let [book_now, _, details] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)]).areas(buttons_area);
        for (action, button_area, button_type) in [
            (CardAction::BookNow, book_now, ButtonType::Primary),
            (CardAction::Details, details, ButtonType::Secondary),
        ] {
            let focused = selected == Some(action);
            render_button(
                frame,
                button_area,
                action.label(),
                theme,
                ButtonRenderOptions::new(focused, focused, Borders::NONE, button_type),
            );
        }

        CardHitArea {
            position: 0,
            card: area,
            book_now,
            details,
        }
    }
}

impl Component for ResultsComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let len = app.market.visible_len();
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
            }
            KeyCode::BackTab => {
                app.focus.prev();
            }
            KeyCode::Right => app.results.select_next(len),
            KeyCode::Left => app.results.select_prev(),
            KeyCode::Down => app.results.select_below(len),
            KeyCode::Up => {
                if !app.results.select_above()
                    && let Some(flag) = app.nav_bar.category_flag(app.nav_bar.selected).cloned()
                {
                    app.focus.focus(&flag);
                }
            }
            KeyCode::Home => app.results.selected = 0,
            KeyCode::End => app.results.selected = len.saturating_sub(1),
            KeyCode::Char(' ') => app.results.toggle_button(),
            KeyCode::Char('b') => return Self::activate(app, CardAction::BookNow),
            KeyCode::Char('d') => return Self::activate(app, CardAction::Details),
            KeyCode::Enter => {
                let action = app.results.button;
                return Self::activate(app, action);
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let Some(hit) = app.results.hit_test(mouse.column, mouse.row).copied() else {
            return Vec::new();
        };
        app.results.selected = hit.position;
        app.focus.focus(&app.results);
        match hit.button_at(mouse.column, mouse.row) {
            Some(action) => {
                app.results.button = action;
                Self::activate(app, action)
            }
            None => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let focused = app.results.container_focus.get();
        let title = format!("Filtered Results ({})", app.market.visible_len());
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some(&title), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        app.results.last_area = area;
        app.results.card_areas.clear();

        let len = app.market.visible_len();
        if len == 0 {
            let [_, message_area, _] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
            frame.render_widget(Paragraph::new(EMPTY_RESULTS_TEXT).centered().style(theme.text_muted_style()), message_area);
            return;
        }

        let columns = card_columns(inner.width);
        app.results.columns = columns;
        app.results.clamp(len);
        let visible_rows = usize::from(inner.height / CARD_HEIGHT).max(1);
        app.results.ensure_visible(visible_rows);

        let rows = self.get_preferred_layout(app, inner);
        let column_constraints = vec![Constraint::Ratio(1, columns as u32); columns];
        let first = app.results.scroll_row * columns;
        let listings: Vec<&Listing> = app.market.visible().skip(first).collect();
        let mut card_areas = Vec::new();
        for (row_idx, row_area) in rows.iter().enumerate() {
            let cells = Layout::horizontal(column_constraints.clone()).spacing(1).split(*row_area);
            for (col_idx, cell) in cells.iter().enumerate() {
                let offset = row_idx * columns + col_idx;
                let Some(listing) = listings.get(offset) else {
                    break;
                };
                let position = first + offset;
                let selected = (focused && position == app.results.selected).then_some(app.results.button);
                let mut hit = Self::render_card(frame, *cell, listing, theme, selected);
                hit.position = position;
                card_areas.push(hit);
            }
        }
        app.results.card_areas = card_areas;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(
            &*app.ctx.theme,
            &[(" ←/→/↑/↓", " Select card "), (" Space", " Switch button "), (" Enter", " Activate ")],
        )
    }

    /// One area per card row that fits into `area`.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        let rows = (area.height / CARD_HEIGHT).max(1);
        (0..rows)
            .map(|row| Rect {
                y: area.y + row * CARD_HEIGHT,
                height: CARD_HEIGHT.min(area.height.saturating_sub(row * CARD_HEIGHT)),
                ..area
            })
            .collect()
    }
}
