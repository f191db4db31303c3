//! Top-level view: lays out the nav bar, the results grid and the hint bar,
//! overlays the filter panel while it is open, and routes input to whichever
//! region owns it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use localmarket_types::{Category, Effect, FilterAction, Msg};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::ui::components::{Component, FilterPanelComponent, NavBarComponent, ResultsComponent, filter_panel::PANEL_WIDTH};
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::{right_aligned_rect, without_bottom_rows};

const NAV_BAR_HEIGHT: u16 = 3;
const HINT_BAR_HEIGHT: u16 = 1;

#[derive(Debug, Default)]
pub struct MainView {
    nav_bar_view: NavBarComponent,
    results_view: ResultsComponent,
    filter_panel_view: FilterPanelComponent,
    /// Widget focused before the panel opened
    transient_focus_id: Option<usize>,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves the current focus so it can be restored when the panel closes.
    pub fn remember_focus(&mut self, app: &App) {
        self.transient_focus_id = app.focus.focused().map(|focus| focus.widget_id());
    }

    pub fn restore_focus(&mut self, app: &mut App) {
        if app.market.is_panel_open() {
            app.focus.first();
            return;
        }
        match self.transient_focus_id.take() {
            Some(id) => app.focus.by_widget_id(id),
            None => app.focus_selected_tab(),
        }
        if app.focus.focused().is_none() {
            app.focus_selected_tab();
        }
    }

    fn category_shortcut(key: &KeyEvent) -> Option<Category> {
        if !key.modifiers.is_empty() && key.modifiers != KeyModifiers::SHIFT {
            return None;
        }
        match key.code {
            KeyCode::Char('1') => Some(Category::Tours),
            KeyCode::Char('2') => Some(Category::Tickets),
            KeyCode::Char('3') => Some(Category::Rent),
            KeyCode::Char('4') => Some(Category::Transfer),
            _ => None,
        }
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        app.update(&msg)
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.market.is_panel_open() {
            return self.filter_panel_view.handle_key_events(app, key);
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => return vec![Effect::Quit],
            KeyCode::Char('f') if key.modifiers.is_empty() => return app.update(&Msg::Filter(FilterAction::OpenPanel)),
            _ => {}
        }
        if let Some(category) = Self::category_shortcut(&key) {
            let effects = app.update(&Msg::Filter(FilterAction::SelectCategory(category)));
            app.focus_selected_tab();
            return effects;
        }

        if app.nav_bar.container_focus.get() {
            return self.nav_bar_view.handle_key_events(app, key);
        }
        self.results_view.handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if app.market.is_panel_open() {
            return self.filter_panel_view.handle_mouse_events(app, mouse);
        }
        let mut effects = self.nav_bar_view.handle_mouse_events(app, mouse);
        effects.extend(self.results_view.handle_mouse_events(app, mouse));
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let background = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(background, area);

        let layout = self.get_preferred_layout(app, area);
        self.nav_bar_view.render(frame, layout[0], app);
        self.results_view.render(frame, layout[1], app);

        if app.market.is_panel_open() {
            frame.render_widget(Block::default().style(app.ctx.theme.modal_background_style()).dim(), frame.area());
            let panel_area = right_aligned_rect(PANEL_WIDTH, without_bottom_rows(area, HINT_BAR_HEIGHT));
            self.filter_panel_view.render(frame, panel_area, app);
        }

        let [hints_area, status_area] = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(layout[2]);
        let hints = Paragraph::new(Line::from(self.get_hint_spans(app))).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints, hints_area);
        if let Some(status) = app.status_text() {
            let status = Paragraph::new(status.to_string())
                .right_aligned()
                .style(app.ctx.theme.status_success());
            frame.render_widget(status, status_area);
        } else if app.ctx.debug_enabled {
            let summary = format!(
                "{}/{} listings · {} filters · theme {}",
                app.market.visible_len(),
                app.market.store().len(),
                app.market.filters().len(),
                app.ctx.active_theme_id
            );
            let summary = Paragraph::new(summary).right_aligned().style(app.ctx.theme.text_muted_style());
            frame.render_widget(summary, status_area);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];
        if app.market.is_panel_open() {
            hint_spans.extend(self.filter_panel_view.get_hint_spans(app));
            return hint_spans;
        }
        if app.nav_bar.container_focus.get() {
            hint_spans.extend(self.nav_bar_view.get_hint_spans(app));
        } else {
            hint_spans.extend(self.results_view.get_hint_spans(app));
        }
        hint_spans.extend(th::build_hint_spans(
            &*app.ctx.theme,
            &[(" f", " Filters "), (" 1-4", " Category "), (" q", " Quit ")],
        ));
        hint_spans
    }

    /// Nav bar, results and the hint bar stacked vertically.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(NAV_BAR_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(HINT_BAR_HEIGHT),
        ])
        .split(area)
        .to_vec()
    }
}
