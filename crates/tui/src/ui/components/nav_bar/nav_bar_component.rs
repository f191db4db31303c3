use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use localmarket_types::{Effect, FilterAction, Msg};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::{APP_TITLE, NavBarState, NavItem};
use crate::app::App;
use crate::ui::components::{Component, find_target_index_by_mouse_position};
use crate::ui::theme::theme_helpers as th;

/// Renders the top bar and maps activation of its items to filter actions.
#[derive(Debug, Default)]
pub struct NavBarComponent;

impl NavBarComponent {
    pub fn new() -> Self {
        Self
    }

    fn activate(app: &mut App, item: NavItem) -> Vec<Effect> {
        let action = match item {
            NavItem::Category(category) => FilterAction::SelectCategory(category),
            NavItem::Filter => FilterAction::OpenPanel,
        };
        app.update(&Msg::Filter(action))
    }

    fn item_style(app: &App, item: NavItem, focused: bool) -> Style {
        let theme = &*app.ctx.theme;
        let mut style = th::nav_bar_style(theme);
        match item {
            NavItem::Category(category) if category == app.nav_bar.selected => {
                style = style.bg(theme.roles().selection_bg).add_modifier(Modifier::BOLD);
            }
            NavItem::Filter => {
                style = Style::default()
                    .bg(Color::White)
                    .fg(theme.roles().accent_primary)
                    .add_modifier(Modifier::BOLD);
            }
            NavItem::Category(_) => {}
        }
        if focused {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

impl Component for NavBarComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
            }
            KeyCode::BackTab => {
                app.focus.prev();
            }
            KeyCode::Right => {
                if let Some(flag) = app.nav_bar.cycle_focus(true) {
                    app.focus.focus(&flag);
                }
            }
            KeyCode::Left => {
                if let Some(flag) = app.nav_bar.cycle_focus(false) {
                    app.focus.focus(&flag);
                }
            }
            KeyCode::Down => {
                app.focus.focus(&app.results);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(item) = app.nav_bar.focused_item() {
                    return Self::activate(app, item);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let NavBarState {
            last_area, per_item_areas, ..
        } = &app.nav_bar;
        let Some(idx) = find_target_index_by_mouse_position(last_area, per_item_areas, mouse.column, mouse.row) else {
            return Vec::new();
        };
        let Some(item) = app.nav_bar.items.get(idx).copied() else {
            return Vec::new();
        };
        if let Some(flag) = app.nav_bar.item_focus_flags.get(idx).cloned() {
            app.focus.focus(&flag);
        }
        Self::activate(app, item)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        frame.render_widget(Block::default().style(th::nav_bar_style(theme)), area);

        let layout = self.get_preferred_layout(app, area);
        let Some((title_area, item_areas)) = layout.split_first() else {
            return;
        };

        let title = Paragraph::new(Line::from(Span::styled(
            APP_TITLE,
            th::nav_bar_style(theme).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::NONE))
        .alignment(Alignment::Left);
        frame.render_widget(title, vertical_middle(*title_area));

        for (idx, (item, item_area)) in app.nav_bar.items.iter().zip(item_areas).enumerate() {
            let focused = app.nav_bar.is_item_focused(idx);
            let style = Self::item_style(app, *item, focused);
            let mut block = Block::default().style(style);
            if focused {
                block = block
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::White));
            }
            let label = Paragraph::new(item.label()).centered().block(block);
            if focused {
                frame.render_widget(label, *item_area);
            } else {
                frame.render_widget(Block::default().style(style), *item_area);
                frame.render_widget(label, vertical_middle(*item_area));
            }
        }

        app.nav_bar.last_area = area;
        app.nav_bar.per_item_areas = item_areas.to_vec();
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(
            &*app.ctx.theme,
            &[(" ←/→", " Navigate "), (" Enter", " Select "), (" ↓", " Results ")],
        )
    }

    /// Title first, then one area per item. Tabs hug the title; the filter
    /// trigger is pinned to the right edge.
    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let title_width = u16::try_from(APP_TITLE.len()).unwrap_or(u16::MAX).saturating_add(2);
        let mut constraints = vec![Constraint::Length(title_width)];
        let mut filter_slot = None;
        for item in &app.nav_bar.items {
            let width = u16::try_from(item.label().len()).unwrap_or(u16::MAX).saturating_add(4);
            if *item == NavItem::Filter {
                constraints.push(Constraint::Fill(1));
                filter_slot = Some(constraints.len());
            }
            constraints.push(Constraint::Length(width));
        }
        let mut areas = Layout::horizontal(constraints).horizontal_margin(1).split(area).to_vec();
        if let Some(spacer) = filter_slot.map(|slot| slot - 1) {
            areas.remove(spacer);
        }
        areas
    }
}

fn vertical_middle(area: Rect) -> Rect {
    if area.height <= 1 {
        return area;
    }
    Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use localmarket_types::{Category, Effect, PanelState};
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn renders_title_tabs_and_filter_trigger() {
        let mut app = App::for_tests();
        let mut component = NavBarComponent::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 3)).expect("terminal");
        terminal
            .draw(|frame| component.render(frame, frame.area(), &mut app))
            .expect("draw");
        let row: String = (0..100)
            .map(|x| terminal.backend().buffer()[(x, 1)].symbol().to_string())
            .collect();
        assert!(row.contains(APP_TITLE));
        for label in ["Tours", "Tickets", "Rent", "Transfer", "Filter"] {
            assert!(row.contains(label), "missing {label} in {row}");
        }
        assert_eq!(app.nav_bar.per_item_areas.len(), 5);
        let filter_area = app.nav_bar.per_item_areas[4];
        assert_eq!(filter_area.right(), 99, "filter trigger hugs the right edge");
    }

    #[test]
    fn enter_on_category_tab_switches_category() {
        let mut app = App::for_tests();
        let mut component = NavBarComponent::new();
        if let Some(flag) = app.nav_bar.category_flag(Category::Transfer).cloned() {
            app.focus.focus(&flag);
        }
        let effects = component.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(app.market.category(), Category::Transfer);
        assert_eq!(app.nav_bar.selected, Category::Transfer);
        assert_eq!(effects, vec![Effect::PersistCategory(Category::Transfer)]);
    }

    #[test]
    fn filter_trigger_opens_panel() {
        let mut app = App::for_tests();
        let mut component = NavBarComponent::new();
        if let Some(flag) = app.nav_bar.filter_flag().cloned() {
            app.focus.focus(&flag);
        }
        let effects = component.handle_key_events(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.market.panel(), PanelState::Open);
        assert_eq!(effects, vec![Effect::FocusPanel]);
    }

    #[test]
    fn right_arrow_walks_the_bar() {
        let mut app = App::for_tests();
        let mut component = NavBarComponent::new();
        if let Some(flag) = app.nav_bar.category_flag(Category::Tours).cloned() {
            app.focus.focus(&flag);
        }
        component.handle_key_events(&mut app, key(KeyCode::Right));
        assert_eq!(app.nav_bar.focused_item(), Some(NavItem::Category(Category::Tickets)));
        component.handle_key_events(&mut app, key(KeyCode::Left));
        component.handle_key_events(&mut app, key(KeyCode::Left));
        assert_eq!(app.nav_bar.focused_item(), Some(NavItem::Filter));
    }
}
