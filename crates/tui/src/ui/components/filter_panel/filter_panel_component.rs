use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use localmarket_types::{Effect, Facet, FacetDescriptor, FilterAction, FilterValue, Msg, format_price};
use localmarket_util::{format_minutes_12h, parse_minutes, truncate_to_width};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::state::{FacetControl, PanelButton, PanelHit};
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::{
    Theme,
    theme_helpers::{self as th, ButtonRenderOptions, ButtonType, render_button},
};

/// Preferred width of the slide-over panel in cells.
pub const PANEL_WIDTH: u16 = 50;
/// Slider step for time ranges, in minutes.
const TIME_STEP_MINUTES: u32 = 15;
/// Numeric sliders move in hundredths of their range.
const NUMERIC_STEPS: f64 = 100.0;
const BUTTON_ROW_HEIGHT: u16 = 3;

#[derive(Debug, Default)]
pub struct FilterPanelComponent;

fn dispatch(app: &mut App, action: FilterAction) -> Vec<Effect> {
    app.update(&Msg::Filter(action))
}

/// Emits the current text of an input, or clears the facet once it is empty.
fn dispatch_input(app: &mut App, idx: usize) -> Vec<Effect> {
    let Some(control) = app.filter_panel.controls.get(idx) else {
        return Vec::new();
    };
    let key = control.key().to_string();
    let action = if control.input.is_empty() {
        FilterAction::ClearFacet(key)
    } else {
        FilterAction::SetFacetValue {
            key,
            value: FilterValue::text(control.input.input()),
        }
    };
    dispatch(app, action)
}

/// Chip label for a choice option: `Adventure (1)` or `[x] Transfer (0)`.
fn chip_label(option: &str, count: Option<usize>, multiple: bool, selected: bool) -> String {
    let mark = match (multiple, selected) {
        (true, true) => "[x] ",
        (true, false) => "[ ] ",
        (false, _) => "",
    };
    match count {
        Some(count) => format!(" {mark}{option} ({count}) "),
        None => format!(" {mark}{option} "),
    }
}

/// Packs chip widths into lines of at most `width` cells, one cell apart.
fn pack_chips(widths: &[u16], width: u16) -> Vec<Vec<usize>> {
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut used = 0u16;
    for (idx, chip_width) in widths.iter().enumerate() {
        let needed = if used == 0 { *chip_width } else { chip_width.saturating_add(1) };
        match lines.last_mut() {
            Some(line) if used.saturating_add(needed) <= width => {
                line.push(idx);
                used = used.saturating_add(needed);
            }
            _ => {
                lines.push(vec![idx]);
                used = *chip_width;
            }
        }
    }
    lines
}

/// Slider track with the knob at `fraction` of the width.
fn slider_track(fraction: f64, width: u16) -> (String, String, String) {
    let width = usize::from(width.max(1));
    let knob = ((fraction.clamp(0.0, 1.0)) * (width - 1) as f64).round() as usize;
    ("━".repeat(knob), "●".to_string(), "─".repeat(width - 1 - knob))
}

impl FilterPanelComponent {
    pub fn new() -> Self {
        Self
    }

    fn chip_labels(app: &App, facet: &Facet) -> Vec<String> {
        let FacetDescriptor::Choice { options, multiple } = &facet.descriptor else {
            return Vec::new();
        };
        let counts = app.market.facet_counts(facet);
        options
            .iter()
            .map(|option| {
                let count = counts.iter().find(|(o, _)| o == option).map(|(_, c)| *c);
                let selected = app.market.filters().is_selected(facet.key, option);
                chip_label(option, count, *multiple, selected)
            })
            .collect()
    }

    /// Rows one control occupies at `width`, including the trailing spacer.
    fn control_height(app: &App, control: &FacetControl, width: u16) -> u16 {
        match &control.facet.descriptor {
            FacetDescriptor::Choice { .. } => {
                let widths: Vec<u16> = Self::chip_labels(app, control.facet)
                    .iter()
                    .map(|label| u16::try_from(label.width()).unwrap_or(u16::MAX))
                    .collect();
                let lines = u16::try_from(pack_chips(&widths, width).len()).unwrap_or(u16::MAX);
                2 + lines
            }
            FacetDescriptor::NumericRange { .. } | FacetDescriptor::TimeRange { .. } => 4,
            FacetDescriptor::FreeText { .. } => 3,
        }
    }

    fn handle_choice_key(app: &mut App, idx: usize, key: KeyEvent) -> Vec<Effect> {
        let Some(control) = app.filter_panel.controls.get_mut(idx) else {
            return Vec::new();
        };
        let facet = control.facet;
        let FacetDescriptor::Choice { options, multiple } = &facet.descriptor else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Left => control.cursor = control.cursor.saturating_sub(1),
            KeyCode::Right => control.cursor = (control.cursor + 1).min(options.len().saturating_sub(1)),
            KeyCode::Home => control.cursor = 0,
            KeyCode::End => control.cursor = options.len().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let Some(option) = options.get(control.cursor) else {
                    return Vec::new();
                };
                return Self::select_option(app, facet, option, *multiple);
            }
            KeyCode::Backspace | KeyCode::Delete => return dispatch(app, FilterAction::ClearFacet(facet.key.to_string())),
            _ => {}
        }
        Vec::new()
    }

    /// Choosing the selected option again clears a single-choice facet.
    fn select_option(app: &mut App, facet: &Facet, option: &str, multiple: bool) -> Vec<Effect> {
        let action = if multiple {
            FilterAction::ToggleFeature(option.to_string())
        } else if app.market.filters().is_selected(facet.key, option) {
            FilterAction::ClearFacet(facet.key.to_string())
        } else {
            FilterAction::SetFacetValue {
                key: facet.key.to_string(),
                value: FilterValue::text(option),
            }
        };
        dispatch(app, action)
    }

    fn handle_input_key(app: &mut App, idx: usize, key: KeyEvent) -> Vec<Effect> {
        let Some(control) = app.filter_panel.controls.get_mut(idx) else {
            return Vec::new();
        };
        let facet = control.facet;
        match (&facet.descriptor, key.code) {
            (FacetDescriptor::NumericRange { min, max }, KeyCode::Left | KeyCode::Right) => {
                let step = ((max - min) / NUMERIC_STEPS).max(1.0);
                let current = app.market.filters().get(facet.key).and_then(FilterValue::as_number).unwrap_or(*max);
                let next = if key.code == KeyCode::Left { current - step } else { current + step };
                dispatch(
                    app,
                    FilterAction::SetFacetValue {
                        key: facet.key.to_string(),
                        value: FilterValue::Number(next.clamp(*min, *max)),
                    },
                )
            }
            (FacetDescriptor::TimeRange { min, max }, KeyCode::Left | KeyCode::Right) => {
                let current = app
                    .market
                    .filters()
                    .get(facet.key)
                    .and_then(FilterValue::as_text)
                    .and_then(parse_minutes)
                    .unwrap_or(*max);
                let next = if key.code == KeyCode::Left {
                    current.saturating_sub(TIME_STEP_MINUTES).max(*min)
                } else {
                    current.saturating_add(TIME_STEP_MINUTES).min(*max)
                };
                dispatch(app, FilterAction::SetTimeFromMinutes(next))
            }
            (FacetDescriptor::FreeText { .. }, KeyCode::Left) => {
                control.input.move_left();
                Vec::new()
            }
            (FacetDescriptor::FreeText { .. }, KeyCode::Right) => {
                control.input.move_right();
                Vec::new()
            }
            (_, KeyCode::Home) => {
                control.input.move_home();
                Vec::new()
            }
            (_, KeyCode::End) => {
                control.input.move_end();
                Vec::new()
            }
            (_, KeyCode::Backspace) => {
                control.input.backspace();
                dispatch_input(app, idx)
            }
            (_, KeyCode::Delete) => {
                control.input.delete();
                dispatch_input(app, idx)
            }
            (descriptor, KeyCode::Char(c)) if accepts_char(descriptor, c) => {
                control.input.insert_char(c);
                dispatch_input(app, idx)
            }
            _ => Vec::new(),
        }
    }

    fn press_button(app: &mut App, button: PanelButton) -> Vec<Effect> {
        match button {
            PanelButton::Reset => dispatch(app, FilterAction::Reset),
            PanelButton::Search => dispatch(app, FilterAction::ClosePanel),
        }
    }

    fn render_control(frame: &mut Frame, area: Rect, app: &App, idx: usize, control: &FacetControl) -> Vec<(Rect, PanelHit)> {
        let theme = &*app.ctx.theme;
        let focused = control.focus.get();
        let mut hits = vec![(area, PanelHit::Control(idx))];
        let title_style = if focused {
            theme.accent_emphasis_style()
        } else {
            theme.text_secondary_style().add_modifier(Modifier::BOLD)
        };
        let marker = if focused { "▸ " } else { "  " };
        let mut title = vec![Span::styled(marker, theme.accent_primary_style()), Span::styled(control.title(), title_style)];
        let value = app.market.filters().get(control.key());

        let body = Rect {
            x: area.x + 2,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(1),
        };
        match &control.facet.descriptor {
            FacetDescriptor::Choice { .. } => {
                let labels = Self::chip_labels(app, control.facet);
                let widths: Vec<u16> = labels.iter().map(|l| u16::try_from(l.width()).unwrap_or(u16::MAX)).collect();
                for (line_idx, line) in pack_chips(&widths, body.width).iter().enumerate() {
                    let y = body.y + u16::try_from(line_idx).unwrap_or(u16::MAX);
                    if y >= body.bottom() {
                        break;
                    }
                    let mut x = body.x;
                    for &option in line {
                        let width = widths[option].min(body.right().saturating_sub(x));
                        let chip_area = Rect::new(x, y, width, 1);
                        let selected = control.facet.descriptor.options().get(option).is_some_and(|o| app.market.filters().is_selected(control.key(), o));
                        let style = th::chip_style(theme, selected, focused && control.cursor == option);
                        frame.render_widget(Paragraph::new(labels[option].as_str()).style(style), chip_area);
                        hits.push((chip_area, PanelHit::Option { control: idx, option }));
                        x = x.saturating_add(width + 1);
                    }
                }
            }
            FacetDescriptor::NumericRange { min, max } => {
                let current = value.and_then(FilterValue::as_number);
                let shown = current.map(|n| format!("≤ {}", format_price(n))).unwrap_or_else(|| "Any".to_string());
                title.push(Span::styled(format!("  {shown}"), theme.text_muted_style()));
                let fraction = current.map(|n| (n - min) / (max - min)).unwrap_or(1.0);
                Self::render_slider(frame, body, theme, fraction);
                Self::render_input(frame, row_below(body, 1), theme, control, focused, &format!("max {}", format_price(*max)));
            }
            FacetDescriptor::TimeRange { min, max } => {
                let current = value.and_then(FilterValue::as_text).and_then(parse_minutes);
                let shown = current.map(|m| format!("≤ {}", format_minutes_12h(m))).unwrap_or_else(|| "Any".to_string());
                title.push(Span::styled(format!("  {shown}"), theme.text_muted_style()));
                let span = f64::from(max.saturating_sub(*min).max(1));
                let fraction = current.map(|m| f64::from(m.saturating_sub(*min)) / span).unwrap_or(1.0);
                Self::render_slider(frame, body, theme, fraction);
                Self::render_input(frame, row_below(body, 1), theme, control, focused, "HH:MM");
            }
            FacetDescriptor::FreeText { placeholder } => {
                Self::render_input(frame, row_below(body, 0), theme, control, focused, placeholder);
            }
        }
        frame.render_widget(Paragraph::new(Line::from(title)), Rect { height: 1, ..area });
        hits
    }

    fn render_slider(frame: &mut Frame, body: Rect, theme: &dyn Theme, fraction: f64) {
        if body.height == 0 {
            return;
        }
        let (filled, knob, rest) = slider_track(fraction, body.width);
        let line = Line::from(vec![
            Span::styled(filled, theme.accent_primary_style()),
            Span::styled(knob, theme.accent_emphasis_style()),
            Span::styled(rest, theme.text_muted_style()),
        ]);
        frame.render_widget(Paragraph::new(line), Rect { height: 1, ..body });
    }

    fn render_input(frame: &mut Frame, row: Option<Rect>, theme: &dyn Theme, control: &FacetControl, focused: bool, placeholder: &str) {
        let Some(row) = row.filter(|row| row.width > 0) else {
            return;
        };
        let width = usize::from(row.width);
        let paragraph = if control.input.input().is_empty() {
            Paragraph::new(truncate_to_width(placeholder, width)).style(th::input_style(theme, focused).patch(theme.text_muted_style()))
        } else {
            Paragraph::new(truncate_to_width(control.input.input(), width)).style(th::input_style(theme, focused))
        };
        frame.render_widget(paragraph, row);
        if focused {
            let column = control.input.cursor_column().min(row.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(row.x + column, row.y));
        }
    }
}

/// The single row `offset` rows into `body`, if `body` is tall enough.
fn row_below(body: Rect, offset: u16) -> Option<Rect> {
    (offset < body.height).then(|| Rect {
        y: body.y + offset,
        height: 1,
        ..body
    })
}

/// Which typed characters an input accepts.
fn accepts_char(descriptor: &FacetDescriptor, c: char) -> bool {
    match descriptor {
        FacetDescriptor::NumericRange { .. } => c.is_ascii_digit() || c == '.',
        FacetDescriptor::TimeRange { .. } => c.is_ascii_digit() || matches!(c, ':' | ' ' | 'a' | 'A' | 'p' | 'P' | 'm' | 'M'),
        FacetDescriptor::FreeText { .. } => !c.is_control(),
        FacetDescriptor::Choice { .. } => false,
    }
}

impl Component for FilterPanelComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Esc {
            return dispatch(app, FilterAction::ClosePanel);
        }
        if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return dispatch(app, FilterAction::Reset);
        }
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                return Vec::new();
            }
            KeyCode::Down | KeyCode::Up => {
                if let Some(flag) = app.filter_panel.cycle_focus(key.code == KeyCode::Down) {
                    app.focus.focus(&flag);
                }
                return Vec::new();
            }
            _ => {}
        }

        if let Some(button) = app.filter_panel.focused_button() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => Self::press_button(app, button),
                KeyCode::Left | KeyCode::Right => {
                    let other = match button {
                        PanelButton::Reset => PanelButton::Search,
                        PanelButton::Search => PanelButton::Reset,
                    };
                    let flag = app.filter_panel.button_flag(other).clone();
                    app.focus.focus(&flag);
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }

        let Some(idx) = app.filter_panel.focused_control() else {
            return Vec::new();
        };
        let has_input = app.filter_panel.controls.get(idx).is_some_and(FacetControl::has_input);
        if has_input {
            Self::handle_input_key(app, idx, key)
        } else {
            Self::handle_choice_key(app, idx, key)
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let panel_area = app.filter_panel.last_area;
        let inside = panel_area.contains((mouse.column, mouse.row).into());
        match mouse.kind {
            MouseEventKind::ScrollDown if inside => {
                let last = app.filter_panel.controls.len().saturating_sub(1);
                app.filter_panel.scroll = (app.filter_panel.scroll + 1).min(last);
                Vec::new()
            }
            MouseEventKind::ScrollUp if inside => {
                app.filter_panel.scroll = app.filter_panel.scroll.saturating_sub(1);
                Vec::new()
            }
            // Clicking the dimmed backdrop dismisses the panel.
            MouseEventKind::Down(MouseButton::Left) if !inside => dispatch(app, FilterAction::ClosePanel),
            MouseEventKind::Down(MouseButton::Left) => match app.filter_panel.hit_test(mouse.column, mouse.row) {
                Some(PanelHit::Button(button)) => {
                    let flag = app.filter_panel.button_flag(button).clone();
                    app.focus.focus(&flag);
                    Self::press_button(app, button)
                }
                Some(PanelHit::Option { control, option }) => {
                    let Some(state) = app.filter_panel.controls.get_mut(control) else {
                        return Vec::new();
                    };
                    state.cursor = option;
                    let flag = state.focus.clone();
                    let facet = state.facet;
                    app.focus.focus(&flag);
                    match facet.descriptor.options().get(option) {
                        Some(choice) => Self::select_option(app, facet, choice, facet.descriptor.is_multi_select()),
                        None => Vec::new(),
                    }
                }
                Some(PanelHit::Control(control)) => {
                    if let Some(flag) = app.filter_panel.controls.get(control).map(|c| c.focus.clone()) {
                        app.focus.focus(&flag);
                    }
                    Vec::new()
                }
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        frame.render_widget(Clear, area);
        let title = format!("Filters · {}", app.market.category());
        let block = th::block(&*app.ctx.theme, Some(&title), true);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        app.filter_panel.last_area = area;

        let layout = self.get_preferred_layout(app, inner);
        let (controls_area, buttons_area) = (layout[0], layout[1]);

        let heights: Vec<u16> = app
            .filter_panel
            .controls
            .iter()
            .map(|control| Self::control_height(app, control, controls_area.width.saturating_sub(2)))
            .collect();
        app.filter_panel.ensure_visible(&heights, controls_area.height);

        let mut hits = Vec::new();
        let mut y = controls_area.y;
        let scroll = app.filter_panel.scroll;
        let mut last_drawn = scroll;
        for (idx, control) in app.filter_panel.controls.iter().enumerate().skip(scroll) {
            let height = heights[idx];
            if y.saturating_add(height) > controls_area.bottom() && idx > scroll {
                break;
            }
            let control_area = Rect {
                y,
                height: height.saturating_sub(1).min(controls_area.bottom().saturating_sub(y)),
                ..controls_area
            };
            hits.extend(Self::render_control(frame, control_area, app, idx, control));
            y = y.saturating_add(height);
            last_drawn = idx;
        }

        let theme = &*app.ctx.theme;
        let more_style = theme.text_muted_style();
        if scroll > 0 {
            frame.render_widget(
                Paragraph::new("▲ more").right_aligned().style(more_style),
                Rect { height: 1, ..controls_area },
            );
        }
        if last_drawn + 1 < app.filter_panel.controls.len() && controls_area.height > 0 {
            frame.render_widget(
                Paragraph::new("▼ more").right_aligned().style(more_style),
                Rect {
                    y: controls_area.bottom() - 1,
                    height: 1,
                    ..controls_area
                },
            );
        }

        let [reset_area, search_area] = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).spacing(2).areas(buttons_area);
        for (button, button_area, button_type) in [
            (PanelButton::Reset, reset_area, ButtonType::Secondary),
            (PanelButton::Search, search_area, ButtonType::Primary),
        ] {
            let focused = app.filter_panel.button_flag(button).get();
            render_button(
                frame,
                button_area,
                button.label(),
                theme,
                ButtonRenderOptions::new(focused, focused, Borders::ALL, button_type),
            );
            hits.push((button_area, PanelHit::Button(button)));
        }
        app.filter_panel.hit_areas = hits;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(
            &*app.ctx.theme,
            &[
                (" Esc", " Close "),
                (" ↑/↓", " Move "),
                (" ←/→", " Adjust "),
                (" Enter", " Select "),
                (" Ctrl+R", " Reset "),
            ],
        )
    }

    /// Controls area on top, the RESET/SEARCH row pinned to the bottom.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([Constraint::Min(0), Constraint::Length(BUTTON_ROW_HEIGHT)])
            .split(area)
            .to_vec()
    }
}
