use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers.
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for the top navigation bar (filled brand color).
pub fn nav_bar_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { accent_primary, .. } = *theme.roles();
    Style::default().bg(accent_primary).fg(Color::White)
}

/// Style for input fields; caller sets the block border based on focus.
pub fn input_style<T: Theme + ?Sized>(theme: &T, focused: bool) -> Style {
    let ThemeRoles { surface_muted, text, .. } = *theme.roles();
    let style = Style::default().bg(surface_muted).fg(text);
    if focused { style.add_modifier(Modifier::BOLD) } else { style }
}

/// Filled chip used for selected choice options.
pub fn chip_style<T: Theme + ?Sized>(theme: &T, selected: bool, highlighted: bool) -> Style {
    let roles = theme.roles();
    let mut style = if selected {
        Style::default().bg(roles.accent_primary).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(roles.surface_muted).fg(roles.text_secondary)
    };
    if highlighted {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

/// Primary button style (filled accent background).
pub fn button_primary_style<T: Theme + ?Sized>(theme: &T, focused: bool) -> Style {
    let ThemeRoles {
        accent_primary,
        selection_bg,
        text,
        ..
    } = *theme.roles();
    let bg = if focused { selection_bg } else { accent_primary };
    Style::default().bg(bg).fg(text).add_modifier(Modifier::BOLD)
}

/// Secondary button style (outline-like, relies on border color in Block).
pub fn button_secondary_style<T: Theme + ?Sized>(theme: &T, selected: bool) -> Style {
    let ThemeRoles {
        accent_secondary,
        selection_bg,
        ..
    } = *theme.roles();
    let style = Style::default().fg(accent_secondary);
    if selected { style.bg(selection_bg) } else { style }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonType {
    Primary,
    Secondary,
}

/// Rendering switches for [`render_button`].
#[derive(Debug, Clone, Copy)]
pub struct ButtonRenderOptions {
    pub focused: bool,
    pub selected: bool,
    pub borders: Borders,
    pub button_type: ButtonType,
}

impl ButtonRenderOptions {
    pub fn new(focused: bool, selected: bool, borders: Borders, button_type: ButtonType) -> Self {
        Self {
            focused,
            selected,
            borders,
            button_type,
        }
    }
}

/// Renders a standard button.
pub fn render_button<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, theme: &T, options: ButtonRenderOptions) {
    let button_style = match options.button_type {
        ButtonType::Primary => button_primary_style(theme, options.focused),
        ButtonType::Secondary => button_secondary_style(theme, options.selected || options.focused),
    };
    // Borderless buttons take a one-row vertical pad so they line up with bordered ones.
    let padding = if options.borders.is_empty() && area.height >= 3 {
        Padding::vertical(1)
    } else {
        Padding::ZERO
    };

    frame.render_widget(
        Paragraph::new(label)
            .centered()
            .block(
                Block::bordered()
                    .borders(options.borders)
                    .border_type(BorderType::Rounded)
                    .border_style(theme.border_style(options.focused))
                    .padding(padding),
            )
            .style(button_style),
        area,
    );
}

/// Builds `key description` pairs for the hint bar.
pub fn build_hint_spans<T: Theme + ?Sized>(theme: &T, hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    hints
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(*key, theme.accent_emphasis_style()),
                Span::styled(*description, theme.text_muted_style()),
            ]
        })
        .collect()
}
