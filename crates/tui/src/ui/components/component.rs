//! Component system for the Local Market TUI.
//!
//! Components are self-contained UI elements: they interpret input for their
//! area, mutate `App` state through `App::update`, render themselves into a
//! provided `Rect`, and report side effects back to the runtime as `Effect`s.

use crossterm::event::{KeyEvent, MouseEvent};
use localmarket_types::{Effect, Msg};
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;

/// A UI component with its own event handling and rendering.
///
/// All handlers default to doing nothing so components only implement what
/// they care about.
pub(crate) trait Component {
    /// Handle an application-level message.
    fn handle_message(&mut self, _app: &mut App, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events; components hit-test against their last rendered areas.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render into `rect`.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hint bar while this component is focused.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Sub-areas the component lays itself out into.
    fn get_preferred_layout(&self, _app: &App, _area: Rect) -> Vec<Rect> {
        Vec::new()
    }
}

/// Returns the index of the area containing `(x, y)`, if the point is inside
/// `container` at all.
pub(crate) fn find_target_index_by_mouse_position(container: &Rect, areas: &[Rect], x: u16, y: u16) -> Option<usize> {
    if !container.contains((x, y).into()) {
        return None;
    }
    areas.iter().position(|area| area.contains((x, y).into()))
}
