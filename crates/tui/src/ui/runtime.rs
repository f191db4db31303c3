//! Runtime: terminal lifecycle, the event loop and effect execution.
//!
//! - A dedicated input thread blocks on `crossterm::event::read()` and
//!   forwards events over a Tokio channel.
//! - The loop `select!`s over input, a status ticker and Ctrl+C, routes input
//!   through [`MainView`] and executes the returned [`Effect`]s.
//! - Focus is rebuilt right before each frame so panel open/close is
//!   reflected in the focus ring.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use localmarket_types::{Effect, Listing, Msg};
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::TuiOptions;
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::main_component::MainView;

const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Spawns the blocking input thread. Mouse moves are dropped; nothing in the
/// UI tracks hover.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if event.as_mouse_event().is_some_and(|mouse| mouse.kind == MouseEventKind::Moved) {
                        continue;
                    }
                    if let Err(error) = sender.blocking_send(event) {
                        debug!("input channel closed: {}", error);
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read event: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    app.rebuild_focus();
    if app.focus.focused().is_none() {
        main_view.restore_focus(app);
    }
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Executes effects. Returns `false` once the app should exit.
fn process_effects(app: &mut App, main_view: &mut MainView, effects: Vec<Effect>) -> bool {
    for effect in effects {
        match effect {
            Effect::Quit => return false,
            Effect::FocusPanel => {
                main_view.remember_focus(app);
                app.focus_panel();
            }
            Effect::RestoreFocus => {
                app.rebuild_focus();
                main_view.restore_focus(app);
            }
            Effect::PersistCategory(category) => app.persist_category(category),
        }
    }
    true
}

/// Stores the theme chosen with `--theme` once it resolved to a real entry.
fn persist_requested_theme(app: &App, options: &TuiOptions) {
    let Some(requested) = options.theme.as_deref() else {
        return;
    };
    let resolved = crate::ui::theme::catalog::resolve(requested).map(|definition| definition.id);
    if resolved != Some(app.ctx.active_theme_id) {
        return;
    }
    if let Err(error) = app.ctx.preferences.set_preferred_theme(Some(app.ctx.active_theme_id.to_string())) {
        warn!(%error, "failed to persist preferred theme");
    }
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop and restores the terminal on exit.
pub async fn run_app(store: Arc<[Listing]>, options: TuiOptions) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut main_view = MainView::new();
    let mut app = App::new(store, &options);
    persist_requested_theme(&app, &options);
    info!(
        category = %app.market.category(),
        theme = app.ctx.active_theme_id,
        listings = app.market.store().len(),
        "starting local market tui"
    );

    let mut terminal = setup_terminal()?;
    let mut ticker = time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(&mut terminal, &mut app, &mut main_view)?;
    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();

    loop {
        let mut needs_render = false;
        let effects = tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                needs_render = true;
                handle_input_event(&mut app, &mut main_view, event)
            }
            _ = ticker.tick() => {
                let had_status = app.status.is_some();
                let effects = main_view.handle_message(&mut app, Msg::Tick);
                needs_render = had_status != app.status.is_some();
                effects
            }
            _ = signal::ctrl_c() => { break; }
        };

        if !effects.is_empty() {
            needs_render = true;
            if !process_effects(&mut app, &mut main_view, effects) {
                break;
            }
        }

        // Some terminals drop resize notifications; poll the size as a fallback.
        if let Ok((width, height)) = crossterm::terminal::size()
            && last_size != Some((width, height))
        {
            last_size = Some((width, height));
            app.update(&Msg::Resize(width, height));
            needs_render = true;
        }

        if needs_render {
            render(&mut terminal, &mut app, &mut main_view)?;
        }
    }

    info!("local market tui exiting");
    cleanup_terminal(&mut terminal)?;
    Ok(())
}
