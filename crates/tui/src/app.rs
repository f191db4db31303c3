//! Application state and update logic.
//!
//! `App` owns the filter controller state plus the per-component UI state
//! (nav bar, filter panel, results grid) and the rat-focus tree spanning
//! them. Every filter edit goes through [`App::update`], which runs the
//! reducer and then re-syncs the component state that mirrors it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use localmarket_engine::{MarketState, reduce};
use localmarket_types::{CardAction, Category, Effect, FilterAction, Listing, Msg};
use localmarket_util::UserPreferences;
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::TuiOptions;
use crate::ui::components::{FilterPanelState, NavBarState, ResultsState};
use crate::ui::theme::{self, Theme};

/// How long a status message stays in the hint bar.
const STATUS_TTL: Duration = Duration::from_secs(5);

/// Cross-cutting context shared by all components.
pub struct SharedCtx {
    /// Active UI theme
    pub theme: Box<dyn Theme>,
    /// Canonical identifier of the active theme
    pub active_theme_id: &'static str,
    /// Global debug flag (from env)
    pub debug_enabled: bool,
    /// Persisted user preferences
    pub preferences: Arc<UserPreferences>,
}

impl SharedCtx {
    pub fn new(requested_theme: Option<&str>, preferences: Arc<UserPreferences>) -> Self {
        let debug_enabled = std::env::var("DEBUG")
            .map(|v| !v.is_empty() && v != "0" && v.to_lowercase() != "false")
            .unwrap_or(false);
        let loaded = theme::load(requested_theme, preferences.preferred_theme().as_deref());
        Self {
            theme: loaded.theme,
            active_theme_id: loaded.definition.id,
            debug_enabled,
            preferences,
        }
    }
}

/// A transient message shown at the right edge of the hint bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub posted_at: Instant,
}

pub struct App {
    pub ctx: SharedCtx,
    /// Filter controller state; replaced wholesale on every transition
    pub market: MarketState,
    pub nav_bar: NavBarState,
    pub filter_panel: FilterPanelState,
    pub results: ResultsState,
    pub status: Option<StatusMessage>,
    /// Focus tree; rebuilt before every render
    pub focus: Focus,
    root_focus: FocusFlag,
}

impl App {
    pub fn new(store: Arc<[Listing]>, options: &TuiOptions) -> Self {
        let ctx = SharedCtx::new(options.theme.as_deref(), Arc::clone(&options.preferences));
        let category = options
            .category
            .or_else(|| ctx.preferences.default_category())
            .unwrap_or_default();
        Self::with_ctx(ctx, MarketState::new(store, category))
    }

    fn with_ctx(ctx: SharedCtx, market: MarketState) -> Self {
        let category = market.category();
        let mut app = Self {
            ctx,
            nav_bar: NavBarState::new(category),
            filter_panel: FilterPanelState::new(category, market.filters()),
            results: ResultsState::default(),
            market,
            status: None,
            focus: Focus::default(),
            root_focus: FocusFlag::named("root"),
        };
        app.focus = FocusBuilder::build_for(&app);
        if let Some(flag) = app.nav_bar.category_flag(category).cloned() {
            app.focus.focus(&flag);
        }
        app
    }

    /// Applies a message and returns the effects the runtime must execute.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                if self.status.as_ref().is_some_and(|status| status.posted_at.elapsed() >= STATUS_TTL) {
                    self.status = None;
                }
                Vec::new()
            }
            Msg::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                Vec::new()
            }
            Msg::Filter(action) => self.apply_filter(action),
            Msg::CardAction { listing_id, action } => {
                self.record_card_action(*listing_id, *action);
                Vec::new()
            }
        }
    }

    fn apply_filter(&mut self, action: &FilterAction) -> Vec<Effect> {
        self.market = reduce(&self.market, action);
        self.filter_panel.sync(self.market.category(), self.market.filters());
        self.results.clamp(self.market.visible_len());
        match action {
            FilterAction::SelectCategory(category) => {
                self.nav_bar.selected = *category;
                self.results.reset();
                vec![Effect::PersistCategory(*category)]
            }
            FilterAction::Reset => {
                self.results.reset();
                Vec::new()
            }
            FilterAction::OpenPanel => vec![Effect::FocusPanel],
            FilterAction::ClosePanel => vec![Effect::RestoreFocus],
            FilterAction::SetFacetValue { .. }
            | FilterAction::ClearFacet(_)
            | FilterAction::ToggleFeature(_)
            | FilterAction::SetTimeFromMinutes(_) => Vec::new(),
        }
    }

    /// Card buttons have no booking backend; activation is logged and echoed
    /// in the status line.
    fn record_card_action(&mut self, listing_id: u32, action: CardAction) {
        let name = self
            .market
            .store()
            .iter()
            .find(|listing| listing.id == listing_id)
            .map(|listing| listing.r#type.clone())
            .unwrap_or_else(|| "unknown listing".to_string());
        info!(listing_id, listing = %name, action = action.label(), "card action activated");
        self.set_status(format!("{} selected for {name} (#{listing_id})", action.label()));
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            posted_at: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Rebuilds the focus tree, keeping the current focus where possible.
    pub fn rebuild_focus(&mut self) {
        let old = std::mem::take(&mut self.focus);
        self.focus = FocusBuilder::rebuild_for(self, Some(old));
    }

    /// Moves focus to the first control of the open filter panel.
    pub fn focus_panel(&mut self) {
        self.focus.none();
        self.rebuild_focus();
        if let Some(flag) = self.filter_panel.first_flag() {
            self.focus.focus(&flag);
        }
    }

    /// Tab of the active category; the fallback focus target.
    pub fn focus_selected_tab(&mut self) {
        if let Some(flag) = self.nav_bar.category_flag(self.nav_bar.selected).cloned() {
            self.focus.focus(&flag);
        }
    }

    /// Remembers the category for the next launch; failures are logged only.
    pub fn persist_category(&self, category: Category) {
        if let Err(error) = self.ctx.preferences.set_default_category(category) {
            tracing::warn!(%error, %category, "failed to persist default category");
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        let ctx = SharedCtx {
            theme: Box::new(theme::MarketTheme::new()),
            active_theme_id: "market",
            debug_enabled: false,
            preferences: Arc::new(UserPreferences::ephemeral()),
        };
        Self::with_ctx(ctx, MarketState::default())
    }
}

impl HasFocus for App {
    /// While the panel is open it is the only focusable region.
    fn build(&self, builder: &mut FocusBuilder) {
        if self.market.is_panel_open() {
            builder.widget(&self.filter_panel);
        } else {
            builder.widget(&self.nav_bar);
            builder.widget(&self.results);
        }
    }

    fn focus(&self) -> FocusFlag {
        self.root_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
