use localmarket_types::Category;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// A single item in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    /// Category tab; activating it switches the facet table.
    Category(Category),
    /// Opens the filter panel.
    Filter,
}

impl NavItem {
    pub fn label(&self) -> &'static str {
        match self {
            NavItem::Category(category) => category.as_str(),
            NavItem::Filter => "Filter",
        }
    }
}

/// State for the navigation bar.
///
/// Owns the items, the selected category and rat-focus flags for both the
/// container and each item.
#[derive(Debug, Clone)]
pub struct NavBarState {
    /// Items in display order: every category tab, then the filter trigger.
    pub items: Vec<NavItem>,
    /// The category whose tab is highlighted.
    pub selected: Category,
    /// Focus flag for the container in the global focus tree.
    pub container_focus: FocusFlag,
    /// Focus flags for each item; kept in sync with `items` length.
    pub item_focus_flags: Vec<FocusFlag>,
    /// Last rendered area of the bar; used for mouse hit testing.
    pub last_area: Rect,
    /// Last computed per-item areas for hit testing.
    pub per_item_areas: Vec<Rect>,
}

impl Default for NavBarState {
    fn default() -> Self {
        Self::new(Category::default())
    }
}

impl NavBarState {
    pub fn new(selected: Category) -> Self {
        let items: Vec<NavItem> = Category::ALL.into_iter().map(NavItem::Category).chain([NavItem::Filter]).collect();
        let item_focus_flags = items
            .iter()
            .map(|item| FocusFlag::named(&format!("nav.item.{}", item.label().to_ascii_lowercase())))
            .collect();
        Self {
            items,
            selected,
            container_focus: FocusFlag::named("nav"),
            item_focus_flags,
            last_area: Rect::default(),
            per_item_areas: Vec::new(),
        }
    }

    /// Focus flag of the tab for `category`.
    pub fn category_flag(&self, category: Category) -> Option<&FocusFlag> {
        self.items
            .iter()
            .position(|item| *item == NavItem::Category(category))
            .and_then(|idx| self.item_focus_flags.get(idx))
    }

    pub fn filter_flag(&self) -> Option<&FocusFlag> {
        self.items
            .iter()
            .position(|item| *item == NavItem::Filter)
            .and_then(|idx| self.item_focus_flags.get(idx))
    }

    pub fn focused_item(&self) -> Option<NavItem> {
        self.item_focus_flags.iter().position(FocusFlag::get).and_then(|idx| self.items.get(idx).copied())
    }

    /// Returns the flag next to the focused one, wrapping at both ends.
    pub fn cycle_focus(&self, forward: bool) -> Option<FocusFlag> {
        let len = self.item_focus_flags.len();
        let idx = self.item_focus_flags.iter().position(FocusFlag::get)?;
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        self.item_focus_flags.get(next).cloned()
    }

    pub fn is_item_focused(&self, idx: usize) -> bool {
        self.item_focus_flags.get(idx).is_some_and(FocusFlag::get)
    }
}

impl HasFocus for NavBarState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        for flag in &self.item_focus_flags {
            builder.leaf_widget(flag);
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_are_categories_then_filter() {
        let state = NavBarState::new(Category::Rent);
        let labels: Vec<&str> = state.items.iter().map(NavItem::label).collect();
        assert_eq!(labels, vec!["Tours", "Tickets", "Rent", "Transfer", "Filter"]);
        assert_eq!(state.item_focus_flags.len(), state.items.len());
        assert_eq!(state.selected, Category::Rent);
    }

    #[test]
    fn cycle_focus_wraps() {
        let state = NavBarState::new(Category::Tours);
        assert!(state.cycle_focus(true).is_none(), "nothing focused yet");

        state.item_focus_flags[4].set(true);
        let next = state.cycle_focus(true).expect("next");
        assert_eq!(next.widget_id(), state.item_focus_flags[0].widget_id());
        let prev = state.cycle_focus(false).expect("prev");
        assert_eq!(prev.widget_id(), state.item_focus_flags[3].widget_id());
        assert_eq!(state.focused_item(), Some(NavItem::Filter));
    }
}
