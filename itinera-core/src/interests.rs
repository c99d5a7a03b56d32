//! Interest selections: which categories a visitor asked to see.
//!
//! A selection is carried between pages as a query string of `id=true`
//! pairs. An empty selection means "no preference" and shows every
//! location.

use std::collections::BTreeSet;

use crate::{Category, Location};

/// The set of categories a visitor selected during onboarding.
///
/// # Examples
/// ```
/// use itinera_core::{Category, InterestSelection};
///
/// let selection = InterestSelection::new()
///     .with(Category::Churches)
///     .with(Category::Beaches);
/// assert!(selection.is_selected(&Category::Beaches));
/// assert_eq!(selection.to_query(), "churches=true&beaches=true");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterestSelection {
    selected: BTreeSet<Category>,
}

impl InterestSelection {
    /// Construct an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `churches=true&beaches=true` query string.
    ///
    /// Only the literal value `true` selects a category; unknown keys and
    /// other values are ignored. A repeated key is decided by its first
    /// occurrence. A leading `?` is tolerated.
    ///
    /// # Examples
    /// ```
    /// use itinera_core::{Category, InterestSelection};
    ///
    /// let selection = InterestSelection::from_query("?museums=true&nature=false&foo=true");
    /// assert!(selection.is_selected(&Category::Museums));
    /// assert!(!selection.is_selected(&Category::Nature));
    /// assert_eq!(selection.len(), 1);
    /// ```
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut seen = BTreeSet::new();
        let selected = query
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .filter(|(key, _)| seen.insert(*key))
            .filter(|(_, value)| *value == "true")
            .filter_map(|(key, _)| Category::known(key))
            .collect();
        Self { selected }
    }

    /// Add a category, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, category: Category) -> Self {
        self.select(category);
        self
    }

    /// Add a category. Categories outside the known set are ignored.
    pub fn select(&mut self, category: Category) {
        if category.is_known() {
            self.selected.insert(category);
        }
    }

    /// Remove a category if present, or add it otherwise.
    pub fn toggle(&mut self, category: Category) {
        if !self.selected.remove(&category) {
            self.select(category);
        }
    }

    /// Whether the category was selected.
    #[must_use]
    pub fn is_selected(&self, category: &Category) -> bool {
        self.selected.contains(category)
    }

    /// Whether any category was selected at all.
    #[must_use]
    pub fn any_selected(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Number of selected categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether the selection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether the location's category is one of the selected ones.
    #[must_use]
    pub fn matches(&self, location: &Location) -> bool {
        self.is_selected(&location.category)
    }

    /// Whether the location should be listed: everything shows when
    /// nothing is selected.
    #[must_use]
    pub fn should_show(&self, location: &Location) -> bool {
        !self.any_selected() || self.matches(location)
    }

    /// Keep the locations that should be shown, in input order.
    pub fn filter<'a, I>(&self, locations: I) -> Vec<Location>
    where
        I: IntoIterator<Item = &'a Location>,
    {
        locations
            .into_iter()
            .filter(|location| self.should_show(location))
            .cloned()
            .collect()
    }

    /// Render the selection as an `id=true` query string in onboarding
    /// order.
    #[must_use]
    pub fn to_query(&self) -> String {
        Category::KNOWN
            .iter()
            .filter(|category| self.is_selected(category))
            .map(|category| format!("{category}=true"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl FromIterator<Category> for InterestSelection {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut selection = Self::new();
        for category in iter {
            selection.select(category);
        }
        selection
    }
}
