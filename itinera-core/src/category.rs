//! Interest categories a destination can belong to.
//!
//! The eight known ids mirror the onboarding choices. Any other `type`
//! string found in a catalogue is preserved as [`Category::Other`] so the
//! location still loads and still shows when no interest is selected.
//!
//! # Examples
//! ```
//! use itinera_core::Category;
//!
//! assert_eq!(Category::Churches.as_str(), "churches");
//! assert_eq!(Category::Beaches.to_string(), "beaches");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A destination category, keyed by its lowercase id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Churches and other places of worship.
    Churches,
    /// Beaches and coastline.
    Beaches,
    /// Museums and galleries.
    Museums,
    /// Local food and restaurants.
    Cuisine,
    /// Parks, hills and natural landscapes.
    Nature,
    /// Landmarks and viewpoints.
    Landmarks,
    /// Heritage and historical sites.
    History,
    /// Markets and shopping.
    Shopping,
    /// A category id outside the known set.
    Other(String),
}

impl Category {
    /// Every selectable category, in onboarding order.
    pub const KNOWN: [Self; 8] = [
        Self::Churches,
        Self::Beaches,
        Self::Museums,
        Self::Cuisine,
        Self::Nature,
        Self::Landmarks,
        Self::History,
        Self::Shopping,
    ];

    /// Return the category id.
    ///
    /// # Examples
    /// ```
    /// use itinera_core::Category;
    ///
    /// assert_eq!(Category::Nature.as_str(), "nature");
    /// assert_eq!(Category::Other("festival".into()).as_str(), "festival");
    /// ```
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Churches => "churches",
            Self::Beaches => "beaches",
            Self::Museums => "museums",
            Self::Cuisine => "cuisine",
            Self::Nature => "nature",
            Self::Landmarks => "landmarks",
            Self::History => "history",
            Self::Shopping => "shopping",
            Self::Other(id) => id,
        }
    }

    /// Parse one of the eight known ids, rejecting anything else.
    ///
    /// Matching is exact: ids are lowercase in query strings and in the
    /// catalogue.
    ///
    /// # Examples
    /// ```
    /// use itinera_core::Category;
    ///
    /// assert_eq!(Category::known("museums"), Some(Category::Museums));
    /// assert_eq!(Category::known("Museums"), None);
    /// ```
    #[must_use]
    pub fn known(id: &str) -> Option<Self> {
        Self::KNOWN.into_iter().find(|category| category.as_str() == id)
    }

    /// Whether this is one of the selectable categories.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Category {
    fn from(id: &str) -> Self {
        Self::known(id).unwrap_or_else(|| Self::Other(id.to_owned()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Self::known(&id).ok_or_else(|| format!("unknown category '{s}'"))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Ok(Self::from(id.as_str()))
    }
}
