use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{TerrainCategory, CATEGORY_COUNT};

/// Which categories the classifier may assign.
///
/// Serialized as a `name → bool` map. Names absent from the map stay visible;
/// unknown names are logged and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct Visibility {
    enabled: [bool; CATEGORY_COUNT],
}

impl Default for Visibility {
    fn default() -> Self {
        Self::all()
    }
}

impl Visibility {
    pub const fn all() -> Self {
        Self { enabled: [true; CATEGORY_COUNT] }
    }

    pub const fn none() -> Self {
        Self { enabled: [false; CATEGORY_COUNT] }
    }

    /// Only the listed categories are visible.
    pub fn only<I: IntoIterator<Item = TerrainCategory>>(categories: I) -> Self {
        let mut v = Self::none();
        for c in categories {
            v.set(c, true);
        }
        v
    }

    /// Build from a name → visible map, as received from a host UI.
    pub fn from_names<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut v = Self::all();
        for (name, visible) in entries {
            match name.parse::<TerrainCategory>() {
                Ok(c) => v.set(c, visible),
                Err(_) => warn!(target: "terrapath::terrain", name, "ignoring unknown category in visibility map"),
            }
        }
        v
    }

    #[inline]
    pub fn is_visible(&self, category: TerrainCategory) -> bool {
        self.enabled[category.index()]
    }

    pub fn set(&mut self, category: TerrainCategory, visible: bool) {
        self.enabled[category.index()] = visible;
    }

    /// Visible categories in ascending elevation order.
    pub fn active(&self) -> impl Iterator<Item = TerrainCategory> + '_ {
        TerrainCategory::ALL.into_iter().filter(move |c| self.is_visible(*c))
    }

}

impl From<BTreeMap<String, bool>> for Visibility {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Self::from_names(map.iter().map(|(k, &v)| (k.as_str(), v)))
    }
}

impl From<Visibility> for BTreeMap<String, bool> {
    fn from(v: Visibility) -> Self {
        TerrainCategory::ALL
            .into_iter()
            .map(|c| (c.name().to_string(), v.is_visible(c)))
            .collect()
    }
}
