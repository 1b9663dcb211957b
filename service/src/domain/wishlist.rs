//! [`Wishlist`] definitions.

use std::collections::HashSet;

use crate::domain::{property, Property};

/// Set of favourite [`Property`] IDs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Favorites(HashSet<property::Id>);

impl Favorites {
    /// Toggles membership of the provided [`property::Id`].
    ///
    /// Returns whether the [`Property`] is a favourite after the toggle.
    pub fn toggle(&mut self, id: &property::Id) -> bool {
        if self.0.remove(id) {
            false
        } else {
            _ = self.0.insert(id.clone());
            true
        }
    }

    /// Indicates whether the provided [`property::Id`] is a favourite.
    #[must_use]
    pub fn contains(&self, id: &property::Id) -> bool {
        self.0.contains(id)
    }

    /// Returns the number of favourites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether there are no favourites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the favourite [`property::Id`]s in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &property::Id> {
        self.0.iter()
    }
}

impl FromIterator<property::Id> for Favorites {
    fn from_iter<T: IntoIterator<Item = property::Id>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Saved [`Property`] list together with the [`Favorites`] it was built from.
///
/// Un-favouriting a listed [`Property`] removes it from the list, while
/// favouriting it again only flips the flag and doesn't bring it back.
#[derive(Clone, Debug, Default)]
pub struct Wishlist {
    /// [`Favorites`] backing this [`Wishlist`].
    favorites: Favorites,

    /// Listed [`Property`]s, in the order they were saved.
    properties: Vec<Property>,
}

impl Wishlist {
    /// Creates a new [`Wishlist`] listing the provided [`Property`]s, all of
    /// them being favourites.
    #[must_use]
    pub fn new(properties: Vec<Property>) -> Self {
        Self {
            favorites: properties.iter().map(|p| p.id.clone()).collect(),
            properties,
        }
    }

    /// Toggles the provided [`property::Id`] in this [`Wishlist`].
    ///
    /// Returns whether the [`Property`] is a favourite after the toggle.
    pub fn toggle(&mut self, id: &property::Id) -> bool {
        let is_favorite = self.favorites.toggle(id);
        if !is_favorite {
            self.properties.retain(|p| &p.id != id);
        }
        is_favorite
    }

    /// Returns the [`Favorites`] of this [`Wishlist`].
    #[must_use]
    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Returns the listed [`Property`]s of this [`Wishlist`].
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }
}
