//! [`Query`] collection related to the [`Wishlist`] of a [`User`].

use common::operations::By;

use crate::domain::{user, Wishlist};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries the [`Wishlist`] of a [`User`].
pub type ByUser = DatabaseQuery<By<Wishlist, user::Id>>;
