//! [`Query`] collection related to the multiple [`Conversation`]s.

use common::operations::By;

use crate::domain::{user, Conversation};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries all the [`Conversation`]s owned by a [`User`].
pub type ByOwner = DatabaseQuery<By<Vec<Conversation>, user::Id>>;
