//! In-memory [`Database`] implementation.

mod impls;

use std::{collections::HashMap, sync::Arc};

use derive_more::{Display, Error as StdError};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracerr::Traced;

use crate::{
    domain::{property, user, Booking, Conversation, Property, User},
    infra::{database, fixtures},
};
#[cfg(doc)]
use crate::infra::Database;

/// In-memory [`Database`] client.
///
/// Clones share the same underlying state.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Shared state of this [`Memory`] store.
    state: Arc<RwLock<State>>,

    /// Indicator whether every operation upon this [`Memory`] store fails.
    is_failing: bool,
}

impl Memory {
    /// Creates a new [`Memory`] store seeded with the [`fixtures`].
    #[must_use]
    pub fn seeded() -> Self {
        let wishlists = user::Id::new(fixtures::DEFAULT_USER)
            .map(|id| (id, fixtures::wishlist()))
            .into_iter()
            .collect();
        Self::from_state(State {
            properties: fixtures::properties(),
            users: fixtures::users(),
            bookings: fixtures::bookings(),
            conversations: fixtures::conversations(),
            wishlists,
        })
    }

    /// Makes every operation upon this [`Memory`] store fail with
    /// [`Error::Unavailable`].
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.is_failing = true;
        self
    }

    fn from_state(state: State) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            is_failing: false,
        }
    }

    async fn read(
        &self,
    ) -> Result<RwLockReadGuard<'_, State>, Traced<database::Error>> {
        self.check()?;
        Ok(self.state.read().await)
    }

    async fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, State>, Traced<database::Error>> {
        self.check()?;
        Ok(self.state.write().await)
    }

    fn check(&self) -> Result<(), Traced<database::Error>> {
        if self.is_failing {
            return Err(tracerr::new!(database::Error::from(
                Error::Unavailable
            )));
        }
        Ok(())
    }
}

/// Contents of a [`Memory`] store.
#[derive(Debug, Default)]
struct State {
    /// Listed [`Property`]s in their canonical order.
    properties: Vec<Property>,

    /// Registered [`User`]s.
    users: Vec<User>,

    /// [`Booking`]s in the order they were made.
    bookings: Vec<Booking>,

    /// [`Conversation`]s of all the [`User`]s.
    conversations: Vec<Conversation>,

    /// Saved [`Property`]s of every [`User`], in the order they were saved.
    wishlists: HashMap<user::Id, Vec<property::Id>>,
}

/// [`Memory`] store [`Error`].
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// [`Memory`] store is unavailable.
    #[display("`Memory` store is unavailable")]
    Unavailable,
}
