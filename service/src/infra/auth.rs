//! [`Auth`] collaborator definitions.

use std::future::Future;

use derive_more::{Display, Error as StdError};
use tokio::sync::{watch, Mutex};
use tracerr::Traced;

use crate::domain::{user::ProfileUpdate, User};

/// Authentication collaborator, owning the signed-in [`User`].
pub trait Auth {
    /// Subscribes to the [`State`] changes.
    ///
    /// The returned receiver observes the current [`State`] immediately.
    fn subscribe(&self) -> watch::Receiver<State>;

    /// Signs the [`User`] in.
    fn login(&self) -> impl Future<Output = Result<User, Traced<Error>>>;

    /// Signs the current [`User`] out.
    fn logout(&self) -> impl Future<Output = ()>;

    /// Updates the profile of the signed-in [`User`].
    fn update_me(
        &self,
        update: ProfileUpdate,
    ) -> impl Future<Output = Result<User, Traced<Error>>>;
}

/// Authentication state.
#[derive(Clone, Debug)]
pub struct State {
    /// Signed-in [`User`], if any.
    pub user: Option<User>,

    /// Indicator whether the [`State`] is still being resolved.
    pub is_loading: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }
}

/// Waits until the provided `receiver` observes a resolved [`State`].
///
/// # Errors
///
/// If the [`Auth`] collaborator was dropped before resolving.
pub async fn resolved(
    receiver: &mut watch::Receiver<State>,
) -> Result<State, Traced<Error>> {
    receiver
        .wait_for(|s| !s.is_loading)
        .await
        .map(|s| s.clone())
        .map_err(|_| tracerr::new!(Error::Gone))
}

/// [`Auth`] error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// No [`User`] is signed in.
    #[display("no `User` is signed in")]
    NotSignedIn,

    /// [`Auth`] collaborator is gone.
    #[display("`Auth` collaborator is gone")]
    Gone,
}

/// In-memory [`Auth`] signing into a single predefined account.
#[derive(Debug)]
pub struct Stub {
    /// Account [`Stub::login`] signs into.
    account: Mutex<User>,

    /// Publisher of the [`State`] changes.
    state: watch::Sender<State>,
}

impl Stub {
    /// Creates a new [`Stub`] still resolving its [`State`].
    #[must_use]
    pub fn loading(account: User) -> Self {
        Self {
            account: Mutex::new(account),
            state: watch::Sender::new(State::default()),
        }
    }

    /// Creates a new [`Stub`] with an already resolved [`State`].
    #[must_use]
    pub fn new(account: User, signed_in: bool) -> Self {
        let user = signed_in.then(|| account.clone());
        Self {
            account: Mutex::new(account),
            state: watch::Sender::new(State {
                user,
                is_loading: false,
            }),
        }
    }

    /// Resolves the [`State`] of this [`Stub`].
    pub async fn finish_loading(&self, signed_in: bool) {
        let user = if signed_in {
            Some(self.account.lock().await.clone())
        } else {
            None
        };
        _ = self.state.send_replace(State {
            user,
            is_loading: false,
        });
    }
}

impl Auth for Stub {
    fn subscribe(&self) -> watch::Receiver<State> {
        self.state.subscribe()
    }

    async fn login(&self) -> Result<User, Traced<Error>> {
        let user = self.account.lock().await.clone();
        _ = self.state.send_replace(State {
            user: Some(user.clone()),
            is_loading: false,
        });
        Ok(user)
    }

    async fn logout(&self) {
        _ = self.state.send_replace(State {
            user: None,
            is_loading: false,
        });
    }

    async fn update_me(
        &self,
        update: ProfileUpdate,
    ) -> Result<User, Traced<Error>> {
        if self.state.borrow().user.is_none() {
            return Err(tracerr::new!(Error::NotSignedIn));
        }

        let mut account = self.account.lock().await;
        update.apply_to(&mut account);
        let user = account.clone();
        _ = self.state.send_replace(State {
            user: Some(user.clone()),
            is_loading: false,
        });
        Ok(user)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::user::{self, ProfileUpdate},
        infra::fixtures,
    };

    use super::{resolved, Auth as _, Error, Stub};

    fn account() -> crate::domain::User {
        fixtures::users().swap_remove(0)
    }

    #[tokio::test]
    async fn login_and_logout_are_observed() {
        let auth = Stub::new(account(), false);
        let mut rx = auth.subscribe();
        assert!(rx.borrow_and_update().user.is_none());

        let user = auth.login().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().user.as_ref().map(|u| &u.id),
            Some(&user.id),
        );

        auth.logout().await;
        assert!(rx.borrow_and_update().user.is_none());
    }

    #[tokio::test]
    async fn waits_for_resolution() {
        let auth = Stub::loading(account());
        let mut rx = auth.subscribe();
        assert!(rx.borrow().is_loading);

        auth.finish_loading(true).await;
        let state = resolved(&mut rx).await.unwrap();

        assert!(!state.is_loading);
        assert!(state.user.is_some());
    }

    #[tokio::test]
    async fn updates_profile_only_when_signed_in() {
        let auth = Stub::new(account(), false);
        let update = ProfileUpdate {
            display_name: Some(user::Name::new("Jane Smith").unwrap()),
            ..ProfileUpdate::default()
        };

        let err = auth.update_me(update.clone()).await.unwrap_err();
        assert!(matches!(err.as_ref(), Error::NotSignedIn));

        _ = auth.login().await.unwrap();
        let user = auth.update_me(update).await.unwrap();
        assert_eq!(user.display_name.as_ref(), "Jane Smith");
        assert_eq!(
            auth.subscribe()
                .borrow()
                .user
                .as_ref()
                .map(|u| u.display_name.to_string()),
            Some("Jane Smith".into()),
        );
    }
}
