//! [`Context`]-related definitions.

use common::Date;
use service::{
    domain::{property, user, wishlist::Favorites, User},
    infra::{
        auth::{self, Auth as _},
        Memory,
    },
    query,
    read::map,
    Query as _,
};
use tokio::sync::Mutex;

use crate::{define_error, error::AuthError, AsError, Config, Error, Service};

/// Application context shared by all the pages of a session.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// Authentication collaborator.
    auth: auth::Stub,

    /// [`Favorites`] of this session.
    favorites: Mutex<Favorites>,

    /// Day considered as today.
    today: Date,

    /// Strategy of placing markers on a map.
    map_strategy: map::Strategy,
}

impl Context {
    /// Creates a new [`Context`] over the seeded [`Memory`] store.
    ///
    /// # Errors
    ///
    /// Errors if:
    /// - the configured pricing is invalid;
    /// - the configured session account does not exist.
    pub async fn new(config: &Config, today: Date) -> Result<Self, Error> {
        let service = Service::new(
            config.service().map_err(|e| Error::validation(&e))?,
            Memory::seeded(),
        );

        let account = user::Id::new(config.session.user.as_str())
            .ok_or(SessionError::UnknownAccount)?;
        let account = service
            .execute(query::user::ById::by(account))
            .await
            .map_err(AsError::into_error)?
            .ok_or(SessionError::UnknownAccount)?;
        let favorites = service
            .execute(query::wishlist::ByUser::by(account.id.clone()))
            .await
            .map_err(AsError::into_error)?
            .favorites()
            .clone();

        Ok(Self {
            service,
            auth: auth::Stub::new(account, config.session.signed_in),
            favorites: Mutex::new(favorites),
            today,
            map_strategy: config.map.strategy,
        })
    }

    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the authentication collaborator of this [`Context`].
    #[must_use]
    pub fn auth(&self) -> &auth::Stub {
        &self.auth
    }

    /// Returns the day considered as today.
    #[must_use]
    pub fn today(&self) -> Date {
        self.today
    }

    /// Returns the strategy of placing markers on a map.
    #[must_use]
    pub fn map_strategy(&self) -> map::Strategy {
        self.map_strategy
    }

    /// Returns the signed-in [`User`].
    ///
    /// # Errors
    ///
    /// Errors if no [`User`] is signed in.
    pub async fn current_user(&self) -> Result<User, Error> {
        let state = auth::resolved(&mut self.auth.subscribe())
            .await
            .map_err(AsError::into_error)?;
        state
            .user
            .ok_or_else(|| AuthError::AuthorizationRequired.into())
    }

    /// Indicates whether the provided [`property::Id`] is saved to
    /// [`Favorites`].
    pub async fn is_favorite(&self, id: &property::Id) -> bool {
        self.favorites.lock().await.contains(id)
    }

    /// Toggles the provided [`property::Id`] in [`Favorites`], returning
    /// whether it's saved now.
    pub async fn toggle_favorite(&self, id: &property::Id) -> bool {
        self.favorites.lock().await.toggle(id)
    }
}

define_error! {
    enum SessionError {
        #[code = "NOT_FOUND"]
        #[exit = 4]
        #[message = "Session account does not exist"]
        UnknownAccount,
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use service::{domain::property, infra::auth::Auth as _};

    use crate::{config, Config};

    use super::Context;

    pub(crate) async fn context(signed_in: bool) -> Context {
        let config = Config {
            booking: config::Booking {
                submission_delay: Duration::ZERO,
            },
            session: config::Session {
                signed_in,
                ..config::Session::default()
            },
            ..Config::default()
        };
        Context::new(&config, "2024-02-01".parse().unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn resolves_signed_in_account() {
        let ctx = context(true).await;

        let user = ctx.current_user().await.unwrap();

        assert_eq!(user.id.as_ref(), "user1");
    }

    #[tokio::test]
    async fn requires_sign_in() {
        let ctx = context(false).await;

        let err = ctx.current_user().await.unwrap_err();
        assert_eq!(err.code, "AUTHORIZATION_REQUIRED");

        _ = ctx.auth().login().await.unwrap();
        assert!(ctx.current_user().await.is_ok());
    }

    #[tokio::test]
    async fn starts_with_saved_favorites() {
        let ctx = context(true).await;
        let saved = property::Id::new("1").unwrap();

        assert!(ctx.is_favorite(&saved).await);
        assert!(!ctx.toggle_favorite(&saved).await);
        assert!(!ctx.is_favorite(&saved).await);
    }

    #[tokio::test]
    async fn rejects_unknown_account() {
        let config = Config {
            session: config::Session {
                user: "ghost".into(),
                ..config::Session::default()
            },
            ..Config::default()
        };

        let err = Context::new(&config, "2024-02-01".parse().unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.code, "NOT_FOUND");
    }
}

#[cfg(test)]
pub(crate) use self::spec::context as test_context;
