//! Profile page.

use std::fmt;

use service::{
    domain::{user::ProfileUpdate, User},
    infra::auth::Auth as _,
};

use crate::{args, AsError, Context, Error};

/// Profile view.
#[derive(Clone, Debug)]
pub enum Profile {
    /// Signed-in [`User`].
    SignedIn(User),

    /// Nobody is signed in.
    SignedOut,
}

/// Shows the profile of the signed-in account, signing in or out and
/// applying the provided changes first.
///
/// # Errors
///
/// Errors if no account is signed in and signing in wasn't requested.
#[tracing::instrument(
    skip_all,
    fields(login = args.login, logout = args.logout),
)]
pub async fn show(
    ctx: &Context,
    args: args::Profile,
) -> Result<Profile, Error> {
    let args::Profile {
        login,
        logout,
        display_name,
        email,
        avatar,
    } = args;

    if logout {
        ctx.auth().logout().await;
        return Ok(Profile::SignedOut);
    }
    if login {
        _ = ctx.auth().login().await.map_err(AsError::into_error)?;
    }

    let update = ProfileUpdate {
        display_name,
        email,
        avatar,
    };
    let me = if update.display_name.is_some()
        || update.email.is_some()
        || update.avatar.is_some()
    {
        ctx.auth()
            .update_me(update)
            .await
            .map_err(AsError::into_error)?
    } else {
        ctx.current_user().await?
    };

    Ok(Profile::SignedIn(me))
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let me = match self {
            Self::SignedIn(me) => me,
            Self::SignedOut => return writeln!(f, "Signed out"),
        };

        writeln!(f, "({}) {}", me.display_name.initial(), me.display_name)?;
        writeln!(f, "{}", me.email)?;
        if let Some(avatar) = &me.avatar {
            writeln!(f, "Avatar: {avatar}")?;
        }
        if me.is_host {
            writeln!(f, "Host")?;
        }
        writeln!(f, "Member since {}", me.created_at.date().to_human())
    }
}
