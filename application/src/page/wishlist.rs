//! Wishlist page.

use std::fmt;

use service::{domain::property, query, Query as _};

use crate::{page::Card, AsError, Context, Error};

/// Wishlist view.
#[derive(Clone, Debug)]
pub struct Saved {
    /// [`Card`]s of the listed properties.
    pub cards: Vec<Card>,
}

/// Shows the saved properties of the signed-in account, toggling the
/// provided ones first.
///
/// Un-saving a listed property removes it from the list, while saving it
/// again doesn't bring it back until the page is reloaded.
///
/// # Errors
///
/// Errors if no account is signed in.
#[tracing::instrument(skip_all, fields(toggled = toggle.len()))]
pub async fn show(
    ctx: &Context,
    toggle: Vec<property::Id>,
) -> Result<Saved, Error> {
    let me = ctx.current_user().await?;

    let mut wishlist = ctx
        .service()
        .execute(query::wishlist::ByUser::by(me.id))
        .await
        .map_err(AsError::into_error)?;
    for id in &toggle {
        _ = wishlist.toggle(id);
        _ = ctx.toggle_favorite(id).await;
    }

    Ok(Saved {
        cards: Card::list(ctx, wishlist.properties().to_vec()).await,
    })
}

impl fmt::Display for Saved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cards.is_empty() {
            return writeln!(
                f,
                "No saved properties yet. Tap the heart on any property to \
                 save it.",
            );
        }
        writeln!(f, "{} saved", self.cards.len())?;
        for card in &self.cards {
            writeln!(f, "{card}")?;
        }
        Ok(())
    }
}
