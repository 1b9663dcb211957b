//! Pages of the marketplace, each rendering a view of the [`Service`].
//!
//! [`Service`]: crate::Service

pub mod booking;
pub mod home;
pub mod messages;
pub mod profile;
pub mod property;
pub mod search;
pub mod trips;
pub mod wishlist;

use std::fmt;

use service::domain::Property;

use crate::{args::Page, Context, Error};

/// Renders the provided [`Page`].
///
/// # Errors
///
/// Errors if the [`Page`] fails to load.
pub async fn render(ctx: &Context, page: Page) -> Result<String, Error> {
    Ok(match page {
        Page::Home { category } => home::show(ctx, category).await?.to_string(),
        Page::Search(args) => search::show(ctx, args).await?.to_string(),
        Page::Property {
            id,
            check_in,
            check_out,
            image,
            favorite,
        } => property::show(
            ctx,
            property::Request {
                id,
                check_in,
                check_out,
                image,
                toggle_favorite: favorite,
            },
        )
        .await?
        .to_string(),
        Page::Quote {
            id,
            check_in,
            check_out,
        } => property::quote(ctx, id, check_in, check_out)
            .await?
            .to_string(),
        Page::Book(args) => booking::submit(ctx, args).await?.to_string(),
        Page::Trips { tab } => trips::show(ctx, tab).await?.to_string(),
        Page::Cancel { id } => trips::cancel(ctx, id).await?.to_string(),
        Page::Messages {
            conversation,
            mark_read,
        } => messages::show(ctx, conversation, mark_read)
            .await?
            .to_string(),
        Page::Send {
            conversation,
            content,
        } => messages::send(ctx, conversation, content)
            .await?
            .to_string(),
        Page::Wishlist { toggle } => {
            wishlist::show(ctx, toggle).await?.to_string()
        }
        Page::Profile(args) => profile::show(ctx, args).await?.to_string(),
    })
}

/// Listing card of a [`Property`].
#[derive(Clone, Debug)]
pub struct Card {
    /// Listed [`Property`].
    pub property: Property,

    /// Indicator whether the [`Property`] is saved to favorites.
    pub is_favorite: bool,
}

impl Card {
    /// Creates a [`Card`] of the provided [`Property`] in the provided
    /// [`Context`].
    pub async fn new(ctx: &Context, property: Property) -> Self {
        let is_favorite = ctx.is_favorite(&property.id).await;
        Self {
            property,
            is_favorite,
        }
    }

    /// Creates [`Card`]s of the provided [`Property`]s, preserving their
    /// order.
    pub async fn list(ctx: &Context, properties: Vec<Property>) -> Vec<Self> {
        let mut cards = Vec::with_capacity(properties.len());
        for p in properties {
            cards.push(Self::new(ctx, p).await);
        }
        cards
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            property: p,
            is_favorite,
        } = self;

        write!(
            f,
            "{} [{}] {} · {} · {:#} night",
            if *is_favorite { "♥" } else { "♡" },
            p.id,
            p.title,
            p.location,
            p.price,
        )?;
        if p.rating.is_rated() {
            write!(f, " · ★ {} ({})", p.rating, p.review_count)?;
        } else {
            write!(f, " · New")?;
        }
        if p.host.is_superhost {
            write!(f, " · Superhost")?;
        }
        Ok(())
    }
}
