//! Property details page.

use std::fmt;

use common::Date;
use service::{
    domain::{booking::Quote, property, Property},
    query::{self, quote},
    Query as _,
};

use crate::{define_error, AsError, Context, Error};

/// Property details request.
#[derive(Clone, Debug)]
pub struct Request {
    /// ID of the [`Property`] to show.
    pub id: property::Id,

    /// Arrival [`Date`], if chosen.
    pub check_in: Option<Date>,

    /// Departure [`Date`], if chosen.
    pub check_out: Option<Date>,

    /// Index of the image to show, wrapping around.
    pub image: usize,

    /// Whether to toggle the [`Property`] in favorites first.
    pub toggle_favorite: bool,
}

/// Property details view.
#[derive(Clone, Debug)]
pub struct Details {
    /// Shown [`Property`].
    pub property: Property,

    /// Index of the shown image.
    pub image: usize,

    /// Indicator whether the [`Property`] is saved to favorites.
    pub is_favorite: bool,

    /// [`Quote`] of the chosen dates.
    pub quote: Quote,
}

/// Shows the details of a [`Property`].
///
/// # Errors
///
/// Errors if the [`Property`] doesn't exist.
#[tracing::instrument(skip_all, fields(property.id = %req.id))]
pub async fn show(ctx: &Context, req: Request) -> Result<Details, Error> {
    let Request {
        id,
        check_in,
        check_out,
        image,
        toggle_favorite,
    } = req;

    let (property, quote) = ctx
        .service()
        .execute(query::QuotePrice {
            property_id: id,
            check_in,
            check_out,
        })
        .await
        .map_err(AsError::into_error)?;

    let is_favorite = if toggle_favorite {
        ctx.toggle_favorite(&property.id).await
    } else {
        ctx.is_favorite(&property.id).await
    };

    Ok(Details {
        image: property.images.position(image),
        property,
        is_favorite,
        quote,
    })
}

/// Shows the price breakdown of a stay at a [`Property`].
///
/// # Errors
///
/// Errors if the [`Property`] doesn't exist.
#[tracing::instrument(skip_all, fields(property.id = %id))]
pub async fn quote(
    ctx: &Context,
    id: property::Id,
    check_in: Option<Date>,
    check_out: Option<Date>,
) -> Result<Breakdown, Error> {
    let (_, quote) = ctx
        .service()
        .execute(query::QuotePrice {
            property_id: id,
            check_in,
            check_out,
        })
        .await
        .map_err(AsError::into_error)?;
    Ok(Breakdown(quote))
}

/// Price breakdown of a [`Quote`].
#[derive(Clone, Copy, Debug)]
pub struct Breakdown(pub Quote);

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Quote {
            nights,
            subtotal,
            cleaning_fee,
            service_fee,
            total,
        } = self.0;

        if !self.0.is_bookable() {
            return writeln!(f, "Add dates for prices");
        }
        writeln!(f, "{nights} night(s)    {subtotal:#}")?;
        writeln!(f, "Cleaning fee    {cleaning_fee:#}")?;
        writeln!(f, "Service fee     {service_fee:#}")?;
        writeln!(f, "Total           {total:#}")
    }
}

impl fmt::Display for Details {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            property: p,
            image,
            is_favorite,
            quote,
        } = self;

        writeln!(
            f,
            "{} {}",
            p.title,
            if *is_favorite { "♥ Saved" } else { "♡ Save" },
        )?;
        write!(f, "{}", p.location)?;
        if p.rating.is_rated() {
            write!(f, " · ★ {} · {} reviews", p.rating, p.review_count)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Image {}/{}: {}",
            image + 1,
            p.images.len(),
            p.images.get(*image),
        )?;
        if p.images.len() > 1 {
            writeln!(
                f,
                "  ‹ --image {}   --image {} ›",
                p.images.prev_index(*image),
                p.images.next_index(*image),
            )?;
        }
        writeln!(
            f,
            "{} hosted by {}{}",
            p.kind,
            p.host.name,
            if p.host.is_superhost { " · Superhost" } else { "" },
        )?;
        writeln!(
            f,
            "{} guests · {} bedroom(s) · {} bathroom(s)",
            p.max_guests, p.bedrooms, p.bathrooms,
        )?;
        if p.is_instant_bookable {
            writeln!(f, "Instant Book")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", p.description)?;
        writeln!(f)?;
        writeln!(f, "What this place offers:")?;
        for amenity in &p.amenities {
            writeln!(f, "  - {amenity}")?;
        }
        writeln!(f)?;
        writeln!(f, "{:#} night", p.price)?;
        write!(f, "{}", Breakdown(*quote))
    }
}

impl AsError for quote::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NOT_FOUND"]
                #[exit = 4]
                #[message = "Property not found"]
                PropertyNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(Error::PropertyNotExists.into()),
        }
    }
}
