//! Trips page.

use std::fmt;

use service::{
    command::{self, cancel_booking},
    domain::{booking, Booking},
    query,
    read::trip::{self, Tab, Trip},
    Command as _, Query as _,
};

use crate::{define_error, AsError, Context, Error};

/// Trips view.
#[derive(Clone, Debug)]
pub struct Trips {
    /// Shown [`Tab`].
    pub tab: Tab,

    /// [`Trip`]s listed under the [`Tab`], with their statuses.
    pub trips: Vec<(Trip, trip::Status)>,
}

/// Shows the [`Trip`]s of the signed-in account listed under the provided
/// [`Tab`].
///
/// # Errors
///
/// Errors if no account is signed in.
#[tracing::instrument(skip_all, fields(tab = %tab))]
pub async fn show(ctx: &Context, tab: Tab) -> Result<Trips, Error> {
    let me = ctx.current_user().await?;
    let today = ctx.today();

    let all = ctx
        .service()
        .execute(query::trips::ByUser::by(me.id))
        .await
        .map_err(AsError::into_error)?;
    let trips = trip::on_tab(&all, tab, today)
        .into_iter()
        .map(|t| (t.clone(), t.status(today)))
        .collect();

    Ok(Trips { tab, trips })
}

/// Cancelled [`Booking`] view.
#[derive(Clone, Debug)]
pub struct Cancelled(pub Booking);

/// Cancels an upcoming [`Booking`] of the signed-in account.
///
/// # Errors
///
/// Errors if:
/// - no account is signed in;
/// - the [`Booking`] doesn't exist;
/// - the [`Booking`] is not upcoming anymore.
#[tracing::instrument(skip_all, fields(booking.id = %id))]
pub async fn cancel(
    ctx: &Context,
    id: booking::Id,
) -> Result<Cancelled, Error> {
    let me = ctx.current_user().await?;

    ctx.service()
        .execute(command::CancelBooking {
            booking_id: id,
            initiator_id: me.id,
            today: ctx.today(),
        })
        .await
        .map(Cancelled)
        .map_err(AsError::into_error)
}

impl fmt::Display for Trips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { tab, trips } = self;

        if trips.is_empty() {
            return match tab {
                Tab::Upcoming => writeln!(
                    f,
                    "No trips booked... yet! Time to start planning.",
                ),
                Tab::Past => writeln!(f, "You haven't taken any trips yet."),
            };
        }
        for (Trip { booking, property }, status) in trips {
            writeln!(
                f,
                "[{}] {} · {} · {} - {} · {} guest(s) · {:#} · {status}",
                booking.id,
                property.title,
                property.location,
                booking.stay.check_in().to_human(),
                booking.stay.check_out().to_human(),
                booking.guests,
                booking.total_price,
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Booking {} {}", self.0.id, self.0.status)
    }
}

impl AsError for cancel_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NOT_FOUND"]
                #[exit = 4]
                #[message = "Booking not found"]
                BookingNotExists,

                #[code = "BOOKING_FAILED"]
                #[exit = 3]
                #[message = "Only upcoming confirmed bookings can be \
                             cancelled"]
                NotCancellable,
            }
        }

        match self {
            Self::BookingNotExists(_) => Some(Error::BookingNotExists.into()),
            Self::Db(e) => e.try_as_error(),
            Self::Transition(_) => Some(Error::NotCancellable.into()),
        }
    }
}
