//! Booking form page.

use std::fmt;

use service::{
    command::{self, create_booking},
    domain::{user, Booking},
    Command as _,
};

use crate::{args, define_error, AsError, Context, Error};

/// Booking confirmation view.
#[derive(Clone, Debug)]
pub struct Confirmation(pub Booking);

/// Submits the booking form.
///
/// Contact details not provided are pre-filled from the profile of the
/// signed-in account.
///
/// # Errors
///
/// Errors if:
/// - no account is signed in;
/// - the form is incomplete or invalid;
/// - the booking fails to be stored.
#[tracing::instrument(
    skip_all,
    fields(
        property.id = %args.id,
        check_in = ?args.check_in,
        check_out = ?args.check_out,
        guests = args.guests,
    ),
)]
pub async fn submit(
    ctx: &Context,
    args: args::Book,
) -> Result<Confirmation, Error> {
    let args::Book {
        id,
        check_in,
        check_out,
        guests,
        first_name,
        last_name,
        email,
        phone,
    } = args;

    let me = ctx.current_user().await?;
    let (first, last) = me.first_and_last_name();
    let contact = create_booking::Contact {
        first_name: first_name.or_else(|| first.and_then(user::Name::new)),
        last_name: last_name.or_else(|| last.and_then(user::Name::new)),
        email: email.or_else(|| Some(me.email.clone())),
        phone,
    };

    ctx.service()
        .execute(command::CreateBooking {
            property_id: id,
            user_id: me.id,
            check_in,
            check_out,
            guests,
            contact,
        })
        .await
        .map(Confirmation)
        .map_err(AsError::into_error)
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Booking {
            id,
            stay,
            guests,
            total_price,
            status,
            ..
        } = &self.0;

        writeln!(f, "Booking {status}!")?;
        writeln!(f, "Reservation {id}")?;
        writeln!(
            f,
            "{} - {} · {} night(s) · {guests} guest(s)",
            stay.check_in().to_human(),
            stay.check_out().to_human(),
            stay.nights(),
        )?;
        writeln!(f, "Total {total_price:#}")
    }
}

impl AsError for create_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NOT_FOUND"]
                #[exit = 4]
                #[message = "Property not found"]
                PropertyNotExists,

                #[code = "BOOKING_FAILED"]
                #[exit = 3]
                #[message = "Failed to create booking. Please try again."]
                BookingFailed,

                #[code = "AUTHORIZATION_REQUIRED"]
                #[exit = 5]
                #[message = "Account of the session doesn't exist anymore"]
                UserNotExists,
            }
        }

        match self {
            Self::Db(_) | Self::Transition(_) => {
                Some(Error::BookingFailed.into())
            }
            Self::GuestsOutOfRange { .. }
            | Self::InvalidStay { .. }
            | Self::MissingField(_) => Some(crate::Error::validation(self)),
            Self::PropertyNotExists(_) => {
                Some(Error::PropertyNotExists.into())
            }
            Self::UserNotExists(_) => Some(Error::UserNotExists.into()),
        }
    }
}
