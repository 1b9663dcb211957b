//! [`Booking`] definitions.

pub mod quote;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf, Money};
use derive_more::{Display, Error, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{property, user};
#[cfg(doc)]
use crate::domain::{Property, User};

pub use self::quote::Quote;

/// Reservation of a [`Property`] by a [`User`] for a [`Stay`].
#[derive(Clone, Debug)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// ID of the booked [`Property`].
    pub property_id: property::Id,

    /// ID of the [`User`] who made this [`Booking`].
    pub user_id: user::Id,

    /// [`Stay`] of this [`Booking`].
    pub stay: Stay,

    /// Number of guests of this [`Booking`].
    pub guests: property::Guests,

    /// Total price of this [`Booking`], as quoted on submission.
    pub total_price: Money,

    /// [`Status`] of this [`Booking`].
    pub status: Status,

    /// [`DateTime`] when this [`Booking`] was created.
    pub created_at: CreationDateTime,
}

impl Booking {
    /// Confirms this [`Booking`].
    ///
    /// # Errors
    ///
    /// If this [`Booking`] is not [`Status::Pending`].
    pub fn confirm(&mut self) -> Result<(), TransitionError> {
        if self.status != Status::Pending {
            return Err(TransitionError::NotPending(self.status));
        }
        self.status = Status::Confirmed;
        Ok(())
    }

    /// Indicates whether this [`Booking`] can still be cancelled on the
    /// provided `today` date.
    #[must_use]
    pub fn is_cancellable(&self, today: Date) -> bool {
        self.status == Status::Confirmed && today < self.stay.check_in
    }

    /// Cancels this [`Booking`].
    ///
    /// # Errors
    ///
    /// - If this [`Booking`] is not [`Status::Confirmed`].
    /// - If the [`Stay`] has already started on the provided `today` date.
    pub fn cancel(&mut self, today: Date) -> Result<(), TransitionError> {
        if self.status != Status::Confirmed {
            return Err(TransitionError::NotConfirmed(self.status));
        }
        if today >= self.stay.check_in {
            return Err(TransitionError::AlreadyStarted(self.stay.check_in));
        }
        self.status = Status::Cancelled;
        Ok(())
    }
}

/// Error of an invalid [`Booking`] [`Status`] transition.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum TransitionError {
    /// Only a pending [`Booking`] can be confirmed.
    #[display("`Booking` is `{_0}`, not `pending`")]
    NotPending(#[error(not(source))] Status),

    /// Only a confirmed [`Booking`] can be cancelled.
    #[display("`Booking` is `{_0}`, not `confirmed`")]
    NotConfirmed(#[error(not(source))] Status),

    /// A [`Stay`] that has started cannot be cancelled.
    #[display("`Stay` has started on {_0}")]
    AlreadyStarted(#[error(not(source))] Date),
}

/// ID of a [`Booking`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Check-in and check-out [`Date`]s of a [`Booking`].
///
/// Check-out is always strictly after check-in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Stay {
    /// [`Date`] of arrival.
    check_in: Date,

    /// [`Date`] of departure.
    check_out: Date,
}

impl Stay {
    /// Creates a new [`Stay`] if `check_out` is after `check_in`.
    #[must_use]
    pub fn new(check_in: Date, check_out: Date) -> Option<Self> {
        (check_in < check_out).then_some(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the check-in [`Date`] of this [`Stay`].
    #[must_use]
    pub fn check_in(&self) -> Date {
        self.check_in
    }

    /// Returns the check-out [`Date`] of this [`Stay`].
    #[must_use]
    pub fn check_out(&self) -> Date {
        self.check_out
    }

    /// Returns the number of nights of this [`Stay`].
    #[must_use]
    pub fn nights(&self) -> u32 {
        u32::try_from(self.check_in.days_until(self.check_out))
            .unwrap_or_default()
    }

    /// Indicates whether the provided `date` is within this [`Stay`],
    /// including both check-in and check-out days.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.check_in <= date && date <= self.check_out
    }
}

define_kind! {
    #[doc = "Status of a [`Booking`]."]
    #[rename_all = "lowercase"]
    enum Status {
        #[doc = "The [`Booking`] is submitted, but not processed yet."]
        Pending = 1,

        #[doc = "The [`Booking`] is confirmed."]
        Confirmed = 2,

        #[doc = "The [`Booking`] is cancelled."]
        Cancelled = 3,
    }
}

/// [`DateTime`] when a [`Booking`] was created.
pub type CreationDateTime = DateTimeOf<(Booking, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::{money::Currency, Date, DateTime, Money};

    use crate::domain::{property, user};

    use super::{Booking, Id, Status, Stay, TransitionError};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn booking(status: Status) -> Booking {
        Booking {
            id: Id::new(),
            property_id: property::Id::new("1").unwrap(),
            user_id: user::Id::new("user1").unwrap(),
            stay: Stay::new(date("2024-02-15"), date("2024-02-20")).unwrap(),
            guests: property::Guests::new(4).unwrap(),
            total_price: Money::whole(1425, Currency::Usd),
            status,
            created_at: DateTime::UNIX_EPOCH.coerce(),
        }
    }

    #[test]
    fn stay_requires_checkout_after_checkin() {
        assert!(Stay::new(date("2024-02-15"), date("2024-02-15")).is_none());
        assert!(Stay::new(date("2024-02-20"), date("2024-02-15")).is_none());

        let stay = Stay::new(date("2024-02-15"), date("2024-02-20")).unwrap();
        assert_eq!(stay.nights(), 5);
        assert!(stay.contains(date("2024-02-15")));
        assert!(stay.contains(date("2024-02-20")));
        assert!(!stay.contains(date("2024-02-21")));
    }

    #[test]
    fn confirms_only_pending() {
        let mut b = booking(Status::Pending);
        b.confirm().unwrap();
        assert_eq!(b.status, Status::Confirmed);

        assert!(matches!(
            b.confirm(),
            Err(TransitionError::NotPending(Status::Confirmed)),
        ));
    }

    #[test]
    fn cancels_only_confirmed_upcoming() {
        let mut b = booking(Status::Confirmed);
        assert!(matches!(
            b.clone().cancel(date("2024-02-15")),
            Err(TransitionError::AlreadyStarted(_)),
        ));

        b.cancel(date("2024-02-01")).unwrap();
        assert_eq!(b.status, Status::Cancelled);
        assert!(matches!(
            b.cancel(date("2024-02-01")),
            Err(TransitionError::NotConfirmed(Status::Cancelled)),
        ));

        let mut b = booking(Status::Pending);
        assert!(!b.is_cancellable(date("2024-02-01")));
        assert!(b.cancel(date("2024-02-01")).is_err());
    }

    #[test]
    fn status_is_lowercase() {
        assert_eq!(Status::Confirmed.to_string(), "confirmed");
        assert_eq!("CANCELLED".parse::<Status>().unwrap(), Status::Cancelled);
    }
}
