//! [`Command`] for cancelling a [`Booking`].

use common::{
    operations::{By, Insert, Select},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{booking, user, Booking},
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::domain::User;

use super::Command;

/// [`Command`] for cancelling a confirmed upcoming [`Booking`].
#[derive(Clone, Debug)]
pub struct CancelBooking {
    /// ID of the [`Booking`] to be cancelled.
    pub booking_id: booking::Id,

    /// ID of the [`User`] who cancels the [`Booking`].
    pub initiator_id: user::Id,

    /// Current [`Date`].
    pub today: Date,
}

impl<Db> Command<CancelBooking> for Service<Db>
where
    Db: Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<Insert<Booking>, Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CancelBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CancelBooking {
            booking_id,
            initiator_id,
            today,
        } = cmd;

        let mut booking = self
            .database()
            .execute(Select(By::<Option<Booking>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|b| b.user_id == initiator_id)
            .ok_or(E::BookingNotExists(booking_id))
            .map_err(tracerr::wrap!())?;

        booking
            .cancel(today)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.database()
            .execute(Insert(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("`Booking(id: {booking_id})` cancelled");

        Ok(booking)
    }
}

/// Error of [`CancelBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Booking`] with the provided ID does not exist.
    #[display("`Booking(id: {_0})` does not exist")]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Booking`] cannot be cancelled.
    #[display("`Booking` cannot be cancelled: {_0}")]
    #[from]
    Transition(booking::TransitionError),
}

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::{
        domain::{booking, user},
        infra::{fixtures, Memory},
        query, Command as _, Config, Query as _, Service,
    };

    use super::{CancelBooking, ExecutionError};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn cmd(today: &str) -> CancelBooking {
        CancelBooking {
            booking_id: fixtures::bookings()[0].id,
            initiator_id: user::Id::new("user1").unwrap(),
            today: date(today),
        }
    }

    #[tokio::test]
    async fn cancels_upcoming() {
        let service = Service::new(Config::default(), Memory::seeded());

        let booking = service.execute(cmd("2024-02-01")).await.unwrap();
        assert_eq!(booking.status, booking::Status::Cancelled);

        let stored = service
            .execute(query::booking::ById::by(booking.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, booking::Status::Cancelled);

        let err = service.execute(cmd("2024-02-01")).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::Transition(booking::TransitionError::NotConfirmed(
                booking::Status::Cancelled,
            )),
        ));
    }

    #[tokio::test]
    async fn refuses_started_stays() {
        let service = Service::new(Config::default(), Memory::seeded());

        let err = service.execute(cmd("2024-02-16")).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Transition(
                booking::TransitionError::AlreadyStarted(_),
            ),
        ));
    }

    #[tokio::test]
    async fn hides_bookings_of_others() {
        let service = Service::new(Config::default(), Memory::seeded());

        let err = service
            .execute(CancelBooking {
                initiator_id: user::Id::new("host1").unwrap(),
                ..cmd("2024-02-01")
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::BookingNotExists(_)));
    }
}
