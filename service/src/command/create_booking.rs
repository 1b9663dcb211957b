//! [`Command`] for creating a new [`Booking`].

use common::{
    define_kind,
    operations::{By, Insert, Select},
    Date, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        booking::{self, Quote, Stay},
        property, user, Booking, Property, User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Booking`].
#[derive(Clone, Debug)]
pub struct CreateBooking {
    /// ID of the [`Property`] to book.
    pub property_id: property::Id,

    /// ID of the [`User`] making the [`Booking`].
    pub user_id: user::Id,

    /// Arrival [`Date`].
    pub check_in: Option<Date>,

    /// Departure [`Date`].
    pub check_out: Option<Date>,

    /// Number of guests.
    pub guests: u16,

    /// [`Contact`] details of the main guest.
    pub contact: Contact,
}

/// Contact details entered into a booking form.
#[derive(Clone, Debug, Default)]
pub struct Contact {
    /// First name of the main guest.
    pub first_name: Option<user::Name>,

    /// Last name of the main guest.
    pub last_name: Option<user::Name>,

    /// E-mail of the main guest.
    pub email: Option<user::Email>,

    /// Phone of the main guest, which is optional.
    pub phone: Option<user::Phone>,
}

impl<Db> Command<CreateBooking> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Insert<Booking>, Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateBooking {
            property_id,
            user_id,
            check_in,
            check_out,
            guests,
            contact,
        } = cmd;

        let check_in = check_in
            .ok_or(E::MissingField(Field::CheckIn))
            .map_err(tracerr::wrap!())?;
        let check_out = check_out
            .ok_or(E::MissingField(Field::CheckOut))
            .map_err(tracerr::wrap!())?;
        for (value, field) in [
            (contact.first_name.is_some(), Field::FirstName),
            (contact.last_name.is_some(), Field::LastName),
            (contact.email.is_some(), Field::Email),
        ] {
            if !value {
                return Err(tracerr::new!(E::MissingField(field)));
            }
        }
        let stay = Stay::new(check_in, check_out)
            .ok_or(E::InvalidStay { check_in, check_out })
            .map_err(tracerr::wrap!())?;

        let user = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(user_id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        let property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(
                property_id.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let guests = property::Guests::new(guests)
            .filter(|g| property.accommodates(*g))
            .ok_or(E::GuestsOutOfRange {
                guests,
                max: property.max_guests,
            })
            .map_err(tracerr::wrap!())?;

        let quote = Quote::for_stay(property.price, &stay, &self.config().fees);

        log::debug!(
            "submitting `Booking` of `Property(id: {})` for {} night(s)",
            property.id,
            quote.nights,
        );
        tokio::time::sleep(self.config().submission_delay).await;

        let mut booking = Booking {
            id: booking::Id::new(),
            property_id: property.id,
            user_id: user.id,
            stay,
            guests,
            total_price: quote.total,
            status: booking::Status::Pending,
            created_at: DateTime::now().coerce(),
        };
        booking
            .confirm()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.database()
            .execute(Insert(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("`Booking(id: {})` confirmed", booking.id);

        Ok(booking)
    }
}

define_kind! {
    #[doc = "Required field of a [`CreateBooking`] form."]
    #[rename_all = "snake_case"]
    enum Field {
        #[doc = "Arrival date."]
        CheckIn = 1,

        #[doc = "Departure date."]
        CheckOut = 2,

        #[doc = "First name of the main guest."]
        FirstName = 3,

        #[doc = "Last name of the main guest."]
        LastName = 4,

        #[doc = "E-mail of the main guest."]
        Email = 5,
    }
}

/// Error of [`CreateBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Number of guests is not accepted by the [`Property`].
    #[display("{guests} guest(s) is out of `1..={max}` range")]
    GuestsOutOfRange {
        /// Requested number of guests.
        guests: u16,

        /// Maximum number of guests of the [`Property`].
        max: property::Guests,
    },

    /// Check-out is not after check-in.
    #[display("check-out {check_out} is not after check-in {check_in}")]
    InvalidStay {
        /// Requested arrival [`Date`].
        check_in: Date,

        /// Requested departure [`Date`].
        check_out: Date,
    },

    /// Required [`Field`] is not filled in.
    #[display("`{_0}` is required")]
    MissingField(#[error(not(source))] Field),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// New [`Booking`] cannot be confirmed.
    #[display("`Booking` cannot be confirmed: {_0}")]
    #[from]
    Transition(booking::TransitionError),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{money::Currency, Date, Money};

    use crate::{
        domain::{booking, property, user},
        infra::Memory,
        query, Command as _, Config, Query as _, Service,
    };

    use super::{Contact, CreateBooking, ExecutionError, Field};

    fn service() -> Service<Memory> {
        Service::new(
            Config {
                submission_delay: Duration::ZERO,
                ..Config::default()
            },
            Memory::seeded(),
        )
    }

    fn date(s: &str) -> Option<Date> {
        Some(s.parse().unwrap())
    }

    fn cmd() -> CreateBooking {
        CreateBooking {
            property_id: property::Id::new("1").unwrap(),
            user_id: user::Id::new("user1").unwrap(),
            check_in: date("2030-02-15"),
            check_out: date("2030-02-20"),
            guests: 4,
            contact: Contact {
                first_name: user::Name::new("Jane"),
                last_name: user::Name::new("Doe"),
                email: user::Email::new("jane.doe@example.com"),
                phone: None,
            },
        }
    }

    #[tokio::test]
    async fn books_and_confirms() {
        let service = service();

        let booking = service.execute(cmd()).await.unwrap();

        assert_eq!(booking.status, booking::Status::Confirmed);
        assert_eq!(booking.total_price, Money::whole(1425, Currency::Usd));
        assert_eq!(booking.stay.nights(), 5);

        let stored = service
            .execute(query::booking::ById::by(booking.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, booking::Status::Confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_submission_delay() {
        let service = Service::new(Config::default(), Memory::seeded());
        let started = tokio::time::Instant::now();

        _ = service.execute(cmd()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn requires_dates_and_contacts() {
        let service = service();

        let err = service
            .execute(CreateBooking {
                check_out: None,
                ..cmd()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::MissingField(Field::CheckOut),
        ));

        let mut no_email = cmd();
        no_email.contact.email = None;
        let err = service.execute(no_email).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::MissingField(Field::Email),
        ));
    }

    #[tokio::test]
    async fn rejects_reversed_dates() {
        let err = service()
            .execute(CreateBooking {
                check_in: date("2030-02-20"),
                check_out: date("2030-02-15"),
                ..cmd()
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::InvalidStay { .. }));
    }

    #[tokio::test]
    async fn rejects_too_many_guests() {
        for guests in [0, 9] {
            let err = service()
                .execute(CreateBooking { guests, ..cmd() })
                .await
                .unwrap_err();

            assert!(matches!(
                err.as_ref(),
                ExecutionError::GuestsOutOfRange { .. },
            ));
        }
    }

    #[tokio::test]
    async fn rejects_unknown_property() {
        let err = service()
            .execute(CreateBooking {
                property_id: property::Id::new("42").unwrap(),
                ..cmd()
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PropertyNotExists(_),
        ));
    }

    #[tokio::test]
    async fn surfaces_store_failures() {
        let service = Service::new(
            Config {
                submission_delay: Duration::ZERO,
                ..Config::default()
            },
            Memory::seeded().failing(),
        );

        let err = service.execute(cmd()).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Db(_)));
    }
}
