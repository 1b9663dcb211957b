//! [`Trip`] definitions.

use common::{define_kind, Date};

use crate::domain::{booking, Booking, Property};

/// [`Booking`] of a [`User`] together with the booked [`Property`].
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct Trip {
    /// [`Booking`] of this [`Trip`].
    pub booking: Booking,

    /// Booked [`Property`].
    pub property: Property,
}

impl Trip {
    /// Returns the [`Status`] of this [`Trip`] relative to `today`.
    #[must_use]
    pub fn status(&self, today: Date) -> Status {
        if self.booking.status == booking::Status::Cancelled {
            return Status::Cancelled;
        }

        let stay = &self.booking.stay;
        if today < stay.check_in() {
            Status::Upcoming
        } else if stay.contains(today) {
            Status::Current
        } else {
            Status::Past
        }
    }

    /// Returns the [`Tab`] this [`Trip`] is listed under on `today`.
    ///
    /// Cancelled [`Trip`]s are listed under no [`Tab`].
    #[must_use]
    pub fn tab(&self, today: Date) -> Option<Tab> {
        match self.status(today) {
            Status::Upcoming | Status::Current => Some(Tab::Upcoming),
            Status::Past => Some(Tab::Past),
            Status::Cancelled => None,
        }
    }
}

define_kind! {
    #[doc = "Status of a [`Trip`] relative to a given day."]
    #[rename_all = "lowercase"]
    enum Status {
        #[doc = "The stay hasn't started yet."]
        Upcoming = 1,

        #[doc = "The stay is in progress."]
        Current = 2,

        #[doc = "The stay is over."]
        Past = 3,

        #[doc = "The [`Booking`] was cancelled."]
        Cancelled = 4,
    }
}

define_kind! {
    #[doc = "Tab of the trips page."]
    #[rename_all = "lowercase"]
    enum Tab {
        #[doc = "Upcoming and current [`Trip`]s."]
        Upcoming = 1,

        #[doc = "Finished [`Trip`]s."]
        Past = 2,
    }
}

/// Splits the provided [`Trip`]s into the ones listed under the provided
/// [`Tab`] on `today`, preserving their order.
#[must_use]
pub fn on_tab(trips: &[Trip], tab: Tab, today: Date) -> Vec<&Trip> {
    trips.iter().filter(|t| t.tab(today) == Some(tab)).collect()
}

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::{domain::booking, infra::fixtures};

    use super::{on_tab, Status, Tab, Trip};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn trip() -> Trip {
        let booking = fixtures::bookings().swap_remove(0);
        let property = fixtures::properties()
            .into_iter()
            .find(|p| p.id == booking.property_id)
            .unwrap();
        Trip { booking, property }
    }

    #[test]
    fn classifies_relative_to_today() {
        let trip = trip();

        assert_eq!(trip.status(date("2024-02-14")), Status::Upcoming);
        assert_eq!(trip.status(date("2024-02-15")), Status::Current);
        assert_eq!(trip.status(date("2024-02-20")), Status::Current);
        assert_eq!(trip.status(date("2024-02-21")), Status::Past);
    }

    #[test]
    fn cancelled_wins_over_dates() {
        let mut trip = trip();
        trip.booking.status = booking::Status::Cancelled;

        for today in ["2024-02-01", "2024-02-16", "2024-03-01"] {
            assert_eq!(trip.status(date(today)), Status::Cancelled);
            assert_eq!(trip.tab(date(today)), None);
        }

        let trips = vec![trip];
        for tab in [Tab::Upcoming, Tab::Past] {
            assert!(on_tab(&trips, tab, date("2024-02-01")).is_empty());
        }
    }

    #[test]
    fn splits_into_tabs() {
        let trips = vec![trip()];

        assert_eq!(on_tab(&trips, Tab::Upcoming, date("2024-02-16")).len(), 1);
        assert_eq!(on_tab(&trips, Tab::Past, date("2024-02-16")).len(), 0);
        assert_eq!(on_tab(&trips, Tab::Past, date("2024-03-01")).len(), 1);
    }
}
