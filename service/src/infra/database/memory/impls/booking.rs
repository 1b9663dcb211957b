//! [`Booking`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{booking, user, Booking},
    infra::{database, Database, Memory},
    read::Trip,
};

impl Database<Select<By<Option<Booking>, booking::Id>>> for Memory {
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let state = self.read().await.map_err(tracerr::wrap!())?;
        Ok(state.bookings.iter().find(|b| b.id == id).cloned())
    }
}

impl Database<Insert<Booking>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.write().await.map_err(tracerr::wrap!())?;
        match state.bookings.iter_mut().find(|b| b.id == booking.id) {
            Some(existing) => *existing = booking,
            None => state.bookings.push(booking),
        }
        Ok(())
    }
}

impl Database<Select<By<Vec<Trip>, user::Id>>> for Memory {
    type Ok = Vec<Trip>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Trip>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        let state = self.read().await.map_err(tracerr::wrap!())?;
        Ok(state
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter_map(|b| {
                let property = state
                    .properties
                    .iter()
                    .find(|p| p.id == b.property_id)?;
                Some(Trip {
                    booking: b.clone(),
                    property: property.clone(),
                })
            })
            .collect())
    }
}
