//! [`Query`] collection related to the [`Trip`]s of a [`User`].

use common::operations::By;

use crate::{domain::user, read::Trip};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries all the [`Trip`]s of a [`User`].
pub type ByUser = DatabaseQuery<By<Vec<Trip>, user::Id>>;

#[cfg(test)]
mod spec {
    use crate::{
        domain::user,
        infra::Memory,
        read::trip::{self, Tab},
        Config, Query as _, Service,
    };

    use super::ByUser;

    #[tokio::test]
    async fn joins_properties() {
        let service = Service::new(Config::default(), Memory::seeded());
        let today = "2024-02-01".parse().unwrap();

        let trips = service
            .execute(ByUser::by(user::Id::new("user1").unwrap()))
            .await
            .unwrap();

        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].property.id, trips[0].booking.property_id);
        assert_eq!(trip::on_tab(&trips, Tab::Upcoming, today).len(), 1);
        assert_eq!(trip::on_tab(&trips, Tab::Past, today).len(), 1);
    }
}
