//! [`Wishlist`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{user, Wishlist},
    infra::{database, Database, Memory},
};

impl Database<Select<By<Wishlist, user::Id>>> for Memory {
    type Ok = Wishlist;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Wishlist, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        let state = self.read().await.map_err(tracerr::wrap!())?;
        let properties = state
            .wishlists
            .get(&user_id)
            .into_iter()
            .flatten()
            .filter_map(|id| state.properties.iter().find(|p| &p.id == id))
            .cloned()
            .collect();
        Ok(Wishlist::new(properties))
    }
}
