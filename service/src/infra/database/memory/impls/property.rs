//! [`Property`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{database, Database, Memory},
    read::property::list,
};

impl Database<Select<By<Option<Property>, property::Id>>> for Memory {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let state = self.read().await.map_err(tracerr::wrap!())?;
        Ok(state.properties.iter().find(|p| p.id == id).cloned())
    }
}

impl Database<Select<By<Vec<Property>, list::Filter>>> for Memory {
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        let state = self.read().await.map_err(tracerr::wrap!())?;
        Ok(filter.apply(state.properties.iter().cloned()))
    }
}
