//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{database, Database, Memory},
};

impl Database<Select<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let state = self.read().await.map_err(tracerr::wrap!())?;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }
}
