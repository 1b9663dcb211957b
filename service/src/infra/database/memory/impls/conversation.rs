//! [`Conversation`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{conversation, user, Conversation},
    infra::{database, Database, Memory},
};

impl Database<Select<By<Vec<Conversation>, user::Id>>> for Memory {
    type Ok = Vec<Conversation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Conversation>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let owner = by.into_inner();
        let state = self.read().await.map_err(tracerr::wrap!())?;
        Ok(state
            .conversations
            .iter()
            .filter(|c| c.owner == owner)
            .cloned()
            .collect())
    }
}

impl Database<Select<By<Option<Conversation>, conversation::Id>>> for Memory {
    type Ok = Option<Conversation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Conversation>, conversation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let state = self.read().await.map_err(tracerr::wrap!())?;
        Ok(state.conversations.iter().find(|c| c.id == id).cloned())
    }
}

impl Database<Insert<Conversation>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(conversation): Insert<Conversation>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.write().await.map_err(tracerr::wrap!())?;
        match state
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation.id)
        {
            Some(existing) => *existing = conversation,
            None => state.conversations.push(conversation),
        }
        Ok(())
    }
}
