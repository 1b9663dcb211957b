//! [`Command`] for marking a [`Conversation`] as read.

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{conversation, user, Conversation},
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::domain::{conversation::Message, User};

use super::Command;

/// [`Command`] for marking every incoming [`Message`] of a [`Conversation`]
/// as read.
///
/// Returns the number of [`Message`]s marked.
#[derive(Clone, Debug)]
pub struct MarkConversationRead {
    /// ID of the [`Conversation`] to be marked.
    pub conversation_id: conversation::Id,

    /// ID of the [`User`] reading the [`Conversation`].
    pub reader_id: user::Id,
}

impl<Db> Command<MarkConversationRead> for Service<Db>
where
    Db: Database<
            Select<By<Option<Conversation>, conversation::Id>>,
            Ok = Option<Conversation>,
            Err = Traced<database::Error>,
        > + Database<Insert<Conversation>, Err = Traced<database::Error>>,
{
    type Ok = usize;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: MarkConversationRead,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let MarkConversationRead {
            conversation_id,
            reader_id,
        } = cmd;

        let mut conversation = self
            .database()
            .execute(Select(By::<Option<Conversation>, _>::new(
                conversation_id.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|c| c.owner == reader_id)
            .ok_or(E::ConversationNotExists(conversation_id))
            .map_err(tracerr::wrap!())?;

        let marked = conversation.mark_read(&reader_id);
        if marked > 0 {
            self.database()
                .execute(Insert(conversation))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        Ok(marked)
    }
}

/// Error of [`MarkConversationRead`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Conversation`] with the provided ID does not exist.
    #[display("`Conversation(id: {_0})` does not exist")]
    ConversationNotExists(#[error(not(source))] conversation::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{conversation, user},
        infra::Memory,
        query, Command as _, Config, Query as _, Service,
    };

    use super::MarkConversationRead;

    #[tokio::test]
    async fn clears_unread_only_when_asked() {
        let service = Service::new(Config::default(), Memory::seeded());
        let reader = user::Id::new("user1").unwrap();
        let id = conversation::Id::new("1").unwrap();

        let selected = service
            .execute(query::conversation::ById::by(id.clone()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(selected.unread_count(&reader), 1);

        let marked = service
            .execute(MarkConversationRead {
                conversation_id: id.clone(),
                reader_id: reader.clone(),
            })
            .await
            .unwrap();
        assert_eq!(marked, 1);

        let stored = service
            .execute(query::conversation::ById::by(id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.unread_count(&reader), 0);
    }
}
