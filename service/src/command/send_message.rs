//! [`Command`] for sending a [`Message`] into a [`Conversation`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        conversation::{self, Content, Message, MessageId},
        user, Conversation,
    },
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::domain::User;

use super::Command;

/// [`Command`] for sending a [`Message`] into a [`Conversation`].
#[derive(Clone, Debug)]
pub struct SendMessage {
    /// ID of the [`Conversation`] to send the [`Message`] into.
    pub conversation_id: conversation::Id,

    /// ID of the [`User`] sending the [`Message`].
    pub sender_id: user::Id,

    /// Raw text of the [`Message`].
    pub content: String,
}

impl<Db> Command<SendMessage> for Service<Db>
where
    Db: Database<
            Select<By<Option<Conversation>, conversation::Id>>,
            Ok = Option<Conversation>,
            Err = Traced<database::Error>,
        > + Database<Insert<Conversation>, Err = Traced<database::Error>>,
{
    type Ok = Conversation;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SendMessage) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SendMessage {
            conversation_id,
            sender_id,
            content,
        } = cmd;

        let content = Content::new(content)
            .ok_or(E::EmptyContent)
            .map_err(tracerr::wrap!())?;

        let mut conversation = self
            .database()
            .execute(Select(By::<Option<Conversation>, _>::new(
                conversation_id.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|c| c.owner == sender_id)
            .ok_or(E::ConversationNotExists(conversation_id))
            .map_err(tracerr::wrap!())?;

        conversation.push(Message {
            id: MessageId::random(),
            sender: sender_id,
            content,
            sent_at: DateTime::now().coerce(),
            is_read: true,
        });

        self.database()
            .execute(Insert(conversation.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!(
            "`Message` sent into `Conversation(id: {})`",
            conversation.id,
        );

        Ok(conversation)
    }
}

/// Error of [`SendMessage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Conversation`] with the provided ID does not exist.
    #[display("`Conversation(id: {_0})` does not exist")]
    ConversationNotExists(#[error(not(source))] conversation::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Message`] has no text.
    #[display("`Message` cannot be blank")]
    EmptyContent,
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{conversation, user},
        infra::Memory,
        query, Command as _, Config, Query as _, Service,
    };

    use super::{ExecutionError, SendMessage};

    fn cmd(content: &str) -> SendMessage {
        SendMessage {
            conversation_id: conversation::Id::new("1").unwrap(),
            sender_id: user::Id::new("user1").unwrap(),
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn appends_and_becomes_last() {
        let service = Service::new(Config::default(), Memory::seeded());

        let conversation =
            service.execute(cmd("  See you soon! ")).await.unwrap();

        assert_eq!(conversation.messages.len(), 4);
        let last = conversation.last_message().unwrap();
        assert_eq!(last.content.as_ref(), "See you soon!");
        assert!(last.is_read);
        assert_eq!(last.sender.as_ref(), "user1");

        let stored = service
            .execute(query::conversation::ById::by(conversation.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.messages.len(), 4);
    }

    #[tokio::test]
    async fn rejects_blank_messages() {
        let service = Service::new(Config::default(), Memory::seeded());

        for blank in ["", "   ", "\n\t"] {
            let err = service.execute(cmd(blank)).await.unwrap_err();
            assert!(matches!(err.as_ref(), ExecutionError::EmptyContent));
        }

        let stored = service
            .execute(query::conversation::ById::by(
                conversation::Id::new("1").unwrap(),
            ))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.messages.len(), 3);
    }

    #[tokio::test]
    async fn rejects_unknown_conversation() {
        let service = Service::new(Config::default(), Memory::seeded());

        let err = service
            .execute(SendMessage {
                conversation_id: conversation::Id::new("9").unwrap(),
                ..cmd("Hi")
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::ConversationNotExists(_),
        ));
    }
}
