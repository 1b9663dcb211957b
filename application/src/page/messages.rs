//! Messages page.

use std::fmt;

use service::{
    command::{self, mark_conversation_read, send_message},
    domain::{conversation, user, Conversation},
    query,
    Command as _, Query as _,
};

use crate::{define_error, AsError, Context, Error};

/// Inbox view.
#[derive(Clone, Debug)]
pub struct Inbox {
    /// ID of the signed-in account.
    pub me: user::Id,

    /// [`Conversation`]s of the signed-in account.
    pub conversations: Vec<Conversation>,

    /// Opened [`Conversation`], if any.
    pub opened: Option<Thread>,
}

/// Opened [`Conversation`] view.
#[derive(Clone, Debug)]
pub struct Thread {
    /// ID of the signed-in account.
    pub me: user::Id,

    /// Opened [`Conversation`].
    pub conversation: Conversation,
}

/// Shows the inbox of the signed-in account, optionally opening a
/// [`Conversation`].
///
/// Opening a [`Conversation`] doesn't mark it as read unless asked to.
///
/// # Errors
///
/// Errors if:
/// - no account is signed in;
/// - the [`Conversation`] to open doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(conversation.id = ?open, mark_read = mark_read),
)]
pub async fn show(
    ctx: &Context,
    open: Option<conversation::Id>,
    mark_read: bool,
) -> Result<Inbox, Error> {
    let me = ctx.current_user().await?;

    if let Some(id) = open.clone().filter(|_| mark_read) {
        _ = ctx
            .service()
            .execute(command::MarkConversationRead {
                conversation_id: id,
                reader_id: me.id.clone(),
            })
            .await
            .map_err(AsError::into_error)?;
    }

    let conversations = ctx
        .service()
        .execute(query::conversations::ByOwner::by(me.id.clone()))
        .await
        .map_err(AsError::into_error)?;
    let opened = open
        .map(|id| {
            conversations
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .map(|conversation| Thread {
                    me: me.id.clone(),
                    conversation,
                })
                .ok_or(ThreadError::NotFound)
        })
        .transpose()?;

    Ok(Inbox {
        me: me.id,
        conversations,
        opened,
    })
}

/// Sends a message into a [`Conversation`] of the signed-in account.
///
/// # Errors
///
/// Errors if:
/// - no account is signed in;
/// - the [`Conversation`] doesn't exist;
/// - the message is blank.
#[tracing::instrument(skip_all, fields(conversation.id = %id))]
pub async fn send(
    ctx: &Context,
    id: conversation::Id,
    content: String,
) -> Result<Thread, Error> {
    let me = ctx.current_user().await?;

    let conversation = ctx
        .service()
        .execute(command::SendMessage {
            conversation_id: id,
            sender_id: me.id.clone(),
            content,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Thread {
        me: me.id,
        conversation,
    })
}

impl fmt::Display for Inbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            me,
            conversations,
            opened,
        } = self;

        if conversations.is_empty() {
            return writeln!(f, "No messages yet.");
        }
        for c in conversations {
            write!(
                f,
                "[{}] {} · {}",
                c.id, c.participant.name, c.property.title,
            )?;
            let unread = c.unread_count(me);
            if unread > 0 {
                write!(f, " · {unread} unread")?;
            }
            writeln!(f)?;
            if let Some(m) = c.last_message() {
                writeln!(
                    f,
                    "    {} · {}",
                    m.content,
                    m.sent_at.date().to_human(),
                )?;
            }
        }
        if let Some(thread) = opened {
            writeln!(f)?;
            write!(f, "{thread}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { me, conversation: c } = self;

        writeln!(f, "{} · {}", c.participant.name, c.property.title)?;
        for m in &c.messages {
            let who = if &m.sender == me {
                "You"
            } else {
                c.participant.name.as_ref()
            };
            let mark = if m.is_read { "" } else { " •" };
            writeln!(
                f,
                "  {} {who}: {}{mark}",
                m.sent_at.date().to_human(),
                m.content,
            )?;
        }
        Ok(())
    }
}

define_error! {
    enum ThreadError {
        #[code = "NOT_FOUND"]
        #[exit = 4]
        #[message = "Conversation not found"]
        NotFound,
    }
}

impl AsError for send_message::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "VALIDATION_FAILED"]
                #[exit = 2]
                #[message = "Message cannot be blank"]
                EmptyContent,
            }
        }

        match self {
            Self::ConversationNotExists(_) => {
                Some(ThreadError::NotFound.into())
            }
            Self::Db(e) => e.try_as_error(),
            Self::EmptyContent => Some(Error::EmptyContent.into()),
        }
    }
}

impl AsError for mark_conversation_read::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::ConversationNotExists(_) => {
                Some(ThreadError::NotFound.into())
            }
            Self::Db(e) => e.try_as_error(),
        }
    }
}
