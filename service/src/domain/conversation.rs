//! [`Conversation`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{property, user};
#[cfg(doc)]
use crate::domain::{Property, User};

/// Thread of [`Message`]s between a [`User`] and a host about a
/// [`Property`].
#[derive(Clone, Debug)]
pub struct Conversation {
    /// ID of this [`Conversation`].
    pub id: Id,

    /// ID of the [`User`] owning this [`Conversation`].
    pub owner: user::Id,

    /// Counterparty of this [`Conversation`].
    pub participant: Participant,

    /// [`Property`] this [`Conversation`] is about.
    pub property: PropertyRef,

    /// [`Message`]s of this [`Conversation`] in the order they were sent.
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Returns the most recent [`Message`] of this [`Conversation`], if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns the number of unread [`Message`]s sent to the `local` [`User`].
    #[must_use]
    pub fn unread_count(&self, local: &user::Id) -> usize {
        self.messages
            .iter()
            .filter(|m| !m.is_read && &m.sender != local)
            .count()
    }

    /// Appends the provided [`Message`] to this [`Conversation`].
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Marks all the [`Message`]s sent to the `local` [`User`] as read.
    ///
    /// Returns the number of [`Message`]s marked.
    pub fn mark_read(&mut self, local: &user::Id) -> usize {
        let mut marked = 0;
        for m in &mut self.messages {
            if !m.is_read && &m.sender != local {
                m.is_read = true;
                marked += 1;
            }
        }
        marked
    }
}

/// ID of a [`Conversation`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[serde(try_from = "String")]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let valid = !id.is_empty()
            && id.len() <= 64
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        valid.then_some(Self(id))
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `conversation::Id`")
    }
}

impl TryFrom<String> for Id {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `conversation::Id`")
    }
}

/// Counterparty of a [`Conversation`].
#[derive(Clone, Debug)]
pub struct Participant {
    /// ID of the counterparty [`User`].
    pub id: user::Id,

    /// Name of the counterparty.
    pub name: user::Name,

    /// Avatar of the counterparty, if any.
    pub avatar: Option<user::Avatar>,
}

/// Reference to the [`Property`] a [`Conversation`] is about.
#[derive(Clone, Debug)]
pub struct PropertyRef {
    /// ID of the [`Property`].
    pub id: property::Id,

    /// Title of the [`Property`].
    pub title: property::Title,

    /// Cover image of the [`Property`].
    pub image: property::ImageUrl,
}

/// Single message of a [`Conversation`].
#[derive(Clone, Debug)]
pub struct Message {
    /// ID of this [`Message`].
    pub id: MessageId,

    /// ID of the [`User`] who sent this [`Message`].
    pub sender: user::Id,

    /// [`Content`] of this [`Message`].
    pub content: Content,

    /// [`DateTime`] when this [`Message`] was sent.
    pub sent_at: SendingDateTime,

    /// Indicator whether this [`Message`] has been read by its recipient.
    pub is_read: bool,
}

/// ID of a [`Message`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[serde(try_from = "String")]
pub struct MessageId(String);

impl MessageId {
    /// Creates a new random [`MessageId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a new [`MessageId`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let valid = !id.is_empty()
            && id.len() <= 64
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "_-".contains(c));
        valid.then_some(Self(id))
    }
}

impl TryFrom<String> for MessageId {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `conversation::MessageId`")
    }
}

/// Text of a [`Message`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Content(String);

impl Content {
    /// Creates a new [`Content`] if the given `text` is not blank.
    ///
    /// Surrounding whitespace is trimmed.
    #[must_use]
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let text = text.as_ref().trim();
        (!text.is_empty() && text.len() <= 4096)
            .then(|| Self(text.to_owned()))
    }
}

impl FromStr for Content {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("blank message `Content`")
    }
}

/// [`DateTime`] when a [`Message`] was sent.
pub type SendingDateTime = DateTimeOf<(Message, unit::Sending)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::domain::{property, user};

    use super::{
        Content, Conversation, Id, Message, MessageId, Participant,
        PropertyRef,
    };

    fn message(sender: &str, is_read: bool) -> Message {
        Message {
            id: MessageId::random(),
            sender: user::Id::new(sender).unwrap(),
            content: Content::new("Hello").unwrap(),
            sent_at: DateTime::UNIX_EPOCH.coerce(),
            is_read,
        }
    }

    fn conversation(messages: Vec<Message>) -> Conversation {
        Conversation {
            id: Id::new("1").unwrap(),
            owner: user::Id::new("user1").unwrap(),
            participant: Participant {
                id: user::Id::new("host1").unwrap(),
                name: user::Name::new("Sarah").unwrap(),
                avatar: None,
            },
            property: PropertyRef {
                id: property::Id::new("1").unwrap(),
                title: property::Title::new("Cozy Beachfront Villa").unwrap(),
                image: property::ImageUrl::new("https://img.example.com/1.jpg")
                    .unwrap(),
            },
            messages,
        }
    }

    #[test]
    fn rejects_blank_content() {
        assert!(Content::new("").is_none());
        assert!(Content::new("   \n\t").is_none());
        assert_eq!(Content::new("  Hi there ").unwrap().as_ref(), "Hi there");
    }

    #[test]
    fn counts_only_incoming_unread() {
        let local = user::Id::new("user1").unwrap();
        let c = conversation(vec![
            message("user1", false),
            message("host1", true),
            message("host1", false),
        ]);

        assert_eq!(c.unread_count(&local), 1);
    }

    #[test]
    fn last_message_follows_pushes() {
        let mut c = conversation(vec![]);
        assert!(c.last_message().is_none());

        let m = message("user1", true);
        let id = m.id.clone();
        c.push(m);

        assert_eq!(c.messages.len(), 1);
        assert_eq!(c.last_message().map(|m| &m.id), Some(&id));
    }

    #[test]
    fn marks_incoming_as_read() {
        let local = user::Id::new("user1").unwrap();
        let mut c = conversation(vec![
            message("host1", false),
            message("host1", false),
            message("user1", false),
        ]);

        assert_eq!(c.mark_read(&local), 2);
        assert_eq!(c.unread_count(&local), 0);
        assert!(!c.messages[2].is_read);
    }

    #[test]
    fn ids_reject_invalid_input() {
        assert!("conv 1".parse::<Id>().is_err());
        assert!(Id::try_from(String::from("conv 1")).is_err());
        assert!(MessageId::try_from(String::new()).is_err());
        assert!(MessageId::try_from(MessageId::random().to_string()).is_ok());
    }
}
