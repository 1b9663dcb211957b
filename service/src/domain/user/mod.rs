//! [`User`] definitions.

use std::{str::FromStr, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Marketplace user, either a guest or a host.
#[derive(Clone, Debug)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Email`] of this [`User`].
    pub email: Email,

    /// Display [`Name`] of this [`User`].
    pub display_name: Name,

    /// [`Avatar`] of this [`User`], if any.
    pub avatar: Option<Avatar>,

    /// Indicator whether this [`User`] hosts any properties.
    pub is_host: bool,

    /// [`DateTime`] when this [`User`] was created.
    pub created_at: CreationDateTime,
}

impl User {
    /// Splits the display [`Name`] of this [`User`] into a first and a last
    /// name, the way a booking form pre-fills them.
    #[must_use]
    pub fn first_and_last_name(&self) -> (Option<&str>, Option<&str>) {
        let mut parts = self.display_name.as_ref().split(' ');
        let first = parts.next().filter(|s| !s.is_empty());
        let last = parts.next().filter(|s| !s.is_empty());
        (first, last)
    }
}

/// ID of a [`User`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
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
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        !id.is_empty()
            && id.len() <= 64
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `user::Id`")
    }
}

impl TryFrom<String> for Id {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `user::Id`")
    }
}

/// Name of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Returns the first character of this [`Name`], used when no [`Avatar`]
    /// is available.
    #[expect(clippy::missing_panics_doc, reason = "never empty")]
    #[must_use]
    pub fn initial(&self) -> char {
        self.0.chars().next().expect("non-empty `Name`")
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Email of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `email` is valid.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Option<Self> {
        let email = email.into();
        Self::check(&email).then_some(Self(email))
    }

    /// Checks whether the given `email` is a valid [`Email`].
    fn check(email: impl AsRef<str>) -> bool {
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        let email = email.as_ref();
        email.len() <= 256 && REGEX.is_match(email)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^([+]?\d{1,2}[-\s]?|)\d{3}[-\s]?\d{3}[-\s]?\d{4}$")
                .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// URL of a [`User`] avatar image.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Avatar(String);

impl Avatar {
    /// Creates a new [`Avatar`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`Avatar`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        url.len() <= 2048
            && !url.contains(char::is_whitespace)
            && Url::parse(url)
                .is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
    }
}

impl FromStr for Avatar {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Avatar`")
    }
}

/// Partial update of a [`User`] profile.
///
/// [`None`] fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdate {
    /// New display [`Name`].
    pub display_name: Option<Name>,

    /// New [`Email`].
    pub email: Option<Email>,

    /// New [`Avatar`].
    pub avatar: Option<Avatar>,
}

impl ProfileUpdate {
    /// Applies this [`ProfileUpdate`] to the provided [`User`].
    pub fn apply_to(self, user: &mut User) {
        let Self {
            display_name,
            email,
            avatar,
        } = self;
        if let Some(name) = display_name {
            user.display_name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        if let Some(avatar) = avatar {
            user.avatar = Some(avatar);
        }
    }
}

/// [`DateTime`] when a [`User`] was created.
pub type CreationDateTime = DateTimeOf<(User, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{Avatar, Email, Id, Name, Phone, ProfileUpdate, User};

    fn user(name: &str) -> User {
        User {
            id: Id::new("user1").unwrap(),
            email: Email::new("guest@example.com").unwrap(),
            display_name: Name::new(name).unwrap(),
            avatar: None,
            is_host: false,
            created_at: DateTime::UNIX_EPOCH.coerce(),
        }
    }

    #[test]
    fn validates_ids() {
        assert!(Id::new("user1").is_some());
        assert!(Id::new("host_2").is_some());
        assert!(Id::new("").is_none());
        assert!(Id::new("user 1").is_none());
        assert!(Id::new("user/1").is_none());
    }

    #[test]
    fn validates_emails() {
        assert!(Email::new("guest@example.com").is_some());
        assert!(Email::new("guest@example").is_none());
        assert!(Email::new("guest example.com").is_none());
        assert!(Email::new("").is_none());
    }

    #[test]
    fn validates_phones() {
        assert!(Phone::new("555-123-4567").is_some());
        assert!(Phone::new("+1 555 123 4567").is_some());
        assert!(Phone::new("12345").is_none());
    }

    #[test]
    fn validates_avatars() {
        assert!(Avatar::new("https://images.example.com/a.png").is_some());
        assert!(Avatar::new("ftp://images.example.com/a.png").is_none());
        assert!(Avatar::new("https://images.example.com/a b.png").is_none());
    }

    #[test]
    fn splits_display_name() {
        assert_eq!(
            user("Jane Doe").first_and_last_name(),
            (Some("Jane"), Some("Doe")),
        );
        assert_eq!(user("Jane").first_and_last_name(), (Some("Jane"), None));
        assert_eq!(user("Jane").display_name.initial(), 'J');
    }

    #[test]
    fn applies_partial_profile_update() {
        let mut user = user("Jane Doe");

        ProfileUpdate {
            display_name: Some(Name::new("Jane Smith").unwrap()),
            ..ProfileUpdate::default()
        }
        .apply_to(&mut user);

        assert_eq!(user.display_name.as_ref(), "Jane Smith");
        assert_eq!(user.email.as_ref(), "guest@example.com");
        assert!(user.avatar.is_none());
    }

    #[test]
    fn ids_reject_invalid_input() {
        assert!("user 1".parse::<Id>().is_err());
        assert!(Id::try_from(String::from("user 1")).is_err());
        assert_eq!(
            Id::try_from(String::from("user1")).unwrap(),
            Id::new("user1").unwrap(),
        );
    }
}
