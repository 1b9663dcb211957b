//! [`Property`] definitions.

use std::{fmt, str::FromStr};

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, Into};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

/// Lodging unit listed on the marketplace.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Title`] of this [`Property`].
    pub title: Title,

    /// [`Description`] of this [`Property`].
    pub description: Description,

    /// Price of a single night in this [`Property`].
    pub price: Money,

    /// [`Location`] label of this [`Property`].
    pub location: Location,

    /// Geographic [`Coordinates`] of this [`Property`].
    pub coordinates: Coordinates,

    /// [`Images`] of this [`Property`].
    pub images: Images,

    /// [`Host`] of this [`Property`].
    pub host: Host,

    /// Average [`Rating`] of this [`Property`].
    pub rating: Rating,

    /// Number of reviews this [`Property`] has received.
    pub review_count: u32,

    /// [`Amenity`] labels of this [`Property`].
    pub amenities: Vec<Amenity>,

    /// [`Type`] of this [`Property`].
    pub kind: Type,

    /// Maximum number of [`Guests`] this [`Property`] accommodates.
    pub max_guests: Guests,

    /// Number of bedrooms in this [`Property`].
    pub bedrooms: u16,

    /// Number of bathrooms in this [`Property`].
    pub bathrooms: u16,

    /// Indicator whether this [`Property`] can be booked without the
    /// [`Host`] approval.
    pub is_instant_bookable: bool,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Property`] was last updated.
    pub updated_at: ModificationDateTime,
}

impl Property {
    /// Indicates whether this [`Property`] has the provided [`Amenity`],
    /// ignoring ASCII case.
    #[must_use]
    pub fn has_amenity(&self, amenity: &Amenity) -> bool {
        self.amenities.iter().any(|a| a.matches(amenity))
    }

    /// Indicates whether this [`Property`] accommodates the provided number
    /// of [`Guests`].
    #[must_use]
    pub fn accommodates(&self, guests: Guests) -> bool {
        guests <= self.max_guests
    }
}

/// ID of a [`Property`].
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
        Self::new(s).ok_or("invalid `property::Id`")
    }
}

impl TryFrom<String> for Id {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `property::Id`")
    }
}

/// Title of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 256
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Description of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `description` is valid.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        Self::check(&description).then_some(Self(description))
    }

    /// Checks whether the given `description` is a valid [`Description`].
    fn check(description: impl AsRef<str>) -> bool {
        let description = description.as_ref();
        description.trim() == description
            && !description.is_empty()
            && description.len() <= 4096
    }
}

/// Location label of a [`Property`] (`Malibu, California`).
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
pub struct Location(String);

impl Location {
    /// Creates a new [`Location`] if the given `location` is valid.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Option<Self> {
        let location = location.into();
        Self::check(&location).then_some(Self(location))
    }

    /// Checks whether the given `location` is a valid [`Location`].
    fn check(location: impl AsRef<str>) -> bool {
        let location = location.as_ref();
        location.trim() == location
            && !location.is_empty()
            && location.len() <= 512
    }
}

impl FromStr for Location {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Location`")
    }
}

/// Type label of a [`Property`] (`Villa`, `Cabin`, `Castle`, etc).
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
pub struct Type(String);

impl Type {
    /// Well-known [`Type`] labels offered by the filter panel.
    pub const KNOWN: &'static [&'static str] = &[
        "House",
        "Apartment",
        "Villa",
        "Cabin",
        "Loft",
        "Castle",
        "Condo",
        "Townhouse",
    ];

    /// Creates a new [`Type`] if the given `kind` is valid.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Option<Self> {
        let kind = kind.into();
        Self::check(&kind).then_some(Self(kind))
    }

    /// Checks whether the given `kind` is a valid [`Type`].
    fn check(kind: impl AsRef<str>) -> bool {
        let kind = kind.as_ref();
        kind.trim() == kind && !kind.is_empty() && kind.len() <= 64
    }
}

impl FromStr for Type {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `property::Type`")
    }
}

/// Amenity label of a [`Property`] (`WiFi`, `Pool`, `Hot Tub`, etc).
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
pub struct Amenity(String);

impl Amenity {
    /// Well-known [`Amenity`] labels offered by the filter panel.
    pub const KNOWN: &'static [&'static str] = &[
        "WiFi",
        "Kitchen",
        "Pool",
        "Parking",
        "Hot Tub",
        "Gym",
        "Beach Access",
        "Fireplace",
        "Balcony",
        "Garden",
        "BBQ",
        "Workspace",
    ];

    /// Creates a new [`Amenity`] if the given `amenity` is valid.
    #[must_use]
    pub fn new(amenity: impl Into<String>) -> Option<Self> {
        let amenity = amenity.into();
        Self::check(&amenity).then_some(Self(amenity))
    }

    /// Indicates whether this [`Amenity`] is the same as the `other` one,
    /// ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Checks whether the given `amenity` is a valid [`Amenity`].
    fn check(amenity: impl AsRef<str>) -> bool {
        let amenity = amenity.as_ref();
        amenity.trim() == amenity && !amenity.is_empty() && amenity.len() <= 64
    }
}

impl FromStr for Amenity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Amenity`")
    }
}

/// Geographic coordinates in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    /// Latitude, expected in `-90..=90` range.
    pub latitude: f64,

    /// Longitude, expected in `-180..=180` range.
    pub longitude: f64,
}

impl Coordinates {
    /// Returns these [`Coordinates`] clamped into the valid ranges.
    ///
    /// Non-finite components collapse to `0`.
    #[must_use]
    pub fn clamped(self) -> Self {
        let clamp = |v: f64, bound: f64| {
            if v.is_nan() {
                0.0
            } else {
                v.clamp(-bound, bound)
            }
        };
        Self {
            latitude: clamp(self.latitude, 90.0),
            longitude: clamp(self.longitude, 180.0),
        }
    }
}

/// URL of a [`Property`] image.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`ImageUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        url.len() <= 2048
            && !url.contains(char::is_whitespace)
            && Url::parse(url)
                .is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
    }
}

/// Non-empty ordered list of [`ImageUrl`]s, shown as a carousel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Images(Vec<ImageUrl>);

impl Images {
    /// Creates new [`Images`] if the provided list is not empty.
    #[must_use]
    pub fn new(urls: Vec<ImageUrl>) -> Option<Self> {
        (!urls.is_empty()).then_some(Self(urls))
    }

    /// Returns the cover [`ImageUrl`].
    #[expect(clippy::missing_panics_doc, reason = "never empty")]
    #[must_use]
    pub fn cover(&self) -> &ImageUrl {
        self.0.first().expect("non-empty `Images`")
    }

    /// Returns the carousel position of the provided `index`, wrapping around
    /// the end.
    #[must_use]
    pub fn position(&self, index: usize) -> usize {
        index % self.0.len()
    }

    /// Returns the [`ImageUrl`] at the provided carousel `index`, wrapping
    /// around the end.
    #[must_use]
    pub fn get(&self, index: usize) -> &ImageUrl {
        &self.0[self.position(index)]
    }

    /// Returns the carousel index following the `current` one, wrapping to
    /// the first image after the last one.
    #[must_use]
    pub fn next_index(&self, current: usize) -> usize {
        (self.position(current) + 1) % self.0.len()
    }

    /// Returns the carousel index preceding the `current` one, wrapping to
    /// the last image before the first one.
    #[must_use]
    pub fn prev_index(&self, current: usize) -> usize {
        match self.position(current) {
            0 => self.0.len() - 1,
            current => current - 1,
        }
    }

    /// Returns the number of [`ImageUrl`]s.
    #[expect(clippy::len_without_is_empty, reason = "never empty")]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the [`ImageUrl`]s.
    pub fn iter(&self) -> impl Iterator<Item = &ImageUrl> {
        self.0.iter()
    }
}

/// Host of a [`Property`].
#[derive(Clone, Debug)]
pub struct Host {
    /// ID of the [`User`] hosting the [`Property`].
    pub id: user::Id,

    /// Name of the [`Host`].
    pub name: user::Name,

    /// Avatar of the [`Host`], if any.
    pub avatar: Option<user::Avatar>,

    /// Indicator whether the [`Host`] is recognized as a superhost.
    pub is_superhost: bool,
}

/// Average rating of a [`Property`] in `0..=5` range.
///
/// Zero means the [`Property`] has not been rated yet.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct Rating(Decimal);

impl Rating {
    /// Creates a new [`Rating`] if the provided value is in `0..=5` range.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (val >= Decimal::ZERO && val <= Decimal::from(5)).then_some(Self(val))
    }

    /// Indicates whether this [`Rating`] is an actual rating.
    #[must_use]
    pub fn is_rated(self) -> bool {
        !self.0.is_zero()
    }

    /// Returns the inner value of this [`Rating`].
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }
}

/// Renders a [`Rating`] with exactly one decimal place (`4.9`, `5.0`).
impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0.round_dp(1);
        value.rescale(1);
        write!(f, "{value}")
    }
}

impl FromStr for Rating {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Rating`")
    }
}

/// Positive number of guests.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Guests(u16);

impl Guests {
    /// A single guest.
    pub const ONE: Self = Self(1);

    /// Creates new [`Guests`] if the provided `count` is positive.
    #[must_use]
    pub const fn new(count: u16) -> Option<Self> {
        if count == 0 {
            None
        } else {
            Some(Self(count))
        }
    }

    /// Returns the number of [`Guests`].
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Returns the number of [`Guests`] as a floating-point value.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for Guests {
    fn default() -> Self {
        Self::ONE
    }
}

impl FromStr for Guests {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u16>()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Guests` number")
    }
}

/// Returns the provided [`Rating`] as a floating-point value, for sorting and
/// averaging in presentation code.
#[must_use]
pub fn rating_to_f64(rating: Rating) -> f64 {
    rating.0.to_f64().unwrap_or_default()
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;

/// [`DateTime`] when a [`Property`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Property, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::{Amenity, Coordinates, Guests, Id, ImageUrl, Images, Rating};

    fn images(count: usize) -> Images {
        Images::new(
            (0..count)
                .map(|i| {
                    ImageUrl::new(format!("https://img.example.com/{i}.jpg"))
                        .unwrap()
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn ids_are_always_validated() {
        assert!(Id::new("a b").is_none());
        assert!("a b".parse::<Id>().is_err());
        assert!(Id::try_from(String::from("a b")).is_err());
        assert!(Id::try_from(String::new()).is_err());
        assert_eq!(Id::try_from(String::from("42")).unwrap().as_ref(), "42");
    }

    #[test]
    fn images_are_never_empty() {
        assert!(Images::new(vec![]).is_none());
        assert_eq!(images(1).len(), 1);
        assert_eq!(
            images(3).cover().as_ref(),
            "https://img.example.com/0.jpg",
        );
    }

    #[test]
    fn carousel_wraps_around() {
        let images = images(3);

        assert_eq!(images.next_index(0), 1);
        assert_eq!(images.next_index(2), 0);
        assert_eq!(images.prev_index(0), 2);
        assert_eq!(images.prev_index(2), 1);
        assert_eq!(images.get(4).as_ref(), "https://img.example.com/1.jpg");
        assert_eq!(images.position(4), 1);
        assert_eq!(images.next_index(5), 0);
        assert_eq!(images.prev_index(3), 2);

        let single = super::Images::new(vec![images.cover().clone()]).unwrap();
        assert_eq!(single.next_index(0), 0);
        assert_eq!(single.prev_index(0), 0);
    }

    #[test]
    fn rating_bounds() {
        assert!("4.9".parse::<Rating>().is_ok());
        assert!("0".parse::<Rating>().is_ok());
        assert!("5".parse::<Rating>().is_ok());
        assert!("5.1".parse::<Rating>().is_err());
        assert!("-0.1".parse::<Rating>().is_err());

        assert!(!"0".parse::<Rating>().unwrap().is_rated());
        assert_eq!("5".parse::<Rating>().unwrap().to_string(), "5.0");
        assert_eq!("4.87".parse::<Rating>().unwrap().to_string(), "4.9");
    }

    #[test]
    fn guests_are_positive() {
        assert!(Guests::new(0).is_none());
        assert_eq!(Guests::new(4).unwrap().get(), 4);
        assert!("0".parse::<Guests>().is_err());
        assert_eq!(Guests::default(), Guests::ONE);
    }

    #[test]
    fn amenities_match_ignoring_case() {
        let wifi = Amenity::new("WiFi").unwrap();

        assert!(wifi.matches(&Amenity::new("wifi").unwrap()));
        assert!(!wifi.matches(&Amenity::new("Pool").unwrap()));
        assert!(Amenity::new(" Pool").is_none());
    }

    #[test]
    fn clamps_coordinates() {
        let c = Coordinates {
            latitude: 120.0,
            longitude: -500.0,
        }
        .clamped();
        assert_eq!(c.latitude, 90.0);
        assert_eq!(c.longitude, -180.0);

        let c = Coordinates {
            latitude: f64::NAN,
            longitude: f64::INFINITY,
        }
        .clamped();
        assert_eq!(c.latitude, 0.0);
        assert_eq!(c.longitude, 180.0);
    }
}
