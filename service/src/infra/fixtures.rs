//! Canonical seed data of the marketplace.
//!
//! Entries that fail validation are skipped rather than panicking, and the
//! unit tests below guard that none are.

use std::time::Duration;

use common::{money::Currency, Date, DateTime, Money};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    booking::{self, quote::Fees, Quote, Stay},
    conversation::{self, Content, Message, MessageId, Participant, PropertyRef},
    property::{self, Coordinates, Host, Images},
    user, Booking, Conversation, Property, User,
};

/// ID of the [`User`] signed in by default.
pub const DEFAULT_USER: &str = "user1";

/// [`Currency`] of every seeded price.
pub const CURRENCY: Currency = Currency::Usd;

/// Seconds since the Unix epoch of `2024-01-01T00:00:00Z`.
const NEW_YEAR_2024: u64 = 1_704_067_200;

/// Static description of a seeded [`Property`].
struct Listing {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    price: u32,
    location: &'static str,
    coordinates: (f64, f64),
    images: &'static [&'static str],
    host: (&'static str, &'static str, &'static str, bool),
    rating: (i64, u32),
    review_count: u32,
    amenities: &'static [&'static str],
    kind: &'static str,
    max_guests: u16,
    bedrooms: u16,
    bathrooms: u16,
    is_instant_bookable: bool,
}

const LISTINGS: &[Listing] = &[
    Listing {
        id: "1",
        title: "Cozy Beachfront Villa",
        description: "Beautiful villa with ocean views",
        price: 250,
        location: "Malibu, California",
        coordinates: (34.0259, -118.7798),
        images: &[
            "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=800&h=600&fit=crop",
            "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?w=800&h=600&fit=crop",
            "https://images.unsplash.com/photo-1571003123894-1f0594d2b5d9?w=800&h=600&fit=crop",
        ],
        host: (
            "host1",
            "Sarah",
            "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=100&h=100&fit=crop&crop=face",
            true,
        ),
        rating: (49, 1),
        review_count: 127,
        amenities: &["WiFi", "Pool", "Kitchen", "Parking"],
        kind: "Villa",
        max_guests: 8,
        bedrooms: 4,
        bathrooms: 3,
        is_instant_bookable: true,
    },
    Listing {
        id: "2",
        title: "Modern City Apartment",
        description: "Stylish apartment in downtown",
        price: 120,
        location: "New York, NY",
        coordinates: (40.7128, -74.0060),
        images: &[
            "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=800&h=600&fit=crop",
            "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=800&h=600&fit=crop",
        ],
        host: (
            "host2",
            "Michael",
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100&h=100&fit=crop&crop=face",
            false,
        ),
        rating: (47, 1),
        review_count: 89,
        amenities: &["WiFi", "Kitchen", "Gym", "Doorman"],
        kind: "Apartment",
        max_guests: 4,
        bedrooms: 2,
        bathrooms: 2,
        is_instant_bookable: true,
    },
    Listing {
        id: "3",
        title: "Mountain Cabin Retreat",
        description: "Peaceful cabin in the mountains",
        price: 180,
        location: "Aspen, Colorado",
        coordinates: (39.1911, -106.8175),
        images: &[
            "https://images.unsplash.com/photo-1449824913935-59a10b8d2000?w=800&h=600&fit=crop",
            "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=600&fit=crop",
        ],
        host: (
            "host3",
            "Emma",
            "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=100&h=100&fit=crop&crop=face",
            true,
        ),
        rating: (48, 1),
        review_count: 156,
        amenities: &["WiFi", "Fireplace", "Hot Tub", "Hiking"],
        kind: "Cabin",
        max_guests: 6,
        bedrooms: 3,
        bathrooms: 2,
        is_instant_bookable: false,
    },
    Listing {
        id: "4",
        title: "Luxury Downtown Loft",
        description: "Spacious loft with city views",
        price: 300,
        location: "San Francisco, CA",
        coordinates: (37.7749, -122.4194),
        images: &[
            "https://images.unsplash.com/photo-1502672023488-70e25813eb80?w=800&h=600&fit=crop",
            "https://images.unsplash.com/photo-1484154218962-a197022b5858?w=800&h=600&fit=crop",
        ],
        host: (
            "host4",
            "David",
            "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&h=100&fit=crop&crop=face",
            false,
        ),
        rating: (46, 1),
        review_count: 203,
        amenities: &["WiFi", "Kitchen", "Balcony", "Workspace"],
        kind: "Loft",
        max_guests: 4,
        bedrooms: 2,
        bathrooms: 2,
        is_instant_bookable: false,
    },
    Listing {
        id: "5",
        title: "Tropical Beach House",
        description: "Paradise by the ocean",
        price: 400,
        location: "Maui, Hawaii",
        coordinates: (20.7984, -156.3319),
        images: &[
            "https://images.unsplash.com/photo-1520637836862-4d197d17c93a?w=800&h=600&fit=crop",
            "https://images.unsplash.com/photo-1544551763-46a013bb70d5?w=800&h=600&fit=crop",
        ],
        host: (
            "host5",
            "Aloha",
            "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=100&h=100&fit=crop&crop=face",
            true,
        ),
        rating: (49, 1),
        review_count: 312,
        amenities: &["WiFi", "Pool", "Beach Access", "Snorkeling"],
        kind: "House",
        max_guests: 10,
        bedrooms: 5,
        bathrooms: 4,
        is_instant_bookable: true,
    },
    Listing {
        id: "6",
        title: "Historic Castle Stay",
        description: "Experience medieval luxury",
        price: 500,
        location: "Edinburgh, Scotland",
        coordinates: (55.9533, -3.1883),
        images: &[
            "https://images.unsplash.com/photo-1520637836862-4d197d17c93a?w=800&h=600&fit=crop",
            "https://images.unsplash.com/photo-1571003123894-1f0594d2b5d9?w=800&h=600&fit=crop",
        ],
        host: (
            "host6",
            "Lord William",
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100&h=100&fit=crop&crop=face",
            false,
        ),
        rating: (48, 1),
        review_count: 89,
        amenities: &["WiFi", "Fireplace", "Library", "Garden"],
        kind: "Castle",
        max_guests: 12,
        bedrooms: 6,
        bathrooms: 5,
        is_instant_bookable: false,
    },
];

/// Returns the [`DateTime`] the provided number of seconds after
/// `2024-01-01T00:00:00Z`, or before it for negative `secs`.
fn since_new_year(secs: i64) -> DateTime {
    let base = DateTime::UNIX_EPOCH + Duration::from_secs(NEW_YEAR_2024);
    let offset = Duration::from_secs(secs.unsigned_abs());
    if secs < 0 {
        base - offset
    } else {
        base + offset
    }
}

/// Returns the seeded [`Property`]s in their canonical order.
#[must_use]
pub fn properties() -> Vec<Property> {
    LISTINGS.iter().filter_map(property).collect()
}

fn property(l: &Listing) -> Option<Property> {
    let (host_id, host_name, host_avatar, is_superhost) = l.host;
    let created_at = since_new_year(0);

    Some(Property {
        id: property::Id::new(l.id)?,
        title: property::Title::new(l.title)?,
        description: property::Description::new(l.description)?,
        price: Money::whole(l.price, CURRENCY),
        location: property::Location::new(l.location)?,
        coordinates: Coordinates {
            latitude: l.coordinates.0,
            longitude: l.coordinates.1,
        },
        images: Images::new(
            l.images
                .iter()
                .map(|url| property::ImageUrl::new(*url))
                .collect::<Option<_>>()?,
        )?,
        host: Host {
            id: user::Id::new(host_id)?,
            name: user::Name::new(host_name)?,
            avatar: Some(user::Avatar::new(host_avatar)?),
            is_superhost,
        },
        rating: property::Rating::new(Decimal::new(l.rating.0, l.rating.1))?,
        review_count: l.review_count,
        amenities: l
            .amenities
            .iter()
            .map(|a| property::Amenity::new(*a))
            .collect::<Option<_>>()?,
        kind: property::Type::new(l.kind)?,
        max_guests: property::Guests::new(l.max_guests)?,
        bedrooms: l.bedrooms,
        bathrooms: l.bathrooms,
        is_instant_bookable: l.is_instant_bookable,
        created_at: created_at.coerce(),
        updated_at: created_at.coerce(),
    })
}

/// Returns the seeded [`User`]s: the default guest followed by the hosts.
#[must_use]
pub fn users() -> Vec<User> {
    let guest = (|| {
        Some(User {
            id: user::Id::new(DEFAULT_USER)?,
            email: user::Email::new("jane.doe@example.com")?,
            display_name: user::Name::new("Jane Doe")?,
            avatar: None,
            is_host: false,
            created_at: since_new_year(-86_400 * 30).coerce(),
        })
    })();

    guest
        .into_iter()
        .chain(LISTINGS.iter().filter_map(|l| {
            let (id, name, avatar, _) = l.host;
            Some(User {
                id: user::Id::new(id)?,
                email: user::Email::new(format!("{id}@example.com"))?,
                display_name: user::Name::new(name)?,
                avatar: Some(user::Avatar::new(avatar)?),
                is_host: true,
                created_at: since_new_year(-86_400 * 365).coerce(),
            })
        }))
        .collect()
}

/// Returns the seeded [`Booking`]s of the default [`User`].
///
/// Total prices are quoted with the default [`Fees`].
#[must_use]
pub fn bookings() -> Vec<Booking> {
    let booking = |n: u128,
                   property_id: &str,
                   price: u32,
                   check_in: (i32, u8, u8),
                   check_out: (i32, u8, u8),
                   guests: u16,
                   created_at: i64| {
        let stay = Stay::new(
            Date::from_ymd(check_in.0, check_in.1, check_in.2)?,
            Date::from_ymd(check_out.0, check_out.1, check_out.2)?,
        )?;
        Some(Booking {
            id: booking::Id::from(Uuid::from_u128(n)),
            property_id: property::Id::new(property_id)?,
            user_id: user::Id::new(DEFAULT_USER)?,
            stay,
            guests: property::Guests::new(guests)?,
            total_price: Quote::for_stay(
                Money::whole(price, CURRENCY),
                &stay,
                &Fees::default(),
            )
            .total,
            status: booking::Status::Confirmed,
            created_at: since_new_year(created_at).coerce(),
        })
    };

    [
        booking(1, "1", 250, (2024, 2, 15), (2024, 2, 20), 4, 86_400 * 19),
        booking(2, "2", 120, (2024, 1, 10), (2024, 1, 15), 2, -86_400 * 17),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Returns the seeded [`Conversation`]s of the default [`User`].
#[must_use]
pub fn conversations() -> Vec<Conversation> {
    // Seconds since new year of `2024-07-16T00:00:00Z` and
    // `2024-07-10T00:00:00Z`.
    const JULY_16: i64 = 86_400 * 197;
    const JULY_10: i64 = 86_400 * 191;

    let message = |id: &str, sender: &str, text: &str, at: i64, is_read| {
        Some(Message {
            id: MessageId::new(id)?,
            sender: user::Id::new(sender)?,
            content: Content::new(text)?,
            sent_at: since_new_year(at).coerce(),
            is_read,
        })
    };
    let conversation = |id: &str,
                        listing: usize,
                        thumbnail: &str,
                        messages: Vec<Option<Message>>| {
        let property = LISTINGS.get(listing).and_then(property)?;
        Some(Conversation {
            id: conversation::Id::new(id)?,
            owner: user::Id::new(DEFAULT_USER)?,
            participant: Participant {
                id: property.host.id,
                name: property.host.name,
                avatar: property.host.avatar,
            },
            property: PropertyRef {
                id: property.id,
                title: property.title,
                image: property::ImageUrl::new(thumbnail)?,
            },
            messages: messages.into_iter().collect::<Option<_>>()?,
        })
    };

    [
        conversation(
            "1",
            0,
            "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=100&h=100&fit=crop",
            vec![
                message(
                    "m1",
                    DEFAULT_USER,
                    "Hi Sarah! I have a booking for next month and wanted to \
                     ask about the parking situation.",
                    JULY_16 + 10 * 3600,
                    true,
                ),
                message(
                    "m2",
                    "host1",
                    "Hello! Thanks for reaching out. There's free parking \
                     available right in front of the villa. No need to worry \
                     about finding a spot!",
                    JULY_16 + 12 * 3600 + 15 * 60,
                    true,
                ),
                message(
                    "m3",
                    "host1",
                    "Great! Looking forward to hosting you. The check-in \
                     instructions will be sent closer to your arrival date.",
                    JULY_16 + 14 * 3600 + 30 * 60,
                    false,
                ),
            ],
        ),
        conversation(
            "2",
            1,
            "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=100&h=100&fit=crop",
            vec![
                message(
                    "m4",
                    "host2",
                    "Hope you enjoyed your stay! Please don't forget to leave \
                     a review.",
                    JULY_10 + 9 * 3600,
                    true,
                ),
                message(
                    "m5",
                    DEFAULT_USER,
                    "Thank you for the great stay! Everything was perfect.",
                    JULY_10 + 16 * 3600 + 45 * 60,
                    true,
                ),
            ],
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Returns IDs of the [`Property`]s saved by the default [`User`], in the
/// order they were saved.
#[must_use]
pub fn wishlist() -> Vec<property::Id> {
    ["1", "5"].into_iter().filter_map(property::Id::new).collect()
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, DateTime, Money};

    use crate::domain::user;

    use super::{bookings, conversations, properties, users, wishlist};

    #[test]
    fn every_entry_is_valid() {
        assert_eq!(properties().len(), 6);
        assert_eq!(users().len(), 7);
        assert_eq!(bookings().len(), 2);
        assert_eq!(conversations().len(), 2);
        assert_eq!(wishlist().len(), 2);
    }

    #[test]
    fn booking_totals_are_quoted() {
        let totals = bookings()
            .into_iter()
            .map(|b| b.total_price)
            .collect::<Vec<_>>();

        assert_eq!(
            totals,
            [
                Money::whole(1425, Currency::Usd),
                Money::whole(710, Currency::Usd),
            ],
        );
    }

    #[test]
    fn conversations_are_ordered() {
        let local = user::Id::new(super::DEFAULT_USER).unwrap();
        let c = conversations();

        assert_eq!(c[0].messages.len(), 3);
        assert_eq!(c[0].unread_count(&local), 1);
        assert_eq!(
            c[0].last_message().unwrap().sent_at.coerce::<()>(),
            DateTime::from_rfc3339("2024-07-16T14:30:00Z").unwrap(),
        );
        assert_eq!(c[1].unread_count(&local), 0);
        assert_eq!(c[1].last_message().unwrap().id.as_ref(), "m5");
    }
}
