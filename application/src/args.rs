//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use common::Date;
use rust_decimal::Decimal;
use service::{
    domain::{booking, conversation, property, user},
    read::{property::Category, trip::Tab},
};

/// Lodging marketplace in a terminal.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    /// Day to consider as today, in `YYYY-MM-DD` format.
    #[arg(long, global = true)]
    pub today: Option<Date>,

    /// Page to render.
    #[command(subcommand)]
    pub page: Page,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Page of the marketplace.
#[derive(Debug, Subcommand)]
pub enum Page {
    /// Home feed, optionally narrowed to a category.
    Home {
        /// Category to show.
        #[arg(long, default_value_t = Category::All)]
        category: Category,
    },

    /// Search results.
    Search(Search),

    /// Details of a single property.
    Property {
        /// ID of the property.
        id: property::Id,

        /// Arrival date.
        #[arg(long)]
        check_in: Option<Date>,

        /// Departure date.
        #[arg(long)]
        check_out: Option<Date>,

        /// Index of the image to show, wrapping around.
        #[arg(long, default_value_t = 0)]
        image: usize,

        /// Toggles whether the property is saved to favorites.
        #[arg(long)]
        favorite: bool,
    },

    /// Price breakdown of a stay.
    Quote {
        /// ID of the property.
        id: property::Id,

        /// Arrival date.
        #[arg(long)]
        check_in: Option<Date>,

        /// Departure date.
        #[arg(long)]
        check_out: Option<Date>,
    },

    /// Booking form submission.
    Book(Book),

    /// Trips of the signed-in account.
    Trips {
        /// Tab to show.
        #[arg(long, default_value_t = Tab::Upcoming)]
        tab: Tab,
    },

    /// Cancellation of an upcoming trip.
    Cancel {
        /// ID of the booking.
        id: booking::Id,
    },

    /// Conversations of the signed-in account.
    Messages {
        /// ID of the conversation to open.
        conversation: Option<conversation::Id>,

        /// Marks the opened conversation as read.
        #[arg(long, requires = "conversation")]
        mark_read: bool,
    },

    /// Sending a message into a conversation.
    Send {
        /// ID of the conversation.
        conversation: conversation::Id,

        /// Text of the message.
        content: String,
    },

    /// Saved properties of the signed-in account.
    Wishlist {
        /// IDs of the properties to toggle before showing the list.
        #[arg(long)]
        toggle: Vec<property::Id>,
    },

    /// Profile of the signed-in account.
    Profile(Profile),
}

/// Search bar and filter panel input.
#[derive(Debug, clap::Args)]
pub struct Search {
    /// Where to go.
    #[arg(long)]
    pub location: Option<String>,

    /// Arrival date.
    #[arg(long)]
    pub check_in: Option<Date>,

    /// Departure date.
    #[arg(long)]
    pub check_out: Option<Date>,

    /// Number of adults.
    #[arg(long, default_value_t = 1)]
    pub adults: u16,

    /// Number of children.
    #[arg(long, default_value_t = 0)]
    pub children: u16,

    /// Number of infants.
    #[arg(long, default_value_t = 0)]
    pub infants: u16,

    /// Lowest nightly price.
    #[arg(long)]
    pub price_min: Option<Decimal>,

    /// Highest nightly price.
    #[arg(long)]
    pub price_max: Option<Decimal>,

    /// Acceptable property types.
    #[arg(long = "type")]
    pub kinds: Vec<property::Type>,

    /// Required amenities.
    #[arg(long = "amenity")]
    pub amenities: Vec<property::Amenity>,

    /// Minimal number of bedrooms.
    #[arg(long)]
    pub min_bedrooms: Option<u16>,

    /// Minimal number of bathrooms.
    #[arg(long)]
    pub min_bathrooms: Option<u16>,

    /// Only instantly bookable properties.
    #[arg(long)]
    pub instant_book: bool,

    /// Only properties of superhosts.
    #[arg(long)]
    pub superhost: bool,

    /// Resets the filter panel before searching.
    #[arg(long)]
    pub clear_filters: bool,

    /// Shows the results on a map.
    #[arg(long)]
    pub map: bool,
}

/// Booking form input.
#[derive(Debug, clap::Args)]
pub struct Book {
    /// ID of the property.
    pub id: property::Id,

    /// Arrival date.
    #[arg(long)]
    pub check_in: Option<Date>,

    /// Departure date.
    #[arg(long)]
    pub check_out: Option<Date>,

    /// Number of guests.
    #[arg(long, default_value_t = 1)]
    pub guests: u16,

    /// First name of the main guest, pre-filled from the profile.
    #[arg(long)]
    pub first_name: Option<user::Name>,

    /// Last name of the main guest, pre-filled from the profile.
    #[arg(long)]
    pub last_name: Option<user::Name>,

    /// E-mail of the main guest, pre-filled from the profile.
    #[arg(long)]
    pub email: Option<user::Email>,

    /// Phone of the main guest.
    #[arg(long)]
    pub phone: Option<user::Phone>,
}

/// Profile page input.
#[derive(Debug, clap::Args)]
pub struct Profile {
    /// Signs in before showing the profile.
    #[arg(long, conflicts_with = "logout")]
    pub login: bool,

    /// Signs out.
    #[arg(long)]
    pub logout: bool,

    /// New display name.
    #[arg(long)]
    pub display_name: Option<user::Name>,

    /// New e-mail.
    #[arg(long)]
    pub email: Option<user::Email>,

    /// New avatar URL.
    #[arg(long)]
    pub avatar: Option<user::Avatar>,
}
