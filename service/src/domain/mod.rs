//! Domain definitions.

pub mod booking;
pub mod conversation;
pub mod property;
pub mod user;
pub mod wishlist;

pub use self::{
    booking::Booking, conversation::Conversation, property::Property,
    user::User, wishlist::Wishlist,
};
