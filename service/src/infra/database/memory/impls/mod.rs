//! [`Database`] implementations for [`Memory`].
//!
//! [`Database`]: crate::infra::Database
//! [`Memory`]: super::Memory

mod booking;
mod conversation;
mod property;
mod user;
mod wishlist;
