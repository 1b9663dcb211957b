//! [`Command`] definition.

pub mod cancel_booking;
pub mod create_booking;
pub mod mark_conversation_read;
pub mod send_message;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    cancel_booking::CancelBooking, create_booking::CreateBooking,
    mark_conversation_read::MarkConversationRead, send_message::SendMessage,
};
