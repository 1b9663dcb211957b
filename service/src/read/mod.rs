//! Read entities definitions.

pub mod map;
pub mod property;
pub mod trip;

pub use self::trip::Trip;
