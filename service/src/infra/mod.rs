//! Infrastructure layer.

pub mod auth;
pub mod database;
pub mod fixtures;

pub use self::{
    auth::Auth,
    database::{Database, Memory},
};
