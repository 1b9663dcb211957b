//! [`Query`] collection related to the multiple [`Property`]s.

use common::operations::By;

use crate::{domain::Property, read::property::list};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Property`]s satisfying a [`list::Filter`].
pub type List = DatabaseQuery<By<Vec<Property>, list::Filter>>;
