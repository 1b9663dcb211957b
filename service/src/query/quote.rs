//! [`Query`] for quoting a stay at a [`Property`].

use common::{
    operations::{By, Select},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{booking::Quote, property, Property},
    infra::{database, Database},
    Service,
};

use super::Query;

/// [`Query`] calculating a [`Quote`] for a stay at a [`Property`] with the
/// configured fees.
#[derive(Clone, Debug)]
pub struct QuotePrice {
    /// ID of the [`Property`] to be quoted.
    pub property_id: property::Id,

    /// Arrival [`Date`], if chosen.
    pub check_in: Option<Date>,

    /// Departure [`Date`], if chosen.
    pub check_out: Option<Date>,
}

impl<Db> Query<QuotePrice> for Service<Db>
where
    Db: Database<
        Select<By<Option<Property>, property::Id>>,
        Ok = Option<Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = (Property, Quote);
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: QuotePrice) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let QuotePrice {
            property_id,
            check_in,
            check_out,
        } = query;

        let property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(
                property_id.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let quote = Quote::calculate(
            property.price,
            check_in,
            check_out,
            &self.config().fees,
        );

        Ok((property, quote))
    }
}

/// Error of [`QuotePrice`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};
    use rust_decimal::Decimal;

    use crate::{
        domain::{booking::quote::Fees, property},
        infra::Memory,
        Config, Query as _, Service,
    };

    use super::{ExecutionError, QuotePrice};

    fn query(check_in: &str, check_out: &str) -> QuotePrice {
        QuotePrice {
            property_id: property::Id::new("1").unwrap(),
            check_in: check_in.parse().ok(),
            check_out: check_out.parse().ok(),
        }
    }

    #[tokio::test]
    async fn quotes_with_configured_fees() {
        let service = Service::new(Config::default(), Memory::seeded());

        let (_, quote) = service
            .execute(query("2024-02-15", "2024-02-20"))
            .await
            .unwrap();
        assert_eq!(quote.total, Money::whole(1425, Currency::Usd));

        let service = Service::new(
            Config {
                fees: Fees {
                    cleaning_fee: Decimal::ZERO,
                    ..Fees::default()
                },
                ..Config::default()
            },
            Memory::seeded(),
        );
        let (_, quote) = service
            .execute(query("2024-02-15", "2024-02-20"))
            .await
            .unwrap();
        assert_eq!(quote.total, Money::whole(1375, Currency::Usd));
    }

    #[tokio::test]
    async fn zero_for_reversed_dates() {
        let service = Service::new(Config::default(), Memory::seeded());

        let (_, quote) = service
            .execute(query("2024-02-20", "2024-02-15"))
            .await
            .unwrap();

        assert_eq!(quote.nights, 0);
        assert_eq!(quote.total, Money::zero(Currency::Usd));
        assert!(!quote.is_bookable());
    }

    #[tokio::test]
    async fn rejects_unknown_property() {
        let service = Service::new(Config::default(), Memory::seeded());

        let err = service
            .execute(QuotePrice {
                property_id: property::Id::new("7").unwrap(),
                ..query("2024-02-15", "2024-02-20")
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::PropertyNotExists(_)));
    }
}
