//! [`Quote`] of a [`Booking`] price.

use common::{Date, Money, Percent};
use rust_decimal::Decimal;
use smart_default::SmartDefault;

#[cfg(doc)]
use crate::domain::Booking;

use super::Stay;

/// Fees charged on top of the nightly price of a stay.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Fees {
    /// Flat cleaning fee, in the currency of the nightly price.
    #[default(Decimal::from(50))]
    pub cleaning_fee: Decimal,

    /// Service fee charged as a share of the subtotal.
    #[default(DEFAULT_SERVICE_FEE)]
    pub service_fee: Percent,
}

/// Default [`Fees::service_fee`].
#[expect(unsafe_code, reason = "value is in range")]
const DEFAULT_SERVICE_FEE: Percent =
    unsafe { Percent::new_unchecked(Decimal::TEN) };

/// Price breakdown of a stay.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quote {
    /// Number of nights.
    pub nights: u32,

    /// Nightly price multiplied by the number of nights.
    pub subtotal: Money,

    /// Flat cleaning fee.
    pub cleaning_fee: Money,

    /// Service fee, rounded half up to a whole amount.
    pub service_fee: Money,

    /// Sum of the subtotal and all the fees.
    pub total: Money,
}

impl Quote {
    /// Calculates a [`Quote`] for the provided nightly `price` and dates.
    ///
    /// Missing dates, or a check-out not after the check-in, produce a zero
    /// [`Quote`] where even the cleaning fee is not charged.
    #[must_use]
    pub fn calculate(
        price: Money,
        check_in: Option<Date>,
        check_out: Option<Date>,
        fees: &Fees,
    ) -> Self {
        let stay = check_in
            .zip(check_out)
            .and_then(|(check_in, check_out)| Stay::new(check_in, check_out));
        match stay {
            Some(stay) => Self::for_stay(price, &stay, fees),
            None => Self::zero(price),
        }
    }

    /// Calculates a [`Quote`] for the provided nightly `price` and a valid
    /// [`Stay`].
    #[must_use]
    pub fn for_stay(price: Money, stay: &Stay, fees: &Fees) -> Self {
        let currency = price.currency;
        let nights = stay.nights();

        let subtotal = Money {
            amount: price.amount * Decimal::from(nights),
            currency,
        };
        let cleaning_fee = Money {
            amount: fees.cleaning_fee,
            currency,
        };
        let service_fee = Money {
            amount: fees.service_fee.of(subtotal.amount),
            currency,
        }
        .round_half_up();
        let total = Money {
            amount: subtotal.amount + cleaning_fee.amount + service_fee.amount,
            currency,
        };

        Self {
            nights,
            subtotal,
            cleaning_fee,
            service_fee,
            total,
        }
    }

    /// Returns a zero [`Quote`] in the currency of the provided `price`.
    #[must_use]
    pub fn zero(price: Money) -> Self {
        let zero = Money::zero(price.currency);
        Self {
            nights: 0,
            subtotal: zero,
            cleaning_fee: zero,
            service_fee: zero,
            total: zero,
        }
    }

    /// Indicates whether this [`Quote`] is bookable, i.e. covers at least a
    /// single night.
    #[must_use]
    pub fn is_bookable(&self) -> bool {
        self.nights > 0
    }
}
