//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] out of a whole `amount` of `currency` units.
    #[must_use]
    pub fn whole(amount: u32, currency: Currency) -> Self {
        Self {
            amount: Decimal::from(amount),
            currency,
        }
    }

    /// Creates a zero [`Money`] in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Indicates whether this [`Money`] is not negative.
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        !self.amount.is_sign_negative() || self.amount.is_zero()
    }

    /// Rounds this [`Money`] to a whole amount, with halves rounded away from
    /// zero (`12.5` becomes `13`, `-12.5` becomes `-13`).
    #[must_use]
    pub fn round_half_up(self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(
                0,
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency: self.currency,
        }
    }
}

/// Renders [`Money`] as `{amount}{currency}` (`123.45USD`), or with the
/// currency symbol in front when the alternate flag is set (`$123.45`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        let amount = amount.normalize();
        let amount = amount
            .is_integer()
            .then(|| amount.to_i128())
            .flatten()
            .map_or_else(|| amount.to_string(), |a| a.to_string());
        if f.alternate() {
            write!(f, "{}{amount}", currency.symbol())
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "Pound Sterling."]
        Gbp = 3,
    }
}

impl Currency {
    /// Returns the symbol of this [`Currency`].
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
        }
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::str::FromStr as _;

    use serde::{
        de::Error as _, Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::Money;

    impl Serialize for Money {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let s = String::deserialize(d)?;
            Self::from_str(&s).map_err(D::Error::custom)
        }
    }
}
