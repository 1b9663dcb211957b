//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;

/// Floating-point percentage in `0..=100` range.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("{_0}%")]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided value is not less
    /// than `0` and not greater than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            #[expect(
                clippy::allow_attributes,
                reason = "`expect` doesn't work for `unsafe_code` here"
            )]
            #[allow(unsafe_code, reason = "invariants checked already")]
            Some(unsafe { Self::new_unchecked(val) })
        }
    }

    /// Creates a new [`Percent`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must not be less than `0` and not greater than
    /// `100`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }

    /// Returns the inner value of this [`Percent`] (`10` for `10%`).
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Applies this [`Percent`] to the provided `amount`.
    ///
    /// No rounding is performed.
    #[must_use]
    pub fn of(self, amount: Decimal) -> Decimal {
        amount * self.0 / Decimal::ONE_HUNDRED
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Decimal::from_str(s.strip_suffix('%').unwrap_or(s).trim_end())
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::str::FromStr as _;

    use serde::{
        de::Error as _, Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::Percent;

    impl Serialize for Percent {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Percent {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let s = String::deserialize(d)?;
            Self::from_str(&s).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn from_str() {
        assert_eq!(
            Percent::from_str("10").unwrap().value(),
            Decimal::TEN,
        );
        assert_eq!(
            Percent::from_str("10%").unwrap().value(),
            Decimal::TEN,
        );
        assert_eq!(Percent::from_str("12.5 %").unwrap().to_string(), "12.5%");

        assert!(Percent::from_str("-1").is_err());
        assert!(Percent::from_str("100.1").is_err());
        assert!(Percent::from_str("ten").is_err());
    }

    #[test]
    fn applies_to_amount() {
        let ten = Percent::new(Decimal::TEN).unwrap();

        assert_eq!(ten.of(Decimal::from(1250)), Decimal::from(125));
        assert_eq!(ten.of(Decimal::from(125)), "12.5".parse().unwrap());
        assert_eq!(ten.of(Decimal::ZERO), Decimal::ZERO);
    }
}
