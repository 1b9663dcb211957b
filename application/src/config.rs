//! [`Config`]-related definitions.

use std::time;

use common::{money::Currency, Money, Percent};
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error};
use serde::Deserialize;
use service::{domain::booking::quote::Fees, infra::fixtures, read::map};
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Pricing configuration.
    #[serde(default)]
    pub pricing: Pricing,

    /// Booking configuration.
    #[serde(default)]
    pub booking: Booking,

    /// Session configuration.
    #[serde(default)]
    pub session: Session,

    /// Map configuration.
    #[serde(default)]
    pub map: Map,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        let config: Self = ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()?;
        _ = config
            .service()
            .map_err(|e| ConfigError::Message(format!("`pricing`: {e}")))?;
        Ok(config)
    }

    /// Returns the [`service::Config`] described by this [`Config`].
    ///
    /// # Errors
    ///
    /// Errors if the [`Pricing`] is invalid.
    pub fn service(&self) -> Result<service::Config, PricingError> {
        Ok(service::Config {
            fees: self.pricing.try_into()?,
            submission_delay: self.booking.submission_delay,
        })
    }
}

/// Pricing configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Pricing {
    /// Cleaning fee charged once per stay.
    ///
    /// Must be non-negative and in the currency of the listed properties.
    #[default(Money::whole(50, fixtures::CURRENCY))]
    pub cleaning_fee: Money,

    /// Service fee charged on top of the nightly subtotal.
    #[default(Fees::default().service_fee)]
    pub service_fee: Percent,
}

impl TryFrom<Pricing> for Fees {
    type Error = PricingError;

    fn try_from(value: Pricing) -> Result<Self, Self::Error> {
        let Pricing {
            cleaning_fee,
            service_fee,
        } = value;

        if cleaning_fee.currency != fixtures::CURRENCY {
            return Err(PricingError::CurrencyMismatch {
                expected: fixtures::CURRENCY,
                actual: cleaning_fee.currency,
            });
        }
        if !cleaning_fee.is_non_negative() {
            return Err(PricingError::NegativeCleaningFee { fee: cleaning_fee });
        }

        Ok(Self {
            cleaning_fee: cleaning_fee.amount,
            service_fee,
        })
    }
}

/// Error of converting [`Pricing`] into [`Fees`].
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum PricingError {
    /// Cleaning fee is not in the currency of the listed properties.
    #[display("cleaning fee must be in {expected}, not {actual}")]
    CurrencyMismatch {
        /// [`Currency`] of the listed properties.
        expected: Currency,

        /// [`Currency`] of the configured cleaning fee.
        actual: Currency,
    },

    /// Cleaning fee is negative.
    #[display("cleaning fee must not be negative, got {fee}")]
    NegativeCleaningFee {
        /// Configured cleaning fee.
        fee: Money,
    },
}

/// Booking configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Booking {
    /// Simulated delay of submitting a booking.
    #[default(time::Duration::from_secs(2))]
    #[serde(with = "humantime_serde")]
    pub submission_delay: time::Duration,
}

/// Session configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Session {
    /// ID of the account the session belongs to.
    #[default(fixtures::DEFAULT_USER.to_owned())]
    pub user: String,

    /// Indicator whether the account is signed in when the session starts.
    #[default(true)]
    pub signed_in: bool,
}

/// Map configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Map {
    /// Strategy of placing markers on the search results map.
    #[default(map::Strategy::Grid)]
    pub strategy: map::Strategy,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    Info,

    /// Designates hazardous situations.
    #[default]
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::{fs, time::Duration};

    use common::{money::Currency, Money};
    use rust_decimal::Decimal;
    use service::{domain::booking::quote::Fees, read::map};

    use super::{Config, Pricing, PricingError};

    #[test]
    fn defaults_to_original_pricing() {
        let config = Config::default();

        let service = config.service().unwrap();
        assert_eq!(service.fees.cleaning_fee, Decimal::from(50));
        assert_eq!(service.fees.service_fee.value(), Decimal::TEN);
        assert_eq!(service.submission_delay, Duration::from_secs(2));
        assert_eq!(config.session.user, "user1");
        assert!(config.session.signed_in);
        assert_eq!(config.map.strategy, map::Strategy::Grid);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let config = Config::new("definitely/missing/config").unwrap();

        assert_eq!(config.pricing.cleaning_fee.amount, Decimal::from(50));
    }

    #[test]
    fn rejects_invalid_cleaning_fees() {
        let negative = Pricing {
            cleaning_fee: "-100USD".parse().unwrap(),
            ..Pricing::default()
        };
        assert!(matches!(
            Fees::try_from(negative),
            Err(PricingError::NegativeCleaningFee { .. }),
        ));

        let foreign = Pricing {
            cleaning_fee: Money::whole(50, Currency::Eur),
            ..Pricing::default()
        };
        assert!(matches!(
            Fees::try_from(foreign),
            Err(PricingError::CurrencyMismatch {
                actual: Currency::Eur,
                ..
            }),
        ));

        let free = Pricing {
            cleaning_fee: Money::zero(Currency::Usd),
            ..Pricing::default()
        };
        assert_eq!(Fees::try_from(free).unwrap().cleaning_fee, Decimal::ZERO);
    }

    #[test]
    fn refuses_to_load_negative_cleaning_fee() {
        let path = std::env::temp_dir().join("lodging-negative-fee.toml");
        fs::write(&path, "[pricing]\ncleaning_fee = \"-100USD\"\n").unwrap();

        let err = Config::new(path.to_str().unwrap()).unwrap_err();

        assert!(err.to_string().contains("must not be negative"));
        fs::remove_file(path).unwrap();
    }
}
