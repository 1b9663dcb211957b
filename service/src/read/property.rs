//! [`Property`]-related read definitions.

use common::define_kind;

use crate::domain::Property;

define_kind! {
    #[doc = "Category of the home feed."]
    #[rename_all = "kebab-case"]
    enum Category {
        #[doc = "Every [`Property`]."]
        All = 1,

        #[doc = "Properties by the beach."]
        Beachfront = 2,

        #[doc = "Cabins."]
        Cabins = 3,

        #[doc = "Trending properties."]
        Trending = 4,

        #[doc = "Properties in big cities."]
        City = 5,

        #[doc = "Camping sites."]
        Camping = 6,

        #[doc = "Castles."]
        Castles = 7,

        #[doc = "Properties in the tropics."]
        Tropical = 8,

        #[doc = "Properties near ski slopes."]
        Skiing = 9,

        #[doc = "Stops for road trips."]
        RoadTrips = 10,
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::All
    }
}

impl Category {
    /// Returns the human-readable label of this [`Category`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Beachfront => "Beachfront",
            Self::Cabins => "Cabins",
            Self::Trending => "Trending",
            Self::City => "City",
            Self::Camping => "Camping",
            Self::Castles => "Castles",
            Self::Tropical => "Tropical",
            Self::Skiing => "Skiing",
            Self::RoadTrips => "Road trips",
        }
    }

    /// Indicates whether the provided [`Property`] belongs to this
    /// [`Category`].
    ///
    /// Categories without a dedicated rule contain every [`Property`].
    #[must_use]
    pub fn contains(self, property: &Property) -> bool {
        let location = property.location.as_ref().to_lowercase();
        let kind = property.kind.as_ref().to_lowercase();
        let location_has = |needles: &[&str]| {
            needles.iter().any(|n| location.contains(n))
        };

        match self {
            Self::Beachfront => location_has(&["beach", "malibu", "maui"]),
            Self::Cabins => kind.contains("cabin"),
            Self::City => location_has(&["new york", "san francisco"]),
            Self::Castles => kind.contains("castle"),
            Self::Tropical => location_has(&["hawaii", "maui"]),
            Self::All
            | Self::Trending
            | Self::Camping
            | Self::Skiing
            | Self::RoadTrips => true,
        }
    }
}

pub mod list {
    //! [`Property`] list definitions.

    use common::Date;
    use rust_decimal::Decimal;
    use url::form_urlencoded;

    use crate::domain::property::{self, Guests};
    #[cfg(doc)]
    use crate::domain::Property;

    use super::Category;

    /// Lower bound of the price range in a cleared [`Filter`].
    pub const PRICE_FLOOR: u32 = 0;

    /// Upper bound of the price range in a cleared [`Filter`].
    pub const PRICE_CEILING: u32 = 1000;

    /// Criteria a listed [`Property`] must satisfy.
    ///
    /// Every criterion left at its default is inactive and matches any
    /// [`Property`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Part of the [`property::Location`] to search for, ignoring case.
        pub location: Option<String>,

        /// Home feed [`Category`].
        pub category: Category,

        /// Number of [`Guests`] to accommodate.
        ///
        /// A single guest doesn't filter anything out.
        pub guests: Guests,

        /// Inclusive lower bound of the nightly price.
        pub price_min: Option<Decimal>,

        /// Inclusive upper bound of the nightly price.
        pub price_max: Option<Decimal>,

        /// [`property::Type`]s, any of which is acceptable.
        pub kinds: Vec<property::Type>,

        /// [`property::Amenity`]s, all of which are required.
        pub amenities: Vec<property::Amenity>,

        /// Minimal number of bedrooms.
        pub min_bedrooms: Option<u16>,

        /// Minimal number of bathrooms.
        pub min_bathrooms: Option<u16>,

        /// Whether only instantly bookable properties are acceptable.
        pub instant_book: bool,

        /// Whether only properties of superhosts are acceptable.
        pub superhost: bool,
    }

    impl Filter {
        /// Indicates whether the provided [`Property`] satisfies every active
        /// criterion of this [`Filter`].
        #[must_use]
        pub fn matches(&self, property: &property::Property) -> bool {
            self.matches_location(property)
                && self.category.contains(property)
                && (self.guests == Guests::ONE
                    || property.accommodates(self.guests))
                && self.matches_price(property)
                && self.matches_kinds(property)
                && self
                    .amenities
                    .iter()
                    .all(|a| property.has_amenity(a))
                && self.min_bedrooms.is_none_or(|n| property.bedrooms >= n)
                && self.min_bathrooms.is_none_or(|n| property.bathrooms >= n)
                && (!self.instant_book || property.is_instant_bookable)
                && (!self.superhost || property.host.is_superhost)
        }

        /// Keeps only the [`Property`]s matching this [`Filter`], preserving
        /// their order.
        #[must_use]
        pub fn apply(
            &self,
            properties: impl IntoIterator<Item = property::Property>,
        ) -> Vec<property::Property> {
            properties.into_iter().filter(|p| self.matches(p)).collect()
        }

        /// Returns the number of active filter panel criteria.
        ///
        /// Location, [`Category`] and [`Guests`] are set by the search bar
        /// and are not counted.
        #[must_use]
        pub fn active_count(&self) -> usize {
            let price_narrowed = self
                .price_min
                .is_some_and(|min| min > Decimal::from(PRICE_FLOOR))
                || self
                    .price_max
                    .is_some_and(|max| max < Decimal::from(PRICE_CEILING));

            [
                price_narrowed,
                !self.kinds.is_empty(),
                !self.amenities.is_empty(),
                self.min_bedrooms.is_some(),
                self.min_bathrooms.is_some(),
                self.instant_book,
                self.superhost,
            ]
            .into_iter()
            .filter(|active| *active)
            .count()
        }

        /// Resets the filter panel criteria, keeping the search bar ones.
        #[must_use]
        pub fn cleared(self) -> Self {
            Self {
                location: self.location,
                category: self.category,
                guests: self.guests,
                price_min: Some(Decimal::from(PRICE_FLOOR)),
                price_max: Some(Decimal::from(PRICE_CEILING)),
                ..Self::default()
            }
        }

        fn matches_location(&self, property: &property::Property) -> bool {
            let Some(needle) = self.location.as_deref().map(str::trim) else {
                return true;
            };
            needle.is_empty()
                || property
                    .location
                    .as_ref()
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
        }

        fn matches_price(&self, property: &property::Property) -> bool {
            let price = property.price.amount;
            self.price_min.is_none_or(|min| price >= min)
                && self.price_max.is_none_or(|max| price <= max)
        }

        fn matches_kinds(&self, property: &property::Property) -> bool {
            if self.kinds.is_empty() {
                return true;
            }
            let kind = property.kind.as_ref().to_lowercase();
            self.kinds
                .iter()
                .any(|k| kind.contains(&k.as_ref().to_lowercase()))
        }
    }

    /// Search bar input.
    #[derive(Clone, Debug)]
    pub struct Search {
        /// Where to go.
        pub location: Option<String>,

        /// Arrival [`Date`].
        pub check_in: Option<Date>,

        /// Departure [`Date`].
        pub check_out: Option<Date>,

        /// Number of adults.
        pub adults: u16,

        /// Number of children.
        pub children: u16,

        /// Number of infants, who don't count as guests.
        pub infants: u16,
    }

    impl Default for Search {
        fn default() -> Self {
            Self {
                location: None,
                check_in: None,
                check_out: None,
                adults: 1,
                children: 0,
                infants: 0,
            }
        }
    }

    impl Search {
        /// Returns the number of [`Guests`] of this [`Search`].
        #[must_use]
        pub fn guests(&self) -> Guests {
            Guests::new(self.adults.saturating_add(self.children))
                .unwrap_or_default()
        }

        /// Encodes this [`Search`] as a query string, omitting the parts left
        /// at their defaults.
        #[must_use]
        pub fn to_query(&self) -> String {
            let mut query = form_urlencoded::Serializer::new(String::new());
            if let Some(location) = self
                .location
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
            {
                _ = query.append_pair("location", location);
            }
            if let Some(date) = self.check_in {
                _ = query.append_pair("checkIn", &date.to_string());
            }
            if let Some(date) = self.check_out {
                _ = query.append_pair("checkOut", &date.to_string());
            }
            let guests = self.guests();
            if guests > Guests::ONE {
                _ = query.append_pair("guests", &guests.to_string());
            }
            query.finish()
        }

        /// Converts this [`Search`] into a [`Filter`] for the search results.
        #[must_use]
        pub fn to_filter(&self) -> Filter {
            Filter {
                location: self.location.clone(),
                guests: self.guests(),
                ..Filter::default()
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::{
        domain::property::{self, Guests},
        infra::fixtures,
    };

    use super::{
        list::{Filter, Search},
        Category,
    };

    fn ids(filter: &Filter) -> Vec<String> {
        filter
            .apply(fixtures::properties())
            .into_iter()
            .map(|p| p.id.to_string())
            .collect()
    }

    #[test]
    fn default_filter_keeps_everything_in_order() {
        assert_eq!(ids(&Filter::default()), ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn location_is_case_insensitive_substring() {
        let filter = Filter {
            location: Some("new york".into()),
            ..Filter::default()
        };
        assert_eq!(ids(&filter), ["2"]);

        let filter = Filter {
            location: Some("  ".into()),
            ..Filter::default()
        };
        assert_eq!(ids(&filter).len(), 6);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = Filter {
            price_min: Some(Decimal::from(180)),
            price_max: Some(Decimal::from(300)),
            ..Filter::default()
        };
        assert_eq!(ids(&filter), ["1", "3", "4"]);
    }

    #[test]
    fn single_guest_is_inactive() {
        let filter = Filter {
            guests: Guests::ONE,
            ..Filter::default()
        };
        assert_eq!(ids(&filter).len(), 6);

        let filter = Filter {
            guests: Guests::new(8).unwrap(),
            ..Filter::default()
        };
        assert_eq!(ids(&filter), ["1", "5", "6"]);
    }

    #[test]
    fn amenities_are_all_of_and_kinds_any_of() {
        let filter = Filter {
            amenities: vec![
                property::Amenity::new("wifi").unwrap(),
                property::Amenity::new("Pool").unwrap(),
            ],
            ..Filter::default()
        };
        assert_eq!(ids(&filter), ["1", "5"]);

        let filter = Filter {
            kinds: vec![
                property::Type::new("cabin").unwrap(),
                property::Type::new("Castle").unwrap(),
            ],
            ..Filter::default()
        };
        assert_eq!(ids(&filter), ["3", "6"]);
    }

    #[test]
    fn room_minimums() {
        let filter = Filter {
            min_bedrooms: Some(4),
            min_bathrooms: Some(4),
            ..Filter::default()
        };
        assert_eq!(ids(&filter), ["5", "6"]);
    }

    #[test]
    fn categories() {
        let by = |category| {
            ids(&Filter {
                category,
                ..Filter::default()
            })
        };

        assert_eq!(by(Category::Beachfront), ["1", "5"]);
        assert_eq!(by(Category::Cabins), ["3"]);
        assert_eq!(by(Category::City), ["2", "4"]);
        assert_eq!(by(Category::Castles), ["6"]);
        assert_eq!(by(Category::Tropical), ["5"]);
        assert_eq!(by(Category::Skiing).len(), 6);
        assert_eq!("road-trips".parse::<Category>(), Ok(Category::RoadTrips));
    }

    #[test]
    fn counts_and_clears_active_criteria() {
        let filter = Filter {
            location: Some("Malibu".into()),
            price_min: Some(Decimal::ZERO),
            price_max: Some(Decimal::from(500)),
            amenities: vec![property::Amenity::new("WiFi").unwrap()],
            instant_book: true,
            ..Filter::default()
        };
        assert_eq!(filter.active_count(), 3);

        let cleared = filter.cleared();
        assert_eq!(cleared.active_count(), 0);
        assert_eq!(cleared.location.as_deref(), Some("Malibu"));
        assert_eq!(cleared.price_max, Some(Decimal::from(1000)));
    }

    #[test]
    fn search_query_omits_defaults() {
        assert_eq!(Search::default().to_query(), "");

        let search = Search {
            location: Some("New York".into()),
            check_in: Some("2024-02-15".parse().unwrap()),
            check_out: Some("2024-02-20".parse().unwrap()),
            adults: 2,
            children: 1,
            infants: 1,
        };
        assert_eq!(search.guests().get(), 3);
        assert_eq!(
            search.to_query(),
            "location=New+York&checkIn=2024-02-15&checkOut=2024-02-20&guests=3",
        );

        let search = Search {
            adults: 1,
            infants: 2,
            ..Search::default()
        };
        assert_eq!(search.to_query(), "");
    }
}
