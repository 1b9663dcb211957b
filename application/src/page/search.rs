//! Search results page.

use std::fmt;

use service::{
    domain::property,
    query,
    read::{
        map::{
            self, Centering, Hashed, JitteredGrid, Linear, Point, Viewport,
            Zoom,
        },
        property::list,
    },
    Query as _,
};

use crate::{args, page::Card, AsError, Context, Error};

/// Search results view.
#[derive(Clone, Debug)]
pub struct Search {
    /// Query string of the search, as shared in links.
    pub query: String,

    /// Number of active filter panel criteria.
    pub active_filters: usize,

    /// [`Card`]s of the found properties.
    pub cards: Vec<Card>,

    /// [`Map`] of the found properties, if requested.
    pub map: Option<Map>,
}

/// Map of the search results.
#[derive(Clone, Debug)]
pub struct Map {
    /// Strategy the markers are placed with.
    pub strategy: map::Strategy,

    /// Markers of the found properties, in the order of results.
    pub markers: Vec<(property::Id, Point)>,

    /// [`Viewport`] fitting all the markers.
    pub viewport: Option<Viewport>,
}

impl Map {
    /// Places markers of the provided [`Card`]s with the provided
    /// [`map::Strategy`].
    #[must_use]
    pub fn new(strategy: map::Strategy, cards: &[Card]) -> Self {
        let grid = JitteredGrid { jitter: Hashed };
        let markers = cards
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let point = match strategy {
                    map::Strategy::Linear => {
                        Linear.project(c.property.coordinates)
                    }
                    map::Strategy::Grid => grid.place(i, &c.property.id),
                };
                (c.property.id.clone(), point)
            })
            .collect();
        let coordinates = cards
            .iter()
            .map(|c| c.property.coordinates)
            .collect::<Vec<_>>();

        Self {
            strategy,
            markers,
            viewport: Viewport::fit(
                &coordinates,
                Centering::Mean,
                Zoom::default(),
            ),
        }
    }
}

/// Shows the search results for the provided input.
///
/// # Errors
///
/// Errors if the listings fail to load.
#[tracing::instrument(
    skip_all,
    fields(
        location = ?args.location,
        check_in = ?args.check_in,
        check_out = ?args.check_out,
    ),
)]
pub async fn show(ctx: &Context, args: args::Search) -> Result<Search, Error> {
    let args::Search {
        location,
        check_in,
        check_out,
        adults,
        children,
        infants,
        price_min,
        price_max,
        kinds,
        amenities,
        min_bedrooms,
        min_bathrooms,
        instant_book,
        superhost,
        clear_filters,
        map,
    } = args;

    let search = list::Search {
        location,
        check_in,
        check_out,
        adults,
        children,
        infants,
    };
    let mut filter = list::Filter {
        price_min,
        price_max,
        kinds,
        amenities,
        min_bedrooms,
        min_bathrooms,
        instant_book,
        superhost,
        ..search.to_filter()
    };
    if clear_filters {
        filter = filter.cleared();
    }
    let active_filters = filter.active_count();

    let properties = ctx
        .service()
        .execute(query::properties::List::by(filter))
        .await
        .map_err(AsError::into_error)?;
    let cards = Card::list(ctx, properties).await;

    Ok(Search {
        query: search.to_query(),
        active_filters,
        map: map.then(|| Map::new(ctx.map_strategy(), &cards)),
        cards,
    })
}

impl fmt::Display for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            query,
            active_filters,
            cards,
            map,
        } = self;

        writeln!(f, "/search?{query}")?;
        write!(f, "{} stay(s)", cards.len())?;
        if *active_filters > 0 {
            write!(f, " · Filters ({active_filters})")?;
        }
        writeln!(f)?;

        if cards.is_empty() {
            writeln!(f, "No properties found. Try adjusting your search.")?;
        }
        for card in cards {
            writeln!(f, "{card}")?;
        }

        if let Some(map) = map {
            write!(f, "{map}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Map ({}):", self.strategy)?;
        for (id, Point { x, y }) in &self.markers {
            writeln!(f, "  [{id}] at ({x:.2}, {y:.2})")?;
        }
        if let Some(Viewport { center, zoom }) = self.viewport {
            writeln!(
                f,
                "  centred at ({:.4}, {:.4}), zoom {}",
                center.latitude,
                center.longitude,
                zoom.level(),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use service::{domain::property, read::map::{Linear, Strategy}};

    use crate::{args, context::test_context};

    use super::{show, Map};

    fn args() -> args::Search {
        args::Search {
            location: None,
            check_in: None,
            check_out: None,
            adults: 1,
            children: 0,
            infants: 0,
            price_min: None,
            price_max: None,
            kinds: vec![],
            amenities: vec![],
            min_bedrooms: None,
            min_bathrooms: None,
            instant_book: false,
            superhost: false,
            clear_filters: false,
            map: false,
        }
    }

    #[tokio::test]
    async fn finds_by_location() {
        let ctx = test_context(true).await;

        let found = show(
            &ctx,
            args::Search {
                location: Some("New York".into()),
                ..args()
            },
        )
        .await
        .unwrap();

        assert_eq!(found.query, "location=New+York");
        assert_eq!(found.cards.len(), 1);
        assert_eq!(found.cards[0].property.id.as_ref(), "2");
        assert_eq!(found.active_filters, 0);
    }

    #[tokio::test]
    async fn applies_filter_panel() {
        let ctx = test_context(true).await;

        let found = show(
            &ctx,
            args::Search {
                adults: 4,
                children: 2,
                infants: 3,
                price_max: Some(Decimal::from(450)),
                amenities: vec![property::Amenity::new("pool").unwrap()],
                ..args()
            },
        )
        .await
        .unwrap();

        assert_eq!(found.query, "guests=6");
        assert_eq!(found.active_filters, 2);
        let ids = found
            .cards
            .iter()
            .map(|c| c.property.id.as_ref())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["1", "5"]);
    }

    #[tokio::test]
    async fn clears_filter_panel() {
        let ctx = test_context(true).await;

        let found = show(
            &ctx,
            args::Search {
                superhost: true,
                clear_filters: true,
                ..args()
            },
        )
        .await
        .unwrap();

        assert_eq!(found.active_filters, 0);
        assert_eq!(found.cards.len(), 6);
    }

    #[tokio::test]
    async fn places_markers_on_map() {
        let ctx = test_context(true).await;

        let found = show(&ctx, args::Search { map: true, ..args() })
            .await
            .unwrap();
        let map = found.map.unwrap();
        assert_eq!(map.strategy, Strategy::Grid);
        assert_eq!(map.markers.len(), 6);
        for (i, (_, p)) in map.markers.iter().enumerate() {
            let (col, row) = (i % 5, i / 5);
            let left = 20.0 + 150.0 * f64::from(u8::try_from(col).unwrap());
            let top = 50.0 + 120.0 * f64::from(u8::try_from(row).unwrap());
            assert!(p.x >= left && p.x < left + 100.0);
            assert!(p.y >= top && p.y < top + 80.0);
        }
        assert!(map.viewport.is_some());

        let linear = Map::new(Strategy::Linear, &found.cards);
        for (_, p) in &linear.markers {
            assert!((Linear::MIN..=Linear::MAX).contains(&p.x));
            assert!((Linear::MIN..=Linear::MAX).contains(&p.y));
        }
    }
}
