//! Map projection of [`Property`] markers.

use common::define_kind;
use xxhash_rust::xxh3::xxh3_64;

use crate::domain::property::{self, Coordinates};
#[cfg(doc)]
use crate::domain::Property;

/// Position of a marker on a map.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,

    /// Vertical coordinate.
    pub y: f64,
}

define_kind! {
    #[doc = "Strategy of placing [`Property`] markers on a map."]
    #[rename_all = "lowercase"]
    enum Strategy {
        #[doc = "[`Linear`] world projection."]
        Linear = 1,

        #[doc = "[`JitteredGrid`] layout."]
        Grid = 2,
    }
}

/// Linear world projection into a `[0, 1]` square.
///
/// Points are kept inside `[0.1, 0.9]` so markers never touch the edges.
#[derive(Clone, Copy, Debug, Default)]
pub struct Linear;

impl Linear {
    /// Minimal value of a projected coordinate.
    pub const MIN: f64 = 0.10;

    /// Maximal value of a projected coordinate.
    pub const MAX: f64 = 0.90;

    /// Projects the provided [`Coordinates`].
    ///
    /// Out-of-range and non-finite [`Coordinates`] are clamped.
    #[must_use]
    pub fn project(self, coordinates: Coordinates) -> Point {
        let Coordinates {
            latitude,
            longitude,
        } = coordinates.clamped();
        Point {
            x: ((longitude + 180.0) / 360.0).clamp(Self::MIN, Self::MAX),
            y: ((90.0 - latitude) / 180.0).clamp(Self::MIN, Self::MAX),
        }
    }
}

/// Source of a marker displacement inside a [`JitteredGrid`] cell.
pub trait Jitter {
    /// Returns the `(dx, dy)` displacement, as fractions in `[0, 1)`, of the
    /// marker for the [`Property`] with the provided ID.
    fn offset(&self, id: &property::Id) -> (f64, f64);
}

/// [`Jitter`] placing every marker at the top-left corner of its cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn offset(&self, _: &property::Id) -> (f64, f64) {
        (0.0, 0.0)
    }
}

/// [`Jitter`] displacing every marker by the same fractions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fixed {
    /// Horizontal fraction.
    pub dx: f64,

    /// Vertical fraction.
    pub dy: f64,
}

impl Jitter for Fixed {
    fn offset(&self, _: &property::Id) -> (f64, f64) {
        (self.dx, self.dy)
    }
}

/// [`Jitter`] derived from a hash of the [`property::Id`], so the same
/// [`Property`] always lands on the same spot.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hashed;

impl Jitter for Hashed {
    fn offset(&self, id: &property::Id) -> (f64, f64) {
        let hash = xxh3_64(AsRef::<str>::as_ref(id).as_bytes());
        let [lo, hi] = [hash & 0xFFFF_FFFF, hash >> 32]
            .map(|half| f64::from(u32::try_from(half).unwrap_or_default()));
        let scale = f64::from(u32::MAX) + 1.0;
        (lo / scale, hi / scale)
    }
}

/// Grid layout of markers with five columns, each marker displaced inside
/// its cell by a [`Jitter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct JitteredGrid<J> {
    /// [`Jitter`] of this [`JitteredGrid`].
    pub jitter: J,
}

impl<J: Jitter> JitteredGrid<J> {
    /// Number of columns.
    pub const COLUMNS: usize = 5;

    /// Horizontal offset of the first column.
    pub const LEFT: f64 = 20.0;

    /// Vertical offset of the first row.
    pub const TOP: f64 = 50.0;

    /// Horizontal distance between columns.
    pub const COLUMN_STEP: f64 = 150.0;

    /// Vertical distance between rows.
    pub const ROW_STEP: f64 = 120.0;

    /// Horizontal jitter range, exclusive.
    pub const JITTER_X: f64 = 100.0;

    /// Vertical jitter range, exclusive.
    pub const JITTER_Y: f64 = 80.0;

    /// Places the marker of the `index`-th [`Property`] with the provided
    /// `id`.
    #[must_use]
    pub fn place(&self, index: usize, id: &property::Id) -> Point {
        let (dx, dy) = self.jitter.offset(id);
        let dx = fraction(dx) * Self::JITTER_X;
        let dy = fraction(dy) * Self::JITTER_Y;

        #[expect(clippy::cast_precision_loss, reason = "small indices")]
        let (column, row) = (
            (index % Self::COLUMNS) as f64,
            (index / Self::COLUMNS) as f64,
        );
        Point {
            x: Self::LEFT + column * Self::COLUMN_STEP + dx,
            y: Self::TOP + row * Self::ROW_STEP + dy,
        }
    }
}

/// Clamps a jitter fraction into `[0, 1)`.
fn fraction(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0 - f64::EPSILON)
    } else {
        0.0
    }
}

/// Zoom level of a map, in `1..=18` range.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Zoom(u8);

impl Zoom {
    /// Minimal [`Zoom`] level.
    pub const MIN: Self = Self(1);

    /// Maximal [`Zoom`] level.
    pub const MAX: Self = Self(18);

    /// Creates a new [`Zoom`] level, clamping it into the valid range.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Returns the [`Zoom`] level one step closer.
    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    /// Returns the [`Zoom`] level one step farther.
    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    /// Returns the numeric level of this [`Zoom`].
    #[must_use]
    pub fn level(self) -> u8 {
        self.0
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(10)
    }
}

define_kind! {
    #[doc = "Way of computing the centre of a [`Viewport`]."]
    #[rename_all = "lowercase"]
    enum Centering {
        #[doc = "Arithmetic mean of all the coordinates."]
        Mean = 1,

        #[doc = "Midpoint of the bounding box of all the coordinates."]
        Midpoint = 2,
    }
}

/// Visible area of a map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Centre of this [`Viewport`].
    pub center: Coordinates,

    /// [`Zoom`] level of this [`Viewport`].
    pub zoom: Zoom,
}

impl Viewport {
    /// Fits a [`Viewport`] to the provided [`Coordinates`].
    ///
    /// [`None`] is returned if there are no [`Coordinates`] to fit.
    #[must_use]
    pub fn fit(
        coordinates: &[Coordinates],
        centering: Centering,
        zoom: Zoom,
    ) -> Option<Self> {
        if coordinates.is_empty() {
            return None;
        }
        let coordinates = coordinates.iter().map(|c| c.clamped());

        let center = match centering {
            Centering::Mean => {
                let (mut lat, mut lon, mut n) = (0.0, 0.0, 0.0);
                for c in coordinates {
                    lat += c.latitude;
                    lon += c.longitude;
                    n += 1.0;
                }
                Coordinates {
                    latitude: lat / n,
                    longitude: lon / n,
                }
            }
            Centering::Midpoint => {
                let (mut min, mut max) = (
                    Coordinates {
                        latitude: f64::INFINITY,
                        longitude: f64::INFINITY,
                    },
                    Coordinates {
                        latitude: f64::NEG_INFINITY,
                        longitude: f64::NEG_INFINITY,
                    },
                );
                for c in coordinates {
                    min.latitude = min.latitude.min(c.latitude);
                    min.longitude = min.longitude.min(c.longitude);
                    max.latitude = max.latitude.max(c.latitude);
                    max.longitude = max.longitude.max(c.longitude);
                }
                Coordinates {
                    latitude: (min.latitude + max.latitude) / 2.0,
                    longitude: (min.longitude + max.longitude) / 2.0,
                }
            }
        };

        Some(Self { center, zoom })
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::property::{self, Coordinates};

    use super::{
        Centering, Fixed, Hashed, Jitter as _, JitteredGrid, Linear, NoJitter,
        Point, Viewport, Zoom,
    };

    fn id(s: &str) -> property::Id {
        property::Id::new(s).unwrap()
    }

    fn at(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude,
        }
    }

    #[test]
    fn linear_projection() {
        let p = Linear.project(at(0.0, 0.0));
        assert_eq!(p, Point { x: 0.5, y: 0.5 });

        let p = Linear.project(at(45.0, 90.0));
        assert_eq!(p, Point { x: 0.75, y: 0.25 });
    }

    #[test]
    fn linear_projection_is_bounded() {
        for c in [
            at(90.0, 180.0),
            at(-90.0, -180.0),
            at(1000.0, -1000.0),
            at(f64::NAN, f64::INFINITY),
        ] {
            let Point { x, y } = Linear.project(c);

            assert!((Linear::MIN..=Linear::MAX).contains(&x), "x = {x}");
            assert!((Linear::MIN..=Linear::MAX).contains(&y), "y = {y}");
        }
    }

    #[test]
    fn grid_without_jitter() {
        let grid = JitteredGrid { jitter: NoJitter };

        assert_eq!(grid.place(0, &id("1")), Point { x: 20.0, y: 50.0 });
        assert_eq!(grid.place(4, &id("5")), Point { x: 620.0, y: 50.0 });
        assert_eq!(grid.place(5, &id("6")), Point { x: 20.0, y: 170.0 });
    }

    #[test]
    fn grid_jitter_stays_in_cell() {
        let grid = JitteredGrid {
            jitter: Fixed { dx: 0.5, dy: 2.0 },
        };
        let p = grid.place(0, &id("1"));
        assert_eq!(p.x, 70.0);
        assert!(p.y >= 50.0 && p.y < 130.0);

        let grid = JitteredGrid { jitter: Hashed };
        for (i, s) in ["1", "2", "3", "4", "5", "6"].into_iter().enumerate() {
            let Point { x, y } = grid.place(i, &id(s));
            let (left, top) = (
                20.0 + (i % 5) as f64 * 150.0,
                50.0 + (i / 5) as f64 * 120.0,
            );

            assert!(x >= left && x < left + 100.0, "x = {x}");
            assert!(y >= top && y < top + 80.0, "y = {y}");
        }
    }

    #[test]
    fn hashed_jitter_is_deterministic() {
        assert_eq!(Hashed.offset(&id("1")), Hashed.offset(&id("1")));
        assert_ne!(Hashed.offset(&id("1")), Hashed.offset(&id("2")));
    }

    #[test]
    fn zoom_is_clamped() {
        assert_eq!(Zoom::new(0), Zoom::MIN);
        assert_eq!(Zoom::new(30), Zoom::MAX);
        assert_eq!(Zoom::MAX.zoom_in(), Zoom::MAX);
        assert_eq!(Zoom::MIN.zoom_out(), Zoom::MIN);
        assert_eq!(Zoom::new(10).zoom_in().level(), 11);
    }

    #[test]
    fn viewport_centering() {
        let coordinates = [at(0.0, 0.0), at(10.0, 20.0), at(50.0, 40.0)];

        let mean =
            Viewport::fit(&coordinates, Centering::Mean, Zoom::default())
                .unwrap();
        assert_eq!(mean.center, at(20.0, 20.0));

        let midpoint =
            Viewport::fit(&coordinates, Centering::Midpoint, Zoom::default())
                .unwrap();
        assert_eq!(midpoint.center, at(25.0, 20.0));

        assert!(Viewport::fit(&[], Centering::Mean, Zoom::default()).is_none());
    }
}
