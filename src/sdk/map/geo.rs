//! Geographic primitives and Web Mercator viewport math.
//!
//! Zoom levels follow the slippy-map convention: at zoom `z` the world is a
//! square of `256 * 2^z` pixels.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Edge length of one map tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude beyond which Web Mercator is undefined.
const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Axis-aligned bounding box in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Smallest bounds containing every point, or `None` for an empty input.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a LatLng>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            south_west: first,
            north_east: first,
        };
        for p in iter {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    pub fn contains(&self, p: LatLng) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&p.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&p.lng)
    }
}

/// Center and zoom of a rendered map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

/// Projects onto the unit Web Mercator square: x grows east, y grows south.
pub fn project(p: LatLng) -> (f64, f64) {
    let lat = p.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (p.lng + 180.0) / 360.0;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
    (x, y)
}

pub fn unproject(x: f64, y: f64) -> LatLng {
    let n = PI * (1.0 - 2.0 * y);
    LatLng::new(n.sinh().atan().to_degrees(), x * 360.0 - 180.0)
}

/// Largest zoom at which `bounds` fits inside a `size` pixel viewport with
/// `padding` on each side, centered on the projected midpoint of the bounds.
///
/// Degenerate bounds (a single point) resolve to `max_zoom`.
pub fn fit_bounds(
    bounds: &LatLngBounds,
    size: (u32, u32),
    padding: (u32, u32),
    max_zoom: u8,
) -> Viewport {
    let (x0, y0) = project(bounds.south_west);
    let (x1, y1) = project(bounds.north_east);

    let avail_w = f64::from(size.0.saturating_sub(2 * padding.0).max(1));
    let avail_h = f64::from(size.1.saturating_sub(2 * padding.1).max(1));

    let zoom_for = |extent: f64, avail: f64| {
        if extent <= f64::EPSILON {
            f64::from(max_zoom)
        } else {
            (avail / (extent * TILE_SIZE)).log2()
        }
    };
    let zoom = zoom_for((x1 - x0).abs(), avail_w)
        .min(zoom_for((y1 - y0).abs(), avail_h))
        .floor()
        .clamp(0.0, f64::from(max_zoom));

    Viewport {
        center: unproject((x0 + x1) / 2.0, (y0 + y1) / 2.0),
        zoom: zoom as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(s: f64, w: f64, n: f64, e: f64) -> LatLngBounds {
        LatLngBounds {
            south_west: LatLng::new(s, w),
            north_east: LatLng::new(n, e),
        }
    }

    #[test]
    fn bounds_cover_all_points() {
        let points = [
            LatLng::new(19.07, 72.85),
            LatLng::new(19.05, 72.83),
            LatLng::new(19.06, 72.90),
        ];
        let b = LatLngBounds::from_points(&points).unwrap();
        assert_eq!(b, bounds(19.05, 72.83, 19.07, 72.90));
        assert!(points.iter().all(|p| b.contains(*p)));
        assert!(LatLngBounds::from_points(&[]).is_none());
    }

    #[test]
    fn projection_inverts() {
        let p = LatLng::new(19.07, 72.87);
        let (x, y) = project(p);
        let back = unproject(x, y);
        assert!((back.lat - p.lat).abs() < 1e-9);
        assert!((back.lng - p.lng).abs() < 1e-9);
    }

    #[test]
    fn whole_world_fits_at_zoom_zero() {
        let world = bounds(-85.0, -180.0, 85.0, 180.0);
        let vp = fit_bounds(&world, (256, 256), (0, 0), 19);
        assert_eq!(vp.zoom, 0);
        assert!(vp.center.lat.abs() < 1e-9);
        assert!(vp.center.lng.abs() < 1e-9);
    }

    #[test]
    fn short_city_route_fits_at_street_zoom() {
        let b = bounds(19.05, 72.83, 19.07, 72.85);
        let vp = fit_bounds(&b, (1200, 600), (20, 20), 19);
        // The north-south extent is the binding dimension here.
        assert_eq!(vp.zoom, 15);
        assert!((vp.center.lat - 19.06).abs() < 1e-3);
        assert!((vp.center.lng - 72.84).abs() < 1e-9);
    }

    #[test]
    fn single_point_uses_max_zoom() {
        let p = LatLng::new(19.05, 72.83);
        let b = LatLngBounds::from_points(&[p]).unwrap();
        assert_eq!(fit_bounds(&b, (800, 600), (0, 0), 17).zoom, 17);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(LatLng::new(19.0, 72.0).is_valid());
        assert!(!LatLng::new(91.0, 72.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
    }
}
