use geo::{Intersects, Rect, coord};
use serde::Deserialize;
use utoipa::IntoParams;

use super::Pm25Record;

/// Inclusive latitude/longitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Region {
    /// Minimum latitude
    pub lat_min: f64,
    /// Maximum latitude
    pub lat_max: f64,
    /// Minimum longitude
    pub lon_min: f64,
    /// Maximum longitude
    pub lon_max: f64,
}

impl Region {
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// `None` for an inverted box. `Rect::new` would swap the corners, and an
    /// inverted box must match nothing.
    pub fn to_rect(&self) -> Option<Rect<f64>> {
        if self.lat_min > self.lat_max || self.lon_min > self.lon_max {
            return None;
        }
        Some(Rect::new(
            coord! { x: self.lon_min, y: self.lat_min },
            coord! { x: self.lon_max, y: self.lat_max },
        ))
    }
}

/// Compiled form of a [`Region`], reused across every record of a scan.
pub struct RegionMatcher {
    rect: Option<Rect<f64>>,
}

impl RegionMatcher {
    pub fn new(region: &Region) -> Self {
        Self {
            rect: region.to_rect(),
        }
    }

    pub fn contains(&self, record: &Pm25Record) -> bool {
        match &self.rect {
            // Intersects includes the boundary
            Some(rect) => rect.intersects(&record.coord()),
            None => false,
        }
    }
}
