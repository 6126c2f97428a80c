use geo::Coord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One grid cell of the PM2.5 dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Pm25Record {
    pub id: i64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "PM2.5")]
    pub pm25: f64,
}

impl Pm25Record {
    pub fn new(id: i64, latitude: f64, longitude: f64, pm25: f64) -> Self {
        Self {
            id,
            latitude,
            longitude,
            pm25,
        }
    }

    /// Position as a geo coordinate, x is the longitude.
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

/// Body of the create and update requests.
///
/// The concentration is sent as `PM2_5` and stored as `PM2.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewPm25Entry {
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "PM2_5")]
    pub pm25: f64,
}

impl NewPm25Entry {
    pub fn into_record(self, id: i64) -> Pm25Record {
        Pm25Record::new(id, self.latitude, self.longitude, self.pm25)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EntryCreated {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
