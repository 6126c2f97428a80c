/// Test data fixtures for consistent testing

/// A valid create or update body
pub fn new_entry_json(latitude: f64, longitude: f64, pm25: f64) -> String {
    format!(
        r#"{{"Latitude": {}, "Longitude": {}, "PM2_5": {}}}"#,
        latitude, longitude, pm25
    )
}

/// Create body without the longitude
pub fn incomplete_entry_json() -> &'static str {
    r#"{"Latitude": 10.0, "PM2_5": 15.5}"#
}

/// Tabular export of a small grid, with one gap
pub fn grid_csv() -> &'static str {
    "lat,lon,GWRPM25
10.0,30.0,15.0
10.0,31.0,
11.0,30.0,25.0
11.0,31.0,35.0
"
}
