use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::error::{invalid_coordinates_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lng_ok = self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng);

        if lat_ok && lng_ok {
            Ok(())
        } else {
            Err(invalid_coordinates_error(self.lat, self.lng))
        }
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Point::new(coordinates.lng, coordinates.lat)
    }
}

#[test]
fn coordinates_validate_test() {
    assert!(Coordinates::new(0.0, 0.0).validate().is_ok());
    assert!(Coordinates::new(90.0, -180.0).validate().is_ok());
    assert!(Coordinates::new(-90.0, 180.0).validate().is_ok());

    assert!(Coordinates::new(90.5, 0.0)
        .validate()
        .unwrap_err()
        .is_invalid_coordinates_error());
    assert!(Coordinates::new(0.0, -180.1).validate().is_err());
    assert!(Coordinates::new(f64::NAN, 0.0).validate().is_err());
}

#[test]
fn coordinates_into_point_test() {
    let point: Point<f64> = Coordinates::new(6.9, 79.8).into();
    assert_eq!(point.x(), 79.8);
    assert_eq!(point.y(), 6.9);
}
