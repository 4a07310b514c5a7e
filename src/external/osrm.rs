use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::routing::RoutingProvider;
use crate::{
    entities::{Coordinates, RouteMetrics},
    error::{invalid_input_error, upstream_error, Error},
};

/// Routing over an OSRM-compatible HTTP API.
pub struct OsrmRouting {
    client: reqwest::Client,
    api_base: String,
    profile: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    code: String,
    routes: Option<Vec<Route>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Route {
    /// meters
    distance: f64,
    /// seconds
    duration: f64,
}

impl OsrmRouting {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').into(),
            profile: "driving".into(),
        })
    }
}

/// OSRM takes positions as `lng,lat`.
fn osrm_pair(coordinates: Coordinates) -> String {
    format!("{},{}", coordinates.lng, coordinates.lat)
}

fn metrics_from_response(data: Response) -> Result<RouteMetrics, Error> {
    match data.code.as_str() {
        "Ok" => {}
        "NoRoute" | "NoSegment" | "InvalidValue" => return Err(invalid_input_error()),
        _ => return Err(upstream_error()),
    }

    let route = data
        .routes
        .and_then(|routes| routes.into_iter().next())
        .ok_or_else(upstream_error)?;

    Ok(RouteMetrics::new(
        route.distance / 1000.0,
        route.duration / 60.0,
    ))
}

#[async_trait]
impl RoutingProvider for OsrmRouting {
    #[tracing::instrument(skip(self))]
    async fn route(&self, pickup: Coordinates, dropoff: Coordinates) -> Result<RouteMetrics, Error> {
        let url = format!(
            "{}/route/v1/{}/{};{}",
            self.api_base,
            self.profile,
            osrm_pair(pickup),
            osrm_pair(dropoff)
        );

        let res = self
            .client
            .get(url)
            .query(&[("overview", "false")])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Response = res.json().await?;

        metrics_from_response(data)
    }
}

#[test]
fn metrics_from_ok_response_test() {
    let data: Response = serde_json::from_str(
        r#"{"code": "Ok", "routes": [{"distance": 12500.0, "duration": 1500.0}, {"distance": 1.0, "duration": 1.0}]}"#,
    )
    .unwrap();

    let metrics = metrics_from_response(data).unwrap();
    assert_eq!(metrics.distance_km, 12.5);
    assert_eq!(metrics.duration_min, 25.0);
}

#[test]
fn metrics_from_error_response_test() {
    let no_route: Response = serde_json::from_str(r#"{"code": "NoRoute"}"#).unwrap();
    assert_eq!(metrics_from_response(no_route).unwrap_err(), invalid_input_error());

    let empty: Response = serde_json::from_str(r#"{"code": "Ok", "routes": []}"#).unwrap();
    assert_eq!(metrics_from_response(empty).unwrap_err(), upstream_error());

    let too_big: Response = serde_json::from_str(r#"{"code": "TooBig"}"#).unwrap();
    assert_eq!(metrics_from_response(too_big).unwrap_err(), upstream_error());
}

#[test]
fn trims_trailing_slash_test() {
    let routing = OsrmRouting::new("http://router.local/", Duration::from_secs(1)).unwrap();
    assert_eq!(routing.api_base, "http://router.local");
}

#[test]
fn osrm_pair_is_lng_first_test() {
    assert_eq!(osrm_pair(Coordinates::new(6.9271, 79.8612)), "79.8612,6.9271");
    assert_eq!(osrm_pair(Coordinates::new(-33.5, 0.0)), "0,-33.5");
}
