use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

// 1..=99 are internal, 100.. are caller-visible.
const ENV_VAR: i32 = 1;
const DATABASE: i32 = 2;
const REQWEST: i32 = 3;
const UPSTREAM: i32 = 4;
const UNEXPECTED: i32 = 5;
const MULTIPLE_ACTIVE_CONFIGS: i32 = 6;
const UPSTREAM_TIMEOUT: i32 = 7;
const INVALID_SETTING: i32 = 8;
const INVALID_INPUT: i32 = 101;
const INVALID_TRIP_GEOMETRY: i32 = 102;
const INVALID_COORDINATES: i32 = 103;
const INVALID_CONFIG: i32 = 104;
const CONFIG_NOT_FOUND: i32 = 105;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("json error: {}", err);
        unexpected_error()
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("io error: {}", err);
        unexpected_error()
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        upstream_timeout_error()
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self.code {
            CONFIG_NOT_FOUND => StatusCode::NOT_FOUND,
            UPSTREAM_TIMEOUT => StatusCode::SERVICE_UNAVAILABLE,
            1..=99 => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn is_config_not_found_error(&self) -> bool {
        self.code == CONFIG_NOT_FOUND
    }

    pub fn is_multiple_active_configs_error(&self) -> bool {
        self.code == MULTIPLE_ACTIVE_CONFIGS
    }

    pub fn is_invalid_trip_geometry_error(&self) -> bool {
        self.code == INVALID_TRIP_GEOMETRY
    }

    pub fn is_invalid_coordinates_error(&self) -> bool {
        self.code == INVALID_COORDINATES
    }

    pub fn is_invalid_config_error(&self) -> bool {
        self.code == INVALID_CONFIG
    }

    pub fn is_upstream_timeout_error(&self) -> bool {
        self.code == UPSTREAM_TIMEOUT
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self.code {
            UPSTREAM_TIMEOUT => self.message.as_str(),
            1..=99 => "Internal Server Error",
            _ => self.message.as_str(),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: INVALID_INPUT,
        message: "invalid input".into(),
    }
}

pub fn invalid_trip_geometry_error(distance_km: f64, duration_min: f64) -> Error {
    Error {
        code: INVALID_TRIP_GEOMETRY,
        message: format!(
            "invalid trip geometry: distance {} km, duration {} min",
            distance_km, duration_min
        ),
    }
}

pub fn invalid_coordinates_error(lat: f64, lng: f64) -> Error {
    Error {
        code: INVALID_COORDINATES,
        message: format!("invalid coordinates: ({}, {})", lat, lng),
    }
}

pub fn invalid_config_error(reason: &str) -> Error {
    Error {
        code: INVALID_CONFIG,
        message: format!("invalid pricing config: {}", reason),
    }
}

pub fn config_not_found_error(vehicle_type: &str) -> Error {
    Error {
        code: CONFIG_NOT_FOUND,
        message: format!("no active pricing config for vehicle type '{}'", vehicle_type),
    }
}

pub fn multiple_active_configs_error(vehicle_type: &str) -> Error {
    Error {
        code: MULTIPLE_ACTIVE_CONFIGS,
        message: format!(
            "multiple active pricing configs for vehicle type '{}'",
            vehicle_type
        ),
    }
}

pub fn upstream_timeout_error() -> Error {
    Error {
        code: UPSTREAM_TIMEOUT,
        message: "upstream timeout".into(),
    }
}

pub fn invalid_setting_error(name: &str, value: &str) -> Error {
    Error {
        code: INVALID_SETTING,
        message: format!("invalid value for {}: '{}'", name, value),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: ENV_VAR,
        message: "environment variable error".into(),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    tracing::error!("database error: {:?}", err);

    Error {
        code: DATABASE,
        message: "database error".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        return upstream_timeout_error();
    }

    Error {
        code: REQWEST,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: UPSTREAM,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: UNEXPECTED,
        message: "unexpected error".into(),
    }
}

#[test]
fn error_status_test() {
    assert_eq!(config_not_found_error("xl").status(), StatusCode::NOT_FOUND);
    assert_eq!(
        multiple_active_configs_error("xl").status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        invalid_trip_geometry_error(-1.0, 0.0).status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        invalid_coordinates_error(91.0, 0.0).status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        upstream_timeout_error().status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(upstream_error().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn error_response_status_test() {
    let response = database_error("connection reset").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = config_not_found_error("xl").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
