use rocket::data::{Limits, ToByteUnit};
use rocket::figment::Figment;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_SERVER_URL: &str = "http://localhost:5001";
const DEFAULT_API_VERSION: &str = "v2";
const DEFAULT_REQUEST_TIMEOUT_IN_SECONDS: u64 = 30;
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_UPLOAD_DIR: &str = "./uploads";
const DEFAULT_JSON_FILE: &str = "data.json";
const JSON_LIMIT_IN_MEBIBYTES: u64 = 16;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),
}

pub struct Config {}

impl Config {
    pub fn database_url() -> Result<String, ConfigError> {
        env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))
    }

    pub fn server_url() -> String {
        Self::url_var_with_default("SERVER_URL", DEFAULT_SERVER_URL)
    }

    pub fn api_version() -> String {
        Self::read_var_with_default("API_VERSION", DEFAULT_API_VERSION)
    }

    /// Path the server mounts its routes at and the client sends requests to.
    pub fn api_prefix() -> String {
        format!("/api/{}", Self::api_version())
    }

    pub fn snapshot_url() -> String {
        format!("{}{}/get/data", Self::server_url(), Self::api_prefix())
    }

    pub fn upload_url() -> String {
        format!("{}{}/add/data", Self::server_url(), Self::api_prefix())
    }

    pub fn request_timeout_in_seconds() -> u64 {
        Self::parse_var_with_default(
            "REQUEST_TIMEOUT_IN_SECONDS",
            DEFAULT_REQUEST_TIMEOUT_IN_SECONDS,
        )
    }

    pub fn port() -> u16 {
        Self::parse_var_with_default("PORT", DEFAULT_PORT)
    }

    pub fn upload_dir() -> PathBuf {
        PathBuf::from(Self::read_var_with_default("UPLOAD_DIR", DEFAULT_UPLOAD_DIR))
    }

    pub fn json_file() -> String {
        Self::read_var_with_default("JSON_FILE", DEFAULT_JSON_FILE)
    }

    pub fn rocket_figment() -> Figment {
        let limits = Limits::default().limit("json", JSON_LIMIT_IN_MEBIBYTES.mebibytes());

        rocket::Config::figment()
            .merge(("port", Self::port()))
            .merge(("limits", limits))
    }

    fn read_var_with_default(name: &str, default: &str) -> String {
        env::var(name).unwrap_or_else(|_| default.to_string())
    }

    fn url_var_with_default(name: &str, default: &str) -> String {
        let url = Self::read_var_with_default(name, default);

        url.trim_end_matches('/').to_string()
    }

    fn parse_var_with_default<T: FromStr + Copy>(name: &str, default: T) -> T {
        match env::var(name) {
            Ok(value) => value.trim().parse::<T>().unwrap_or_else(|_| {
                log::warn!("{name} has an invalid value {value:?}, using the default");
                default
            }),
            Err(_) => default,
        }
    }
}
