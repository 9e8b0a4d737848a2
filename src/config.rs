//! Environment-derived configuration for the service binary. Everything has
//! a workable default; only the database password normally needs to be
//! supplied.

use crate::db::DbConfig;
use crate::gazetteer::GazetteerPaths;
use crate::remote::{RemoteClient, GEONAMES_DEADLINE, GETTY_DEADLINE, GETTY_SOFT_BUDGET};
use std::path::PathBuf;
use std::time::Duration;

// -----------------------------------------------------------------------------
//
/// Service configuration, read once at start-up.
#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP listen port (`PORT`).
    pub port: u16,

    /// Place-database settings (`DB_REMOTE` selects a remote host over
    /// localhost; `DB_PWD` supplies the password).
    pub db: DbConfig,

    /// Directory with the gazetteer data files (`ATLAS_DATA_DIR`).
    pub data_dir: PathBuf,

    /// Directory with the flag images (`ATLAS_FLAG_DIR`).
    pub flag_dir: PathBuf,

    /// Remote flag index page, scraped when the local directory is empty
    /// (`ATLAS_FLAG_INDEX_URL`).
    pub flag_index_url: Option<String>,

    /// GeoNames account (`GEONAMES_USERNAME`).
    pub geonames_username: String,

    /// Getty hard deadline override, seconds (`ATLAS_GETTY_DEADLINE`). The
    /// upstream can be slow enough that the default exceeds common HTTP
    /// client timeouts, so it is tunable in both directions.
    pub getty_deadline: Duration,

    /// Getty secondary-loop soft budget, seconds
    /// (`ATLAS_GETTY_SOFT_BUDGET`).
    pub getty_soft_budget: Duration,

    /// GeoNames hard deadline override, seconds
    /// (`ATLAS_GEONAMES_DEADLINE`).
    pub geonames_deadline: Duration,
} // struct

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4201,
            db: DbConfig::default(),
            data_dir: PathBuf::from("data"),
            flag_dir: PathBuf::from("public/flags"),
            flag_index_url: None,
            geonames_username: "skyview".to_string(),
            getty_deadline: GETTY_DEADLINE,
            getty_soft_budget: GETTY_SOFT_BUDGET,
            geonames_deadline: GEONAMES_DEADLINE,
        } // struct
    } // fn
} // impl

impl Config {
    /// Reads the environment, falling back to defaults for anything unset
    /// or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(port) = env_parse("PORT") {
            config.port = port;
        } // if

        if let Ok(host) = std::env::var("DB_REMOTE") {
            if !host.is_empty() {
                config.db.host = host;
            } // if
        } // if

        if let Ok(password) = std::env::var("DB_PWD") {
            config.db.password = password;
        } // if

        if let Some(dir) = env_string("ATLAS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        } // if

        if let Some(dir) = env_string("ATLAS_FLAG_DIR") {
            config.flag_dir = PathBuf::from(dir);
        } // if

        config.flag_index_url = env_string("ATLAS_FLAG_INDEX_URL");

        if let Some(username) = env_string("GEONAMES_USERNAME") {
            config.geonames_username = username;
        } // if

        if let Some(seconds) = env_parse("ATLAS_GETTY_DEADLINE") {
            config.getty_deadline = Duration::from_secs(seconds);
        } // if

        if let Some(seconds) = env_parse("ATLAS_GETTY_SOFT_BUDGET") {
            config.getty_soft_budget = Duration::from_secs(seconds);
        } // if

        if let Some(seconds) = env_parse("ATLAS_GEONAMES_DEADLINE") {
            config.geonames_deadline = Duration::from_secs(seconds);
        } // if

        config
    } // fn

    /// The gazetteer's view of this configuration.
    #[must_use]
    pub fn gazetteer_paths(&self) -> GazetteerPaths {
        GazetteerPaths {
            data_dir: self.data_dir.clone(),
            flag_dir: self.flag_dir.clone(),
            flag_index_url: self.flag_index_url.clone(),
        } // struct
    } // fn

    /// The remote adapters' view of this configuration.
    #[must_use]
    pub fn remote_client(&self) -> RemoteClient {
        RemoteClient {
            geonames_username: self.geonames_username.clone(),
            geonames_deadline: self.geonames_deadline,
            getty_deadline: self.getty_deadline,
            getty_soft_budget: self.getty_soft_budget,
            ..RemoteClient::default()
        } // struct
    } // fn
} // impl

// -----------------------------------------------------------------------------

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
} // fn

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env_string(name)?.parse().ok()
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

// mod
