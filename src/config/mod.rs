use anyhow::Error;
use confique::Config;
use std::{
    net::IpAddr,
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use crate::dataset::LoadOptions;

pub const DEFAULT_CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Config)]
pub struct Pm25Config {
    #[config(env = "PM25_PORT", default = 8000)]
    pub port: u16,
    #[config(env = "PM25_ENDPOINT", default = "0.0.0.0")]
    pub endpoint: IpAddr,

    #[config(env = "PM25_HTTP_BODY_LIMIT", default = "1mb")]
    pub http_body_limit: String,

    #[config(env = "PM25_HTTP_SERVER_TIMEOUT_SECONDS", default = 30)]
    pub http_server_timeout_seconds: u64,

    #[config(env = "PM25_DATA_PATH", default = "data/global_pm25.nc")]
    pub data_path: PathBuf,

    #[config(env = "PM25_VARIABLE", default = "GWRPM25")]
    pub variable: String,

    #[config(env = "PM25_LAT_FRACTION", default = 6)]
    pub lat_fraction: usize,

    #[config(env = "PM25_LON_FRACTION", default = 6)]
    pub lon_fraction: usize,

    #[config(env = "PM25_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}

impl Pm25Config {
    pub fn load() -> Result<Pm25Config, Error> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Environment variables take precedence over the file, which is optional.
    pub fn load_from(file: &Path) -> Result<Pm25Config, Error> {
        let c = Pm25Config::builder().env().file(file).load()?;

        Ok(c)
    }

    pub fn parse_http_body_limit(&self) -> Result<usize, Error> {
        let size = byte_unit::Byte::parse_str(self.http_body_limit.clone(), true)?.as_u64();
        if size > 128 * 1024 * 1024 * 1024 {
            anyhow::bail!("Body size is too big: > 128GB");
        }
        Ok(size as usize)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            variable: self.variable.clone(),
            lat_fraction: self.lat_fraction,
            lon_fraction: self.lon_fraction,
        }
    }
}

static PM25_CONFIG: OnceLock<Arc<Pm25Config>> = OnceLock::new();

pub fn get() -> Result<Arc<Pm25Config>, Error> {
    PM25_CONFIG.get().cloned().ok_or_else(|| {
        Error::msg(
            "Configuration not loaded. Please call load_configuration() before using the configuration",
        )
    })
}

pub fn load_configuration(file: &Path) -> Result<(), Error> {
    // Check if the configuration has already been loaded
    if PM25_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = Pm25Config::load_from(file)?;
    PM25_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_load_config() {
        let config = Pm25Config::load().unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.endpoint, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.data_path, PathBuf::from("data/global_pm25.nc"));
        assert_eq!(config.lat_fraction, 6);
        assert!(config.sentry_dsn.is_none());

        temp_env::with_var("PM25_PORT", Some("8080"), || {
            let config = Pm25Config::load().unwrap();
            assert_eq!(config.port, 8080);
        });
    }

    #[test]
    #[serial]
    fn test_load_options_follow_config() {
        temp_env::with_vars(
            [
                ("PM25_LAT_FRACTION", Some("2")),
                ("PM25_LON_FRACTION", Some("3")),
                ("PM25_VARIABLE", Some("PM25")),
            ],
            || {
                let options = Pm25Config::load().unwrap().load_options();
                assert_eq!(options.lat_fraction, 2);
                assert_eq!(options.lon_fraction, 3);
                assert_eq!(options.variable, "PM25");
            },
        );
    }

    #[test]
    #[serial]
    fn test_parse_http_body_limit() {
        let config = Pm25Config::load().unwrap();
        assert_eq!(config.parse_http_body_limit().unwrap(), 1000000);

        temp_env::with_var("PM25_HTTP_BODY_LIMIT", Some("12345"), || {
            let config = Pm25Config::load().unwrap();
            assert_eq!(config.parse_http_body_limit().unwrap(), 12345);
        });

        temp_env::with_var("PM25_HTTP_BODY_LIMIT", Some("10MiB"), || {
            let config = Pm25Config::load().unwrap();
            assert_eq!(config.parse_http_body_limit().unwrap(), 10485760);
        });

        temp_env::with_var("PM25_HTTP_BODY_LIMIT", Some("1tb"), || {
            let config = Pm25Config::load().unwrap();
            assert!(config.parse_http_body_limit().is_err());
        });

        temp_env::with_var("PM25_HTTP_BODY_LIMIT", Some("-5mb"), || {
            let config = Pm25Config::load().unwrap();
            assert!(config.parse_http_body_limit().is_err());
        });
    }

    #[test]
    #[serial]
    fn test_load_configuration() {
        load_configuration(Path::new(DEFAULT_CONFIG_FILE)).unwrap();
        assert!(PM25_CONFIG.get().is_some());

        let config = get().unwrap();
        assert_eq!(config.variable, "GWRPM25");
    }
}
