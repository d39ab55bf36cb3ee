use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub business: BusinessConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Width of the revenue chart window, in months.
    pub revenue_months: u32,
    pub recent_bookings_limit: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            revenue_months: 12,
            recent_bookings_limit: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MailConfig {
    #[serde(default)]
    pub enabled: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub from_address: Option<String>,
    /// Where contact form submissions are delivered.
    pub admin_address: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessConfig {
    pub name: String,
    pub currency_symbol: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "Car Hire".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.base_url", "http://localhost:8080")?
            .set_default("database.url", "sqlite://carhire.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("dashboard.revenue_months", 12)?
            .set_default("dashboard.recent_bookings_limit", 5)?
            .set_default("mail.enabled", false)?
            .set_default("business.name", "Car Hire")?
            .set_default("business.currency_symbol", "$")?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with CARHIRE__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("CARHIRE").separator("__"))

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite://carhire.db?mode=rwc".to_string(),
                max_connections: 10,
            },
            dashboard: DashboardConfig::default(),
            mail: MailConfig::default(),
            business: BusinessConfig::default(),
        }
    }
}
