use serde_aux::field_attributes::deserialize_option_number_from_string;
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub service: ServiceSettings,
    pub contract: ContractSettings,
}

/// Where the book service under test lives.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct ServiceSettings {
    pub base_url: String,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub timeout_milliseconds: Option<u64>,
}

impl ServiceSettings {
    /// `None` leaves the HTTP client on its default behaviour.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }
}

#[derive(serde::Deserialize, Clone, Debug, Default)]
pub struct ContractSettings {
    /// Adds GET/PATCH/DELETE probes against a well-formed id that does not exist.
    #[serde(default)]
    pub probe_not_found: bool,
    /// Stop the run at the first failing scenario.
    #[serde(default)]
    pub fail_fast: bool,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| config::ConfigError::Foreign(e.into()))?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| config::ConfigError::Message(e))?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_SERVICE__BASE_URL=http://books:8000` would set `Settings.service.base_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible runtime environment for our checker.
#[derive(Debug)]
pub enum Environment {
    Local,
    Ci,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Ci => "ci",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "ci" => Ok(Self::Ci),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `ci`.",
                other
            )),
        }
    }
}
