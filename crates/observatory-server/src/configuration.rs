use crate::error::{to_env_var, ConfigError, ENV_PREFIX};
use config::{Config, Environment};
use observatory::errors::ObjectStoreResult;
use observatory::object_store::{
    filesystem::FilesystemObjectStore, gateway::GatewayObjectStore, ObjectStore,
};
use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ObjectStoreSettings {
    Gateway {
        #[serde(default = "default_gateway_url")]
        url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    Filesystem {
        #[serde(default)]
        root: Option<String>,
    },
}

impl ObjectStoreSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ObjectStoreSettings::Filesystem { root: None } => Err(ConfigError::MissingEnvVar {
                env_var: to_env_var("object_store.root"),
            }),
            _ => Ok(()),
        }
    }

    /// Build the object store images are fetched from
    pub fn build(&self) -> ObjectStoreResult<Arc<dyn ObjectStore>> {
        match self {
            ObjectStoreSettings::Gateway { url, timeout_secs } => Ok(Arc::new(
                GatewayObjectStore::new(url, Duration::from_secs(*timeout_secs))?,
            )),
            ObjectStoreSettings::Filesystem { root } => Ok(Arc::new(FilesystemObjectStore::new(
                root.clone().unwrap_or_default(),
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub object_store: ObjectStoreSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Self::load()?;
        settings.object_store.validate()?;
        Ok(settings)
    }

    fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default("object_store.type", "gateway")?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        match config.try_deserialize::<Self>() {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches('`');
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else if let config::ConfigError::NotFound(field) = &err {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_gateway_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
