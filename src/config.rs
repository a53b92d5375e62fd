use std::path::PathBuf;

pub const DEFAULT_MODEL_DIR: &str = "models";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub model_dir: PathBuf,
    pub bind_addr: String,
    pub port: u16,
    /// `LOG_PRED=1`: log a feature-vector summary per request
    pub log_features: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            log_features: false,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(dir) = get("MODEL_DIR") {
            cfg.model_dir = PathBuf::from(dir);
        }
        if let Some(addr) = get("BIND_ADDR") {
            cfg.bind_addr = addr;
        }
        if let Some(port) = get("PORT") {
            match port.parse() {
                Ok(p) => cfg.port = p,
                Err(_) => tracing::warn!("ignoring invalid PORT {:?}; using {}", port, DEFAULT_PORT),
            }
        }
        cfg.log_features = get("LOG_PRED").as_deref() == Some("1");
        cfg
    }

    /// Host and port for `TcpListener::bind`; the host may be a name
    /// (`localhost`) and is resolved at bind time.
    pub fn listen_addr(&self) -> (&str, u16) {
        (self.bind_addr.as_str(), self.port)
    }
}
