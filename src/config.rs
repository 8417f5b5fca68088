//! Run configuration resolved once from the process environment.
//!
//! Every value has a literal fallback, so resolution never fails. Values are
//! passed through exactly as found; a malformed bucket or key only surfaces
//! when the fetch runs.

pub const DEFAULT_BUCKET: &str = "wasi-s3-dm";
pub const DEFAULT_KEY: &str = "data.csv";

/// Where to read the object from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bucket: String,
    pub key: String,
    pub credentials: Option<StaticCredentials>,
}

/// Explicit AWS credentials for hosts that have no default credential chain.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub region: Option<String>,
}

// Keeps secrets out of logs.
impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("region", &self.region)
            .finish()
    }
}

impl Config {
    /// Resolves the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves the configuration through `lookup`, which returns the value
    /// of a variable if it is set.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let bucket = get("S3_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string());
        let key = get("S3_KEY").unwrap_or_else(|| DEFAULT_KEY.to_string());

        let credentials = match (
            get("SPIN_CONFIG_AWS_ACCESS_KEY_ID"),
            get("SPIN_CONFIG_AWS_SECRET_ACCESS_KEY"),
        ) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
                session_token: get("SPIN_CONFIG_AWS_SESSION_TOKEN"),
                region: get("SPIN_CONFIG_AWS_REGION"),
            }),
            _ => None,
        };

        Self {
            bucket,
            key,
            credentials,
        }
    }
}
