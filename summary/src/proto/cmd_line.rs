use serde::{Deserialize, Serialize};

/// Reply of `getCmdLineOpts`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandLineOptions {
    #[serde(default)]
    pub argv: Vec<String>,
    #[serde(default)]
    pub parsed: ParsedOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedOptions {
    #[serde(default)]
    pub net: NetOptions,
    #[serde(default)]
    pub security: SecurityOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetOptions {
    #[serde(default)]
    pub bind_ip: Option<String>,
    #[serde(default)]
    pub tls: Option<TlsOptions>,
    /// Pre-4.2 spelling of `tls`
    #[serde(default)]
    pub ssl: Option<TlsOptions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TlsOptions {
    #[serde(default)]
    pub mode: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityOptions {
    #[serde(default)]
    pub authorization: String,
    #[serde(default)]
    pub key_file: String,
}

impl NetOptions {
    /// Configured TLS mode, preferring the current option name
    pub fn tls_mode(&self) -> &str {
        self.tls
            .as_ref()
            .or(self.ssl.as_ref())
            .map(|opts| opts.mode.as_str())
            .unwrap_or("")
    }
}
