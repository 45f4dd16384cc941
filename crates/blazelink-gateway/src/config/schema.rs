use serde::Deserialize;

use crate::error::{GatewayError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    /// Address clients are redirected to for the main server. This is
    /// what goes on the wire in redirector replies, so it must be the
    /// externally reachable host, not the bind address.
    #[serde(default = "default_external_host")]
    pub external_host: String,

    #[serde(default)]
    pub ports: PortsSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GatewayError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        if self.external_host.is_empty() {
            return Err(GatewayError::Config(
                "external_host must not be empty".into(),
            ));
        }
        self.ports.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortsSection {
    /// The redirector port. The client hard-codes this one; changing it
    /// means clients cannot find the server.
    #[serde(default = "default_redirector_port")]
    pub redirector: u16,

    #[serde(default = "default_main_port")]
    pub main: u16,
}

impl Default for PortsSection {
    fn default() -> Self {
        Self {
            redirector: default_redirector_port(),
            main: default_main_port(),
        }
    }
}

impl PortsSection {
    pub fn validate(&self) -> Result<()> {
        if self.redirector == self.main {
            return Err(GatewayError::Config(
                "ports.redirector and ports.main must differ".into(),
            ));
        }
        Ok(())
    }
}

fn default_external_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_redirector_port() -> u16 {
    42127
}

fn default_main_port() -> u16 {
    14219
}
