/*!
Exporter configuration.

All values are pass-through constants: nothing here is derived from daemon output. A config file
is optional; every field has a default except the exchange metadata, which is only needed for
nested output.

```toml
output_dir = "/opt/bird_ixf"
filename = "ixf.json"
socket = "/run/bird/bird.ctl"
shape = "nested"

[exchange]
ixp_id = 1
ixf_id = 999
shortname = "EX-IX"
name = "Example Internet Exchange"
country = "DE"
if_speed = 10000

[exchange.switch]
id = 1
name = "sw01.fra1"
colo = "Example DC"
city = "Frankfurt"
country = "DE"
manufacturer = "Arista"
model = "7280R3"

[[exchange.vlan]]
id = 10
name = "peering"
ipv4_prefix = "192.0.2.0/24"
ipv6_prefix = "2001:db8::/64"
```
*/
use crate::assembler::OutputShape;
use crate::collector::DEFAULT_TIMEOUT;
use crate::error::ConfigError;
use crate::models::{Ixp, Switch, Vlan, VlanPrefix};
use ipnet::{Ipv4Net, Ipv6Net};
use serde::Deserialize;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_OUTPUT_DIR: &str = "/opt/bird_ixf";
pub const DEFAULT_FILENAME: &str = "ixf.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Flat,
    Nested,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExporterConfig {
    pub output_dir: PathBuf,
    pub filename: String,
    /// Path of the `birdc` binary.
    pub birdc: PathBuf,
    /// BIRD control socket. Unset means `birdc`'s compiled-in default.
    pub socket: Option<PathBuf>,
    /// Bound on the `birdc` call in seconds, 0 disables it.
    pub timeout_secs: u64,
    pub shape: ShapeKind,
    pub exchange: Option<ExchangeMetadata>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        ExporterConfig {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            filename: DEFAULT_FILENAME.to_string(),
            birdc: PathBuf::from("birdc"),
            socket: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            shape: ShapeKind::Flat,
            exchange: None,
        }
    }
}

impl ExporterConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ExporterConfig, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ExporterConfig::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<ExporterConfig, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.filename)
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Resolve the configured shape into an assembler strategy.
    pub fn output_shape(&self) -> Result<OutputShape, ConfigError> {
        match self.shape {
            ShapeKind::Flat => Ok(OutputShape::Flat),
            ShapeKind::Nested => {
                let exchange = self.exchange.clone().ok_or(ConfigError::MissingExchange)?;
                if exchange.vlan.is_empty() {
                    return Err(ConfigError::MissingVlan(exchange.shortname));
                }
                Ok(OutputShape::Nested(exchange))
            }
        }
    }
}

/// Values given on the command line. Each `Some` replaces the matching config file value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub filename: Option<String>,
    pub socket: Option<PathBuf>,
    pub birdc: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub shape: Option<ShapeKind>,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut ExporterConfig) {
        if let Some(v) = self.output_dir {
            config.output_dir = v;
        }
        if let Some(v) = self.filename {
            config.filename = v;
        }
        if let Some(v) = self.socket {
            config.socket = Some(v);
        }
        if let Some(v) = self.birdc {
            config.birdc = v;
        }
        if let Some(v) = self.timeout_secs {
            config.timeout_secs = v;
        }
        if let Some(v) = self.shape {
            config.shape = v;
        }
    }
}

/// Static facts about the exchange fabric, copied into nested output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExchangeMetadata {
    pub ixp_id: u64,
    pub ixf_id: u64,
    pub shortname: String,
    pub name: Option<String>,
    pub country: Option<String>,
    pub url: Option<String>,
    pub peeringdb_id: Option<u64>,
    pub support_email: Option<String>,
    /// Port speed in Mbit/s reported for every member interface.
    pub if_speed: Option<u64>,
    pub switch: Switch,
    #[serde(default)]
    pub vlan: Vec<VlanConfig>,
}

impl ExchangeMetadata {
    pub fn to_ixp(&self) -> Ixp {
        Ixp {
            ixp_id: self.ixp_id,
            ixf_id: self.ixf_id,
            shortname: self.shortname.clone(),
            name: self.name.clone(),
            country: self.country.clone(),
            url: self.url.clone(),
            peeringdb_id: self.peeringdb_id,
            support_email: self.support_email.clone(),
            switch: vec![self.switch.clone()],
            vlan: self.vlan.iter().map(VlanConfig::to_vlan).collect(),
        }
    }

    /// The VLAN whose peering LAN contains `address`. Otherwise the first VLAN with a prefix of
    /// the same address family, and finally the first VLAN.
    pub fn vlan_for(&self, address: &IpAddr) -> Option<&VlanConfig> {
        self.vlan
            .iter()
            .find(|v| v.contains(address))
            .or_else(|| self.vlan.iter().find(|v| v.has_family(address)))
            .or_else(|| self.vlan.first())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VlanConfig {
    pub id: u64,
    pub name: Option<String>,
    pub ipv4_prefix: Option<Ipv4Net>,
    pub ipv6_prefix: Option<Ipv6Net>,
}

impl VlanConfig {
    pub fn contains(&self, address: &IpAddr) -> bool {
        match address {
            IpAddr::V4(v4) => self.ipv4_prefix.is_some_and(|p| p.contains(v4)),
            IpAddr::V6(v6) => self.ipv6_prefix.is_some_and(|p| p.contains(v6)),
        }
    }

    /// Whether this VLAN has a prefix of the same family as `address`.
    pub fn has_family(&self, address: &IpAddr) -> bool {
        match address {
            IpAddr::V4(_) => self.ipv4_prefix.is_some(),
            IpAddr::V6(_) => self.ipv6_prefix.is_some(),
        }
    }

    pub fn to_vlan(&self) -> Vlan {
        Vlan {
            id: self.id,
            name: self.name.clone(),
            ipv4: self.ipv4_prefix.map(|p| VlanPrefix {
                prefix: IpAddr::V4(p.network()),
                mask_length: p.prefix_len(),
            }),
            ipv6: self.ipv6_prefix.map(|p| VlanPrefix {
                prefix: IpAddr::V6(p.network()),
                mask_length: p.prefix_len(),
            }),
        }
    }
}
