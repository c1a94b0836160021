//! Device and link types for the discovered network graph

use serde::{Deserialize, Serialize};

/// Neighbor discovery protocol that contributed an adjacency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Cdp,
    Lldp,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Cdp => write!(f, "CDP"),
            Protocol::Lldp => write!(f, "LLDP"),
        }
    }
}

/// A discovered network device
///
/// Devices are created lazily the first time they are referenced, either as
/// the crawl seed or as a link endpoint. Identifying fields beyond the
/// hostname stay empty until the device itself is successfully polled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Hostname, the identity key within a topology
    pub hostname: String,
    /// Management IP address, if known
    pub mgmt_ip: Option<String>,
    /// Connection profile id used to reach the device
    pub device_type: Option<String>,
    /// Platform string, if known
    pub platform: Option<String>,
    /// Adjacencies discovered from this device's perspective
    pub links: Vec<Link>,
}

impl Device {
    /// Create a bare device known only by hostname
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            mgmt_ip: None,
            device_type: None,
            platform: None,
            links: Vec::new(),
        }
    }
}

/// A directed adjacency discovered from one device's perspective
///
/// Links reference their endpoints by hostname key, never by direct
/// reference; the topology graph resolves both ends. Reverse directions are
/// not deduplicated here, the renderer unites them at display time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub local_device: String,
    pub local_intf: String,
    pub remote_device: String,
    pub remote_intf: String,
    pub remote_ip: Option<String>,
    /// Protocols that reported this adjacency
    pub protocols: Vec<Protocol>,
}
