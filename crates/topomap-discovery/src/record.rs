//! Ephemeral neighbor records produced by the parsers and merger

use topomap_core::Protocol;

/// The parsed (and later merged) view of one adjacency, before it becomes a
/// link in the topology. Consumed by the crawler and discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeighborRecord {
    /// Remote device name, domain suffix stripped
    pub remote_device: Option<String>,
    /// Remote management IP address
    pub remote_ip: Option<String>,
    /// Remote platform string (CDP platform or LLDP chassis id)
    pub remote_platform: Option<String>,
    /// Remote capability string
    pub remote_capabilities: Option<String>,
    /// LLDP system description, possibly spanning multiple output lines
    pub system_description: Option<String>,
    /// Interface on the polled device
    pub local_intf: Option<String>,
    /// Interface on the remote device
    pub remote_intf: Option<String>,
    /// Protocols that contributed to this record
    pub protocols: Vec<Protocol>,
}

impl NeighborRecord {
    /// Whether the scanner accumulator has picked up any field yet
    pub fn is_empty(&self) -> bool {
        self.remote_device.is_none()
            && self.remote_ip.is_none()
            && self.remote_platform.is_none()
            && self.remote_capabilities.is_none()
            && self.system_description.is_none()
            && self.local_intf.is_none()
            && self.remote_intf.is_none()
    }

    /// Deduplication key for merging: device name, falling back to the
    /// management IP for records where no name was parsed.
    pub fn merge_key(&self) -> Option<String> {
        self.remote_device
            .clone()
            .or_else(|| self.remote_ip.clone())
    }
}

/// Strip a dot-separated domain suffix, keeping the first label
pub(crate) fn strip_domain(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
