//! Topology graph built up over a discovery crawl

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::device::{Device, Link};

/// Network topology: a mapping from hostname to device, built fresh per
/// discovery session. No state persists across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topology {
    devices: HashMap<String, Device>,
}

impl Topology {
    /// Create a new empty topology
    pub fn new() -> Self {
        Self {
            devices: HashMap::new(),
        }
    }

    /// Register a successfully polled device, creating it if needed.
    ///
    /// A device may already exist as a link endpoint with empty fields; each
    /// identifying field is backfilled at most once per session, on the
    /// first poll that supplies it.
    pub fn register_device(
        &mut self,
        hostname: &str,
        mgmt_ip: Option<&str>,
        device_type: Option<&str>,
        platform: Option<&str>,
    ) {
        let device = self
            .devices
            .entry(hostname.to_string())
            .or_insert_with(|| Device::new(hostname));
        if device.mgmt_ip.is_none() {
            device.mgmt_ip = mgmt_ip.map(str::to_string);
        }
        if device.device_type.is_none() {
            device.device_type = device_type.map(str::to_string);
        }
        if device.platform.is_none() {
            device.platform = platform.map(str::to_string);
        }
    }

    /// Add a link, auto-creating either endpoint that is not yet known.
    ///
    /// The remote endpoint's auto-created entry carries the link's remote
    /// management IP so that leaf devices still render with an address.
    pub fn add_link(&mut self, link: Link) {
        self.devices
            .entry(link.local_device.clone())
            .or_insert_with(|| Device::new(&link.local_device));

        let remote = self
            .devices
            .entry(link.remote_device.clone())
            .or_insert_with(|| Device::new(&link.remote_device));
        if remote.mgmt_ip.is_none() {
            remote.mgmt_ip = link.remote_ip.clone();
        }

        if let Some(local) = self.devices.get_mut(&link.local_device) {
            local.links.push(link);
        }
    }

    /// Get a device by hostname
    pub fn device(&self, hostname: &str) -> Option<&Device> {
        self.devices.get(hostname)
    }

    /// Whether a hostname is present in the topology
    pub fn contains(&self, hostname: &str) -> bool {
        self.devices.contains_key(hostname)
    }

    /// Iterate over all devices
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Number of devices in the topology
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Number of unique undirected links.
    ///
    /// The graph stores one directed link per discovering side; a pair of
    /// devices that saw each other counts once here.
    pub fn link_count(&self) -> usize {
        let mut pairs: HashSet<(&str, &str)> = HashSet::new();
        for device in self.devices.values() {
            for link in &device.links {
                let pair = if link.local_device <= link.remote_device {
                    (link.local_device.as_str(), link.remote_device.as_str())
                } else {
                    (link.remote_device.as_str(), link.local_device.as_str())
                };
                pairs.insert(pair);
            }
        }
        pairs.len()
    }
}
