//! Breadth-first topology crawler
//!
//! Starting from a seed device, polls each reachable device for its CDP and
//! LLDP neighbors, merges the two views, and builds the topology graph.
//! The crawl is strictly sequential: one session is open at a time, and the
//! FIFO frontier yields a level-order traversal bounded by maximum depth.
//! Failures on non-seed nodes are isolated; only an unreachable seed fails
//! the whole operation.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use topomap_core::{Classifier, CrawlFilters, Link, Topology};

use crate::cdp::parse_cdp_neighbors;
use crate::lldp::parse_lldp_neighbors;
use crate::merge::merge_neighbors;
use crate::record::NeighborRecord;
use crate::transport::{Credentials, Session, Transport, TransportError};

/// Neighbor detail commands issued on every polled device
pub const CDP_COMMAND: &str = "show cdp neighbors detail";
pub const LLDP_COMMAND: &str = "show lldp neighbors detail";

/// Read timeout for neighbor detail commands
const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// What went wrong reaching a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    Authentication,
    Connection,
    /// Any other failure, command execution included
    Other,
}

/// A per-node discovery failure: the transport error kind plus the address
/// that failed. Surfaced to the caller only when the seed itself fails.
#[derive(Error, Debug)]
#[error("Discovery failed for {address}: {message}")]
pub struct DiscoveryError {
    pub address: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl DiscoveryError {
    fn from_transport(address: &str, err: TransportError) -> Self {
        let kind = match &err {
            TransportError::Timeout { .. } => ErrorKind::Timeout,
            TransportError::AuthenticationFailed { .. } => ErrorKind::Authentication,
            TransportError::Connection { .. } => ErrorKind::Connection,
            TransportError::Command { .. } => ErrorKind::Other,
        };
        Self {
            address: address.to_string(),
            kind,
            message: err.to_string(),
        }
    }
}

/// Outcome of a crawl: the topology plus the addresses the crawl dequeued
/// for polling, in visit order. Each address appears at most once.
#[derive(Debug)]
pub struct DiscoveryReport {
    pub topology: Topology,
    pub visited: Vec<String>,
}

/// Breadth-first topology discoverer over a transport
pub struct Discoverer<T: Transport> {
    transport: T,
    classifier: Classifier,
}

impl<T: Transport> Discoverer<T> {
    pub fn new(transport: T, classifier: Classifier) -> Self {
        Self {
            transport,
            classifier,
        }
    }

    /// Crawl the network starting from the seed and return the topology
    /// together with the list of addresses that were polled.
    ///
    /// Fails only when the seed itself cannot be polled; any other device
    /// failure is logged and skipped.
    pub async fn discover(
        &self,
        seed: &str,
        seed_device_type: &str,
        credentials: &Credentials,
        max_depth: usize,
        filters: Option<&CrawlFilters>,
    ) -> Result<DiscoveryReport, DiscoveryError> {
        let mut topology = Topology::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut visit_order: Vec<String> = Vec::new();
        let mut frontier: VecDeque<(String, String, usize)> = VecDeque::new();
        frontier.push_back((seed.to_string(), seed_device_type.to_string(), 0));

        info!(seed, device_type = seed_device_type, max_depth, "Starting discovery");

        while let Some((address, device_type, depth)) = frontier.pop_front() {
            if visited.contains(&address) || depth > max_depth {
                continue;
            }
            visited.insert(address.clone());
            visit_order.push(address.clone());
            debug!(address = %address, depth, "Polling device");

            let (hostname, neighbors) = match self.poll(&address, &device_type, credentials).await
            {
                Ok(polled) => polled,
                Err(err) => {
                    if address == seed {
                        error!(address = %address, error = %err, "Seed device unreachable");
                        return Err(err);
                    }
                    warn!(address = %address, error = %err, "Skipping unreachable device");
                    continue;
                }
            };

            topology.register_device(&hostname, Some(&address), Some(&device_type), None);

            for record in neighbors {
                let remote_device = record
                    .remote_device
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string());
                topology.add_link(Link {
                    local_device: hostname.clone(),
                    local_intf: record
                        .local_intf
                        .clone()
                        .unwrap_or_else(|| "?".to_string()),
                    remote_device: remote_device.clone(),
                    remote_intf: record
                        .remote_intf
                        .clone()
                        .unwrap_or_else(|| "?".to_string()),
                    remote_ip: record.remote_ip.clone(),
                    protocols: record.protocols.clone(),
                });

                let resolved = self.classifier.classify(
                    record.remote_platform.as_deref().unwrap_or(""),
                    record.system_description.as_deref().unwrap_or(""),
                    record.remote_capabilities.as_deref().unwrap_or(""),
                    filters,
                );
                match (resolved, record.remote_ip.as_ref()) {
                    (Some(next_type), Some(ip)) if !visited.contains(ip) => {
                        debug!(
                            neighbor = %remote_device,
                            ip = %ip,
                            device_type = %next_type,
                            "Queued neighbor"
                        );
                        frontier.push_back((ip.clone(), next_type, depth + 1));
                    }
                    (resolved, ip) => {
                        debug!(
                            neighbor = %remote_device,
                            crawlable = resolved.is_some(),
                            has_ip = ip.is_some(),
                            "Not queueing neighbor"
                        );
                    }
                }
            }
        }

        info!(
            devices = topology.device_count(),
            links = topology.link_count(),
            visited = visit_order.len(),
            "Discovery complete"
        );
        Ok(DiscoveryReport {
            topology,
            visited: visit_order,
        })
    }

    /// Open a session to one device, read its identity, and collect its
    /// merged neighbor list. Either protocol command may fail independently
    /// without failing the node.
    async fn poll(
        &self,
        address: &str,
        device_type: &str,
        credentials: &Credentials,
    ) -> Result<(String, Vec<NeighborRecord>), DiscoveryError> {
        let mut session = self
            .transport
            .connect(address, device_type, credentials)
            .await
            .map_err(|e| DiscoveryError::from_transport(address, e))?;

        let prompt = session
            .identity()
            .await
            .map_err(|e| DiscoveryError::from_transport(address, e))?;
        let hostname = prompt.trim_end_matches(['#', '>']).trim().to_string();
        info!(hostname = %hostname, address = %address, "Connected");

        let cdp = match session.run(CDP_COMMAND, COMMAND_TIMEOUT).await {
            Ok(output) => parse_cdp_neighbors(&output),
            Err(err) => {
                warn!(hostname = %hostname, error = %err, "CDP discovery failed");
                Vec::new()
            }
        };
        let lldp = match session.run(LLDP_COMMAND, COMMAND_TIMEOUT).await {
            Ok(output) => parse_lldp_neighbors(&output),
            Err(err) => {
                warn!(hostname = %hostname, error = %err, "LLDP discovery failed");
                Vec::new()
            }
        };
        session.close().await;

        Ok((hostname, merge_neighbors(cdp, lldp)))
    }
}
