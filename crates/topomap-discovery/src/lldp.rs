//! LLDP-style neighbor output parsing
//!
//! Parses `show lldp neighbors detail` style output. Same single-pass
//! scanner shape as the CDP parser, with two nested sub-states: a multi-line
//! system description accumulation, and a bounded management-address section
//! holding the neighbor's IP. Parsing never fails.

use tracing::debug;

use crate::record::{strip_domain, NeighborRecord};

/// Parse LLDP neighbor detail output into neighbor records, one per chassis
/// block, in input order.
pub fn parse_lldp_neighbors(output: &str) -> Vec<NeighborRecord> {
    let mut neighbors = Vec::new();
    let mut current = NeighborRecord::default();
    let mut in_mgmt_addresses = false;
    let mut in_description = false;

    for line in output.lines() {
        let line = line.trim();

        if let Some(value) = line.strip_prefix("Chassis id:") {
            // New neighbor block: flush and seed platform from the chassis id
            if !current.is_empty() {
                neighbors.push(std::mem::take(&mut current));
            }
            in_mgmt_addresses = false;
            in_description = false;
            current.remote_platform = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("System Name:") {
            current.remote_device = Some(strip_domain(value.trim()).to_string());
            in_mgmt_addresses = false;
        } else if let Some(value) = line.strip_prefix("Local Port id:") {
            current.local_intf = Some(value.trim().to_string());
            in_mgmt_addresses = false;
        } else if let Some(value) = line.strip_prefix("Port id:") {
            current.remote_intf = Some(value.trim().to_string());
            in_mgmt_addresses = false;
        } else if line.starts_with("System Description:") {
            // Description text continues on following lines
            current.system_description = Some(String::new());
            in_description = true;
            in_mgmt_addresses = false;
        } else if let Some(value) = line.strip_prefix("System Capabilities:") {
            current.remote_capabilities = Some(value.trim().to_string());
            in_mgmt_addresses = false;
            in_description = false;
        } else if line.starts_with("Management Address") {
            // Covers both "Management Address:" and "Management Addresses:"
            in_mgmt_addresses = true;
            in_description = false;
        } else if in_description && !line.is_empty() {
            if line.starts_with("Time remaining") || line.starts_with("Enabled Capabilities") {
                in_description = false;
            } else if let Some(desc) = current.system_description.as_mut() {
                if !desc.is_empty() {
                    desc.push(' ');
                }
                desc.push_str(line);
            }
        } else if in_mgmt_addresses && line.starts_with("IP:") {
            if let Some((_, value)) = line.split_once("IP:") {
                let ip = value.trim();
                if !ip.is_empty() {
                    current.remote_ip = Some(ip.to_string());
                }
            }
        } else if in_mgmt_addresses && !line.is_empty() {
            // Any line that is not an IP-family continuation ends the section
            if !["IP", "IPv4", "IPv6", "Other"]
                .iter()
                .any(|label| line.starts_with(label))
            {
                in_mgmt_addresses = false;
            }
        }
    }

    if !current.is_empty() {
        neighbors.push(current);
    }

    debug!("Parsed {} LLDP neighbors", neighbors.len());
    neighbors
}
