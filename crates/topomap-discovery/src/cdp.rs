//! CDP-style neighbor output parsing
//!
//! Parses `show cdp neighbors detail` style output: one block per neighbor,
//! each introduced by a `Device ID:` line. Malformed or unexpected lines are
//! ignored rather than rejected; parsing never fails.

use tracing::debug;

use crate::record::{strip_domain, NeighborRecord};

/// Parse CDP neighbor detail output into neighbor records, one per block,
/// in input order.
pub fn parse_cdp_neighbors(output: &str) -> Vec<NeighborRecord> {
    let mut neighbors = Vec::new();
    let mut current = NeighborRecord::default();

    for line in output.lines() {
        let line = line.trim();

        if let Some(value) = line.strip_prefix("Device ID:") {
            // New neighbor block: flush the accumulator
            if !current.is_empty() {
                neighbors.push(std::mem::take(&mut current));
            }
            current.remote_device = Some(strip_domain(value.trim()).to_string());
        } else if line.contains("IP address:") || line.contains("IPv4 Address:") {
            let value = line
                .split_once("IPv4 Address:")
                .or_else(|| line.split_once("IP address:"))
                .map(|(_, v)| v.trim());
            if let Some(ip) = value {
                // Placeholders like "(not available)" are not recorded
                if !ip.is_empty() && !ip.starts_with('(') {
                    current.remote_ip = Some(ip.to_string());
                }
            }
        } else if line.starts_with("Platform:") {
            let mut parts = line.split(',');
            if let Some(platform) = parts.next().and_then(|p| p.strip_prefix("Platform:")) {
                current.remote_platform = Some(platform.trim().to_string());
            }
            // Capabilities may ride on the same line as a later sub-field
            for part in line.split(',') {
                if let Some((_, caps)) = part.split_once("Capabilities:") {
                    current.remote_capabilities = Some(caps.trim().to_string());
                }
            }
        } else if line.starts_with("Interface:") {
            // Format: "Interface: Gi1/0/1,  Port ID (outgoing port): Gi0/1"
            let mut parts = line.split(',');
            if let Some(local) = parts.next().and_then(|p| p.strip_prefix("Interface:")) {
                current.local_intf = Some(local.trim().to_string());
            }
            if let Some(second) = parts.next() {
                if second.contains("Port ID") {
                    if let Some(remote) = second.rsplit(':').next() {
                        current.remote_intf = Some(remote.trim().to_string());
                    }
                }
            }
        }
    }

    if !current.is_empty() {
        neighbors.push(current);
    }

    debug!("Parsed {} CDP neighbors", neighbors.len());
    neighbors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_neighbor() {
        let output = r#"
Device ID: DIST-SW-01
Entry address(es):
  IP address: 192.168.1.10
Platform: cisco WS-C3750X-48,  Capabilities: Router Switch IGMP
Interface: GigabitEthernet1/0/1,  Port ID (outgoing port): GigabitEthernet1/0/48
Holdtime : 164 sec
"#;
        let neighbors = parse_cdp_neighbors(output);
        assert_eq!(neighbors.len(), 1);
        let n = &neighbors[0];
        assert_eq!(n.remote_device.as_deref(), Some("DIST-SW-01"));
        assert_eq!(n.remote_ip.as_deref(), Some("192.168.1.10"));
        assert_eq!(n.remote_platform.as_deref(), Some("cisco WS-C3750X-48"));
        assert_eq!(
            n.remote_capabilities.as_deref(),
            Some("Router Switch IGMP")
        );
        assert_eq!(n.local_intf.as_deref(), Some("GigabitEthernet1/0/1"));
        assert_eq!(n.remote_intf.as_deref(), Some("GigabitEthernet1/0/48"));
    }

    #[test]
    fn test_multiple_blocks_keep_input_order() {
        let output = r#"
Device ID: DIST-SW-01
  IP address: 192.168.1.10
Interface: GigabitEthernet1/0/1,  Port ID (outgoing port): GigabitEthernet1/0/48

-------------------------
Device ID: DIST-SW-02
  IP address: 192.168.1.11
Interface: GigabitEthernet1/0/2,  Port ID (outgoing port): GigabitEthernet1/0/48
"#;
        let neighbors = parse_cdp_neighbors(output);
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0].remote_device.as_deref(), Some("DIST-SW-01"));
        assert_eq!(neighbors[1].remote_device.as_deref(), Some("DIST-SW-02"));
    }

    #[test]
    fn test_domain_suffix_stripped() {
        let output = "Device ID: edge-rtr-01.example.com\n";
        let neighbors = parse_cdp_neighbors(output);
        assert_eq!(neighbors[0].remote_device.as_deref(), Some("edge-rtr-01"));
    }

    #[test]
    fn test_placeholder_ip_skipped() {
        let output = r#"
Device ID: AP-LOBBY-01
  IP address: (not available)
"#;
        let neighbors = parse_cdp_neighbors(output);
        assert_eq!(neighbors.len(), 1);
        assert!(neighbors[0].remote_ip.is_none());
    }

    #[test]
    fn test_ipv4_address_label_accepted() {
        let output = r#"
Device ID: DIST-SW-01
  IPv4 Address: 192.168.1.10
"#;
        let neighbors = parse_cdp_neighbors(output);
        assert_eq!(neighbors[0].remote_ip.as_deref(), Some("192.168.1.10"));
    }

    #[test]
    fn test_platform_without_capabilities() {
        let output = r#"
Device ID: X
Platform: cisco WS-C2960X-48
"#;
        let neighbors = parse_cdp_neighbors(output);
        assert_eq!(
            neighbors[0].remote_platform.as_deref(),
            Some("cisco WS-C2960X-48")
        );
        assert!(neighbors[0].remote_capabilities.is_none());
    }

    #[test]
    fn test_interface_without_port_id_label() {
        let output = r#"
Device ID: X
Interface: GigabitEthernet1/0/5,  Holdtime: 120 sec
"#;
        let neighbors = parse_cdp_neighbors(output);
        assert_eq!(
            neighbors[0].local_intf.as_deref(),
            Some("GigabitEthernet1/0/5")
        );
        assert!(neighbors[0].remote_intf.is_none());
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert!(parse_cdp_neighbors("").is_empty());
        assert!(parse_cdp_neighbors("total garbage\nnothing useful here\n").is_empty());
    }
}
