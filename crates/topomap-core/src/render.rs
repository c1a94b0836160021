//! Text tree rendering of a discovered topology

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::device::Protocol;
use crate::topology::Topology;

/// Link attributes shown on a rendered edge
#[derive(Debug, Clone)]
struct EdgeDetail {
    local_intf: String,
    remote_intf: String,
    remote_ip: Option<String>,
    protocols: Vec<Protocol>,
}

/// Render a topology as an indented text tree.
///
/// The directed link list is united into an undirected adjacency view. The
/// root is the caller-supplied hostname, or the lexicographically smallest
/// hostname when none is given, so output is deterministic either way.
pub fn render_tree(topology: &Topology, root: Option<&str>) -> String {
    if topology.device_count() == 0 {
        return "No devices discovered".to_string();
    }

    // Undirected adjacency, BTree-ordered for deterministic traversal
    let mut adjacency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut details: HashMap<(String, String), EdgeDetail> = HashMap::new();

    for device in topology.devices() {
        adjacency.entry(device.hostname.clone()).or_default();
        for link in &device.links {
            adjacency
                .entry(link.local_device.clone())
                .or_default()
                .insert(link.remote_device.clone());
            adjacency
                .entry(link.remote_device.clone())
                .or_default()
                .insert(link.local_device.clone());

            details.insert(
                (link.local_device.clone(), link.remote_device.clone()),
                EdgeDetail {
                    local_intf: link.local_intf.clone(),
                    remote_intf: link.remote_intf.clone(),
                    remote_ip: link.remote_ip.clone(),
                    protocols: link.protocols.clone(),
                },
            );
        }
    }

    // Fill in reverse directions that were only discovered from one side.
    // The interface pair swaps; the IP is omitted since the link's remote IP
    // belongs to the other endpoint.
    let forward: Vec<((String, String), EdgeDetail)> = details
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    for ((local, remote), detail) in forward {
        details
            .entry((remote, local))
            .or_insert_with(|| EdgeDetail {
                local_intf: detail.remote_intf.clone(),
                remote_intf: detail.local_intf.clone(),
                remote_ip: None,
                protocols: detail.protocols.clone(),
            });
    }

    let root = match root {
        Some(name) => name.to_string(),
        // BTreeMap iteration yields the smallest hostname first
        None => match adjacency.keys().next() {
            Some(name) => name.clone(),
            None => return "No devices discovered".to_string(),
        },
    };

    let mut lines = Vec::new();
    let mut visited = HashSet::new();
    walk(
        topology, &adjacency, &details, &root, "", true, &mut visited, &mut lines,
    );
    lines.join("\n")
}

#[allow(clippy::too_many_arguments)]
fn walk(
    topology: &Topology,
    adjacency: &BTreeMap<String, BTreeSet<String>>,
    details: &HashMap<(String, String), EdgeDetail>,
    node: &str,
    prefix: &str,
    is_last: bool,
    visited: &mut HashSet<String>,
    lines: &mut Vec<String>,
) {
    visited.insert(node.to_string());

    let label = match topology.device(node).and_then(|d| d.mgmt_ip.as_deref()) {
        Some(ip) => format!("{node} ({ip})"),
        None => node.to_string(),
    };
    lines.push(format!("{prefix}{label}"));

    let neighbors: Vec<String> = adjacency
        .get(node)
        .map(|set| set.iter().cloned().collect())
        .unwrap_or_default();
    let stub = if is_last { "   " } else { "│  " };

    loop {
        // Recompute per iteration: an earlier sibling's subtree may have
        // consumed some of this node's neighbors.
        let pending: Vec<&String> = neighbors
            .iter()
            .filter(|n| !visited.contains(n.as_str()))
            .collect();
        let Some(&next) = pending.first() else {
            break;
        };
        let is_last_child = pending.len() == 1;
        let connector = if is_last_child { "└─" } else { "├─" };

        let (intf_pair, remote_ip, protocols) =
            match details.get(&(node.to_string(), next.clone())) {
                Some(detail) => (
                    format!("{} ↔ {}", detail.local_intf, detail.remote_intf),
                    detail.remote_ip.clone(),
                    detail.protocols.clone(),
                ),
                None => ("? ↔ ?".to_string(), None, Vec::new()),
            };
        let protocol_label = if protocols.is_empty() {
            String::new()
        } else {
            let tags: Vec<String> = protocols.iter().map(Protocol::to_string).collect();
            format!("[{}]", tags.join("+"))
        };

        let mut connection = format!("{prefix}{stub}{connector}{protocol_label} {intf_pair}");
        if let Some(ip) = remote_ip {
            connection.push_str(&format!(" ({ip})"));
        }
        lines.push(connection);

        let child_prefix = format!(
            "{prefix}{stub}{}",
            if is_last_child { "   " } else { "│  " }
        );
        let next = next.clone();
        walk(
            topology,
            adjacency,
            details,
            &next,
            &child_prefix,
            is_last_child,
            visited,
            lines,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Link;

    fn link(local: &str, local_intf: &str, remote: &str, remote_intf: &str, ip: &str) -> Link {
        Link {
            local_device: local.to_string(),
            local_intf: local_intf.to_string(),
            remote_device: remote.to_string(),
            remote_intf: remote_intf.to_string(),
            remote_ip: Some(ip.to_string()),
            protocols: vec![Protocol::Cdp],
        }
    }

    #[test]
    fn test_empty_topology() {
        let topology = Topology::new();
        assert_eq!(render_tree(&topology, None), "No devices discovered");
    }

    #[test]
    fn test_three_node_chain() {
        let mut topology = Topology::new();
        topology.register_device("A", Some("10.0.0.1"), None, None);
        topology.add_link(link("A", "Gi0/1", "B", "Gi0/2", "10.0.0.2"));
        topology.add_link(link("B", "Gi0/3", "C", "Gi0/4", "10.0.0.3"));

        let output = render_tree(&topology, Some("A"));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "A (10.0.0.1)");
        // Each node has exactly one unvisited neighbor, so every connector
        // is the last-child glyph
        assert_eq!(lines[1], "   └─[CDP] Gi0/1 ↔ Gi0/2 (10.0.0.2)");
        assert_eq!(lines[2], "      B (10.0.0.2)");
        assert_eq!(lines[3], "         └─[CDP] Gi0/3 ↔ Gi0/4 (10.0.0.3)");
        assert_eq!(lines[4], "            C (10.0.0.3)");
    }

    #[test]
    fn test_default_root_is_smallest_hostname() {
        let mut topology = Topology::new();
        topology.add_link(link("zulu", "Gi0/1", "alpha", "Gi0/2", "10.0.0.2"));

        let output = render_tree(&topology, None);
        assert!(output.starts_with("alpha"));
    }

    #[test]
    fn test_siblings_use_mid_and_last_connectors() {
        let mut topology = Topology::new();
        topology.add_link(link("root", "Gi0/1", "left", "Gi0/2", "10.0.0.2"));
        topology.add_link(link("root", "Gi0/3", "right", "Gi0/4", "10.0.0.3"));

        let output = render_tree(&topology, Some("root"));
        assert!(output.contains("├─[CDP] Gi0/1 ↔ Gi0/2"));
        assert!(output.contains("└─[CDP] Gi0/3 ↔ Gi0/4"));
    }

    #[test]
    fn test_cycle_rendered_once() {
        let mut topology = Topology::new();
        topology.add_link(link("a", "1", "b", "2", "10.0.0.2"));
        topology.add_link(link("b", "3", "c", "4", "10.0.0.3"));
        topology.add_link(link("c", "5", "a", "6", "10.0.0.1"));

        let output = render_tree(&topology, Some("a"));
        // Each device appears exactly once despite the cycle
        for name in ["a", "b", "c"] {
            let count = output
                .lines()
                .filter(|l| l.trim_start().starts_with(&format!("{name} ")))
                .count();
            assert_eq!(count, 1, "device {name} rendered more than once");
        }
    }

    #[test]
    fn test_reverse_direction_swaps_interfaces() {
        let mut topology = Topology::new();
        // Only discovered from b's side; rendering from a uses the reverse
        topology.add_link(link("b", "Gi0/9", "a", "Gi0/1", "10.0.0.1"));

        let output = render_tree(&topology, Some("a"));
        assert!(output.contains("Gi0/1 ↔ Gi0/9"));
        // The stored remote IP belongs to a itself, so the edge omits it
        assert!(!output.lines().nth(1).unwrap().contains("10.0.0.1"));
    }

    #[test]
    fn test_protocol_tags_joined() {
        let mut topology = Topology::new();
        let mut l = link("a", "1", "b", "2", "10.0.0.2");
        l.protocols = vec![Protocol::Cdp, Protocol::Lldp];
        topology.add_link(l);

        let output = render_tree(&topology, Some("a"));
        assert!(output.contains("[CDP+LLDP]"));
    }
}
