//! Reconciliation of CDP and LLDP neighbor views into one list

use indexmap::IndexMap;
use topomap_core::Protocol;
use tracing::debug;

use crate::record::NeighborRecord;

/// Merge the two protocol views of one polled device's neighbors.
///
/// CDP records seed the result and win on every field except the system
/// description, where a non-empty LLDP value is authoritative. LLDP records
/// for an already-seen key only backfill fields CDP left absent (remote IP
/// and the interface pair). Records lacking both a device name and an IP are
/// dropped. Result order: CDP keys in original order, then LLDP-only keys in
/// original order.
pub fn merge_neighbors(
    cdp: Vec<NeighborRecord>,
    lldp: Vec<NeighborRecord>,
) -> Vec<NeighborRecord> {
    let mut merged: IndexMap<String, NeighborRecord> = IndexMap::new();

    for mut record in cdp {
        let Some(key) = record.merge_key() else {
            debug!("Dropping CDP neighbor with no name and no IP");
            continue;
        };
        record.protocols = vec![Protocol::Cdp];
        merged.insert(key, record);
    }

    for mut record in lldp {
        let Some(key) = record.merge_key() else {
            debug!("Dropping LLDP neighbor with no name and no IP");
            continue;
        };
        match merged.get_mut(&key) {
            Some(existing) => {
                if existing.remote_ip.is_none() {
                    existing.remote_ip = record.remote_ip.take();
                }
                if existing.remote_intf.is_none() {
                    existing.remote_intf = record.remote_intf.take();
                }
                if existing.local_intf.is_none() {
                    existing.local_intf = record.local_intf.take();
                }
                existing.protocols.push(Protocol::Lldp);
                if let Some(desc) = record.system_description.take() {
                    if !desc.is_empty() {
                        existing.system_description = Some(desc);
                    }
                }
            }
            None => {
                record.protocols = vec![Protocol::Lldp];
                merged.insert(key, record);
            }
        }
    }

    let result: Vec<NeighborRecord> = merged.into_values().collect();
    debug!("Merged to {} unique neighbors", result.len());
    result
}
