//! Topomap Discovery - Neighbor parsing and topology crawling
//!
//! This crate implements the discovery engine:
//! - CDP-style and LLDP-style neighbor output parsers
//! - Merging of the two protocol views into one neighbor list
//! - Transport traits for opening command sessions to devices
//! - A simulated in-memory network for testing and demos
//! - The breadth-first crawler that builds the topology

pub mod cdp;
pub mod crawler;
pub mod lldp;
pub mod merge;
pub mod mock;
pub mod record;
pub mod transport;

pub use cdp::parse_cdp_neighbors;
pub use crawler::{Discoverer, DiscoveryError, DiscoveryReport, ErrorKind};
pub use lldp::parse_lldp_neighbors;
pub use merge::merge_neighbors;
pub use mock::MockNetwork;
pub use record::NeighborRecord;
pub use transport::{Credentials, Session, Transport, TransportError};
