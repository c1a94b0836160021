//! Device-type classification from advertised platform and capability strings
//!
//! The classifier maps a neighbor's platform, system description, and
//! capability tokens to a connection profile id, or to "do not crawl". The
//! pattern table is loaded from a TOML file; the declared profile order is
//! load-bearing since it resolves scoring ties.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Failed to read device type patterns: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse device type patterns: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Capability category derived from a device's advertised capability tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Router,
    Switch,
    Phone,
    Server,
    AccessPoint,
    Other,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Router => "router",
            Category::Switch => "switch",
            Category::Phone => "phone",
            Category::Server => "server",
            Category::AccessPoint => "access-point",
            Category::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// Per-request crawl filters: which capability categories may be crawled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlFilters {
    pub routers: bool,
    pub switches: bool,
    pub phones: bool,
    pub servers: bool,
    pub access_points: bool,
    pub other: bool,
}

impl Default for CrawlFilters {
    /// Routers and switches only, matching the classic crawl policy
    fn default() -> Self {
        Self {
            routers: true,
            switches: true,
            phones: false,
            servers: false,
            access_points: false,
            other: false,
        }
    }
}

impl CrawlFilters {
    /// Whether a resolved category is enabled for crawling
    pub fn allows(&self, category: Category) -> bool {
        match category {
            Category::Router => self.routers,
            Category::Switch => self.switches,
            Category::Phone => self.phones,
            Category::Server => self.servers,
            Category::AccessPoint => self.access_points,
            Category::Other => self.other,
        }
    }
}

/// One device-type profile in the pattern table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceTypeProfile {
    /// Connection profile id (e.g. "cisco_ios")
    pub id: String,
    /// Substrings matched against the platform string, case-insensitive
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Substrings matched against the system description, case-insensitive
    #[serde(default)]
    pub descriptions: Vec<String>,
    /// Match weight; a description match scores half of this
    #[serde(default = "default_priority")]
    pub priority: u32,
}

fn default_priority() -> u32 {
    10
}

/// Capability-category membership table.
///
/// Tokens are matched lowercase. Categories are tested in a fixed priority
/// order: access-point, router, switch, phone, server; first match wins.
/// The `trans-bridge` token is a vendor quirk some access points report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityTable {
    #[serde(default = "default_access_point_tokens")]
    pub access_point: Vec<String>,
    #[serde(default = "default_router_tokens")]
    pub router: Vec<String>,
    #[serde(default = "default_switch_tokens")]
    pub switch: Vec<String>,
    #[serde(default = "default_phone_tokens")]
    pub phone: Vec<String>,
    #[serde(default = "default_server_tokens")]
    pub server: Vec<String>,
}

fn default_access_point_tokens() -> Vec<String> {
    to_strings(&["trans-bridge", "wlan", "access-point", "ap", "w"])
}

fn default_router_tokens() -> Vec<String> {
    to_strings(&["router", "r"])
}

fn default_switch_tokens() -> Vec<String> {
    to_strings(&["switch", "bridge", "b", "s"])
}

fn default_phone_tokens() -> Vec<String> {
    to_strings(&["phone", "telephone", "t"])
}

fn default_server_tokens() -> Vec<String> {
    to_strings(&["host", "station", "server", "h"])
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self {
            access_point: default_access_point_tokens(),
            router: default_router_tokens(),
            switch: default_switch_tokens(),
            phone: default_phone_tokens(),
            server: default_server_tokens(),
        }
    }
}

impl CapabilityTable {
    /// Resolve the category for a capability string.
    ///
    /// The string is tokenized on commas and whitespace and lowercased, so
    /// both "Router Switch IGMP" and "B,R" styles work.
    pub fn category_of(&self, capabilities: &str) -> Category {
        let tokens: Vec<String> = capabilities
            .split([',', ' '])
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let has = |set: &[String]| tokens.iter().any(|t| set.iter().any(|s| s == t));

        if has(&self.access_point) {
            Category::AccessPoint
        } else if has(&self.router) {
            Category::Router
        } else if has(&self.switch) {
            Category::Switch
        } else if has(&self.phone) {
            Category::Phone
        } else if has(&self.server) {
            Category::Server
        } else {
            Category::Other
        }
    }
}

/// Classifier configuration: ordered profile list plus capability table.
///
/// The `[[device_type]]` array order from the TOML file is preserved in the
/// `device_types` vector; it decides scoring ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_device_type")]
    pub default_device_type: String,
    #[serde(default, rename = "device_type")]
    pub device_types: Vec<DeviceTypeProfile>,
    #[serde(default)]
    pub capabilities: CapabilityTable,
}

fn default_device_type() -> String {
    "cisco_ios".to_string()
}

impl Default for ClassifierConfig {
    /// Built-in pattern table used when no config file is present
    fn default() -> Self {
        let profile = |id: &str, platforms: &[&str], descriptions: &[&str], priority: u32| {
            DeviceTypeProfile {
                id: id.to_string(),
                platforms: to_strings(platforms),
                descriptions: to_strings(descriptions),
                priority,
            }
        };
        Self {
            default_device_type: default_device_type(),
            device_types: vec![
                profile(
                    "cisco_ios",
                    &["cisco", "catalyst", "ws-c"],
                    &["cisco ios software"],
                    50,
                ),
                profile("cisco_xe", &["asr", "isr4"], &["ios-xe", "ios xe"], 55),
                profile("cisco_nxos", &["nexus", "n9k", "n5k"], &["nx-os"], 60),
                profile("arista_eos", &["arista", "dcs-"], &["arista eos"], 60),
                profile("juniper_junos", &["juniper", "srx", "ex4", "mx"], &["junos"], 60),
            ],
            capabilities: CapabilityTable::default(),
        }
    }
}

impl ClassifierConfig {
    /// Load the pattern table from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ClassifierError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse the pattern table from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ClassifierError> {
        let config: ClassifierConfig = toml::from_str(content)?;
        Ok(config)
    }
}

/// Maps neighbor platform/description/capability strings to a connection
/// profile id, honoring per-request category filters.
#[derive(Debug, Clone)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a neighbor, returning the device-type id to crawl it with,
    /// or `None` when the neighbor should not be crawled.
    ///
    /// An empty capability string means the category is unknown: without
    /// filters it is crawlable by default, with filters it is crawlable iff
    /// routers or switches are enabled.
    pub fn classify(
        &self,
        platform: &str,
        system_description: &str,
        capabilities: &str,
        filters: Option<&CrawlFilters>,
    ) -> Option<String> {
        let crawlable = if capabilities.trim().is_empty() {
            match filters {
                None => true,
                Some(f) => f.routers || f.switches,
            }
        } else {
            let category = self.config.capabilities.category_of(capabilities);
            let allowed = filters.map_or(true, |f| f.allows(category));
            if !allowed {
                debug!(category = %category, capabilities, "category filtered out");
            }
            allowed
        };
        if !crawlable {
            return None;
        }
        Some(self.match_profiles(platform, system_description))
    }

    /// Score every profile against the platform and description strings and
    /// return the best match, falling back to the configured default.
    ///
    /// Ties are broken by declared profile order: the first profile to reach
    /// the top score wins.
    fn match_profiles(&self, platform: &str, system_description: &str) -> String {
        let platform_lower = platform.to_lowercase();
        let desc_lower = system_description.to_lowercase();

        let mut best: Option<&DeviceTypeProfile> = None;
        let mut best_score = 0.0f64;

        for profile in &self.config.device_types {
            let mut score = 0.0;
            if profile
                .platforms
                .iter()
                .any(|p| platform_lower.contains(&p.to_lowercase()))
            {
                score += profile.priority as f64;
            }
            if profile
                .descriptions
                .iter()
                .any(|d| desc_lower.contains(&d.to_lowercase()))
            {
                score += profile.priority as f64 * 0.5;
            }
            if score > best_score {
                best_score = score;
                best = Some(profile);
            }
        }

        match best {
            Some(profile) => {
                debug!(platform, device_type = %profile.id, "pattern matched");
                profile.id.clone()
            }
            None => {
                debug!(platform, default = %self.config.default_device_type, "no pattern matched");
                self.config.default_device_type.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(ClassifierConfig::default())
    }

    #[test]
    fn test_router_checked_before_switch() {
        let filters = CrawlFilters {
            routers: true,
            switches: false,
            ..CrawlFilters::default()
        };
        // Both tokens present: router category wins the priority order, and
        // routers are allowed, so crawling proceeds.
        let result = classifier().classify(
            "cisco WS-C3750X-48",
            "",
            "Router Switch IGMP",
            Some(&filters),
        );
        assert_eq!(result.as_deref(), Some("cisco_ios"));
    }

    #[test]
    fn test_trans_bridge_is_access_point() {
        let table = CapabilityTable::default();
        assert_eq!(table.category_of("Trans-Bridge"), Category::AccessPoint);
        // Access-point check outranks router even when both appear
        assert_eq!(
            table.category_of("Router Trans-Bridge"),
            Category::AccessPoint
        );
    }

    #[test]
    fn test_category_token_styles() {
        let table = CapabilityTable::default();
        assert_eq!(table.category_of("B,R"), Category::Router);
        assert_eq!(table.category_of("Switch IGMP"), Category::Switch);
        assert_eq!(table.category_of("Host Phone"), Category::Phone);
        assert_eq!(table.category_of("Station"), Category::Server);
        assert_eq!(table.category_of("IGMP"), Category::Other);
    }

    #[test]
    fn test_filtered_category_returns_none() {
        let filters = CrawlFilters::default(); // phones disabled
        let result = classifier().classify("Cisco IP Phone 7965", "", "Host Phone", Some(&filters));
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_capabilities_default_crawlable() {
        // No filters supplied: unknown capability is crawlable
        assert!(classifier().classify("cisco WS-C2960X-48", "", "", None).is_some());

        // Filters allowing routers or switches keep it crawlable
        let filters = CrawlFilters::default();
        assert!(classifier()
            .classify("cisco WS-C2960X-48", "", "", Some(&filters))
            .is_some());

        // Neither routers nor switches allowed: not crawlable
        let filters = CrawlFilters {
            routers: false,
            switches: false,
            phones: true,
            servers: true,
            access_points: true,
            other: true,
        };
        assert!(classifier()
            .classify("cisco WS-C2960X-48", "", "", Some(&filters))
            .is_none());
    }

    #[test]
    fn test_description_scores_half_weight() {
        let config = ClassifierConfig::from_toml(
            r#"
default_device_type = "generic"

[[device_type]]
id = "by_platform"
platforms = ["widget"]
priority = 10

[[device_type]]
id = "by_description"
descriptions = ["widget"]
priority = 10
"#,
        )
        .unwrap();
        let classifier = Classifier::new(config);
        // Platform match (10) beats description match (5)
        let result = classifier.classify("widget-2000", "widget os", "Router", None);
        assert_eq!(result.as_deref(), Some("by_platform"));
    }

    #[test]
    fn test_tie_broken_by_declared_order() {
        let config = ClassifierConfig::from_toml(
            r#"
default_device_type = "generic"

[[device_type]]
id = "first"
platforms = ["acme"]
priority = 20

[[device_type]]
id = "second"
platforms = ["acme"]
priority = 20
"#,
        )
        .unwrap();
        let classifier = Classifier::new(config);
        let result = classifier.classify("acme 9000", "", "Router", None);
        assert_eq!(result.as_deref(), Some("first"));
    }

    #[test]
    fn test_no_match_falls_back_to_default() {
        let result = classifier().classify("frobnitz 3000", "", "Router", None);
        assert_eq!(result.as_deref(), Some("cisco_ios"));
    }

    #[test]
    fn test_config_roundtrip_preserves_order() {
        let config = ClassifierConfig::from_toml(
            r#"
default_device_type = "cisco_ios"

[[device_type]]
id = "arista_eos"
platforms = ["arista"]
priority = 60

[[device_type]]
id = "cisco_ios"
platforms = ["cisco"]
descriptions = ["cisco ios software"]
priority = 50

[capabilities]
router = ["router", "r"]
"#,
        )
        .unwrap();
        assert_eq!(config.device_types.len(), 2);
        assert_eq!(config.device_types[0].id, "arista_eos");
        assert_eq!(config.device_types[1].id, "cisco_ios");
        // Unlisted categories keep their defaults
        assert_eq!(config.capabilities.router, vec!["router", "r"]);
        assert!(!config.capabilities.switch.is_empty());
    }
}
