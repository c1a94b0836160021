//! In-memory network simulator
//!
//! Simulates a small campus network with CDP/LLDP-speaking devices so
//! discovery can be exercised without real hardware. Tests can also build
//! custom networks and inject per-address connect failures.

use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

use crate::transport::{Credentials, Session, Transport, TransportError};

/// One simulated device: its prompt hostname and canned command output
#[derive(Debug, Clone, Default)]
pub struct MockDevice {
    pub hostname: String,
    pub cdp_output: String,
    pub lldp_output: String,
}

impl MockDevice {
    pub fn new(hostname: &str, cdp_output: &str, lldp_output: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            cdp_output: cdp_output.to_string(),
            lldp_output: lldp_output.to_string(),
        }
    }
}

/// Failure injected for a given address on connect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Timeout,
    Authentication,
    Connection,
}

/// A simulated network of devices addressed by management IP
#[derive(Debug, Clone, Default)]
pub struct MockNetwork {
    devices: HashMap<String, MockDevice>,
    failures: HashMap<String, MockFailure>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device reachable at the given address
    pub fn with_device(mut self, address: &str, device: MockDevice) -> Self {
        self.devices.insert(address.to_string(), device);
        self
    }

    /// Make connects to the given address fail with the given kind
    pub fn with_failure(mut self, address: &str, failure: MockFailure) -> Self {
        self.failures.insert(address.to_string(), failure);
        self
    }

    /// The built-in example topology: a core switch feeding two distribution
    /// switches, with access switches, an IP phone, and an access point
    /// hanging off the first distribution switch.
    pub fn example() -> Self {
        Self::new()
            .with_device(
                "192.168.1.1",
                MockDevice::new("CORE-SW-01", CORE_CDP, CORE_LLDP),
            )
            .with_device(
                "192.168.1.10",
                MockDevice::new("DIST-SW-01", DIST1_CDP, DIST1_LLDP),
            )
            .with_device(
                "192.168.1.11",
                MockDevice::new("DIST-SW-02", DIST2_CDP, DIST2_LLDP),
            )
            .with_device(
                "192.168.1.20",
                MockDevice::new("ACCESS-SW-01", ACCESS1_CDP, ACCESS1_LLDP),
            )
            .with_device(
                "192.168.1.21",
                MockDevice::new("ACCESS-SW-02", ACCESS2_CDP, ""),
            )
            .with_device(
                "192.168.1.100",
                MockDevice::new("SEP001122334455", PHONE_CDP, ""),
            )
            .with_device(
                "192.168.1.50",
                MockDevice::new("AP-OFFICE-01", AP_CDP, ""),
            )
    }
}

/// A session against one simulated device
#[derive(Debug)]
pub struct MockSession {
    device: MockDevice,
}

impl Session for MockSession {
    async fn identity(&mut self) -> Result<String, TransportError> {
        Ok(format!("{}#", self.device.hostname))
    }

    async fn run(&mut self, command: &str, _timeout: Duration) -> Result<String, TransportError> {
        debug!(hostname = %self.device.hostname, command, "mock command");
        if command.contains("cdp") {
            Ok(self.device.cdp_output.clone())
        } else if command.contains("lldp") {
            Ok(self.device.lldp_output.clone())
        } else {
            Ok(String::new())
        }
    }

    async fn close(self) {
        debug!(hostname = %self.device.hostname, "mock disconnect");
    }
}

impl Transport for MockNetwork {
    type Session = MockSession;

    async fn connect(
        &self,
        address: &str,
        device_type: &str,
        _credentials: &Credentials,
    ) -> Result<MockSession, TransportError> {
        if let Some(failure) = self.failures.get(address) {
            return Err(match failure {
                MockFailure::Timeout => TransportError::Timeout {
                    address: address.to_string(),
                },
                MockFailure::Authentication => TransportError::AuthenticationFailed {
                    address: address.to_string(),
                },
                MockFailure::Connection => TransportError::Connection {
                    address: address.to_string(),
                    message: "connection refused".to_string(),
                },
            });
        }
        match self.devices.get(address) {
            Some(device) => {
                info!(address, device_type, hostname = %device.hostname, "mock connect");
                Ok(MockSession {
                    device: device.clone(),
                })
            }
            None => Err(TransportError::Connection {
                address: address.to_string(),
                message: "no route to host".to_string(),
            }),
        }
    }
}

const CORE_CDP: &str = r#"
Device ID: DIST-SW-01
Entry address(es):
  IP address: 192.168.1.10
Platform: cisco WS-C3750X-48,  Capabilities: Router Switch IGMP
Interface: GigabitEthernet1/0/1,  Port ID (outgoing port): GigabitEthernet1/0/48
Holdtime : 164 sec

Version :
Cisco IOS Software, C3750E Software (C3750E-UNIVERSALK9-M), Version 15.2(4)E8

-------------------------
Device ID: DIST-SW-02
Entry address(es):
  IP address: 192.168.1.11
Platform: cisco WS-C3750X-48,  Capabilities: Router Switch IGMP
Interface: GigabitEthernet1/0/2,  Port ID (outgoing port): GigabitEthernet1/0/48
Holdtime : 142 sec

Version :
Cisco IOS Software, C3750E Software (C3750E-UNIVERSALK9-M), Version 15.2(4)E8
"#;

const CORE_LLDP: &str = r#"
------------------------------------------------
Chassis id: aabb.cc00.1122
Port id: Gi1/0/48
Port Description: GigabitEthernet1/0/48
System Name: DIST-SW-01

System Description:
Cisco IOS Software, C3750E Software (C3750E-UNIVERSALK9-M), Version 15.2(4)E8

Time remaining: 112 seconds
System Capabilities: B,R
Enabled Capabilities: R
Management Addresses:
    IP: 192.168.1.10
Auto Negotiation - supported, enabled
Physical media capabilities:
    1000baseT(FD)
Vlan ID: 1

Local Port id: Gi1/0/1

------------------------------------------------
Chassis id: aabb.cc00.3344
Port id: Gi1/0/48
Port Description: GigabitEthernet1/0/48
System Name: DIST-SW-02

System Description:
Cisco IOS Software, C3750E Software (C3750E-UNIVERSALK9-M), Version 15.2(4)E8

Time remaining: 97 seconds
System Capabilities: B,R
Enabled Capabilities: R
Management Addresses:
    IP: 192.168.1.11
Auto Negotiation - supported, enabled
Physical media capabilities:
    1000baseT(FD)
Vlan ID: 1

Local Port id: Gi1/0/2
"#;

const DIST1_CDP: &str = r#"
Device ID: CORE-SW-01
Entry address(es):
  IP address: 192.168.1.1
Platform: cisco WS-C4500X-32,  Capabilities: Router Switch IGMP
Interface: GigabitEthernet1/0/48,  Port ID (outgoing port): GigabitEthernet1/0/1
Holdtime : 171 sec

Version :
Cisco IOS Software, IOS-XE Software, Catalyst 4500 L3 Switch

-------------------------
Device ID: ACCESS-SW-01
Entry address(es):
  IP address: 192.168.1.20
Platform: cisco WS-C2960X-48,  Capabilities: Switch IGMP
Interface: GigabitEthernet1/0/10,  Port ID (outgoing port): GigabitEthernet0/1
Holdtime : 158 sec

Version :
Cisco IOS Software, C2960X Software

-------------------------
Device ID: ACCESS-SW-02
Entry address(es):
  IP address: 192.168.1.21
Platform: cisco WS-C2960X-48,  Capabilities: Switch IGMP
Interface: GigabitEthernet1/0/11,  Port ID (outgoing port): GigabitEthernet0/1
Holdtime : 145 sec

Version :
Cisco IOS Software, C2960X Software

-------------------------
Device ID: SEP001122334455
Entry address(es):
  IP address: 192.168.1.100
Platform: Cisco IP Phone 7965,  Capabilities: Host Phone
Interface: GigabitEthernet1/0/5,  Port ID (outgoing port): Port 1
Holdtime : 132 sec

Version :
SCCP75.9-4-2SR3-1S

-------------------------
Device ID: AP-OFFICE-01
Entry address(es):
  IP address: 192.168.1.50
Platform: Cisco AIR-AP3802I-B-K9,  Capabilities: Trans-Bridge
Interface: GigabitEthernet1/0/15,  Port ID (outgoing port): GigabitEthernet0
Holdtime : 125 sec

Version :
Cisco IOS Software, AP3800 Software
"#;

const DIST1_LLDP: &str = r#"
------------------------------------------------
Chassis id: 1122.3344.5566
Port id: Gi1/0/1
Port Description: GigabitEthernet1/0/1
System Name: CORE-SW-01

System Description:
Cisco IOS Software, IOS-XE Software, Catalyst 4500 L3 Switch

Time remaining: 115 seconds
System Capabilities: B,R
Enabled Capabilities: R
Management Addresses:
    IP: 192.168.1.1
Auto Negotiation - supported, enabled
Physical media capabilities:
    1000baseT(FD)
Vlan ID: 1

Local Port id: Gi1/0/48
"#;

const DIST2_CDP: &str = r#"
Device ID: CORE-SW-01
Entry address(es):
  IP address: 192.168.1.1
Platform: cisco WS-C4500X-32,  Capabilities: Router Switch IGMP
Interface: GigabitEthernet1/0/48,  Port ID (outgoing port): GigabitEthernet1/0/2
Holdtime : 165 sec

Version :
Cisco IOS Software, IOS-XE Software, Catalyst 4500 L3 Switch
"#;

const DIST2_LLDP: &str = r#"
------------------------------------------------
Chassis id: 1122.3344.5566
Port id: Gi1/0/2
Port Description: GigabitEthernet1/0/2
System Name: CORE-SW-01

System Description:
Cisco IOS Software, IOS-XE Software, Catalyst 4500 L3 Switch

Time remaining: 108 seconds
System Capabilities: B,R
Enabled Capabilities: R
Management Addresses:
    IP: 192.168.1.1
Auto Negotiation - supported, enabled
Physical media capabilities:
    1000baseT(FD)
Vlan ID: 1

Local Port id: Gi1/0/48
"#;

const ACCESS1_CDP: &str = r#"
Device ID: DIST-SW-01
Entry address(es):
  IP address: 192.168.1.10
Platform: cisco WS-C3750X-48,  Capabilities: Router Switch IGMP
Interface: GigabitEthernet0/1,  Port ID (outgoing port): GigabitEthernet1/0/10
Holdtime : 152 sec

Version :
Cisco IOS Software, C3750E Software (C3750E-UNIVERSALK9-M), Version 15.2(4)E8
"#;

const ACCESS1_LLDP: &str = r#"
------------------------------------------------
Chassis id: aabb.cc00.1122
Port id: Gi1/0/10
Port Description: GigabitEthernet1/0/10
System Name: DIST-SW-01

System Description:
Cisco IOS Software, C3750E Software (C3750E-UNIVERSALK9-M), Version 15.2(4)E8

Time remaining: 102 seconds
System Capabilities: B,R
Enabled Capabilities: R
Management Addresses:
    IP: 192.168.1.10
Auto Negotiation - supported, enabled
Physical media capabilities:
    1000baseT(FD)
Vlan ID: 1

Local Port id: Gi0/1
"#;

const ACCESS2_CDP: &str = r#"
Device ID: DIST-SW-01
Entry address(es):
  IP address: 192.168.1.10
Platform: cisco WS-C3750X-48,  Capabilities: Router Switch IGMP
Interface: GigabitEthernet0/1,  Port ID (outgoing port): GigabitEthernet1/0/11
Holdtime : 149 sec

Version :
Cisco IOS Software, C3750E Software (C3750E-UNIVERSALK9-M), Version 15.2(4)E8
"#;

const PHONE_CDP: &str = r#"
Device ID: DIST-SW-01
Entry address(es):
  IP address: 192.168.1.10
Platform: cisco WS-C3750X-48,  Capabilities: Router Switch IGMP
Interface: Port 1,  Port ID (outgoing port): GigabitEthernet1/0/5
Holdtime : 156 sec

Version :
Cisco IOS Software, C3750E Software (C3750E-UNIVERSALK9-M), Version 15.2(4)E8
"#;

const AP_CDP: &str = r#"
Device ID: DIST-SW-01
Entry address(es):
  IP address: 192.168.1.10
Platform: cisco WS-C3750X-48,  Capabilities: Router Switch IGMP
Interface: GigabitEthernet0,  Port ID (outgoing port): GigabitEthernet1/0/15
Holdtime : 148 sec

Version :
Cisco IOS Software, C3750E Software (C3750E-UNIVERSALK9-M), Version 15.2(4)E8
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }

    #[tokio::test]
    async fn test_connect_and_run() {
        let network = MockNetwork::example();
        let mut session = network
            .connect("192.168.1.1", "cisco_ios", &credentials())
            .await
            .unwrap();
        assert_eq!(session.identity().await.unwrap(), "CORE-SW-01#");
        let output = session
            .run("show cdp neighbors detail", Duration::from_secs(30))
            .await
            .unwrap();
        assert!(output.contains("DIST-SW-01"));
        session.close().await;
    }

    #[tokio::test]
    async fn test_unknown_address_is_connection_error() {
        let network = MockNetwork::example();
        let err = network
            .connect("10.255.255.1", "cisco_ios", &credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Connection { .. }));
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let network = MockNetwork::new()
            .with_device("10.0.0.1", MockDevice::new("sw1", "", ""))
            .with_failure("10.0.0.1", MockFailure::Authentication);
        let err = network
            .connect("10.0.0.1", "cisco_ios", &credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::AuthenticationFailed { .. }));
    }
}
