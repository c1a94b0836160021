//! Transport traits for opening command sessions to devices
//!
//! The crawler is transport-agnostic: anything that can open an
//! authenticated session and execute command strings can drive a discovery,
//! whether a real SSH scraper or the in-memory simulator in [`crate::mock`].
//! Connection and command timeouts are owned by the transport, not the
//! crawler.

use std::time::Duration;
use thiserror::Error;

/// Login credentials for device sessions
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Transport layer errors (connection, authentication, command execution)
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection attempt timed out
    #[error("Connection timeout to {address}")]
    Timeout { address: String },

    /// Authentication was rejected
    #[error("Authentication failed for {address}")]
    AuthenticationFailed { address: String },

    /// Any other connection-level failure
    #[error("Connection error to {address}: {message}")]
    Connection { address: String, message: String },

    /// A command failed to execute on an open session
    #[error("Command '{command}' failed: {message}")]
    Command { command: String, message: String },
}

/// An authenticated, command-executing handle to one device
pub trait Session {
    /// The device's self-reported prompt (hostname plus trailing `#`/`>`)
    fn identity(&mut self) -> impl std::future::Future<Output = Result<String, TransportError>>;

    /// Execute a command and return its raw output
    fn run(
        &mut self,
        command: &str,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<String, TransportError>>;

    /// Close the session
    fn close(self) -> impl std::future::Future<Output = ()>;
}

/// Opens sessions to devices by address and device-type hint
pub trait Transport {
    type Session: Session;

    fn connect(
        &self,
        address: &str,
        device_type: &str,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<Self::Session, TransportError>>;
}
