//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortSpec` parses candidate port lists such as `"80,443"` or
//! `"80,8000-8010"` into an ordered, duplicate-free sequence.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Port(u16);

impl Port {
    pub const HTTP: Port = Port(80);
    pub const HTTPS: Port = Port(443);

    /// Create a new Port from a u16, returning None for port 0.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port == 0 { None } else { Some(Self(port)) }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u16),
    #[error("invalid port number: {0}")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("empty port specification")]
    Empty,
}

/// An inclusive range of ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start > end {
            Err(PortError::InvalidRange(start.0, end.0))
        } else {
            Ok(Self { start, end })
        }
    }

    fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }
}

/// An ordered list of candidate ports.
///
/// Unlike a scan range, the order matters: reachability checks walk the
/// list front to back and stop at the first port that accepts a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    ports: Vec<Port>,
}

impl PortSpec {
    /// Build a spec from explicit ports, dropping repeats.
    pub fn from_ports(ports: impl IntoIterator<Item = Port>) -> Result<Self, PortError> {
        let mut seen = HashSet::new();
        let ports: Vec<Port> = ports.into_iter().filter(|port| seen.insert(*port)).collect();

        if ports.is_empty() {
            return Err(PortError::Empty);
        }
        Ok(Self { ports })
    }

    /// Ports in the order they were given.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn into_ports(self) -> Vec<Port> {
        self.ports
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

impl Default for PortSpec {
    fn default() -> Self {
        Self {
            ports: vec![Port::HTTP, Port::HTTPS],
        }
    }
}

fn parse_port(s: &str) -> Result<Port, PortError> {
    let s = s.trim();
    let value: u16 = s
        .parse()
        .map_err(|_| PortError::InvalidFormat(s.to_string()))?;
    Port::try_from(value)
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        let mut ports = Vec::new();

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('-') {
                Some((start, end)) => {
                    let range = PortRange::new(parse_port(start)?, parse_port(end)?)?;
                    ports.extend(range.iter());
                }
                None => ports.push(parse_port(part)?),
            }
        }

        Self::from_ports(ports)
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ports.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(65535).is_some());
        assert_eq!(Port::try_from(0), Err(PortError::OutOfRange(0)));
    }

    #[test]
    fn test_default_candidates() {
        let spec = PortSpec::default();
        assert_eq!(spec.ports(), &[Port::HTTP, Port::HTTPS]);
        assert_eq!(spec.to_string(), "80,443");
    }

    #[test]
    fn test_port_spec_preserves_order() {
        let spec: PortSpec = "443,80,8080".parse().unwrap();
        let raw: Vec<u16> = spec.ports().iter().map(|p| p.as_u16()).collect();
        assert_eq!(raw, vec![443, 80, 8080]);
    }

    #[test]
    fn test_port_spec_ranges() {
        let spec: PortSpec = "80,8000-8003".parse().unwrap();
        assert_eq!(spec.len(), 5);
        assert_eq!(spec.to_string(), "80,8000,8001,8002,8003");
    }

    #[test]
    fn test_port_spec_dedup() {
        let spec: PortSpec = "80,80,443,80".parse().unwrap();
        assert_eq!(spec.to_string(), "80,443");
    }

    #[test]
    fn test_port_spec_full_range() {
        let spec: PortSpec = "1-65535".parse().unwrap();
        assert_eq!(spec.len(), 65535);
        assert_eq!(spec.ports()[0].as_u16(), 1);
        assert_eq!(spec.ports()[65534].as_u16(), 65535);

        let spec: PortSpec = "443,1-65535,80".parse().unwrap();
        assert_eq!(spec.len(), 65535);
        assert_eq!(spec.ports()[0], Port::HTTPS);
    }

    #[test]
    fn test_port_spec_errors() {
        assert_eq!("".parse::<PortSpec>(), Err(PortError::Empty));
        assert_eq!(" , ".parse::<PortSpec>(), Err(PortError::Empty));
        assert_eq!("0".parse::<PortSpec>(), Err(PortError::OutOfRange(0)));
        assert_eq!("90-80".parse::<PortSpec>(), Err(PortError::InvalidRange(90, 80)));
        assert!(matches!("http".parse::<PortSpec>(), Err(PortError::InvalidFormat(_))));
    }

    #[test]
    fn test_port_serde_rejects_zero() {
        assert!(serde_json::from_str::<Port>("0").is_err());
        assert_eq!(serde_json::from_str::<Port>("8080").unwrap().as_u16(), 8080);
    }
}
