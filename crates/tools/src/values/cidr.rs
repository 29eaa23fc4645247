use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::ToolError;

/// An IPv4 or IPv6 network in CIDR notation.
///
/// Parsing is non-strict: host bits set in the address are masked off, so
/// `192.168.1.17/24` yields the network `192.168.1.0/24`. The `Display`
/// form is always the canonical network and parses back to an equal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrNetwork {
    network: IpAddr,
    prefix_len: u8,
}

impl CidrNetwork {
    pub fn parse(text: &str) -> Result<Self, ToolError> {
        let invalid = || ToolError::InvalidValue(format!("Invalid CIDR IP address: {text}"));

        let (addr_part, mask_part) = match text.split_once('/') {
            Some((addr, mask)) => (addr, Some(mask)),
            None => (text, None),
        };

        let addr = IpAddr::from_str(addr_part).map_err(|_| invalid())?;
        let max_len = match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };

        let prefix_len = match mask_part {
            None => max_len,
            Some(mask) if !mask.is_empty() && mask.bytes().all(|b| b.is_ascii_digit()) => {
                let len: u8 = mask.parse().map_err(|_| invalid())?;
                if len > max_len {
                    return Err(invalid());
                }
                len
            }
            // Dotted netmask or hostmask, IPv4 only.
            Some(mask) => match addr {
                IpAddr::V4(_) => {
                    let mask = Ipv4Addr::from_str(mask).map_err(|_| invalid())?;
                    ipv4_mask_prefix(mask).ok_or_else(invalid)?
                }
                IpAddr::V6(_) => return Err(invalid()),
            },
        };

        Ok(Self {
            network: mask_addr(addr, prefix_len),
            prefix_len,
        })
    }

    pub fn network(&self) -> IpAddr {
        self.network
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn is_ipv4(&self) -> bool {
        self.network.is_ipv4()
    }

    pub fn is_ipv6(&self) -> bool {
        self.network.is_ipv6()
    }

    /// Address family name, `IPv4Network` or `IPv6Network`.
    pub fn family(&self) -> &'static str {
        if self.is_ipv4() {
            "IPv4Network"
        } else {
            "IPv6Network"
        }
    }
}

fn mask_addr(addr: IpAddr, prefix_len: u8) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => {
            let bits = u32::from(v4);
            let mask = u32::MAX.checked_shl(32 - prefix_len as u32).unwrap_or(0);
            IpAddr::V4(Ipv4Addr::from(bits & mask))
        }
        IpAddr::V6(v6) => {
            let bits = u128::from(v6);
            let mask = u128::MAX.checked_shl(128 - prefix_len as u32).unwrap_or(0);
            IpAddr::V6(Ipv6Addr::from(bits & mask))
        }
    }
}

/// Prefix length for a contiguous netmask (`255.255.255.0`) or its
/// hostmask inverse (`0.0.0.255`).
fn ipv4_mask_prefix(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    let is_netmask = |b: u32| b.leading_ones() + b.trailing_zeros() == 32;

    if is_netmask(bits) {
        Some(bits.leading_ones() as u8)
    } else if is_netmask(!bits) {
        Some((!bits).leading_ones() as u8)
    } else {
        None
    }
}

impl fmt::Display for CidrNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

impl FromStr for CidrNetwork {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_host_bits_are_masked() {
        let net = CidrNetwork::parse("192.168.1.17/24").unwrap();
        assert_eq!(net.to_string(), "192.168.1.0/24");
        assert_eq!(net.prefix_len(), 24);
    }

    #[test]
    fn test_bare_address_is_host_network() {
        assert_eq!(CidrNetwork::parse("10.1.2.3").unwrap().to_string(), "10.1.2.3/32");
        assert_eq!(CidrNetwork::parse("fe80::1").unwrap().to_string(), "fe80::1/128");
    }

    #[test]
    fn test_zero_prefix() {
        assert_eq!(CidrNetwork::parse("10.9.8.7/0").unwrap().to_string(), "0.0.0.0/0");
        assert_eq!(CidrNetwork::parse("2001:db8::1/0").unwrap().to_string(), "::/0");
    }

    #[test]
    fn test_dotted_masks() {
        assert_eq!(
            CidrNetwork::parse("172.16.5.4/255.255.0.0").unwrap().to_string(),
            "172.16.0.0/16"
        );
        assert_eq!(
            CidrNetwork::parse("172.16.5.4/0.0.0.255").unwrap().to_string(),
            "172.16.5.0/24"
        );
        assert!(CidrNetwork::parse("172.16.5.4/255.0.255.0").is_err());
    }

    #[test]
    fn test_ipv6_canonical_form() {
        let net = CidrNetwork::parse("2001:0db8:0000:0000::abcd/64").unwrap();
        assert_eq!(net.to_string(), "2001:db8::/64");
        assert!(net.is_ipv6());
        assert_eq!(net.family(), "IPv6Network");
    }

    #[test]
    fn test_rejects_signed_or_padded_prefix() {
        assert!(CidrNetwork::parse("10.0.0.0/+8").is_err());
        assert!(CidrNetwork::parse("10.0.0.0/ 8").is_err());
        assert!(CidrNetwork::parse("10.0.0.0/").is_err());
        assert!(CidrNetwork::parse("::/129").is_err());
    }
}
