//! Range expansion: turn a CIDR specification into candidate addresses.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::IpNet;
use pingsweep_core::{Result, SweepError};

/// Ranges with more host bits than this are refused rather than expanded.
pub const MAX_HOST_BITS: u8 = 24;

/// Expand `spec` into the addresses of the range, in ascending order.
///
/// A single-host prefix (`/32`, `/128`) yields just that address. Otherwise
/// the network and broadcast addresses are dropped, so `/31` and `/127`
/// expand to nothing.
///
/// The specification is parsed as given; surrounding whitespace is
/// malformed. A well-formed range with more than `2^MAX_HOST_BITS`
/// addresses (wider than an IPv4 `/8`) is also refused with
/// `SweepError::InvalidRange`, its reason stating the range is too large,
/// because every candidate is materialised before probing starts.
pub fn expand_range(spec: &str) -> Result<Vec<String>> {
    let net: IpNet = spec
        .parse()
        .map_err(|e: ipnet::AddrParseError| SweepError::invalid_range(spec, e.to_string()))?;

    if net.prefix_len() == net.max_prefix_len() {
        return Ok(vec![net.addr().to_string()]);
    }

    let host_bits = net.max_prefix_len() - net.prefix_len();
    if host_bits > MAX_HOST_BITS {
        return Err(SweepError::invalid_range(
            spec,
            format!(
                "range too large: spans 2^{host_bits} addresses, at most 2^{MAX_HOST_BITS} can be scanned"
            ),
        ));
    }

    // Network and broadcast are the first and last of the enumeration.
    let total = 1usize << host_bits;
    let mut cursor = AddrCounter::new(net.network());
    cursor.increment();
    let mut addrs = Vec::with_capacity(total - 2);
    for _ in 0..total - 2 {
        addrs.push(cursor.current().to_string());
        cursor.increment();
    }
    Ok(addrs)
}

/// Big-endian counter over the octets of either address family.
enum AddrCounter {
    V4([u8; 4]),
    V6([u8; 16]),
}

impl AddrCounter {
    fn new(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(a) => Self::V4(a.octets()),
            IpAddr::V6(a) => Self::V6(a.octets()),
        }
    }

    fn current(&self) -> IpAddr {
        match self {
            Self::V4(o) => IpAddr::V4(Ipv4Addr::from(*o)),
            Self::V6(o) => IpAddr::V6(Ipv6Addr::from(*o)),
        }
    }

    fn increment(&mut self) {
        let octets: &mut [u8] = match self {
            Self::V4(o) => o,
            Self::V6(o) => o,
        };
        increment_octets(octets);
    }
}

/// Add one to a big-endian byte string, carrying leftwards. Wraps at the top.
fn increment_octets(octets: &mut [u8]) {
    for byte in octets.iter_mut().rev() {
        let (next, overflow) = byte.overflowing_add(1);
        *byte = next;
        if !overflow {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_30_drops_network_and_broadcast() {
        assert_eq!(
            expand_range("10.0.0.0/30").unwrap(),
            vec!["10.0.0.1", "10.0.0.2"]
        );
    }

    #[test]
    fn test_single_host() {
        assert_eq!(expand_range("10.0.0.5/32").unwrap(), vec!["10.0.0.5"]);
        assert_eq!(expand_range("2001:db8::7/128").unwrap(), vec!["2001:db8::7"]);
    }

    #[test]
    fn test_two_address_ranges_are_empty() {
        assert!(expand_range("10.0.0.0/31").unwrap().is_empty());
        assert!(expand_range("2001:db8::/127").unwrap().is_empty());
    }

    #[test]
    fn test_host_bits_are_masked() {
        assert_eq!(
            expand_range("10.0.0.7/30").unwrap(),
            vec!["10.0.0.5", "10.0.0.6"]
        );
    }

    #[test]
    fn test_ipv4_length_matches_prefix() {
        for prefix in 16u32..=30 {
            let addrs = expand_range(&format!("172.16.0.0/{prefix}")).unwrap();
            assert_eq!(addrs.len(), (1usize << (32 - prefix)) - 2, "prefix /{prefix}");
            assert_ne!(addrs.first().map(String::as_str), Some("172.16.0.0"));
        }
    }

    #[test]
    fn test_carry_across_octets() {
        let addrs = expand_range("10.0.0.0/23").unwrap();
        assert_eq!(addrs.len(), 510);
        assert_eq!(addrs[0], "10.0.0.1");
        assert_eq!(addrs[254], "10.0.0.255");
        assert_eq!(addrs[255], "10.0.1.0");
        assert_eq!(addrs.last().unwrap(), "10.0.1.254");
    }

    #[test]
    fn test_ipv6_range() {
        assert_eq!(
            expand_range("2001:db8::/126").unwrap(),
            vec!["2001:db8::1", "2001:db8::2"]
        );

        let addrs = expand_range("2001:db8::ff00/120").unwrap();
        assert_eq!(addrs.len(), 254);
        assert_eq!(addrs[0], "2001:db8::ff01");
        assert_eq!(addrs.last().unwrap(), "2001:db8::fffe");
    }

    #[test]
    fn test_increment_octets_carries_and_wraps() {
        let mut octets = [0x00, 0xff, 0xff];
        increment_octets(&mut octets);
        assert_eq!(octets, [0x01, 0x00, 0x00]);

        let mut octets = [0xff, 0xff];
        increment_octets(&mut octets);
        assert_eq!(octets, [0x00, 0x00]);
    }

    #[test]
    fn test_expansion_is_deterministic() {
        assert_eq!(
            expand_range("192.168.11.0/24").unwrap(),
            expand_range("192.168.11.0/24").unwrap()
        );
    }

    #[test]
    fn test_malformed_specs() {
        for spec in [
            "not-an-ip/24",
            "10.0.0.0",
            "10.0.0.0/33",
            "10.0.0.0/abc",
            "10.0.0/24",
            "2001:db8::/129",
            "",
            "/24",
            " 10.0.0.0/30 ",
            "10.0.0.0/30\n",
        ] {
            let err = expand_range(spec).unwrap_err();
            assert!(err.is_invalid_range(), "{spec:?} gave {err:?}");
        }
    }

    #[test]
    fn test_oversized_range_refused_as_too_large() {
        for spec in ["10.0.0.0/7", "2001:db8::/64"] {
            match expand_range(spec).unwrap_err() {
                SweepError::InvalidRange { spec: got, reason } => {
                    assert_eq!(got, spec);
                    assert!(reason.starts_with("range too large"), "{reason}");
                }
                other => panic!("unexpected error {other:?}"),
            }
        }

        let err = expand_range("not-an-ip/7").unwrap_err();
        assert!(!err.to_string().contains("too large"));
    }
}
