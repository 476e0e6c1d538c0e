//! IPv4 netmask helpers.
//!
//! Masks travel in two shapes: a CIDR prefix length (`24`, `/24`) in group
//! settings and domain literals, and a dotted quad (`255.255.255.0`) on the
//! router wire. Everything here converts between the two.

use crate::errors::DomainError;
use std::net::Ipv4Addr;

pub const HOST_MASK: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 255);

/// Dotted mask for a prefix length (0..=32).
pub fn prefix_to_mask(prefix: u8) -> Result<Ipv4Addr, DomainError> {
    if prefix > 32 {
        return Err(DomainError::InvalidMask(format!("/{}", prefix)));
    }
    let bits = if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    };
    Ok(Ipv4Addr::from(bits))
}

/// Prefix length for a dotted mask. Rejects non-contiguous masks.
pub fn mask_to_prefix(mask: Ipv4Addr) -> Result<u8, DomainError> {
    let bits = u32::from(mask);
    let prefix = bits.leading_ones();
    if bits.checked_shl(prefix).unwrap_or(0) != 0 {
        return Err(DomainError::InvalidMask(mask.to_string()));
    }
    Ok(prefix as u8)
}

/// Parses a mask written either as a prefix (`24`, `/24`) or dotted quad.
pub fn parse_mask(raw: &str) -> Result<Ipv4Addr, DomainError> {
    let trimmed = raw.trim();
    let without_slash = trimmed.strip_prefix('/').unwrap_or(trimmed);

    if let Ok(prefix) = without_slash.parse::<u8>() {
        return prefix_to_mask(prefix);
    }

    let dotted: Ipv4Addr = without_slash
        .parse()
        .map_err(|_| DomainError::InvalidMask(raw.to_string()))?;
    mask_to_prefix(dotted)?;
    Ok(dotted)
}

/// Network address a resolved host lands on for the given mask.
///
/// A /24 mask truncates the last octet; every other mask keeps the resolved
/// address as-is.
pub fn route_network(address: Ipv4Addr, mask: Ipv4Addr) -> Ipv4Addr {
    if mask_to_prefix(mask) == Ok(24) {
        let [a, b, c, _] = address.octets();
        Ipv4Addr::new(a, b, c, 0)
    } else {
        address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_to_mask_common_values() {
        assert_eq!(prefix_to_mask(8).unwrap(), Ipv4Addr::new(255, 0, 0, 0));
        assert_eq!(prefix_to_mask(24).unwrap(), Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(prefix_to_mask(32).unwrap(), HOST_MASK);
        assert_eq!(prefix_to_mask(0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
    }

    #[test]
    fn test_prefix_out_of_range() {
        assert!(prefix_to_mask(33).is_err());
    }

    #[test]
    fn test_mask_to_prefix_rejects_holes() {
        assert_eq!(mask_to_prefix(Ipv4Addr::new(255, 255, 240, 0)).unwrap(), 20);
        assert!(mask_to_prefix(Ipv4Addr::new(255, 0, 255, 0)).is_err());
    }

    #[test]
    fn test_parse_mask_accepts_both_forms() {
        assert_eq!(parse_mask("24").unwrap(), Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(parse_mask("/16").unwrap(), Ipv4Addr::new(255, 255, 0, 0));
        assert_eq!(
            parse_mask("255.255.255.255").unwrap(),
            HOST_MASK
        );
        assert!(parse_mask("banana").is_err());
    }

    #[test]
    fn test_route_network_truncates_only_for_slash_24() {
        let addr = Ipv4Addr::new(93, 184, 216, 34);
        assert_eq!(
            route_network(addr, prefix_to_mask(24).unwrap()),
            Ipv4Addr::new(93, 184, 216, 0)
        );
        assert_eq!(route_network(addr, HOST_MASK), addr);
    }
}
