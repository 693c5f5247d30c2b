//! CIDR prefix value type.
//!
//! Provides [`Prefix`], an IP address paired with a prefix length, plus the
//! canonical ordering the aggregation engine sorts by.

use super::AddressFamily;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// An IP address with a CIDR prefix length (0-32 for IPv4, 0-128 for IPv6).
///
/// The address is kept exactly as given; bits past `len` are not cleared.
/// Use [`Prefix::network`] for the masked form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Prefix {
    addr: IpAddr,
    len: u8,
}

/// Canonical prefix ordering: address ascending, then prefix length ascending.
///
/// Within one family addresses compare as unsigned big-endian byte strings.
/// Across families IPv4 sorts before IPv6.
///
/// A prefix always sorts before every prefix it contains, so after sorting a
/// contained prefix directly follows its container or something it contains.
pub fn cmp_prefix(a: &Prefix, b: &Prefix) -> Ordering {
    a.addr.cmp(&b.addr).then(a.len.cmp(&b.len))
}

fn v4_mask(len: u8) -> u32 {
    u32::MAX.checked_shl(32 - u32::from(len)).unwrap_or(0)
}

fn v6_mask(len: u8) -> u128 {
    u128::MAX.checked_shl(128 - u32::from(len)).unwrap_or(0)
}

impl Prefix {
    /// Create a new [`Prefix`] from CIDR text (e.g. "10.0.0.0/24" or "2001:db8::/48").
    ///
    /// A bare address is read as a host prefix (/32 or /128).
    ///
    /// # Examples
    /// ```
    /// use cidr_aggregate::models::Prefix;
    /// let p = Prefix::new("192.168.0.0/24").unwrap();
    /// assert_eq!(p.len(), 24);
    /// assert_eq!(Prefix::new("10.0.0.1").unwrap().len(), 32);
    /// assert!(Prefix::new("10.0.0.0/33").is_err());
    /// ```
    pub fn new(cidr: &str) -> Result<Prefix, Box<dyn Error>> {
        let cidr = cidr.trim();
        let (addr_part, len_part) = match cidr.split_once('/') {
            Some((addr, len)) => (addr, Some(len)),
            None => (cidr, None),
        };
        let addr: IpAddr = addr_part
            .parse()
            .map_err(|_| format!("Invalid address {addr_part}"))?;
        let len = match len_part {
            Some(len) => len
                .parse::<u8>()
                .map_err(|_| format!("Invalid prefix length {len} in {cidr}"))?,
            None => AddressFamily::of(&addr).bit_len(),
        };
        Prefix::from_parts(addr, len)
    }

    /// Create a [`Prefix`] from an address and a prefix length.
    pub fn from_parts(addr: IpAddr, len: u8) -> Result<Prefix, Box<dyn Error>> {
        let family = AddressFamily::of(&addr);
        if len > family.bit_len() {
            return Err(format!(
                "Prefix length /{len} is too long for {family} (max /{})",
                family.bit_len()
            )
            .into());
        }
        Ok(Prefix { addr, len })
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    /// Prefix length in bits.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// True only for the zero-length prefix, which covers a whole family.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.addr)
    }

    /// Address bytes, network order. 4 bytes for IPv4, 16 for IPv6.
    pub fn octets(&self) -> Vec<u8> {
        match self.addr {
            IpAddr::V4(a) => a.octets().to_vec(),
            IpAddr::V6(a) => a.octets().to_vec(),
        }
    }

    /// Build a prefix of the same family from raw address bytes.
    ///
    /// `bytes` must be `self.family().byte_len()` long and `len` within the family width.
    pub(crate) fn with_octets(&self, bytes: &[u8], len: u8) -> Prefix {
        debug_assert!(len <= self.family().bit_len());
        let addr = match self.addr {
            IpAddr::V4(_) => {
                let mut o = [0u8; 4];
                o.copy_from_slice(bytes);
                IpAddr::V4(Ipv4Addr::from(o))
            }
            IpAddr::V6(_) => {
                let mut o = [0u8; 16];
                o.copy_from_slice(bytes);
                IpAddr::V6(Ipv6Addr::from(o))
            }
        };
        Prefix { addr, len }
    }

    /// The network form of this prefix: host bits past `len` cleared.
    ///
    /// # Examples
    /// ```
    /// use cidr_aggregate::models::Prefix;
    /// let p = Prefix::new("192.168.0.77/24").unwrap();
    /// assert_eq!(p.network().to_string(), "192.168.0.0/24");
    /// ```
    pub fn network(&self) -> Prefix {
        let addr = match self.addr {
            IpAddr::V4(a) => IpAddr::V4(Ipv4Addr::from(u32::from(a) & v4_mask(self.len))),
            IpAddr::V6(a) => IpAddr::V6(Ipv6Addr::from(u128::from(a) & v6_mask(self.len))),
        };
        Prefix {
            addr,
            len: self.len,
        }
    }

    /// True when no host bits are set past `len`.
    pub fn is_network(&self) -> bool {
        self.network().addr == self.addr
    }
}

impl FromStr for Prefix {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prefix::new(s)
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}

impl Ord for Prefix {
    fn cmp(&self, other: &Prefix) -> Ordering {
        cmp_prefix(self, other)
    }
}

impl PartialOrd for Prefix {
    fn partial_cmp(&self, other: &Prefix) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Prefix::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Prefix {
        Prefix::new(s).unwrap()
    }

    #[test]
    fn test_new_ipv4() {
        let prefix = p("192.168.0.0/24");
        assert_eq!(prefix.addr(), IpAddr::V4(Ipv4Addr::new(192, 168, 0, 0)));
        assert_eq!(prefix.len(), 24);
        assert_eq!(prefix.family(), AddressFamily::V4);
        assert_eq!(prefix.octets(), vec![192, 168, 0, 0]);
    }

    #[test]
    fn test_new_ipv6() {
        let prefix = p(" 2001:db8::/48 ");
        assert_eq!(prefix.family(), AddressFamily::V6);
        assert_eq!(prefix.len(), 48);
        assert_eq!(prefix.octets().len(), 16);
        assert_eq!(prefix.to_string(), "2001:db8::/48");
    }

    #[test]
    fn test_new_bare_address_is_host_prefix() {
        assert_eq!(p("10.1.2.3").to_string(), "10.1.2.3/32");
        assert_eq!(p("::1").to_string(), "::1/128");
    }

    #[test]
    fn test_new_errors() {
        assert!(Prefix::new("").is_err());
        assert!(Prefix::new("10.0.0.0/").is_err());
        assert!(Prefix::new("10.0.0/8").is_err());
        assert!(Prefix::new("10.0.0.0/-1").is_err());
        assert_eq!(
            Prefix::new("10.0.0.0/33").unwrap_err().to_string(),
            "Prefix length /33 is too long for IPv4 (max /32)"
        );
        assert!(Prefix::new("2001:db8::/129").is_err());
        assert!(Prefix::new("2001:db8::/128").is_ok());
    }

    #[test]
    fn test_keeps_host_bits() {
        let prefix = p("192.168.0.1/24");
        assert_eq!(prefix.to_string(), "192.168.0.1/24");
        assert!(!prefix.is_network());
        assert_eq!(prefix.network(), p("192.168.0.0/24"));
    }

    #[test]
    fn test_network_edges() {
        assert_eq!(p("255.255.255.255/0").network(), p("0.0.0.0/0"));
        assert_eq!(p("10.1.2.3/32").network(), p("10.1.2.3/32"));
        assert_eq!(p("2001:db8:ffff::1/31").network(), p("2001:db8::/31"));
        assert_eq!(p("ffff::/0").network(), p("::/0"));
        assert!(p("::/0").is_empty());
    }

    #[test]
    fn test_cmp_prefix_address_then_length() {
        assert_eq!(cmp_prefix(&p("10.0.0.0/8"), &p("10.0.0.0/24")), Ordering::Less);
        assert_eq!(cmp_prefix(&p("10.0.0.0/24"), &p("10.0.0.0/8")), Ordering::Greater);
        assert_eq!(cmp_prefix(&p("10.0.0.0/24"), &p("10.0.0.0/24")), Ordering::Equal);
        // address decides before length
        assert_eq!(cmp_prefix(&p("10.0.0.0/32"), &p("10.0.0.1/8")), Ordering::Less);
        assert_eq!(cmp_prefix(&p("9.255.255.255/32"), &p("10.0.0.0/8")), Ordering::Less);
    }

    #[test]
    fn test_cmp_prefix_unsigned_bytes() {
        // 128.0.0.0 must not sort as a negative byte
        assert_eq!(cmp_prefix(&p("127.0.0.0/8"), &p("128.0.0.0/8")), Ordering::Less);
        assert_eq!(cmp_prefix(&p("8000::/1"), &p("7fff::/16")), Ordering::Greater);
    }

    #[test]
    fn test_cmp_prefix_container_first() {
        let mut list = vec![p("10.0.10.64/26"), p("10.0.10.0/24"), p("10.0.0.0/8")];
        list.sort_by(cmp_prefix);
        assert_eq!(list, vec![p("10.0.0.0/8"), p("10.0.10.0/24"), p("10.0.10.64/26")]);
    }

    #[test]
    fn test_ord_matches_cmp_prefix() {
        let a = p("10.0.0.1/24");
        let b = p("10.0.0.2/24");
        assert!(a < b);
        assert!(b >= a);
        assert_eq!(a.cmp(&b), cmp_prefix(&a, &b));
        assert!(p("255.255.255.255/32") < p("::/0"));
    }

    #[test]
    fn test_serde_roundtrip_as_string() {
        let list = vec![p("10.0.0.0/8"), p("2001:db8::/32")];
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"["10.0.0.0/8","2001:db8::/32"]"#);
        let back: Vec<Prefix> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn test_deserialize_rejects_bad_cidr() {
        let res: Result<Prefix, _> = serde_json::from_str(r#""10.0.0.0/40""#);
        assert!(res.is_err());
    }

    #[test]
    fn test_with_octets() {
        let base = p("10.0.0.0/8");
        let built = base.with_octets(&[10, 0, 1, 0], 24);
        assert_eq!(built, p("10.0.1.0/24"));
    }
}
