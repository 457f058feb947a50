use std::{fmt, hash::Hash, str::FromStr};

use ipnet::{AddrParseError, Ipv4Net, Ipv6Net};

/// IP address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Afi {
    /// IPv4.
    Ipv4,
    /// IPv6.
    Ipv6,
}

impl Afi {
    /// The RPSL object class in which routes of this address family are registered.
    #[must_use]
    pub const fn route_class(self) -> &'static str {
        match self {
            Self::Ipv4 => "route",
            Self::Ipv6 => "route6",
        }
    }
}

impl fmt::Display for Afi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "ipv4"),
            Self::Ipv6 => write!(f, "ipv6"),
        }
    }
}

/// An IP prefix of a single, statically known, address family.
///
/// Implemented for [`Ipv4Net`] and [`Ipv6Net`], this exposes the small set of bitwise operations
/// needed to aggregate prefixes without caring which family they belong to.
pub trait Prefix:
    Copy + Ord + Hash + fmt::Debug + fmt::Display + FromStr<Err = AddrParseError>
{
    /// Address family of this prefix type.
    const AFI: Afi;

    /// The network address, as an integer.
    fn base(&self) -> u128;

    /// The prefix length in bits.
    fn length(&self) -> u8;

    /// The prefix one bit shorter that covers `self` and its sibling.
    ///
    /// Returns [`None`] for the zero-length prefix.
    fn parent(&self) -> Option<Self>;

    /// Whether every address of `other` is also covered by `self`.
    fn covers(&self, other: &Self) -> bool;

    /// The same prefix with all host bits cleared.
    #[must_use]
    fn truncated(&self) -> Self;

    /// Whether the host bits are all zero.
    fn is_canonical(&self) -> bool {
        *self == self.truncated()
    }
}

impl Prefix for Ipv4Net {
    const AFI: Afi = Afi::Ipv4;

    fn base(&self) -> u128 {
        u32::from(self.network()).into()
    }

    fn length(&self) -> u8 {
        self.prefix_len()
    }

    fn parent(&self) -> Option<Self> {
        self.supernet()
    }

    fn covers(&self, other: &Self) -> bool {
        self.contains(other)
    }

    fn truncated(&self) -> Self {
        self.trunc()
    }
}

impl Prefix for Ipv6Net {
    const AFI: Afi = Afi::Ipv6;

    fn base(&self) -> u128 {
        self.network().into()
    }

    fn length(&self) -> u8 {
        self.prefix_len()
    }

    fn parent(&self) -> Option<Self> {
        self.supernet()
    }

    fn covers(&self, other: &Self) -> bool {
        self.contains(other)
    }

    fn truncated(&self) -> Self {
        self.trunc()
    }
}
