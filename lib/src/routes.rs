use ipnet::{Ipv4Net, Ipv6Net};

use crate::{aggregate::aggregate, asn::Asn, error::Error, prefix::Prefix, registry::Registry};

/// Selection of the address families to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AfiSelection {
    ipv4: bool,
    ipv6: bool,
}

impl AfiSelection {
    /// Construct a new [`AfiSelection`].
    ///
    /// # Errors
    ///
    /// An [`Error::General`] is returned if neither address family is selected.
    pub fn new(ipv4: bool, ipv6: bool) -> Result<Self, Error> {
        if ipv4 || ipv6 {
            Ok(Self { ipv4, ipv6 })
        } else {
            Err("at least one address family must be selected".into())
        }
    }

    /// Are IPv4 routes included in the selection?
    #[must_use]
    pub const fn with_ipv4(&self) -> bool {
        self.ipv4
    }

    /// Are IPv6 routes included in the selection?
    #[must_use]
    pub const fn with_ipv6(&self) -> bool {
        self.ipv6
    }
}

/// The routes originated by an AS, per address family.
///
/// A family that was not selected for the query is [`None`], which is distinct from a family that
/// was queried but has no routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Routes {
    ipv4: Option<Vec<Ipv4Net>>,
    ipv6: Option<Vec<Ipv6Net>>,
}

impl Routes {
    /// Query `registry` for the routes originated by `asn` in each selected address family.
    ///
    /// IPv4 is queried before IPv6. Registry entries that cannot be parsed as a prefix of the
    /// queried family are logged and skipped. Entries with host bits set are truncated to their
    /// network address.
    ///
    /// # Errors
    ///
    /// The first failed lookup is returned as an error, and no results are returned for either
    /// address family.
    pub fn collect<R>(registry: &mut R, asn: Asn, afis: AfiSelection) -> Result<Self, Error>
    where
        R: Registry + ?Sized,
    {
        let ipv4 = if afis.with_ipv4() {
            Some(fetch::<Ipv4Net, _>(registry, asn)?)
        } else {
            None
        };
        let ipv6 = if afis.with_ipv6() {
            Some(fetch::<Ipv6Net, _>(registry, asn)?)
        } else {
            None
        };
        Ok(Self { ipv4, ipv6 })
    }

    /// Aggregate the routes of each address family independently.
    #[must_use]
    pub fn aggregate(self) -> Self {
        Self {
            ipv4: self.ipv4.map(aggregate),
            ipv6: self.ipv6.map(aggregate),
        }
    }

    /// Get the IPv4 routes, if IPv4 was queried.
    #[must_use]
    pub fn ipv4(&self) -> Option<&[Ipv4Net]> {
        self.ipv4.as_deref()
    }

    /// Get the IPv6 routes, if IPv6 was queried.
    #[must_use]
    pub fn ipv6(&self) -> Option<&[Ipv6Net]> {
        self.ipv6.as_deref()
    }

    /// Total number of routes across both address families.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ipv4.as_ref().map_or(0, Vec::len) + self.ipv6.as_ref().map_or(0, Vec::len)
    }

    /// Returns `true` if there are no routes in either address family.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn fetch<P, R>(registry: &mut R, asn: Asn) -> Result<Vec<P>, Error>
where
    P: Prefix,
    R: Registry + ?Sized,
{
    let raw = registry.lookup(asn, P::AFI)?;
    tracing::debug!(afi = %P::AFI, %asn, entries = raw.len(), "registry lookup complete");
    let prefixes = parse_prefixes::<P, _, _>(raw);
    tracing::info!(afi = %P::AFI, %asn, routes = prefixes.len(), "found originated routes");
    Ok(prefixes)
}

fn parse_prefixes<P, I, S>(raw: I) -> Vec<P>
where
    P: Prefix,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|entry| {
            let entry = entry.as_ref().trim();
            match entry.parse::<P>() {
                Ok(prefix) if prefix.is_canonical() => Some(prefix),
                Ok(prefix) => {
                    let truncated = prefix.truncated();
                    tracing::warn!(
                        afi = %P::AFI,
                        %prefix,
                        %truncated,
                        "truncating prefix with host bits set"
                    );
                    Some(truncated)
                }
                Err(err) => {
                    tracing::warn!(
                        afi = %P::AFI,
                        prefix = %entry,
                        %err,
                        "skipping malformed prefix"
                    );
                    None
                }
            }
        })
        .collect()
}
