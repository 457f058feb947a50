use crate::{asn::Asn, error::Error, prefix::Afi};

mod irrd;
pub use self::irrd::Irrd;

mod rest;
pub use self::rest::RipeRest;

/// A routing registry that can be searched for the route objects originated by an AS.
pub trait Registry {
    /// Get the prefixes of all `route` (for [`Afi::Ipv4`]) or `route6` (for [`Afi::Ipv6`])
    /// objects with `origin: <asn>`.
    ///
    /// The prefixes are returned unparsed and unaggregated, in the order the registry returned
    /// them.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the registry cannot be reached, or answers with an error.
    fn lookup(&mut self, asn: Asn, afi: Afi) -> Result<Vec<String>, Error>;
}

impl<R: Registry + ?Sized> Registry for Box<R> {
    fn lookup(&mut self, asn: Asn, afi: Afi) -> Result<Vec<String>, Error> {
        (**self).lookup(asn, afi)
    }
}
