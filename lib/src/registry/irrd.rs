use irrc::{error::Response, Connection, IrrClient, Query};

use crate::{asn::Asn, error::Error, prefix::Afi};

use super::Registry;

/// A [`Registry`] that uses the IRRd query protocol.
///
/// A "key not found" reply is an empty result. Any other error reply from the server is returned
/// as an [`Error::Irr`].
///
/// # Examples
///
/// ``` no_run
/// use ripe_routes::{Afi, Irrd, Registry};
///
/// let mut radb = Irrd::new(Irrd::DEFAULT_HOST, Irrd::DEFAULT_PORT)?;
/// radb.lookup("AS65000".parse()?, Afi::Ipv6)?
///     .iter()
///     .for_each(|prefix| println!("{prefix}"));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Irrd {
    conn: Connection,
}

impl Irrd {
    /// Default IRRd server hostname.
    pub const DEFAULT_HOST: &'static str = "whois.radb.net";

    /// Default IRRd server port.
    pub const DEFAULT_PORT: u16 = 43;

    /// Construct a new [`Irrd`] client.
    ///
    /// # Errors
    ///
    /// An [`Error::Irr`] is returned if the connection to the IRRd server cannot be established.
    pub fn new(host: &str, port: u16) -> Result<Self, Error> {
        let addr = format!("{host}:{port}");
        tracing::debug!(%addr, "connecting to IRRd server");
        let conn = IrrClient::new(addr).connect()?;
        Ok(Self { conn })
    }
}

impl Registry for Irrd {
    #[tracing::instrument(skip(self), level = "debug")]
    fn lookup(&mut self, asn: Asn, afi: Afi) -> Result<Vec<String>, Error> {
        let autnum = asn.to_autnum()?;
        let query = match afi {
            Afi::Ipv4 => Query::Ipv4Routes(autnum),
            Afi::Ipv6 => Query::Ipv6Routes(autnum),
        };
        let mut pipeline = self.conn.pipeline();
        let routes = pipeline
            .push(query)?
            .responses::<String>()
            .filter_map(|response| match response {
                Ok(item) => Some(Ok(item.into_content())),
                // 'D' reply: no route objects with this origin
                Err(irrc::Error::ResponseErr(_, Response::KeyNotFound)) => {
                    tracing::info!(%afi, %asn, "no route objects found");
                    None
                }
                Err(err) => Some(Err(Error::from(err))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(routes)
    }
}
