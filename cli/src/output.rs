use std::{fmt::Display, io::Write};

use anyhow::Result;

use ripe_routes::Routes;

/// Write one prefix per line, IPv4 before IPv6.
pub(crate) fn write_routes<W: Write>(routes: &Routes, w: &mut W) -> Result<()> {
    if let Some(prefixes) = routes.ipv4() {
        write_prefixes(prefixes, w)?;
    }
    if let Some(prefixes) = routes.ipv6() {
        write_prefixes(prefixes, w)?;
    }
    Ok(())
}

fn write_prefixes<P, W>(prefixes: &[P], w: &mut W) -> Result<()>
where
    P: Display,
    W: Write,
{
    prefixes
        .iter()
        .try_for_each(|prefix| writeln!(w, "{prefix}").map_err(Into::into))
}

#[cfg(test)]
mod tests {
    use ripe_routes::{Afi, AfiSelection, Asn, Error, Registry};

    use super::*;

    struct Static;

    impl Registry for Static {
        fn lookup(&mut self, _: Asn, afi: Afi) -> Result<Vec<String>, Error> {
            let entries: &[&str] = match afi {
                Afi::Ipv4 => &["198.51.100.0/24", "192.0.2.128/25", "192.0.2.0/25"],
                Afi::Ipv6 => &["2001:db8:8000::/33", "2001:db8::/33"],
            };
            Ok(entries.iter().map(ToString::to_string).collect())
        }
    }

    fn render(routes: &Routes) -> String {
        let mut buf = Vec::new();
        write_routes(routes, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn collect(ipv4: bool, ipv6: bool) -> Routes {
        Routes::collect(
            &mut Static,
            Asn::new(64496),
            AfiSelection::new(ipv4, ipv6).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn registry_order() {
        assert_eq!(
            render(&collect(true, true)),
            "198.51.100.0/24\n192.0.2.128/25\n192.0.2.0/25\n2001:db8:8000::/33\n2001:db8::/33\n"
        );
    }

    #[test]
    fn aggregated() {
        assert_eq!(
            render(&collect(true, true).aggregate()),
            "192.0.2.0/24\n198.51.100.0/24\n2001:db8::/32\n"
        );
    }

    #[test]
    fn ipv6_only() {
        assert_eq!(
            render(&collect(false, true).aggregate()),
            "2001:db8::/32\n"
        );
    }

    #[test]
    fn empty() {
        assert_eq!(render(&Routes::default()), "");
    }
}
