use crate::prefix::Prefix;

/// Reduce a set of prefixes to the smallest set covering exactly the same addresses.
///
/// The result is ordered by ascending network address. Duplicate prefixes, and prefixes covered
/// by another prefix in the set, are removed. Pairs of equal length prefixes that together make
/// up their parent prefix are replaced by the parent, repeatedly, until no such pair remains.
///
/// # Examples
///
/// ```
/// use ripe_routes::{aggregate, Ipv4Net};
///
/// let prefixes: Vec<Ipv4Net> = ["198.51.100.0/24", "192.0.2.128/25", "192.0.2.0/25"]
///     .into_iter()
///     .map(str::parse::<Ipv4Net>)
///     .collect::<Result<_, _>>()?;
/// let aggregated = aggregate(prefixes);
/// assert_eq!(
///     aggregated.iter().map(ToString::to_string).collect::<Vec<_>>(),
///     ["192.0.2.0/24", "198.51.100.0/24"],
/// );
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn aggregate<P, I>(prefixes: I) -> Vec<P>
where
    P: Prefix,
    I: IntoIterator<Item = P>,
{
    let mut sorted = prefixes
        .into_iter()
        .map(|prefix| prefix.truncated())
        .collect::<Vec<_>>();
    sorted.sort_unstable_by_key(|prefix| (prefix.base(), prefix.length()));
    let input_len = sorted.len();
    let mut current = remove_covered(sorted);
    let mut passes = 0_usize;
    loop {
        passes += 1;
        let (merged, merges) = merge_pass(&current);
        tracing::trace!(afi = %P::AFI, passes, merges, "completed merge pass");
        current = merged;
        if merges == 0 {
            break;
        }
    }
    tracing::debug!(
        afi = %P::AFI,
        input_len,
        output_len = current.len(),
        passes,
        "aggregated prefixes"
    );
    current
}

// `sorted` must be ordered by network address, then by length. A covering prefix then always
// precedes the prefixes it covers, and retained prefixes are disjoint, so only the most recently
// retained prefix needs to be checked.
fn remove_covered<P: Prefix>(sorted: Vec<P>) -> Vec<P> {
    let mut retained: Vec<P> = Vec::with_capacity(sorted.len());
    for prefix in sorted {
        match retained.last() {
            Some(last) if last.covers(&prefix) => {
                tracing::trace!(%prefix, covered_by = %last, "dropping covered prefix");
            }
            _ => retained.push(prefix),
        }
    }
    retained
}

fn merge_pass<P: Prefix>(prefixes: &[P]) -> (Vec<P>, usize) {
    let mut output = Vec::with_capacity(prefixes.len());
    let mut merges = 0;
    let mut i = 0;
    while i < prefixes.len() {
        let prefix = prefixes[i];
        if let Some(parent) = prefixes
            .get(i + 1)
            .and_then(|next| sibling_parent(&prefix, next))
        {
            tracing::trace!(%prefix, sibling = %prefixes[i + 1], %parent, "merging siblings");
            output.push(parent);
            merges += 1;
            i += 2;
        } else {
            output.push(prefix);
            i += 1;
        }
    }
    (output, merges)
}

fn sibling_parent<P: Prefix>(lhs: &P, rhs: &P) -> Option<P> {
    if lhs == rhs || lhs.length() != rhs.length() {
        return None;
    }
    let parent = lhs.parent()?;
    (rhs.parent() == Some(parent)).then_some(parent)
}

#[cfg(test)]
mod tests {
    use ipnet::{Ipv4Net, Ipv6Net};

    use super::*;

    fn prefixes<P: Prefix>(input: &[&str]) -> Vec<P> {
        input.iter().map(|s| s.parse().unwrap()).collect()
    }

    /// The addresses covered by `set`, as sorted, disjoint and non-adjacent inclusive ranges.
    fn covered_ranges<P: Prefix>(set: &[P], max_length: u8) -> Vec<(u128, u128)> {
        let mut ranges: Vec<_> = set
            .iter()
            .map(|prefix| {
                let host_bits = u32::from(max_length - prefix.length());
                let host_mask = u128::MAX.checked_shr(128 - host_bits).unwrap_or(0);
                (prefix.base(), prefix.base() | host_mask)
            })
            .collect();
        ranges.sort_unstable();
        ranges.into_iter().fold(Vec::new(), |mut merged, (start, end)| {
            match merged.last_mut() {
                Some((_, last_end)) if start <= last_end.saturating_add(1) => {
                    *last_end = end.max(*last_end);
                }
                _ => merged.push((start, end)),
            }
            merged
        })
    }

    macro_rules! aggregate_tests {
        ( $( $( #[$attr:meta] )* $name:ident<$p:ty> { [ $( $input:literal ),* ] => [ $( $expect:literal ),* ] } )* ) => {
            $(
                #[test]
                $( #[$attr] )*
                fn $name() {
                    let input = prefixes::<$p>(&[ $( $input ),* ]);
                    let expect = prefixes::<$p>(&[ $( $expect ),* ]);
                    assert_eq!(aggregate(input), expect);
                }
            )*
        }
    }

    aggregate_tests! {
        empty<Ipv4Net> {
            [] => []
        }
        single_prefix<Ipv4Net> {
            ["203.0.113.0/24"] => ["203.0.113.0/24"]
        }
        disjoint_prefixes_are_sorted<Ipv4Net> {
            ["198.51.100.0/24", "192.0.2.0/24", "203.0.113.0/24"]
                => ["192.0.2.0/24", "198.51.100.0/24", "203.0.113.0/24"]
        }
        numeric_not_lexical_order<Ipv4Net> {
            ["100.64.0.0/10", "20.0.0.0/8", "3.0.0.0/8"]
                => ["3.0.0.0/8", "20.0.0.0/8", "100.64.0.0/10"]
        }
        duplicates_collapse<Ipv4Net> {
            ["192.0.2.0/24", "192.0.2.0/24", "192.0.2.0/24"] => ["192.0.2.0/24"]
        }
        covered_prefix_dropped<Ipv4Net> {
            ["10.1.2.0/24", "10.0.0.0/8", "10.255.0.0/16"] => ["10.0.0.0/8"]
        }
        siblings_merge<Ipv4Net> {
            ["10.0.0.0/25", "10.0.0.128/25"] => ["10.0.0.0/24"]
        }
        adjacent_non_siblings_kept<Ipv4Net> {
            ["10.0.0.128/25", "10.0.1.0/25"] => ["10.0.0.128/25", "10.0.1.0/25"]
        }
        unequal_lengths_kept<Ipv4Net> {
            ["10.0.0.0/24", "10.0.1.0/25"] => ["10.0.0.0/24", "10.0.1.0/25"]
        }
        merges_cascade<Ipv4Net> {
            ["10.0.0.0/26", "10.0.0.64/26", "10.0.0.128/25"] => ["10.0.0.0/24"]
        }
        merges_cascade_from_the_right<Ipv4Net> {
            ["10.0.0.0/25", "10.0.0.128/26", "10.0.0.192/26"] => ["10.0.0.0/24"]
        }
        host_routes_merge<Ipv4Net> {
            ["192.0.2.0/32", "192.0.2.1/32", "192.0.2.2/32", "192.0.2.3/32"] => ["192.0.2.0/30"]
        }
        mixed_example<Ipv4Net> {
            ["192.0.2.0/25", "192.0.2.128/25", "198.51.100.0/24"]
                => ["192.0.2.0/24", "198.51.100.0/24"]
        }
        covered_by_supernet<Ipv4Net> {
            ["10.0.0.0/24", "10.0.1.0/24", "10.0.0.0/23", "10.0.1.128/25"] => ["10.0.0.0/23"]
        }
        whole_space<Ipv4Net> {
            ["0.0.0.0/1", "128.0.0.0/1"] => ["0.0.0.0/0"]
        }
        non_canonical_input_truncated<Ipv4Net> {
            ["10.0.0.1/25", "10.0.0.129/25"] => ["10.0.0.0/24"]
        }
        ipv6_siblings_merge<Ipv6Net> {
            ["2001:db8::/33", "2001:db8:8000::/33"] => ["2001:db8::/32"]
        }
        ipv6_disjoint<Ipv6Net> {
            ["2a0e:fd87::/48", "2a02:6b8::/29", "2a0e:fd87:1::/48", "2a02:6b8:c00::/40"]
                => ["2a02:6b8::/29", "2a0e:fd87::/47"]
        }
        ipv6_host_routes<Ipv6Net> {
            ["2001:db8::/128", "2001:db8::1/128"] => ["2001:db8::/127"]
        }
    }

    #[test]
    fn aggregation_is_idempotent() {
        let input = prefixes::<Ipv4Net>(&[
            "10.0.0.0/26",
            "10.0.0.64/26",
            "10.0.1.0/24",
            "10.0.2.0/24",
            "10.0.3.0/25",
            "172.16.0.0/12",
            "172.20.0.0/16",
        ]);
        let once = aggregate(input);
        let twice = aggregate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn address_space_is_preserved() {
        let input = prefixes::<Ipv4Net>(&[
            "10.0.0.0/26",
            "10.0.0.64/26",
            "10.0.0.128/25",
            "10.0.1.0/24",
            "10.0.3.0/24",
            "192.0.2.7/32",
        ]);
        let output = aggregate(input.clone());
        assert_eq!(covered_ranges(&input, 32), covered_ranges(&output, 32));
        assert_eq!(
            output,
            prefixes::<Ipv4Net>(&["10.0.0.0/23", "10.0.3.0/24", "192.0.2.7/32"])
        );
    }

    #[test]
    fn overlapping_address_space_is_preserved() {
        let input = prefixes::<Ipv4Net>(&[
            "10.0.0.0/23",
            "10.0.1.0/24",
            "10.0.0.0/25",
            "10.0.2.0/24",
            "10.0.3.0/24",
        ]);
        let output = aggregate(input.clone());
        assert_eq!(covered_ranges(&input, 32), [(0x0a00_0000_u128, 0x0a00_03ff_u128)]);
        assert_eq!(covered_ranges(&input, 32), covered_ranges(&output, 32));
        assert_eq!(output, prefixes::<Ipv4Net>(&["10.0.0.0/22"]));
    }

    #[test]
    fn overlapping_ipv6_address_space_is_preserved() {
        let input = prefixes::<Ipv6Net>(&[
            "2001:db8::/32",
            "2001:db8:8000::/33",
            "2001:db9::/48",
            "2001:db9:1::/48",
            "2001:db9::1/128",
            "::/0",
        ]);
        let output = aggregate(input.clone());
        assert_eq!(covered_ranges(&input, 128), [(0_u128, u128::MAX)]);
        assert_eq!(covered_ranges(&input, 128), covered_ranges(&output, 128));
        assert_eq!(output, prefixes::<Ipv6Net>(&["::/0"]));
    }

    #[test]
    fn partially_overlapping_address_space_is_preserved() {
        let input = prefixes::<Ipv4Net>(&[
            "192.0.2.0/24",
            "192.0.2.128/25",
            "192.0.3.0/25",
            "198.51.100.0/23",
            "198.51.101.64/26",
            "198.51.102.0/24",
        ]);
        let output = aggregate(input.clone());
        assert_eq!(covered_ranges(&input, 32), covered_ranges(&output, 32));
        assert_eq!(
            output,
            prefixes::<Ipv4Net>(&[
                "192.0.2.0/24",
                "192.0.3.0/25",
                "198.51.100.0/23",
                "198.51.102.0/24",
            ])
        );
    }

    #[test]
    fn output_is_minimal() {
        let output = aggregate(prefixes::<Ipv4Net>(&[
            "10.0.0.0/24",
            "10.0.1.0/24",
            "10.0.2.0/24",
            "10.0.4.0/24",
            "10.0.5.0/25",
            "10.0.5.128/25",
        ]));
        for (i, lhs) in output.iter().enumerate() {
            for rhs in output.iter().skip(i + 1) {
                assert!(!lhs.covers(rhs) && !rhs.covers(lhs));
                assert_eq!(sibling_parent(lhs, rhs), None);
            }
        }
        assert_eq!(
            output,
            prefixes::<Ipv4Net>(&["10.0.0.0/23", "10.0.2.0/24", "10.0.4.0/23"])
        );
    }
}
