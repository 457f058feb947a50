//! Support library for `show-ripe-routes`.
//!
//! Find the `route` and `route6` objects originated by an autonomous system in a routing
//! registry, and optionally aggregate them into the minimal set of covering prefixes.
//!
//! # Examples
//!
//! ``` no_run
//! use ripe_routes::{AfiSelection, RipeRest, Routes};
//!
//! let mut ripe = RipeRest::new(RipeRest::DEFAULT_URL, RipeRest::DEFAULT_SOURCE)?;
//! let routes = Routes::collect(&mut ripe, "AS13238".parse()?, AfiSelection::new(true, true)?)?
//!     .aggregate();
//! routes
//!     .ipv4()
//!     .into_iter()
//!     .flatten()
//!     .for_each(|prefix| println!("{prefix}"));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
#![doc(html_root_url = "https://docs.rs/ripe-routes-lib/0.1.0")]
// clippy lints
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_pub_crate)]
#![allow(clippy::multiple_crate_versions)]
// rustc lints
#![warn(absolute_paths_not_starting_with_crate)]
#![warn(deprecated_in_future)]
#![warn(elided_lifetimes_in_paths)]
#![warn(explicit_outlives_requirements)]
#![warn(keyword_idents)]
#![warn(macro_use_extern_crate)]
#![warn(meta_variable_misuse)]
#![warn(missing_abi)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(noop_method_call)]
#![warn(single_use_lifetimes)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(unsafe_op_in_unsafe_fn)]
#![warn(unstable_features)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]
#![warn(variant_size_differences)]
// docs.rs build config
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use ipnet::{Ipv4Net, Ipv6Net};

/// Prefix aggregation.
mod aggregate;
pub use self::aggregate::aggregate;

/// Autonomous system numbers.
mod asn;
pub use self::asn::{Asn, ParseAsnError};

/// Error types.
pub mod error;
pub use self::error::Error;

/// Address families and per-family prefix operations.
mod prefix;
pub use self::prefix::{Afi, Prefix};

/// Routing registry clients.
mod registry;
pub use self::registry::{Irrd, Registry, RipeRest};

/// Route collection by origin AS.
mod routes;
pub use self::routes::{AfiSelection, Routes};
