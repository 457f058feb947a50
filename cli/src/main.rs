//! Show all route objects of an autonomous system from a routing registry.
#![doc(html_root_url = "https://docs.rs/ripe-routes-cli/0.1.0")]
// clippy lints
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_pub_crate)]
#![allow(clippy::multiple_crate_versions)]
// rustc lints
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(unused_crate_dependencies)]
#![warn(unused_qualifications)]

mod cli;
mod output;


fn main() -> anyhow::Result<()> {
    cli::main().map_err(|err| {
        tracing::error!("{err:#}");
        err
    })
}
