use std::io::{self, Write};

use anyhow::{anyhow, Context};

use clap::{ArgGroup, Args, Parser, ValueEnum};

use clap_verbosity_flag::{Verbosity, WarnLevel};

use ripe_routes::{AfiSelection, Asn, Irrd, Registry, RipeRest, Routes};

use tracing_log::AsTrace;

use crate::output;

/// Entry-point function for the `show-ripe-routes` CLI tool.
#[allow(clippy::missing_errors_doc)]
pub(crate) fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    args.logging.init()?;
    let routes = args.routes()?;
    let stdout = io::stdout();
    let mut w = stdout.lock();
    output::write_routes(&routes, &mut w)?;
    w.flush().context("failed to flush output")
}

/// Show all route objects of an AS from the RIPE database.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("afi")
        .required(true)
        .multiple(true)
        .args(["ipv4", "ipv6"]),
))]
struct Cli {
    /// Autonomous system number, with or without the 'AS' prefix.
    asn: Asn,

    /// Aggregate routes.
    #[arg(short, long)]
    aggregate: bool,

    /// Show IPv4 routes.
    #[arg(short = '4', long)]
    ipv4: bool,

    /// Show IPv6 routes.
    #[arg(short = '6', long)]
    ipv6: bool,

    #[command(flatten, next_help_heading = "Registry options")]
    registry: RegistryOpts,

    #[command(flatten, next_help_heading = "Logging options")]
    logging: LoggingOpts,
}

impl Cli {
    fn afi_selection(&self) -> anyhow::Result<AfiSelection> {
        Ok(AfiSelection::new(self.ipv4, self.ipv6)?)
    }

    fn routes(&self) -> anyhow::Result<Routes> {
        let mut registry = self
            .registry
            .connect()
            .context("failed to initialise registry client")?;
        let routes = Routes::collect(&mut registry, self.asn, self.afi_selection()?)
            .with_context(|| format!("failed to get route objects for {}", self.asn))?;
        if self.aggregate {
            let before = routes.len();
            let routes = routes.aggregate();
            tracing::info!(before, after = routes.len(), "aggregated routes");
            Ok(routes)
        } else {
            Ok(routes)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RegistryKind {
    /// RIPE database REST API.
    RipeRest,
    /// IRRd whois query protocol.
    Irrd,
}

#[derive(Debug, Args)]
struct RegistryOpts {
    /// Registry query mechanism.
    #[arg(short = 'r', long = "registry", value_enum, default_value_t = RegistryKind::RipeRest)]
    kind: RegistryKind,

    /// RIPE database REST API base URL.
    #[arg(long, default_value = RipeRest::DEFAULT_URL)]
    rest_url: String,

    /// RIPE database source to search.
    #[arg(long, default_value = RipeRest::DEFAULT_SOURCE)]
    rest_source: String,

    /// IRRd server hostname or IP address.
    #[arg(short = 'H', long = "irrd-host", default_value = Irrd::DEFAULT_HOST)]
    irrd_host: String,

    /// IRRd server port.
    #[arg(short = 'P', long = "irrd-port", default_value_t = Irrd::DEFAULT_PORT)]
    irrd_port: u16,
}

impl RegistryOpts {
    fn connect(&self) -> anyhow::Result<Box<dyn Registry>> {
        match self.kind {
            RegistryKind::RipeRest => {
                tracing::debug!(url = %self.rest_url, "using RIPE REST API");
                Ok(Box::new(RipeRest::new(&self.rest_url, &self.rest_source)?))
            }
            RegistryKind::Irrd => {
                tracing::debug!(host = %self.irrd_host, port = self.irrd_port, "using IRRd server");
                Irrd::new(&self.irrd_host, self.irrd_port)
                    .context("failed to connect to IRRd server")
                    .map(|irrd| Box::new(irrd) as Box<dyn Registry>)
            }
        }
    }
}

#[derive(Debug, Args)]
struct LoggingOpts {
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

impl LoggingOpts {
    fn init(&self) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_max_level(self.verbosity.log_level_filter().as_trace())
            .with_writer(io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err))
            .context("failed to initialize logger")
    }
}
