use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Webscrape data and hold it in memory for the run.
    Spider {
        /// Specify the endpoints to webscrape.
        ///
        /// If no endpoints are provided, spider will collect all.
        #[arg(short, long)]
        endpoints: Option<Vec<Endpoint>>,

        /// Ticker symbols for the fundamentals endpoint.
        ///
        /// If none are provided, a small built-in list is used.
        #[arg(short, long)]
        symbols: Option<Vec<String>>,

        /// Fetch per-sector companies one at a time instead of all at once.
        #[arg(long)]
        serial: bool,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// PSX listed companies, per sector.
    Listings,

    /// Alpha Vantage company overviews.
    Fundamentals,
}
