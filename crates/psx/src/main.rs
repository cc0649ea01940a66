mod cli;
mod spider;

// remote imports
use crate::cli::Endpoint::*;
use clap::Parser;
use cli::{Cli, TraceLevel};
use psx_spider::fundamentals::alpha_vantage::DEFAULT_SYMBOLS;
use psx_spider::FetchMode;
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preproccess the trace level, and open the .env file
fn preprocess(trace_level: Level) {
    dotenv::dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        });
    } else {
        dotenv::dotenv().ok();
    }
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, use tui
    let tui = match cli.trace {
        Some(_) => false,
        None => true,
    };

    let time = std::time::Instant::now();

    // read cli inputs
    use cli::Commands::*;
    match cli.command {
        // `psx spider <Option<Vec<Endpoint>>>`: scrape endpoints
        Spider {
            endpoints,
            symbols,
            serial,
        } => {
            let mode = if serial {
                FetchMode::Serial
            } else {
                FetchMode::Concurrent
            };

            let symbols = symbols.unwrap_or_else(|| {
                DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
            });

            // if no endpoints provided, scrape all
            match endpoints {
                Some(endpoints) => spider::run(endpoints, mode, symbols, tui).await?,
                None => spider::run(vec![Listings, Fundamentals], mode, symbols, tui).await?,
            }
        }
    }

    if tui {
        println!("time taken: {:.2} seconds", time.elapsed().as_secs_f64());
    }

    Ok(())
}
