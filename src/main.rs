//! ripe-routes - Show all route objects of an AS from the RIPE database.
//!
//! This is the command-line interface for the ripe-routes library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use ripe_routes::{Asn, QueryOptions, RipeClient};

/// Command-line arguments for the route lookup tool.
#[derive(Parser, Debug)]
#[clap(author, version, about = "Show all route objects of an AS from the RIPE database", long_about = None)]
struct Args {
    /// Autonomous system number, e.g. AS13238
    asn: Asn,

    /// Aggregate routes into minimal CIDR blocks
    #[clap(short, long)]
    aggregate: bool,

    /// Return IPv4 routes
    #[clap(short = '4', long = "ipv4")]
    ipv4: bool,

    /// Return IPv6 routes
    #[clap(short = '6', long = "ipv6")]
    ipv6: bool,

    /// Enable verbose output on stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // The original tool treats a missing family selection as guidance,
    // not a failure: warn, show usage, exit clean without a lookup.
    if !args.ipv4 && !args.ipv6 {
        println!("WARNING: at least one of the arguments is required [--ipv4|--ipv6].");
        let mut cmd = Args::command();
        let _ = cmd.print_help();
        return;
    }

    // Single external call; a current-thread runtime is all this needs.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    if let Err(e) = runtime.block_on(async_main(args)) {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}

async fn async_main(args: Args) -> Result<()> {
    let options = QueryOptions {
        want_v4: args.ipv4,
        want_v6: args.ipv6,
        aggregate: args.aggregate,
    };

    if args.verbose {
        eprintln!("querying {}", RipeClient::query_url(&args.asn));
    }

    let client = RipeClient::new()?;
    let routes = ripe_routes::run(&client, &args.asn, options).await?;

    if args.verbose {
        eprintln!(
            "{} route(s) for {}{}",
            routes.len(),
            args.asn,
            if args.aggregate { " after aggregation" } else { "" }
        );
    }

    for route in routes {
        println!("{route}");
    }

    Ok(())
}
