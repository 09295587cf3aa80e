use std::process;
use std::time::Instant;

use antroute::utils::config::Arguments;
use antroute::utils::error::Result;
use antroute::utils::report::Report;
use antroute::utils::yaml;
use log::{error, info};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Arguments = argh::from_env();
    if let Err(err) = run(args) {
        error!("{}", err);
        process::exit(1);
    }
}

fn run(args: Arguments) -> Result<()> {
    let mut config = yaml::load_config(&args.config)?;
    config.override_from_args(&args);
    config.validate()?;

    let network = yaml::load_network(&args.network)?;
    let stats = network.stats();
    info!("loaded network with {} nodes, {} edges, average degree {:.2}",
          stats.nodes, stats.edges, stats.avg_degree);

    let stops = antroute::resolve_stops(&network, &args.stops, config.stop_count)?;

    let start = Instant::now();
    let (routes, stats) = antroute::optimize_routes(&network, &stops, &config)?;
    let elapsed = start.elapsed().as_micros();

    let report = Report::new(&network, &routes, &stats);
    print!("{}", report.summary());
    println!("--- computing time: {} μs ---", elapsed);

    if let Some(output) = args.output.as_ref() {
        report.write(output)?;
        info!("routes written to {}", output);
    }
    Ok(())
}
