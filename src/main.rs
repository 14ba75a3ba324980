use std::process::ExitCode;

use tracing::{
    error,
    info
};
use tracing_subscriber::EnvFilter;

use curvecross::configuration::LocatorConfiguration;
use curvecross::intersection::gridplanner::linspace;
use curvecross::intersection::intersectionerror::IntersectionError;
use curvecross::intersection::intersectionlocator::IntersectionLocator;

// sin on [0, 12] against cos on [2, 15], sampled on different grids
fn run() -> Result<(), IntersectionError> {
    let config = match std::env::args().nth(1) {
        Some(config_path) => LocatorConfiguration::from_reader(config_path)?,
        None => LocatorConfiguration::new(),
    };
    info!(?config, "locating intersections");

    let x_f = linspace(0.0, 12.0, 500);
    let f: Vec<f64> = x_f.iter().map(|x| x.sin()).collect();
    let x_g = linspace(2.0, 15.0, 900);
    let g: Vec<f64> = x_g.iter().map(|x| x.cos()).collect();

    let locator = IntersectionLocator::new(config)?;
    let points = locator.locate(&x_f, &f, &x_g, &g)?;
    info!(count = points.len(), "done");

    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
