use clap::Parser;
use log::info;
use snafu::ErrorCompat;

mod args;
mod wizard;

use args::Args;

fn main() {
    let args = Args::parse();
    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    info!("Starting stakerate");

    if let Err(e) = wizard::run_session(&args) {
        eprintln!("stakerate: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
