use std::process::ExitCode;
use clap::Parser;
use log::{LevelFilter, error, info};
use obs2hexo::{Args, build_posts};

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .init();

    match build_posts(&args.vault_path, &args.output_dir, &args.build_options()) {
        Ok(_) => {
            info!("Convert completed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
