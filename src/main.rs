use std::process;

use clap::Parser as _;

mod cli;
mod config;
mod gateways;
mod image;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Cli::parse();
    let mut cfg = match config::Config::try_load_from_file_or_default(args.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            log::error!("Unable to load configuration: {err}");
            process::exit(1);
        }
    };
    if let Some(db_url) = &args.db_url {
        cfg.db.conn_sqlite = db_url.clone();
    }

    if let Err(err) = cli::run(args, cfg).await {
        log::error!("{err:#}");
        process::exit(1);
    }
}
