// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use storeadmin_core::storage::FileStore;

mod cli;
mod commands;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    if let Commands::Version = &args.command {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = commands::load_config(args.config.as_deref())?;
    let store_path = args.store.clone().unwrap_or_else(commands::default_store_path);
    log::debug!("using session store {}", store_path.display());
    let ctx = commands::Context::new(FileStore::new(store_path), config);

    match &args.command {
        Commands::Version => {}
        Commands::Decode { token } => ctx.decode(token)?,
        Commands::Login { token, user_info } => ctx.login(token, user_info.as_deref())?,
        Commands::Logout => ctx.logout()?,
        Commands::Session { clear_expired } => ctx.session_status(*clear_expired)?,
        Commands::Authorize { roles } => ctx.authorize(roles)?,
        Commands::Guard { kind, roles } => ctx.guard_decision(*kind, roles)?,
    }

    Ok(())
}
