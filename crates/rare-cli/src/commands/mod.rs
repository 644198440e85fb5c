use rare_config::RareConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod explore;
pub mod investigate;
pub mod schema;
pub mod validate;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &RareConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Investigate(args) => investigate::handle(&args, config, flags).await,
        Commands::Validate(args) => validate::handle(&args, config, flags).await,
        Commands::Explore(args) => explore::handle(&args, config, flags).await,
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}
