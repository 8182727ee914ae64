use clap::Args;
use storefront_app::database::{self, MIGRATOR};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    let latest = MIGRATOR.iter().map(|migration| migration.version).max();

    match latest {
        Some(version) => println!("schema at version {version}"),
        None => println!("no migrations to apply"),
    }

    Ok(())
}
