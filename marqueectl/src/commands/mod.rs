mod cache;
mod list;
mod overrides;
mod trailer;

use anyhow::Result;

use crate::cli::{CacheAction, Cli, Command};
use crate::context::AppContext;

pub async fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::from_cli(&cli)?;

    match cli.command {
        Command::List(args) => list::run(&ctx, args).await,
        Command::Candidates { title, kind } => {
            overrides::candidates(&ctx, &title, kind.into()).await
        }
        Command::Override {
            title,
            year,
            kind,
            pick,
        } => {
            overrides::save(&ctx, &title, year.as_deref(), kind.into(), pick)
                .await
        }
        Command::Trailer { tmdb_id, kind } => {
            trailer::run(&ctx, tmdb_id, kind.into()).await
        }
        Command::Cache {
            action: CacheAction::Clear { overrides },
        } => cache::clear(&ctx, overrides).await,
    }
}
