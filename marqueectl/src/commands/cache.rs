use anyhow::{Context, Result};

use crate::context::AppContext;

pub async fn clear(ctx: &AppContext, include_overrides: bool) -> Result<()> {
    let removed = ctx
        .cache
        .clear(include_overrides)
        .await
        .context("failed to clear cache")?;

    if include_overrides {
        println!("Removed {removed} entries (overrides included)");
    } else {
        println!("Removed {removed} cached lookups; overrides kept");
    }
    Ok(())
}
