use anyhow::Result;
use marquee_core::model::MediaKind;

use crate::context::AppContext;

pub async fn run(
    ctx: &AppContext,
    tmdb_id: u64,
    kind: MediaKind,
) -> Result<()> {
    match ctx.trailers().resolve_trailer(tmdb_id, kind).await {
        Some(key) => println!("{}", key.watch_url()),
        None => eprintln!("No trailer available"),
    }
    Ok(())
}
