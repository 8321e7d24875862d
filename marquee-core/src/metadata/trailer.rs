use std::sync::Arc;

use marquee_model::{MediaKind, VideoKey};
use tracing::debug;

use crate::infra::cache::{CacheKey, CacheLookup, CacheStore};
use crate::infra::media::providers::{MetadataProvider, VideoHit};

const TRAILER_SITE: &str = "YouTube";
const TRAILER_TYPES: [&str; 2] = ["Trailer", "Teaser"];

/// First YouTube trailer or teaser, in provider order.
pub fn pick_trailer(videos: &[VideoHit]) -> Option<VideoKey> {
    videos
        .iter()
        .find(|video| {
            video.site == TRAILER_SITE
                && TRAILER_TYPES.contains(&video.video_type.as_str())
                && !video.key.is_empty()
        })
        .map(|video| VideoKey::new(video.key.clone()))
}

/// Looks up trailers; answers are remembered without expiry.
#[derive(Debug, Clone)]
pub struct TrailerResolver {
    provider: Arc<dyn MetadataProvider>,
    cache: CacheStore,
}

impl TrailerResolver {
    pub fn new(provider: Arc<dyn MetadataProvider>, cache: CacheStore) -> Self {
        Self { provider, cache }
    }

    pub async fn resolve_trailer(
        &self,
        tmdb_id: u64,
        kind: MediaKind,
    ) -> Option<VideoKey> {
        if tmdb_id == 0 || !self.provider.is_configured() {
            return None;
        }

        let key = CacheKey::trailer(kind, tmdb_id);
        if let CacheLookup::Present(value) =
            self.cache.get_pinned::<VideoKey>(&key).await
        {
            return value;
        }

        let videos = match self.provider.videos(kind, tmdb_id).await {
            Ok(videos) => videos,
            Err(err) => {
                debug!(%key, error = %err, "video lookup failed");
                return None;
            }
        };

        let trailer = pick_trailer(&videos);
        self.cache.put_pinned(&key, trailer.as_ref()).await;
        trailer
    }
}
