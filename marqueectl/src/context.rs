use std::sync::Arc;

use anyhow::{Context, Result};
use marquee_config::{AppConfig, ConfigLoader};
use marquee_core::infra::cache::CacheRoot;
use marquee_core::{
    CacheStore, CatalogLoader, DiskKeyValueStore, EnrichmentPipeline,
    KeyValueStore, MemoryKeyValueStore, MetadataProvider, MetadataResolver,
    SheetClient, TmdbApiProvider, TrailerResolver,
};
use tracing::{debug, warn};

use crate::cli::Cli;

/// Everything a command needs, built once from configuration.
#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub cache: CacheStore,
    pub provider: Arc<dyn MetadataProvider>,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &cli.config {
            loader = loader.with_config_path(path);
        }
        if let Some(path) = &cli.env_file {
            loader = loader.with_env_file(path);
        }

        let load = loader.load().context("failed to load configuration")?;
        for warning in load.warnings.iter() {
            match &warning.hint {
                Some(hint) => warn!(hint = %hint, "{}", warning.message),
                None => warn!("{}", warning.message),
            }
        }

        let config = load.config;
        let backend: Arc<dyn KeyValueStore> = if cli.no_cache {
            Arc::new(MemoryKeyValueStore::new())
        } else {
            debug!(dir = %config.cache.dir.display(), "using disk cache");
            let root = CacheRoot::new(config.cache.dir.clone());
            Arc::new(DiskKeyValueStore::new(root))
        };
        let cache = CacheStore::new(backend).with_ttl(config.cache.ttl);

        let provider: Arc<dyn MetadataProvider> = Arc::new(
            TmdbApiProvider::new(config.tmdb.api_key.clone())
                .with_language(config.tmdb.language.clone()),
        );

        Ok(Self {
            config,
            cache,
            provider,
        })
    }

    pub fn resolver(&self) -> Arc<MetadataResolver> {
        Arc::new(MetadataResolver::new(
            self.provider.clone(),
            self.cache.clone(),
        ))
    }

    pub fn trailers(&self) -> TrailerResolver {
        TrailerResolver::new(self.provider.clone(), self.cache.clone())
    }

    pub fn pipeline(&self) -> EnrichmentPipeline {
        EnrichmentPipeline::new(self.resolver())
            .with_batch_size(self.config.enrichment.batch_size)
    }

    pub fn catalog_loader(&self) -> Result<CatalogLoader> {
        let sheet_id = self.config.require_sheet_id()?;
        let sheet = &self.config.sheet;
        Ok(CatalogLoader::new(SheetClient::new(sheet_id))
            .with_sheet_names(&sheet.movies, &sheet.series))
    }
}
