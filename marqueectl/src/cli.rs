use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use marquee_core::SortOrder;
use marquee_core::model::MediaKind;

#[derive(Debug, Parser)]
#[command(
    name = "marqueectl",
    version,
    about = "Track the movies and series in your spreadsheet, \
             enriched from TMDB"
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = "MARQUEE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dotenv file to seed the environment from
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Keep lookups in memory for this run only
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the spreadsheet, enrich it and print the catalog
    List(ListArgs),
    /// Show up to ten TMDB matches for a title
    Candidates {
        title: String,
        #[arg(long, value_enum, default_value = "movie")]
        kind: KindArg,
    },
    /// Pin one of the candidates as the match for a title
    Override {
        title: String,
        /// Year exactly as written in the sheet
        #[arg(long)]
        year: Option<String>,
        #[arg(long, value_enum, default_value = "movie")]
        kind: KindArg,
        /// 1-based position in the `candidates` listing; 0 pins "no match"
        #[arg(long)]
        pick: usize,
    },
    /// Print the YouTube trailer URL for a TMDB id
    Trailer {
        tmdb_id: u64,
        #[arg(long, value_enum, default_value = "movie")]
        kind: KindArg,
    },
    /// Manage the local lookup cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only list one kind
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,
    /// Genre contains (case-insensitive)
    #[arg(long)]
    pub genre: Option<String>,
    /// Status equals (case-insensitive)
    #[arg(long)]
    pub status: Option<String>,
    /// Service equals (case-insensitive)
    #[arg(long)]
    pub service: Option<String>,
    /// Title contains (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, value_enum, default_value = "default")]
    pub sort: SortArg,
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
    /// Skip TMDB enrichment
    #[arg(long)]
    pub no_enrich: bool,
    /// Print available genres, statuses and services
    #[arg(long)]
    pub facets: bool,
}

#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Remove cached lookups
    Clear {
        /// Remove manual overrides too
        #[arg(long)]
        overrides: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Movie,
    #[value(alias = "tv")]
    Series,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movie => MediaKind::Movie,
            KindArg::Series => MediaKind::Series,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Default,
    Rating,
    YearDesc,
    YearAsc,
}

impl From<SortArg> for SortOrder {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Default => SortOrder::Default,
            SortArg::Rating => SortOrder::Rating,
            SortArg::YearDesc => SortOrder::YearDesc,
            SortArg::YearAsc => SortOrder::YearAsc,
        }
    }
}
