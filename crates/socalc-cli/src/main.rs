//! socalc - the Schedule I mix calculator.
//!
//! Lists the catalog, brute-forces the most profitable mixin sequence for one
//! or every substance, and evaluates hand-written recipes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use socalc_core::catalog::Catalog;
use socalc_core::data_loader::{load_catalog, write_catalog};
use socalc_core::search::{SearchDepth, SearchError, search, search_all};
use socalc_core::substance::Substance;
use std::io::{self, Write};
use std::path::PathBuf;

mod report;

/// The Schedule I drug mix calculator.
///
/// Finds the mixin sequence that maximizes sale value minus mixin cost.
#[derive(Parser)]
#[command(name = "socalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog file (.json, .ron or .toml) to use instead of the built-in tables
    #[arg(short, long, global = true, env = "SOCALC_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a list of all drugs, effects or mixins
    #[command(short_flag = 'l', long_flag = "list")]
    List {
        #[arg(value_enum)]
        kind: ListKind,
    },

    /// Brute-force the best profit mix for one drug
    #[command(short_flag = 'b', long_flag = "brute")]
    Brute {
        /// Drug name (see `list drugs`)
        drug: String,

        /// Max number of mixins to try, 1 to 100
        #[arg(default_value = "4", value_parser = parse_depth)]
        depth: SearchDepth,
    },

    /// Brute-force the best profit mix for every drug
    #[command(short_flag = 'a', long_flag = "brute-all")]
    BruteAll {
        /// Max number of mixins to try, 1 to 100
        #[arg(default_value = "4", value_parser = parse_depth)]
        depth: SearchDepth,
    },

    /// Apply a list of mixins to a drug, in order, and print the result
    #[command(short_flag = 'r', long_flag = "recipe")]
    Recipe {
        /// Drug name (see `list drugs`)
        drug: String,

        /// Mixin names (see `list mixins`)
        mixins: Vec<String>,
    },

    /// Write the active catalog to a data file, format picked by extension
    DumpCatalog {
        /// Output path (.json, .ron or .toml)
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ListKind {
    Drugs,
    Effects,
    Mixins,
}

fn parse_depth(s: &str) -> Result<SearchDepth, String> {
    let depth: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid mixin depth"))?;
    SearchDepth::new(depth).map_err(|e| match e {
        SearchError::ZeroDepth => "no valid mixin depth provided".to_string(),
        other => other.to_string(),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = match &cli.catalog {
        Some(path) => load_catalog(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => Catalog::standard(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List { kind } => match kind {
            ListKind::Drugs => report::list_substances(&mut out, &catalog)?,
            ListKind::Effects => report::list_effects(&mut out, &catalog)?,
            ListKind::Mixins => report::list_mixins(&mut out, &catalog)?,
        },

        Commands::Brute { drug, depth } => {
            let id = catalog.resolve_substance(&drug)?;
            writeln!(out, "Brute-forcing {drug}...")?;
            if let Some(best) = search(&catalog, id, depth)? {
                report::substance(&mut out, &catalog, &best.state)?;
            }
        }

        Commands::BruteAll { depth } => {
            writeln!(out, "Brute-forcing all drugs...")?;
            for best in search_all(&catalog, depth)?.iter().flatten() {
                report::substance(&mut out, &catalog, &best.state)?;
            }
        }

        Commands::Recipe { drug, mixins } => {
            let id = catalog.resolve_substance(&drug)?;
            let mut state = Substance::new(&catalog, id)?;
            for (position, name) in mixins.iter().enumerate() {
                let mixin = catalog
                    .resolve_mixin(name)
                    .with_context(|| format!("mixin {} is not a valid mixin name", position + 1))?;
                state.apply_mixin(&catalog, mixin)?;
            }
            report::substance(&mut out, &catalog, &state)?;
        }

        Commands::DumpCatalog { output } => {
            write_catalog(&catalog, &output)
                .with_context(|| format!("failed to write catalog to {}", output.display()))?;
            log::info!("wrote catalog to {}", output.display());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
