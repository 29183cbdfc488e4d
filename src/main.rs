use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lazywalk::fs::{walk_dir, DirExpansion};
use lazywalk::walk;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lazywalk", about = "Lazy depth-first walks over implicit trees")]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Walk a directory tree in pre-order.
    Dirs {
        /// Directory to start from.
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Stop after this many paths.
        #[arg(long)]
        limit: Option<usize>,
        /// Only print directories.
        #[arg(long)]
        dirs_only: bool,
        /// Sort the output instead of printing in walk order.
        #[arg(long)]
        sorted: bool,
        /// Include hidden entries.
        #[arg(long)]
        hidden: bool,
        /// Descend into symlinked directories.
        #[arg(long)]
        follow_links: bool,
        /// Walk on the rayon thread pool (output order is unspecified).
        #[arg(long)]
        parallel: bool,
    },
    /// Print the implicit binary tree `n -> [2n, 2n + 1]` in pre-order.
    Numbers {
        /// Nodes below this value have children.
        #[arg(long, default_value_t = 8)]
        max: u64,
        /// Stop after this many nodes.
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Dirs {
            path,
            limit,
            dirs_only,
            sorted,
            hidden,
            follow_links,
            parallel,
        } => {
            let config = DirExpansion::new()
                .with_hidden(hidden)
                .with_follow_links(follow_links);
            run_dirs(path, config, limit, dirs_only, sorted, parallel)
                .context("directory walk failed")?
        }
        Commands::Numbers { max, limit } => run_numbers(max, limit),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_dirs(
    root: PathBuf,
    config: DirExpansion,
    limit: Option<usize>,
    dirs_only: bool,
    sorted: bool,
    parallel: bool,
) -> Result<()> {
    if !root.exists() {
        anyhow::bail!("{} does not exist", root.display());
    }

    let limit = limit.unwrap_or(usize::MAX);
    let mut paths = if parallel {
        collect_parallel(root, config, dirs_only, limit)
    } else {
        let keep = |path: &PathBuf| !dirs_only || path.is_dir();
        walk_dir(root, config)
            .filter_map(|result| match result {
                Ok(path) => Some(path),
                Err(err) => {
                    warn!("{err}");
                    None
                }
            })
            .filter(keep)
            .take(limit)
            .collect::<Vec<_>>()
    };

    if sorted {
        paths.sort();
    }

    debug!(count = paths.len(), "walk finished");
    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn collect_parallel(
    root: PathBuf,
    config: DirExpansion,
    dirs_only: bool,
    limit: usize,
) -> Vec<PathBuf> {
    use rayon::prelude::*;

    // The rayon walker needs an infallible expansion: unreadable entries are
    // logged and treated as leaves.
    let expand = move |path: &PathBuf| {
        config.children(path).unwrap_or_else(|err| {
            warn!("{err}");
            Vec::new()
        })
    };
    lazywalk::par_walk(root, expand)
        .filter(|path| !dirs_only || path.is_dir())
        .take_any(limit)
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn collect_parallel(
    root: PathBuf,
    config: DirExpansion,
    dirs_only: bool,
    limit: usize,
) -> Vec<PathBuf> {
    warn!("built without the `parallel` feature; walking sequentially");
    walk_dir(root, config)
        .filter_map(Result::ok)
        .filter(|path| !dirs_only || path.is_dir())
        .take(limit)
        .collect()
}

/// Children of `n` in the implicit binary tree. Values past `u64::MAX` are
/// absent, so the walk stops there instead of overflowing.
fn number_children(max: u64) -> impl Fn(&u64) -> Vec<Option<u64>> {
    move |n: &u64| {
        if *n >= max {
            return Vec::new();
        }
        let left = n.checked_mul(2);
        vec![left, left.and_then(|left| left.checked_add(1))]
    }
}

fn run_numbers(max: u64, limit: Option<usize>) {
    let nodes = walk(1u64, number_children(max)).take(limit.unwrap_or(usize::MAX));
    for node in nodes {
        println!("{node}");
    }
}
