//! layerkit CLI - Container image layers for compiled JVM projects

use clap::{Parser, Subcommand, ValueEnum};
use layerkit_core::Packaging;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;
mod util;

use error::Result;

#[derive(Parser)]
#[command(name = "layerkit")]
#[command(author = "layerkit Contributors")]
#[command(version)]
#[command(about = "Split compiled JVM projects into container image layers", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PackagingArg {
    Jar,
    War,
}

impl From<PackagingArg> for Packaging {
    fn from(arg: PackagingArg) -> Self {
        match arg {
            PackagingArg::Jar => Packaging::Jar,
            PackagingArg::War => Packaging::War,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a layerkit.yaml with the conventional build layout
    Init {
        /// Descriptor to write
        #[arg(short, long, default_value = "layerkit.yaml")]
        project: PathBuf,

        /// Packaging recorded in the descriptor
        #[arg(long, value_enum, default_value = "jar")]
        packaging: PackagingArg,

        /// Overwrite an existing descriptor
        #[arg(long)]
        force: bool,
    },

    /// Compute layers for a project described by layerkit.yaml
    Layers {
        /// Project descriptor
        #[arg(short, long, default_value = "layerkit.yaml")]
        project: PathBuf,

        /// Override the descriptor's packaging
        #[arg(long, value_enum)]
        packaging: Option<PackagingArg>,

        /// Web archive to explode (implies --packaging war)
        #[arg(long)]
        web_archive: Option<PathBuf>,

        /// File name marker of snapshot dependencies
        #[arg(long)]
        snapshot_marker: Option<String>,

        /// Output layers as JSON
        #[arg(long)]
        json: bool,

        /// Keep the exploded web archive instead of deleting it
        #[arg(long)]
        keep_exploded: bool,
    },

    /// Compute layers from explicit build output paths
    Classify {
        /// Compiled classes directory (repeatable)
        #[arg(long = "classes", required = true)]
        classes: Vec<PathBuf>,

        /// Processed resources directory
        #[arg(long)]
        resources: Option<PathBuf>,

        /// Runtime classpath entry (repeatable)
        #[arg(long = "classpath")]
        classpath: Vec<PathBuf>,

        /// Directory of extra files copied as-is
        #[arg(long)]
        extra: Option<PathBuf>,

        /// File name marker of snapshot dependencies
        #[arg(long, default_value = layerkit_core::classify::DEFAULT_SNAPSHOT_MARKER)]
        snapshot_marker: String,

        /// Output layers as JSON
        #[arg(long)]
        json: bool,
    },

    /// Explode a web archive into a single layer
    Explode {
        /// Archive path (.war, .zip, .jar, .ear, .tar, .tar.gz)
        archive: PathBuf,

        /// Keep the exploded directory and print its location
        #[arg(long)]
        keep: bool,

        /// Output layers as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract an archive, refusing entries that escape the destination
    Extract {
        /// Archive path
        archive: PathBuf,

        /// Destination directory
        dest: PathBuf,

        /// Extract into a staging directory and move it into place on success
        #[arg(long)]
        atomic: bool,

        /// Leave link entries out instead of failing
        #[arg(long)]
        skip_links: bool,
    },

    /// List archive entries without extracting
    Inspect {
        /// Archive path
        archive: PathBuf,

        /// Output entries as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8, no_color: bool) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("layerkit={level},layerkit_core={level}"))
    });
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && console::colors_enabled_stderr())
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Init {
            project,
            packaging,
            force,
        } => commands::init::run(&project, packaging.into(), force),

        Commands::Layers {
            project,
            packaging,
            web_archive,
            snapshot_marker,
            json,
            keep_exploded,
        } => commands::layers::run(
            &project,
            commands::layers::Overrides {
                packaging: packaging.map(Packaging::from),
                web_archive: web_archive.as_deref(),
                snapshot_marker: snapshot_marker.as_deref(),
            },
            json,
            keep_exploded,
        ),

        Commands::Classify {
            classes,
            resources,
            classpath,
            extra,
            snapshot_marker,
            json,
        } => commands::classify::run(
            &classes,
            resources.as_deref(),
            &classpath,
            extra.as_deref(),
            &snapshot_marker,
            json,
        ),

        Commands::Explode {
            archive,
            keep,
            json,
        } => commands::explode::run(&archive, keep, json),

        Commands::Extract {
            archive,
            dest,
            atomic,
            skip_links,
        } => commands::extract::run(&archive, &dest, atomic, skip_links),

        Commands::Inspect { archive, json } => commands::inspect::run(&archive, json),
    }
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    init_tracing(cli.verbose, cli.no_color);

    if let Err(err) = run(cli.command) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
