//! # mkgen CLI Entry Point
//!
//! Parses CLI arguments using clap and routes to the generators. The tool is
//! normally invoked by the top-level Makefile, but both subcommands work
//! stand-alone for debugging.
//!
//! ## Commands
//!
//! - `generate <out_dir> [source_root]` - regenerate descriptors + manifests
//! - `uber-header <root>` - emit an all-public-headers include file
//! - `completion <shell>` - shell completion scripts

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate as emit_completion};
use std::path::PathBuf;

use mkgen::generate;
use mkgen::uber;

#[derive(Parser)]
#[command(name = "mkgen")]
#[command(about = "Build-manifest generator for Thrust's internal Makefile build", version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan tests and examples, regenerate descriptors and manifests
    Generate {
        /// Destination directory for generated files (recreated from scratch)
        out_dir: PathBuf,
        /// Source tree root; when given, generated paths are expressed
        /// relative to it
        source_root: Option<PathBuf>,
    },
    /// Emit a single header that includes every public header
    UberHeader {
        /// Library root containing the public header subtree
        root: PathBuf,
        /// Subdirectory under the root to walk [default: thrust]
        #[arg(long)]
        subdir: Option<String>,
        /// Skip paths matching this pattern; a matching directory prunes its
        /// subtree (repeatable, overrides config defaults)
        #[arg(long = "exclude")]
        exclude: Vec<String>,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate {
            out_dir,
            source_root,
        } => generate::run(out_dir, source_root.as_deref()),
        Commands::UberHeader {
            root,
            subdir,
            exclude,
            output,
        } => uber::generate_uber_header(root, subdir.as_deref(), exclude, output.as_deref()),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            emit_completion(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}
