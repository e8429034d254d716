use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Package the plugin sources into a distributable zip.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
  /// Command (`run` when omitted)
  #[command(subcommand)]
  pub(crate) r#type: Option<PackagerExecType>,
  /// Verbose
  #[arg(short, long, global = true)]
  pub(crate) verbose: bool,
  /// Disable step progress output
  #[arg(short, long, global = true)]
  pub(crate) silent: bool,
  #[command(flatten)]
  pub(crate) folders: FolderArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FolderArgs {
  /// Working tree to clean and package (current directory by default)
  #[arg(short = 'C', long, global = true)]
  pub(crate) dir: Option<PathBuf>,
  /// Specify options file (`package-config.json` in the working tree by default)
  #[arg(long, global = true)]
  pub(crate) config: Option<PathBuf>,
  /// Override the root for the archive copy
  #[arg(long, global = true)]
  pub(crate) copy_root: Option<PathBuf>,
  /// Override the root for CI archives
  #[arg(long, global = true)]
  pub(crate) move_root: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PackagerExecType {
  /// Remove bytecode, then write both archives
  Run,
  /// Remove bytecode only
  Clean,
  /// Write both archives without cleaning
  Pack,
  /// Print the computed archive paths
  Paths,
}
