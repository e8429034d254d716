#![warn(clippy::todo, clippy::unimplemented)]

mod cmd;
mod configs;
mod error;
mod i18n;
mod rw;
mod utils;

mod actions;
mod entities;
mod pipeline;

use crate::cmd::{Cli, FolderArgs, PackagerExecType};
use crate::configs::{PackagerOptions, PACKAGE_CONF_FILE};
use crate::entities::context::BuildContext;
use crate::pipeline::{print_paths, Packager};
use crate::rw::{log, read_checked, read_or_default, VERBOSE};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use mimalloc::MiMalloc;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
  let args = Cli::parse();
  let _ = VERBOSE.set(args.verbose);

  match execute(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!();
      eprintln!("{}: {:#}", i18n::ERROR.red().bold(), e);
      ExitCode::FAILURE
    },
  }
}

fn execute(args: &Cli) -> anyhow::Result<()> {
  // Определение рабочей директории
  let root_dir = match &args.folders.dir {
    Some(dir) => dir.to_owned(),
    None => std::env::current_dir().context("Can't get current dir!")?,
  };

  let options = load_options(&root_dir, &args.folders)?;
  let context = BuildContext::from_env();
  log(format!("{:?}", context));

  let packager = Packager {
    root_dir: &root_dir,
    options: &options,
    context: &context,
    silent: args.silent,
  };

  let report = match args.r#type.unwrap_or(PackagerExecType::Run) {
    PackagerExecType::Run => packager.run()?,
    PackagerExecType::Clean => packager.clean()?,
    PackagerExecType::Pack => packager.pack()?,
    PackagerExecType::Paths => return Ok(print_paths(&packager)?),
  };

  log(format!("{}: {}", i18n::DONE.trim(), report.completed.join(", ")));
  for (title, reason) in &report.warnings {
    eprintln!("{} `{}`: {}", i18n::WARNING.yellow().bold(), title, reason);
  }

  Ok(())
}

/// Настройки: файл (если есть) плюс переопределения из командной строки.
fn load_options(root_dir: &Path, folders: &FolderArgs) -> anyhow::Result<PackagerOptions> {
  let mut options: PackagerOptions = match &folders.config {
    Some(path) => read_checked(path)?,
    None => {
      let path: PathBuf = root_dir.join(PACKAGE_CONF_FILE);
      if path.exists() {
        log(format!("{} `{}`", i18n::OPTIONS_LOADED, path.display()));
      } else {
        log(i18n::OPTIONS_DEFAULT);
      }
      read_or_default(path)?
    },
  };

  if let Some(copy_root) = &folders.copy_root { options.copy_root = copy_root.to_owned(); }
  if let Some(move_root) = &folders.move_root { options.move_root = move_root.to_owned(); }

  Ok(options)
}
