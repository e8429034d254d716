use colored::Colorize;
use std::io::{stdout, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::actions::{archive::ArchiveSpec, clean::CleanAction};
use crate::configs::{FailurePolicy, PackagerOptions};
use crate::entities::{
  context::BuildContext,
  destination::Destinations,
  environment::PackEnvironment,
  traits::Execute,
};
use crate::error::PackagerError;
use crate::i18n;
use crate::rw::log;

/// Упаковщик: очистка рабочего дерева и сборка двух архивов.
pub(crate) struct Packager<'a> {
  pub(crate) root_dir: &'a Path,
  pub(crate) options: &'a PackagerOptions,
  pub(crate) context: &'a BuildContext,
  pub(crate) silent: bool,
}

/// Итог выполнения набора шагов.
#[derive(Debug, Default)]
pub(crate) struct RunReport {
  pub(crate) completed: Vec<String>,
  /// Шаги, упавшие с политикой `warn`.
  pub(crate) warnings: Vec<(String, String)>,
}

impl<'a> Packager<'a> {
  fn env(&self) -> PackEnvironment<'a> {
    PackEnvironment { root_dir: self.root_dir }
  }

  pub(crate) fn destinations(&self) -> Result<Destinations, PackagerError> {
    Destinations::compute(self.context, self.options)
  }

  pub(crate) fn clean_step(&self) -> CleanAction {
    CleanAction::from_options(self.options)
  }

  /// Основной архив и его копия, в порядке записи.
  pub(crate) fn archive_steps(&self) -> Result<Vec<ArchiveSpec>, PackagerError> {
    let Destinations { main, copy } = self.destinations()?;
    Ok(vec![
      ArchiveSpec::new(i18n::STEP_ARCHIVE_MAIN, main, self.options),
      ArchiveSpec::new(i18n::STEP_ARCHIVE_COPY, copy, self.options).with_failure(self.options.copy_failure),
    ])
  }

  /// Только очистка.
  pub(crate) fn clean(&self) -> Result<RunReport, PackagerError> {
    let clean = self.clean_step();
    let banner = i18n::STARTING_CLEAN.replace("{}", &self.root_dir.display().to_string());
    self.execute_steps(&banner, &[&clean as &dyn Execute])
  }

  /// Только архивы, без очистки.
  pub(crate) fn pack(&self) -> Result<RunReport, PackagerError> {
    let archives = self.archive_steps()?;
    let steps = archives.iter().map(|a| a as &dyn Execute).collect::<Vec<_>>();
    self.execute_steps(&self.packaging_banner(), &steps)
  }

  /// Полный прогон: очистка, затем оба архива.
  ///
  /// Пути вычисляются до очистки, так что неверное имя задачи ничего не трогает на диске.
  pub(crate) fn run(&self) -> Result<RunReport, PackagerError> {
    let clean = self.clean_step();
    let archives = self.archive_steps()?;

    let mut steps: Vec<&dyn Execute> = vec![&clean];
    steps.extend(archives.iter().map(|a| a as &dyn Execute));
    self.execute_steps(&self.packaging_banner(), &steps)
  }

  fn packaging_banner(&self) -> String {
    i18n::STARTING_RUN.replace("{}", &self.options.product_name)
  }

  fn execute_steps(&self, banner: &str, steps: &[&dyn Execute]) -> Result<RunReport, PackagerError> {
    let env = self.env();
    let total = steps.len();
    let mut report = RunReport::default();

    if !self.silent { println!("{}", banner); }

    for (idx, step) in steps.iter().enumerate() {
      let title = step.title();
      if !self.silent {
        print!("[{}/{}] {} `{}`...", idx + 1, total, i18n::STEP, title.blue().italic());
        let _ = stdout().flush();
      }
      let now = Instant::now();
      let result = step.execute(env);
      let elapsed = format!("{:.2?}", now.elapsed());

      match result {
        Ok(output) => {
          if !self.silent {
            println!("{} ({}).", i18n::DONE, elapsed.green());
            for line in &output { println!("\t> {}", line); }
          } else {
            for line in &output { log(line); }
          }
          report.completed.push(title);
        },
        Err(e) if step.on_failure() == FailurePolicy::Warn => {
          if !self.silent { println!("{} ({}).", i18n::GOT_WARNING.yellow().bold(), elapsed.green()); }
          report.warnings.push((title, e.to_string()));
        },
        Err(e) => {
          if !self.silent { println!("{} ({}).", i18n::GOT_ERROR.red().bold(), elapsed.green()); }
          return Err(e)
        },
      }
    }

    Ok(report)
  }
}

/// Печатает вычисленные пути, ничего не меняя на диске.
pub(crate) fn print_paths(packager: &Packager) -> Result<(), PackagerError> {
  let ctx = packager.context;
  let Destinations { main, copy } = packager.destinations()?;
  let show = |p: &PathBuf| packager.root_dir.join(p).display().to_string();

  let kind = if ctx.is_ci { i18n::CONTEXT_CI } else { i18n::CONTEXT_LOCAL };
  println!("{}", kind.bold());
  println!("{}: {}", i18n::CONTEXT_JOB, ctx.job_name.green());
  println!("{}: {}", i18n::CONTEXT_BUILD, ctx.build_number.green());
  println!("{}: {}", i18n::CONTEXT_DATE, ctx.date_str().green());
  println!("{}: {}", i18n::MAIN_TARGET, show(&main).blue());
  println!("{}: {}", i18n::COPY_TARGET, show(&copy).blue());

  Ok(())
}
