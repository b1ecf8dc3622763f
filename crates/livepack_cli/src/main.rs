mod args;
mod external_dir;
mod logging;
mod types;

use std::{path::Path, process::ExitCode, time::Instant};

use ansi_term::Colour;
use args::{Command, InputArgs, LogArgs};
use clap::Parser;

use external_dir::DirExternalResolver;
use livepack::{
  BuildError, BundleError, Bundler, BundlerOptions, ExternalResolver, FileSetDelta, JsxOptions,
  MemoryExternalResolver,
};
use livepack_fs::{FileSystem, OsFileSystem};
use livepack_sandbox::{react_shim_host, ExecutionLimits, PayloadExecutor, SandboxExecutor};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  log: LogArgs,

  #[command(subcommand)]
  command: Command,
}

fn load(input: InputArgs) -> anyhow::Result<(Bundler, livepack::VirtualFileSet)> {
  let files = OsFileSystem.read_file_set(&input.dir)?;
  let bundler = Bundler::new(BundlerOptions {
    entry: input.entry,
    entry_candidates: input.entry_candidate,
    host_modules: input.host_module,
    target: input.target.map(Into::into),
    jsx: Some(JsxOptions { pragma: input.jsx_pragma, pragma_frag: input.jsx_pragma_frag }),
  });
  Ok((bundler, files))
}

fn print_warnings(warnings: &[anyhow::Error]) {
  for warning in warnings {
    eprintln!("{} {}", Colour::Yellow.paint("Warning:"), warning);
  }
}

fn print_build_error(errors: &BuildError) {
  for error in &**errors {
    println!("{} {}", Colour::Red.paint("Error:"), error);
  }
}

fn print_dependencies(dependencies: &[String]) {
  let dim = Colour::White.dimmed();
  if dependencies.is_empty() {
    println!("{}", dim.paint("no external dependencies"));
  }
  for dependency in dependencies {
    println!("{}{}", dim.paint("dependency "), Colour::Cyan.paint(dependency));
  }
}

fn print_finished(start: Instant) {
  let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
  println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
}

fn bundle(input: InputArgs, out: Option<&Path>) -> anyhow::Result<bool> {
  let (bundler, files) = load(input)?;
  let start = Instant::now();
  let output = match bundler.bundle(&files) {
    Ok(output) => output,
    Err(errors) => {
      print_build_error(&errors);
      return Ok(false);
    }
  };

  let code = output.payload.to_function_expression();
  print_warnings(&output.warnings);
  let Some(out) = out else {
    println!("{code}");
    return Ok(true);
  };

  std::fs::write(out, &code)?;
  print_dependencies(&output.payload.dependencies);
  println!(
    "{}{} {} {:.2} kB",
    Colour::White.dimmed().paint("entry "),
    Colour::Cyan.paint(output.entry.path.as_str()),
    Colour::White.dimmed().paint("│ size:"),
    code.len() as f64 / 1024.0
  );
  print_finished(start);
  Ok(true)
}

async fn run(
  input: InputArgs,
  externals: Option<&Path>,
  loop_iteration_limit: Option<u64>,
) -> anyhow::Result<bool> {
  let (bundler, files) = load(input)?;
  let resolver: Box<dyn ExternalResolver> = match externals {
    Some(dir) => Box::new(DirExternalResolver::new(dir)),
    None => Box::new(MemoryExternalResolver::default()),
  };

  let start = Instant::now();
  let prepared = match bundler.prepare(&files, resolver.as_ref()).await {
    Ok(prepared) => prepared,
    Err(errors) => {
      print_build_error(&errors);
      return Ok(false);
    }
  };
  print_warnings(&prepared.output.warnings);

  let mut limits = ExecutionLimits::default();
  if let Some(limit) = loop_iteration_limit {
    limits.loop_iteration_limit = limit;
  }
  let executor = SandboxExecutor::new(limits).with_react_shim();
  let result = executor.execute(&prepared.output.payload, &react_shim_host(), &prepared.externals);

  match result {
    Ok(outcome) => {
      outcome.console.iter().for_each(|line| println!("{}", Colour::White.dimmed().paint(line.to_string())));
      for style in &outcome.styles {
        println!("{} {} bytes", Colour::Purple.paint("style"), style.len());
      }
      if let Some(rendered) = &outcome.rendered {
        println!("{}", serde_json::to_string_pretty(rendered)?);
      }
      print_finished(start);
      Ok(true)
    }
    Err(BundleError::PayloadExecution { message, console }) => {
      console.iter().for_each(|line| println!("{}", Colour::White.dimmed().paint(line.to_string())));
      println!("{} {}", Colour::Red.paint("Runtime Error:"), message);
      Ok(false)
    }
    Err(err) => Err(err.into()),
  }
}

fn deps(input: InputArgs) -> anyhow::Result<bool> {
  let (bundler, files) = load(input)?;
  match bundler.bundle(&files) {
    Ok(output) => {
      print_dependencies(&output.payload.dependencies);
      Ok(true)
    }
    Err(errors) => {
      print_build_error(&errors);
      Ok(false)
    }
  }
}

fn apply(dir: &Path, delta: &Path) -> anyhow::Result<bool> {
  let delta = FileSetDelta::from_json(&std::fs::read_to_string(delta)?)?;
  if delta.is_empty() {
    println!("{}", Colour::White.dimmed().paint("nothing to apply"));
    return Ok(true);
  }

  OsFileSystem.apply_delta(dir, &delta)?;
  for path in &delta.deleted_files {
    println!("{} {}", Colour::Red.paint("deleted"), path);
  }
  for path in delta.files.keys() {
    println!("{} {}", Colour::Green.paint("written"), path);
  }
  Ok(true)
}

#[tokio::main]
async fn main() -> ExitCode {
  let args = Commands::parse();
  logging::init(args.log.log_level.as_deref(), args.log.log_format);

  let ret = match args.command {
    Command::Bundle { input, out } => bundle(input, out.as_deref()),
    Command::Run { input, externals, loop_iteration_limit } => {
      run(input, externals.as_deref(), loop_iteration_limit).await
    }
    Command::Deps { input } => deps(input),
    Command::Apply { dir, delta } => apply(&dir, &delta),
  };

  match ret {
    Ok(true) => ExitCode::SUCCESS,
    Ok(false) => ExitCode::FAILURE,
    Err(err) => {
      println!("{} {:#}", Colour::Red.paint("Error:"), err);
      ExitCode::FAILURE
    }
  }
}
