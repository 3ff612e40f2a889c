//! Demo host for the argbind engine.
//!
//! Shows the full cycle: declare argument classes, bind argv, print help,
//! dispatch commands (including default command fallback) and report
//! leftover input with "did you mean" suggestions.
//!
//!   argbind-demo execute -path="C:\temp\file.txt" -silent
//!   argbind-demo -path=file.txt          (default command fallback)
//!   argbind-demo version
//!   argbind-demo -help

use std::collections::HashMap;
use std::io::{self, BufRead};
use std::process::ExitCode;

use colored::Colorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use argbind::{ArgumentClass, BindError, Command, Error, ParsedEntry, SchemaBuilder};

const DEFAULT_CONSOLE_WIDTH: usize = 80;

#[derive(Default)]
struct DemoArgs {
    help: bool,
    json: bool,
    wait: bool,
    execute: Option<ExecuteCommand>,
    version: Option<VersionCommand>,
}

impl ArgumentClass for DemoArgs {
    fn declare(schema: &mut SchemaBuilder<Self>) {
        schema
            .flag("help", |a, v| a.help = v)
            .alias("?")
            .help("Shows this help screen");
        schema
            .flag("json", |a, v| a.json = v)
            .help("Reports the outcome as JSON");
        schema
            .flag("wait", |a, v| a.wait = v)
            .alias("w")
            .help_localized("Help.Wait", "Waits for enter before exiting");
        schema
            .command_for("execute", |a: &mut Self| &mut a.execute, ExecuteCommand::new)
            .alias("e")
            .default_command()
            .help("Executes the given file");
        schema
            .command("version", |a: &mut Self| &mut a.version)
            .default_command()
            .help("Prints the version");
    }
}

#[derive(Default)]
struct ExecuteArgs {
    path: String,
    silent: bool,
}

impl ArgumentClass for ExecuteArgs {
    fn declare(schema: &mut SchemaBuilder<Self>) {
        schema
            .named("path", |a: &mut Self, v: String| a.path = v)
            .alias("p")
            .required()
            .trim_quotation()
            .help("The path of the file to execute");
        schema
            .flag("silent", |a, v| a.silent = v)
            .alias("s")
            .help("Suppresses the execution banner");
    }
}

struct ExecuteCommand {
    arguments: ExecuteArgs,
}

impl ExecuteCommand {
    fn new(arguments: ExecuteArgs) -> Self {
        Self { arguments }
    }
}

impl Command for ExecuteCommand {
    fn execute(&mut self) {
        if !self.arguments.silent {
            println!("{}", format!("Executing '{}'", self.arguments.path).green());
        }
    }
}

#[derive(Default)]
struct VersionCommand;

impl Command for VersionCommand {
    fn execute(&mut self) {
        println!("argbind-demo {}", env!("CARGO_PKG_VERSION"));
    }
}

#[derive(Serialize)]
struct Outcome<'a> {
    command_executed: bool,
    leftovers: &'a [ParsedEntry],
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> anyhow::Result<ExitCode> {
    let binding = match argbind::bind::<DemoArgs, _>(args) {
        Ok(binding) => binding,
        Err(err) => return report_error(err),
    };

    if binding.arguments.help {
        print_help()?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut arguments = binding.arguments;
    let mut leftovers = binding.leftovers;
    let dispatched = match argbind::dispatch::execute(&mut arguments, args, false) {
        Ok(dispatched) => dispatched,
        Err(err) => return report_error(err),
    };
    if let Some(rebound) = dispatched.leftovers {
        leftovers = rebound;
    }

    warn_leftovers(&leftovers)?;

    if arguments.json {
        let outcome = Outcome {
            command_executed: dispatched.executed,
            leftovers: &leftovers,
        };
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    if arguments.wait {
        println!("Press enter to exit.");
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
    }

    Ok(ExitCode::SUCCESS)
}

fn report_error(err: Error) -> anyhow::Result<ExitCode> {
    match err {
        Error::Bind(BindError::MissingRequiredArgument(_)) => {
            eprintln!("{}", err.to_string().yellow());
            println!("[ARGUMENT HELP]");
            print_help()?;
        }
        other => eprintln!("{}", other.to_string().red()),
    }
    Ok(ExitCode::FAILURE)
}

fn print_help() -> anyhow::Result<()> {
    let lookup = descriptions();
    print!(
        "{}",
        argbind::format_help::<DemoArgs>(DEFAULT_CONSOLE_WIDTH, Some(&lookup))?
    );
    print!(
        "{}",
        argbind::format_help::<ExecuteArgs>(DEFAULT_CONSOLE_WIDTH, Some(&lookup))?
    );
    Ok(())
}

/// Stands in for a localization resource table.
fn descriptions() -> HashMap<String, String> {
    let mut table = HashMap::new();
    table.insert(
        "Help.Wait".to_string(),
        "Waits for enter before the process exits".to_string(),
    );
    table
}

fn warn_leftovers(leftovers: &[ParsedEntry]) -> anyhow::Result<()> {
    if leftovers.is_empty() {
        return Ok(());
    }
    let schema = argbind::schema_for::<DemoArgs>()?;
    for entry in leftovers {
        let hint = schema
            .suggest(&entry.name)
            .map(|name| format!(" (did you mean '-{name}'?)"))
            .unwrap_or_default();
        eprintln!(
            "{}",
            format!("Unknown argument '{}'{hint}", entry.name).yellow()
        );
    }
    Ok(())
}
