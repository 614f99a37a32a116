#[macro_use]
mod log;
mod cli;
#[cfg(test)]
mod test_utils;

use clap::{Args, Parser, Subcommand};
use cli::ConfigOptions;
use class_merge::Placement;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cnmerge")]
#[command(about = "Merge utility class lists, dropping classes that a later class overrides")]
#[command(version)]
struct Cli {
    /// Log what each command did to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum PlacementArg {
    /// Survivors stay where they were written
    Last,
    /// Survivors move to the earliest class they replaced
    First,
}

impl From<PlacementArg> for Placement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Last => Placement::Last,
            PlacementArg::First => Placement::First,
        }
    }
}

#[derive(Args)]
struct RuleArgs {
    /// Rule table to use instead of the bundled Tailwind table
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rule file layered on top of the base table
    #[arg(long, value_name = "FILE")]
    extend: Option<PathBuf>,
}

impl RuleArgs {
    fn into_options(self, placement: Option<PlacementArg>) -> ConfigOptions {
        ConfigOptions {
            config: self.config,
            extend: self.extend,
            placement: placement.map(Into::into),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Merge each argument and print one merged class list per line
    Merge {
        #[command(flatten)]
        rules: RuleArgs,

        /// Where surviving classes are placed
        #[arg(long, value_enum)]
        placement: Option<PlacementArg>,

        #[arg(required = true, value_name = "CLASSES")]
        inputs: Vec<String>,
    },
    /// Flatten JSON class values the way `cn(...)` does and merge the result
    Cn {
        #[command(flatten)]
        rules: RuleArgs,

        /// Where surviving classes are placed
        #[arg(long, value_enum)]
        placement: Option<PlacementArg>,

        /// Strings, numbers, booleans, null, arrays or objects of flags
        #[arg(required = true, value_name = "JSON")]
        values: Vec<String>,
    },
    /// Show the group and variant key of each token
    Classify {
        #[command(flatten)]
        rules: RuleArgs,

        #[arg(required = true, value_name = "TOKEN")]
        tokens: Vec<String>,
    },
    /// Validate a rule table
    CheckConfig {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Check FILE as an extension of the bundled Tailwind table
        #[arg(long)]
        extend: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error!("cnmerge", error = format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let verbose = cli.verbose;

    match cli.command {
        Commands::Merge {
            rules,
            placement,
            inputs,
        } => {
            let result = cli::merge::execute(&rules.into_options(placement), &inputs)?;
            for merged in &result.merged {
                println!("{}", merged);
            }
            if verbose {
                log_debug!(
                    "merge",
                    inputs = inputs.len(),
                    removed = result.classes_removed
                );
            }
        }
        Commands::Cn {
            rules,
            placement,
            values,
        } => {
            let result = cli::cn::execute(&rules.into_options(placement), &values)?;
            println!("{}", result.merged);
            if verbose {
                log_debug!("cn", values = values.len());
            }
        }
        Commands::Classify { rules, tokens } => {
            let result = cli::classify::execute(&rules.into_options(None), &tokens)?;
            for line in &result.lines {
                println!("{}", line);
            }
            if result.unclassified > 0 {
                log_warn!(
                    "classify",
                    unclassified = result.unclassified,
                    total = result.lines.len()
                );
            }
        }
        Commands::CheckConfig { file, extend } => {
            let result = cli::check_config::execute(&file, extend)?;
            log_info!(
                "check-config",
                file = file.display(),
                rules = result.rules,
                groups = result.groups,
                conflicts = result.conflicts,
                placement = result.placement
            );
        }
    }

    Ok(())
}
