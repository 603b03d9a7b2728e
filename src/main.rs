use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use timex::cli::{self, CheckOptions, CheckResult, CliError};
use timex::output::{to_json, to_json_pretty};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "timex")]
#[command(about = "Timex - Evaluate time expressions into timestamps and date ranges")]
#[command(version)]
struct Cli {
    /// Log evaluation steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and evaluate a time expression
    Check {
        /// The time expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Variable binding, e.g. --var event=2014-08-01T02:10:23
        #[arg(long = "var", value_name = "NAME=INSTANT")]
        vars: Vec<String>,

        /// Instant to use for $timestamp (defaults to now, UTC)
        #[arg(long)]
        at: Option<String>,

        /// Report whether this instant falls inside the result
        #[arg(short, long, value_name = "INSTANT")]
        matches: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the tokens of a time expression
    Tokens {
        /// The time expression (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'timex docs' to list categories)
        category: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "timex=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("TIMEX_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            expression,
            vars,
            at,
            matches,
            pretty,
            syntax_only,
        } => read_expression(expression).and_then(|expression| {
            run_check(CheckOptions {
                expression,
                bindings: vars,
                at,
                matches,
                syntax_only,
            }, pretty)
        }),
        Commands::Tokens { expression } => read_expression(expression)
            .and_then(|expression| cli::format_tokens(&expression))
            .map(|listing| print!("{}", listing)),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_expression(expression: Option<String>) -> Result<String, CliError> {
    match expression {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(options: CheckOptions, pretty: bool) -> Result<(), CliError> {
    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid { is_range } => {
            let kind = if is_range { "range" } else { "timestamp" };
            println!("Syntax is valid ({} expression)", kind);
        }
        CheckResult::Success { value, matched } => {
            let json = if pretty {
                to_json_pretty(&value)
            } else {
                to_json(&value)
            };
            println!("{}", json);
            if let Some(matched) = matched {
                println!("matches: {}", matched);
                if !matched {
                    std::process::exit(2);
                }
            }
        }
    }
    Ok(())
}
