use clap::{Parser as ClapParser, Subcommand};
use cql_lang::cli::{self, CheckOptions, CheckResult, CliError, CompileOptions};
use cql_lang::output::OutputFormat;
use cql_lang::{CompilerConfig, ResultShape};
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "cql")]
#[command(about = "CQL - compile corpus word patterns into query fragments")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $CQL_CONFIG, then built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log parsing and compilation to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a query and print its canonical form
    Check {
        /// The CQL query (reads from stdin if not provided)
        query: Option<String>,

        /// Print the parsed structure
        #[arg(long)]
        tree: bool,
    },

    /// Compile a query into one fragment per phrase
    Compile {
        /// The CQL query (reads from stdin if not provided)
        query: Option<String>,

        /// Result shape: word, full-word, work or work-part
        #[arg(short, long)]
        shape: Option<ResultShape>,

        /// Extra condition ANDed into every fragment
        #[arg(short, long)]
        filter: Option<String>,

        /// Emit fragments as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List attribute mnemonics
    Attributes,

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'cql docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check { query, tree } => run_check(query, tree),
        Commands::Compile {
            query,
            shape,
            filter,
            json,
            pretty,
        } => run_compile(cli.config, query, shape, filter, json, pretty),
        Commands::Attributes => {
            print!("{}", cli::get_attribute_listing());
            Ok(())
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => match cli::get_doc_category(&category) {
            Ok(content) => {
                print!("{}", content);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("cql_lang=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(query: Option<String>, tree: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        query: read_query(query)?,
        tree,
    };

    match cli::execute_check(&options)? {
        CheckResult::Canonical(text) => println!("{}", text),
        CheckResult::Tree(text) => print!("{}", text),
    }
    Ok(())
}

fn run_compile(
    config: Option<PathBuf>,
    query: Option<String>,
    shape: Option<ResultShape>,
    filter: Option<String>,
    json: bool,
    pretty: bool,
) -> Result<(), CliError> {
    let config = CompilerConfig::load(config.as_deref())?;
    let format = match (json, pretty) {
        (false, _) => OutputFormat::Lines,
        (true, false) => OutputFormat::Json,
        (true, true) => OutputFormat::PrettyJson,
    };
    let options = CompileOptions {
        query: read_query(query)?,
        shape,
        filter,
        format,
    };

    println!("{}", cli::execute_compile(&options, &config)?);
    Ok(())
}
