use clap::{Parser as ClapParser, Subcommand};
use sprig_query::cli::{self, CliError, CompileOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "sprig")]
#[command(about = "Sprig - compile search expressions into filter trees")]
#[command(version)]
struct Cli {
    /// Log compiler stages (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query into a JSON filter tree
    Compile {
        /// The query to compile (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't translate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the tokens of a query
    Tokens {
        /// The query to tokenize (reads from stdin if not provided)
        query: Option<String>,
    },

    /// Print the syntax tree of a query
    Ast {
        /// The query to parse (reads from stdin if not provided)
        query: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'sprig docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Compile {
            query,
            pretty,
            syntax_only,
        } => run_compile(query, pretty, syntax_only),
        Commands::Tokens { query } => {
            read_query(query).and_then(|q| cli::render_tokens(&q)).map(|out| print!("{}", out))
        }
        Commands::Ast { query } => {
            read_query(query).and_then(|q| cli::render_ast(&q)).map(|out| println!("{}", out))
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => {
            cli::get_doc_category(&category).map(|content| print!("{}", content))
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoQuery),
    }
}

fn run_compile(query: Option<String>, pretty: bool, syntax_only: bool) -> Result<(), CliError> {
    let options = CompileOptions {
        query: read_query(query)?,
        pretty,
        syntax_only,
    };

    let result = cli::execute_compile(&options)?;
    println!("{}", result.render(options.pretty));
    Ok(())
}
