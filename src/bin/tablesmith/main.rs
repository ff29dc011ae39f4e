//! tablesmith: schema notation CLI
//!
//! # Usage
//!
//! ```bash
//! # Show what a schema file parses to
//! tablesmith parse shop.tables
//!
//! # TypeScript interfaces / JPA entities / JSON interchange
//! tablesmith export shop.tables --format typescript
//! tablesmith export shop.tables --format java -o Entities.java
//!
//! # SQL through the generation service
//! tablesmith generate shop.tables --dialect postgresql
//!
//! # Interactive editing with undo/redo
//! tablesmith repl
//! ```

mod repl;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use tablesmith::export::json::InterchangeDocument;
use tablesmith::prelude::*;
use tablesmith::types;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tablesmith")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "🧱 tablesmith: describe tables, export schemas", long_about = None)]
#[command(after_help = "EXAMPLES:
    tablesmith parse shop.tables
    tablesmith export shop.tables --format typescript
    tablesmith generate shop.tables --dialect postgresql -o shop.sql
    tablesmith resolve entier texte uuid")]
struct Cli {
    /// Base URL of the SQL generation service
    #[arg(long, env = "TABLESMITH_API_URL", global = true)]
    api_url: Option<String>,

    /// Config file (default: ./tablesmith.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliFormat {
    Sql,
    Json,
    #[value(alias = "ts")]
    Typescript,
    #[value(alias = "jpa")]
    Java,
}

impl From<CliFormat> for ExportFormat {
    fn from(val: CliFormat) -> Self {
        match val {
            CliFormat::Sql => ExportFormat::Sql,
            CliFormat::Json => ExportFormat::Json,
            CliFormat::Typescript => ExportFormat::TypeScript,
            CliFormat::Java => ExportFormat::JavaEntity,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliDialect {
    Mysql,
    #[value(alias = "postgres")]
    Postgresql,
    Sqlite,
    #[value(alias = "mssql")]
    SqlServer,
}

impl From<CliDialect> for Dialect {
    fn from(val: CliDialect) -> Self {
        match val {
            CliDialect::Mysql => Dialect::MySql,
            CliDialect::Postgresql => Dialect::PostgreSql,
            CliDialect::Sqlite => Dialect::Sqlite,
            CliDialect::SqlServer => Dialect::SqlServer,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ParseOutput {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a schema file and show the tables it defines
    Parse {
        /// Schema file (DSL or JSON), `-` for stdin
        input: String,
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: ParseOutput,
    },
    /// Export a schema to another format
    Export {
        /// Schema file (DSL or JSON), `-` for stdin
        input: String,
        #[arg(short, long, value_enum, default_value = "json")]
        format: CliFormat,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// SQL dialect (sql format) or dialect recorded in the document (json format)
        #[arg(short, long, value_enum)]
        dialect: Option<CliDialect>,
    },
    /// Generate SQL through the generation service
    Generate {
        /// Schema file (DSL or JSON), `-` for stdin
        input: String,
        #[arg(short, long, value_enum)]
        dialect: Option<CliDialect>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Ask the generation service whether a SQL file is valid
    Validate {
        /// SQL file, `-` for stdin
        input: String,
    },
    /// Show the canonical type for one or more type names
    Resolve { types: Vec<String> },
    /// Show the type reference
    Types,
    /// Interactive editing session with undo/redo
    Repl,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let client = SqlGeneratorClient::new(
        cli.api_url.clone().unwrap_or_else(|| config.server.url.clone()),
    );

    match &cli.command {
        Some(Commands::Parse { input, format }) => {
            let tables = read_schema(input)?;
            match format {
                ParseOutput::Pretty => print_tables(&tables),
                ParseOutput::Json => println!("{}", ExportFormat::Json.render(&tables).unwrap_or_default()),
            }
        }
        Some(Commands::Export {
            input,
            format,
            output,
            dialect,
        }) => {
            let tables = read_schema(input)?;
            let format = ExportFormat::from(*format);
            let dialect = dialect.map(Dialect::from);
            let text = match (format, dialect) {
                (ExportFormat::Json, Some(d)) => {
                    InterchangeDocument::new(tables).with_dialect(d.as_str()).to_json()
                }
                _ => render(format, &tables, &client, dialect.unwrap_or(config.generate.dialect)).await?,
            };
            write_output(output.as_deref(), &text)?;
        }
        Some(Commands::Generate {
            input,
            dialect,
            output,
        }) => {
            let tables = read_schema(input)?;
            let dialect = dialect.map(Dialect::from).unwrap_or(config.generate.dialect);
            let sql = client.generate(&tables, dialect).await?;
            write_output(output.as_deref(), &sql)?;
        }
        Some(Commands::Validate { input }) => {
            let sql = read_input(input)?;
            if client.validate(&sql).await? {
                println!("{} SQL is valid", "✓".green());
            } else {
                println!("{} SQL is not valid", "✗".red());
                std::process::exit(1);
            }
        }
        Some(Commands::Resolve { types: names }) => {
            for name in names {
                println!("{} {} {}", name.yellow(), "→".dimmed(), types::resolve(name).white().bold());
            }
        }
        Some(Commands::Types) => show_types(),
        Some(Commands::Repl) => repl::run_repl(&config, &client).await,
        None => {
            println!("{}", "🧱 tablesmith: describe tables, export schemas".cyan().bold());
            println!();
            println!("Usage: tablesmith <COMMAND> [OPTIONS]");
            println!();
            println!("Try: tablesmith --help");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "tablesmith=debug" } else { "tablesmith=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::discover()?,
    };
    Ok(config)
}

/// Render any export format; SQL goes through the generation service.
pub(crate) async fn render(
    format: ExportFormat,
    tables: &[Table],
    client: &SqlGeneratorClient,
    dialect: Dialect,
) -> Result<String> {
    match format.render(tables) {
        Some(text) => Ok(text),
        None => Ok(client.generate(tables, dialect).await?),
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

pub(crate) fn read_schema(input: &str) -> Result<Vec<Table>> {
    let content = read_input(input)?;
    let tables = tablesmith::load_schema(&content)?;
    if tables.is_empty() {
        eprintln!("{} no tables found in {}", "⚠".yellow(), input);
    }
    Ok(tables)
}

pub(crate) fn write_output(path: Option<&str>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write {}", path))?;
            println!("{} Wrote {}", "✓".green(), path.cyan());
        }
        None => print!("{}", text),
    }
    Ok(())
}

pub(crate) fn print_tables(tables: &[Table]) {
    if tables.is_empty() {
        println!("{}", "(no tables)".dimmed());
        return;
    }

    for table in tables {
        println!("{} {}", "table".cyan(), table.name.white().bold());
        for col in &table.columns {
            let mut flags = Vec::new();
            if col.primary_key {
                flags.push("pk".to_string());
            }
            if col.auto_increment {
                flags.push("auto".to_string());
            }
            if col.required {
                flags.push("required".to_string());
            }
            if col.unique {
                flags.push("unique".to_string());
            }
            if let Some(ref r) = col.reference {
                flags.push(format!("→ {}", r));
            }
            if let Some(ref d) = col.default_value {
                flags.push(format!("= {}", d));
            }
            println!(
                "  • {:20} {:15} {}",
                col.name.white(),
                col.typ.yellow(),
                flags.join(" ").dimmed()
            );
        }
        for rel in &table.relations {
            println!(
                "  {} {}.{} {:?} {}.{}",
                "↔".cyan(),
                rel.source_table,
                rel.source_column,
                rel.relation_type,
                rel.target_table,
                rel.target_column
            );
        }
    }
}

fn show_types() {
    println!("{}", "🧱 tablesmith Type Reference".cyan().bold());
    println!();
    println!(
        "{:15} {:15} {:12} {}",
        "Type".white().bold(),
        "SQL".white().bold(),
        "TypeScript".white().bold(),
        "Java".white().bold()
    );
    println!("{}", "─".repeat(60).dimmed());

    for (word, canonical) in types::known_types() {
        println!(
            "{:15} {:15} {:12} {}",
            word.cyan().bold(),
            canonical.yellow(),
            tablesmith::export::typescript::ts_type(canonical).white(),
            tablesmith::export::java::java_type(canonical).dimmed()
        );
    }

    println!();
    println!("{}", "Flags:".cyan().bold());
    for (flag, meaning) in [
        ("clé primaire", "primary key"),
        ("auto", "auto increment"),
        ("requis", "required (NOT NULL)"),
        ("unique", "unique"),
        ("référence: t.c", "reference to another table"),
        ("par défaut: v", "default value (maintenant / aujourd'hui → CURRENT_TIMESTAMP)"),
    ] {
        println!("  {:18} {}", flag.yellow(), meaning.dimmed());
    }
}
