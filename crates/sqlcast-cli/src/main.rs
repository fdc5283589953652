//! sqlcast CLI
//!
//! Prints vendor DDL for a JSON schema file, or applies it to a SQLite
//! database.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use sqlcast_core::ddl::{render_script, DdlAssembler, DdlOptions};
use sqlcast_core::dialect::{self, ActionPolicy, Vendor};
use sqlcast_core::schema::Schema;
use sqlcast_exec::BatchExecutor;

/// Multi-vendor SQL DDL compiler.
#[derive(Parser)]
#[command(name = "sqlcast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the DDL script for a schema.
    Ddl {
        /// Target vendor (db2, mysql, oracle, postgres, sqlserver, sqlite).
        #[arg(short, long, env = "SQLCAST_VENDOR")]
        vendor: String,

        /// JSON schema file.
        #[arg(short, long)]
        schema: PathBuf,

        /// Print the drop script instead of the create script.
        #[arg(long)]
        drop: bool,

        /// Emit CREATE TABLE IF NOT EXISTS where supported.
        #[arg(long)]
        if_not_exists: bool,

        /// Fail on referential actions the vendor cannot express.
        #[arg(long)]
        strict: bool,
    },

    /// Create a schema in a SQLite database inside one transaction.
    Apply {
        /// Database URL.
        #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:db.sqlite3")]
        database: String,

        /// JSON schema file.
        #[arg(short, long)]
        schema: PathBuf,
    },

    /// List supported vendors.
    Vendors,
}

fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    let text = std::fs::read_to_string(path)?;
    let schema: Schema = serde_json::from_str(&text)?;
    debug!(
        path = %path.display(),
        tables = schema.tables.len(),
        "Loaded schema"
    );
    Ok(schema)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Ddl {
            vendor,
            schema,
            drop,
            if_not_exists,
            strict,
        } => {
            let dialect = dialect::lookup(&vendor)?;
            let schema = load_schema(&schema)?;

            let mut options = DdlOptions::new().if_not_exists(if_not_exists);
            if strict {
                options = options.with_action_policy(ActionPolicy::Reject);
            }
            let ddl = DdlAssembler::new(dialect)
                .with_options(options)
                .schema(&schema)?;

            let statements = if drop { ddl.drop() } else { ddl.create() };
            info!(
                vendor = %dialect.vendor(),
                tables = ddl.scripts().len(),
                statements = statements.len(),
                "Generated DDL"
            );
            print!("{}", render_script(dialect, &statements));
        }

        Commands::Apply { database, schema } => {
            let schema = load_schema(&schema)?;
            let ddl = DdlAssembler::new(Vendor::Sqlite.dialect()).schema(&schema)?;

            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect(&database)
                .await?;
            let mut executor = BatchExecutor::new(pool.acquire().await?);
            let summary = executor.execute_in_transaction(ddl.create()).await?;
            info!(
                database = %database,
                statements = summary.statements,
                "Schema applied"
            );
        }

        Commands::Vendors => {
            println!("{:<12}{:<14}{:<10}", "VENDOR", "PLACEHOLDER", "ACTIONS");
            println!("{:-<36}", "");
            for (name, dialect) in dialect::registry() {
                println!(
                    "{:<12}{:<14}{:<10}",
                    name,
                    dialect.placeholder(1),
                    format!("{:?}", dialect.action_policy())
                );
            }
        }
    }

    Ok(())
}
