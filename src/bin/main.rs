//! bsonrel CLI - inspect the relational view of document schemas
//!
//! Usage:
//!   bsonrel columns <schema.json> [--table <name>] [--order declared] [--format json]
//!   bsonrel column-rows <schema.json> --database <db> --table <name> [--column-pattern <like>]
//!   bsonrel types
//!
//! Examples:
//!   bsonrel columns result_schema.json
//!   bsonrel columns orders.json --table orders --versioned
//!   RUST_LOG=bsonrel=trace bsonrel columns result_schema.json

use bsonrel::catalog::{self, fields, CatalogRow, ListingFilter, TableSchema};
use bsonrel::config::Settings;
use bsonrel::metadata::{FieldOrder, ResultSetMetadata};
use bsonrel::render::{render_columns, render_rows};
use bsonrel::schema::{self, ObjectSchema, SchemaNode};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "bsonrel")]
#[command(about = "bsonrel - relational metadata for document-store schemas")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to $BSONREL_CONFIG or ./bsonrel.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a result schema into its ordered column catalog
    Columns {
        /// Path to the JSON schema file
        file: PathBuf,

        /// Treat the file as one collection's schema with this name
        #[arg(short, long)]
        table: Option<String>,

        /// The file holds a `{ok, schema: {version, jsonSchema}}` envelope
        #[arg(long)]
        versioned: bool,

        /// Column order within each datasource (overrides the config)
        #[arg(short, long)]
        order: Option<OrderArg>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the getColumns catalog rows of one collection schema
    ColumnRows {
        /// Path to the JSON schema file
        file: PathBuf,

        /// Database (catalog) name
        #[arg(short, long)]
        database: String,

        /// Collection (table) name
        #[arg(short, long)]
        table: String,

        /// SQL LIKE pattern restricting column names
        #[arg(long)]
        column_pattern: Option<String>,

        /// The file holds a `{ok, schema: {version, jsonSchema}}` envelope
        #[arg(long)]
        versioned: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the type table as getTypeInfo rows
    Types {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, ValueEnum)]
enum OrderArg {
    Alphabetical,
    Declared,
}

impl From<OrderArg> for FieldOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Alphabetical => FieldOrder::Alphabetical,
            OrderArg::Declared => FieldOrder::Declared,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Aligned plain-text table
    Text,
    /// One JSON document
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging.level);

    match cli.command {
        Commands::Columns {
            file,
            table,
            versioned,
            order,
            format,
        } => {
            let order = order.map_or(settings.catalog.field_order, FieldOrder::from);
            cmd_columns(&file, table, versioned, order, format)
        }
        Commands::ColumnRows {
            file,
            database,
            table,
            column_pattern,
            versioned,
            format,
        } => cmd_column_rows(
            &settings,
            &file,
            database,
            table,
            column_pattern,
            versioned,
            format,
        ),
        Commands::Types { format } => cmd_types(format),
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn read_schema(file: &Path, versioned: bool) -> Result<SchemaNode, String> {
    let source = fs::read_to_string(file)
        .map_err(|e| format!("Error reading file '{}': {}", file.display(), e))?;

    let parsed = if versioned {
        schema::parse_versioned(&source).map(|v| {
            debug!(version = v.version, "read versioned schema");
            v.schema
        })
    } else {
        schema::parse_schema_str(&source)
    };
    parsed.map_err(|e| format!("Schema error in '{}': {}", file.display(), e))
}

fn cmd_columns(
    file: &Path,
    table: Option<String>,
    versioned: bool,
    order: FieldOrder,
    format: OutputFormat,
) -> ExitCode {
    let mut node = match read_schema(file, versioned) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(name) = table {
        node = ObjectSchema::new().with_property(name, node).into();
    }

    let metadata = match ResultSetMetadata::with_field_order(&node, order) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Metadata error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match format {
        OutputFormat::Text => print!("{}", render_columns(&metadata)),
        OutputFormat::Json => match serde_json::to_string_pretty(metadata.columns()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}

fn cmd_column_rows(
    settings: &Settings,
    file: &Path,
    database: String,
    table: String,
    column_pattern: Option<String>,
    versioned: bool,
    format: OutputFormat,
) -> ExitCode {
    let node = match read_schema(file, versioned) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let object = match node.expect_object(&table) {
        Ok(o) => o.clone(),
        Err(e) => {
            eprintln!("Schema error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let filter = settings
        .catalog
        .exclusions()
        .map_err(|e| e.to_string())
        .and_then(|ex| {
            ListingFilter::new(ex)
                .with_column_pattern(column_pattern.as_deref())
                .map_err(|e| e.to_string())
        });
    let filter = match filter {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Filter error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tables = [TableSchema::new(database, table, object)];
    match catalog::column_rows(&tables, &filter) {
        Ok(rows) => print_rows(
            &rows,
            &[
                fields::TABLE_NAME,
                fields::COLUMN_NAME,
                fields::ORDINAL_POSITION,
                fields::DATA_TYPE,
                fields::TYPE_NAME,
                fields::COLUMN_SIZE,
                fields::IS_NULLABLE,
            ],
            format,
        ),
        Err(e) => {
            eprintln!("Catalog error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_types(format: OutputFormat) -> ExitCode {
    print_rows(
        &catalog::type_info_rows(),
        &[
            fields::TYPE_NAME,
            fields::DATA_TYPE,
            fields::PRECISION,
            fields::CASE_SENSITIVE,
            fields::SEARCHABLE,
            fields::MINIMUM_SCALE,
            fields::MAXIMUM_SCALE,
            fields::NUM_PREC_RADIX,
        ],
        format,
    )
}

fn print_rows(rows: &[CatalogRow], columns: &[&str], format: OutputFormat) -> ExitCode {
    match format {
        OutputFormat::Text => {
            print!("{}", render_rows(rows, columns));
            ExitCode::SUCCESS
        }
        OutputFormat::Json => match serde_json::to_string_pretty(rows) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}
