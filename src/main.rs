use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use sqlreport::error::SqlReportError;
use sqlreport::report::{self, ParamPolicy, SqlDialect};
use sqlreport::{check, check_reports, logging, params, util, CheckOptions};

#[derive(Parser)]
#[command(name = "sqlreport")]
#[command(author, version, about = "Check parameterized SQL report definitions")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// SQL given either as a file or inline
#[derive(Args)]
#[group(required = true, multiple = false)]
struct SqlInput {
    /// Path to a file containing the SQL
    #[arg(short = 'f', long)]
    sql_file: Option<PathBuf>,

    /// SQL text
    #[arg(short, long)]
    query: Option<String>,
}

impl SqlInput {
    fn read(&self) -> Result<String> {
        match (&self.sql_file, &self.query) {
            (Some(path), _) => read_sql_file(path),
            (None, Some(query)) => Ok(query.clone()),
            (None, None) => Ok(String::new()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the named parameters a SQL text refers to
    Extract {
        #[command(flatten)]
        input: SqlInput,
    },

    /// Validate a single report definition file
    Validate {
        /// Path to the .report.xml file
        #[arg(short, long)]
        report: PathBuf,

        /// Parameter mismatch policy (strict, warn)
        #[arg(short, long, default_value = "strict")]
        policy: ParamPolicy,
    },

    /// Suggest report columns from a query's projection
    Columns {
        #[command(flatten)]
        input: SqlInput,

        /// SQL dialect (generic, mysql, postgresql, mssql, sqlite)
        #[arg(short, long, default_value = "generic")]
        dialect: SqlDialect,
    },

    /// Create a report definition from a SQL file
    Scaffold {
        /// Path to the SQL file
        #[arg(short = 'f', long)]
        sql_file: PathBuf,

        /// Report name
        #[arg(short, long)]
        name: String,

        /// Output path (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// SQL dialect (generic, mysql, postgresql, mssql, sqlite)
        #[arg(short, long, default_value = "generic")]
        dialect: SqlDialect,
    },

    /// Check every report in a .rptproj project
    Check {
        /// Path to the .rptproj file
        #[arg(short, long)]
        project: PathBuf,

        /// Override the project's parameter mismatch policy
        #[arg(long)]
        policy: Option<ParamPolicy>,
    },
}

fn read_sql_file(path: &Path) -> Result<String> {
    let sql = util::read_file_with_encoding_fallback(path).map_err(|e| {
        SqlReportError::SqlFileReadError {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    Ok(sql)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Extract { input } => {
            let sql = input.read()?;
            for name in params::extract_params(&sql) {
                println!("{}", name);
            }
        }
        Commands::Validate {
            report: report_path,
            policy,
        } => {
            let definition = report::parse_report_file(&report_path)?;
            let issues = report::validate_definition(&definition, policy);
            if issues.is_empty() {
                println!("{}: OK", definition.label());
            }
            for issue in &issues {
                println!("{}: {}", definition.label(), issue);
            }
            if issues.iter().any(|i| i.is_error()) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Columns { input, dialect } => {
            let sql = input.read()?;
            let suggestion = report::suggest_columns(&sql, dialect)?;
            for column in &suggestion.columns {
                println!("{}", column.field_name);
            }
            if suggestion.wildcards > 0 {
                eprintln!(
                    "note: {} wildcard item(s) cannot be resolved without a schema",
                    suggestion.wildcards
                );
            }
        }
        Commands::Scaffold {
            sql_file,
            name,
            output,
            dialect,
        } => {
            let sql = read_sql_file(&sql_file)?;
            let definition = report::scaffold_definition(&name, &sql, dialect)?;
            match output {
                Some(path) => {
                    report::write_report_file(&path, &definition)?;
                    if cli.verbose {
                        println!("Created report definition: {}", path.display());
                    }
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut lock = stdout.lock();
                    report::write_report_xml(&mut lock, &definition)?;
                    lock.flush()?;
                }
            }
        }
        Commands::Check { project, policy } => {
            let result = check_reports(CheckOptions {
                project_path: project,
                policy,
                verbose: cli.verbose,
            })?;
            check::report::print_report(&result);
            if !result.is_ok() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
