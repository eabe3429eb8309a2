//! stress CLI - Command-line interface for StressScore
//!
//! Commands:
//! - analyze: Score inputs from a file or stdin (batch mode)
//! - run: Score NDJSON lines from stdin as they arrive (streaming mode)
//! - validate: Validate input documents
//! - doctor: Diagnose configuration and environment
//! - schema: Print input/output schema information

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use stress_score::schema::{InputAdapter, StressInput, SCHEMA_VERSION};
use stress_score::scorer::{
    BEHAVIORAL_SHARE, BEHAVIORAL_WEIGHTS, PHYSIOLOGICAL_SHARE, PHYSIOLOGICAL_WEIGHTS,
};
use stress_score::{ComputeError, StressProcessor, PRODUCER_NAME, STRESS_VERSION};

/// stress - Rule-based stress scoring from health snapshots
#[derive(Parser)]
#[command(name = "stress")]
#[command(version = STRESS_VERSION)]
#[command(about = "Score physiological and behavioral snapshots for stress", long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score inputs from a file or stdin (batch mode)
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Emit full reports instead of bare analyses
        #[arg(long)]
        report: bool,

        /// Score inputs without rejecting negative or non-finite values
        #[arg(long)]
        skip_validation: bool,
    },

    /// Score NDJSON lines from stdin as they arrive (streaming mode)
    Run {
        /// Emit full reports instead of bare analyses
        #[arg(long)]
        report: bool,

        /// Score inputs without rejecting negative or non-finite values
        #[arg(long)]
        skip_validation: bool,

        /// Buffer output instead of flushing after each record
        #[arg(long)]
        no_flush: bool,
    },

    /// Validate input documents
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one input per line)
    Ndjson,
    /// JSON array of inputs
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one result per line)
    Ndjson,
    /// JSON array of results
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (stress.input.v1)
    Input,
    /// Output schema (stress analysis)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable
fn init_logging(verbose: bool) {
    build_subscriber(verbose, atty::is(atty::Stream::Stderr), io::stderr).init();
}

/// Colors only when the writer is a terminal
fn build_subscriber<W>(
    verbose: bool,
    ansi: bool,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .finish()
}

fn run(cli: Cli) -> Result<(), StressCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            input_format,
            output_format,
            report,
            skip_validation,
        } => cmd_analyze(
            &input,
            &output,
            input_format,
            output_format,
            report,
            skip_validation,
        ),

        Commands::Run {
            report,
            skip_validation,
            no_flush,
        } => cmd_run(report, skip_validation, !no_flush),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Doctor { json } => cmd_doctor(json),

        Commands::Schema {
            schema_type,
            json_schema,
        } => cmd_schema(schema_type, json_schema),
    }
}

fn cmd_analyze(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    report: bool,
    skip_validation: bool,
) -> Result<(), StressCliError> {
    let input_data = read_input(input)?;
    let inputs = parse_inputs(&input_data, &input_format)?;

    if inputs.is_empty() {
        return Err(StressCliError::NoInputs);
    }
    info!(count = inputs.len(), "scoring inputs");

    let processor = StressProcessor::new().validation(!skip_validation);
    let results = score_all(&processor, &inputs, report)?;
    let output_data = format_output(&results, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_run(report: bool, skip_validation: bool, flush: bool) -> Result<(), StressCliError> {
    let processor = StressProcessor::new().validation(!skip_validation);

    if atty::is(atty::Stream::Stdin) {
        eprintln!("Reading stress.input.v1 documents from stdin, one per line (Ctrl-D to finish)");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut scored = 0usize;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let input: StressInput = serde_json::from_str(trimmed).map_err(|e| {
            StressCliError::ParseError(format!("Failed to parse input: {}", e))
        })?;

        let result = score_one(&processor, &input, report)?;
        writeln!(stdout, "{}", serde_json::to_string(&result)?)?;
        if flush {
            stdout.flush()?;
        }
        scored += 1;
    }

    stdout.flush()?;
    debug!(scored, "stdin closed");
    Ok(())
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), StressCliError> {
    let input_data = read_input(input)?;
    let inputs = parse_inputs(&input_data, &input_format)?;

    let results = InputAdapter::validate_inputs(&inputs);

    let report = ValidationReport {
        total_inputs: inputs.len(),
        valid_inputs: inputs.len() - results.len(),
        invalid_inputs: results.len(),
        errors: results
            .iter()
            .map(|r| ValidationErrorDetail {
                index: r.index,
                input_id: r.input_id.clone(),
                error: r.problem.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total inputs:   {}", report.total_inputs);
        println!("Valid inputs:   {}", report.valid_inputs);
        println!("Invalid inputs: {}", report.invalid_inputs);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - Input {} (index {}): {}",
                    err.input_id.as_deref().unwrap_or("unknown"),
                    err.index,
                    err.error
                );
            }
        }
    }

    if report.invalid_inputs > 0 {
        Err(StressCliError::ValidationFailed(report.invalid_inputs))
    } else {
        Ok(())
    }
}

fn cmd_doctor(json: bool) -> Result<(), StressCliError> {
    let mut checks: Vec<DoctorCheck> = vec![
        DoctorCheck {
            name: "stress_version".to_string(),
            status: CheckStatus::Ok,
            message: format!("StressScore version {}", STRESS_VERSION),
        },
        DoctorCheck {
            name: "schema_version".to_string(),
            status: CheckStatus::Ok,
            message: format!("Input schema: {}", SCHEMA_VERSION),
        },
    ];

    checks.push(weight_check(
        "physiological_weights",
        PHYSIOLOGICAL_WEIGHTS.total(),
    ));
    checks.push(weight_check("behavioral_weights", BEHAVIORAL_WEIGHTS.total()));
    checks.push(weight_check(
        "overall_shares",
        PHYSIOLOGICAL_SHARE + BEHAVIORAL_SHARE,
    ));

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (streaming mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: STRESS_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("StressScore Doctor Report");
        println!("=========================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(StressCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn weight_check(name: &str, total: f64) -> DoctorCheck {
    if (total - 1.0).abs() < 1e-9 {
        DoctorCheck {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: format!("Weights sum to {:.2}", total),
        }
    } else {
        DoctorCheck {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: format!("Weights sum to {} instead of 1.0", total),
        }
    }
}

fn cmd_schema(schema_type: SchemaType, json_schema: bool) -> Result<(), StressCliError> {
    match schema_type {
        SchemaType::Input => {
            if json_schema {
                println!("{}", get_input_json_schema());
            } else {
                println!("Input Schema: {}", SCHEMA_VERSION);
                println!();
                println!("Each input document may contain:");
                println!();
                println!("- inputId: optional caller identifier, echoed in reports");
                println!("- physiological: {{ heartRate, bloodPressureSystolic, bloodPressureDiastolic,");
                println!("                   respiratoryRate, skinConductance, bodyTemperature }}");
                println!("- behavioral: {{ sleepHours, sleepQuality, activityLevel, screenTime,");
                println!("                socialInteractions, workHours }}");
                println!();
                println!("A missing section falls back to default values; at least one is required.");
            }
        }
        SchemaType::Output => {
            if json_schema {
                println!("{}", get_output_json_schema());
            } else {
                println!("Output Schema: stress analysis");
                println!();
                println!("- overallStressLevel: 0-1, two decimals");
                println!("- stressCategory: Low | Moderate | High | Severe");
                println!("- physiologicalScore: 0-1, two decimals");
                println!("- behavioralScore: 0-1, two decimals");
                println!("- recommendations: ordered list of suggestions (never empty)");
                println!("- riskFactors: ordered list of triggered risk labels");
                println!();
                println!("With --report the analysis is wrapped with reportVersion, producer,");
                println!("computedAtUtc, inputs and per-metric components.");
            }
        }
    }

    Ok(())
}

// Helper functions

fn read_input(input: &Path) -> Result<String, StressCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn parse_inputs(data: &str, format: &InputFormat) -> Result<Vec<StressInput>, StressCliError> {
    let inputs = match format {
        InputFormat::Ndjson => InputAdapter::parse_ndjson(data)?,
        InputFormat::Json => InputAdapter::parse_array(data)?,
    };
    Ok(inputs)
}

fn score_one(
    processor: &StressProcessor,
    input: &StressInput,
    report: bool,
) -> Result<serde_json::Value, StressCliError> {
    let value = if report {
        serde_json::to_value(processor.process(input)?)?
    } else {
        serde_json::to_value(processor.analyze_input(input)?)?
    };
    Ok(value)
}

fn score_all(
    processor: &StressProcessor,
    inputs: &[StressInput],
    report: bool,
) -> Result<Vec<serde_json::Value>, StressCliError> {
    inputs
        .iter()
        .map(|input| score_one(processor, input, report))
        .collect()
}

fn format_output(
    results: &[serde_json::Value],
    format: &OutputFormat,
) -> Result<String, StressCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for result in results {
                lines.push(serde_json::to_string(result)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(results)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(results)?),
    }
}

fn get_input_json_schema() -> String {
    let number = serde_json::json!({ "type": "number" });
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": SCHEMA_VERSION,
        "description": "StressScore input document",
        "type": "object",
        "properties": {
            "inputId": { "type": "string" },
            "physiological": {
                "type": "object",
                "required": [
                    "heartRate", "bloodPressureSystolic", "bloodPressureDiastolic",
                    "respiratoryRate", "skinConductance", "bodyTemperature"
                ],
                "properties": {
                    "heartRate": number.clone(),
                    "bloodPressureSystolic": number.clone(),
                    "bloodPressureDiastolic": number.clone(),
                    "respiratoryRate": number.clone(),
                    "skinConductance": number.clone(),
                    "bodyTemperature": number.clone()
                }
            },
            "behavioral": {
                "type": "object",
                "required": [
                    "sleepHours", "sleepQuality", "activityLevel",
                    "screenTime", "socialInteractions", "workHours"
                ],
                "properties": {
                    "sleepHours": number.clone(),
                    "sleepQuality": number.clone(),
                    "activityLevel": number.clone(),
                    "screenTime": number.clone(),
                    "socialInteractions": number.clone(),
                    "workHours": number.clone()
                }
            }
        },
        "anyOf": [
            { "required": ["physiological"] },
            { "required": ["behavioral"] }
        ]
    })
    .to_string()
}

fn get_output_json_schema() -> String {
    let score = serde_json::json!({ "type": "number", "minimum": 0, "maximum": 1 });
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "stress.analysis",
        "description": "StressScore analysis",
        "type": "object",
        "required": [
            "overallStressLevel", "stressCategory", "physiologicalScore",
            "behavioralScore", "recommendations", "riskFactors"
        ],
        "properties": {
            "overallStressLevel": score.clone(),
            "stressCategory": {
                "type": "string",
                "enum": ["Low", "Moderate", "High", "Severe"]
            },
            "physiologicalScore": score.clone(),
            "behavioralScore": score,
            "recommendations": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 1
            },
            "riskFactors": { "type": "array", "items": { "type": "string" } }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum StressCliError {
    Io(io::Error),
    Compute(ComputeError),
    Json(serde_json::Error),
    NoInputs,
    ValidationFailed(usize),
    DoctorFailed,
    ParseError(String),
}

impl From<io::Error> for StressCliError {
    fn from(e: io::Error) -> Self {
        StressCliError::Io(e)
    }
}

impl From<ComputeError> for StressCliError {
    fn from(e: ComputeError) -> Self {
        StressCliError::Compute(e)
    }
}

impl From<serde_json::Error> for StressCliError {
    fn from(e: serde_json::Error) -> Self {
        StressCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<StressCliError> for CliError {
    fn from(e: StressCliError) -> Self {
        match e {
            StressCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            StressCliError::Compute(ComputeError::InvalidInput(e)) => CliError {
                code: "VALIDATION_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'stress validate' for details, or pass --skip-validation".to_string()),
            },
            StressCliError::Compute(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(format!("Ensure input matches the {} schema", SCHEMA_VERSION)),
            },
            StressCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            StressCliError::NoInputs => CliError {
                code: "NO_INPUTS".to_string(),
                message: "No inputs found".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            StressCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} inputs failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            StressCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
            StressCliError::ParseError(msg) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Check input format".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct ValidationReport {
    total_inputs: usize,
    valid_inputs: usize,
    invalid_inputs: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(Serialize)]
struct ValidationErrorDetail {
    index: usize,
    input_id: Option<String>,
    error: String,
}

#[derive(Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(Serialize)]
enum CheckStatus {
    Ok,
    Error,
}
