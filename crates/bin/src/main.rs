//! KT&G financial statements export CLI binary.
//!
//! Presents the year selection form on the terminal and saves the merged
//! consolidated balance sheet and income statement as one CSV file.

mod form;

use clap::Parser;
use form::{FormAction, YearForm};
use indicatif::{ProgressBar, ProgressStyle};
use ktng::data::{BusinessYear, ExportRequest};
use ktng::output::DEFAULT_COLLATION_LOCALE;
use ktng::{ExportConfig, ExportController, ExportState, ExportSummary, FinancialsSource, Submission};
use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ktng-export")]
#[command(about = "Download KT&G consolidated financial statements (CFS + CIS) as one CSV file", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the financials backend
    #[arg(long, env = "KTNG_API_BASE_URL")]
    base_url: Option<String>,

    /// Directory the CSV is saved to (default: download directory)
    #[arg(long, env = "KTNG_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Locale used to order account names
    #[arg(long, env = "KTNG_COLLATION_LOCALE", default_value = DEFAULT_COLLATION_LOCALE)]
    locale: String,

    /// First business year; with --end-year, export once and exit
    #[arg(long, requires = "end_year")]
    start_year: Option<BusinessYear>,

    /// Last business year; with --start-year, export once and exit
    #[arg(long, requires = "start_year")]
    end_year: Option<BusinessYear>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn export_config(&self) -> ExportConfig {
        let defaults = ExportConfig::default();
        ExportConfig {
            base_url: self.base_url.clone(),
            output_dir: self.output_dir.clone().unwrap_or(defaults.output_dir),
            collation_locale: self.locale.clone(),
            ..defaults
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let controller = ExportController::from_config(&cli.export_config())?;
    tracing::info!(
        version = ktng::VERSION,
        output_dir = %controller.delivery().output_dir().display(),
        "ktng-export started"
    );

    match (cli.start_year, cli.end_year) {
        (Some(start), Some(end)) => export_once(&controller, ExportRequest::new(start, end)).await,
        _ => run_form(&controller).await,
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn export_once<S: FinancialsSource>(
    controller: &ExportController<S>,
    request: ExportRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    match submit_with_spinner(controller, request).await {
        Submission::Delivered(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Submission::Failed { message, .. } => Err(message.into()),
        Submission::Rejected => Err("an export is already in progress".into()),
    }
}

async fn run_form<S: FinancialsSource>(
    controller: &ExportController<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    print_header();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let mut form = YearForm::default();

    loop {
        let request = match form.fill(&mut input, &mut out)? {
            FormAction::Submit(request) => request,
            FormAction::Quit => break,
        };

        match submit_with_spinner(controller, request).await {
            Submission::Delivered(summary) => print_summary(&summary),
            Submission::Failed { .. } => print_error(&controller.state()),
            Submission::Rejected => println!("An export is already in progress."),
        }
        println!();
    }

    Ok(())
}

async fn submit_with_spinner<S: FinancialsSource>(
    controller: &ExportController<S>,
    request: ExportRequest,
) -> Submission {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(loading_message(&request));

    let outcome = controller.submit(request).await;
    pb.finish_and_clear();
    outcome
}

fn loading_message(request: &ExportRequest) -> String {
    format!("Generating data for {}...", request)
}

fn print_header() {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", "KT&G FINANCIAL STATEMENTS DOWNLOAD");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Fetches the consolidated statement of financial position and the");
    println!("consolidated income statement from the electronic disclosure system");
    println!("and saves them together as one CSV file.\n");
    println!("Choose the period to download (Enter keeps the value in brackets, q quits).");
}

fn print_summary(summary: &ExportSummary) {
    println!("Saved {}", summary.path.display());
    println!(
        "  {} rows: {} balance sheet, {} income statement{}",
        summary.rows,
        summary.balance_sheet_rows,
        summary.income_statement_rows,
        if summary.other_rows > 0 {
            format!(", {} other", summary.other_rows)
        } else {
            String::new()
        }
    );
    println!("  Years: {}", summary.years.join(", "));
}

fn print_error(state: &ExportState) {
    if let Some(message) = state.error_message() {
        println!("┌─ Error ────────────────────────────────────────────────────────");
        println!("│ {}", message);
        println!("└────────────────────────────────────────────────────────────────");
    }
}
