use carcost::application::engine::{CalculatorEngine, EngineRequest};
use carcost::domain::catalog::{FinanceOption, Vehicle};
use carcost::domain::ports::{FinanceOptionStore, VehicleStore};
use carcost::domain::rates::RateBook;
use carcost::infrastructure::in_memory::{
    InMemoryCalculationLog, InMemoryFinanceOptionStore, InMemoryVehicleStore,
};
use carcost::interfaces::csv::record_reader::{RecordReader, RequestRecord};
use carcost::interfaces::report::ResponseWriter;
use chrono::{Datelike, Utc};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input calculation requests CSV file
    input: PathBuf,

    /// Vehicle catalog CSV, needed by monthly-payment and total-cost requests
    #[arg(long)]
    vehicles: Option<PathBuf>,

    /// Finance option catalog CSV, needed by monthly-payment requests
    #[arg(long)]
    finance_options: Option<PathBuf>,

    /// Reference year for vehicle age (defaults to the current UTC year)
    #[arg(long)]
    year: Option<i32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("carcost=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let reference_year = cli.year.unwrap_or_else(|| Utc::now().year());

    let vehicle_store = InMemoryVehicleStore::new();
    if let Some(path) = &cli.vehicles {
        let file = File::open(path).into_diagnostic()?;
        for record in RecordReader::new(file).records::<Vehicle>() {
            let vehicle = record.into_diagnostic()?;
            vehicle_store.store(vehicle).await.into_diagnostic()?;
        }
    }

    let option_store = InMemoryFinanceOptionStore::new();
    if let Some(path) = &cli.finance_options {
        let file = File::open(path).into_diagnostic()?;
        for record in RecordReader::new(file).records::<FinanceOption>() {
            let option = record.into_diagnostic()?;
            option_store.store(option).await.into_diagnostic()?;
        }
    }

    let engine = CalculatorEngine::new(
        Box::new(vehicle_store),
        Box::new(option_store),
        Box::new(InMemoryCalculationLog::new()),
        RateBook::default(),
        reference_year,
    );

    // Process requests
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = RecordReader::new(file);
    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    for record in reader.records::<RequestRecord>() {
        let request = match record.and_then(EngineRequest::try_from) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("Error reading request: {e}");
                continue;
            }
        };
        match engine.process(request).await {
            Ok(response) => writer.write(&response).into_diagnostic()?,
            Err(e) => eprintln!("Error processing request: {e}"),
        }
    }

    Ok(())
}
