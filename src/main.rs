use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bps_dataexim::config::Config;
use bps_dataexim::display::render_table;
use bps_dataexim::exporter::ExcelExporter;
use bps_dataexim::fetch_error::FetchError;
use bps_dataexim::fetcher::{HsGranularity, PeriodKind, RequestParams, TradeDataFetcher};
use bps_dataexim::normalizer::{normalize_records, TradeDirection};

#[derive(Clone, Copy, ValueEnum)]
enum SumberArg {
    Export,
    Import,
}

impl From<SumberArg> for TradeDirection {
    fn from(arg: SumberArg) -> Self {
        match arg {
            SumberArg::Export => TradeDirection::Export,
            SumberArg::Import => TradeDirection::Import,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PeriodeArg {
    Monthly,
    Annually,
}

impl From<PeriodeArg> for PeriodKind {
    fn from(arg: PeriodeArg) -> Self {
        match arg {
            PeriodeArg::Monthly => PeriodKind::Monthly,
            PeriodeArg::Annually => PeriodKind::Annually,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum JenisHsArg {
    TwoDigit,
    Full,
}

impl From<JenisHsArg> for HsGranularity {
    fn from(arg: JenisHsArg) -> Self {
        match arg {
            JenisHsArg::TwoDigit => HsGranularity::TwoDigit,
            JenisHsArg::Full => HsGranularity::Full,
        }
    }
}

#[derive(Parser)]
#[command(name = "bps-dataexim")]
#[command(about = "Fetch BPS foreign trade data (export/import), normalize it and export to Excel", long_about = None)]
struct Cli {
    /// Data source: export or import trade records
    #[arg(long, value_enum, default_value = "export")]
    sumber: SumberArg,

    /// Reporting period of the data
    #[arg(long, value_enum, default_value = "monthly")]
    periode: PeriodeArg,

    /// HS code(s), semicolon-delimited for multiple (e.g. "2601;2602")
    #[arg(long, default_value = "10")]
    kodehs: String,

    /// HS code granularity
    #[arg(long, value_enum, default_value = "two-digit")]
    jenishs: JenisHsArg,

    /// Year of the data
    #[arg(long, default_value = "2024")]
    tahun: String,

    /// BPS web API key
    #[arg(long, env = "BPS_API_KEY")]
    key: Option<String>,

    /// Write the normalized table to this .xlsx file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,bps_dataexim=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    let Some(api_key) = cli.key.clone().or_else(|| config.api_key.clone()) else {
        error!("No API key given (use --key or set BPS_API_KEY)");
        std::process::exit(1);
    };

    let direction: TradeDirection = cli.sumber.into();
    let params = RequestParams {
        direction,
        period: cli.periode.into(),
        hs_codes: cli.kodehs.clone(),
        granularity: cli.jenishs.into(),
        year: cli.tahun.clone(),
        api_key,
    };

    let fetcher = TradeDataFetcher::new(config.base_url.clone());
    info!("Fetching trade data from {}", config.base_url);

    let records = match fetcher.fetch_records(&params).await {
        Ok(records) => records,
        Err(FetchError::HttpStatus { status, body }) => {
            error!("Error {}: {}", status, body);
            std::process::exit(1);
        }
        Err(FetchError::InvalidJson(body)) => {
            error!("Response was not valid JSON: {}", body);
            std::process::exit(1);
        }
        Err(FetchError::MissingData) => {
            warn!("No 'data' field found in response. Check API result.");
            std::process::exit(1);
        }
        Err(e) => {
            error!("Fetch failed: {}", e);
            std::process::exit(1);
        }
    };

    info!("Data retrieved successfully ({} records)", records.len());

    let rows = normalize_records(&records, direction);
    println!("{}", render_table(&rows));

    if let Some(path) = &cli.output {
        ExcelExporter::write_to_file(&rows, path)?;
    }

    Ok(())
}
