use std::process::ExitCode;

use clap::Parser;
use inventory_api_tester::{config, harness::ApiTester, scenarios};

/// Inventory API Tester - smoke tests for the inventory management backend
///
/// Settings come from INVENTORY_API_* environment variables (a .env file is
/// honoured); flags given here take precedence.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root URL of the API; endpoints are appended to it
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long)]
    token: Option<String>,

    /// Per-request timeout in seconds (HTTP client default when omitted)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// POST init-db before running the resource scenarios
    #[arg(long)]
    init_db: bool,
}

impl From<Cli> for config::CliConfig {
    fn from(cli: Cli) -> Self {
        config::CliConfig {
            base_url: cli.base_url,
            token: cli.token,
            timeout_secs: cli.timeout_secs,
            init_db: cli.init_db,
        }
    }
}

// Requests are issued strictly one after another
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match config::HarnessConfig::load(cli.into()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "Testing {} (init_db={}, timeout={:?}s)",
        config.base_url,
        config.init_db,
        config.timeout_secs
    );

    let mut tester = match ApiTester::new(&config) {
        Ok(tester) => tester,
        Err(e) => {
            eprintln!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("\n===== TESTING OIL INVENTORY MANAGEMENT SYSTEM API =====\n");
    let plan = scenarios::plan(&config);
    let summary = scenarios::run_all(&mut tester, &plan).await;

    println!(
        "\n📊 Tests passed: {}/{}",
        summary.tests_passed, summary.tests_run
    );
    ExitCode::from(summary.exit_code())
}
