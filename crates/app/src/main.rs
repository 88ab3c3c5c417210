use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock};
use storage::HttpConfig;
use tracing::info;
use ui::{App, UiApp, build_app_context};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBackend { raw: String },
    InvalidSeed { raw: String },
    InvalidTimeout { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBackend { raw } => write!(f, "invalid --backend value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout-secs value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

/// Where questions and results come from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Backend {
    Http(String),
    Offline(Option<PathBuf>),
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    backend: Backend,
    seed: Option<u64>,
    timeout: Duration,
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Args),
    Help,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--backend <url> | --bank <path>] [--seed <u64>] [--timeout-secs <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  built-in question bank, results kept in memory");
    eprintln!("  --timeout-secs {DEFAULT_TIMEOUT_SECS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  KUIZ_BACKEND_URL, KUIZ_QUESTION_BANK, KUIZ_SHUFFLE_SEED, KUIZ_TIMEOUT_SECS, RUST_LOG");
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

fn parse_timeout(raw: String) -> Result<Duration, ArgsError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ArgsError::InvalidTimeout { raw }),
    }
}

fn parse_backend(raw: String) -> Result<String, ArgsError> {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ArgsError::InvalidBackend { raw })
    }
}

impl Args {
    /// Flags win over environment values; `--backend` wins over `--bank`.
    fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let mut backend_url = non_empty("KUIZ_BACKEND_URL").map(parse_backend).transpose()?;
        let mut bank = non_empty("KUIZ_QUESTION_BANK").map(PathBuf::from);
        let mut seed = non_empty("KUIZ_SHUFFLE_SEED").map(parse_seed).transpose()?;
        let mut timeout = non_empty("KUIZ_TIMEOUT_SECS")
            .map(parse_timeout)
            .transpose()?
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--backend" => {
                    backend_url = Some(parse_backend(require_value(&mut args, "--backend")?)?);
                }
                "--bank" => {
                    bank = Some(PathBuf::from(require_value(&mut args, "--bank")?));
                }
                "--seed" => {
                    seed = Some(parse_seed(require_value(&mut args, "--seed")?)?);
                }
                "--timeout-secs" => {
                    timeout = parse_timeout(require_value(&mut args, "--timeout-secs")?)?;
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let backend = match backend_url {
            Some(url) => Backend::Http(url),
            None => Backend::Offline(bank),
        };
        Ok(Parsed::Run(Self {
            backend,
            seed,
            timeout,
        }))
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;
    let args = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    init_tracing();

    let clock = Clock::default_clock();
    let services = match &args.backend {
        Backend::Http(url) => AppServices::new_http(
            HttpConfig::new(url.clone()).with_timeout(args.timeout),
            clock,
            args.seed,
        )?,
        Backend::Offline(bank) => AppServices::new_offline(bank.as_deref(), clock, args.seed)?,
    };
    info!(seed = ?args.seed, "starting quiz app");

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Kuiz Refleksologi")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
