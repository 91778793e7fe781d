use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use l10n_qa::{
    DEFAULT_JOBS, HeuristicMeasurer, QaConfig, QaError, QaResult, ReportBuilder, ReportFormat,
    ReportRequest, RtlPolicy, load_catalog, render_report, sweep_catalog,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage:
  l10n-qa analyze <text> <width>
  l10n-qa validate <source> <translation>
  l10n-qa layout <language> <text> [--width <width>]
  l10n-qa check <catalog.xcstrings> [--report console|markdown|json] [--jobs <n>]";

fn cli() -> Command {
    Command::new("l10n-qa")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Localization QA checks for translated UI strings")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug details to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("max-ratio")
                .long("max-ratio")
                .help("Length ratio above which a translation is flagged (default: 1.5)")
                .value_parser(value_parser!(f64))
                .global(true),
        )
        .arg(
            Arg::new("rtl-prefix")
                .long("rtl-prefix")
                .help("Language prefix treated as right-to-left; repeat to build the table (default: ar, he, fa)")
                .action(ArgAction::Append)
                .global(true),
        )
        .subcommand(
            Command::new("analyze")
                .about("Print text statistics as JSON")
                .arg(
                    Arg::new("text")
                        .help("Text to analyze")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(1),
                )
                .arg(
                    Arg::new("width")
                        .help("Available width in layout units")
                        .required(true)
                        .allow_negative_numbers(true)
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a translation against its source string")
                .arg(
                    Arg::new("source")
                        .help("Source string")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(1),
                )
                .arg(
                    Arg::new("translation")
                        .help("Translated string")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("layout")
                .about("Simulate the rendered size of a localized string")
                .arg(
                    Arg::new("language")
                        .help("Language tag (e.g., ar, en, zh-Hans)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("text")
                        .help("Text to lay out")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(2),
                )
                .arg(
                    Arg::new("width")
                        .long("width")
                        .short('w')
                        .help("Available width in layout units (default: 375)")
                        .allow_negative_numbers(true),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Sweep an Xcode string catalog and report issues")
                .arg(
                    Arg::new("catalog")
                        .help("Path to a .xcstrings file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .short('r')
                        .help("Report format")
                        .value_parser(["console", "markdown", "json"])
                        .default_value("console"),
                )
                .arg(
                    Arg::new("jobs")
                        .long("jobs")
                        .short('j')
                        .help("Maximum validations in flight (default: 4)")
                        .value_parser(value_parser!(usize)),
                ),
        )
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => {
                    eprintln!("\n{}", USAGE);
                    ExitCode::FAILURE
                }
            };
        }
    };

    init_tracing(matches.get_flag("verbose"));

    match run(&matches).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(QaError::Parse(msg)) => {
            eprintln!("Error: {}\n\n{}", msg, USAGE);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(matches: &ArgMatches) -> QaResult<String> {
    let config = config_from(matches)?;
    debug!(?config, "resolved configuration");

    let request = match matches.subcommand() {
        Some(("analyze", sub)) => ReportRequest::Analyze {
            text: required(sub, "text")?.to_string(),
            width: parse_width(required(sub, "width")?)?,
        },
        Some(("validate", sub)) => ReportRequest::Validate {
            source: required(sub, "source")?.to_string(),
            translation: required(sub, "translation")?.to_string(),
        },
        Some(("layout", sub)) => ReportRequest::Layout {
            language: required(sub, "language")?.to_string(),
            text: required(sub, "text")?.to_string(),
            width: sub
                .get_one::<String>("width")
                .map(|w| parse_width(w))
                .transpose()?,
        },
        Some(("check", sub)) => return check(sub, &config).await,
        Some((name, _)) => {
            return Err(QaError::Parse(format!("Unknown subcommand '{}'", name)));
        }
        None => return Err(QaError::Parse("Missing subcommand".to_string())),
    };
    debug!(mode = request.key(), "building report");

    let builder = ReportBuilder::new(HeuristicMeasurer::new(), config);
    let value = builder.build(&request)?;
    serde_json::to_string_pretty(&value)
        .map_err(|e| QaError::Serialization(format!("Failed to serialize report: {}", e)))
}

async fn check(sub: &ArgMatches, config: &QaConfig) -> QaResult<String> {
    let path = PathBuf::from(required(sub, "catalog")?);
    let format: ReportFormat = required(sub, "report")?.parse()?;
    let jobs = sub.get_one::<usize>("jobs").copied().unwrap_or(DEFAULT_JOBS);

    let catalog = load_catalog(&path)?;
    let report = sweep_catalog(&catalog, config, jobs).await?;
    render_report(&report, format)
}

fn config_from(matches: &ArgMatches) -> QaResult<QaConfig> {
    let mut config = QaConfig::default();
    if let Some(prefixes) = matches.get_many::<String>("rtl-prefix") {
        config = config.with_rtl_policy(RtlPolicy::new(prefixes));
    }
    if let Some(ratio) = matches.get_one::<f64>("max-ratio").copied() {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(QaError::Parse(format!(
                "--max-ratio must be a positive number, got {}",
                ratio
            )));
        }
        config = config.with_length_ratio_threshold(ratio);
    }
    Ok(config)
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> QaResult<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| QaError::Parse(format!("Missing argument <{}>", id)))
}

fn parse_width(raw: &str) -> QaResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| QaError::Parse(format!("Width must be a number, got '{}'", raw)))
}
