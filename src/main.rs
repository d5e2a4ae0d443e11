use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use phish_scan::{ScannerConfig, UrlScanner};
use std::io::BufRead;
use std::process;

const SAMPLE_URLS: &[&str] = &[
    "google.com",
    "faceboook.com",
    "exam-portal.com",
    "google.com-login.info",
    "xn--google-yva.com",
    "192.168.0.1/phish",
];

fn main() {
    let matches = Command::new("phish-scan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Static phishing heuristics for URLs")
        .long_about(
            "Classifies URLs as likely-phishing or likely-safe using static heuristics:\n\
             • Typo-squatting similarity against trusted domains\n\
             • Punycode markers\n\
             • IP-literal hosts, suspicious suffixes and characters, excessive length\n\
             Without URL arguments the built-in sample URLs are scanned.",
        )
        .arg(
            Arg::new("urls")
                .value_name("URL")
                .help("URLs to scan (defaults to the built-in samples)")
                .num_args(0..),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Scanner configuration file (YAML)"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Write the default configuration to FILE and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the configuration and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdin")
                .long("stdin")
                .help("Read URLs from standard input, one per line")
                .action(clap::ArgAction::SetTrue)
                .conflicts_with("urls"),
        )
        .arg(
            Arg::new("explain")
                .long("explain")
                .help("Show the heuristic breakdown for each URL")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print one JSON report per line")
                .action(clap::ArgAction::SetTrue)
                .conflicts_with("explain"),
        )
        .arg(
            Arg::new("fail-on-phishing")
                .long("fail-on-phishing")
                .help("Exit with status 2 if any URL is flagged")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    match run(&matches) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<i32> {
    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        ScannerConfig::default().to_file(generate_path)?;
        println!("Default configuration written to: {generate_path}");
        return Ok(0);
    }

    let config = load_config(matches.get_one::<String>("config").map(String::as_str))?;

    if matches.get_flag("test-config") {
        println!("🔍 Testing configuration...");
        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed:");
            println!("Error: {e}");
            return Ok(1);
        }
        print_config_summary(&config);
        println!("✅ Configuration is valid");
        return Ok(0);
    }

    config.validate()?;

    let urls = collect_urls(matches)?;
    let scanner = UrlScanner::new(config);
    let mut flagged = 0;

    for url in &urls {
        if matches.get_flag("json") {
            let report = scanner.explain(url);
            if report.verdict.is_suspicious {
                flagged += 1;
            }
            println!("{}", serde_json::to_string(&report)?);
            continue;
        }

        let verdict = scanner.scan(url);
        if verdict.is_suspicious {
            flagged += 1;
        }
        println!("[{}] {} -> {}", verdict.label(), url, verdict.reason);

        if matches.get_flag("explain") {
            print_explanation(&scanner, url);
        }
    }

    log::info!("Scanned {} URL(s), {} flagged", urls.len(), flagged);

    if flagged > 0 && matches.get_flag("fail-on-phishing") {
        return Ok(2);
    }
    Ok(0)
}

fn load_config(path: Option<&str>) -> anyhow::Result<ScannerConfig> {
    match path {
        Some(path) if std::path::Path::new(path).exists() => ScannerConfig::from_file(path),
        Some(path) => {
            log::warn!("Configuration file '{path}' not found, using default configuration");
            Ok(ScannerConfig::default())
        }
        None => Ok(ScannerConfig::default()),
    }
}

fn collect_urls(matches: &ArgMatches) -> anyhow::Result<Vec<String>> {
    if matches.get_flag("stdin") {
        let mut urls = Vec::new();
        for line in std::io::stdin().lock().lines() {
            let line = line?;
            let url = line.trim();
            if !url.is_empty() {
                urls.push(url.to_string());
            }
        }
        return Ok(urls);
    }

    match matches.get_many::<String>("urls") {
        Some(values) => Ok(values.cloned().collect()),
        None => Ok(SAMPLE_URLS.iter().map(|u| u.to_string()).collect()),
    }
}

fn print_config_summary(config: &ScannerConfig) {
    println!("Trusted domains: {}", config.trusted_domains.len());
    for domain in &config.trusted_domains {
        println!("  • {domain}");
    }
    println!("Score threshold: {}", config.score_threshold);
    println!("Length threshold: {}", config.length_threshold);
    println!("Similarity threshold: {}", config.similarity_threshold);
    println!("Suspicious suffixes: {}", config.suspicious_suffixes.join(" "));
    println!(
        "Suspicious characters: {:?}",
        config.suspicious_chars.iter().collect::<String>()
    );
}

fn print_explanation(scanner: &UrlScanner, url: &str) {
    let report = scanner.explain(url);
    println!("    hostname: {:?}", report.hostname);
    if let Some(normalized) = &report.normalized_host {
        if *normalized != report.hostname {
            println!("    normalized host: {normalized:?}");
        }
    }
    println!("    registrable domain: {:?}", report.registrable_domain);
    match &report.closest_trusted {
        Some(closest) => println!(
            "    closest trusted: {} (similarity {:.3})",
            closest.trusted, closest.similarity
        ),
        None => println!("    closest trusted: none"),
    }
    let triggered = report.heuristics.triggered();
    if triggered.is_empty() {
        println!("    heuristics: score 0");
    } else {
        println!(
            "    heuristics: score {} ({})",
            report.heuristics.score,
            triggered.join(", ")
        );
    }
}
