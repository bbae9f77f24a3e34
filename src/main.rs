use kodoku::config::RouteCatalog;
use kodoku::error::KodokuError;
use kodoku::report::{build_report, build_report_parallel, write_report_file};
use tracing_subscriber::EnvFilter;

const DEFAULT_OUTPUT: &str = "public/data/kodoku_reports.json";

struct Args {
    output_path: String,
    catalog_path: Option<String>,
    parallel: bool,
    quiet: bool,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = std::env::args().collect();

    let mut parsed = Args {
        output_path: DEFAULT_OUTPUT.to_string(),
        catalog_path: None,
        parallel: false,
        quiet: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                parsed.output_path =
                    args.get(i).cloned().ok_or("--output requires a path")?;
            }
            "--catalog" => {
                i += 1;
                parsed.catalog_path =
                    Some(args.get(i).cloned().ok_or("--catalog requires a path")?);
            }
            "--parallel" => parsed.parallel = true,
            "--quiet" => parsed.quiet = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(parsed)
}

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<std::path::PathBuf, KodokuError> {
    let catalog = match &args.catalog_path {
        Some(path) => RouteCatalog::from_json_file(path)?,
        None => RouteCatalog::canonical(),
    };
    let now = chrono::Utc::now();
    let report = if args.parallel {
        build_report_parallel(&catalog, now)?
    } else {
        build_report(&catalog, now)?
    };
    write_report_file(&report, &args.output_path)
}

fn main() {
    let args = parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        eprintln!("usage: kodoku [--output PATH] [--catalog PATH] [--parallel] [--quiet]");
        std::process::exit(2);
    });
    init_logging(args.quiet);

    match run(&args) {
        Ok(path) => {
            if !args.quiet {
                println!("[done] kodoku report written to {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
