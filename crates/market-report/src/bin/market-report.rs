//! Daily market report CLI
//!
//! # Usage
//!
//! ```bash
//! # One-shot report with curated news, exported to ./reports
//! market-report generate --curated --export --out-dir reports
//!
//! # Line-oriented session
//! market-report interactive
//! ```

use clap::{Parser, Subcommand};
use market_report::analysis::ReportAnalysis;
use market_report::{ReportApp, ReportConfig, Snapshot, format};
use report_utils::LogFormat;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_LOG_DIRECTIVES: &str = "warn,market_report=info";

#[derive(Parser, Debug)]
#[command(name = "market-report")]
#[command(about = "Generate a daily market snapshot as HTML and Markdown", long_about = None)]
struct Args {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Skip the simulated source latency
    #[arg(long, global = true)]
    no_latency: bool,

    /// Seed for reproducible data
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one report and exit
    Generate {
        /// Use the curated news pool instead of sampled news
        #[arg(long)]
        curated: bool,

        /// Write the HTML page to this path
        #[arg(long)]
        html: Option<PathBuf>,

        /// Export the Markdown report
        #[arg(long)]
        export: bool,

        /// Directory for the Markdown export
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start a line-oriented session
    Interactive,
}

fn build_config(args: &Args) -> anyhow::Result<ReportConfig> {
    let mut config = ReportConfig::default().with_env_overrides()?;
    if args.no_latency {
        config = config.without_latency();
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Command::Generate { out_dir: Some(dir), .. } = &args.command {
        config.output_dir.clone_from(dir);
    }
    config.validate()?;
    Ok(config)
}

fn print_takeaways(snapshot: &Snapshot) {
    println!(
        "Report for {} {} ({})",
        format::report_date(&snapshot.captured_at),
        format::clock_time(&snapshot.captured_at),
        snapshot.sentiment.level.label()
    );
    for item in ReportAnalysis::derive(snapshot).summary {
        println!("  - {}", item.plain());
    }
}

async fn write_html(app: &ReportApp, path: &Path) -> anyhow::Result<()> {
    let html = app.render_html().await?;
    tokio::fs::write(path, html).await?;
    println!("HTML written to {}", path.display());
    Ok(())
}

async fn run_generate(
    app: &ReportApp,
    curated: bool,
    html: Option<PathBuf>,
    export: bool,
    json: bool,
) -> anyhow::Result<()> {
    let snapshot = app.refresh(curated).await?;

    if json {
        println!("{}", app.snapshot_json().await?);
    } else {
        print_takeaways(&snapshot);
    }

    if let Some(path) = html {
        write_html(app, &path).await?;
    }

    if export {
        let path = app.export_to_output_dir().await?;
        println!("Markdown exported to {}", path.display());
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  refresh        regenerate with sampled news");
    println!("  curated        regenerate with the curated news pool");
    println!("  export         write the Markdown report to the output directory");
    println!("  html [PATH]    write the HTML page (default report.html)");
    println!("  help           show this help");
    println!("  exit           quit");
}

async fn handle_line(app: &ReportApp, line: &str) -> anyhow::Result<bool> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(true);
    };

    match command {
        "refresh" => print_takeaways(&*app.refresh(false).await?),
        "curated" => print_takeaways(&*app.refresh(true).await?),
        "export" => {
            let path = app.export_to_output_dir().await?;
            println!("Markdown exported to {}", path.display());
        }
        "html" => {
            let path = match parts.next() {
                Some(path) => PathBuf::from(path),
                None => app.config().output_dir.join("report.html"),
            };
            write_html(app, &path).await?;
        }
        "help" => print_help(),
        "exit" | "quit" => return Ok(false),
        other => eprintln!("Unknown command: {other} (try `help`)"),
    }

    Ok(true)
}

async fn run_interactive(app: &ReportApp) -> anyhow::Result<()> {
    print_help();
    println!();

    // Same as the initial page load: one report with sampled news
    match app.refresh(false).await {
        Ok(snapshot) => print_takeaways(&snapshot),
        Err(e) => eprintln!("Error: {e}"),
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("\nreport> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        match handle_line(app, input.trim()).await {
            Ok(true) => {}
            Ok(false) => break,
            // Failures end the current command only
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    report_utils::init_tracing(DEFAULT_LOG_DIRECTIVES, log_format);

    let config = Arc::new(build_config(&args)?);
    tracing::debug!(?config, "configuration loaded");
    let app = ReportApp::simulated(config);

    match args.command {
        Command::Generate {
            curated,
            html,
            export,
            json,
            ..
        } => run_generate(&app, curated, html, export, json).await,
        Command::Interactive => run_interactive(&app).await,
    }
}
