use std::{
    io::Write as _,
    path::PathBuf,
};

use clap::Args as ClapArgs;
use miette::IntoDiagnostic as _;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    config::RootConfig,
    model::{ScanLevel, ScanSession, SessionStatus},
    render::{print_markdown, render_result_markdown},
    report::trigger_export,
    service::HttpService,
    session::ScanController,
};

#[derive(ClapArgs)]
pub struct Args {
    /// Absolute URL of the site to scan, e.g. https://example.com
    pub target: String,

    /// Scan depth: 1 passive, 2 active, 3 active plus extended checks
    #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub level: u8,

    /// Download the PDF report to this path once the scan completes
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print the normalized result as JSON instead of formatted text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) / 5;
    format!("[{}{}] {:>3}%", "#".repeat(filled), " ".repeat(20 - filled), progress)
}

// draws the published progress on stderr until the session leaves Scanning
fn spawn_progress_view(mut rx: watch::Receiver<ScanSession>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let session = rx.borrow_and_update().clone();

            if session.status != SessionStatus::Scanning {
                break;
            }

            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "\rscanning {} {}", session.target, progress_bar(session.progress));
            let _ = stderr.flush();
        }
    })
}

pub async fn run(args: Args, config: &RootConfig) -> miette::Result<()> {
    let level = ScanLevel::try_from(args.level).map_err(|error| miette::miette!(error))?;

    let service = HttpService::setup(&config.service);
    let mut controller = ScanController::new(service, config.progress.clone());

    let view = spawn_progress_view(controller.subscribe());
    let outcome = controller.submit(&args.target, level).await;

    view.abort();
    let _ = view.await;
    eprintln!();

    outcome?;

    let session = controller.session();

    let Some(result) = session.result else {
        miette::bail!("scan finished without a result");
    };

    if args.json {
        let pretty = serde_json::to_string_pretty(&result).into_diagnostic()?;
        println!("{}", pretty);
    } else {
        print_markdown(&render_result_markdown(&result));
    }

    if let Some(path) = args.export {
        let handle = trigger_export(controller.service().clone(), path);

        match handle.await {
            Ok(Some(saved)) => println!("Report written to: {}", saved.display()),
            _ => eprintln!("warning: report export failed, run with --verbose for details"),
        }
    }

    Ok(())
}
