use std::path::PathBuf;

use clap::Args as ClapArgs;

use crate::{
    config::RootConfig,
    report::{DEFAULT_REPORT_FILE, export_to},
    service::HttpService,
};

#[derive(ClapArgs)]
pub struct Args {
    /// Where to write the PDF report of the latest scan
    #[arg(long, short, default_value = DEFAULT_REPORT_FILE)]
    pub out: PathBuf,
}

pub async fn run(args: Args, config: &RootConfig) -> miette::Result<()> {
    let service = HttpService::setup(&config.service);

    let saved = export_to(&service, &args.out).await?;

    println!("Report written to: {}", saved.display());

    Ok(())
}
