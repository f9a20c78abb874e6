use clap::Args as ClapArgs;
use inquire::{InquireError, Text};
use miette::IntoDiagnostic as _;

use crate::{
    chat::Conversation,
    config::RootConfig,
    render::{print_markdown, render_turn_markdown},
    service::{HttpService, ScanService},
};

#[derive(ClapArgs)]
pub struct Args {
    /// Message to send. Starts an interactive session when omitted.
    pub message: Option<String>,

    /// Let the assistant see the latest scan the service ran
    #[arg(long, default_value_t = false)]
    pub with_scan: bool,
}

fn print_reply<S: ScanService>(chat: &Conversation<S>) {
    if let Some(turn) = chat.last_turn() {
        print_markdown(&render_turn_markdown(turn));
    }
}

pub async fn run(args: Args, config: &RootConfig) -> miette::Result<()> {
    let service = HttpService::setup(&config.service);
    let mut chat =
        Conversation::new(service).with_scan_context(args.with_scan || config.chat.include_scan);

    if let Some(message) = args.message {
        chat.send(&message).await;
        print_reply(&chat);
        return Ok(());
    }

    println!("Ask the security assistant anything. Submit an empty line to quit.");

    loop {
        let input = match Text::new("you:").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(error) => return Err(error).into_diagnostic(),
        };

        if input.trim().is_empty() {
            break;
        }

        chat.set_draft(input);
        chat.send_draft().await;
        print_reply(&chat);
    }

    Ok(())
}
