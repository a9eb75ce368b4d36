//! `ipl`: command line client for the IPL dues backend.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use ipl_client::debug::{self, LogConfig};
use ipl_client::{ApiClient, ClientConfig, Result, Session};

use cli::commands::{self, Context};
use cli::render;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Args::parse();

    let mut ctx = match setup(args.api_url) {
        Ok(ctx) => ctx,
        Err(e) => {
            let mut feedback = ipl_client::FeedbackCenter::default();
            feedback.report(&e);
            render::flush_feedback(&mut feedback);
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = debug::init(&LogConfig::from_env(&ctx.config.log_dir));

    let outcome = commands::run(&mut ctx, args.command).await;
    if let Err(e) = &outcome {
        tracing::error!(error = %e, "Command failed");
        ctx.feedback.report(e);
    }
    render::flush_feedback(&mut ctx.feedback);

    if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn setup(api_url: Option<String>) -> Result<Context> {
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = api_url {
        config = config.with_api_url(api_url);
    }

    let session = Session::load(&config.session_file)?;
    let client = ApiClient::new(&config, session)?;
    Ok(Context::new(config, client))
}
