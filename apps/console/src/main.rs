use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use client_core::{SessionController, SessionFrontend};

/// Headless driver: registers an account, logs back in with the same
/// credentials, and prints the controller snapshot once the screen
/// transition has committed.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    email: String,
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let controller = SessionController::new();

    let session = controller
        .attempt_register(&args.email, &args.username, &args.password)
        .await?;
    println!("Registered as @{}", session.username);

    // Give the 300ms screen transition time to commit before snapshotting.
    tokio::time::sleep(Duration::from_millis(350)).await;

    let relogin = controller
        .attempt_login(&args.username, &args.password)
        .await?;
    tracing::info!(username = %relogin.username, "re-login verified");
    println!("Logged in as @{} ({})", relogin.username, relogin.email);

    let snapshot = controller.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
