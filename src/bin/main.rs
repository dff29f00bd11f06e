use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "moodmeal-server")]
#[command(about = "Mood-based recipe recommendation server", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "moodmeal-server.yaml")]
    config: String,

    /// Replace all stored recipes with the built-in catalog before serving
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodmeal_rs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Err(e) = moodmeal_rs::run(&args.config, args.seed).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
