use backend::config::Config;
use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(e) = backend::app::run(Config::parse()).await {
        eprintln!("\nError: {:#}\n", e);
        std::process::exit(1);
    }
}
