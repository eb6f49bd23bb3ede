use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "temperature-cli")]
#[command(about = "Query a running temperature service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current temperature for a CEP (input role)
    Temperature { cep: String },
    /// Current temperature for a city (weather role)
    Weather { city: String },
    /// Liveness probe
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Temperature { cep } => {
            client
                .post(format!("{base}/v1/temperature"))
                .json(&serde_json::json!({ "cep": cep }))
                .send()
                .await?
        }
        Commands::Weather { city } => {
            client
                .post(format!("{base}/v1/weather"))
                .json(&serde_json::json!({ "city": city }))
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{base}/health")).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text.trim());
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
