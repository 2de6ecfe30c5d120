use chrono::Local;
use clap::Parser;
use reqwest::Client;
use serde_json::{Value, json};

/// Sends one indent to a running backend and prints what the form would show.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "http://localhost:1111")]
    url: String,

    #[arg(long, default_value = "Palm Walk")]
    store: String,

    #[arg(long, default_value = "PVC Item Name 4 25 MM")]
    item: String,

    #[arg(long, default_value = "1")]
    quantity: String,

    #[arg(long, default_value = "pieces")]
    au: String,

    /// Only preview the line, do not append anything.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = Client::new();

    let indent_number = client
        .get(format!("{}/next-indent", args.url))
        .send()
        .await?
        .text()
        .await?;
    println!("Next indent number: {indent_number}");

    let line = json!({
        "itemName": args.item,
        "quantity": args.quantity,
        "au": args.au,
    });

    let preview: Value = client
        .post(format!("{}/lines", args.url))
        .json(&line)
        .send()
        .await?
        .json()
        .await?;
    println!(
        "Current stock: {}, after purchase: {}",
        preview["currentStock"], preview["stockAfterPurchase"]
    );

    if args.dry_run {
        return Ok(());
    }

    let submission = json!({
        "metadata": {
            "indentNumber": indent_number,
            "storeName": args.store,
            "requestedBy": "tester",
            "storeRequiredByDate": today_formatted(),
        },
        "lines": [line],
    });

    let response = client
        .post(format!("{}/submit", args.url))
        .json(&submission)
        .send()
        .await?;
    let status = response.status();
    println!("{status}: {}", response.text().await?);

    Ok(())
}

fn today_formatted() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
