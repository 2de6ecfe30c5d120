#[tokio::main]
async fn main() -> anyhow::Result<()> {
    indent::start_server().await
}
