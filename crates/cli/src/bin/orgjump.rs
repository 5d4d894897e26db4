use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    orgjump_cli::main_entry().await
}
