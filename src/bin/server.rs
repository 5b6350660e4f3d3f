//! GitLab MCP server binary.

#[tokio::main]
async fn main() -> miette::Result<()> {
    gitlab_mcp::cli::run().await?;
    Ok(())
}
