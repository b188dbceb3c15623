//! BHO THC Rechner (bhocalc)
//!
//! An MCP server estimating THC content of BHO extracts and infused oils.

use bhocalc::build_info;
use bhocalc::config::Config;
use bhocalc::mcp::BhoCalcService;
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr to not interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bhocalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("Export directory: {}", config.export_dir.display());
    eprintln!("Report file name: {}", config.report_file_name);

    let service = BhoCalcService::new(config);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
