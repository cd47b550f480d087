// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use fabstir_caption_node::{
    api::start_server, config::NodeConfig, pipeline::CaptionPipeline, version,
};
use std::{env, sync::Arc};

/// Fabstir Caption Node HTTP server
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// Port for the HTTP API (overrides API_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    println!("🚀 Starting Fabstir Caption Node...\n");
    println!("📦 {}", version::get_version_string());
    println!("📦 BUILD VERSION: {}", version::VERSION);
    println!("📅 Build Date: {}", version::BUILD_DATE);
    println!();

    let mut config = NodeConfig::from_env();
    if let Some(port) = args.port {
        config.api_port = port;
    }
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    println!("🧠 Initializing caption services...");
    println!("   Caption backend: {} ({})", config.caption_backend, config.caption_model);
    println!("   Translator: {}", config.translator_backend);
    println!("   Max caption length: {}", config.max_caption_length);

    let pipeline = Arc::new(CaptionPipeline::from_config(&config)?);
    println!("✅ Caption services initialized\n");

    println!("🌐 API server on http://{}", config.listen_addr());
    start_server(&config, pipeline).await?;

    println!("👋 Fabstir Caption Node stopped");
    Ok(())
}
