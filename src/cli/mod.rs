// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod generate;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::translation::Language;

/// Fabstir Caption Node CLI
#[derive(Parser, Debug)]
#[command(name = "caption-cli")]
#[command(version)]
#[command(about = "Caption an image, translate it and save the caption and speech", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Caption one image and write caption.txt / caption.mp3
    Generate(generate::GenerateArgs),

    /// List supported languages
    Languages,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => generate::run(args).await,
        Commands::Languages => {
            for language in Language::ALL {
                println!("{:<10} {}", language.display_name(), language.code());
            }
            Ok(())
        }
    }
}
