// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::NodeConfig;
use crate::pipeline::{CaptionPipeline, PipelineOutput};
use crate::translation::Language;

/// Name of the audio file written next to caption.txt
pub const AUDIO_FILE_NAME: &str = "caption.mp3";

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// PNG or JPEG image to caption
    #[arg(long)]
    pub image: PathBuf,

    /// Target language, by name or code
    #[arg(long, default_value = "English")]
    pub language: String,

    /// Directory for caption.txt and caption.mp3
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Display length of the caption in chars
    #[arg(long, env = "MAX_CAPTION_LENGTH")]
    pub max_length: Option<usize>,
}

/// Run the pipeline once on a local image
pub async fn run(args: GenerateArgs) -> Result<()> {
    dotenv::dotenv().ok();

    let language: Language = args.language.parse()?;
    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("failed to read {}", args.image.display()))?;

    let mut config = NodeConfig::from_env();
    if let Some(max_length) = args.max_length {
        config.max_caption_length = max_length;
    }
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    let pipeline = CaptionPipeline::from_config(&config)?;
    let output = pipeline.run_bytes(&bytes, language).await?;

    for notice in &output.notices {
        eprintln!("⚠️  {}", notice.message);
    }

    println!("Caption: {}", output.caption.text);
    if !language.is_english() {
        println!("{}: {}", language, output.display_caption);
    }

    for path in write_outputs(&output, &args.out)? {
        println!("📄 Wrote {}", path.display());
    }

    Ok(())
}

/// Write caption.txt, plus caption.mp3 when audio was produced
pub fn write_outputs(output: &PipelineOutput, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut written = Vec::new();

    let download = output.download();
    let text_path = dir.join(download.file_name);
    fs::write(&text_path, &download.data)
        .with_context(|| format!("failed to write {}", text_path.display()))?;
    written.push(text_path);

    if let Some(audio) = &output.audio {
        let audio_path = dir.join(AUDIO_FILE_NAME);
        fs::write(&audio_path, audio.bytes())
            .with_context(|| format!("failed to write {}", audio_path.display()))?;
        written.push(audio_path);
    }

    info!("Wrote {} file(s) to {}", written.len(), dir.display());
    Ok(written)
}
