//! # Comicos
//!
//! Command-line host for the Comicos editor shell.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use comicos_core::{paper, resolver, PRESETS};
use comicos_desktop::{
    new_canvas_dialog, Bridge, BridgeRequest, CliArgs, Command, DesktopConfig, ImagePayload,
    MenuAction, PromptDialog, ViewZoom,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the JSON results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "comicos_desktop=info,comicos_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let config = DesktopConfig::from(&args);
    tracing::debug!(
        "Config: project dir {}, {}, zoom {}",
        config.project_dir.display(),
        config.default_dpi,
        config.initial_zoom
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(args.command, &config))
}

async fn run(command: Command, config: &DesktopConfig) -> anyhow::Result<()> {
    let bridge = Bridge::new(
        Arc::new(PromptDialog::new(config.project_dir.clone())),
        Arc::new(ViewZoom::new(config.initial_zoom)),
    );
    let _menu_log = bridge
        .menu()
        .subscribe(|action| tracing::debug!("Menu action: {action}"));

    match command {
        Command::Presets => {
            let rows: Vec<PresetRow> = PRESETS
                .iter()
                .map(|preset| PresetRow {
                    preset,
                    size: resolver::preset_size(preset, config.default_dpi),
                })
                .collect();
            print_json(&rows)
        }
        Command::Resolve {
            preset,
            width,
            height,
        } => {
            if let Some(label) = preset.as_deref() {
                // Unknown labels resolve to the fallback size.
                if let Err(e) = paper::PaperPreset::lookup(label) {
                    tracing::warn!("{e}");
                }
            }
            bridge.menu().emit(&MenuAction::NewCanvas);
            let dialog =
                new_canvas_dialog(config, preset.as_deref(), width.as_deref(), height.as_deref());
            print_json(&dialog.confirm())
        }
        Command::Save { input, path } => {
            let data = read_text(&input).await?;
            bridge.menu().emit(&MenuAction::Save);
            print_json(&bridge.save_project(&data, path.as_deref()).await)
        }
        Command::SaveAs { input } => {
            let data = read_text(&input).await?;
            bridge.menu().emit(&MenuAction::SaveAs);
            print_json(&bridge.save_project_as(&data).await)
        }
        Command::Open => {
            bridge.menu().emit(&MenuAction::Open);
            print_json(&bridge.open_project().await)
        }
        Command::Export { input } => {
            let bytes = tokio::fs::read(&input)
                .await
                .with_context(|| format!("reading {}", input.display()))?;
            let payload = match String::from_utf8(bytes) {
                Ok(text) => ImagePayload::DataUri(text),
                Err(raw) => ImagePayload::Bytes(raw.into_bytes()),
            };
            bridge.menu().emit(&MenuAction::Export);
            print_json(&bridge.export_image(&payload).await)
        }
        Command::Request { json } => {
            let request: BridgeRequest =
                serde_json::from_str(&json).context("parsing bridge request")?;
            print_json(&bridge.dispatch(request).await)
        }
    }
}

#[derive(Serialize)]
struct PresetRow {
    #[serde(flatten)]
    preset: &'static paper::PaperPreset,
    #[serde(flatten)]
    size: comicos_core::PixelSize,
}

async fn read_text(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
