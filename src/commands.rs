//! One-shot CLI commands. Results go to stdout as JSON.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use formbridge_config::Config;
use formbridge_protocols::AutomationRequest;

use crate::wiring::build_pipeline;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn parse_context(raw: &str) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    serde_json::from_str(raw).map_err(|e| format!("Invalid --context JSON: {}", e).into())
}

pub(crate) async fn list_windows(config: &Config) -> CmdResult {
    let windows = build_pipeline(config).list_windows().await?;
    print_json(&windows)
}

pub(crate) async fn capture(config: &Config, id: &str, output: Option<&Path>) -> CmdResult {
    let capture = build_pipeline(config).capture(id).await?;
    match output {
        Some(path) => {
            std::fs::write(path, &capture.image_data)?;
            info!(
                "Wrote {}x{} capture to {}",
                capture.image_width,
                capture.image_height,
                path.display()
            );
            Ok(())
        }
        None => print_json(&capture),
    }
}

pub(crate) async fn extract(config: &Config, image: &Path, context: &str) -> CmdResult {
    let context = parse_context(context)?;
    let data = std::fs::read(image)?;
    let result = build_pipeline(config).extract(&data, &context).await?;
    print_json(&result)
}

pub(crate) async fn replay(config: &Config, request: &Path) -> CmdResult {
    let request: AutomationRequest = serde_json::from_slice(&std::fs::read(request)?)?;
    let report = build_pipeline(config).replay(request).await?;
    print_json(&report)
}

pub(crate) async fn run(config: &Config, id: &str, context: &str, confirm: bool) -> CmdResult {
    let context = parse_context(context)?;
    // Without --confirm the configured default applies.
    let confirm = confirm.then_some(true);
    let report = build_pipeline(config).run(id, &context, confirm).await?;
    print_json(&report)
}
