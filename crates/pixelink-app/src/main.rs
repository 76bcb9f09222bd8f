//! Headless entry point: replays a scripted editing session.

use pixelink_app::{AppResult, Editor, Script};
use pixelink_core::EditorConfig;
use std::process::ExitCode;

const USAGE: &str = "usage: pixelink <script.json> [config.json]";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(script_path) = args.first() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    match run(script_path, args.get(1).map(String::as_str)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("pixelink: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(script_path: &str, config_path: Option<&str>) -> AppResult<()> {
    let config = match config_path {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let script = Script::load(script_path)?;
    log::info!("Starting PixelInk with {} steps", script.steps.len());

    let mut editor = Editor::new(config, script.window.width, script.window.height);
    let report = script.replay(&mut editor)?;
    for path in &report.saved {
        println!("{}", path.display());
    }
    Ok(())
}
