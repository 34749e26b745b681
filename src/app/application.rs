//! Application - Interactive Shell
//!
//! Drives the camera view model from line commands on stdin and renders its
//! property change events on stdout.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use crossbeam_channel::Receiver;

use crate::assets::ResourceMap;
use crate::eventing::AppEvent;
use crate::features::camera::CameraViewModel;
use crate::helpers::{AppPaths, FixedPathResolver, PathResolver, ProjectPathResolver};
use crate::services::FileCapture;
use crate::services::runtime::block_on;
use crate::states::ConfigChange;

const HELP: &str = "commands: rotate | capture <path> | cancel | status | help | quit";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Rotate,
    Capture(PathBuf),
    Cancel,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "rotate" | "r" => Command::Rotate,
            "capture" | "c" if rest.is_empty() => {
                return Err("capture needs a path to an image file".to_string());
            }
            "capture" | "c" => Command::Capture(PathBuf::from(rest)),
            "cancel" => Command::Cancel,
            "status" | "s" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(Some(command))
    }
}

/// Pick the directory resolver, honoring the `CAMERA_PROTO_HOME` override
pub fn path_resolver() -> Box<dyn PathResolver> {
    match FixedPathResolver::from_env() {
        Some(resolver) => Box::new(resolver),
        None => Box::new(ProjectPathResolver),
    }
}

/// Run the camera prototype shell until `quit` or end of input
pub fn run_app(resolver: &dyn PathResolver) -> anyhow::Result<()> {
    let paths = AppPaths::resolve(resolver).context("resolving app directories")?;
    let resources = ResourceMap::embedded().context("bundled color images do not match")?;

    let (event_tx, event_rx) = crossbeam_channel::unbounded::<AppEvent>();
    let mut vm = CameraViewModel::load(paths, resources, event_tx).context("loading config")?;
    render_events(&event_rx);
    println!("{HELP}");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let Some(line) = lines.next() else {
            break;
        };
        let command = match Command::parse(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}\n{HELP}");
                continue;
            }
        };

        let result = match command {
            Command::Rotate => vm.rotate(),
            Command::Capture(path) => block_on(vm.take_photo(&FileCapture::new(path))),
            Command::Cancel => block_on(vm.take_photo(&FileCapture::cancelled())),
            Command::Status => {
                print_status(&vm);
                Ok(())
            }
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => break,
        };

        if let Err(e) = result {
            if e.is_packaging_fault() {
                return Err(e).context("bundled resources are out of sync");
            }
            tracing::error!(error = %e, "Command failed");
            println!("error: {e}");
        }
        render_events(&event_rx);
    }

    tracing::info!("Shutting down");
    Ok(())
}

fn render_events(events: &Receiver<AppEvent>) {
    for event in events.try_iter() {
        match event {
            AppEvent::InfoTextChanged { text } => println!("[status] {text}"),
            AppEvent::SourceChanged { source: Some(image) } => {
                println!("[image] {} ({} bytes)", image.path().display(), image.len())
            }
            AppEvent::SourceChanged { source: None } => println!("[image] (none)"),
            AppEvent::ConfigChanged {
                change: ConfigChange::ColorRotation(color),
            } => println!("[config] colorRotation = {color}"),
            AppEvent::ConfigChanged {
                change: ConfigChange::IsPhoto(is_photo),
            } => println!("[config] isPhoto = {is_photo}"),
        }
    }
}

fn print_status(vm: &CameraViewModel) {
    let config = vm.config();
    println!("status:  {}", vm.info_text());
    println!("color:   {}", config.color_rotation());
    println!("photo:   {}", config.is_photo());
    println!("config:  {}", config.config_file_path().display());
    match vm.source() {
        Some(image) => println!("image:   {} ({} bytes)", image.path().display(), image.len()),
        None => println!("image:   (none)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("rotate").unwrap(), Some(Command::Rotate));
        assert_eq!(Command::parse("  R ").unwrap(), Some(Command::Rotate));
        assert_eq!(
            Command::parse("capture /tmp/my photo.jpg").unwrap(),
            Some(Command::Capture(PathBuf::from("/tmp/my photo.jpg")))
        );
        assert_eq!(Command::parse("cancel").unwrap(), Some(Command::Cancel));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_blank_and_invalid() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert!(Command::parse("capture").is_err());
        assert!(Command::parse("flip").is_err());
    }
}
