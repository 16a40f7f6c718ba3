//! Application configuration and command dispatch.

use crate::error::AppResult;
use crate::event_handler::EventHandler;
use crate::session::{self, ReplaySummary};
use crate::shortcuts::ShortcutRegistry;
use clap::{Parser, Subcommand};
use inkslate_core::canvas::Canvas;
use inkslate_core::shapes::DrawSettings;
use inkslate_core::storage::{FileStorage, Storage};
use inkslate_render::{FrameStats, RenderContext, Renderer, VelloRenderer};
use kurbo::{Rect, Size};
use peniko::Color;
use std::fmt;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    /// Drawing directory. `None` uses [`FileStorage::default_dir`].
    pub storage_dir: Option<PathBuf>,
    /// Ambient settings a new canvas starts with.
    pub settings: DrawSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Inkslate".to_string(),
            width: 1280,
            height: 800,
            background_color: Color::WHITE,
            storage_dir: None,
            settings: DrawSettings::default(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "inkslate", about = "Inkslate drawing surface")]
pub struct Cli {
    /// Directory drawings are stored in.
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, global = true)]
    pub width: Option<u32>,

    /// Viewport height in pixels.
    #[arg(long, global = true)]
    pub height: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Load a drawing, render it headlessly and print a summary.
    Show { id: String },
    /// Replay a session script and save the resulting drawing.
    Replay {
        script: PathBuf,
        /// Drawing id to save under. Defaults to the script's file name.
        #[arg(long)]
        id: Option<String>,
    },
    /// List stored drawings.
    List,
    /// Print keyboard shortcuts.
    Shortcuts,
}

impl Cli {
    /// Overlay command-line flags on the default configuration.
    pub fn config(&self) -> AppConfig {
        let defaults = AppConfig::default();
        AppConfig {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            storage_dir: self.storage.clone(),
            ..defaults
        }
    }
}

/// Result of `show`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowReport {
    pub id: String,
    pub shapes: usize,
    pub bounds: Option<Rect>,
    pub frame: FrameStats,
}

impl fmt::Display for ShowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {} shapes", self.id, self.shapes)?;
        if let Some(b) = self.bounds {
            writeln!(f, "  bounds: ({:.1}, {:.1}) - ({:.1}, {:.1})", b.x0, b.y0, b.x1, b.y1)?;
        }
        write!(
            f,
            "  frame: {} items, {} erase, {} text",
            self.frame.items, self.frame.erase_items, self.frame.text_items
        )
    }
}

/// Result of `replay`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub id: String,
    pub shapes: usize,
    pub summary: ReplaySummary,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Saved {} ({} shapes) after {} events, {} undo, {} redo",
            self.id, self.shapes, self.summary.events, self.summary.undos, self.summary.redos
        )
    }
}

/// The application over a storage backend.
pub struct App<S: Storage> {
    config: AppConfig,
    storage: S,
}

impl<S: Storage> App<S> {
    pub fn new(config: AppConfig, storage: S) -> Self {
        Self { config, storage }
    }

    fn new_canvas(&self) -> Canvas {
        Canvas::with_settings(self.config.settings.clone())
    }

    /// Load a stored drawing.
    pub fn open(&self, id: &str) -> AppResult<Canvas> {
        let bytes = self.storage.load(id)?;
        let mut canvas = self.new_canvas();
        canvas.load(&bytes)?;
        Ok(canvas)
    }

    /// Load `id` and render one headless frame.
    pub fn show(&self, id: &str) -> AppResult<ShowReport> {
        let canvas = self.open(id)?;
        let mut renderer = VelloRenderer::new();
        let size = Size::new(f64::from(self.config.width), f64::from(self.config.height));
        let ctx = RenderContext::new(&canvas, size).with_background(self.config.background_color);
        let frame = renderer.build_scene(&ctx)?;
        Ok(ShowReport {
            id: id.to_string(),
            shapes: canvas.len(),
            bounds: canvas.bounds(),
            frame,
        })
    }

    /// Replay a session script on a fresh canvas and save it as `id`.
    pub fn replay(&self, script: &[u8], id: &str) -> AppResult<ReplayReport> {
        let events = session::parse_script(script)?;
        let mut canvas = self.new_canvas();
        let mut handler = EventHandler::new();
        let summary = session::replay(&events, &mut canvas, &mut handler)?;

        // Text still being typed when the script ends is kept.
        canvas.commit_text();
        self.storage.save(id, &canvas.save()?)?;
        Ok(ReplayReport {
            id: id.to_string(),
            shapes: canvas.len(),
            summary,
        })
    }

    pub fn list(&self) -> AppResult<Vec<String>> {
        Ok(self.storage.list()?)
    }
}

impl App<FileStorage> {
    /// Open file storage at the configured or default location.
    pub fn with_file_storage(config: AppConfig) -> AppResult<Self> {
        let storage = match &config.storage_dir {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        log::info!("Using drawings in {}", storage.base_path().display());
        Ok(Self::new(config, storage))
    }
}

/// Parse the command line and run it.
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = cli.config();
    log::info!("Starting {}", config.title);

    if cli.command == Command::Shortcuts {
        ShortcutRegistry::print_all();
        return Ok(());
    }

    let app = App::with_file_storage(config)?;
    match cli.command {
        Command::Show { id } => println!("{}", app.show(&id)?),
        Command::Replay { script, id } => {
            let id = id.unwrap_or_else(|| default_drawing_id(&script));
            let bytes = std::fs::read(&script)?;
            println!("{}", app.replay(&bytes, &id)?);
        }
        Command::List => {
            for id in app.list()? {
                println!("{}", id);
            }
        }
        Command::Shortcuts => {}
    }
    Ok(())
}

fn default_drawing_id(script: &std::path::Path) -> String {
    script
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("session")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkslate_core::storage::MemoryStorage;

    const RECTANGLE_SCRIPT: &[u8] = br#"[
        {"event": "selectTool", "tool": "Rectangle"},
        {"event": "pointerDown", "x": 10, "y": 10},
        {"event": "pointerMove", "x": 50, "y": 40},
        {"event": "pointerUp", "x": 50, "y": 40},
        {"event": "selectTool", "tool": "Text"},
        {"event": "pointerDown", "x": 10, "y": 80},
        {"event": "pointerUp", "x": 10, "y": 80},
        {"event": "key", "key": "o"},
        {"event": "key", "key": "k"}
    ]"#;

    fn memory_app() -> App<MemoryStorage> {
        App::new(AppConfig::default(), MemoryStorage::new())
    }

    #[test]
    fn test_cli_flags_override_config() {
        let cli = Cli::try_parse_from(["inkslate", "--width", "640", "list"]).unwrap();
        let config = cli.config();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 800);
        assert_eq!(cli.command, Command::List);

        let cli = Cli::try_parse_from([
            "inkslate", "replay", "draw.json", "--id", "mine", "--storage", "/tmp/x",
        ])
        .unwrap();
        assert_eq!(cli.config().storage_dir, Some(PathBuf::from("/tmp/x")));
        assert_eq!(
            cli.command,
            Command::Replay {
                script: PathBuf::from("draw.json"),
                id: Some("mine".to_string()),
            }
        );
    }

    #[test]
    fn test_replay_then_show() {
        let app = memory_app();
        let report = app.replay(RECTANGLE_SCRIPT, "sketch").unwrap();
        assert_eq!(report.shapes, 2);
        assert_eq!(report.summary.events, 9);
        assert_eq!(app.list().unwrap(), vec!["sketch".to_string()]);

        let shown = app.show("sketch").unwrap();
        assert_eq!(shown.shapes, 2);
        assert_eq!(shown.frame.items, 2);
        assert_eq!(shown.frame.text_items, 1);
        assert!(shown.to_string().starts_with("sketch: 2 shapes"));
    }

    #[test]
    fn test_show_missing_drawing() {
        let app = memory_app();
        assert!(app.show("nope").is_err());
    }

    #[test]
    fn test_file_storage_app() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            storage_dir: Some(dir.path().to_path_buf()),
            ..AppConfig::default()
        };
        let app = App::with_file_storage(config).unwrap();
        app.replay(RECTANGLE_SCRIPT, "on-disk").unwrap();
        assert!(dir.path().join("on-disk.json").exists());
        assert_eq!(app.open("on-disk").unwrap().len(), 2);
    }

    #[test]
    fn test_default_drawing_id() {
        assert_eq!(default_drawing_id(std::path::Path::new("a/b/doodle.json")), "doodle");
    }
}
