// src/bin/tagflow-demo.rs

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

// Terminal specific imports
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyEventKind,
        MouseButton as CrosstermButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::CrosstermBackend;

use tagflow_core::{ResourceId, TagChangeListener};
use tagflow_ratatui::RatatuiRenderer;
use tagflow_render::{InputEvent, KeyCode, MouseButton, Renderer};
use tagflow_runtime::{ChipContainer, ContainerConfig, TagflowApp, UIEvent};

const HINT_RESOURCE: ResourceId = ResourceId(1);

#[derive(Parser)]
#[command(name = "tagflow-demo")]
#[command(about = "Interactive terminal demo of a wrapping tag chip container")]
struct Args {
    /// Tags to start with
    tags: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Start with animations enabled
    #[arg(short, long)]
    animate: bool,

    /// Gap between chips, in cells
    #[arg(short, long, default_value_t = 1)]
    padding: i32,

    /// Text shown while there are no tags
    #[arg(long, default_value = "No tags yet. Type one and press Enter.")]
    hint: String,
}

/// Logs removals the user makes by clicking.
struct RemovalLog;

impl TagChangeListener for RemovalLog {
    fn on_tag_added(&mut self, tag: &str) {
        info!("tag added: {}", tag);
    }

    fn on_tag_removed(&mut self, tag: &str) {
        info!("tag removed by click: {}", tag);
    }
}

type DemoApp = TagflowApp<RatatuiRenderer<CrosstermBackend<io::Stdout>>>;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug, args.log_file.as_ref())?;

    let config = ContainerConfig {
        padding: args.padding,
        animations_enabled: args.animate,
        ..ContainerConfig::default()
    };
    let mut container = ChipContainer::new(config).context("Invalid container configuration")?;
    container.resources_mut().insert(HINT_RESOURCE, args.hint.as_str());
    container.set_area_hint(HINT_RESOURCE)?;
    container.set_tag_removing_listener(Box::new(RemovalLog));
    for tag in &args.tags {
        container.add_tag(tag.as_str());
    }

    // --- Terminal and Renderer Initialization ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let renderer = RatatuiRenderer::initialize(backend)?;
    let mut app = TagflowApp::new(renderer, container);

    info!("Starting demo loop... (Esc to quit)");
    let result = run(&mut app);

    // --- Cleanup ---
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    info!("Demo shutdown complete.");
    result
}

fn run(app: &mut DemoApp) -> Result<()> {
    let mut input = String::new();
    let mut last_frame_time = Instant::now();

    'main_loop: loop {
        app.set_status(status_line(app, &input));

        if event::poll(Duration::from_millis(16))? {
            let Some(event) = translate_event(event::read()?) else {
                continue;
            };
            match event {
                InputEvent::KeyPress { key: KeyCode::Escape, .. } => {
                    info!("Exit requested.");
                    break 'main_loop;
                }
                InputEvent::KeyPress {
                    key: KeyCode::Character('c'),
                    modifiers,
                } if modifiers.ctrl => break 'main_loop,
                InputEvent::KeyPress { key, .. } => handle_key(app, &mut input, key),
                other => {
                    if let Err(e) = app.handle_input(other) {
                        error!("Failed to handle input: {}", e);
                    }
                }
            }
        }

        let delta_time = last_frame_time.elapsed();
        last_frame_time = Instant::now();
        app.update(delta_time).context("Failed to update app")?;
        app.render()?;
    }
    Ok(())
}

fn handle_key(app: &mut DemoApp, input: &mut String, key: KeyCode) {
    match key {
        KeyCode::Enter => {
            let label = input.trim();
            if !label.is_empty() {
                app.queue_event(UIEvent::AddTag(label.to_string()));
            }
            input.clear();
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Tab => {
            let enabled = !app.container().animations_enabled();
            app.queue_event(UIEvent::SetAnimations(enabled));
        }
        KeyCode::Character(c) => input.push(c),
        KeyCode::Escape => {}
    }
}

fn status_line(app: &DemoApp, input: &str) -> String {
    let container = app.container();
    format!(
        "> {}_  | {} tag(s) | [Tab] animations: {} | [Esc] quit",
        input,
        container.len(),
        if container.animations_enabled() { "on" } else { "off" }
    )
}

fn translate_event(event: CrosstermEvent) -> Option<InputEvent> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
            let code = match key.code {
                event::KeyCode::Enter => KeyCode::Enter,
                event::KeyCode::Esc => KeyCode::Escape,
                event::KeyCode::Backspace => KeyCode::Backspace,
                event::KeyCode::Tab => KeyCode::Tab,
                event::KeyCode::Char(c) => KeyCode::Character(c),
                _ => return None,
            };
            let modifiers = tagflow_render::KeyModifiers {
                ctrl: key.modifiers.contains(event::KeyModifiers::CONTROL),
                shift: key.modifiers.contains(event::KeyModifiers::SHIFT),
                alt: key.modifiers.contains(event::KeyModifiers::ALT),
            };
            Some(InputEvent::KeyPress { key: code, modifiers })
        }
        CrosstermEvent::Mouse(mouse) => {
            let position = glam::vec2(mouse.column as f32, mouse.row as f32);
            let button = |b: CrosstermButton| match b {
                CrosstermButton::Left => MouseButton::Left,
                CrosstermButton::Right => MouseButton::Right,
                CrosstermButton::Middle => MouseButton::Middle,
            };
            match mouse.kind {
                MouseEventKind::Down(b) => Some(InputEvent::MousePress {
                    position,
                    button: button(b),
                }),
                MouseEventKind::Up(b) => Some(InputEvent::MouseRelease {
                    position,
                    button: button(b),
                }),
                MouseEventKind::Moved => Some(InputEvent::MouseMove { position }),
                _ => None,
            }
        }
        CrosstermEvent::Resize(width, height) => Some(InputEvent::Resize {
            size: glam::vec2(width as f32, height as f32),
        }),
        _ => None,
    }
}

fn init_logging(debug: bool, log_file: Option<&PathBuf>) -> Result<()> {
    let level = if debug { tracing::Level::DEBUG } else { tracing::Level::INFO };
    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?;
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
        }
        // Anything below a warning would scribble over the alternate screen.
        None => {
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(tracing::Level::WARN)
                .with_target(false)
                .compact()
                .with_writer(io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
        }
    }
}
