use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fmt::Write as _;
use std::fs;

use ratatui::backend::TestBackend;
use tagflow_core::{Element, ResourceId, Visibility};
use tagflow_layout::{MeasureSpec, WrapLayoutEngine};
use tagflow_ratatui::RatatuiRenderer;
use tagflow_render::Renderer;
use tagflow_runtime::{ChipContainer, ContainerConfig, LayoutPass, TagflowApp};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tagflow-inspect")]
#[command(about = "Lays out a set of tags and prints where every chip lands")]
struct Args {
    /// Tag labels to place
    tags: Vec<String>,

    /// Container width in cells
    #[arg(long, default_value_t = 80)]
    width: i32,

    /// Container height in cells
    #[arg(long, default_value_t = 24)]
    height: i32,

    /// Gap between chips, in cells
    #[arg(long, default_value_t = 1)]
    padding: i32,

    /// Hint text to configure for the empty state
    #[arg(long)]
    hint: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also draw the container as it would appear in a terminal
    #[arg(long)]
    preview: bool,

    /// Save output to file instead of stdout
    #[arg(long)]
    output: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Tree,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug)?;

    if args.width <= 0 || args.height <= 0 {
        anyhow::bail!("Container size must be positive, got {}x{}", args.width, args.height);
    }
    if args.preview {
        preview_size(args.width, args.height)?;
    }

    let config = ContainerConfig {
        padding: args.padding,
        ..ContainerConfig::default()
    };
    let engine = WrapLayoutEngine::new(config.padding).with_debug(args.debug);
    let mut container = ChipContainer::new(config)
        .context("Invalid container configuration")?
        .with_layout_engine(Box::new(engine));
    if let Some(hint) = &args.hint {
        container.resources_mut().insert(ResourceId(1), hint.as_str());
        container.set_area_hint(ResourceId(1))?;
    }
    for tag in &args.tags {
        container.add_tag(tag.as_str());
    }

    container.measure(MeasureSpec::Exactly(args.width), MeasureSpec::Exactly(args.height));
    let rows = match container.layout() {
        LayoutPass::Placed { rows, .. } => rows,
        LayoutPass::Frozen => 0,
    };

    let mut output_text = match args.format {
        Format::Text => generate_text_output(&container, rows),
        Format::Tree => generate_tree_output(&container, rows),
    }?;

    if args.preview {
        output_text.push('\n');
        output_text.push_str(&render_preview(container, args.width, args.height)?);
    }

    if let Some(output_file) = args.output {
        fs::write(&output_file, output_text).with_context(|| format!("Failed to write to file: {}", output_file))?;
        println!("Output written to: {}", output_file);
    } else {
        print!("{}", output_text);
    }

    Ok(())
}

fn generate_text_output(container: &ChipContainer, rows: usize) -> Result<String> {
    let mut output = String::new();
    let size = container.measured_size();
    writeln!(output, "container {}x{}: {} chip(s) in {} row(s)", size.x, size.y, container.len(), rows)?;

    for chip in container.chips() {
        let bounds = chip.bounds();
        writeln!(
            output,
            "  {:<24} pos:({},{}) size:({},{})",
            chip.label(),
            bounds.position.x,
            bounds.position.y,
            bounds.size.x,
            bounds.size.y
        )?;
        if bounds.right() > size.x || bounds.bottom() > size.y {
            writeln!(output, "    overflows the container")?;
        }
    }

    let hint = container.hint();
    if hint.visibility() == Visibility::Visible {
        let bounds = hint.bounds();
        writeln!(output, "  hint \"{}\" pos:({},{})", hint.text(), bounds.position.x, bounds.position.y)?;
    }
    Ok(output)
}

fn generate_tree_output(container: &ChipContainer, rows: usize) -> Result<String> {
    let mut output = String::new();
    let size = container.measured_size();
    writeln!(
        output,
        "ChipContainer {}x{} padding:{} rows:{}",
        size.x,
        size.y,
        container.config().padding,
        rows
    )?;

    for chip in container.chips() {
        let bounds = chip.bounds();
        writeln!(
            output,
            "├── Chip \"{}\" pos:({},{}) size:({},{})",
            chip.label(),
            bounds.position.x,
            bounds.position.y,
            bounds.size.x,
            bounds.size.y
        )?;
    }
    let hint = container.hint();
    writeln!(output, "└── Hint \"{}\" {:?}", hint.text(), hint.visibility())?;
    Ok(output)
}

/// Terminal buffers are addressed with `u16`.
fn preview_size(width: i32, height: i32) -> Result<(u16, u16)> {
    let columns = u16::try_from(width).with_context(|| format!("Width {} does not fit a terminal preview", width))?;
    let rows = u16::try_from(height).with_context(|| format!("Height {} does not fit a terminal preview", height))?;
    Ok((columns, rows))
}

fn render_preview(container: ChipContainer, width: i32, height: i32) -> Result<String> {
    let (columns, rows) = preview_size(width, height)?;
    let backend = TestBackend::new(columns, rows);
    let renderer = RatatuiRenderer::initialize(backend)?;
    let mut app = TagflowApp::new(renderer, container);
    app.update(std::time::Duration::ZERO)?;
    app.render()?;

    let buffer = app.renderer().backend().terminal.backend().buffer();
    let mut preview = String::new();
    for y in 0..buffer.area.height {
        let line: String = (0..buffer.area.width).map(|x| buffer.get(x, y).symbol()).collect();
        preview.push_str(line.trim_end());
        preview.push('\n');
    }
    Ok(preview)
}

fn init_logging(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_size_rejects_sizes_beyond_u16() {
        assert_eq!(preview_size(80, 24).unwrap(), (80, 24));
        assert_eq!(preview_size(65535, 1).unwrap(), (65535, 1));
        assert!(preview_size(65536, 24).is_err());
        assert!(preview_size(80, 70000).is_err());
    }

    #[test]
    fn preview_draws_chips() {
        let mut container = ChipContainer::new(ContainerConfig {
            padding: 1,
            ..ContainerConfig::default()
        })
        .unwrap();
        container.add_tag("go");

        let preview = render_preview(container, 20, 5).unwrap();
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines[1], " ┌────┐");
        assert_eq!(lines[2], " │ go │");
    }
}
