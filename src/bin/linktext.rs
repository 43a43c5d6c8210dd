use clap::{Args, Parser, Subcommand};
use linktext::config::{LabelConfig, config_file_path};
use linktext::markdown::styled_text_from_markdown;
use linktext::svg::SvgDrawContext;
use linktext::{LinkLabel, Point};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "linktext")]
#[command(about = "Inspect and render link labels built from Markdown", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct Source {
    /// Markdown file to load
    file: PathBuf,

    /// Label width
    #[arg(short, long, default_value = "320")]
    width: f64,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the links found in a file
    Links {
        #[command(flatten)]
        source: Source,
    },
    /// Show which link is drawn at a point
    Hit {
        #[command(flatten)]
        source: Source,
        x: f64,
        y: f64,
    },
    /// Render the label to SVG
    Render {
        #[command(flatten)]
        source: Source,

        /// Hold a touch at X,Y so the link under it is highlighted
        #[arg(long, value_parser = parse_point)]
        press: Option<Point>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(Point::new(x, y))
}

fn load_config(path: Option<PathBuf>) -> linktext::Result<LabelConfig> {
    match path.or_else(config_file_path) {
        Some(path) => LabelConfig::load(&path),
        None => Ok(LabelConfig::default()),
    }
}

fn load_label(source: &Source, config: &LabelConfig) -> linktext::Result<LinkLabel> {
    let markdown = fs::read_to_string(&source.file)?;
    let mut label = LinkLabel::from_config(config, source.width, |url| {
        println!("open {}", url);
    });
    label.set_text(styled_text_from_markdown(&markdown));
    Ok(label)
}

fn cmd_links(source: &Source, config: &LabelConfig) -> linktext::Result<()> {
    let label = load_label(source, config)?;
    for link in label.links() {
        let range = link.glyph_range;
        println!("{}..{}\t{}", range.location, range.end(), link.resource);
    }
    Ok(())
}

fn cmd_hit(source: &Source, point: Point, config: &LabelConfig) -> linktext::Result<()> {
    let mut label = load_label(source, config)?;
    match label.link_at(point) {
        Some(link) => println!("{}", link.resource),
        None => println!("no link at {},{}", point.x, point.y),
    }
    Ok(())
}

fn cmd_render(
    source: &Source,
    press: Option<Point>,
    output: Option<PathBuf>,
    config: &LabelConfig,
) -> linktext::Result<()> {
    let mut label = load_label(source, config)?;
    if let Some(point) = press {
        label.touch_began(point);
    }

    let (width, height) = label.content_size();
    let svg_width = if source.width.is_finite() {
        source.width
    } else {
        width
    };
    let mut ctx = SvgDrawContext::new(svg_width.ceil() as i32, height.ceil() as i32);
    label.draw(&mut ctx);
    let svg = ctx.finish();

    match output {
        Some(path) => fs::write(path, svg)?,
        None => print!("{}", svg),
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let result = load_config(args.config).and_then(|config| match args.command {
        Commands::Links { source } => cmd_links(&source, &config),
        Commands::Hit { source, x, y } => cmd_hit(&source, Point::new(x, y), &config),
        Commands::Render {
            source,
            press,
            output,
        } => cmd_render(&source, press, output, &config),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
