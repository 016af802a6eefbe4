use clap::{Parser, Subcommand};
use plainview_core::dom::ParseMode;
use plainview_core::paint::{self, DisplayList};
use plainview_core::viewer::{Viewer, ViewerConfig};
use plainview_core::StyleConfig;
use std::process;

#[derive(Parser)]
#[command(name = "plainview", about = "Minimal HTML flow renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(clap::Args)]
struct ViewArgs {
    /// Output paint calls as JSON instead of compact lines
    #[arg(long)]
    json: bool,

    /// Window size as WxH
    #[arg(long, default_value = "1280x720")]
    viewport: String,

    /// Zoom factor (clamped to 0.1..=5.0)
    #[arg(long, default_value_t = 1.0)]
    zoom: f32,

    /// Scroll down by this many wheel steps
    #[arg(long, default_value_t = 0.0)]
    scroll: f32,

    /// Start at the end of the page (applied before --scroll)
    #[arg(long)]
    bottom: bool,

    /// JSON file overriding style fields
    #[arg(long)]
    style: Option<String>,

    /// Use the palette for dark backgrounds
    #[arg(long)]
    dark: bool,

    /// Treat any markup error as a parse failure
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a local HTML file and print the paint calls
    Render {
        /// The HTML file to render (use - for stdin)
        file: String,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Fetch a URL and print the paint calls
    Fetch {
        /// The URL to fetch
        url: String,

        /// User-Agent header sent with the request
        #[arg(long)]
        user_agent: Option<String>,

        #[command(flatten)]
        view: ViewArgs,
    },
}

fn parse_viewport(s: &str) -> (f32, f32) {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() == 2 {
        let w = parts[0].parse().unwrap_or(1280.0);
        let h = parts[1].parse().unwrap_or(720.0);
        (w, h)
    } else {
        (1280.0, 720.0)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_style(view: &ViewArgs) -> Result<StyleConfig, String> {
    match &view.style {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read style file {}: {}", path, e))?;
            StyleConfig::from_json(&json).map_err(|e| format!("Invalid style file {}: {}", path, e))
        }
        None if view.dark => Ok(StyleConfig::dark()),
        None => Ok(StyleConfig::default()),
    }
}

fn build_viewer(view: &ViewArgs) -> Result<Viewer, String> {
    let (vw, vh) = parse_viewport(&view.viewport);
    let config = ViewerConfig {
        viewport_width: vw,
        viewport_height: vh,
        parse_mode: if view.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        },
        style: load_style(view)?,
        ..Default::default()
    };
    Ok(Viewer::new(config))
}

/// Apply zoom and scroll once the page is loaded, the way a user would.
fn settle(viewer: &mut Viewer, view: &ViewArgs) {
    viewer.zoom_by(view.zoom - viewer.zoom());
    if view.bottom {
        viewer.scroll_to_bottom();
    }
    viewer.scroll_by(-view.scroll);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render { file, view } => run_render(&file, &view),
        Commands::Fetch {
            url,
            user_agent,
            view,
        } => run_fetch(&url, user_agent, &view),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_render(file: &str, view: &ViewArgs) -> Result<(), String> {
    let html = if file == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        buf
    } else {
        std::fs::read_to_string(file).map_err(|e| format!("Failed to read {}: {}", file, e))?
    };

    let mut viewer = build_viewer(view)?;
    viewer.load_html(html);
    settle(&mut viewer, view);
    print_page(&mut viewer, view.json)
}

fn run_fetch(url: &str, user_agent: Option<String>, view: &ViewArgs) -> Result<(), String> {
    let mut fetch_config = plainview_core::fetch::FetchConfig::default();
    if let Some(ua) = user_agent {
        fetch_config.user_agent = ua;
    }

    let mut viewer = build_viewer(view)?;
    if let Err(e) = viewer.navigate(url, &fetch_config) {
        log::error!("{}", e);
    }
    settle(&mut viewer, view);
    print_page(&mut viewer, view.json)
}

fn print_page(viewer: &mut Viewer, as_json: bool) -> Result<(), String> {
    let mut list = DisplayList::new();
    if let Err(e) = viewer.render(&mut list) {
        log::error!("{}", e);
    }

    if as_json {
        let out = serde_json::json!({
            "url": viewer.url(),
            "zoom": viewer.zoom(),
            "scroll": viewer.scroll_offset(),
            "content_height": viewer.content_height(),
            "commands": list.commands,
        });
        let text = serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?;
        println!("{}", text);
    } else {
        if let Some(url) = viewer.url() {
            println!("url: {}", url);
        }
        println!("zoom: {}", viewer.zoom());
        println!("content height: {:.1}", viewer.content_height());
        println!("paint calls: {}", list.len());
        println!("---");
        print!("{}", paint::to_compact_string(&list));
    }
    Ok(())
}
