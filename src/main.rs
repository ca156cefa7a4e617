use cmdpal::config::PaletteConfig;
use cmdpal::core::Result;
use cmdpal::palette::{HostExecutor, Palette};
use cmdpal::tui::TerminalSink;
use tracing::info;

/// Prints the committed invocation to stdout, dmenu style, so the binary
/// composes with shell command substitution. The palette has already torn
/// down its overlay (and left raw mode) by the time this runs.
struct PrintExecutor;

impl HostExecutor for PrintExecutor {
    fn execute(&mut self, invocation: &str) {
        println!("{}", invocation);
    }
}

fn run(config_path: &str) -> Result<()> {
    let config = PaletteConfig::load(config_path)?;
    info!(commands = config.registry.len(), "palette configured");
    let sink = TerminalSink::new(config.window.clone())?;
    let mut palette = Palette::new(config, sink, PrintExecutor);
    palette.run()
}

fn main() {
    // Initialize the logging system using tracing subscriber
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = args.get(1).map(String::as_str).unwrap_or("cmdpal.toml");

    if let Err(e) = run(config_path) {
        eprintln!("cmdpal: {}", e);
        std::process::exit(1);
    }
}
