use std::fs;
use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use stacktty::config::Config;
use stacktty::debugger::DebugSession;
use stacktty::engine::MockEngineFactory;
use stacktty::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "stacktty".to_string());

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            eprintln!("Usage: {} <listing> [--main <function>]", program_name);
            std::process::exit(1);
        }
    };

    if !Path::new(&config.listing_path).exists() {
        eprintln!("Error: File '{}' not found", config.listing_path.display());
        eprintln!("Usage: {} <listing> [--main <function>]", program_name);
        std::process::exit(1);
    }

    let source = fs::read_to_string(&config.listing_path)?;

    let mut session = DebugSession::new(Box::new(MockEngineFactory::new(source)));
    if let Some(function) = &config.main_function {
        session.handle_command(&format!("main {}", function));
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
