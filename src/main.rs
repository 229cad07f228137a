use std::error::Error;
use std::io;
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use gpuwatch::app::{App, Config};
use gpuwatch::events::{AppEvent, handle_event};
use gpuwatch::ui;

type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let config = match Config::from_args() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    };
    let mut terminal = setup_terminal()?;
    install_panic_hook();
    let mut app = App::new(config);

    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;

    if let Err(err) = result {
        eprintln!("gpuwatch error: {err}");
    }
    if let Some(csv_path) = app.shutdown() {
        println!("gpuwatch: samples logged to {}", csv_path.display());
    }

    Ok(())
}

fn setup_terminal() -> io::Result<AppTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut AppTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal_raw();
        default_hook(info);
    }));
}

fn restore_terminal_raw() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen, Show);
}

fn run_app(terminal: &mut AppTerminal, app: &mut App) -> io::Result<()> {
    loop {
        if handle_event(app, AppEvent::Tick).should_exit() {
            return Ok(());
        }

        // Losing the surface is an implicit stop request: clean the session
        // up before bubbling the error out.
        if let Err(err) = terminal.draw(|frame| ui::render(frame, app)) {
            app.surface_closed();
            return Err(err);
        }

        if event::poll(POLL_INTERVAL)? {
            let event = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Event::Resize(w, h) => AppEvent::Resize(w, h),
                _ => continue,
            };

            if handle_event(app, event).should_exit() {
                return Ok(());
            }
        }
    }
}
