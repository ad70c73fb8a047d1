pub mod action;
pub mod handlers;
pub mod state;
pub mod view;

use crate::config::{self, API_KEY_ENV, Config};
use crate::search::SearchController;

use action::Action;
use handlers::{handle_key_event, handle_state_change};
use state::AppState;
use view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{env, io, time::Duration};

fn print_help() {
    println!("Folium - Plant search for the terminal");
    println!("----------------------------------------");
    println!("Usage: folium [OPTIONS]");
    println!();
    match Config::get_path_string() {
        Ok(path) => println!("Configuration File: {}", path),
        Err(_) => println!("Configuration Path: ~/.config/folium/config.toml (Standard XDG)"),
    }
    println!();
    println!("Config Options:");
    println!("  api_key = \"...\"          (or set {})", API_KEY_ENV);
    println!("  base_url = \"{}\" (Optional)", config::DEFAULT_BASE_URL);
    println!("  timeout_secs = 30 (Optional, must be > 0)");
    println!();
    println!("Keys:");
    println!("  Search:  type to edit, Enter search, Ctrl+S save selected");
    println!("  Home:    d/Delete remove, j/k select, q quit");
    println!("  Any:     Up/Down select, Tab switch screen, Esc/Ctrl+C quit");
}

/// Falls back to defaults when no config file exists; a missing key then shows
/// up as a search error instead of preventing startup.
fn load_config() -> (Config, String) {
    match Config::load() {
        Ok(cfg) => (cfg, "Type a species name and press Enter.".to_string()),
        Err(e) => {
            let mut cfg = Config::default();
            cfg.apply_env_override(env::var(API_KEY_ENV).ok());
            let path = Config::get_path_string()
                .unwrap_or_else(|_| "[Could not determine config path]".to_string());
            let message = if cfg.api_key.is_some() {
                format!("{} ({}), using {}.", e, path, API_KEY_ENV)
            } else {
                format!("{}: create {} with an api_key.", e, path)
            };
            (cfg, message)
        }
    }
}

pub async fn run() -> Result<()> {
    // --- 1. PREAMBLE & CONFIG ---
    let args: Vec<String> = env::args().collect();
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return Ok(());
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("folium_panic.log")
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    let (config, startup_message) = load_config();

    // --- 2. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 3. STATE INIT ---
    let mut app_state = AppState::new();
    app_state.message = startup_message;

    let mut controller = SearchController::from_config(&config);
    let mut updates = controller.subscribe();

    // --- 4. UI LOOP ---
    loop {
        // A. Search results
        if updates.has_changed().unwrap_or(false) {
            let loading = updates.borrow_and_update().clone();
            handle_state_change(&mut app_state, loading);
        }

        terminal.draw(|f| draw(f, &mut app_state))?;

        // B. User Input
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Key(key) => match handle_key_event(key, &mut app_state) {
                    Some(Action::Quit) => break,
                    Some(Action::QueryChanged(text)) => controller.update_query(text),
                    Some(Action::Submit) => {
                        // Fire and forget, the result arrives through `updates`
                        let _ = controller.search_plants();
                    }
                    None => {}
                },
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
