//! Terminal UI for EcoWise: analyze item photos, browse recycling centers,
//! and track the gamified profile.

mod app;
mod input;
mod logger;
mod ui;

use std::{env, io, path::Path, sync::Arc, time::Duration as StdDuration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;

use ecowise_core::{
    centers::nearest_centers,
    model::ImageUpload,
    service::{Analysis, EcoWiseService},
};
use ecowise_provider_offline as offline;
use ecowise_provider_rest as rest;

use crate::app::{App, Screen};
use crate::input::Action;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    logger::init_from_env();

    // HTTP + service setup
    let client = Client::builder().user_agent("ecowise/0.1").build()?;
    let base_url = env::var("ECOWISE_API").unwrap_or_else(|_| rest::DEFAULT_BASE_URL.to_owned());
    let username = env::var("ECOWISE_USER").unwrap_or_else(|_| String::from("EcoStudent"));

    let service = Arc::new(EcoWiseService::new(
        rest::provider(client, base_url),
        offline::fallback(),
    ));

    // App state
    let app = App::new(service, username, read_location());

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Optional `ECOWISE_LAT`/`ECOWISE_LNG` pair for distance-sorted centers.
fn read_location() -> Option<(f64, f64)> {
    let lat = env::var("ECOWISE_LAT").ok()?.trim().parse().ok()?;
    let lng = env::var("ECOWISE_LNG").ok()?.trim().parse().ok()?;
    Some((lat, lng))
}

async fn run(terminal: &mut Tui, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::RunAnalysis => run_analysis(terminal, &mut app).await?,
                Action::OpenCenters => load_centers(terminal, &mut app).await?,
                Action::OpenDirections => load_directions(terminal, &mut app).await?,
                Action::OpenProfile => load_profile(terminal, &mut app).await?,
                Action::OpenLeaderboard => load_leaderboard(terminal, &mut app).await?,
                Action::ExportData => export_data(terminal, &mut app).await?,
            }
        }
    }

    Ok(())
}

fn begin_loading(terminal: &mut Tui, app: &mut App) -> Result<()> {
    app.is_loading = true;
    app.error_message = None;
    terminal.draw(|frame| ui::draw(frame, app))?;
    Ok(())
}

async fn run_analysis(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let path_text = app.path_input.trim().to_owned();
    if path_text.is_empty() {
        app.error_message = Some("Type the path of an image, then press Enter".into());
        return Ok(());
    }

    app.status_message = None;
    begin_loading(terminal, app)?;

    let outcome = analyze_path(app, &path_text).await;
    app.is_loading = false;

    match outcome {
        Ok(analysis) => {
            if analysis.degraded {
                app.status_message =
                    Some("Backend unreachable – showing offline analysis".into());
            }
            app.analysis = Some(analysis);
            app.screen = Screen::Results;
        }
        Err(err) => {
            app.error_message = Some(format!("Analysis failed: {err:#}"));
        }
    }
    Ok(())
}

async fn analyze_path(app: &App, path: &str) -> Result<Analysis> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {path}"))?;

    let filename = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_owned();
    let upload = ImageUpload::new(filename, bytes)?;

    let analysis = app.service.analyze(&upload, &app.username).await?;
    Ok(analysis)
}

async fn load_centers(terminal: &mut Tui, app: &mut App) -> Result<()> {
    begin_loading(terminal, app)?;

    let mut centers = app.service.centers().await;
    if let Some((lat, lng)) = app.user_location {
        centers = nearest_centers(lat, lng, &centers)
            .into_iter()
            .map(|(center, _)| center)
            .collect();
    }

    app.is_loading = false;
    app.center_index = 0;
    app.centers = centers;
    app.screen = Screen::Centers;

    if app.centers.is_empty() {
        app.error_message = Some("No centers available right now".into());
    }
    Ok(())
}

async fn load_directions(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let Some(center_id) = app.selected_center().map(|center| center.id) else {
        app.error_message = Some("No center selected (search and pick one first)".into());
        return Ok(());
    };

    begin_loading(terminal, app)?;

    let res = app.service.directions(center_id).await;
    app.is_loading = false;

    match res {
        Ok(info) => {
            app.directions = Some(info);
            app.screen = Screen::Directions;
        }
        Err(err) => {
            app.error_message = Some(format!("Failed to load directions: {err}"));
        }
    }
    Ok(())
}

async fn load_profile(terminal: &mut Tui, app: &mut App) -> Result<()> {
    begin_loading(terminal, app)?;

    let res = app.service.profile(&app.username).await;
    app.is_loading = false;

    match res {
        Ok(profile) => {
            app.profile = Some(profile);
            app.screen = Screen::Profile;

            match app.service.history(&app.username).await {
                Ok(history) => app.history = history,
                Err(err) => {
                    app.history.clear();
                    app.error_message = Some(format!("Unable to load history: {err}"));
                }
            }
        }
        Err(err) => {
            app.error_message = Some(format!("Error loading profile: {err}"));
        }
    }
    Ok(())
}

async fn load_leaderboard(terminal: &mut Tui, app: &mut App) -> Result<()> {
    begin_loading(terminal, app)?;

    let res = app.service.leaderboard().await;
    app.is_loading = false;

    match res {
        Ok(rows) => {
            app.leaderboard = rows;
            app.screen = Screen::Leaderboard;
        }
        Err(err) => {
            app.error_message = Some(format!("Unable to load leaderboard: {err}"));
        }
    }
    Ok(())
}

async fn export_data(terminal: &mut Tui, app: &mut App) -> Result<()> {
    begin_loading(terminal, app)?;

    let res = app.service.export_user(&app.username).await;
    app.is_loading = false;

    match res {
        Ok(export) => {
            let path = format!("ecowise_data_{}.json", app.username);
            let written = serde_json::to_string_pretty(&export)
                .map_err(anyhow::Error::from)
                .and_then(|json| std::fs::write(&path, json).map_err(anyhow::Error::from));

            match written {
                Ok(()) => app.status_message = Some(format!("Exported data to {path}")),
                Err(err) => app.error_message = Some(format!("Failed to export data: {err}")),
            }
        }
        Err(err) => {
            app.error_message = Some(format!("Failed to export data: {err}"));
        }
    }
    Ok(())
}
