mod geolocation;
mod logging;

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use haneul_background::{Scene, SceneState};
use haneul_config::{CliArgs, Config, ConfigError, DisplayConfig, project_dirs};
use haneul_sky::{
    Atmosphere, Frame as SkyFrame, LocationCell, LocationSource, SunCalc, format_clock,
    format_date,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Paragraph,
};
use tracing::{info, warn};

use crate::geolocation::GeoLocator;

/// Target frame time, roughly 60 Hz.
const FRAME_BUDGET: Duration = Duration::from_millis(16);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();

    let mut config = match args.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);
    config.validate()?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let log_dir = project_dirs().map(|dirs| dirs.data_dir().to_path_buf());
    if let Some(path) = logging::init_logging(log_dir.as_deref(), &config.log)? {
        info!(path = %path.display(), "logging started");
    }

    let app = App::new(&config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// How long to wait for input once a frame has taken `spent`.
fn poll_timeout(spent: Duration) -> Duration {
    FRAME_BUDGET.saturating_sub(spent)
}

/// Seed captured at startup when the config does not fix one.
fn startup_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(0)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Sky engine state: terrain, water, stars and palette.
    atmosphere: Atmosphere<SunCalc>,
    /// Renderer state kept across frames.
    scene: SceneState,
    /// Overlay settings, toggled from the keyboard.
    display: DisplayConfig,
    /// Monotonic origin for the elapsed-time accumulator.
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`] and start geolocation if needed.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let cell = match config.location {
            Some(location) => LocationCell::configured(location),
            None => LocationCell::default(),
        };

        if config.location.is_none() && config.geolocation.enabled {
            GeoLocator::new(
                cell.clone(),
                config.geolocation.endpoint.clone(),
                Duration::from_millis(config.geolocation.timeout_ms),
            )
            .start();
        } else if config.location.is_none() {
            warn!(fallback = %cell.get(), "geolocation disabled; using fallback location");
        }

        let settings = config.scene_settings(startup_seed());
        let atmosphere = Atmosphere::new(SunCalc, cell, config.palette()?, settings);

        Ok(Self {
            running: false,
            atmosphere,
            scene: SceneState::new(),
            display: config.display.clone(),
            started: Instant::now(),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let frame_start = Instant::now();
            let now = Local::now();
            let sky = self
                .atmosphere
                .tick(&now, self.started.elapsed().as_secs_f64());
            terminal.draw(|frame| self.render(frame, &now, &sky))?;
            self.handle_crossterm_events(poll_timeout(frame_start.elapsed()))?;
        }
        info!("exiting");
        Ok(())
    }

    /// Renders the scene and the clock overlay.
    fn render(&mut self, frame: &mut Frame, now: &DateTime<Local>, sky: &SkyFrame) {
        let area = frame.area();
        let scene = Scene::from_atmosphere(&self.atmosphere, &sky.visual);
        self.scene.render(frame, area, &scene);

        let text = Style::new().fg(Color::White);
        let dim = Style::new().fg(Color::Gray);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Time
            Constraint::Length(1), // Date
            Constraint::Length(1), // Sunrise/sunset label
            Constraint::Fill(3),   // Bottom padding
            Constraint::Length(1), // Location
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let clock = format_clock(now, self.display.time_format, self.display.show_seconds);
        frame.render_widget(
            Paragraph::new(clock)
                .style(text.bold())
                .alignment(Alignment::Center),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(format_date(now))
                .style(text)
                .alignment(Alignment::Center),
            chunks[2],
        );

        if self.display.show_label {
            frame.render_widget(
                Paragraph::new(sky.label.as_str())
                    .style(dim)
                    .alignment(Alignment::Center),
                chunks[3],
            );
        }

        if self.display.show_location {
            let cell = self.atmosphere.location_cell();
            let source = match cell.source() {
                LocationSource::Geolocated => " (ip)",
                LocationSource::Configured => "",
                LocationSource::Fallback => " (default)",
            };
            frame.render_widget(
                Paragraph::new(format!("{}{source}", cell.get()))
                    .style(dim)
                    .alignment(Alignment::Center),
                chunks[5],
            );
        }

        let help = Line::from(vec![
            "q".bold().white(),
            " quit  ".gray(),
            "t".bold().white(),
            " toggle 12/24h  ".gray(),
            "s".bold().white(),
            " seconds  ".gray(),
            "l".bold().white(),
            " label".gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[6]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the sky keeps animating.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => {
                self.display.time_format = self.display.time_format.toggle();
            }
            (_, KeyCode::Char('s')) => self.display.show_seconds = !self.display.show_seconds,
            (_, KeyCode::Char('l')) => self.display.show_label = !self.display.show_label,
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
