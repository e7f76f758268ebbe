mod config;
mod dictionary;
mod highscore;
mod screens;
mod session;
mod spawner;
mod state;
mod word;

use clap::Parser;
use config::{Cli, GameConfig};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use dictionary::{Dictionary, DICTIONARY};
use highscore::HighScores;
use session::{Screen, Session, Transition};
use std::{
    fs::File,
    io::{stdout, Stdout, Write},
    ops::ControlFlow,
    path::Path,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing::{debug, info, warn};

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    Ok(())
}

fn handle_key(session: &mut Session, key: KeyEvent) -> ControlFlow<()> {
    match (key.code, session.screen) {
        (KeyCode::Char('c'), _) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return ControlFlow::Break(());
        }
        (KeyCode::Esc, Screen::Main) => return ControlFlow::Break(()),
        (KeyCode::Esc, Screen::Playing | Screen::Paused) => session.toggle_pause(),
        (KeyCode::Esc, Screen::GameOver) => session.quit_to_menu(),
        (KeyCode::Enter, Screen::Main | Screen::GameOver) => session.start(),
        (KeyCode::Char(c), Screen::Playing)
            if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
        {
            match session.type_char(c) {
                Ok(transitions) => {
                    for transition in transitions {
                        debug!(?transition, "input");
                    }
                }
                Err(err) => session.err = Some(err.into()),
            }
        }
        _ => (),
    }

    ControlFlow::Continue(())
}

fn main_loop(
    stdout: &mut Stdout,
    session: &mut Session,
    last_frame: &mut Instant,
) -> anyhow::Result<ControlFlow<()>> {
    // Clear the previous frame
    queue!(stdout, Clear(ClearType::All))?;

    match session.screen {
        Screen::Main => screens::main_screen(stdout, session)?,
        Screen::Playing => screens::play_screen(stdout, session)?,
        Screen::Paused => screens::pause_screen(stdout, session)?,
        Screen::GameOver => screens::game_over_screen(stdout, session)?,
    };

    if let Some(err) = &session.err {
        screens::print_error(stdout, session, err)?;
    }

    // Render the queued frame
    stdout.flush()?;

    if event::poll(Duration::from_millis(16))? {
        match event::read()? {
            Event::Key(key) => {
                if handle_key(session, key).is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
            Event::Resize(columns, rows) => session.resize(columns, rows),
            _ => (),
        }
    }

    let dt = last_frame.elapsed().as_secs_f32();
    *last_frame = Instant::now();

    for transition in session.tick(dt)? {
        match transition {
            Transition::GameOver { score, .. } => info!(score, "session ended"),
            other => debug!(?other, "tick"),
        }
    }

    Ok(ControlFlow::Continue(()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        init_logging(path)?;
    }

    let config = GameConfig::try_from(&cli)?;

    let dictionary = match &cli.dictionary {
        Some(path) => Dictionary::load_from_file(path)?,
        None => (*DICTIONARY).clone(),
    };

    let high_scores = HighScores::load_or_backup(&config.scores_path)?;

    info!(words = dictionary.len(), "dictionary loaded");

    terminal::enable_raw_mode()?;

    // Get initial terminal size
    let (columns, rows) = terminal::size()?;

    let mut session = Session::new(config, dictionary, high_scores, columns, rows);

    let mut stdout = stdout();

    queue!(
        stdout,
        Hide,
        Clear(ClearType::All),
        MoveTo(columns / 2, rows / 2),
        Print("Loading...")
    )?;

    stdout.flush()?;

    let mut last_frame = Instant::now();

    loop {
        match main_loop(&mut stdout, &mut session, &mut last_frame) {
            Ok(ControlFlow::Break(())) => break,
            Ok(ControlFlow::Continue(())) => (),
            Err(err) => {
                warn!(%err, "frame failed");
                session.err = Some(err);
            }
        }
    }

    execute!(stdout, Clear(ClearType::All), Show)?;
    terminal::disable_raw_mode()?;

    Ok(())
}
