use super::{
    session::Session,
    state::Target,
    word::Word,
};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{style, Attribute, Color, Print, PrintStyledContent, Stylize},
};
use std::io::{self, Stdout};

/// Words this large or larger are drawn bold.
const BOLD_SIZE: f32 = 2.0;

pub fn main_screen(stdout: &mut Stdout, session: &Session) -> io::Result<()> {
    let x = (session.columns / 2).saturating_sub(10);
    let y = (session.rows / 2) as f32;

    queue!(
        stdout,
        MoveTo(x, (y * 0.5) as u16),
        PrintStyledContent("T I P".cyan().bold()),
        MoveTo(x, (y * 0.75) as u16),
        PrintStyledContent("Enter - Start".green().bold()),
        MoveTo(x, (y * 0.8) as u16),
        PrintStyledContent("ESC - Quit".red().bold())
    )?;

    print_scores(stdout, session, x, (y * 0.95) as u16)?;

    Ok(())
}

pub fn play_screen(stdout: &mut Stdout, session: &Session) -> io::Result<()> {
    let game = session.game();

    print_status(stdout, session)?;

    // Marks where words can no longer be started
    let offset_x = game.entry_offset() as u16;
    for y in 1..session.rows.saturating_sub(1) {
        queue!(
            stdout,
            MoveTo(offset_x, y),
            PrintStyledContent("¦".dark_grey())
        )?;
    }

    let current = game.current_word();

    for word in game.words() {
        let typed = match current {
            Some(current) if std::ptr::eq(current, word) => game.entry().chars().count(),
            _ => 0,
        };

        print_word(stdout, session, word, typed)?;
    }

    queue!(
        stdout,
        MoveTo(0, bottom_row(session)),
        PrintStyledContent("ESC - Pause".yellow().bold())
    )?;

    if let Target::Typing { entry, .. } = game.target() {
        queue!(
            stdout,
            MoveTo(14, bottom_row(session)),
            PrintStyledContent(style(format!("> {entry}")).green().bold())
        )?;
    }

    Ok(())
}

pub fn pause_screen(stdout: &mut Stdout, session: &Session) -> io::Result<()> {
    print_status(stdout, session)?;

    let x = (session.columns / 2).saturating_sub(10);
    let y = session.rows / 2;

    queue!(
        stdout,
        MoveTo(x, y),
        PrintStyledContent("Paused".yellow().bold()),
        MoveTo(x, y + 1),
        PrintStyledContent("ESC - Resume".green().bold())
    )?;

    Ok(())
}

pub fn game_over_screen(stdout: &mut Stdout, session: &Session) -> io::Result<()> {
    let game = session.game();
    let x = (session.columns / 2).saturating_sub(10);
    let y = (session.rows / 2) as f32;

    queue!(
        stdout,
        MoveTo(x, (y * 0.5) as u16),
        PrintStyledContent("Game Over".red().bold()),
        MoveTo(x, (y * 0.6) as u16),
        PrintStyledContent(style(format!("Score: {}", game.score())).bold()),
        MoveTo(x, (y * 0.65) as u16),
        PrintStyledContent(style(format!("Level: {}", game.level())).bold()),
        MoveTo(x, (y * 0.75) as u16),
        PrintStyledContent("Enter - Play Again".green().bold()),
        MoveTo(x, (y * 0.8) as u16),
        PrintStyledContent("ESC - Menu".yellow().bold())
    )?;

    print_scores(stdout, session, x, (y * 0.95) as u16)?;

    Ok(())
}

pub fn print_error(
    stdout: &mut Stdout,
    session: &Session,
    err: impl std::fmt::Display,
) -> io::Result<()> {
    queue!(
        stdout,
        MoveTo((session.columns as f32 * 0.4) as u16, bottom_row(session)),
        PrintStyledContent("Error: ".red().bold()),
        PrintStyledContent(style(err).red().bold())
    )?;

    Ok(())
}

fn bottom_row(session: &Session) -> u16 {
    session.rows.saturating_sub(1)
}

fn print_status(stdout: &mut Stdout, session: &Session) -> io::Result<()> {
    let game = session.game();

    queue!(
        stdout,
        MoveTo(0, 0),
        PrintStyledContent(style(format!("Score: {}", game.score())).green().bold()),
        Print("   "),
        PrintStyledContent(style(format!("Level: {}", game.level())).blue().bold()),
        Print("   "),
        PrintStyledContent(style(format!("Lives: {}", game.lives())).red().bold()),
        Print("   "),
        PrintStyledContent(style(format!("Words: {}", game.word_count())).white()),
        Print("   "),
        PrintStyledContent(style(format!("Best: {}", session.high_scores().best())).yellow())
    )?;

    Ok(())
}

fn print_scores(stdout: &mut Stdout, session: &Session, x: u16, y: u16) -> io::Result<()> {
    queue!(stdout, MoveTo(x, y), PrintStyledContent("High Scores".bold()))?;

    for (rank, score) in session.high_scores().scores().iter().enumerate() {
        queue!(
            stdout,
            MoveTo(x, y + 1 + rank as u16),
            Print(format!("{:>2}. {}", rank + 1, score))
        )?;
    }

    Ok(())
}

/// Draws the visible part of a word, the first `typed` characters in green.
fn print_word(stdout: &mut Stdout, session: &Session, word: &Word, typed: usize) -> io::Result<()> {
    let boldness = if word.size() >= BOLD_SIZE {
        Attribute::Bold
    } else {
        Attribute::NormalIntensity
    };

    let left = word.x.floor() as i32;

    for (j, c) in word.text().chars().enumerate() {
        let column = left + j as i32;

        if column < 0 || column >= i32::from(session.columns) {
            continue;
        }

        let color = if j < typed { Color::Green } else { Color::White };

        queue!(
            stdout,
            MoveTo(column as u16, word.y as u16),
            PrintStyledContent(style(c).with(color).attribute(boldness))
        )?;
    }

    Ok(())
}
