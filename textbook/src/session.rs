//! Interactive terminal reader
//!
//! Reads one command per line, turns it into a navigator [`Event`] and
//! prints the resulting page. Commands that leave the state unchanged print
//! a short explanation instead of repeating the page.

use crate::content_model::Book;
use crate::navigator::{Direction, Event, NavState, Navigator, Screen};
use crate::render::Renderer;
use std::io::{BufRead, Write};
use thiserror::Error;

const HELP: &str = "\
Commands:
  start         open the first chapter
  next, n       next chapter
  prev, p       previous chapter
  goto <id>     jump to a chapter by id
  toc           list chapters
  sidebar       toggle the chapter sidebar
  close         close the sidebar
  help          show this help
  quit, q       leave the reader";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Dispatch(Event),
    Toc,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

fn parse_command(line: &str) -> Command {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Command::Empty;
    };
    let argument = words.next();

    match (name, argument) {
        ("start", None) => Command::Dispatch(Event::StartReading),
        ("next" | "n", None) => Command::Dispatch(Event::Navigate(Direction::Next)),
        ("prev" | "p", None) => Command::Dispatch(Event::Navigate(Direction::Prev)),
        ("goto", Some(id)) => Command::Dispatch(Event::Select(id.to_string())),
        ("goto", None) => Command::Invalid("goto needs a chapter id, see 'toc'".to_string()),
        ("sidebar", None) => Command::Dispatch(Event::ToggleSidebar),
        ("close", None) => Command::Dispatch(Event::CloseSidebar),
        ("toc", None) => Command::Toc,
        ("help" | "?", None) => Command::Help,
        ("quit" | "q" | "exit", None) => Command::Quit,
        _ => Command::Invalid(format!("Unknown command '{}', type 'help'", line.trim())),
    }
}

/// Run a reading session until `quit` or end of input
///
/// # Parameters
/// * `book` - The validated book
/// * `renderer` - Page renderer
/// * `input` - Command source, one command per line
/// * `output` - Destination for pages and messages
///
/// # Returns
/// * `Ok(NavState)` - The state the reader ended in
/// * `Err(SessionError)` - Reading input or writing output failed
pub fn run<R: Renderer, I: BufRead, W: Write>(
    book: &Book,
    renderer: &R,
    input: I,
    output: &mut W,
) -> Result<NavState, SessionError> {
    let mut navigator = Navigator::new(book);

    writeln!(output, "{}", renderer.render_chapter(book, &navigator.state()))?;
    writeln!(output, "Type 'start' to begin reading, 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;

        match parse_command(&line) {
            Command::Dispatch(event) => {
                let before = navigator.state();
                let transition = navigator.dispatch(&event);

                if transition.state == before {
                    writeln!(output, "{}", no_op_message(&navigator, &event))?;
                    continue;
                }
                if transition.scroll_to_top {
                    writeln!(output, "{}", "=".repeat(72))?;
                }
                writeln!(output, "{}", renderer.render_chapter(book, &transition.state))?;
            }
            Command::Toc => write_toc(output, &navigator)?,
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Quit => break,
            Command::Empty => {}
            Command::Invalid(message) => writeln!(output, "{}", message)?,
        }
    }

    log::debug!("Reader finished at {:?}", navigator.state());
    Ok(navigator.state())
}

/// Explain why an event left the state unchanged
fn no_op_message(navigator: &Navigator<'_>, event: &Event) -> String {
    match event {
        Event::Select(id) => format!("No chapter with id '{}', see 'toc'", id),
        Event::Navigate(_) if navigator.screen() == Screen::Cover => {
            "Still on the cover, type 'start' to begin".to_string()
        }
        Event::Navigate(Direction::Prev) => "Already at the first chapter".to_string(),
        Event::Navigate(Direction::Next) => "Already at the last chapter".to_string(),
        Event::CloseSidebar => "The sidebar is already closed".to_string(),
        Event::StartReading | Event::ToggleSidebar => "Nothing changed".to_string(),
    }
}

/// List chapters with their ids, marking the current one
fn write_toc<W: Write>(output: &mut W, navigator: &Navigator<'_>) -> Result<(), SessionError> {
    let current = match navigator.screen() {
        Screen::Cover => None,
        Screen::Chapter(index) => Some(index),
    };

    for (index, chapter) in navigator.book().chapters().iter().enumerate() {
        let marker = if current == Some(index) { "*" } else { " " };
        writeln!(
            output,
            "{} {:>2}. {:<24} {}",
            marker, chapter.number, chapter.id, chapter.title
        )?;
    }
    Ok(())
}

/// Errors that can occur in the terminal reader
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
