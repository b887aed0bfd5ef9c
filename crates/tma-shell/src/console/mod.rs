//! Native preview host.
//!
//! A line-driven stand-in for the browser page: every command maps to one
//! screen operation, and the latest view is printed after it.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use anyhow::Context;
use tma_app::ScreenView;
use tma_core::ColorScheme;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::bootstrap::wiring::ScreenHandle;

pub const HELP: &str = concat!(
    "команды: text <...> | pick <n|эмодзи> | clear | bot | server | main",
    " | theme <light|dark> | help | quit"
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Text(String),
    Pick(PickTarget),
    Clear,
    Bot,
    Server,
    Main,
    Theme(ColorScheme),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickTarget {
    /// One-based position as shown in the selector row
    Position(usize),
    Glyph(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("пустая команда")]
    Empty,
    #[error("неизвестная команда: {0}")]
    Unknown(String),
    #[error("команде `{0}` нужен аргумент")]
    MissingArgument(&'static str),
    #[error("неизвестная тема: {0}")]
    UnknownScheme(String),
}

pub fn parse_command(line: &str) -> Result<ConsoleCommand, ParseError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name {
        "" => Err(ParseError::Empty),
        // Text keeps inner spacing; an empty argument clears the field.
        "text" => Ok(ConsoleCommand::Text(rest.to_string())),
        "pick" if rest.is_empty() => Err(ParseError::MissingArgument("pick")),
        "pick" => Ok(ConsoleCommand::Pick(match rest.parse::<usize>() {
            Ok(position) => PickTarget::Position(position),
            Err(_) => PickTarget::Glyph(rest.to_string()),
        })),
        "clear" => Ok(ConsoleCommand::Clear),
        "bot" => Ok(ConsoleCommand::Bot),
        "server" => Ok(ConsoleCommand::Server),
        "main" => Ok(ConsoleCommand::Main),
        "theme" if rest.is_empty() => Err(ParseError::MissingArgument("theme")),
        "theme" => ColorScheme::parse(rest)
            .map(ConsoleCommand::Theme)
            .ok_or_else(|| ParseError::UnknownScheme(rest.to_string())),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

/// Run the preview until `quit` or end of input.
///
/// Starts the screen, prints its first view, then executes one command per
/// line. The screen is torn down on exit.
pub async fn run_console<R, W>(handle: &ScreenHandle, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let latest: Rc<RefCell<Option<ScreenView>>> = Rc::new(RefCell::new(None));
    let sink = latest.clone();
    handle
        .screen
        .set_render_hook(Rc::new(move |view| *sink.borrow_mut() = Some(view.clone())));

    handle.screen.start();
    writeln!(out, "{HELP}")?;
    flush_view(&latest, out)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read console input")? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(err) => {
                writeln!(out, "! {err}")?;
                continue;
            }
        };

        if command == ConsoleCommand::Quit {
            break;
        }
        execute(handle, command, out).await?;
        flush_view(&latest, out)?;
    }

    handle.screen.teardown();
    Ok(())
}

async fn execute<W: Write>(
    handle: &ScreenHandle,
    command: ConsoleCommand,
    out: &mut W,
) -> anyhow::Result<()> {
    let screen = &handle.screen;
    match command {
        ConsoleCommand::Text(text) => screen.set_text(text),
        ConsoleCommand::Pick(PickTarget::Position(position)) => {
            // Positions are shown one-based; 0 is out of range like any other miss.
            let picked = match position.checked_sub(1) {
                Some(index) => screen.select_index(index),
                None => Err(tma_core::FormError::UnknownChoice("#0".to_string())),
            };
            if let Err(err) = picked {
                writeln!(out, "! {err}")?;
            }
        }
        ConsoleCommand::Pick(PickTarget::Glyph(glyph)) => {
            if let Err(err) = screen.select(&glyph) {
                writeln!(out, "! {err}")?;
            }
        }
        ConsoleCommand::Clear => screen.clear(),
        ConsoleCommand::Bot => screen.send_to_bot(),
        ConsoleCommand::Server => screen.send_to_server().await,
        ConsoleCommand::Main => match &handle.emulated_bridge {
            // Goes through the bound handler, as a real host click would.
            Some(bridge) => bridge.click_main_button(),
            None => screen.trigger_primary_action(),
        },
        ConsoleCommand::Theme(scheme) => match &handle.emulated_bridge {
            Some(bridge) => bridge.push_theme(scheme),
            None => screen.apply_color_scheme(scheme),
        },
        ConsoleCommand::Help => writeln!(out, "{HELP}")?,
        ConsoleCommand::Quit => {}
    }
    Ok(())
}

fn flush_view<W: Write>(latest: &RefCell<Option<ScreenView>>, out: &mut W) -> anyhow::Result<()> {
    if let Some(view) = latest.borrow_mut().take() {
        writeln!(out, "{}\n", view.render_text())?;
        out.flush()?;
    }
    Ok(())
}
