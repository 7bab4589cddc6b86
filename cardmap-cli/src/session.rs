//! Interactive session: terminal input drives a screen rendered as text.

use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use cardmap_core::{
    CardDeck, KeyboardEvent, KeyboardNotifications, PlaceSearch, Screen, ScreenDriver, UiEvent,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedSender;

use crate::console::{Console, ConsoleCarousel, ConsoleMap};
use crate::input::{InputLine, parse_line};
use crate::{CliConfig, CliError};

/// Extra wait past the debounce window for an edit's search to land.
const SETTLE: Duration = Duration::from_millis(50);

/// Run a screen against `search`, reading lines from `input` and rendering
/// to `output` until `:quit` or end of input.
///
/// # Errors
///
/// Returns [`CliError::Screen`] when the screen fails,
/// [`CliError::ReadInput`] or [`CliError::WriteOutput`] on terminal IO
/// failures.
pub(crate) async fn run_session<S, R, W>(
    config: &CliConfig,
    search: S,
    input: R,
    output: W,
) -> Result<(), CliError>
where
    S: PlaceSearch + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let console = Console::new(output);
    let screen = Screen::new(
        ConsoleMap::new(Rc::clone(&console), config.region),
        ConsoleCarousel::new(Rc::clone(&console), CardDeck::registered()),
        config.screen,
    );
    let keyboard = KeyboardNotifications::default();
    let (driver, events) = ScreenDriver::new(screen, search);
    let driver = driver.with_keyboard(keyboard.subscribe());

    let run = driver.run();
    tokio::pin!(run);
    let feed = feed_input(input, &events, &keyboard, config.screen.debounce);
    let fed = tokio::select! {
        finished = &mut run => {
            drop(finished?);
            return output_status(&console);
        }
        result = feed => result,
    };
    drop(events);
    let outcome = run.await;
    fed?;
    let closed = outcome?;
    log::debug!("session ended showing {} places", closed.results().len());
    drop(closed);
    output_status(&console)
}

fn output_status<W: Write>(console: &Console<W>) -> Result<(), CliError> {
    console
        .take_error()
        .map_or(Ok(()), |err| Err(CliError::WriteOutput(err)))
}

async fn feed_input<R: AsyncBufRead + Unpin>(
    input: R,
    events: &UnboundedSender<UiEvent>,
    keyboard: &KeyboardNotifications,
    debounce: Duration,
) -> Result<(), CliError> {
    let mut lines = input.lines();
    // The initial search may still be running.
    let mut unsettled = true;
    while let Some(line) = lines.next_line().await.map_err(CliError::ReadInput)? {
        let parsed = match parse_line(&line) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::warn!("ignoring input {line:?}: {err}");
                continue;
            }
        };
        let event = match parsed {
            InputLine::Query(text) => {
                unsettled = true;
                UiEvent::TextChanged(text)
            }
            command => {
                if unsettled {
                    settle(debounce).await;
                    unsettled = false;
                }
                match command {
                    InputLine::Select(index) => UiEvent::CardSelected(index),
                    InputLine::KeyboardShow(height) => {
                        notify(keyboard, KeyboardEvent::WillShow { height });
                        continue;
                    }
                    InputLine::KeyboardHide => {
                        notify(keyboard, KeyboardEvent::WillHide);
                        continue;
                    }
                    InputLine::Query(_) | InputLine::Quit => break,
                }
            }
        };
        if events.send(event).is_err() {
            return Ok(());
        }
    }
    if unsettled {
        settle(debounce).await;
    }
    close(events);
    Ok(())
}

fn notify(keyboard: &KeyboardNotifications, event: KeyboardEvent) {
    if keyboard.post(event) == 0 {
        log::debug!("no screen is following the keyboard");
    }
}

/// Wait until the last edit has been searched.
async fn settle(debounce: Duration) {
    tokio::time::sleep(debounce + SETTLE).await;
}

fn close(events: &UnboundedSender<UiEvent>) {
    if events.send(UiEvent::Close).is_err() {
        log::debug!("screen already closed");
    }
}
