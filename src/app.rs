//! Loop principal: TUI interativa ou modo headless.
//!
//! A TUI roda em uma única thread: `tokio::select!` alterna entre eventos do
//! terminal, a busca em andamento e um tick de redesenho. A busca nunca
//! bloqueia a renderização, e o tracker recusa um segundo disparo enquanto
//! ela não termina.

use crate::client::LocationClient;
use crate::error::{AppError, FetchError, TrackerError};
use crate::tracker::{ResultTracker, TrackerState};
use crate::types::LocationResponse;
use crate::view::{self, ViewModel};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures_util::future::{BoxFuture, OptionFuture};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

type InFlight = BoxFuture<'static, Result<LocationResponse, FetchError>>;

/// O que uma tecla pede ao loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Trigger,
    Quit,
    None,
}

pub fn command_for_key(key: &KeyEvent) -> Command {
    if key.kind != KeyEventKind::Press {
        return Command::None;
    }
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('g') => Command::Trigger,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => Command::None,
    }
}

// ============================================================================
// Terminal
// ============================================================================

/// Raw mode + tela alternativa; restaura o terminal no drop, inclusive em erro.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

// ============================================================================
// TUI
// ============================================================================

pub async fn run_tui(
    tracker: &mut ResultTracker,
    client: Arc<dyn LocationClient>,
) -> Result<(), AppError> {
    let mut guard = TerminalGuard::new()?;
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK);
    let mut in_flight: Option<InFlight> = None;

    tracing::info!("TUI iniciada");

    loop {
        draw(&mut guard.terminal, tracker)?;

        tokio::select! {
            Some(outcome) = OptionFuture::from(in_flight.as_mut()), if in_flight.is_some() => {
                on_settled(tracker, &mut in_flight, outcome)?;
            }
            maybe_event = events.next() => {
                let event = match maybe_event {
                    Some(event) => event?,
                    None => break,
                };
                if let Event::Key(key) = event {
                    let command = command_for_key(&key);
                    if on_command(tracker, command, &client, &mut in_flight) == Step::Quit {
                        break;
                    }
                }
            }
            _ = tick.tick() => {}
        }
    }

    if in_flight.is_some() {
        tracing::warn!("saindo com uma busca em andamento; resultado descartado");
    }
    tracing::info!(results = tracker.results().len(), "TUI finalizada");
    Ok(())
}

/// Resultado de um comando aplicado pelo loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Started,
    Rejected,
    Quit,
}

/// Aplica um comando. Um disparo só cria a busca se o tracker aceitar `start_fetch`.
fn on_command(
    tracker: &mut ResultTracker,
    command: Command,
    client: &Arc<dyn LocationClient>,
    in_flight: &mut Option<InFlight>,
) -> Step {
    match command {
        Command::Trigger => {
            if tracker.start_fetch().is_err() {
                return Step::Rejected;
            }
            let client = Arc::clone(client);
            *in_flight = Some(Box::pin(async move { client.fetch_last_location().await }));
            Step::Started
        }
        Command::Quit => Step::Quit,
        Command::None => Step::Continue,
    }
}

/// Busca terminou: descarta o future e volta o tracker para `Idle`.
fn on_settled(
    tracker: &mut ResultTracker,
    in_flight: &mut Option<InFlight>,
    outcome: Result<LocationResponse, FetchError>,
) -> Result<(), TrackerError> {
    *in_flight = None;
    match outcome {
        Ok(response) => tracker.record_success(response).map(|_| ()),
        Err(e) => tracker.record_failure(&e),
    }
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    tracker: &mut ResultTracker,
) -> Result<(), AppError> {
    let stats = tracker.stats();
    let loading = match tracker.state() {
        TrackerState::Loading(pending) => Some(pending.started.elapsed()),
        TrackerState::Idle => None,
    };
    let results = Arc::clone(tracker.results());

    terminal.draw(|frame| {
        view::render(
            frame,
            &ViewModel {
                results: &results,
                stats,
                loading,
            },
        )
    })?;
    Ok(())
}

// ============================================================================
// Headless
// ============================================================================

/// Faz `count` buscas em sequência e devolve a tabela final em texto.
pub async fn run_headless<C>(
    tracker: &mut ResultTracker,
    client: &C,
    count: u32,
) -> Result<String, AppError>
where
    C: LocationClient + ?Sized,
{
    let mut failures = 0u32;
    for i in 1..=count {
        match tracker.handle_trigger(client).await? {
            Some(record) => {
                eprintln!(
                    "[{}/{}] {}, {} em {} ms",
                    i, count, record.address.street, record.address.city, record.execution_time
                );
            }
            None => {
                failures += 1;
                eprintln!("[{}/{}] falhou (detalhes no log)", i, count);
            }
        }
    }

    if failures > 0 {
        tracing::warn!(failures, count, "buscas com falha");
    }

    let stats = tracker.stats();
    Ok(view::render_text(tracker.results(), &stats))
}
