//! Application state and key dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use kyc_core::{LookupError, SearchController, SearchState, UserProfile};
use tokio::sync::mpsc;

use crate::client::ProfileClient;

type LookupResult = Result<UserProfile, LookupError>;

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
///
/// Owned by the event loop. Lookups run as spawned tasks and report back over
/// a channel; [`App::drain_results`] applies them in arrival order.
pub struct App {
  /// Email being typed.
  pub input: String,

  /// Search state machine; the only place results are stored.
  pub search: SearchController<ProfileClient>,

  results_tx: mpsc::UnboundedSender<LookupResult>,
  results_rx: mpsc::UnboundedReceiver<LookupResult>,
}

impl App {
  pub fn new(client: ProfileClient) -> Self {
    let (results_tx, results_rx) = mpsc::unbounded_channel();
    Self {
      input: String::new(),
      search: SearchController::new(Arc::new(client)),
      results_tx,
      results_rx,
    }
  }

  pub fn state(&self) -> &SearchState {
    self.search.state()
  }

  pub fn base_url(&self) -> &str {
    self.search.lookup().base_url()
  }

  // ── Lookups ───────────────────────────────────────────────────────────────

  /// Submit the current input. A new submit is accepted even while earlier
  /// lookups are still in flight.
  pub fn submit(&mut self) {
    let Some(submission) = self.search.begin(&self.input) else {
      return;
    };
    let client = Arc::clone(self.search.lookup());
    let tx = self.results_tx.clone();
    tokio::spawn(async move {
      let result = submission.run(client.as_ref()).await;
      deliver(&tx, result);
    });
  }

  /// Apply every lookup result that has arrived since the last call.
  /// Returns how many were applied.
  pub fn drain_results(&mut self) -> usize {
    let mut applied = 0;
    while let Ok(result) = self.results_rx.try_recv() {
      self.search.resolve(result);
      applied += 1;
    }
    applied
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
      return true;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
      match key.code {
        KeyCode::Char('c') => return false,
        KeyCode::Char('u') => self.input.clear(),
        _ => {}
      }
      return true;
    }

    match key.code {
      KeyCode::Enter => self.submit(),
      KeyCode::Esc if self.input.is_empty() => return false,
      KeyCode::Esc => self.input.clear(),
      KeyCode::Backspace => {
        self.input.pop();
      }
      KeyCode::Char(c) => self.input.push(c),
      _ => {}
    }
    true
  }
}

/// Hand a finished lookup back to the event loop. Returns `false` if the
/// receiver is gone, which only happens once the app is shutting down.
fn deliver(tx: &mpsc::UnboundedSender<LookupResult>, result: LookupResult) -> bool {
  match tx.send(result) {
    Ok(()) => true,
    Err(mpsc::error::SendError(result)) => {
      tracing::debug!(ok = result.is_ok(), "lookup finished after shutdown; result dropped");
      false
    }
  }
}
