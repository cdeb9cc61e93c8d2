//! Terminal (TUI) mode implementation.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use pantry::config::Config;
use pantry::core::buffer::Buffer;
use pantry::core::input::Key;
use pantry::core::library::Library;
use pantry::core::lookup::{LookupSequencer, LookupTicket};
use pantry::core::names::NameSet;
use pantry::core::session::{EditorSession, KeyOutcome};
use pantry::terminal;
use pantry::terminal::events::EditorEvent;
use pantry::terminal::render::EditorView;
use tracing::{debug, info, warn};

use super::{RunError, theme_from_config};

/// Longest wait for terminal input while nothing is scheduled
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Known-name lookups answered by a background thread
struct LookupWorker {
    requests: Sender<LookupTicket>,
    responses: Receiver<(LookupTicket, NameSet)>,
}

impl LookupWorker {
    fn spawn(root: PathBuf) -> io::Result<Self> {
        let (requests, request_rx) = mpsc::channel::<LookupTicket>();
        let (response_tx, responses) = mpsc::channel();

        thread::Builder::new()
            .name("pantry-lookup".to_string())
            .spawn(move || {
                for ticket in request_rx {
                    let names = match Library::load(&root) {
                        Ok(library) => library.known_names(),
                        Err(e) => {
                            warn!(error = %e, "known-name lookup failed");
                            continue;
                        }
                    };
                    if response_tx.send((ticket, names)).is_err() {
                        break;
                    }
                }
                debug!("lookup worker stopped");
            })?;

        Ok(Self {
            requests,
            responses,
        })
    }
}

/// What the event loop should do after a key
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Editor state outside the session: lookups, status line, quit guard
struct Editor {
    session: EditorSession,
    lookups: LookupSequencer,
    worker: Option<LookupWorker>,
    status: Option<String>,
    quit_armed: bool,
}

impl Editor {
    fn status_line(&self) -> String {
        let buffer = self.session.buffer();
        let (line, column) = self.session.cursor_position();
        let modified = if buffer.modified { " [+]" } else { "" };
        let message = self.status.as_deref().unwrap_or("C-s save  C-q quit");
        format!(
            " {}{}  {}:{}  {}",
            buffer.display_name(),
            modified,
            line + 1,
            column + 1,
            message
        )
    }

    /// How long to wait for input before the next due lookup
    fn poll_timeout(&self, now: Instant) -> Duration {
        self.lookups
            .time_until_due(now)
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL))
    }

    /// Issue due lookups and apply the newest response.
    ///
    /// Without a worker, due tickets are dropped so nothing stays scheduled.
    fn pump_lookups(&mut self, now: Instant) -> bool {
        let due = self.lookups.poll(now);
        let Some(worker) = &self.worker else {
            return false;
        };
        if let Some(ticket) = due {
            if worker.requests.send(ticket).is_err() {
                warn!("lookup worker is gone");
                self.worker = None;
                return false;
            }
        }

        let mut changed = false;
        while let Ok((ticket, names)) = worker.responses.try_recv() {
            if self.lookups.accept(ticket) {
                debug!(ticket = ticket.id(), "applying known names");
                self.session.set_known_names(names);
                changed = true;
            }
        }
        changed
    }

    fn run_command(&mut self, command: &str) -> Flow {
        match command {
            "save" => {
                match self.session.save() {
                    Ok(()) => {
                        self.status = Some("saved".to_string());
                        // The saved recipe may add names for other recipes
                        self.lookups.request_now(Instant::now());
                    }
                    Err(e) => {
                        warn!(error = %e, "save failed");
                        self.status = Some(format!("save failed: {}", e));
                    }
                }
                Flow::Continue
            }
            "quit" => {
                if self.session.buffer().modified && !self.quit_armed {
                    self.quit_armed = true;
                    self.status = Some("unsaved changes; C-q again to quit".to_string());
                    return Flow::Continue;
                }
                Flow::Quit
            }
            other => {
                warn!(command = other, "unknown command");
                Flow::Continue
            }
        }
    }

    fn handle_key(&mut self, config: &Config, key: &Key) -> Flow {
        if let Some(command) = config.command_for(key) {
            return self.run_command(command);
        }
        self.quit_armed = false;
        self.status = None;

        match self.session.handle_key(key) {
            KeyOutcome::Edited | KeyOutcome::Accepted(_) => {
                self.lookups.touch(Instant::now());
            }
            KeyOutcome::Navigated | KeyOutcome::Dismissed | KeyOutcome::Ignored => {}
        }
        Flow::Continue
    }
}

/// Run the interactive editor on one recipe file
pub fn run_editor(path: &Path, library: Option<&Path>, config: &Config) -> Result<(), RunError> {
    let theme = theme_from_config(config)?;
    let buffer = Buffer::open_or_create(path)?;
    let session =
        EditorSession::new(buffer, NameSet::new()).with_tab_width(config.tab_width());

    let worker = library
        .map(|dir| LookupWorker::spawn(dir.to_path_buf()))
        .transpose()?;
    let mut editor = Editor {
        session,
        lookups: LookupSequencer::new(config.debounce()),
        worker,
        status: None,
        quit_armed: false,
    };
    editor.lookups.request_now(Instant::now());
    info!(path = %path.display(), "editing recipe");

    let _raw_mode = terminal::raw::RawMode::new()?;
    let mut events = terminal::events::EventHandler::new();
    let mut view = EditorView::new();
    let mut size = crossterm::terminal::size()?;
    let mut stdout = io::stdout();
    let mut dirty = true;

    loop {
        let now = Instant::now();
        dirty |= editor.pump_lookups(now);

        if dirty {
            let status = editor.status_line();
            view.render(
                &mut stdout,
                &editor.session,
                &theme,
                size,
                config.dropdown_height(),
                &status,
            )?;
            dirty = false;
        }

        // Wake up in time for a pending lookup
        if !events.poll(editor.poll_timeout(now))? {
            continue;
        }

        match events.read()? {
            EditorEvent::Key(key) => {
                if editor.handle_key(config, &key) == Flow::Quit {
                    break;
                }
                dirty = true;
            }
            EditorEvent::Click { column, row } => {
                if let Some(offset) = view.offset_at(&editor.session, column, row, size) {
                    editor.session.click(offset);
                    dirty = true;
                }
            }
            EditorEvent::Resize(cols, rows) => {
                size = (cols, rows);
                dirty = true;
            }
            EditorEvent::None => {}
        }
    }

    info!(path = %path.display(), "editor closed");
    Ok(())
}
