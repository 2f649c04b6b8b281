use std::io::stdout;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::input::{KeyMap, handle_event};
use crate::app::tasks::TaskRunner;
use crate::app::{App, Message, Model, update};

use super::effects::{dispatch_tasks, make_file_watcher};

/// How long to wait for terminal input before checking other sources.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization, drawing, or reading
    /// terminal events fails.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - glance requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(
            self.file_path.clone(),
            self.config.clone(),
            (size.width, size.height),
        );
        model.watch_enabled = self.watch_enabled;
        model.request_load();

        let result = execute!(stdout(), EnableMouseCapture)
            .context("Failed to enable mouse capture")
            .and_then(|()| Self::event_loop(&mut terminal, &mut model));

        // Restore terminal
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let (tx, rx) = mpsc::channel();
        let runner = TaskRunner::new(tx);
        let keys = KeyMap::from_config(&model.config.keybindings);
        // Held for its lifetime; changes arrive on `rx` as `FileChanged`.
        let _file_watcher = make_file_watcher(model, &runner);
        let mut needs_render = true;

        loop {
            dispatch_tasks(model, &runner);

            if drain_completions(&rx, model) {
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }

            if event::poll(POLL_INTERVAL)? {
                if let Some(msg) = handle_event(&event::read()?, model, &keys) {
                    apply(model, msg, &runner);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = handle_event(&event::read()?, model, &keys) {
                        apply(model, msg, &runner);
                        needs_render = true;
                    }
                }
            }
        }
        Ok(())
    }
}

fn apply(model: &mut Model, msg: Message, runner: &TaskRunner) {
    *model = update(std::mem::take(model), msg);
    dispatch_tasks(model, runner);
}

/// Apply every finished background task. Returns whether any arrived.
fn drain_completions(rx: &Receiver<Message>, model: &mut Model) -> bool {
    let mut any = false;
    while let Ok(msg) = rx.try_recv() {
        *model = update(std::mem::take(model), msg);
        any = true;
    }
    any
}
