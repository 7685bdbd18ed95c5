use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::codec::{from_storage, to_display};
use crate::commands::{Cmd, HostSignal};
use crate::config::InputConfig;
use crate::editable::RecallHistory;
use crate::messages::{HostMsg, Msg, TimerMsg};
use crate::model::InputModel;
use crate::update::update;

use super::protocol::{HostMessage, Request};
use super::queue::MutationQueue;
use super::transport::Transport;

/// A message due for delivery at `due`
#[derive(Debug)]
struct Timer {
    due: Instant,
    msg: Msg,
}

/// Drives one input: applies host messages, executes commands, owns timers
pub struct App {
    model: InputModel,
    transport: Box<dyn Transport>,
    queue: MutationQueue,
    history: RecallHistory,
    timers: Vec<Timer>,
}

impl App {
    pub fn new(config: InputConfig, transport: Box<dyn Transport>) -> Self {
        let history = RecallHistory::new(config.history_limit);
        Self {
            model: InputModel::new(config),
            transport,
            queue: MutationQueue::new(),
            history,
            timers: Vec::new(),
        }
    }

    pub fn model(&self) -> &InputModel {
        &self.model
    }

    pub fn history(&self) -> &RecallHistory {
        &self.history
    }

    /// Apply a message, along with anything it causes to be queued
    pub fn dispatch(&mut self, msg: Msg) -> Result<()> {
        self.queue.push(msg);
        if !self.queue.begin() {
            tracing::trace!(pending = self.queue.len(), "queued behind running update");
            return Ok(());
        }

        let mut result = Ok(());
        while let Some(msg) = self.queue.pop() {
            if msg.is_mutation() {
                tracing::trace!(?msg, "applying mutation");
            }
            if matches!(msg, Msg::Host(HostMsg::Unmount)) {
                self.history.reset_walk();
            }
            if let Some(cmd) = update(&mut self.model, msg) {
                if let Err(e) = self.process_cmd(cmd) {
                    result = Err(e);
                    break;
                }
            }
        }
        self.queue.finish();
        result
    }

    /// Handle one decoded host message
    pub fn handle_message(&mut self, message: HostMessage) -> Result<()> {
        match message.into_request() {
            Request::Update(msg) => self.dispatch(msg),
            Request::StorageContent => {
                let content = self
                    .model
                    .storage_content()
                    .unwrap_or_else(|| self.model.content.clone());
                self.transport.post(&HostSignal::StorageContent { content })
            }
            Request::DisplayContent => {
                let content = self.model.display_content().unwrap_or_else(|| {
                    let resources = self.model.resources.as_slice();
                    to_display(&from_storage(&self.model.content, resources), resources)
                });
                self.transport.post(&HostSignal::DisplayContent { content })
            }
        }
    }

    /// Handle one raw protocol line. Malformed lines are logged and skipped.
    pub fn handle_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        match HostMessage::parse(line) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::warn!(error = %e, line, "skipping malformed host message");
                Ok(())
            }
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) -> Result<()> {
        match cmd {
            Cmd::Emit(signal) => {
                self.transport.post(&signal)?;
                match signal {
                    HostSignal::Submit => {
                        if let Some(content) = self.model.storage_content() {
                            self.history.push(&content);
                        }
                    }
                    HostSignal::RecallPrevious => self.recall_previous(),
                    _ => {}
                }
            }
            Cmd::ScheduleBlurCheck { generation, delay } => {
                self.schedule(
                    Instant::now() + delay,
                    TimerMsg::BlurCheck { generation }.into(),
                );
            }
            Cmd::ScheduleRemeasure => {
                self.schedule(Instant::now(), TimerMsg::Remeasure.into());
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd)?;
                }
            }
        }
        Ok(())
    }

    /// Restore the latest submitted input with the caret at its end
    fn recall_previous(&mut self) {
        if !self.model.config.recall_history {
            return;
        }
        let Some(entry) = self.history.previous().map(str::to_string) else {
            tracing::debug!("recall history empty");
            return;
        };
        // Queued: this runs inside the update that emitted the signal
        self.queue.push(HostMsg::Recall(entry).into());
    }

    fn schedule(&mut self, due: Instant, msg: Msg) {
        self.timers.push(Timer { due, msg });
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.due).min()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Deliver every timer due at or before `now`, earliest first
    pub fn fire_due_timers(&mut self, now: Instant) -> Result<()> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.timers)
                .into_iter()
                .partition(|t| t.due <= now);
        self.timers = pending;
        due.sort_by_key(|t| t.due);
        for timer in due {
            self.dispatch(timer.msg)?;
        }
        Ok(())
    }

    /// Run until `reader` reaches end of input.
    ///
    /// Lines are read on a separate thread so timers keep firing while the
    /// host is quiet.
    pub fn run<R>(&mut self, reader: R) -> Result<()>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<io::Result<String>>();
        thread::spawn(move || {
            for line in reader.lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        loop {
            let received = match self.next_deadline() {
                Some(due) => rx.recv_timeout(due.saturating_duration_since(Instant::now())),
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(line) => {
                    let line = line.context("reading host input")?;
                    self.handle_line(&line)?;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("host input closed");
                    break;
                }
            }
            self.fire_due_timers(Instant::now())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::{InputEvent, Key};
    use crate::runtime::transport::ChannelTransport;
    use std::sync::mpsc::Receiver;

    fn app() -> (App, Receiver<HostSignal>) {
        let (transport, rx) = ChannelTransport::pair();
        (App::new(InputConfig::default(), Box::new(transport)), rx)
    }

    fn drain(rx: &Receiver<HostSignal>) -> Vec<HostSignal> {
        rx.try_iter().collect()
    }

    #[test]
    fn test_submit_then_recall() {
        let (mut app, rx) = app();
        app.dispatch(HostMsg::Mount.into()).unwrap();
        app.dispatch(InputEvent::text("hello").into()).unwrap();
        app.dispatch(InputEvent::key(Key::Enter).into()).unwrap();
        assert_eq!(app.history().len(), 1);

        app.dispatch(HostMsg::SetContent(String::new()).into()).unwrap();
        drain(&rx);

        app.dispatch(InputEvent::key(Key::ArrowUp).into()).unwrap();
        let signals = drain(&rx);
        assert_eq!(signals[0], HostSignal::RecallPrevious);
        assert!(signals.contains(&HostSignal::ContentChanged {
            content: "hello".into()
        }));
        assert_eq!(app.model().storage_content().as_deref(), Some("hello"));
        assert_eq!(app.model().surface().unwrap().caret(), 5);
    }

    #[test]
    fn test_unmount_restarts_recall_walk() {
        let (mut app, rx) = app();
        app.dispatch(HostMsg::Mount.into()).unwrap();
        for entry in ["first", "second"] {
            app.dispatch(InputEvent::text(entry).into()).unwrap();
            app.dispatch(InputEvent::key(Key::Enter).into()).unwrap();
            app.dispatch(HostMsg::SetContent(String::new()).into()).unwrap();
        }
        app.dispatch(InputEvent::key(Key::ArrowUp).into()).unwrap();
        assert_eq!(app.model().storage_content().as_deref(), Some("second"));

        app.dispatch(HostMsg::Unmount.into()).unwrap();
        app.dispatch(HostMsg::SetContent(String::new()).into()).unwrap();
        app.dispatch(HostMsg::Mount.into()).unwrap();
        drain(&rx);

        app.dispatch(InputEvent::key(Key::ArrowUp).into()).unwrap();
        assert_eq!(app.model().storage_content().as_deref(), Some("second"));
    }

    #[test]
    fn test_recall_disabled_by_config() {
        let (transport, rx) = ChannelTransport::pair();
        let config = InputConfig {
            recall_history: false,
            ..InputConfig::default()
        };
        let mut app = App::new(config, Box::new(transport));
        app.dispatch(HostMsg::Mount.into()).unwrap();
        app.dispatch(InputEvent::text("hello").into()).unwrap();
        app.dispatch(InputEvent::key(Key::Enter).into()).unwrap();
        app.dispatch(HostMsg::SetContent(String::new()).into()).unwrap();
        drain(&rx);

        app.dispatch(InputEvent::key(Key::ArrowUp).into()).unwrap();
        assert_eq!(drain(&rx), vec![HostSignal::RecallPrevious]);
        assert_eq!(app.model().storage_content().as_deref(), Some(""));
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let (mut app, rx) = app();
        app.handle_line("{not json").unwrap();
        app.handle_line("").unwrap();
        app.handle_line(r#"{"type":"get-storage-content"}"#).unwrap();
        assert_eq!(
            drain(&rx),
            vec![HostSignal::StorageContent {
                content: String::new()
            }]
        );
    }

    #[test]
    fn test_remeasure_fires_on_next_tick() {
        let (mut app, rx) = app();
        app.handle_line(r#"{"type":"set-resources","resources":[{"id":"r1","type":"file","filePath":"a.rs"}]}"#)
            .unwrap();
        app.handle_line(r#"{"type":"mount"}"#).unwrap();
        assert_eq!(app.pending_timers(), 1);
        drain(&rx);

        app.fire_due_timers(Instant::now()).unwrap();
        assert_eq!(app.pending_timers(), 0);
        assert_eq!(
            drain(&rx),
            vec![HostSignal::LayoutChanged {
                measure: "@r1".into()
            }]
        );
    }

    #[test]
    fn test_run_reads_until_eof() {
        let (mut app, rx) = app();
        let input = "{\"type\":\"mount\"}\n{\"type\":\"input\",\"event\":{\"kind\":\"text\",\"text\":\"hi\"}}\n";
        app.run(io::Cursor::new(input.as_bytes().to_vec())).unwrap();
        assert!(drain(&rx).contains(&HostSignal::ContentChanged {
            content: "hi".into()
        }));
    }
}
