use crate::component::Component;

use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use std::io::Stdout;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::thread_group::ThreadGroup;
use super::util::any_to_string;
use super::{Thread, ThreadError, ThreadResult};

#[derive(PartialEq, Debug)]
pub enum Message {
    Quit,
    Render,
}

/// Redraws the root component every frame period, or sooner when asked to.
pub struct RendererThread {
    handle: Option<JoinHandle<ThreadResult>>,
    message_channel_tx: Sender<Message>,
}

impl RendererThread {
    pub fn new(
        root_component: Arc<RwLock<dyn Component>>,
        message_channel_tx: Sender<Message>,
        message_channel_rx: Receiver<Message>,
        mut terminal: Terminal<CrosstermBackend<Stdout>>,
        frame_period: Duration,
        thread_group: &ThreadGroup,
    ) -> Result<Self, ThreadError> {
        let terminate_group_channel_tx = thread_group.get_terminate_group_channel_tx();

        let handle = thread::Builder::new()
            .name("pacer-render".to_string())
            .spawn(move || -> ThreadResult {
                info!(frame_ms = frame_period.as_millis() as u64, "renderer started");
                loop {
                    let res = terminal.draw(|frame| {
                        let area = frame.area();
                        root_component
                            .write()
                            .unwrap_or_else(PoisonError::into_inner)
                            .render_with_command_keys_help_bar(frame, area)
                    });
                    if let Err(e) = res {
                        error!(error = %e, "failed to draw frame");
                        let _ = terminate_group_channel_tx.send(());
                        return Err(ThreadError::Io(e));
                    }
                    match next_message(&message_channel_rx, frame_period) {
                        Message::Render => (),
                        Message::Quit => break,
                    }
                }

                let _ = terminate_group_channel_tx.send(());
                Ok(())
            })?;

        Ok(Self {
            handle: Some(handle),
            message_channel_tx,
        })
    }
}

/// A frame period without messages is an implicit render request.
fn next_message(message_channel_rx: &Receiver<Message>, frame_period: Duration) -> Message {
    match message_channel_rx.recv_timeout(frame_period) {
        Ok(message) => message,
        Err(RecvTimeoutError::Timeout) => Message::Render,
        Err(RecvTimeoutError::Disconnected) => Message::Quit,
    }
}

impl Thread for RendererThread {
    fn name(&self) -> &str {
        "pacer-render"
    }

    fn terminate(&mut self) -> ThreadResult {
        if let Some(handle) = self.handle.take() {
            let _ = self.message_channel_tx.send(Message::Quit);
            match handle.join() {
                Err(e) => Err(ThreadError::Panic(any_to_string(&e))),
                Ok(res) => res,
            }
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use std::{sync::mpsc, time::Duration};

    use super::{next_message, Message};

    #[test]
    fn test_timeout_means_render() {
        let (_tx, rx) = mpsc::channel::<Message>();
        assert_eq!(next_message(&rx, Duration::from_millis(1)), Message::Render);
    }

    #[test]
    fn test_queued_quit_is_delivered() {
        let (tx, rx) = mpsc::channel();
        tx.send(Message::Quit).unwrap();
        assert_eq!(next_message(&rx, Duration::from_secs(1)), Message::Quit);
    }

    #[test]
    fn test_disconnected_channel_means_quit() {
        let (tx, rx) = mpsc::channel::<Message>();
        drop(tx);
        assert_eq!(next_message(&rx, Duration::from_secs(1)), Message::Quit);
    }
}
