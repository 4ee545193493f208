use crate::component::{HandleResult, SharedComponent};

use crossterm::event::Event;
use tracing::{debug, error};

use std::{
    sync::{
        mpsc::{self, Sender},
        Arc, PoisonError, RwLock,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use super::{thread_group::ThreadGroup, util::any_to_string, Thread, ThreadError, ThreadResult};

const POLL_TIMEOUT: Duration = Duration::from_millis(500);

/// Reads terminal input and hands it to the registered components.
pub struct EventThread {
    handle: Option<JoinHandle<ThreadResult>>,
    stop_channel_tx: Sender<()>,
    listeners: Arc<RwLock<Vec<SharedComponent>>>,
}

impl EventThread {
    pub fn new(thread_group: &ThreadGroup) -> Result<Self, ThreadError> {
        let (stop_channel_tx, stop_channel_rx) = mpsc::channel::<()>();
        let terminate_group_channel_tx = thread_group.get_terminate_group_channel_tx();
        let listeners = Arc::new(RwLock::new(vec![]));
        let listeners_clone = listeners.clone();

        let handle = thread::Builder::new()
            .name("pacer-input".to_string())
            .spawn(move || -> ThreadResult {
                while stop_channel_rx.try_recv().is_err() {
                    let res = crossterm::event::poll(POLL_TIMEOUT).and_then(|ready| {
                        if ready {
                            crossterm::event::read().map(Some)
                        } else {
                            Ok(None)
                        }
                    });
                    match res {
                        Ok(Some(event)) => Self::notify_event_listeners(&listeners_clone, &event),
                        Ok(None) => (),
                        Err(e) => {
                            error!(error = %e, "failed to read terminal event");
                            let _ = terminate_group_channel_tx.send(());
                            return Err(ThreadError::Io(e));
                        }
                    }
                }
                Ok(())
            })?;

        Ok(EventThread {
            handle: Some(handle),
            stop_channel_tx,
            listeners,
        })
    }

    pub fn register_event_listener(&mut self, listener: SharedComponent) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    fn notify_event_listeners(listeners: &Arc<RwLock<Vec<SharedComponent>>>, event: &Event) {
        for listener in listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            let result = listener
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .handle_event(event);
            if result == HandleResult::NotHandled {
                debug!(?event, "event not handled");
            }
        }
    }
}

impl Thread for EventThread {
    fn name(&self) -> &str {
        "pacer-input"
    }

    fn terminate(&mut self) -> ThreadResult {
        if let Some(handle) = self.handle.take() {
            let _ = self.stop_channel_tx.send(());
            match handle.join() {
                Err(e) => Err(ThreadError::Panic(any_to_string(&e))),
                Ok(res) => res,
            }
        } else {
            Ok(())
        }
    }
}
