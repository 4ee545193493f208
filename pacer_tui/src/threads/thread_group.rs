use std::sync::{
    self,
    mpsc::{Receiver, Sender},
};

use tracing::{error, info};

use super::{Thread, ThreadResult};

/// Threads that live and die together: the first termination signal stops them all.
pub struct ThreadGroup {
    terminate_channel_rx: Receiver<()>,
    terminate_channel_tx: Sender<()>,
    threads: Vec<Box<dyn Thread>>,
}

impl ThreadGroup {
    pub fn new() -> Self {
        let (terminate_channel_tx, terminate_channel_rx) = sync::mpsc::channel();
        Self {
            terminate_channel_rx,
            terminate_channel_tx,
            threads: vec![],
        }
    }

    pub fn add_thread(&mut self, thread: Box<dyn Thread>) {
        self.threads.push(thread);
    }

    pub fn get_terminate_group_channel_tx(&self) -> Sender<()> {
        self.terminate_channel_tx.clone()
    }

    /// Blocks until a member signals termination, then terminates every member in
    /// insertion order.
    pub fn join(self) -> Vec<(String, ThreadResult)> {
        let mut results = vec![];
        let _ = self.terminate_channel_rx.recv();
        info!(threads = self.threads.len(), "terminating thread group");
        for mut thread in self.threads {
            let res = thread.terminate();
            if let Err(e) = &res {
                error!(thread = thread.name(), error = %e, "thread terminated abnormally");
            }
            results.push((thread.name().to_string(), res));
        }
        results
    }
}

impl Default for ThreadGroup {
    fn default() -> Self {
        Self::new()
    }
}
