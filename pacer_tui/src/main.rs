use std::io::Stdout;
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, RwLock};

use clap::Parser;
use pacer_sim::{MonotonicClock, Settings, Simulator};
use pacer_tui::{
    cli::Cli,
    components,
    error::PacerTuiResult,
    logging,
    threads::{
        setup_terminate_group_panic_hook, EventThread, GeneratorThread, RendererMessage,
        RendererThread, Thread, ThreadGroup, ThreadResult,
    },
    tui,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(results) => {
            eprintln!("Thread termination status:");
            let mut clean = true;
            for (name, res) in results {
                match res {
                    Ok(_) => eprintln!("> {name}: terminated normally"),
                    Err(e) => {
                        clean = false;
                        eprintln!("> {name}: terminated abnormally: {e}");
                    }
                }
            }
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("pacer: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> PacerTuiResult<Vec<(String, ThreadResult)>> {
    logging::init(&cli.log_file)?;
    let settings = cli.settings()?;
    info!(?settings, "starting pacer");

    let simulator = Simulator::new(
        settings.pacing(),
        settings.retention(),
        Arc::new(MonotonicClock::new()),
    );
    let (message_channel_tx, message_channel_rx) = mpsc::channel();
    let root = Arc::new(RwLock::new(components::Root::new(
        message_channel_tx.clone(),
        &simulator,
    )));

    let terminal = tui::init_terminal()?;
    let results = start_threads(
        &simulator,
        &settings,
        root,
        terminal,
        message_channel_tx,
        message_channel_rx,
    )
    .map(|thread_group| {
        setup_terminate_group_panic_hook(&thread_group);
        thread_group.join()
    });
    tui::restore_terminal()?;
    let results = results?;
    info!("pacer stopped");
    Ok(results)
}

fn start_threads(
    simulator: &Simulator,
    settings: &Settings,
    root: Arc<RwLock<components::Root>>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    message_channel_tx: Sender<RendererMessage>,
    message_channel_rx: Receiver<RendererMessage>,
) -> PacerTuiResult<ThreadGroup> {
    let mut thread_group = ThreadGroup::new();
    let generator_thread = GeneratorThread::new(simulator, settings.tick_period())?;
    let mut event_thread = EventThread::new(&thread_group)?;
    event_thread.register_event_listener(root.clone());
    let renderer_thread = match RendererThread::new(
        root,
        message_channel_tx,
        message_channel_rx,
        terminal,
        settings.frame_period(),
        &thread_group,
    ) {
        Ok(renderer_thread) => renderer_thread,
        Err(e) => {
            let _ = event_thread.terminate();
            return Err(e.into());
        }
    };

    thread_group.add_thread(Box::new(event_thread));
    thread_group.add_thread(Box::new(renderer_thread));
    thread_group.add_thread(Box::new(generator_thread));
    Ok(thread_group)
}
