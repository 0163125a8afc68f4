use std::sync::mpsc;
use std::thread;
use tiny_skia as sk;

use crate::engine::{Candidate, Engine, ProgressReport};
use crate::error::{EvolveError, Result};
use crate::settings::EvolutionConfig;

/// messages from the engine thread to whoever is watching
#[derive(Clone, Debug)]
pub enum EngineUpdate {
    Started { width: u32, height: u32, seed: u64, initial_fitness: f64 },
    Progress(ProgressReport),
}

/// a running engine. updates stream in while it works; `join` hands back the final best
pub struct EngineHandle {
    pub updates: mpsc::Receiver<EngineUpdate>,
    handle: thread::JoinHandle<Result<Candidate>>,
}

impl EngineHandle {
    /// block until the run finishes
    pub fn join(self) -> Result<Candidate> {
        self.handle.join().map_err(|_| EvolveError::WorkerDisconnected)?
    }
}

/// build the engine on the caller's thread (so config errors surface here),
/// then run it to completion on a background "engine" thread
pub fn spawn_engine(target: sk::Pixmap, cfg: EvolutionConfig) -> Result<EngineHandle> {
    profiling::scope!("spawn_engine");
    let engine = Engine::new(target, cfg)?;
    let (update_tx, updates) = mpsc::channel();

    let handle = thread::Builder::new().name("engine".to_owned()).spawn(move || {
        // receiver may already be gone; the run still completes
        let _ = update_tx.send(EngineUpdate::Started {
            width: engine.target().width(),
            height: engine.target().height(),
            seed: engine.seed,
            initial_fitness: engine.best().fitness,
        });

        engine.run(|report| {
            let _ = update_tx.send(EngineUpdate::Progress(*report));
        })
    })?;

    Ok(EngineHandle { updates, handle })
}
