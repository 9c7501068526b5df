//! Background conversion for keystroke-driven hosts.
//!
//! Every `submit` bumps a generation counter. The worker thread drains its
//! queue to the newest item and drops anything whose generation is no longer
//! current, both before converting and before publishing. `try_recv` applies
//! the same check, so a superseded result never reaches the caller.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use singlish_core::{ConversionResult, ConvertError, Converter};
use tracing::debug;

struct ConversionWork {
    input: String,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkerResult {
    pub generation: u64,
    pub input: String,
    pub result: Result<ConversionResult, ConvertError>,
}

pub struct ConversionWorker {
    work_tx: mpsc::Sender<ConversionWork>,
    result_rx: Mutex<mpsc::Receiver<WorkerResult>>,
    generation: Arc<AtomicU64>,
}

impl ConversionWorker {
    /// Spawn a worker over the global table and settings.
    pub fn spawn() -> io::Result<Self> {
        Self::with_converter(Converter::global())
    }

    pub fn with_converter(converter: Converter<'static>) -> io::Result<Self> {
        let generation = Arc::new(AtomicU64::new(0));
        let (work_tx, work_rx) = mpsc::channel::<ConversionWork>();
        let (result_tx, result_rx) = mpsc::channel::<WorkerResult>();

        let gen = Arc::clone(&generation);
        thread::Builder::new()
            .name("singlish-convert".into())
            .spawn(move || conversion_worker(work_rx, result_tx, gen, converter))?;

        Ok(Self {
            work_tx,
            result_rx: Mutex::new(result_rx),
            generation,
        })
    }

    /// Queue `input`, superseding anything submitted earlier.
    /// Returns the generation assigned to it.
    pub fn submit(&self, input: impl Into<String>) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.work_tx.send(ConversionWork {
            input: input.into(),
            generation,
        });
        generation
    }

    /// Discard in-flight work and any undelivered result.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Next result for the current generation, if one is ready.
    pub fn try_recv(&self) -> Option<WorkerResult> {
        let rx = self.result_rx.lock().ok()?;
        while let Ok(result) = rx.try_recv() {
            if result.generation == self.current_generation() {
                return Some(result);
            }
        }
        None
    }
}

fn conversion_worker(
    rx: mpsc::Receiver<ConversionWork>,
    tx: mpsc::Sender<WorkerResult>,
    gen: Arc<AtomicU64>,
    converter: Converter<'static>,
) {
    while let Ok(work) = rx.recv() {
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }

        if latest.generation != gen.load(Ordering::SeqCst) {
            debug!(generation = latest.generation, "skipping stale work");
            continue;
        }

        let result = converter.convert(&latest.input);

        if latest.generation != gen.load(Ordering::SeqCst) {
            debug!(generation = latest.generation, "dropping stale result");
            continue;
        }

        if tx
            .send(WorkerResult {
                generation: latest.generation,
                input: latest.input,
                result,
            })
            .is_err()
        {
            break;
        }
    }
}
