use futures_util::stream::{BoxStream, StreamExt};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{PlayerError, Result};

use super::feeder::ChunkFeeder;
use super::source::StreamChunk;

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// How a background stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The producer ran dry and the widget was marked done.
    Completed { chunks: usize },
    /// Consumption stopped early. Commands already sent stay on the widget
    /// and the session remains streaming.
    Cancelled { chunks: usize },
}

async fn consume(
    mut stream: BoxStream<'static, StreamChunk>,
    mut feeder: ChunkFeeder,
    token: CancellationToken,
) -> Result<StreamOutcome> {
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                log_info!("stream cancelled after {} chunks", feeder.chunks_fed());
                return Ok(StreamOutcome::Cancelled { chunks: feeder.chunks_fed() });
            }
            next = stream.next() => match next {
                Some(chunk) => {
                    if !feeder.feed(chunk)? {
                        return Ok(StreamOutcome::Cancelled { chunks: feeder.chunks_fed() });
                    }
                }
                None => {
                    feeder.finish();
                    return Ok(StreamOutcome::Completed { chunks: feeder.chunks_fed() });
                }
            }
        }
    }
}

/// Handle to an asynchronous streaming session.
#[derive(Debug)]
pub struct StreamingTask {
    cancel: CancellationToken,
    handle: JoinHandle<Result<StreamOutcome>>,
}

impl StreamingTask {
    pub(crate) fn spawn(
        runtime: &Handle,
        stream: BoxStream<'static, StreamChunk>,
        feeder: ChunkFeeder,
        cancel: CancellationToken,
    ) -> Self {
        let handle = runtime.spawn(consume(stream, feeder, cancel.clone()));
        Self { cancel, handle }
    }

    /// Stops consuming the producer before its next chunk.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the task. Encode failures inside the task surface here.
    pub async fn join(self) -> Result<StreamOutcome> {
        self.handle
            .await
            .map_err(|err| PlayerError::StreamTask(err.to_string()))?
    }
}
