//! Async view over a blocking completion stream.
//!
//! Every pull (including opening the upstream request) runs on tokio's blocking pool via
//! `spawn_blocking`; the iterator moves into the worker for one `next()` and comes back with the
//! result. Only one pull is ever in flight, so deltas keep their upstream order.

use anyhow::{anyhow, Result};
use futures::Stream;
use llm_client::{CompletionClient, DeltaIter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};
use tokio::task::JoinHandle;

type Opener = Box<dyn FnOnce() -> Result<DeltaIter> + Send>;

/// Upstream state that travels between the stream and its worker.
enum Cursor {
    Unopened(Opener),
    Open(DeltaIter),
}

/// Result of one pull: the cursor to keep (None once finished) and the item to yield.
struct Pulled {
    cursor: Option<Cursor>,
    item: Option<Result<String>>,
}

impl Cursor {
    /// Runs on the worker. Finished or failed iterators are dropped here, off the scheduler.
    fn pull(self) -> Pulled {
        let mut deltas = match self {
            Cursor::Open(deltas) => deltas,
            Cursor::Unopened(open) => match open() {
                Ok(deltas) => deltas,
                Err(e) => {
                    return Pulled {
                        cursor: None,
                        item: Some(Err(e)),
                    }
                }
            },
        };
        match deltas.next() {
            Some(Ok(delta)) => Pulled {
                cursor: Some(Cursor::Open(deltas)),
                item: Some(Ok(delta)),
            },
            Some(Err(e)) => Pulled {
                cursor: None,
                item: Some(Err(e)),
            },
            None => Pulled {
                cursor: None,
                item: None,
            },
        }
    }
}

/// Lazy, finite, non-restartable stream of content deltas for one request.
///
/// Ends silently when the upstream iterator is exhausted; yields an error once (and then ends)
/// when opening or pulling fails. No retry.
pub struct DeltaStream {
    cursor: Option<Cursor>,
    in_flight: Option<JoinHandle<Pulled>>,
}

impl DeltaStream {
    /// Streams the completion of `prompt` from `client`. Nothing is sent upstream until the first poll.
    pub fn open(client: Arc<dyn CompletionClient>, prompt: String) -> Self {
        Self::from_opener(move || client.open_stream(&prompt))
    }

    /// Streams the iterator produced by `open`, which runs on the blocking pool at first poll.
    pub fn from_opener<F>(open: F) -> Self
    where
        F: FnOnce() -> Result<DeltaIter> + Send + 'static,
    {
        Self {
            cursor: Some(Cursor::Unopened(Box::new(open))),
            in_flight: None,
        }
    }
}

impl Stream for DeltaStream {
    type Item = Result<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        if this.in_flight.is_none() {
            match this.cursor.take() {
                Some(cursor) => {
                    this.in_flight = Some(tokio::task::spawn_blocking(move || cursor.pull()))
                }
                None => return Poll::Ready(None),
            }
        }
        let Some(handle) = this.in_flight.as_mut() else {
            return Poll::Ready(None);
        };

        let joined = ready!(Pin::new(handle).poll(cx));
        this.in_flight = None;
        match joined {
            Ok(pulled) => {
                this.cursor = pulled.cursor;
                Poll::Ready(pulled.item)
            }
            Err(e) => Poll::Ready(Some(Err(anyhow!("Delta worker failed: {}", e)))),
        }
    }
}

impl Drop for DeltaStream {
    fn drop(&mut self) {
        // An unfinished upstream may own a blocking HTTP client; release it on the blocking pool.
        if let Some(cursor) = self.cursor.take() {
            if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                runtime.spawn_blocking(move || drop(cursor));
            }
        }
    }
}
