//! Verse reading service
//!
//! Issues lookup and search requests against a verse provider. Each request runs as its
//! own background task; completions come back over a channel in the order they finish.

use std::sync::mpsc;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Request, Verse};
use crate::infrastructure::traits::VerseProvider;

/// Result of one finished request.
#[derive(Debug)]
pub struct Completion {
    pub request: Request,
    pub result: ApplicationResult<Vec<Verse>>,
}

/// Service dispatching requests to a language-scoped provider.
pub struct ReaderService {
    provider: Arc<dyn VerseProvider>,
}

impl ReaderService {
    /// Create a new reader service.
    pub fn new(provider: Arc<dyn VerseProvider>) -> Self {
        Self { provider }
    }

    /// Start every request as an independent task.
    ///
    /// The returned receiver yields exactly one [`Completion`] per request and is
    /// closed once all of them have been delivered.
    pub fn dispatch(&self, requests: Vec<Request>) -> mpsc::Receiver<Completion> {
        let (tx, rx) = mpsc::channel();
        for request in requests {
            let provider = Arc::clone(&self.provider);
            let tx = tx.clone();
            debug!("dispatch: {} '{}'", request.kind(), request.argument());
            rayon::spawn(move || {
                let result = fetch_with(provider.as_ref(), &request);
                // Receiver gone means the caller stopped listening; nothing left to do.
                let _ = tx.send(Completion { request, result });
            });
        }
        rx
    }

    /// Dispatch all requests and hand each completion to `on_complete` as it arrives.
    ///
    /// `on_complete` runs on the calling thread, one completion at a time.
    pub fn run<F>(&self, requests: Vec<Request>, mut on_complete: F)
    where
        F: FnMut(Completion),
    {
        let expected = requests.len();
        let mut handled = 0usize;
        for completion in self.dispatch(requests) {
            handled += 1;
            on_complete(completion);
        }
        debug!("run: handled {handled}/{expected} completions");
    }
}

#[instrument(skip(provider))]
fn fetch_with(provider: &dyn VerseProvider, request: &Request) -> ApplicationResult<Vec<Verse>> {
    match request {
        Request::Lookup(reference) => {
            provider
                .get(reference)
                .map_err(|e| ApplicationError::Lookup {
                    reference: reference.clone(),
                    source: Box::new(e),
                })
        }
        Request::Search(pattern) => {
            provider
                .search(pattern)
                .map_err(|e| ApplicationError::Search {
                    pattern: pattern.clone(),
                    source: Box::new(e),
                })
        }
    }
}
