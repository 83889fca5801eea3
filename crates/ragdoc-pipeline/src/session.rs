//! Per-session orchestration.
//!
//! State machine: `Idle → Building → Ready → Querying → Ready`, with
//! `Failed` entered on any build or query error. A failed build leaves the
//! previous index in place; a failed query leaves the index reusable, so
//! both `Failed` states accept a corrected retry without restarting the
//! session. Build and query are single-flight and mutually exclusive.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ragdoc_core::error::{Error, Result};
use ragdoc_core::traits::{Embedder, Generator};
use ragdoc_core::types::{QueryParams, SplitConfig};
use ragdoc_index::{CosineRetriever, Retriever, VectorIndex};

use crate::{build_index, query_against};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Building,
    Ready,
    Querying,
    Failed,
}

struct SessionState {
    phase: Phase,
    index: Option<Arc<VectorIndex>>,
    generation: u64,
}

/// One user session. Owns at most one index; a rebuild replaces it
/// atomically. Sessions share no state with each other.
pub struct RagSession {
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    retriever: Box<dyn Retriever>,
    state: Mutex<SessionState>,
}

impl RagSession {
    pub fn new(embedder: Arc<dyn Embedder>, generator: Arc<dyn Generator>) -> Self {
        Self::with_retriever(embedder, generator, Box::new(CosineRetriever))
    }

    pub fn with_retriever(
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
        retriever: Box<dyn Retriever>,
    ) -> Self {
        Self {
            embedder,
            generator,
            retriever,
            state: Mutex::new(SessionState {
                phase: Phase::Idle,
                index: None,
                generation: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    /// The committed index, if any. Handed out as a shared snapshot so a
    /// concurrent rebuild can never mutate what a reader holds.
    pub fn index(&self) -> Option<Arc<VectorIndex>> {
        self.lock().index.clone()
    }

    /// Build (or rebuild) the session index; returns the chunk count.
    ///
    /// On failure the previous index, if any, stays committed and queryable.
    /// A build completing after it has been superseded is discarded rather
    /// than committed out of order (last-write-wins via the generation
    /// counter).
    pub fn build(&self, document: &str, cfg: &SplitConfig) -> Result<usize> {
        let my_generation = {
            let mut state = self.lock();
            match state.phase {
                Phase::Building => return Err(Error::SessionBusy("build")),
                Phase::Querying => return Err(Error::SessionBusy("query")),
                Phase::Idle | Phase::Ready | Phase::Failed => {}
            }
            state.phase = Phase::Building;
            state.generation += 1;
            state.generation
        };

        // The lock is released while the embedder runs; only the commit
        // below re-enters the critical section.
        let built = build_index(self.embedder.as_ref(), document, cfg)
            .and_then(VectorIndex::from_entries);

        let mut state = self.lock();
        match built {
            Ok(index) => {
                if state.generation != my_generation {
                    tracing::warn!(generation = my_generation, "discarding stale build result");
                    return Err(Error::SessionBusy("build"));
                }
                let len = index.len();
                state.index = Some(Arc::new(index));
                state.phase = Phase::Ready;
                tracing::info!(chunks = len, "index committed");
                Ok(len)
            }
            Err(err) => {
                state.phase = Phase::Failed;
                tracing::info!(error = %err, "build failed, previous index untouched");
                Err(err)
            }
        }
    }

    /// Answer `query_text` against the current index.
    pub fn query(&self, query_text: &str, params: &QueryParams) -> Result<String> {
        let index = {
            let mut state = self.lock();
            match state.phase {
                Phase::Building => return Err(Error::SessionBusy("build")),
                Phase::Querying => return Err(Error::SessionBusy("query")),
                Phase::Idle | Phase::Ready | Phase::Failed => {}
            }
            let Some(index) = state.index.clone() else {
                return Err(Error::IndexNotReady);
            };
            state.phase = Phase::Querying;
            index
        };

        let answer = query_against(
            self.embedder.as_ref(),
            self.generator.as_ref(),
            self.retriever.as_ref(),
            query_text,
            &index,
            params,
        );

        let mut state = self.lock();
        state.phase = if answer.is_ok() { Phase::Ready } else { Phase::Failed };
        answer
    }
}
