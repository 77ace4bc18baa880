//! One-shot completion signal for a confetti run

use serde::Serialize;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    /// Every particle left the viewport
    Completed,
    /// Cancelled, superseded by a newer run, or the instance was dropped
    Cancelled,
}

#[derive(Default)]
struct Shared {
    outcome: Option<RunOutcome>,
    waker: Option<Waker>,
}

/// Create a connected signal/completion pair
pub fn completion_pair() -> (CompletionSignal, Completion) {
    let shared = Rc::new(RefCell::new(Shared::default()));
    (
        CompletionSignal {
            shared: Some(shared.clone()),
        },
        Completion { shared },
    )
}

/// Sending half, held by the running instance.
///
/// Settles at most once. Dropping it unsettled settles `Cancelled`, so a
/// caller awaiting a run never waits on a signal nobody holds.
pub struct CompletionSignal {
    shared: Option<Rc<RefCell<Shared>>>,
}

impl CompletionSignal {
    pub fn settle(mut self, outcome: RunOutcome) {
        self.fire(outcome);
    }

    fn fire(&mut self, outcome: RunOutcome) {
        let Some(shared) = self.shared.take() else {
            return;
        };
        let waker = {
            let mut state = shared.borrow_mut();
            if state.outcome.is_none() {
                state.outcome = Some(outcome);
            }
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl Drop for CompletionSignal {
    fn drop(&mut self) {
        self.fire(RunOutcome::Cancelled);
    }
}

/// Future returned by `generate()`; resolves exactly once with the run's outcome
pub struct Completion {
    shared: Rc<RefCell<Shared>>,
}

impl Completion {
    pub fn is_settled(&self) -> bool {
        self.shared.borrow().outcome.is_some()
    }

    /// Outcome if the run has finished, without waiting
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.shared.borrow().outcome
    }
}

impl Future for Completion {
    type Output = RunOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<RunOutcome> {
        let mut state = self.shared.borrow_mut();
        match state.outcome {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                state.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
