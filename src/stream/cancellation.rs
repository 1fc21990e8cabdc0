use crate::prelude::*;

/// cooperative cancellation flag shared between a caller and nested object
/// generation. checked at every emission point, cancelling never retracts
/// anything already emitted
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self { Self::default() }

    pub fn cancel(&self) {
        self.0.store(true, SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(SeqCst)
    }
}
