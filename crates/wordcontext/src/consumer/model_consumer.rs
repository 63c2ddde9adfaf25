//! # Model Consumer Contract

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::WCResult;

/// The global training step counter.
///
/// The counter is owned by the training loop and threaded through every
/// [`ModelConsumer::train_step`] call; consumers return the advanced value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GlobalStep(pub u64);

impl GlobalStep {
    /// The raw counter value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// The following step.
    pub fn incremented(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for GlobalStep {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The result of one training step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutput {
    /// The scalar batch loss.
    pub loss: f32,

    /// The advanced global step.
    pub step: GlobalStep,
}

/// A trainable model fed by one of the batch pipelines.
///
/// `B` is the batch type; [`crate::batching::SymmetricBatch`] for
/// context-prediction models, [`crate::batching::SplitBatch`] for split
/// left/right context models. Network wiring, loss, and optimizer are the
/// implementor's business.
pub trait ModelConsumer<B> {
    /// Train on one batch.
    ///
    /// ## Arguments
    /// * `step` - the current global step.
    /// * `batch` - the input batch.
    ///
    /// ## Returns
    /// The batch loss and the advanced global step.
    fn train_step(
        &mut self,
        step: GlobalStep,
        batch: &B,
    ) -> WCResult<StepOutput>;

    /// Persist the model parameters.
    fn save_weights(
        &self,
        path: &Path,
    ) -> WCResult<()>;
}
