//! # Model Consumers
//!
//! The contract between the batch pipelines and a trainable model.
//!
//! * [`ModelConsumer`] - one training step per batch, threading a [`GlobalStep`].
//! * [`TrainingLoop`] - epoch drivers for both pipelines.
//! * [`SharedEmbedding`] - a tied embedding table for split-window models.

mod model_consumer;
mod shared_embedding;
mod training_loop;

#[doc(inline)]
pub use model_consumer::{GlobalStep, ModelConsumer, StepOutput};
#[doc(inline)]
pub use shared_embedding::{EmbeddedRows, SharedEmbedding};
#[doc(inline)]
pub use training_loop::{EpochSummary, TrainingLoop, TrainingLoopOptions};
