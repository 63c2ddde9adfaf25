//! # Training Loop
//!
//! Drives a [`ModelConsumer`] from one of the batch pipelines, owning the
//! [`GlobalStep`] counter.

use std::{
    io::{BufRead, Seek},
    path::Path,
};

use crate::{
    WCResult,
    WordContextError,
    batching::{SplitBatch, SplitBatchStream, SymmetricBatch, SymmetricBatcher},
    consumer::{GlobalStep, ModelConsumer},
    types::IndexType,
};

/// Options for [`TrainingLoop`].
#[derive(Debug, Clone)]
pub struct TrainingLoopOptions {
    /// The number of epochs to run.
    pub n_epochs: usize,

    /// Log a loss report every `report_interval` global steps.
    pub report_interval: u64,
}

impl Default for TrainingLoopOptions {
    fn default() -> Self {
        Self {
            n_epochs: 100,
            report_interval: 1000,
        }
    }
}

impl TrainingLoopOptions {
    /// Set the number of epochs.
    pub fn with_n_epochs(
        self,
        n_epochs: usize,
    ) -> Self {
        Self { n_epochs, ..self }
    }

    /// Set the loss report interval.
    pub fn with_report_interval(
        self,
        report_interval: u64,
    ) -> Self {
        Self {
            report_interval,
            ..self
        }
    }

    /// Build a [`TrainingLoop`] starting at step zero.
    pub fn init(self) -> WCResult<TrainingLoop> {
        if self.report_interval == 0 {
            return Err(WordContextError::InvalidOption(
                "report_interval must be > 0".to_string(),
            ));
        }
        Ok(TrainingLoop {
            options: self,
            step: GlobalStep::default(),
            report: LossReport::default(),
        })
    }
}

/// Per-epoch training statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochSummary {
    /// The zero-based epoch index.
    pub epoch: usize,

    /// The number of batches trained.
    pub batches: usize,

    /// The number of examples trained.
    pub samples: u64,

    /// The mean batch loss; `None` for an epoch without batches.
    pub mean_loss: Option<f32>,
}

#[derive(Default)]
struct EpochStats {
    batches: usize,
    samples: u64,
    loss_sum: f64,
}

impl EpochStats {
    fn record(
        &mut self,
        samples: usize,
        loss: f32,
    ) {
        self.batches += 1;
        self.samples += samples as u64;
        self.loss_sum += loss as f64;
    }

    fn summary(
        &self,
        epoch: usize,
    ) -> EpochSummary {
        EpochSummary {
            epoch,
            batches: self.batches,
            samples: self.samples,
            mean_loss: (self.batches > 0).then(|| (self.loss_sum / self.batches as f64) as f32),
        }
    }
}

/// Losses accumulated since the last report.
#[derive(Debug, Clone, Default)]
struct LossReport {
    loss_sum: f64,
    count: usize,
}

impl LossReport {
    fn record(
        &mut self,
        loss: f32,
    ) {
        self.loss_sum += loss as f64;
        self.count += 1;
    }

    /// The mean loss of the window; clearing it.
    fn take_mean(&mut self) -> Option<f32> {
        let report = std::mem::take(self);
        (report.count > 0).then(|| (report.loss_sum / report.count as f64) as f32)
    }
}

/// An epoch driver which threads the global step through a consumer.
///
/// Periodic reports log the mean loss of every batch trained since the
/// previous report.
#[derive(Debug, Clone)]
pub struct TrainingLoop {
    options: TrainingLoopOptions,
    step: GlobalStep,
    report: LossReport,
}

impl TrainingLoop {
    /// Resume from a previously reached step.
    pub fn with_step(
        self,
        step: GlobalStep,
    ) -> Self {
        Self { step, ..self }
    }

    /// The options.
    pub fn options(&self) -> &TrainingLoopOptions {
        &self.options
    }

    /// The current global step.
    pub fn step(&self) -> GlobalStep {
        self.step
    }

    /// Train one batch, advancing the global step.
    ///
    /// ## Errors
    /// * consumer errors, unchanged.
    /// * [`WordContextError::External`] if the consumer did not advance the step.
    pub fn train_batch<B, M>(
        &mut self,
        model: &mut M,
        batch: &B,
    ) -> WCResult<f32>
    where
        M: ModelConsumer<B>,
    {
        let out = model.train_step(self.step, batch)?;
        if out.step <= self.step {
            return Err(WordContextError::External(format!(
                "model consumer returned step {} at step {}",
                out.step, self.step
            )));
        }
        self.step = out.step;
        self.report.record(out.loss);
        Ok(out.loss)
    }

    /// On a report step, the mean loss since the previous report.
    fn take_report(&mut self) -> Option<f32> {
        if self.step.get() % self.options.report_interval != 0 {
            return None;
        }
        self.report.take_mean()
    }

    /// Run the configured epochs over a symmetric-window batcher.
    ///
    /// Each epoch rewinds `reader`. Reported progress is the batch index
    /// over `n_tokens / batch_size`.
    ///
    /// ## Arguments
    /// * `model` - the consumer.
    /// * `batcher` - the batch source.
    /// * `reader` - the seekable corpus.
    /// * `n_tokens` - the in-vocabulary token count; see
    ///   [`crate::vocab::VocabCounts::n_tokens`].
    pub fn run_symmetric_epochs<I, R, M>(
        &mut self,
        model: &mut M,
        batcher: &mut SymmetricBatcher<I>,
        reader: &mut R,
        n_tokens: u64,
    ) -> WCResult<Vec<EpochSummary>>
    where
        I: IndexType,
        R: BufRead + Seek,
        M: ModelConsumer<SymmetricBatch<I>>,
    {
        let expected_batches = n_tokens as f64 / batcher.options().batch_size as f64;

        let mut summaries = Vec::with_capacity(self.options.n_epochs);
        for epoch in 0..self.options.n_epochs {
            let mut stats = EpochStats::default();
            for (batch_idx, batch) in batcher.epoch(&mut *reader)?.enumerate() {
                let batch = batch?;
                let loss = self.train_batch(model, &batch)?;
                stats.record(batch.len(), loss);

                if let Some(loss) = self.take_report() {
                    let progress = if expected_batches > 0.0 {
                        batch_idx as f64 / expected_batches
                    } else {
                        0.0
                    };
                    log::info!(
                        "Epoch {epoch}, step {}, {:.1}% - loss: {loss:.4}",
                        self.step,
                        100.0 * progress
                    );
                }
            }

            let summary = stats.summary(epoch);
            log::info!("Epoch {epoch} done: {summary:?}");
            summaries.push(summary);
        }
        Ok(summaries)
    }

    /// Run the configured epochs over an endless split-window stream.
    ///
    /// An epoch ends once at least `samples_per_epoch` examples have been
    /// trained; conventionally the corpus token count, see
    /// [`crate::vocab::FeatureArchive::n_total_tokens`]. If the stream ends,
    /// training stops with the partial epoch included.
    pub fn run_split_epochs<R, I, M>(
        &mut self,
        model: &mut M,
        stream: &mut SplitBatchStream<R, I>,
        samples_per_epoch: u64,
    ) -> WCResult<Vec<EpochSummary>>
    where
        R: BufRead + Seek,
        I: IndexType,
        M: ModelConsumer<SplitBatch<I>>,
    {
        if samples_per_epoch == 0 {
            return Err(WordContextError::InvalidOption(
                "samples_per_epoch must be > 0".to_string(),
            ));
        }

        let mut summaries = Vec::with_capacity(self.options.n_epochs);
        for epoch in 0..self.options.n_epochs {
            let mut stats = EpochStats::default();
            let mut ended = false;
            while stats.samples < samples_per_epoch {
                let Some(batch) = stream.next() else {
                    ended = true;
                    break;
                };
                let batch = batch?;
                let loss = self.train_batch(model, &batch)?;
                stats.record(batch.len(), loss);

                if let Some(loss) = self.take_report() {
                    log::info!(
                        "Epoch {epoch}, step {}, {}/{samples_per_epoch} - loss: {loss:.4}",
                        self.step,
                        stats.samples
                    );
                }
            }

            let summary = stats.summary(epoch);
            log::info!("Epoch {epoch} done: {summary:?}");
            summaries.push(summary);

            if ended {
                log::warn!("Batch stream ended during epoch {epoch}");
                break;
            }
        }
        Ok(summaries)
    }

    /// Finish training; saving the consumer's weights when a path is given.
    pub fn finish<B, M>(
        &self,
        model: &M,
        save_path: Option<&Path>,
    ) -> WCResult<()>
    where
        M: ModelConsumer<B>,
    {
        match save_path {
            Some(path) => {
                log::info!("Saving weights at step {}: {}", self.step, path.display());
                model.save_weights(path)
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempdir::TempDir;

    use super::*;
    use crate::{
        batching::{SplitBatcherOptions, SymmetricBatcherOptions},
        consumer::StepOutput,
        corpus::{CaseMode, LoopingReader},
        vocab::Vocabulary,
    };

    #[derive(Default)]
    struct CountingModel {
        calls: usize,
        samples: usize,
        stall: bool,
        ramp: bool,
    }

    impl<B> ModelConsumer<B> for CountingModel
    where
        B: BatchLen,
    {
        fn train_step(
            &mut self,
            step: GlobalStep,
            batch: &B,
        ) -> WCResult<StepOutput> {
            self.calls += 1;
            self.samples += batch.batch_len();
            let loss = if self.ramp { step.get() as f32 } else { 0.5 };
            let step = if self.stall { step } else { step.incremented() };
            Ok(StepOutput { loss, step })
        }

        fn save_weights(
            &self,
            path: &Path,
        ) -> WCResult<()> {
            std::fs::write(path, self.calls.to_string())?;
            Ok(())
        }
    }

    trait BatchLen {
        fn batch_len(&self) -> usize;
    }

    impl BatchLen for SymmetricBatch<i32> {
        fn batch_len(&self) -> usize {
            self.len()
        }
    }

    impl BatchLen for SplitBatch<i32> {
        fn batch_len(&self) -> usize {
            self.len()
        }
    }

    #[test]
    fn test_symmetric_epochs() {
        let vocab = Vocabulary::unknown_last(["a", "b", "c"]);
        let mut batcher = SymmetricBatcherOptions::default()
            .with_window(1)
            .with_batch_size(2)
            .with_seed(Some(1))
            .init::<i32>(&vocab)
            .unwrap();
        // 8 tokens; 5 examples per epoch.
        let mut reader = Cursor::new("a b c a b c a b");

        let mut training = TrainingLoopOptions::default()
            .with_n_epochs(2)
            .with_report_interval(1)
            .init()
            .unwrap();
        let mut model = CountingModel::default();

        let summaries = training
            .run_symmetric_epochs(&mut model, &mut batcher, &mut reader, 8)
            .unwrap();

        assert_eq!(summaries.len(), 2);
        for (epoch, summary) in summaries.iter().enumerate() {
            assert_eq!(summary.epoch, epoch);
            assert_eq!(summary.batches, 3);
            assert_eq!(summary.samples, 5);
            assert_eq!(summary.mean_loss, Some(0.5));
        }
        assert_eq!(training.step(), GlobalStep(6));
        assert_eq!(model.samples, 10);
    }

    #[test]
    fn test_split_epochs() {
        let vocab = Vocabulary::padded(["a", "b", "c"], 5);
        let batcher = SplitBatcherOptions::default()
            .with_window(1)
            .with_batch_size(2)
            .init::<i32>(&vocab)
            .unwrap();
        let reader = LoopingReader::new(Cursor::new("a b c a b c"), CaseMode::Preserve);
        let mut stream = batcher.stream(reader).unwrap();

        let mut training = TrainingLoopOptions::default()
            .with_n_epochs(3)
            .init()
            .unwrap()
            .with_step(GlobalStep(10));
        let mut model = CountingModel::default();

        let summaries = training
            .run_split_epochs(&mut model, &mut stream, 5)
            .unwrap();

        assert_eq!(summaries.len(), 3);
        assert!(summaries.iter().all(|s| s.batches == 3 && s.samples == 6));
        assert_eq!(training.step(), GlobalStep(19));
    }

    #[test]
    fn test_split_stream_end_stops_training() {
        let vocab = Vocabulary::padded(["a"], 3);
        let batcher = SplitBatcherOptions::default()
            .with_window(1)
            .init::<i32>(&vocab)
            .unwrap();
        let reader = LoopingReader::new(Cursor::new(""), CaseMode::Preserve);
        let mut stream = batcher.stream(reader).unwrap();

        let mut training = TrainingLoopOptions::default().init().unwrap();
        let summaries = training
            .run_split_epochs(&mut CountingModel::default(), &mut stream, 100)
            .unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].mean_loss, None);
    }

    #[test]
    fn test_stalled_step_is_an_error() {
        let vocab = Vocabulary::unknown_last(["a", "b"]);
        let mut training = TrainingLoopOptions::default().init().unwrap();
        let mut model = CountingModel {
            stall: true,
            ..Default::default()
        };
        let batcher = SymmetricBatcherOptions::default()
            .with_window(1)
            .with_seed(Some(0))
            .init::<i32>(&vocab)
            .unwrap();
        let batch = batcher.to_batch(&[]);

        let err = training.train_batch(&mut model, &batch).unwrap_err();
        assert!(matches!(err, WordContextError::External(_)));
        assert_eq!(training.step(), GlobalStep(0));
    }

    #[test]
    fn test_loss_report_window() {
        let mut report = LossReport::default();
        assert_eq!(report.take_mean(), None);
        report.record(1.0);
        report.record(2.0);
        assert_eq!(report.take_mean(), Some(1.5));
        assert_eq!(report.take_mean(), None);
    }

    #[test]
    fn test_report_mean_since_last_report() {
        let vocab = Vocabulary::unknown_last(["a"]);
        let batch = SymmetricBatcherOptions::default()
            .with_window(1)
            .init::<i32>(&vocab)
            .unwrap()
            .to_batch(&[]);
        let mut training = TrainingLoopOptions::default()
            .with_report_interval(2)
            .init()
            .unwrap();
        let mut model = CountingModel {
            ramp: true,
            ..Default::default()
        };

        // Losses 0, 1 | 2, 3; one report every second step.
        let mut reports = Vec::new();
        for _ in 0..4 {
            training.train_batch(&mut model, &batch).unwrap();
            reports.push(training.take_report());
        }
        assert_eq!(reports, vec![None, Some(0.5), None, Some(2.5)]);
    }

    #[test]
    fn test_finish() {
        let dir = TempDir::new("training_loop").unwrap();
        let path = dir.path().join("weights.txt");
        let training = TrainingLoopOptions::default().init().unwrap();
        let model = CountingModel::default();

        training
            .finish::<SplitBatch<i32>, _>(&model, None)
            .unwrap();
        assert!(!path.exists());

        training
            .finish::<SplitBatch<i32>, _>(&model, Some(path.as_path()))
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0");

        assert!(TrainingLoopOptions::default()
            .with_report_interval(0)
            .init()
            .is_err());
    }
}
