//! Prometheus metrics collection for Reviewlens
//!
//! This module provides metrics instrumentation for tracking:
//! - Review submissions and review length by app version
//! - Prediction correctness feedback (correct/incorrect counters)
//! - Derived prediction accuracy gauge by model version
//! - Process CPU and memory usage gauges
//! - Team-member profile click-throughs
//!
//! Metrics are exposed via the `/metrics` endpoint in Prometheus text format.
//! All instruments live in one registry created at startup and shared through
//! the application state; nothing is ever decremented or reset, and the
//! export is cumulative (scraping does not consume values).

use prometheus::{
    Encoder, Gauge, GaugeVec, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

/// Histogram bucket boundaries for review length, in characters.
///
/// The `+Inf` bucket is appended by the histogram itself.
pub const LENGTH_BUCKETS: &[f64] = &[50.0, 100.0, 200.0, 500.0];

/// Percentage of correct predictions over all verdicts received so far.
///
/// Returns 0.0 when no feedback has been recorded; otherwise
/// `100 * correct / (correct + incorrect)`, always within `[0, 100]`.
pub fn accuracy_percentage(correct: u64, incorrect: u64) -> f64 {
    let total = correct as f64 + incorrect as f64;
    if total == 0.0 {
        return 0.0;
    }
    100.0 * correct as f64 / total
}

/// Metrics collector for Reviewlens
///
/// Owns every instrument the service mutates. Cheap to clone (the registry
/// and instrument handles are shared), so handlers receive it by value
/// through the application state.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,
    review_submissions: IntCounterVec,
    review_length: HistogramVec,
    correct_predictions: IntCounter,
    incorrect_predictions: IntCounter,
    feedback_review_length: HistogramVec,
    prediction_accuracy: GaugeVec,
    process_cpu_percent: Gauge,
    process_memory_percent: Gauge,
    member_clicks: IntCounterVec,
}

impl Metrics {
    /// Create a new Metrics instance
    ///
    /// Registers all instruments with a fresh Prometheus registry.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails (e.g., duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        // Counter: review submissions by app version
        //
        // Cardinality: one series per deployed app version (one per process
        // in practice).
        let review_submissions = IntCounterVec::new(
            Opts::new(
                "reviewlens_review_submissions_total",
                "Total number of reviews submitted for prediction, by app version",
            ),
            &["app_version"],
        )?;

        // Histogram: review length observed at submission time
        let review_length = HistogramVec::new(
            HistogramOpts::new(
                "reviewlens_review_length_chars",
                "Length in characters of submitted reviews, by app version",
            )
            .buckets(LENGTH_BUCKETS.to_vec()),
            &["app_version"],
        )?;

        // Counters: prediction verdicts from user feedback
        //
        // Unlabeled on purpose: the accuracy ratio is computed over the
        // process-wide totals, and the model version labels only the derived
        // gauge below.
        let correct_predictions = IntCounter::with_opts(Opts::new(
            "reviewlens_correct_predictions_total",
            "Total number of predictions users confirmed as correct",
        ))?;

        let incorrect_predictions = IntCounter::with_opts(Opts::new(
            "reviewlens_incorrect_predictions_total",
            "Total number of predictions users flagged as incorrect",
        ))?;

        // Histogram: review length at feedback time, split by outcome
        //
        // The prediction_outcome label carries the verdict string exactly as
        // submitted ("correct", "incorrect", or anything else the form sent),
        // so its cardinality is open-ended by design.
        let feedback_review_length = HistogramVec::new(
            HistogramOpts::new(
                "reviewlens_feedback_review_length_chars",
                "Length in characters of reviews at feedback time, by app version and prediction outcome",
            )
            .buckets(LENGTH_BUCKETS.to_vec()),
            &["app_version", "prediction_outcome"],
        )?;

        // Gauge: derived prediction accuracy percentage
        //
        // Recomputed from the two verdict counters after every feedback
        // event, labeled with the model version reported by the model
        // service at that moment ("unavailable" when it cannot be reached).
        let prediction_accuracy = GaugeVec::new(
            Opts::new(
                "reviewlens_prediction_accuracy_percent",
                "Percentage of predictions confirmed correct, by model version",
            ),
            &["model_version"],
        )?;

        // Gauges: process resource usage, refreshed at scrape time
        let process_cpu_percent = Gauge::with_opts(Opts::new(
            "reviewlens_process_cpu_percent",
            "CPU usage of this process as a percentage of one core",
        ))?;

        let process_memory_percent = Gauge::with_opts(Opts::new(
            "reviewlens_process_memory_percent",
            "Resident memory of this process as a percentage of total system memory",
        ))?;

        // Counter: team-member profile click-throughs
        //
        // member_name values come from the static team directory (unknown
        // names 404 before any metric is touched), so cardinality is bounded
        // by the directory size.
        let member_clicks = IntCounterVec::new(
            Opts::new(
                "reviewlens_member_clicks_total",
                "Total number of team-member profile clicks, by member and app version",
            ),
            &["member_name", "app_version"],
        )?;

        // Register all metrics
        registry.register(Box::new(review_submissions.clone()))?;
        registry.register(Box::new(review_length.clone()))?;
        registry.register(Box::new(correct_predictions.clone()))?;
        registry.register(Box::new(incorrect_predictions.clone()))?;
        registry.register(Box::new(feedback_review_length.clone()))?;
        registry.register(Box::new(prediction_accuracy.clone()))?;
        registry.register(Box::new(process_cpu_percent.clone()))?;
        registry.register(Box::new(process_memory_percent.clone()))?;
        registry.register(Box::new(member_clicks.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            review_submissions,
            review_length,
            correct_predictions,
            incorrect_predictions,
            feedback_review_length,
            prediction_accuracy,
            process_cpu_percent,
            process_memory_percent,
            member_clicks,
        })
    }

    /// Record one review submission
    ///
    /// # Errors
    ///
    /// Returns an error if the label count does not match the registered
    /// dimensions.
    pub fn record_submission(&self, app_version: &str) -> Result<(), prometheus::Error> {
        self.review_submissions
            .get_metric_with_label_values(&[app_version])?
            .inc();
        Ok(())
    }

    /// Observe the length of a submitted review
    ///
    /// # Errors
    ///
    /// Returns an error if `length_chars` is NaN, infinite, or negative, or
    /// if the label lookup fails. Invalid observations are rejected before
    /// touching the instrument so histogram percentiles stay meaningful.
    pub fn observe_review_length(
        &self,
        app_version: &str,
        length_chars: f64,
    ) -> Result<(), prometheus::Error> {
        validate_observation(length_chars)?;
        self.review_length
            .get_metric_with_label_values(&[app_version])?
            .observe(length_chars);
        Ok(())
    }

    /// Record one feedback verdict
    ///
    /// Increments the incorrect-predictions counter when the user flagged
    /// the prediction as wrong, the correct-predictions counter otherwise.
    /// Counters only ever increase; a later forwarding failure does not roll
    /// this back.
    pub fn record_verdict(&self, prediction_was_incorrect: bool) {
        if prediction_was_incorrect {
            self.incorrect_predictions.inc();
        } else {
            self.correct_predictions.inc();
        }
    }

    /// Observe the length of a review at feedback time
    ///
    /// `outcome` is the verdict string exactly as the user submitted it.
    ///
    /// # Errors
    ///
    /// Returns an error if `length_chars` is NaN, infinite, or negative, or
    /// if the label lookup fails.
    pub fn observe_feedback_length(
        &self,
        app_version: &str,
        outcome: &str,
        length_chars: f64,
    ) -> Result<(), prometheus::Error> {
        validate_observation(length_chars)?;
        self.feedback_review_length
            .get_metric_with_label_values(&[app_version, outcome])?
            .observe(length_chars);
        Ok(())
    }

    /// Recompute the prediction-accuracy gauge from the verdict counters
    ///
    /// Reads the then-current counter totals and writes the percentage into
    /// the gauge labeled with `model_version`. The read-then-set sequence is
    /// not atomic across the two counters: concurrent feedback events may
    /// interleave, and the last writer to complete wins. The exported value
    /// converges to `100 * correct / (correct + incorrect)` once feedback
    /// traffic quiesces.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge label lookup fails.
    pub fn refresh_accuracy(&self, model_version: &str) -> Result<(), prometheus::Error> {
        let correct = self.correct_predictions.get();
        let incorrect = self.incorrect_predictions.get();
        let percentage = accuracy_percentage(correct, incorrect);
        self.prediction_accuracy
            .get_metric_with_label_values(&[model_version])?
            .set(percentage);
        Ok(())
    }

    /// Record one team-member profile click
    ///
    /// # Errors
    ///
    /// Returns an error if the label count does not match the registered
    /// dimensions.
    pub fn record_member_click(
        &self,
        member_name: &str,
        app_version: &str,
    ) -> Result<(), prometheus::Error> {
        self.member_clicks
            .get_metric_with_label_values(&[member_name, app_version])?
            .inc();
        Ok(())
    }

    /// Overwrite the process resource gauges
    ///
    /// Last write wins. Callers skip this entirely when sampling fails, so
    /// the gauges keep their previous values.
    pub fn set_process_usage(&self, cpu_percent: f64, memory_percent: f64) {
        self.process_cpu_percent.set(cpu_percent);
        self.process_memory_percent.set(memory_percent);
    }

    /// Current total of predictions confirmed correct
    pub fn correct_predictions_count(&self) -> u64 {
        self.correct_predictions.get()
    }

    /// Current total of predictions flagged incorrect
    pub fn incorrect_predictions_count(&self) -> u64 {
        self.incorrect_predictions.get()
    }

    /// Current accuracy gauge value for a model version
    ///
    /// Reads the gauge as last written by [`Metrics::refresh_accuracy`];
    /// a version that was never written reads as 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge label lookup fails.
    pub fn accuracy_value(&self, model_version: &str) -> Result<f64, prometheus::Error> {
        Ok(self
            .prediction_accuracy
            .get_metric_with_label_values(&[model_version])?
            .get())
    }

    /// Gather all metrics and encode them in Prometheus text format
    ///
    /// The export is non-destructive: values are unchanged by scraping.
    ///
    /// # Errors
    ///
    /// Returns an error if metric encoding fails.
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let metric_families = self.registry.gather();
        let metric_count = metric_families.len();

        tracing::debug!(
            metric_family_count = metric_count,
            "Encoding metrics to Prometheus text format"
        );

        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();

        encoder.encode(&metric_families, &mut buffer).map_err(|e| {
            tracing::error!(
                error = %e,
                metric_family_count = metric_count,
                "Prometheus text encoder failed"
            );
            prometheus::Error::Msg(format!(
                "Failed to encode {} metric families: {}",
                metric_count, e
            ))
        })?;

        String::from_utf8(buffer).map_err(|e| {
            let valid_up_to = e.utf8_error().valid_up_to();
            tracing::error!(
                invalid_byte_index = valid_up_to,
                "Prometheus encoder produced invalid UTF-8"
            );
            prometheus::Error::Msg(format!(
                "Failed to convert metrics to UTF-8 at byte {}: {}",
                valid_up_to, e
            ))
        })
    }
}

/// Reject histogram inputs that would corrupt percentile math.
fn validate_observation(value: f64) -> Result<(), prometheus::Error> {
    if !value.is_finite() {
        return Err(prometheus::Error::Msg(format!(
            "Histogram value must be finite (not NaN or Infinity), got: {}",
            value
        )));
    }
    if value < 0.0 {
        return Err(prometheus::Error::Msg(format!(
            "Histogram value must be non-negative, got: {}",
            value
        )));
    }
    Ok(())
}
