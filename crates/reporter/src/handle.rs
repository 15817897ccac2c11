//! SinkHandle - runs one sink on its own worker task

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument};

use contracts::{MeasureReport, ReportSink};

use crate::error::ReporterError;

/// Reports a sink worker wrote or failed to write before it stopped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub written: u64,
    pub failed: u64,
}

/// Handle to a running sink worker
pub struct SinkHandle {
    name: String,
    tx: mpsc::Sender<Arc<MeasureReport>>,
    worker_handle: JoinHandle<DeliveryStats>,
}

impl SinkHandle {
    /// Spawn the worker task for `sink`
    pub fn spawn<S: ReportSink + 'static>(sink: S, queue_capacity: usize) -> Self {
        let name = sink.name().to_string();
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        let worker_handle = tokio::spawn(sink_worker(sink, rx, name.clone()));

        Self {
            name,
            tx,
            worker_handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue a report, waiting for space if the worker lags behind
    ///
    /// # Errors
    /// `SinkClosed` if the worker has stopped.
    pub async fn send(&self, report: Arc<MeasureReport>) -> Result<(), ReporterError> {
        let measure = report.name.clone();
        self.tx
            .send(report)
            .await
            .map_err(|_| ReporterError::SinkClosed {
                sink_name: self.name.clone(),
                measure,
            })
    }

    /// Drain the queue, close the sink and return its delivery counts
    ///
    /// A panicked worker reports nothing delivered.
    #[instrument(name = "sink_handle_shutdown", skip(self), fields(sink = %self.name))]
    pub async fn shutdown(self) -> DeliveryStats {
        drop(self.tx);
        let stats = match self.worker_handle.await {
            Ok(stats) => stats,
            Err(e) => {
                error!(sink = %self.name, error = ?e, "Worker task panicked");
                DeliveryStats::default()
            }
        };
        debug!(
            sink = %self.name,
            written = stats.written,
            failed = stats.failed,
            "SinkHandle shutdown complete"
        );
        stats
    }
}

#[instrument(
    name = "sink_worker_loop",
    skip(sink, rx),
    fields(sink = %name)
)]
async fn sink_worker<S: ReportSink>(
    mut sink: S,
    mut rx: mpsc::Receiver<Arc<MeasureReport>>,
    name: String,
) -> DeliveryStats {
    debug!(sink = %name, "Sink worker started");
    let mut stats = DeliveryStats::default();

    while let Some(report) = rx.recv().await {
        match sink.write(&report).await {
            Ok(()) => {
                stats.written += 1;
                observability::record_report_dispatched(&name, true);
            }
            Err(e) => {
                stats.failed += 1;
                observability::record_report_dispatched(&name, false);
                error!(
                    sink = %name,
                    measure = %report.name,
                    error = %e,
                    "Write failed"
                );
            }
        }
    }

    if let Err(e) = sink.flush().await {
        error!(sink = %name, error = %e, "Flush failed on shutdown");
    }
    if let Err(e) = sink.close().await {
        error!(sink = %name, error = %e, "Close failed on shutdown");
    }

    debug!(sink = %name, "Sink worker stopped");
    stats
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use contracts::{ContractError, MeasureDescriptor, SampleStats};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Mock sink for testing
    pub(crate) struct MockSink {
        pub name: String,
        pub write_count: Arc<AtomicU64>,
        pub should_fail: bool,
    }

    impl ReportSink for MockSink {
        fn name(&self) -> &str {
            &self.name
        }

        async fn write(&mut self, _report: &MeasureReport) -> Result<(), ContractError> {
            if self.should_fail {
                return Err(ContractError::sink_write(&self.name, "mock failure"));
            }
            self.write_count.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        async fn flush(&mut self) -> Result<(), ContractError> {
            Ok(())
        }

        async fn close(&mut self) -> Result<(), ContractError> {
            Ok(())
        }
    }

    pub(crate) fn report(name: &str) -> Arc<MeasureReport> {
        Arc::new(MeasureReport {
            name: name.to_string(),
            descriptor: MeasureDescriptor::new("a.Msg", 10.0, 20.0),
            total: 0,
            out_of_range: 0,
            total_destinations: 0,
            samples: vec![],
            by_peer: BTreeMap::new(),
            stats: SampleStats::default(),
        })
    }

    #[tokio::test]
    async fn test_sink_handle_basic() {
        let write_count = Arc::new(AtomicU64::new(0));
        let sink = MockSink {
            name: "test".to_string(),
            write_count: Arc::clone(&write_count),
            should_fail: false,
        };

        let handle = SinkHandle::spawn(sink, 2);
        for i in 0..5 {
            handle.send(report(&format!("m{i}"))).await.unwrap();
        }

        let stats = handle.shutdown().await;
        assert_eq!(write_count.load(Ordering::Relaxed), 5);
        assert_eq!(stats, DeliveryStats { written: 5, failed: 0 });
    }

    #[tokio::test]
    async fn test_sink_handle_failure_isolation() {
        let sink = MockSink {
            name: "failing".to_string(),
            write_count: Arc::new(AtomicU64::new(0)),
            should_fail: true,
        };

        let handle = SinkHandle::spawn(sink, 10);
        for i in 0..3 {
            handle.send(report(&format!("m{i}"))).await.unwrap();
        }

        let stats = handle.shutdown().await;
        assert_eq!(stats, DeliveryStats { written: 0, failed: 3 });
    }
}
