//! StdoutSink - prints reports for the terminal or for pipes

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Write;

use contracts::{ContractError, MeasureReport, ReportSink};
use tracing::{debug, instrument};

/// Report rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tree summary plus one `time<TAB>count` row per period
    #[default]
    Text,
    /// One JSON document per line
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

/// Sink that writes rendered reports to stdout
pub struct StdoutSink {
    name: String,
    format: OutputFormat,
}

impl StdoutSink {
    pub fn new(name: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            name: name.into(),
            format,
        }
    }

    /// Create from params map (`format = text | json`)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, String> {
        let format = match params.get("format") {
            Some(format) => format.parse()?,
            None => OutputFormat::default(),
        };
        Ok(Self::new(name, format))
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn render(&self, report: &MeasureReport) -> Result<String, ContractError> {
        match self.format {
            OutputFormat::Text => Ok(render_text(report)),
            OutputFormat::Json => serde_json::to_string(report)
                .map(|mut line| {
                    line.push('\n');
                    line
                })
                .map_err(|e| ContractError::sink_write(&self.name, e.to_string())),
        }
    }
}

/// Human-readable report
pub fn render_text(report: &MeasureReport) -> String {
    let descriptor = &report.descriptor;
    let mut out = String::new();

    let _ = writeln!(out, "📊 {} ({})", report.name, descriptor.message_type_key());
    let _ = writeln!(
        out,
        "   ├─ Period: {}s, Simulation time: {}s",
        descriptor.period(),
        descriptor.simulation_time()
    );
    let _ = writeln!(
        out,
        "   ├─ Total: {} (out of range: {})",
        report.total, report.out_of_range
    );
    let _ = writeln!(out, "   ├─ Mean fan-out: {:.2}", report.mean_fan_out());
    let _ = writeln!(out, "   ├─ Per period: {}", report.stats);
    let _ = writeln!(out, "   └─ Samples ({}):", report.samples.len());
    for sample in &report.samples {
        let _ = writeln!(out, "      {}\t{}", sample.time, sample.count);
    }

    out
}

impl ReportSink for StdoutSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "stdout_sink_write",
        skip(self, report),
        fields(sink = %self.name, measure = %report.name)
    )]
    async fn write(&mut self, report: &MeasureReport) -> Result<(), ContractError> {
        let rendered = self.render(report)?;
        std::io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }

    #[instrument(name = "stdout_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        std::io::stdout()
            .flush()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }

    #[instrument(name = "stdout_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        debug!(sink = %self.name, "StdoutSink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{MeasureDescriptor, Sample, SampleStats};
    use std::collections::BTreeMap;

    fn report() -> MeasureReport {
        MeasureReport {
            name: "SentFCompositionMessages".into(),
            descriptor: MeasureDescriptor::new(
                "graphsearch.forward.message.FCompositionMessage",
                10.0,
                20.0,
            ),
            total: 3,
            out_of_range: 1,
            total_destinations: 6,
            samples: vec![
                Sample { time: 10.0, count: 1 },
                Sample { time: 20.0, count: 2 },
            ],
            by_peer: BTreeMap::new(),
            stats: SampleStats::default(),
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&report());
        assert!(text.contains("SentFCompositionMessages (graphsearch.forward.message.FCompositionMessage)"));
        assert!(text.contains("Total: 3 (out of range: 1)"));
        assert!(text.contains("Mean fan-out: 2.00"));
        assert!(text.contains("      10\t1\n      20\t2\n"));
    }

    #[test]
    fn test_render_json_is_one_line() {
        let sink = StdoutSink::new("out", OutputFormat::Json);
        let json = sink.render(&report()).unwrap();
        assert_eq!(json.lines().count(), 1);
        let parsed: MeasureReport = serde_json::from_str(json.trim_end()).unwrap();
        assert_eq!(parsed.total, 3);
    }

    #[test]
    fn test_from_params() {
        let params = HashMap::from([("format".to_string(), "JSON".to_string())]);
        let sink = StdoutSink::from_params("out", &params).unwrap();
        assert_eq!(sink.format(), OutputFormat::Json);

        assert_eq!(
            StdoutSink::from_params("out", &HashMap::new()).unwrap().format(),
            OutputFormat::Text
        );
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
