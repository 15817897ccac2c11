//! FileSink - writes one data file per measure

use contracts::{ContractError, MeasureReport, ReportSink};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, instrument};

/// Configuration for FileSink
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Base output directory
    pub base_path: PathBuf,
}

impl FileSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let base_path = params
            .get("base_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./results"));

        Self { base_path }
    }
}

/// Writes `<base_path>/<measure>.dat` (gnuplot columns) and
/// `<base_path>/<measure>.json` (full report)
pub struct FileSink {
    name: String,
    config: FileSinkConfig,
}

impl FileSink {
    pub fn new(name: impl Into<String>, config: FileSinkConfig) -> std::io::Result<Self> {
        fs::create_dir_all(&config.base_path)?;

        Ok(Self {
            name: name.into(),
            config,
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        Self::new(name, FileSinkConfig::from_params(params))
    }

    pub fn base_path(&self) -> &Path {
        &self.config.base_path
    }

    fn write_report_to_disk(&self, report: &MeasureReport) -> std::io::Result<()> {
        let stem = file_stem(&report.name);

        let dat_path = self.config.base_path.join(format!("{stem}.dat"));
        let mut dat = BufWriter::new(File::create(dat_path)?);
        write_dat(&mut dat, report)?;
        dat.flush()?;

        let json_path = self.config.base_path.join(format!("{stem}.json"));
        write_json(File::create(json_path)?, report)
    }

    fn persist_report(&self, report: &MeasureReport) -> Result<(), ContractError> {
        self.write_report_to_disk(report).map_err(|e| {
            error!(sink = %self.name, measure = %report.name, error = %e, "Write failed");
            ContractError::sink_write(&self.name, e.to_string())
        })
    }
}

/// `time<TAB>count<TAB>cumulative` per period, `#` header lines
fn write_dat(out: &mut impl Write, report: &MeasureReport) -> std::io::Result<()> {
    let descriptor = &report.descriptor;
    writeln!(out, "# {} ({})", report.name, descriptor.message_type_key())?;
    writeln!(
        out,
        "# period={} simulation_time={} total={} out_of_range={}",
        descriptor.period(),
        descriptor.simulation_time(),
        report.total,
        report.out_of_range
    )?;
    writeln!(out, "# time\tcount\tcumulative")?;

    for (sample, cumulative) in report.samples.iter().zip(report.cumulative()) {
        writeln!(out, "{}\t{}\t{}", sample.time, sample.count, cumulative.count)?;
    }
    Ok(())
}

/// Full report as pretty JSON; buffered bytes are flushed so a failed write
/// surfaces as an error
fn write_json(out: impl Write, report: &MeasureReport) -> std::io::Result<()> {
    let mut json = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut json, report)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    json.flush()
}

/// Measure names may come from user config
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl ReportSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_sink_write",
        skip(self, report),
        fields(sink = %self.name, measure = %report.name)
    )]
    async fn write(&mut self, report: &MeasureReport) -> Result<(), ContractError> {
        self.persist_report(report)?;
        debug!(sink = %self.name, measure = %report.name, "Report written");
        Ok(())
    }

    #[instrument(name = "file_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }

    #[instrument(name = "file_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        debug!(sink = %self.name, "FileSink closed");
        Ok(())
    }
}
