//! CSV measurement sink.

use navbench_core::{MeasurementRecord, MeasurementSink};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Header row matching the benchmark's conventional column layout.
pub const CSV_HEADER: &str =
    "frame_index,t_recv_ns,t_verify_end_ns,latency_ns,result,cpu_user_ms,mem_rss_bytes";

/// Writes one CSV row per measurement record.
pub struct CsvSink<W: Write> {
    out: W,
}

impl CsvSink<BufWriter<File>> {
    /// Create the output file and write the header row.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be created or written.
    pub fn create(path: &Path) -> io::Result<Self> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "{CSV_HEADER}")?;
        Ok(Self { out })
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap an arbitrary writer; writes the header row immediately.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the header cannot be written.
    pub fn from_writer(mut out: W) -> io::Result<Self> {
        writeln!(out, "{CSV_HEADER}")?;
        Ok(Self { out })
    }

    /// Flush buffered rows.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the flush fails.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> MeasurementSink for CsvSink<W> {
    fn record(&mut self, rec: &MeasurementRecord) -> io::Result<()> {
        writeln!(
            self.out,
            "{},{},{},{},{},{},{}",
            rec.frame_index,
            rec.t_recv_ns,
            rec.t_verify_end_ns,
            rec.latency_ns,
            u8::from(rec.verified),
            rec.cpu_user_ms,
            rec.mem_rss_bytes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let mut sink = CsvSink::from_writer(Vec::new()).unwrap();
        sink.record(&MeasurementRecord {
            frame_index: 0,
            t_recv_ns: 100,
            t_verify_end_ns: 150,
            latency_ns: 50,
            verified: true,
            cpu_user_ms: 12.5,
            mem_rss_bytes: 4096,
        })
        .unwrap();
        sink.record(&MeasurementRecord {
            frame_index: 1,
            t_recv_ns: 200,
            t_verify_end_ns: 230,
            latency_ns: 30,
            verified: false,
            cpu_user_ms: 13.0,
            mem_rss_bytes: 4096,
        })
        .unwrap();

        let bytes = sink.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "0,100,150,50,1,12.5,4096");
        assert_eq!(lines[2], "1,200,230,30,0,13,4096");
    }
}
