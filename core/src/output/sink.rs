use super::{
    error::FormatError,
    local::{local_writer, LocalWriter},
};
use crate::structs::toml::Output;
use common::files::FileRecord;
use csv::Writer;
use log::error;
use std::io::{Result as IoResult, Write};

/// Destination for collected records. Only ever used by a single thread at a time
pub(crate) trait RecordSink {
    /// Append one record
    fn write_record(&mut self, record: &FileRecord) -> Result<(), FormatError>;
    /// Flush and close the output. No records can be written afterwards
    fn finish(&mut self) -> Result<(), FormatError>;
}

/// Writers that need a final step once all data is written
pub(crate) trait Complete: Write {
    fn complete(&mut self) -> IoResult<()>;
}

/// One JSON object per line
pub(crate) struct JsonlSink<W: Complete> {
    writer: W,
    finished: bool,
}

impl<W: Complete> JsonlSink<W> {
    pub(crate) fn new(writer: W) -> JsonlSink<W> {
        JsonlSink {
            writer,
            finished: false,
        }
    }
}

impl<W: Complete> RecordSink for JsonlSink<W> {
    fn write_record(&mut self, record: &FileRecord) -> Result<(), FormatError> {
        if self.finished {
            return Err(FormatError::Finished);
        }
        let mut line = match serde_json::to_vec(record) {
            Ok(result) => result,
            Err(_) => return Err(FormatError::Serialize),
        };
        line.push(b'\n');

        self.writer
            .write_all(&line)
            .map_err(|_| FormatError::Write)
    }

    fn finish(&mut self) -> Result<(), FormatError> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if let Err(err) = self.writer.complete() {
            error!("[core] Failed to finish jsonl output: {err:?}");
            return Err(FormatError::Finish);
        }
        Ok(())
    }
}

/// Header row followed by one row per record
pub(crate) struct CsvSink<W: Complete> {
    writer: Option<Writer<W>>,
}

impl<W: Complete> CsvSink<W> {
    pub(crate) fn new(writer: W) -> CsvSink<W> {
        CsvSink {
            writer: Some(Writer::from_writer(writer)),
        }
    }
}

impl<W: Complete> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &FileRecord) -> Result<(), FormatError> {
        let writer = match self.writer.as_mut() {
            Some(result) => result,
            None => return Err(FormatError::Finished),
        };
        writer.serialize(record).map_err(|err| {
            if err.is_io_error() {
                FormatError::Write
            } else {
                FormatError::Serialize
            }
        })
    }

    fn finish(&mut self) -> Result<(), FormatError> {
        let writer = match self.writer.take() {
            Some(result) => result,
            None => return Ok(()),
        };
        let mut inner = match writer.into_inner() {
            Ok(result) => result,
            Err(err) => {
                error!("[core] Failed to flush csv output: {:?}", err.error());
                return Err(FormatError::Finish);
            }
        };
        if let Err(err) = inner.complete() {
            error!("[core] Failed to finish csv output: {err:?}");
            return Err(FormatError::Finish);
        }
        Ok(())
    }
}

/// Create the sink for an artifact based on the TOML `Output` format.
/// Returns the sink and the output filename
pub(crate) fn create_sink(
    output: &Output,
    artifact_name: &str,
) -> Result<(Box<dyn RecordSink + Send>, String), FormatError> {
    let extension = match output.format.as_str() {
        "jsonl" => "jsonl",
        "csv" => "csv",
        _ => {
            error!("[core] Unknown formatter provided: {}", output.format);
            return Err(FormatError::UnknownFormat);
        }
    };

    let (writer, filename) = match local_writer(output, artifact_name, extension) {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Could not create {artifact_name} output: {err:?}");
            return Err(FormatError::Local);
        }
    };

    let sink: Box<dyn RecordSink + Send> = if extension == "csv" {
        Box::new(CsvSink::<LocalWriter>::new(writer))
    } else {
        Box::new(JsonlSink::<LocalWriter>::new(writer))
    };
    Ok((sink, filename))
}
