use super::{error::LocalError, sink::Complete};
use crate::structs::toml::Output;
use flate2::{write::GzEncoder, Compression};
use log::error;
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Result, Write},
};

/// Local output file, gzip compressed if enabled in the TOML `Output`
pub(crate) enum LocalWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Write for LocalWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        match self {
            LocalWriter::Plain(writer) => writer.write(buf),
            LocalWriter::Gzip(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            LocalWriter::Plain(writer) => writer.flush(),
            LocalWriter::Gzip(writer) => writer.flush(),
        }
    }
}

impl Complete for LocalWriter {
    /// Flush all data. For gzip output this also writes the gzip trailer
    fn complete(&mut self) -> Result<()> {
        match self {
            LocalWriter::Plain(writer) => writer.flush(),
            LocalWriter::Gzip(writer) => {
                writer.try_finish()?;
                writer.get_mut().flush()
            }
        }
    }
}

/// Create output file in the local directory provided by TOML input.
/// Returns the writer and the output filename
pub(crate) fn local_writer(
    output: &Output,
    output_name: &str,
    extension: &str,
) -> std::result::Result<(LocalWriter, String), LocalError> {
    let output_path = format!("{}/{}", output.directory, output.name);

    if let Err(err) = create_dir_all(&output_path) {
        error!("[core] Failed to create output directory for {output_path}. Error: {err:?}");
        return Err(LocalError::CreateDirectory);
    }

    let filename = if output.compress {
        format!("{output_name}.{extension}.gz")
    } else {
        format!("{output_name}.{extension}")
    };

    let file = match File::create(format!("{output_path}/{filename}")) {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Failed to create output file {filename} at {output_path}. Error: {err:?}");
            return Err(LocalError::CreateFile);
        }
    };

    let writer = BufWriter::new(file);
    let local = if output.compress {
        LocalWriter::Gzip(GzEncoder::new(writer, Compression::default()))
    } else {
        LocalWriter::Plain(writer)
    };
    Ok((local, filename))
}
