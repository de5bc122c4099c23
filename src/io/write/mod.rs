// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to handle writing out (u,v,w) samples.

mod error;

pub use error::UvwWriteError;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::{debug, trace};
use marlu::UVW;

use crate::cli::Warn;

/// Write (u,v,w) samples [metres] as text, one `u v w` row per sample. Each
/// header line (and each line within a header line) is written first,
/// prefixed with `# `. Numbers are written like C's `%.18e`, so the output
/// can be read with `numpy.loadtxt`.
pub fn write_uvw_text<P: AsRef<Path>>(
    file: P,
    uvws: &[UVW],
    header: &[String],
) -> Result<(), UvwWriteError> {
    let file = file.as_ref();
    debug!("Writing {} (u,v,w) samples to {}", uvws.len(), file.display());
    let mut f = BufWriter::new(File::create(file)?);
    for line in header.iter().flat_map(|h| h.lines()) {
        writeln!(f, "# {line}")?;
    }
    for uvw in uvws {
        writeln!(
            f,
            "{} {} {}",
            format_exponent(uvw.u),
            format_exponent(uvw.v),
            format_exponent(uvw.w)
        )?;
    }
    f.flush()?;
    Ok(())
}

/// Format a float with 18 decimal places in scientific notation, with a signed
/// exponent of at least two digits (e.g. `1.000000000000000000e+02`).
pub(crate) fn format_exponent(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let s = format!("{x:.18e}");
    match s.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s,
    }
}

/// Test whether a file can be written to, creating any missing parent
/// directories. A warning is queued if the file already exists.
pub fn can_write_to_file(file: &Path) -> Result<(), UvwWriteError> {
    trace!("Testing whether we can write to {}", file.display());

    let file_exists = file.exists();
    match std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(file)
        .map_err(|e| e.kind())
    {
        // File is writable.
        Ok(_) => {
            // Don't leave a 0-sized file behind.
            if !file_exists {
                std::fs::remove_file(file)?;
            }
        }

        // Attempt to make the directories leading up to the file; if this
        // fails, then we can't write the file anyway.
        Err(std::io::ErrorKind::NotFound) => {
            if let Some(p) = file.parent() {
                match std::fs::DirBuilder::new()
                    .recursive(true)
                    .create(p)
                    .map_err(|e| e.kind())
                {
                    Ok(()) => (),
                    Err(std::io::ErrorKind::PermissionDenied) => {
                        return Err(UvwWriteError::NewDirectory(p.to_path_buf()))
                    }
                    Err(e) => return Err(UvwWriteError::IO(e.into())),
                }
            }
        }

        Err(std::io::ErrorKind::PermissionDenied) => {
            return Err(UvwWriteError::FileNotWritable {
                file: file.display().to_string(),
            })
        }

        Err(e) => return Err(UvwWriteError::IO(e.into())),
    }

    if file_exists {
        format!("Will overwrite the existing file '{}'", file.display()).warn();
    }
    Ok(())
}
