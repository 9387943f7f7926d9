//! Utility functions and structures.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

//-----------------------------------------------------------------------------

// Utilities for working with files.

/// Returns `true` if the file appears to be gzip-compressed.
pub fn is_gzipped<P: AsRef<Path>>(filename: P) -> bool {
    let file = File::open(filename).ok();
    if file.is_none() {
        return false;
    }
    let mut reader = BufReader::new(file.unwrap());
    let mut magic = [0; 2];
    let len = reader.read(&mut magic).ok();
    len == Some(2) && magic == [0x1F, 0x8B]
}

/// Returns a buffered reader for the file, which may be gzip-compressed.
pub fn open_file<P: AsRef<Path>>(filename: P) -> Result<Box<dyn BufRead>, String> {
    let file = File::open(&filename).map_err(|x| x.to_string())?;
    let inner = BufReader::new(file);
    if is_gzipped(&filename) {
        let inner = MultiGzDecoder::new(inner);
        Ok(Box::new(BufReader::new(inner)))
    } else {
        Ok(Box::new(inner))
    }
}

//-----------------------------------------------------------------------------

/// A verbosity-gated sink for diagnostic messages.
///
/// Operations that can encounter structural problems take a sink instead of
/// consulting any global verbosity state. A message is accepted when its
/// level does not exceed the verbosity of the sink. Accepted messages are
/// written to stderr, or collected for later inspection if the sink was
/// created with [`DiagnosticSink::collecting`].
///
/// Structural inconsistencies report at level 2 and ambiguous joins at
/// level 3, so a verbosity of 0 silences everything.
///
/// # Examples
///
/// ```
/// use gfa_kit::DiagnosticSink;
///
/// let mut sink = DiagnosticSink::collecting(2);
/// sink.report(2, String::from("something is off"));
/// sink.report(3, String::from("too detailed for this sink"));
/// assert_eq!(sink.messages(), &[String::from("something is off")]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticSink {
    verbosity: u32,
    collect: bool,
    messages: Vec<String>,
}

impl DiagnosticSink {
    /// Creates a sink that writes accepted messages to stderr.
    pub fn new(verbosity: u32) -> Self {
        DiagnosticSink { verbosity, collect: false, messages: Vec::new() }
    }

    /// Creates a sink that collects accepted messages in memory.
    pub fn collecting(verbosity: u32) -> Self {
        DiagnosticSink { verbosity, collect: true, messages: Vec::new() }
    }

    /// Returns the verbosity of the sink.
    pub fn verbosity(&self) -> u32 {
        self.verbosity
    }

    /// Reports a message at the given verbosity level.
    ///
    /// No effect if the level exceeds the verbosity of the sink.
    pub fn report(&mut self, level: u32, message: String) {
        if level > self.verbosity {
            return;
        }
        if self.collect {
            self.messages.push(message);
        } else {
            eprintln!("[W] {}", message);
        }
    }

    /// Returns the collected messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

//-----------------------------------------------------------------------------


//-----------------------------------------------------------------------------
