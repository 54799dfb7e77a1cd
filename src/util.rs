use crate::error::{Error, Result};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use tracing::debug;

/// Reads the whole input for a command.
///
/// With a path the file is read as-is. Without one, stdin is read to EOF,
/// unless it is an interactive terminal, in which case there is nothing to
/// read and [`Error::NoInput`] is returned.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            debug!("reading input from {}", path.display());
            Ok(fs::read(path)?)
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(Error::NoInput);
            }
            debug!("reading input from stdin");
            let mut buf = Vec::new();
            stdin.lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
