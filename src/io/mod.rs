/*!
# IO

Utilities for reading and writing graphs from and to the line-oriented text format:
```text
<number of nodes>
<name> <x> <y>                 (once per node)
<number of arcs>
<start name> <end name> <weight>   (once per arc)
```
Tokens are separated by arbitrary whitespace.

## Traits

To generalize over reading/writing:
- [`GraphReader`] and [`GraphWriter`] are implemented by configurable readers and writers
  (e.g. [`TextReader`], [`TextWriter`]).
- [`TextRead`] and [`TextWrite`] are shorthands using the default settings.

In addition, [`Graph::read_from_file`] and [`Graph::write_to_file`] load into and save from an
existing graph, keeping its subscribers.
*/

pub mod text;

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::prelude::*;

pub use text::*;

/// Trait for types that can read graphs in a specific format.
///
/// This trait provides both a low-level method to read from any
/// [`BufRead`] instance and a convenience wrapper to read directly
/// from files.
pub trait GraphReader<G> {
    /// Reads a graph from the given reader according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the input is not a valid representation
    /// of a graph in the expected format.
    fn try_read_graph<R>(&self, reader: R) -> Result<G>
    where
        R: BufRead;

    /// Reads a graph from a file according to the settings in `self`.
    ///
    /// # Errors
    /// Returns [`GraphError::FileNotFound`] if the file cannot be opened, or an error if its
    /// contents are not a valid representation of a graph in the expected format.
    fn try_read_graph_file<P>(&self, path: P) -> Result<G>
    where
        P: AsRef<Path>,
    {
        self.try_read_graph(BufReader::new(open_graph_file(path)?))
    }
}

/// Trait for types that can write graphs in a specific format.
///
/// This trait provides both a low-level method to write to any
/// [`Write`] instance and a convenience wrapper to write directly
/// to files.
pub trait GraphWriter<G> {
    /// Writes the given graph to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails (e.g., IO errors).
    fn try_write_graph<W>(&self, graph: &G, writer: W) -> Result<()>
    where
        W: Write;

    /// Writes the given graph to a file according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_graph_file<P>(&self, graph: &G, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.try_write_graph(graph, BufWriter::new(File::create(path)?))
    }
}

/// Opens a file for reading, reporting failure as [`GraphError::FileNotFound`]
pub(crate) fn open_graph_file<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();
    File::open(path).map_err(|source| GraphError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Tries to parse the next token of a token stream and returns early if it fails
macro_rules! parse_next_value {
    ($tokens : expr, $what : expr) => {{
        let token = $tokens
            .next_token()?
            .ok_or(GraphError::UnexpectedEndOfStream($what))?;

        token
            .parse()
            .map_err(|_| GraphError::InvalidToken { what: $what, token })?
    }};
}

use parse_next_value;
