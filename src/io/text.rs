//! # Text Format
//!
//! The text format consists of the number of nodes, one `name x y` entry per node, the number of
//! arcs and one `start end weight` entry per arc. Coordinates are floating point numbers, weights
//! are positive integers. All tokens are separated by whitespace, line breaks carry no meaning.
//!
//! Older writers of this format came with a reader that only ever consumed the first arc entry,
//! regardless of the declared number of arcs. [`ArcLines::First`] reproduces this behavior for
//! compatibility; the default [`ArcLines::All`] reads every declared arc.

use std::{
    collections::VecDeque,
    io::{BufRead, Lines, Write},
    path::Path,
};

use fxhash::FxHashMap;

use super::*;

/// How many arc entries a [`TextReader`] consumes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ArcLines {
    /// Read as many arcs as declared
    #[default]
    All,
    /// Read at most a single arc, whatever the declared number (legacy behavior)
    First,
}

/// A GraphReader for the text format
#[derive(Debug, Clone, Default)]
pub struct TextReader {
    arc_lines: ArcLines,
}

impl TextReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates how many arc entries are read
    pub fn arc_lines(mut self, arc_lines: ArcLines) -> TextReader {
        self.arc_lines = arc_lines;
        self
    }

    /// Replaces the content of `graph` by the graph read from `reader`.
    /// Subscribers of `graph` are kept and notified once.
    ///
    /// # Errors
    /// On failure, `graph` is left empty and the error is returned.
    pub fn read_into<R: BufRead>(&self, graph: &mut Graph, reader: R) -> Result<()> {
        match self.try_read_graph(reader) {
            Ok(read) => {
                graph.replace_content(&read);
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "logging")]
                log::warn!("failed to read graph: {err}");

                graph.clear();
                Err(err)
            }
        }
    }

    /// Replaces the content of `graph` by the graph stored in the file at `path`.
    ///
    /// # Errors
    /// On failure, `graph` is left empty and the error is returned.
    pub fn read_file_into<P: AsRef<Path>>(&self, graph: &mut Graph, path: P) -> Result<()> {
        match open_graph_file(path) {
            Ok(file) => self.read_into(graph, BufReader::new(file)),
            Err(err) => {
                graph.clear();
                Err(err)
            }
        }
    }

    fn read_node_count<R: BufRead>(tokens: &mut Tokens<R>) -> Result<u64> {
        let token = tokens
            .next_token()?
            .ok_or_else(|| GraphError::EmptyOrInvalidCount(String::new()))?;

        match token.parse::<i64>() {
            Ok(n) if n > 0 => Ok(n as u64),
            _ => Err(GraphError::EmptyOrInvalidCount(token)),
        }
    }

    /// A missing or non-positive number of arcs means there are no arcs
    fn read_arc_count<R: BufRead>(tokens: &mut Tokens<R>) -> Result<u64> {
        let Some(token) = tokens.next_token()? else {
            return Ok(0);
        };

        match token.parse::<i64>() {
            Ok(m) => Ok(m.max(0) as u64),
            Err(_) => Err(GraphError::InvalidToken {
                what: "number of arcs",
                token,
            }),
        }
    }
}

impl GraphReader<Graph> for TextReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<Graph> {
        let mut tokens = Tokens::new(reader);
        let mut graph = Graph::new();

        let num_nodes = Self::read_node_count(&mut tokens)?;
        for _ in 0..num_nodes {
            let name: String = parse_next_value!(tokens, "node name");
            let x: f64 = parse_next_value!(tokens, "x-coordinate");
            let y: f64 = parse_next_value!(tokens, "y-coordinate");

            graph.add_node_at(&name, Position::new(x, y))?;
        }

        let declared_arcs = Self::read_arc_count(&mut tokens)?;
        let num_arcs = match self.arc_lines {
            ArcLines::All => declared_arcs,
            ArcLines::First => declared_arcs.min(1),
        };

        #[cfg(feature = "logging")]
        if num_arcs < declared_arcs {
            log::warn!("reading only {num_arcs} of {declared_arcs} declared arcs");
        }

        for _ in 0..num_arcs {
            let start: String = parse_next_value!(tokens, "arc start");
            let end: String = parse_next_value!(tokens, "arc end");
            let weight: Weight = parse_next_value!(tokens, "arc weight");

            graph.set_arc(start.as_str(), end.as_str(), weight)?;
        }

        #[cfg(feature = "logging")]
        log::info!(
            "read graph with {} nodes and {} arcs",
            graph.number_of_nodes(),
            graph.number_of_arcs()
        );

        Ok(graph)
    }
}

/// Trait for creating graphs with a default TextReader
pub trait TextRead: Sized {
    /// Tries to read the graph from a given reader
    fn try_read_text<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the graph from a given file
    fn try_read_text_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_text(BufReader::new(open_graph_file(path)?))
    }
}

impl TextRead for Graph {
    fn try_read_text<R: BufRead>(reader: R) -> Result<Self> {
        TextReader::default().try_read_graph(reader)
    }
}

/// Splits the lines of a reader into whitespace-separated tokens
struct Tokens<R> {
    lines: Lines<R>,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: VecDeque::new(),
        }
    }

    /// Returns the next token, `None` at the end of the stream, or propagates an IO error
    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            match self.lines.next() {
                None => return Ok(None),
                Some(line) => self
                    .pending
                    .extend(line?.split_whitespace().map(str::to_string)),
            }
        }
        Ok(self.pending.pop_front())
    }
}

/// A writer for the text format
#[derive(Debug, Clone, Default)]
pub struct TextWriter {
    sorted_arcs: bool,
}

impl TextWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// If *true*, arcs are written ordered by the position of their endpoints in the node list
    /// instead of the (unspecified) order of the arc list. Useful to get reproducible files.
    pub fn sorted_arcs(mut self, sorted_arcs: bool) -> TextWriter {
        self.sorted_arcs = sorted_arcs;
        self
    }
}

impl<G: GraphArcOrder> GraphWriter<G> for TextWriter {
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", graph.number_of_nodes())?;
        for (_, node) in graph.nodes() {
            let Position { x, y } = node.position();
            writeln!(writer, "{} {x} {y}", node.name())?;
        }

        let mut arcs = graph.arc_list();
        if self.sorted_arcs {
            let position: FxHashMap<NodeId, usize> = graph
                .node_list()
                .iter()
                .enumerate()
                .map(|(i, &u)| (u, i))
                .collect();
            arcs.sort_by_key(|arc| (position.get(&arc.start), position.get(&arc.end)));
        }

        writeln!(writer, "{}", arcs.len())?;
        for arc in arcs {
            let start = graph.name_of(arc.start).ok_or(Violation::UnknownNode)?;
            let end = graph.name_of(arc.end).ok_or(Violation::UnknownNode)?;
            writeln!(writer, "{start} {end} {}", arc.weight)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Trait for writing a graph in the text format with default settings
pub trait TextWrite {
    /// Tries to write the graph to a writer
    fn try_write_text<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a file
    fn try_write_text_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_text(writer)
    }
}

impl<G: GraphArcOrder> TextWrite for G {
    fn try_write_text<W: Write>(&self, writer: W) -> Result<()> {
        TextWriter::default().try_write_graph(self, writer)
    }
}

impl Graph {
    /// Replaces the content of this graph by the graph stored at `path`, reading every declared
    /// arc. Subscribers are kept and notified once.
    ///
    /// # Errors
    /// Returns [`GraphError::FileNotFound`], [`GraphError::EmptyOrInvalidCount`],
    /// [`GraphError::UnexpectedEndOfStream`], [`GraphError::InvalidToken`] or
    /// [`GraphError::InvariantViolation`]. On failure, the graph is left empty.
    pub fn read_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        TextReader::default().read_file_into(self, path)
    }

    /// Writes this graph to `path` in the text format
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.try_write_text_file(&path)?;

        #[cfg(feature = "logging")]
        log::info!(
            "wrote graph with {} nodes and {} arcs to {}",
            self.number_of_nodes(),
            self.number_of_arcs(),
            path.as_ref().display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{observe::GraphEvent, testing::*};
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use std::{cell::RefCell, io::Cursor, rc::Rc};

    fn read(input: &str) -> Result<Graph> {
        Graph::try_read_text(Cursor::new(input))
    }

    fn write(graph: &Graph) -> String {
        let mut buffer = Vec::new();
        TextWriter::new()
            .sorted_arcs(true)
            .try_write_graph(graph, &mut buffer)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn write_format() {
        let mut graph = graph_from_arcs(["a0", "b0", "c0"], [("a0", "b0", 5), ("b0", "c0", 3)]);
        graph.set_position("b0", (1.5, -2.0)).unwrap();

        assert_eq!(write(&graph), "3\na0 0 0\nb0 1.5 -2\nc0 0 0\n2\na0 b0 5\nb0 c0 3\n");
    }

    #[test]
    fn read_format() {
        let graph = read("3\na0 0 0\nb0 1.5 -2\nc0 0 0\n2\na0 b0 5\nb0 c0 3\n").unwrap();

        assert_eq!(
            named_nodes(&graph),
            vec![
                ("a0".into(), Position::new(0.0, 0.0)),
                ("b0".into(), Position::new(1.5, -2.0)),
                ("c0".into(), Position::new(0.0, 0.0)),
            ]
        );
        assert_eq!(
            named_arcs(&graph),
            vec![("a0".into(), "b0".into(), 5), ("b0".into(), "c0".into(), 3)]
        );
        assert_degrees_consistent(&graph);
    }

    #[test]
    fn tokens_ignore_line_structure() {
        let graph = read("  2 u 1 2\n\n v\t3 4 1 u\nv 9").unwrap();

        assert_eq!(graph.number_of_nodes(), 2);
        assert_eq!(graph.weight("u", "v"), 9);
    }

    #[test]
    fn missing_arc_count_means_no_arcs() {
        let graph = read("1\nx 0 0\n").unwrap();
        assert_eq!(graph.number_of_nodes(), 1);
        assert!(graph.has_no_arcs());

        let graph = read("1\nx 0 0\n-4\n").unwrap();
        assert!(graph.has_no_arcs());
    }

    #[test]
    fn legacy_mode_reads_a_single_arc() {
        let input = "3\na 0 0\nb 0 0\nc 0 0\n2\na b 1\nb c 2\n";

        let graph = TextReader::new()
            .arc_lines(ArcLines::First)
            .try_read_graph(Cursor::new(input))
            .unwrap();
        assert_eq!(named_arcs(&graph), vec![("a".into(), "b".into(), 1)]);

        let graph = read(input).unwrap();
        assert_eq!(graph.number_of_arcs(), 2);
    }

    #[test]
    fn invalid_node_counts() {
        for input in ["", "   \n", "0\n", "-3\na 0 0\n", "three\n"] {
            assert_eq!(
                read(input).unwrap_err().kind(),
                ErrorKind::EmptyOrInvalidCount,
                "{input:?}"
            );
        }
    }

    #[test]
    fn truncated_streams() {
        for input in [
            "2\na 0 0\n",
            "2\na 0 0\nb 1\n",
            "1\na 0 0\n2\na",
            "2\na 0 0\nb 0 0\n1\na b\n",
        ] {
            assert_eq!(
                read(input).unwrap_err().kind(),
                ErrorKind::UnexpectedEndOfStream,
                "{input:?}"
            );
        }
    }

    #[test]
    fn invalid_tokens() {
        for input in [
            "1\na zero 0\n",
            "1\na 0 0\nmany\n",
            "2\na 0 0\nb 0 0\n1\na b heavy\n",
        ] {
            assert_eq!(
                read(input).unwrap_err().kind(),
                ErrorKind::InvalidToken,
                "{input:?}"
            );
        }
    }

    #[test]
    fn rejected_entries() {
        let cases = [
            ("2\na 0 0\na 1 1\n0\n", Violation::DuplicateName("a".into())),
            ("1\na 0 0\n1\na a 3\n", Violation::SelfLoop),
            ("1\na 0 0\n1\na b 3\n", Violation::UnknownNode),
            ("2\na 0 0\nb 0 0\n1\na b 0\n", Violation::WeightOutOfRange(0)),
        ];

        for (input, violation) in cases {
            assert_eq!(read(input).unwrap_err().violation(), Some(&violation), "{input:?}");
        }
    }

    #[test]
    fn file_round_trip() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("random.graph");

        for n in [1, 4, 25] {
            let mut graph = random_graph(rng, n, 0.3);
            let first = graph.node_list()[0];
            graph.set_position(first, (0.125, -7.5)).unwrap();

            graph.write_to_file(&path).unwrap();

            let mut read = Graph::new();
            read.read_from_file(&path).unwrap();

            assert_eq!(named_nodes(&read), named_nodes(&graph));
            assert_eq!(named_arcs(&read), named_arcs(&graph));
            assert_degrees_consistent(&read);
        }
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.graph");

        let mut graph = Graph::with_nodes(3);
        let err = graph.read_from_file(&path).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(graph.is_empty());
        assert_eq!(
            Graph::try_read_text_file(&path).unwrap_err().kind(),
            ErrorKind::FileNotFound
        );
    }

    #[test]
    fn failed_read_leaves_graph_cleared() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut graph = graph_from_arcs(["x", "y"], [("x", "y", 1)]);
        {
            let events = Rc::clone(&events);
            graph.subscribe(move |event| events.borrow_mut().push(event.clone()));
        }

        let err = TextReader::new()
            .read_into(&mut graph, Cursor::new("2\na 0 0\n"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfStream);
        assert!(graph.is_empty());
        assert!(graph.has_no_arcs());
        assert_eq!(*events.borrow(), vec![GraphEvent::Cleared]);
    }

    #[test]
    fn successful_read_notifies_once_and_invalidates_handles() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut graph = Graph::with_nodes(2);
        let old = graph.node_list()[0];
        {
            let events = Rc::clone(&events);
            graph.subscribe(move |event| events.borrow_mut().push(event.clone()));
        }

        TextReader::new()
            .read_into(&mut graph, Cursor::new("2\na0 0 0\nz 1 1\n1\nz a0 4\n"))
            .unwrap();

        assert_eq!(*events.borrow(), vec![GraphEvent::Loaded]);
        assert!(!graph.has_node(old));
        assert_eq!(graph.weight("z", "a0"), 4);
        assert_eq!(graph.number_of_subscribers(), 1);
        assert_eq!(graph.nodes_ever_added(), 4);
    }
}
