pub mod buffer;
pub mod classify;
pub mod scan;
pub mod scope;

use std::io::BufRead;

use smallvec::SmallVec;
use tracing::{debug, instrument, trace};

use crate::arena::{Arena, NodeId};
use crate::{Document, ParseOptions, Result};

pub use buffer::{Buffer, Target};
pub use classify::{classify, Bracket, Command, Gate, Line, Modifiers};
pub use scope::{ListKind, ScopeFrame};

/// The whole state of one parse. Each call to [`Parser::apply`] is one
/// transition of the line-driven state machine.
#[derive(Debug)]
pub struct Parser {
    doc: Arena,
    /// Mapping that bare `key: value` lines write into.
    scope: NodeId,
    stack: SmallVec<[ScopeFrame; 4]>,
    buffer: Buffer,
    skipping: bool,
    done: bool,
    comments: bool,
}

impl Parser {
    pub fn new(options: &ParseOptions) -> Self {
        let doc = Arena::new();
        let root = doc.root();
        Self {
            doc,
            scope: root,
            stack: SmallVec::new(),
            buffer: Buffer::default(),
            skipping: false,
            done: false,
            comments: options.comments,
        }
    }

    /// Classifies and applies one raw line, terminator included. Returns
    /// `false` once `:ignore` has been read; further lines are ignored.
    ///
    /// A key or declaration that would nest deeper than
    /// [`MAX_DEPTH`](crate::constants::MAX_DEPTH) is read as a text line.
    pub fn feed_line(&mut self, line: &str) -> bool {
        if self.done {
            return false;
        }
        let classified = match classify(line, self.gate()) {
            classified if self.fits_depth(&classified) => classified,
            _ => {
                debug!("nesting too deep, reading line as text");
                Line::Text(line)
            }
        };
        self.apply(classified);
        !self.done
    }

    /// Structural rules available to the next line.
    pub fn gate(&self) -> Gate {
        let frame = self.stack.last();
        let list_kind = frame.filter(|frame| frame.list.is_some()).map(|frame| frame.kind);
        Gate {
            skipping: self.skipping,
            keys: list_kind != Some(ListKind::Simple),
            bullets: matches!(list_kind, Some(ListKind::Unset | ListKind::Simple))
                && !self.in_freeform_list(),
        }
    }

    /// Applies one classified line. Keys and declarations that would nest
    /// too deep are dropped.
    pub fn apply(&mut self, line: Line<'_>) {
        if self.done || !self.fits_depth(&line) {
            return;
        }
        trace!(?line, "apply");
        match line {
            Line::Command(command) => self.command(command),
            Line::Key { key, rest } => self.start_key(key, rest),
            Line::Bullet { rest } => self.array_element(rest),
            Line::Scope {
                bracket,
                modifiers,
                name,
            } => self.open_scope(bracket, modifiers, name),
            Line::Text(text) => self.text(text),
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn is_skipping(&self) -> bool {
        self.skipping
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current_scope(&self) -> NodeId {
        self.scope
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Ends the stream. Text still waiting for `:end` is dropped.
    pub fn finish(mut self) -> Document {
        let pending = self.buffer.flush();
        if !pending.is_empty() {
            trace!(bytes = pending.len(), "discarding unterminated buffer");
        }
        Document::from_arena(self.doc)
    }

    fn command(&mut self, command: Command) {
        if self.skipping && !matches!(command, Command::EndSkip | Command::Ignore) {
            self.buffer.flush();
            return;
        }
        debug!(?command, "command");
        match command {
            Command::End => {
                if let Some(target) = self.buffer.target().cloned() {
                    self.commit(&target, crate::text::CommitMode::Append);
                }
                return;
            }
            Command::Ignore => {
                self.done = true;
                return;
            }
            Command::Skip => self.skipping = true,
            Command::EndSkip => self.skipping = false,
        }
        self.buffer.flush();
    }
}

#[instrument(level = "debug", skip_all, fields(bytes = input.len(), comments = options.comments))]
pub fn parse_str(input: &str, options: &ParseOptions) -> Document {
    let mut parser = Parser::new(options);
    for line in scan::lines(input) {
        if !parser.feed_line(line) {
            debug!("stopped at :ignore");
            break;
        }
    }
    parser.finish()
}

/// Pulls lines from `reader` until it is exhausted or `:ignore` is reached.
#[instrument(level = "debug", skip_all, fields(comments = options.comments))]
pub fn parse_reader<R: BufRead>(mut reader: R, options: &ParseOptions) -> Result<Document> {
    let mut parser = Parser::new(options);
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if !parser.feed_line(&line) {
            debug!("stopped at :ignore");
            break;
        }
    }
    Ok(parser.finish())
}
