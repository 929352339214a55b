use std::mem;

use smol_str::SmolStr;

use super::{ListKind, Parser};
use crate::arena::{Node, NodeId, NodeKind};
use crate::constants::{TEXT_TYPE, TYPE_KEY, VALUE_KEY};
use crate::text::{self, format_value, CommitMode};

/// Where buffered text is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Dotted key path relative to the current mapping scope.
    Key(SmolStr),
    /// A text element of a simple list.
    Slot(NodeId),
}

/// Text not yet committed, and where it would go on `:end`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Buffer {
    text: String,
    target: Option<Target>,
}

impl Buffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Empties the buffer and forgets its target.
    pub fn flush(&mut self) -> String {
        self.target = None;
        mem::take(&mut self.text)
    }

    fn push(&mut self, line: &str) {
        self.text.push_str(line);
    }

    fn fill(&mut self, text: &str, target: Target) {
        self.text.clear();
        self.text.push_str(text);
        self.target = Some(target);
    }
}

impl Parser {
    pub(super) fn start_key(&mut self, key: &str, rest: &str) {
        self.buffer.flush();
        self.increment_array_element(key);

        let key = if self.in_freeform_list() { VALUE_KEY } else { key };
        let target = Target::Key(SmolStr::new(key));
        self.buffer.fill(rest, target.clone());
        self.commit(&target, CommitMode::Replace);
        self.buffer.target = Some(target);
    }

    pub(super) fn array_element(&mut self, rest: &str) {
        self.buffer.flush();
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        let Some(list) = frame.list else {
            return;
        };
        if frame.kind == ListKind::Unset {
            frame.kind = ListKind::Simple;
        }
        if frame.kind == ListKind::Complex {
            return;
        }

        let slot = self.doc.push(list, Node::empty(NodeKind::Text));
        let target = Target::Slot(slot);
        self.buffer.fill(rest, target.clone());
        self.commit(&target, CommitMode::Replace);
        self.buffer.target = Some(target);
    }

    pub(super) fn text(&mut self, line: &str) {
        if self.skipping {
            return;
        }
        if let Some(list) = self.freeform_list() {
            if !text::is_blank(line) {
                let element = self.doc.push(list, Node::empty(NodeKind::Mapping));
                let value = text::trim(line).to_string();
                self.doc
                    .replace(element, TYPE_KEY, Node::Text(TEXT_TYPE.to_string()));
                self.doc.replace(element, VALUE_KEY, Node::Text(value));
                return;
            }
        }
        self.buffer.push(line);
    }

    /// Moves the buffer into the document. A replace commit keeps the
    /// trailing whitespace of the first line buffered, so the line break
    /// survives if continuation lines follow.
    pub(super) fn commit(&mut self, target: &Target, mode: CommitMode) {
        let raw = self.buffer.flush();
        let formatted = format_value(&raw, mode, self.comments);
        let value = match mode {
            CommitMode::Replace => {
                let value = text::trim_start(&formatted);
                self.buffer.push(text::trailing_whitespace(value));
                value
            }
            CommitMode::Append => formatted.as_ref(),
        };
        let value = text::trim_end(value);

        let slot = match target {
            Target::Slot(slot) => *slot,
            Target::Key(path) => {
                let (mapping, leaf) = self.doc.resolve_parent(self.scope, path);
                match mode {
                    CommitMode::Replace => {
                        self.doc.replace(mapping, leaf, Node::empty(NodeKind::Text))
                    }
                    CommitMode::Append => self.doc.coerce(mapping, leaf, NodeKind::Text),
                }
            }
        };
        match mode {
            CommitMode::Replace => self.doc.set_text(slot, value),
            CommitMode::Append => self.doc.append_text(slot, value),
        }
    }
}
