use smol_str::SmolStr;
use tracing::debug;

use super::{Bracket, Line, Modifiers, Parser};
use crate::arena::{Node, NodeId, NodeKind};
use crate::constants::{MAX_DEPTH, PATH_SEPARATOR, TYPE_KEY, VALUE_KEY};

/// Shape of a list, fixed by the first line written into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListKind {
    #[default]
    Unset,
    /// Bullets only; elements are text.
    Simple,
    /// Keys only; elements are mappings.
    Complex,
}

/// One open `[list]`, or a `{.mapping}` opened inside one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    pub list: Option<NodeId>,
    pub kind: ListKind,
    /// First key seen in this list; seeing it again starts a new element.
    pub first_key: Option<SmolStr>,
    pub freeform: bool,
    /// Mapping scope to restore when the frame closes.
    pub parent_scope: NodeId,
}

impl ScopeFrame {
    fn new(list: Option<NodeId>, freeform: bool, parent_scope: NodeId) -> Self {
        Self {
            list,
            kind: ListKind::Unset,
            first_key: None,
            freeform,
            parent_scope,
        }
    }
}

impl Parser {
    /// The list of the innermost frame when that frame is freeform.
    pub(super) fn freeform_list(&self) -> Option<NodeId> {
        self.stack
            .last()
            .filter(|frame| frame.freeform)
            .and_then(|frame| frame.list)
    }

    pub(super) fn in_freeform_list(&self) -> bool {
        self.freeform_list().is_some()
    }

    /// Whether applying `line` keeps every node within [`MAX_DEPTH`]. The
    /// estimate assumes the line opens a new list element, and a list
    /// declaration reserves room for an element and its fields.
    pub(super) fn fits_depth(&self, line: &Line<'_>) -> bool {
        let (path, nested, reserve) = match *line {
            Line::Key { key, .. } => (key, true, 0),
            Line::Scope {
                bracket,
                modifiers,
                name,
            } if !name.is_empty() => {
                let reserve = match bracket {
                    Bracket::List => 2,
                    Bracket::Mapping => 0,
                };
                (name, modifiers.nested, reserve)
            }
            _ => return true,
        };

        let (base, levels) = if !nested {
            (0, path.split(PATH_SEPARATOR).count())
        } else {
            let element = self
                .stack
                .last()
                .and_then(|frame| frame.list)
                .map_or(0, |list| self.doc.depth(list) + 1);
            let levels = if self.in_freeform_list() {
                1
            } else {
                path.split(PATH_SEPARATOR).count()
            };
            (self.doc.depth(self.scope).max(element), levels)
        };
        base + levels + reserve <= MAX_DEPTH
    }

    /// Accounts for `key` inside the innermost list: a key that opens the
    /// element (no key yet, or the list's first key again) appends a fresh
    /// mapping and makes it the current scope.
    pub(super) fn increment_array_element(&mut self, key: &str) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        let Some(list) = frame.list else {
            return;
        };

        if frame.freeform {
            let element = self.doc.push(list, Node::empty(NodeKind::Mapping));
            self.doc.replace(element, TYPE_KEY, Node::Text(key.to_string()));
            self.scope = element;
            return;
        }

        if frame.kind == ListKind::Simple {
            return;
        }
        frame.kind = ListKind::Complex;

        let starts_element = frame.first_key.as_deref().map_or(true, |first| first == key);
        if frame.first_key.is_none() {
            frame.first_key = Some(SmolStr::new(key));
        }
        if starts_element {
            self.scope = self.doc.push(list, Node::empty(NodeKind::Mapping));
            debug!(key, "new list element");
        }
    }

    pub(super) fn open_scope(&mut self, bracket: Bracket, modifiers: Modifiers, name: &str) {
        self.buffer.flush();
        let root = self.doc.root();

        if name.is_empty() {
            match bracket {
                Bracket::Mapping => {
                    self.scope = root;
                    self.stack.clear();
                    debug!("reset to root");
                }
                Bracket::List => {
                    if let Some(frame) = self.stack.pop() {
                        self.scope = frame.parent_scope;
                        debug!(depth = self.stack.len(), "closed scope");
                    }
                }
            }
            return;
        }

        let within_freeform = modifiers.nested && self.in_freeform_list();
        let mut key_scope = root;
        if modifiers.nested {
            self.increment_array_element(name);
            if !self.stack.is_empty() {
                key_scope = self.scope;
            }
        } else {
            self.scope = root;
            self.stack.clear();
        }

        // Freeform elements keep the declaration verbatim as their `type`
        // and hold the nested value under `value`.
        let (key_scope, leaf) = if within_freeform {
            (key_scope, VALUE_KEY)
        } else {
            self.doc.resolve_parent(key_scope, name)
        };

        match bracket {
            Bracket::List => {
                let list = self.doc.replace(key_scope, leaf, Node::empty(NodeKind::List));
                let frame = ScopeFrame::new(Some(list), modifiers.freeform, self.scope);
                self.stack.push(frame);
                debug!(
                    name,
                    depth = self.stack.len(),
                    freeform = modifiers.freeform,
                    "opened list"
                );
            }
            Bracket::Mapping => {
                let mapping = self.doc.coerce(key_scope, leaf, NodeKind::Mapping);
                if modifiers.nested && !self.stack.is_empty() {
                    self.stack
                        .push(ScopeFrame::new(None, modifiers.freeform, self.scope));
                }
                self.scope = mapping;
                debug!(name, depth = self.stack.len(), "opened mapping");
            }
        }
    }
}
