//! Parsed tree: one [`Node`] per value, borrowing from the input.
//!
//! Each node records its kind and its trimmed raw span. Containers also hold
//! an ordered key list (decimal indices for arrays, decoded keys for objects)
//! and their children in the same order.
//!
//! Duplicate object keys keep their first position in the key list, while the
//! child stored there is the last value written for the key.

use alloc::{borrow::Cow, string::ToString, sync::Arc, vec::Vec};
use core::fmt;
use std::collections::HashMap;

use bstr::ByteSlice;
use log::{debug, trace};

use crate::{
    Error, Kind, ReaderOptions, Result,
    coerce::decode_str,
    lexical::ltrim,
    scanner::{Scanned, scan, string_end},
};

/// A value in a parsed tree.
#[derive(Clone, PartialEq)]
pub struct Node<'a> {
    kind: Kind,
    raw: &'a [u8],
    keys: Vec<Cow<'a, str>>,
    children: Vec<Arc<Node<'a>>>,
    /// Key to position in `keys`; objects only.
    index: HashMap<Cow<'a, str>, usize>,
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("raw", &self.raw.as_bstr())
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl<'a> Node<'a> {
    /// Builds the tree for `buf`.
    ///
    /// The input is assumed to have passed the grammar validator; the scanner
    /// only checks structure, so ungrammatical leaves can slip through when
    /// this is called on unvalidated input.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] for blank input, [`Error::Malformed`] when the
    /// structure cannot be followed, and [`Error::DepthExceeded`] past
    /// `options.max_depth`.
    pub fn build(buf: &'a [u8], options: &ReaderOptions) -> Result<Self> {
        if ltrim(buf, 0) == buf.len() {
            return Err(Error::Empty);
        }
        let root = scan(buf, 0);
        if !root.is_valid() || root.terminator.is_some() {
            let at = if root.is_valid() { root.end } else { root.start };
            return Err(Error::malformed(buf, at));
        }
        let builder = Builder {
            buf,
            max_depth: options.max_depth,
        };
        let node = builder.node(&root, 0)?;
        debug!("built {} tree over {} bytes", node.kind, buf.len());
        Ok(node)
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The trimmed raw span, including container delimiters and string
    /// quotes.
    #[must_use]
    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// The ordered key list; empty for scalars.
    #[must_use]
    pub fn keys(&self) -> &[Cow<'a, str>] {
        &self.keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Looks up a direct child. Object keys match exactly; array keys must
    /// be decimal indices.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&Arc<Node<'a>>> {
        let pos = match self.kind {
            Kind::Object => *self.index.get(key)?,
            Kind::Array => parse_index(key)?,
            _ => return None,
        };
        self.children.get(pos)
    }

    /// Children in source order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = &Arc<Node<'a>>> {
        self.children.iter()
    }

    /// `(key, child)` pairs in source order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&Cow<'a, str>, &Arc<Node<'a>>)> {
        self.keys.iter().zip(self.children.iter())
    }
}

/// Canonical decimal only: no sign, no whitespace, no leading zeros.
fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty()
        || (segment.len() > 1 && segment.starts_with('0'))
        || !segment.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    segment.parse().ok()
}

struct Builder<'a> {
    buf: &'a [u8],
    max_depth: usize,
}

impl<'a> Builder<'a> {
    fn leaf(&self, s: &Scanned) -> Node<'a> {
        Node {
            kind: s.kind,
            raw: &self.buf[s.start..s.end],
            keys: Vec::new(),
            children: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn node(&self, s: &Scanned, depth: usize) -> Result<Node<'a>> {
        match s.kind {
            Kind::Array | Kind::Object if depth >= self.max_depth => {
                Err(Error::DepthExceeded(self.max_depth))
            }
            Kind::Array => self.array(s, depth + 1),
            Kind::Object => self.object(s, depth + 1),
            Kind::Invalid => Err(Error::malformed(self.buf, s.start)),
            _ => Ok(self.leaf(s)),
        }
    }

    /// Scans the element at `pos` and checks that it is followed by a `,` or
    /// by the container's own closing byte at `close`.
    fn element(&self, pos: usize, close: usize) -> Result<Scanned> {
        let s = scan(self.buf, pos);
        if !s.is_valid() {
            return Err(Error::malformed(self.buf, s.start));
        }
        match s.terminator {
            Some(b',') if s.next <= close => Ok(s),
            Some(_) if s.next == close + 1 => Ok(s),
            _ => Err(Error::malformed(self.buf, s.end)),
        }
    }

    fn array(&self, s: &Scanned, depth: usize) -> Result<Node<'a>> {
        let mut node = self.leaf(s);
        let close = s.end - 1;
        let mut pos = ltrim(self.buf, s.start + 1);
        if pos == close {
            return Ok(node);
        }
        loop {
            let el = self.element(pos, close)?;
            let child = self.node(&el, depth)?;
            node.keys.push(Cow::Owned(node.children.len().to_string()));
            node.children.push(Arc::new(child));
            if el.terminator != Some(b',') {
                return Ok(node);
            }
            pos = el.next;
        }
    }

    fn object(&self, s: &Scanned, depth: usize) -> Result<Node<'a>> {
        let mut node = self.leaf(s);
        let close = s.end - 1;
        let mut pos = ltrim(self.buf, s.start + 1);
        if pos == close {
            return Ok(node);
        }
        loop {
            if self.buf.get(pos) != Some(&b'"') {
                return Err(Error::malformed(self.buf, pos));
            }
            let key_end = string_end(self.buf, pos)
                .filter(|&end| end <= close)
                .ok_or_else(|| Error::malformed(self.buf, pos))?;
            let key = decode_str(&self.buf[pos + 1..key_end - 1]);

            let colon = ltrim(self.buf, key_end);
            if self.buf.get(colon) != Some(&b':') {
                return Err(Error::malformed(self.buf, colon));
            }
            let member = self.element(colon + 1, close)?;
            let child = Arc::new(self.node(&member, depth)?);

            if let Some(&at) = node.index.get(&key) {
                trace!("duplicate key {key:?}; keeping first position, last value");
                node.children[at] = child;
            } else {
                node.index.insert(key.clone(), node.keys.len());
                node.keys.push(key);
                node.children.push(child);
            }
            if member.terminator != Some(b',') {
                return Ok(node);
            }
            pos = ltrim(self.buf, member.next);
        }
    }
}
