use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::arena::NodeId;
use crate::constants::MAX_DEPTH;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Array,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScopeFlags {
    /// `.`: attach under the current scope instead of the document root.
    pub nested: bool,
    /// `+`: elements are typed `{type, value}` records.
    pub freeform: bool,
}

impl ScopeFlags {
    pub fn parse(flags: &str) -> Self {
        Self {
            nested: flags.contains('.'),
            freeform: flags.contains('+'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayShape {
    #[default]
    Unset,
    Simple,
    Complex,
    Freeform,
}

impl ArrayShape {
    /// One-way transition: only `Unset` ever changes.
    pub fn settle(&mut self, shape: ArrayShape) -> bool {
        if *self == ArrayShape::Unset && shape != ArrayShape::Unset {
            *self = shape;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone)]
pub struct ArrayState {
    pub node: NodeId,
    pub shape: ArrayShape,
    pub first_key: Option<SmolStr>,
}

impl ArrayState {
    pub fn new(node: NodeId, freeform: bool) -> Self {
        let shape = if freeform {
            ArrayShape::Freeform
        } else {
            ArrayShape::Unset
        };
        Self {
            node,
            shape,
            first_key: None,
        }
    }

    /// Whether `key` opens a new element of a complex or freeform array.
    /// Records the first key of a complex array.
    pub fn starts_element(&mut self, key: &str) -> bool {
        match self.shape {
            ArrayShape::Freeform => true,
            ArrayShape::Complex => match &self.first_key {
                Some(first) => first == key,
                None => {
                    self.first_key = Some(SmolStr::new(key));
                    true
                }
            },
            ArrayShape::Unset | ArrayShape::Simple => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScopeFrame {
    /// Present iff the frame was opened by `[...]`.
    pub array: Option<ArrayState>,
    pub flags: ScopeFlags,
    /// Scope to restore when this frame closes.
    pub parent: NodeId,
}

impl ScopeFrame {
    pub fn is_freeform_array(&self) -> bool {
        self.array
            .as_ref()
            .is_some_and(|array| array.shape == ArrayShape::Freeform)
    }

    pub fn shape(&self) -> Option<ArrayShape> {
        self.array.as_ref().map(|array| array.shape)
    }
}

#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: SmallVec<[ScopeFrame; 8]>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> Option<&ScopeFrame> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut ScopeFrame> {
        self.frames.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self, frame: ScopeFrame) -> Result<()> {
        if self.frames.len() >= MAX_DEPTH {
            return Err(Error::depth_limit(MAX_DEPTH));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Drops every open frame and starts over with `frame`.
    pub fn reset(&mut self, frame: ScopeFrame) {
        self.frames.clear();
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Result<ScopeFrame> {
        self.frames.pop().ok_or_else(Error::unbalanced_scope_close)
    }

    /// Key starts are disabled inside simple arrays.
    pub fn keys_allowed(&self) -> bool {
        self.top().and_then(ScopeFrame::shape) != Some(ArrayShape::Simple)
    }

    /// `*` lines apply to arrays that are neither complex nor freeform.
    pub fn elements_allowed(&self) -> bool {
        match self.top() {
            Some(frame) if !frame.flags.freeform => {
                matches!(frame.shape(), Some(ArrayShape::Unset | ArrayShape::Simple))
            }
            _ => false,
        }
    }
}
