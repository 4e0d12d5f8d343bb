// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

/// Whether a decision accepts or rejects the course at its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecisionKind {
    Include,
    Exclude,
}

/// A branching decision: include or exclude the course at `position` of the
/// search order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decision {
    position: usize,
    kind: DecisionKind,
}

impl Decision {
    #[inline(always)]
    pub const fn include(position: usize) -> Self {
        Self {
            position,
            kind: DecisionKind::Include,
        }
    }

    #[inline(always)]
    pub const fn exclude(position: usize) -> Self {
        Self {
            position,
            kind: DecisionKind::Exclude,
        }
    }

    /// Returns the position in the search order this decision applies to.
    #[inline(always)]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[inline(always)]
    pub const fn kind(&self) -> DecisionKind {
        self.kind
    }

    #[inline(always)]
    pub const fn is_include(&self) -> bool {
        matches!(self.kind, DecisionKind::Include)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            DecisionKind::Include => write!(f, "Include({})", self.position),
            DecisionKind::Exclude => write!(f, "Exclude({})", self.position),
        }
    }
}
