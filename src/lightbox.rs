/// Lightbox overlay state: closed, or open on a position in the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightboxState {
    #[default]
    Closed,
    Open { index: usize },
}

impl LightboxState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Open { index } => Some(*index),
            Self::Closed => None,
        }
    }

    /// Open (or re-target) the overlay. Refused when `index` is outside `0..len`,
    /// which includes every index of an empty list.
    pub fn open(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        *self = Self::Open { index };
        true
    }

    /// Step by `delta` with wraparound at both ends. Returns the new index,
    /// or `None` when closed or the list is empty.
    pub fn navigate(&mut self, delta: isize, len: usize) -> Option<usize> {
        let Self::Open { index } = *self else {
            return None;
        };
        if len == 0 {
            return None;
        }
        let next = wrap_index(index, delta, len);
        *self = Self::Open { index: next };
        Some(next)
    }

    /// Returns whether the overlay was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = Self::Closed;
        was_open
    }
}

/// `(index + delta) mod len`, always in `0..len`. `len` must be non-zero.
pub fn wrap_index(index: usize, delta: isize, len: usize) -> usize {
    let len = len as isize;
    (index as isize + delta).rem_euclid(len) as usize
}
