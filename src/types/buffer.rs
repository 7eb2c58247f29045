use bytes::Bytes;

/// Capacity of a freshly created or reset buffer.
pub const DEFAULT_CAPACITY: usize = 32;

/// A byte buffer backing string values.
///
/// Capacity is tracked explicitly and grows to `max(capacity * 2, needed)` whenever an append
/// does not fit, so a sequence of appends costs amortized O(1) per byte. Bytes past `len` are
/// never exposed.
#[derive(Debug, Clone)]
pub struct Buffer {
    content: Box<[u8]>,
    len: usize,
}

impl Buffer {
    pub fn new() -> Buffer {
        Buffer {
            content: vec![0; DEFAULT_CAPACITY].into_boxed_slice(),
            len: 0,
        }
    }

    /// Creates a buffer holding `data`. Inputs longer than the default capacity get a buffer of
    /// exactly their length.
    pub fn from_bytes(data: &[u8]) -> Buffer {
        if data.len() > DEFAULT_CAPACITY {
            return Buffer {
                content: data.into(),
                len: data.len(),
            };
        }

        let mut buffer = Buffer::new();
        buffer.content[..data.len()].copy_from_slice(data);
        buffer.len = data.len();
        buffer
    }

    pub fn append(&mut self, byte: u8) {
        if self.len + 1 > self.capacity() {
            self.grow(self.len + 1);
        }

        self.content[self.len] = byte;
        self.len += 1;
    }

    pub fn append_bytes(&mut self, data: &[u8]) {
        let needed = self.len + data.len();
        if needed > self.capacity() {
            self.grow(needed);
        }

        self.content[self.len..needed].copy_from_slice(data);
        self.len = needed;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content[..self.len]
    }

    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.content.len()
    }

    /// Drops the content and reallocates at the default capacity.
    pub fn reset(&mut self) {
        *self = Buffer::new();
    }

    fn grow(&mut self, needed: usize) {
        let capacity = needed.max(self.capacity() * 2);
        let mut content = vec![0; capacity].into_boxed_slice();
        content[..self.len].copy_from_slice(self.as_bytes());
        self.content = content;
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Buffer {
    fn from(s: &str) -> Self {
        Buffer::from_bytes(s.as_bytes())
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Buffer {}
