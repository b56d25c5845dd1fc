//! Codec registry: the fixed name -> codec table.
//!
//! The table is built once and only read afterwards. Unknown names resolve to
//! `None`; rejecting them is the configuration layer's job.

use indexmap::IndexMap;
use std::sync::OnceLock;
use crate::codec::Codec;

static BUILTIN: OnceLock<CodecRegistry> = OnceLock::new();

/// Registry mapping codec names to codecs, in registration order.
#[derive(Debug, Clone, Default)]
pub struct CodecRegistry {
    codecs: IndexMap<String, Codec>,
}

impl CodecRegistry {
    /// Create a new empty codec registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry holding the built-in codecs.
    ///
    /// Built on first use and shared read-only between threads.
    pub fn builtin() -> &'static CodecRegistry {
        BUILTIN.get_or_init(register_builtin_codecs)
    }

    /// Register a codec under its own name, replacing any previous entry
    pub fn register(&mut self, codec: Codec) {
        self.codecs.insert(codec.name().to_string(), codec);
    }

    /// Look up a codec by name.
    ///
    /// Names are case-sensitive.
    pub fn lookup(&self, name: &str) -> Option<Codec> {
        self.codecs.get(name).copied()
    }

    /// Check if a codec is registered
    pub fn has_codec(&self, name: &str) -> bool {
        self.codecs.contains_key(name)
    }

    /// Registered codec names, in registration order
    pub fn list_codecs(&self) -> Vec<&str> {
        self.codecs.keys().map(|k| k.as_str()).collect()
    }

    pub fn count(&self) -> usize {
        self.codecs.len()
    }
}

/// Build a registry containing the four built-in codecs.
pub fn register_builtin_codecs() -> CodecRegistry {
    let mut registry = CodecRegistry::new();
    for codec in Codec::ALL {
        registry.register(codec);
    }
    registry
}
