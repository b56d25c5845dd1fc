//! Tag rewriting for re-emitted events.

use crate::runtime::config_loader::{ConfigError, OutputConfig};

/// Rewrites event tags: remove prefix, remove suffix, add prefix, add suffix,
/// in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRewriter {
    remove_prefix: Option<String>,
    remove_suffix: Option<String>,
    add_prefix: Option<String>,
    add_suffix: Option<String>,
}

impl TagRewriter {
    /// Build a rewriter from the tag options of `config`.
    ///
    /// Empty options count as unset.
    ///
    /// # Errors
    /// [`ConfigError::MissingTagRewrite`] when no option is set.
    pub fn new(config: &OutputConfig) -> Result<Self, ConfigError> {
        if !config.has_tag_rewrite() {
            return Err(ConfigError::MissingTagRewrite);
        }

        Ok(Self {
            remove_prefix: non_empty(&config.remove_tag_prefix),
            remove_suffix: non_empty(&config.remove_tag_suffix),
            add_prefix: non_empty(&config.add_tag_prefix),
            add_suffix: non_empty(&config.add_tag_suffix),
        })
    }

    pub fn rewrite(&self, tag: &str) -> String {
        let mut tag = tag;

        if let Some(prefix) = &self.remove_prefix {
            tag = tag.strip_prefix(prefix.as_str()).unwrap_or(tag);
        }
        if let Some(suffix) = &self.remove_suffix {
            tag = tag.strip_suffix(suffix.as_str()).unwrap_or(tag);
        }

        let mut out = String::with_capacity(
            tag.len()
                + self.add_prefix.as_ref().map_or(0, String::len)
                + self.add_suffix.as_ref().map_or(0, String::len),
        );
        if let Some(prefix) = &self.add_prefix {
            out.push_str(prefix);
        }
        out.push_str(tag);
        if let Some(suffix) = &self.add_suffix {
            out.push_str(suffix);
        }
        out
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|s| !s.is_empty())
}
