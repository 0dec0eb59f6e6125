//! Binary grammar snapshots using postcard.

use super::json::GrammarError;
use super::types::Grammar;

impl Grammar {
    /// Decode a grammar snapshot produced by [`Grammar::to_binary`].
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GrammarError> {
        postcard::from_bytes(bytes).map_err(GrammarError::Binary)
    }

    /// Encode the grammar as a compact snapshot.
    pub fn to_binary(&self) -> Result<Vec<u8>, GrammarError> {
        postcard::to_allocvec(self).map_err(GrammarError::Binary)
    }
}
