//! Candidate selection over emitted assets.
//!
//! Selection is a pure filter evaluated once per run: an asset survives
//! if it was actually emitted, does not match the exclude predicate, and
//! (when an include predicate is configured) matches it. Emission order
//! is preserved so runs are deterministic.

use regex::Regex;
use tracing::trace;

use crate::error::DeployError;
use crate::types::EmittedAsset;

/// Predicate over a file name.
#[derive(Debug, Clone)]
pub enum NamePredicate {
    /// Matches every name.
    Any,
    /// Matches names against a compiled regex.
    Pattern(Regex),
}

impl NamePredicate {
    /// Compiles a pattern predicate. A malformed pattern is a
    /// configuration error, surfaced before any upload begins.
    pub fn pattern(pattern: &str) -> Result<Self, DeployError> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Pattern(re) => re.is_match(name),
        }
    }
}

/// Compiled include/exclude filter pair.
#[derive(Debug, Clone)]
pub struct SelectionFilter {
    /// Names matching this predicate are dropped. `None` excludes nothing.
    exclude: Option<NamePredicate>,
    /// Names must match this predicate. [`NamePredicate::Any`] when no
    /// include pattern is configured.
    include: NamePredicate,
}

impl SelectionFilter {
    /// Compiles the optional exclude/include patterns.
    pub fn new(exclude: Option<&str>, include: Option<&str>) -> Result<Self, DeployError> {
        Ok(Self {
            exclude: exclude.map(NamePredicate::pattern).transpose()?,
            include: include
                .map(NamePredicate::pattern)
                .transpose()?
                .unwrap_or(NamePredicate::Any),
        })
    }

    /// Exclusion wins over inclusion.
    pub fn keeps(&self, name: &str) -> bool {
        if self.exclude.as_ref().is_some_and(|p| p.matches(name)) {
            return false;
        }
        self.include.matches(name)
    }
}

/// Filters `assets` down to the upload candidate set, in emission order.
pub fn select<'a>(assets: &'a [EmittedAsset], filter: &SelectionFilter) -> Vec<&'a EmittedAsset> {
    assets
        .iter()
        .filter(|asset| {
            if !asset.emitted {
                // An asset record without a materialized source file is
                // never a candidate.
                trace!(file = %asset.name, "skipping non-emitted asset");
                return false;
            }
            filter.keeps(&asset.name)
        })
        .collect()
}
