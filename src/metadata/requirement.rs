//! Parsing of single `Requires-Dist` declarations

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::archive::DEFAULT_EXTRA_VALUES;
use crate::core::NodeId;

/// Matches an `extra == "<value>"` clause and captures the value
static EXTRA_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bextra\s*==\s*(?:"([^"]*)"|'([^']*)')"#).expect("extra clause regex is valid")
});

/// Characters that terminate the bare package name in a declaration
const NAME_TERMINATORS: &[char] = &['<', '>', '=', '!', '~', '[', ']', '('];

/// One raw dependency declaration, split into its requirement and its
/// optional environment condition
///
/// ```
/// use deptrace::metadata::DependencySpec;
///
/// let spec = DependencySpec::parse("PySocks!=1.5.7,>=1.5.6; extra == \"socks\"");
/// assert_eq!(spec.bare_name().unwrap().as_str(), "pysocks");
/// assert!(spec.is_extra_gated());
/// assert!(spec.resolve().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencySpec<'a> {
    requirement: &'a str,
    condition: Option<&'a str>,
}

impl<'a> DependencySpec<'a> {
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once(';') {
            Some((requirement, condition)) => Self {
                requirement: requirement.trim(),
                condition: Some(condition.trim()).filter(|c| !c.is_empty()),
            },
            None => Self {
                requirement: raw.trim(),
                condition: None,
            },
        }
    }

    pub fn requirement(&self) -> &'a str {
        self.requirement
    }

    pub fn condition(&self) -> Option<&'a str> {
        self.condition
    }

    /// Whether the declaration only applies when a named extra is requested
    pub fn is_extra_gated(&self) -> bool {
        let Some(condition) = self.condition else {
            return false;
        };

        EXTRA_CLAUSE.captures_iter(condition).any(|captures| {
            let value = captures
                .get(1)
                .or_else(|| captures.get(2))
                .map_or("", |m| m.as_str().trim());
            !DEFAULT_EXTRA_VALUES.contains(&value)
        })
    }

    /// Leading package name with version operators and extras stripped
    pub fn bare_name(&self) -> Option<NodeId> {
        let end = self
            .requirement
            .find(|c: char| NAME_TERMINATORS.contains(&c) || c.is_whitespace())
            .unwrap_or(self.requirement.len());

        let name = NodeId::new(&self.requirement[..end]);
        (!name.is_empty()).then_some(name)
    }

    /// The dependency this declaration contributes, if it is included
    pub fn resolve(&self) -> Option<NodeId> {
        if self.is_extra_gated() {
            return None;
        }
        self.bare_name()
    }
}
