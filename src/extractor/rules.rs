//! Include/exclude rules applied to candidate titles.
//!
//! A rule written as `re:<pattern>` is a regular expression used as-is; any
//! other rule is a literal matched as a case-insensitive substring.

use regex::Regex;
use thiserror::Error;

const REGEX_PREFIX: &str = "re:";

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid rule pattern '{pattern}': {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A blank rule would match every title.
    #[error("blank rule pattern '{0}'")]
    Blank(String),
}

/// A rule as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Literal(String),
    Regex(String),
}

impl Pattern {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(REGEX_PREFIX) {
            Some(pattern) => Self::Regex(pattern.to_string()),
            None => Self::Literal(raw.to_string()),
        }
    }

    pub fn compile(&self) -> Result<Regex, RuleError> {
        let (Self::Literal(body) | Self::Regex(body)) = self;
        if body.trim().is_empty() {
            return Err(RuleError::Blank(self.to_string()));
        }
        let source = match self {
            Self::Literal(text) => format!("(?i){}", regex::escape(text)),
            Self::Regex(pattern) => pattern.clone(),
        };
        Regex::new(&source).map_err(|source| RuleError::Invalid {
            pattern: self.to_string(),
            source,
        })
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Regex(pattern) => write!(f, "{REGEX_PREFIX}{pattern}"),
        }
    }
}

/// Compiled include and exclude matchers. Immutable once built.
#[derive(Debug, Clone)]
pub struct RuleSet {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl RuleSet {
    pub fn compile<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self, RuleError> {
        Ok(Self {
            include: compile_all(include)?,
            exclude: compile_all(exclude)?,
        })
    }

    pub fn has_include(&self) -> bool {
        !self.include.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        matches(text, &self.include, &self.exclude)
    }
}

fn compile_all<S: AsRef<str>>(rules: &[S]) -> Result<Vec<Regex>, RuleError> {
    rules
        .iter()
        .map(|raw| Pattern::parse(raw.as_ref()).compile())
        .collect()
}

/// True when some include pattern and no exclude pattern matches. An empty
/// include list matches nothing.
pub fn matches(text: &str, include: &[Regex], exclude: &[Regex]) -> bool {
    if include.is_empty() {
        return false;
    }
    if !include.iter().any(|p| p.is_match(text)) {
        return false;
    }
    !exclude.iter().any(|p| p.is_match(text))
}
