use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::spec::{EnumScanPatternMode, ScanError};

////////////////////////////////////////////////////////////////////////////////
// #region PatternMatching

#[derive(Debug, Clone)]
pub(crate) enum TypeScanPatternSeq {
    Literal(Vec<String>),
    Glob(Vec<GlobMatcher>),
    Regex(Vec<Regex>),
}

impl TypeScanPatternSeq {
    fn is_match(&self, value: &str) -> bool {
        match self {
            Self::Literal(v) => v.iter().any(|p| value.contains(p.as_str())),
            Self::Glob(v) => v.iter().any(|p| p.is_match(value)),
            Self::Regex(v) => v.iter().any(|p| p.is_match(value)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SpecScanPatterns {
    pub(crate) patterns_include_files: Option<TypeScanPatternSeq>,
    pub(crate) patterns_exclude_files: Option<TypeScanPatternSeq>,
}

impl SpecScanPatterns {
    pub(crate) fn from_raw(
        patterns_include_files: Option<&[String]>,
        patterns_exclude_files: Option<&[String]>,
        rule_pattern: EnumScanPatternMode,
    ) -> Result<Self, ScanError> {
        Ok(Self {
            patterns_include_files: _compile(patterns_include_files, rule_pattern)?,
            patterns_exclude_files: _compile(patterns_exclude_files, rule_pattern)?,
        })
    }

    /// Include list absent means "everything"; exclude list wins over include.
    pub(crate) fn should_exclude(&self, name: &str) -> bool {
        let b_included = self
            .patterns_include_files
            .as_ref()
            .is_none_or(|p| p.is_match(name));
        let b_excluded = self
            .patterns_exclude_files
            .as_ref()
            .is_some_and(|p| p.is_match(name));
        !b_included || b_excluded
    }
}

fn _compile(
    patterns: Option<&[String]>,
    rule_pattern: EnumScanPatternMode,
) -> Result<Option<TypeScanPatternSeq>, ScanError> {
    let Some(patterns) = patterns else {
        return Ok(None);
    };
    if patterns.is_empty() {
        return Ok(None);
    }

    match rule_pattern {
        EnumScanPatternMode::Literal => Ok(Some(TypeScanPatternSeq::Literal(patterns.to_vec()))),
        EnumScanPatternMode::Glob => {
            let mut l_glob = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let matcher = Glob::new(pattern)
                    .map_err(|e| ScanError::InvalidPattern(e.to_string()))?
                    .compile_matcher();
                l_glob.push(matcher);
            }
            Ok(Some(TypeScanPatternSeq::Glob(l_glob)))
        }
        EnumScanPatternMode::Regex => {
            let mut l_regex = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let regex =
                    Regex::new(pattern).map_err(|e| ScanError::InvalidPattern(e.to_string()))?;
                l_regex.push(regex);
            }
            Ok(Some(TypeScanPatternSeq::Regex(l_regex)))
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
