/*  This file is part of axum-regex-block
 *  Copyright (C) 2025  Grant DeFayette
 *
 *  axum-regex-block is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU Lesser General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  axum-regex-block is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU Lesser General Public License for more details.
 *
 *  You should have received a copy of the GNU Lesser General Public License
 *  along with axum-regex-block.  If not, see <https://www.gnu.org/licenses/>.
 */

use crate::error::{RegexBlockError, Result};
use crate::logging::PluginLog;
use regex::Regex;

/// A path pattern that compiled successfully.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
}

impl CompiledPattern {
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl std::fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
    rejected: Vec<String>,
}

impl PatternSet {
    /// Compiles `sources` in order. Invalid patterns are logged and skipped;
    /// fails only when nothing usable is left.
    pub fn new<S: AsRef<str>>(sources: &[S], log: &PluginLog) -> Result<Self> {
        let mut patterns = Vec::with_capacity(sources.len());
        let mut rejected = Vec::new();

        for source in sources {
            let source = source.as_ref();
            match Regex::new(source) {
                Ok(regex) => {
                    if log.debug_enabled() {
                        tracing::debug!(
                            parent: log.span(),
                            pattern = %source,
                            "Adding regex pattern"
                        );
                    }
                    patterns.push(CompiledPattern { regex });
                }
                Err(source_err) => {
                    let err = RegexBlockError::InvalidPattern {
                        pattern: source.to_string(),
                        source: source_err,
                    };
                    tracing::error!(parent: log.span(), pattern = %source, "{}", err);
                    rejected.push(source.to_string());
                }
            }
        }

        if patterns.is_empty() {
            tracing::error!(
                parent: log.span(),
                "There were no valid regex patterns. Middleware will not load."
            );
            return Err(RegexBlockError::NoValidPatterns);
        }

        Ok(Self { patterns, rejected })
    }

    /// First pattern, in configured order, that matches `path`.
    pub fn matches(&self, path: &str) -> Option<&CompiledPattern> {
        self.patterns.iter().find(|pattern| pattern.is_match(path))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Source strings that failed to compile.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> PluginLog {
        PluginLog::new("patterns-test", true)
    }

    fn test_patterns() -> Vec<String> {
        vec![
            "^/admin".to_string(),
            r"\.php\d?$".to_string(),
            r"/\.git/".to_string(),
        ]
    }

    #[test]
    fn test_first_match_in_configured_order() {
        let set = PatternSet::new(&test_patterns(), &log()).unwrap();

        let pattern = set.matches("/admin/index.php").unwrap();
        assert_eq!(pattern.as_str(), "^/admin");

        let pattern = set.matches("/vendor/phpunit/eval-stdin.php").unwrap();
        assert_eq!(pattern.as_str(), r"\.php\d?$");
    }

    #[test]
    fn test_no_implicit_anchoring() {
        let set = PatternSet::new(&[r"/\.git/"], &log()).unwrap();
        assert!(set.matches("/static/.git/config").is_some());

        let anchored = PatternSet::new(&["^/admin"], &log()).unwrap();
        assert!(anchored.matches("/site/admin").is_none());
    }

    #[test]
    fn test_case_sensitive() {
        let set = PatternSet::new(&["^/admin"], &log()).unwrap();
        assert!(set.matches("/ADMIN").is_none());
    }

    #[test]
    fn test_allows_legitimate_paths() {
        let set = PatternSet::new(&test_patterns(), &log()).unwrap();
        assert!(set.matches("/blog/hello-world").is_none());
        assert!(set.matches("/").is_none());
    }

    #[test]
    fn test_invalid_pattern_skipped() {
        let set = PatternSet::new(&["(", "^/admin"], &log()).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.rejected(), ["("]);
        assert!(set.matches("/admin/login").is_some());
    }

    #[test]
    fn test_only_invalid_patterns_fails() {
        let result = PatternSet::new(&["("], &log());
        assert!(matches!(result, Err(RegexBlockError::NoValidPatterns)));
    }

    #[test]
    fn test_empty_pattern_list_fails() {
        let result = PatternSet::new::<String>(&[], &log());
        assert!(matches!(result, Err(RegexBlockError::NoValidPatterns)));
    }
}
