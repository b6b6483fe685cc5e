//! Regular-expression criteria using Perl-style `/.../flags` patterns.

use super::{CriteriaError, SelectionCriteria};
use crate::graph::NodeKind;
use regex::Regex;
use tracing::debug;

const MODIFIERS: &[char] = &['g', 'i', 'm', 'o', 's', 'x'];

/// Splits a list such as `/^a/, m#b\#c#i` into its individual patterns.
///
/// A pattern starts at `/` or at `m` followed by any delimiter and runs to
/// the next unescaped delimiter plus trailing modifiers. Anything between
/// patterns (commas, spaces) is skipped. An unterminated pattern runs to the
/// end of the text.
///
/// ```rust
/// use depscope::selection::parse_patterns;
///
/// assert_eq!(parse_patterns("/test1/,/test2/"), vec!["/test1/", "/test2/"]);
/// assert_eq!(parse_patterns("m=test1\\=test2=i"), vec!["m=test1\\=test2=i"]);
/// assert!(parse_patterns("").is_empty());
/// ```
pub fn parse_patterns(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut result = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let (separator, body_start) = match chars[start] {
            '/' => ('/', start + 1),
            'm' if start + 1 < chars.len() => (chars[start + 1], start + 2),
            _ => {
                start += 1;
                continue;
            }
        };

        let stop = match find_unescaped(&chars, separator, body_start) {
            Some(end) => {
                let mut stop = end + 1;
                while stop < chars.len() && MODIFIERS.contains(&chars[stop]) {
                    stop += 1;
                }
                stop
            }
            None => chars.len(),
        };

        let candidate: String = chars[start..stop].iter().collect();
        debug!(pattern = %candidate, "parsed pattern");
        result.push(candidate);
        start = stop + 1;
    }

    result
}

fn find_unescaped(chars: &[char], separator: char, from: usize) -> Option<usize> {
    (from..chars.len()).find(|&i| chars[i] == separator && (i == 0 || chars[i - 1] != '\\'))
}

/// Compiles one Perl-style pattern into a [`Regex`].
///
/// Modifiers `i`, `m`, `s` and `x` become inline flags; `g` and `o` have no
/// meaning for a yes/no match and are dropped. An escaped delimiter in the
/// body stands for the delimiter itself.
pub fn compile_pattern(pattern: &str) -> Result<Regex, CriteriaError> {
    let chars: Vec<char> = pattern.chars().collect();
    let (separator, body_start) = match chars.first() {
        Some('m') if chars.len() > 1 => (chars[1], 2),
        Some('/') => ('/', 1),
        _ => ('/', 0),
    };
    let body_end = find_unescaped(&chars, separator, body_start).unwrap_or(chars.len());

    let escaped_separator = format!("\\{}", separator);
    let literal_separator = regex::escape(&separator.to_string());
    let body: String = chars[body_start.min(body_end)..body_end].iter().collect();
    let body = body.replace(&escaped_separator, &literal_separator);

    let flags: String = chars
        .get(body_end + 1..)
        .unwrap_or(&[])
        .iter()
        .copied()
        .filter(|c| matches!(*c, 'i' | 'm' | 's' | 'x'))
        .collect();

    let source = if flags.is_empty() {
        body
    } else {
        format!("(?{}){}", flags, body)
    };

    Regex::new(&source).map_err(|source| CriteriaError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Compiled patterns along with the text they came from.
#[derive(Debug, Clone, Default)]
struct PatternList {
    sources: Vec<String>,
    regexes: Vec<Regex>,
}

impl PatternList {
    fn parse(text: &str) -> Result<Self, CriteriaError> {
        let sources = parse_patterns(text);
        let regexes = sources
            .iter()
            .map(|s| compile_pattern(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sources, regexes })
    }

    fn is_match(&self, name: &str) -> bool {
        self.regexes.iter().any(|re| re.is_match(name))
    }

    fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }
}

#[derive(Debug, Clone)]
struct KindPatterns {
    enabled: bool,
    includes: PatternList,
    excludes: PatternList,
}

impl Default for KindPatterns {
    fn default() -> Self {
        Self {
            enabled: true,
            includes: PatternList::default(),
            excludes: PatternList::default(),
        }
    }
}

/// Criteria driven by global and per-kind include/exclude pattern lists.
///
/// A name of some kind is accepted when it matches a global or per-kind
/// include (or there are no includes at all) and matches neither a global
/// nor a per-kind exclude. [`matches`](SelectionCriteria::matches) also
/// requires the node's kind to be enabled.
///
/// The default value includes everything through the global pattern `//`.
#[derive(Debug, Clone)]
pub struct RegularExpressionSelectionCriteria {
    global_includes: PatternList,
    global_excludes: PatternList,
    packages: KindPatterns,
    classes: KindPatterns,
    features: KindPatterns,
}

impl RegularExpressionSelectionCriteria {
    /// All kinds enabled, global includes `//`.
    pub fn new() -> Self {
        Self {
            global_includes: PatternList::parse("//").unwrap_or_default(),
            global_excludes: PatternList::default(),
            packages: KindPatterns::default(),
            classes: KindPatterns::default(),
            features: KindPatterns::default(),
        }
    }

    /// All kinds enabled, global includes parsed from `includes`.
    pub fn with_global_includes(includes: &str) -> Result<Self, CriteriaError> {
        let mut criteria = Self::new();
        criteria.set_global_includes(includes)?;
        Ok(criteria)
    }

    pub fn set_global_includes(&mut self, patterns: &str) -> Result<(), CriteriaError> {
        self.global_includes = PatternList::parse(patterns)?;
        Ok(())
    }

    pub fn set_global_excludes(&mut self, patterns: &str) -> Result<(), CriteriaError> {
        self.global_excludes = PatternList::parse(patterns)?;
        Ok(())
    }

    /// Replaces the include list that only applies to names of `kind`.
    pub fn set_includes(&mut self, kind: NodeKind, patterns: &str) -> Result<(), CriteriaError> {
        self.kind_mut(kind).includes = PatternList::parse(patterns)?;
        Ok(())
    }

    /// Replaces the exclude list that only applies to names of `kind`.
    pub fn set_excludes(&mut self, kind: NodeKind, patterns: &str) -> Result<(), CriteriaError> {
        self.kind_mut(kind).excludes = PatternList::parse(patterns)?;
        Ok(())
    }

    /// Enables or disables selection of nodes of `kind`.
    pub fn set_matching(&mut self, kind: NodeKind, enabled: bool) {
        self.kind_mut(kind).enabled = enabled;
    }

    pub fn global_includes(&self) -> &[String] {
        &self.global_includes.sources
    }

    pub fn global_excludes(&self) -> &[String] {
        &self.global_excludes.sources
    }

    pub fn includes(&self, kind: NodeKind) -> &[String] {
        &self.kind(kind).includes.sources
    }

    pub fn excludes(&self, kind: NodeKind) -> &[String] {
        &self.kind(kind).excludes.sources
    }

    fn kind(&self, kind: NodeKind) -> &KindPatterns {
        match kind {
            NodeKind::Package => &self.packages,
            NodeKind::Class => &self.classes,
            NodeKind::Feature => &self.features,
        }
    }

    fn kind_mut(&mut self, kind: NodeKind) -> &mut KindPatterns {
        match kind {
            NodeKind::Package => &mut self.packages,
            NodeKind::Class => &mut self.classes,
            NodeKind::Feature => &mut self.features,
        }
    }

    fn accepts(&self, kind: NodeKind, name: &str) -> bool {
        let patterns = self.kind(kind);
        let no_includes = self.global_includes.is_empty() && patterns.includes.is_empty();
        let included = no_includes
            || self.global_includes.is_match(name)
            || patterns.includes.is_match(name);
        let excluded = self.global_excludes.is_match(name) || patterns.excludes.is_match(name);
        included && !excluded
    }
}

impl Default for RegularExpressionSelectionCriteria {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionCriteria for RegularExpressionSelectionCriteria {
    fn is_matching_packages(&self) -> bool {
        self.packages.enabled
    }

    fn is_matching_classes(&self) -> bool {
        self.classes.enabled
    }

    fn is_matching_features(&self) -> bool {
        self.features.enabled
    }

    fn matches_package_name(&self, name: &str) -> bool {
        self.accepts(NodeKind::Package, name)
    }

    fn matches_class_name(&self, name: &str) -> bool {
        self.accepts(NodeKind::Class, name)
    }

    fn matches_feature_name(&self, name: &str) -> bool {
        self.accepts(NodeKind::Feature, name)
    }
}
