//! Splitting qualified names into container and simple parts.

/// Byte offset of the last `.` that is not nested inside parentheses.
fn last_qualifying_dot(name: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut last = None;
    for (pos, ch) in name.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => last = Some(pos),
            _ => {}
        }
    }
    last
}

/// Splits `name` into `(container, simple)` at the last dot outside of
/// parentheses. Names without such a dot belong to the empty container.
///
/// ```text
/// "a.A"        -> ("a", "A")
/// "a.A.a(b.B)" -> ("a.A", "a(b.B)")
/// "A"          -> ("", "A")
/// ```
pub(crate) fn split_qualified(name: &str) -> (&str, &str) {
    match last_qualifying_dot(name) {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => ("", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_class_name() {
        assert_eq!(split_qualified("a.A"), ("a", "A"));
        assert_eq!(split_qualified("java.lang.Object"), ("java.lang", "Object"));
    }

    #[test]
    fn test_split_default_package() {
        assert_eq!(split_qualified("A"), ("", "A"));
        assert_eq!(split_qualified(""), ("", ""));
    }

    #[test]
    fn test_split_feature_with_signature() {
        assert_eq!(split_qualified("a.A.a(b.B)"), ("a.A", "a(b.B)"));
        assert_eq!(
            split_qualified("java.util.Collections.singleton(java.lang.Object)"),
            ("java.util.Collections", "singleton(java.lang.Object)")
        );
        assert_eq!(split_qualified("a.A.a(b.B, c.C)"), ("a.A", "a(b.B, c.C)"));
    }

    #[test]
    fn test_split_constructor() {
        assert_eq!(split_qualified("a.A.A()"), ("a.A", "A()"));
    }

    #[test]
    fn test_split_nested_parentheses() {
        assert_eq!(split_qualified("a.A.f(g(x.Y).z)"), ("a.A", "f(g(x.Y).z)"));
    }
}
