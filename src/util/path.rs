//! Path helpers for comparing file references

/// Normalize a path for equality checks: unify separators and lower-case.
///
/// `C:\Src\A.ts` and `c:/src/a.ts` compare equal after normalization.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_unified() {
        assert_eq!(normalize_path(r"src\model\doc.rs"), "src/model/doc.rs");
    }

    #[test]
    fn test_case_folded() {
        assert_eq!(normalize_path("A.TS"), normalize_path("a.ts"));
    }

    #[test]
    fn test_mixed() {
        assert_eq!(normalize_path(r"C:\Src/Main.RS"), "c:/src/main.rs");
    }
}
