//! Classification of the single-product lookup term.

use uuid::Uuid;

/// How a `GET /products/{term}` term is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTerm {
    /// Exact primary-key match
    ById(Uuid),
    /// Case-insensitive title match or lowercase slug match
    ByText(String),
}

/// Only the canonical hyphenated form (`8-4-4-4-12`) counts as an id, so a
/// 32-character hex slug is still looked up as text.
///
/// ```
/// use domain_products::lookup::{LookupTerm, classify};
///
/// assert!(matches!(classify("0192f5a4-8c1e-7b52-9d3a-1f2e3d4c5b6a"), LookupTerm::ById(_)));
/// assert_eq!(classify("chair"), LookupTerm::ByText("chair".to_string()));
/// ```
pub fn classify(term: &str) -> LookupTerm {
    if term.len() == 36 {
        if let Ok(id) = Uuid::parse_str(term) {
            return LookupTerm::ById(id);
        }
    }
    LookupTerm::ByText(term.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_hyphenated_uuid() {
        let id = Uuid::now_v7();
        assert_eq!(classify(&id.to_string()), LookupTerm::ById(id));
        assert_eq!(
            classify(&id.to_string().to_uppercase()),
            LookupTerm::ById(id)
        );
    }

    #[test]
    fn test_classify_other_uuid_forms_as_text() {
        let id = Uuid::now_v7();
        let simple = id.simple().to_string();
        assert_eq!(classify(&simple), LookupTerm::ByText(simple.clone()));

        let braced = id.braced().to_string();
        assert_eq!(classify(&braced), LookupTerm::ByText(braced.clone()));
    }

    #[test]
    fn test_classify_text_terms() {
        assert_eq!(
            classify("Men's Chill Crew Neck"),
            LookupTerm::ByText("Men's Chill Crew Neck".to_string())
        );
        // 36 characters, but not a UUID
        let almost = "zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz";
        assert_eq!(classify(almost), LookupTerm::ByText(almost.to_string()));
        assert_eq!(classify(""), LookupTerm::ByText(String::new()));
    }
}
