//! Field-name constants shared by the normalizer, builder, and query layer.

/// Discriminant field carrying the record kind of a submission row.
///
/// This is the snake_case form of the form question "I want to register a
/// new:" — the trailing colon survives the heading conversion.
pub const RECORD_KIND: &str = "i_want_to_register_a_new:";

/// Form fields with checkbox type; their values split into lists of strings.
pub const LIST_FIELDS: &[&str] = &["languages", "third_parties", "annotation_types", "actions"];

/// Attributes shown in search results.
pub const DISPLAY_ATTRIBUTES: &[&str] = &["corpus_path", "corpus_name", "domain"];

pub fn is_list_field(key: &str) -> bool {
    LIST_FIELDS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_fields_recognized() {
        assert!(is_list_field("languages"));
        assert!(is_list_field("actions"));
        assert!(!is_list_field("domain"));
    }
}
