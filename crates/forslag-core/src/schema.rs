/// Arrow schema definitions for the normalized proposal table.
pub mod normalized {
    use arrow::datatypes::{DataType, Field, Schema};

    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const SCHOOL: &str = "school";
    pub const CHANGE_TYPE: &str = "change_type";
    pub const LOCATION: &str = "location";
    pub const CHANGE_TEXT: &str = "change_text";
    pub const STATUS_CODE: &str = "status_code";
    pub const VOTES_FOR: &str = "votes_for";
    pub const VOTES_AGAINST: &str = "votes_against";
    pub const VOTES_ABSTAIN: &str = "votes_abstain";
    pub const ALTERNATIVE_LABEL: &str = "alternative_label";

    /// Column order of the persisted table.
    pub const COLUMNS: [&str; 11] = [
        ID,
        NAME,
        SCHOOL,
        CHANGE_TYPE,
        LOCATION,
        CHANGE_TEXT,
        STATUS_CODE,
        VOTES_FOR,
        VOTES_AGAINST,
        VOTES_ABSTAIN,
        ALTERNATIVE_LABEL,
    ];

    /// Schema for one normalized proposal per row.
    pub fn proposal_schema() -> Schema {
        Schema::new(vec![
            Field::new(ID, DataType::Utf8, false),
            Field::new(NAME, DataType::Utf8, true),
            Field::new(SCHOOL, DataType::Utf8, true),
            Field::new(CHANGE_TYPE, DataType::Utf8, true),
            Field::new(LOCATION, DataType::Utf8, true),
            Field::new(CHANGE_TEXT, DataType::Utf8, true),
            Field::new(STATUS_CODE, DataType::Utf8, false),
            Field::new(VOTES_FOR, DataType::UInt32, false),
            Field::new(VOTES_AGAINST, DataType::UInt32, false),
            Field::new(VOTES_ABSTAIN, DataType::UInt32, false),
            Field::new(ALTERNATIVE_LABEL, DataType::Utf8, true),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::normalized;

    #[test]
    fn proposal_schema_has_expected_fields() {
        let schema = normalized::proposal_schema();
        assert_eq!(schema.fields().len(), 11);
        assert!(schema.field_with_name("status_code").is_ok());
        assert!(schema.field_with_name("alternative_label").is_ok());
    }

    #[test]
    fn column_order_matches_constants() {
        let schema = normalized::proposal_schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, normalized::COLUMNS);
    }
}
