//! Property tests for template population.

use proptest::prelude::*;

use deployto::{Template, TemplateData};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Text without `[[` is returned unchanged.
    #[test]
    fn property_plain_text_is_untouched(text in "[^\\[]{0,80}", value in ".{0,20}") {
        let mut data = TemplateData::new();
        data.insert("key".to_string(), value);

        prop_assert_eq!(Template::from_string(text.clone()).populate(&data), text);
    }

    /// PROPERTY: Every occurrence of a known placeholder is replaced.
    #[test]
    fn property_all_occurrences_replaced(
        key in "[a-z_]{1,10}",
        value in "[a-z0-9 ]{0,10}",
        count in 1usize..5,
    ) {
        let token = format!("[[{}]]", key.to_uppercase());
        let template = Template::from_string(vec![token.as_str(); count].join("|"));
        let mut data = TemplateData::new();
        data.insert(key, value.clone());

        prop_assert_eq!(template.populate(&data), vec![value.as_str(); count].join("|"));
    }
}
