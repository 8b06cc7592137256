//! Property tests for server target matching.

use proptest::prelude::*;
use serde_json::json;

use deployto::ServerRecord;

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9-]{0,10}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A record always matches its own name, whatever its aliases.
    #[test]
    fn property_name_always_matches(
        server_name in name(),
        aliases in proptest::option::of(proptest::collection::vec(name(), 0..5)),
    ) {
        let mut server = ServerRecord::new(server_name.clone());
        server.aliases = aliases;

        prop_assert!(server.is_right_server(&server_name));
    }

    /// PROPERTY: Every listed alias matches.
    #[test]
    fn property_every_alias_matches(
        server_name in name(),
        aliases in proptest::collection::vec(name(), 1..5),
    ) {
        let server = ServerRecord::new(server_name).with_aliases(aliases.clone());

        for alias in &aliases {
            prop_assert!(server.is_right_server(alias));
        }
    }

    /// PROPERTY: Without a usable alias list only the exact name matches.
    #[test]
    fn property_non_list_aliases_never_match(
        server_name in name(),
        target in name(),
        alias_scalar in name(),
    ) {
        prop_assume!(server_name != target);

        for aliases in [json!(null), json!(alias_scalar.clone()), json!({ "a": target.clone() }), json!(7)] {
            let server: ServerRecord = serde_json::from_value(json!({
                "name": server_name.clone(),
                "aliases": aliases,
            }))
            .unwrap();

            prop_assert!(!server.is_right_server(&target));
        }
    }
}
