#[cfg(feature = "serde")]
mod fixtures;

#[cfg(feature = "serde")]
mod serde_tests {
    use super::fixtures::params;
    use mustype::{
        DeclarationOptions, MustypeError, ParseError, Template, TemplateParams, TypeConflict,
        apply, parse,
    };

    #[test]
    fn test_params_from_json() {
        let params: TemplateParams = serde_json::from_str(
            r#"{"user": {"name": "Ann", "age": 41}, "tags": ["a", "b"], "admin": false, "note": null}"#,
        )
        .unwrap();

        let mut user = TemplateParams::map();
        user.insert("name", "Ann").insert("age", 41);
        let mut expected = TemplateParams::map();
        expected
            .insert("user", user)
            .insert("tags", vec!["a", "b"])
            .insert("admin", false)
            .insert("note", TemplateParams::Null);
        assert_eq!(params, expected);

        assert_eq!(
            apply(
                "{{#user}}{{name}} ({{age}}){{/user}} {{#tags}}{{.}}{{/tags}}{{^admin}}!{{/admin}}",
                &params
            ),
            "Ann (41) ab!"
        );
    }

    #[test]
    fn test_fixture_conversion_matches_deserialize() {
        let value = serde_json::json!({
            "order": { "id": 7, "paid": true, "note": null },
            "lines": [{ "sku": "A1", "price": 2.5 }, { "sku": "B2", "price": -0.0 }],
            "tags": []
        });
        let deserialized: TemplateParams = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(params(value), deserialized);
    }

    #[test]
    fn test_params_serialize_untagged() {
        let mut params = TemplateParams::map();
        params.insert("n", 1.5).insert("s", "x");
        let serialized = serde_json::to_string(&params).unwrap();
        assert_eq!(serialized, r#"{"n":1.5,"s":"x"}"#);
    }

    #[test]
    fn test_parse_error_serialization() {
        let err: ParseError = parse("{{#open}}").unwrap_err();
        let serialized = serde_json::to_string(&err).unwrap();
        let deserialized: ParseError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, err);
    }

    #[test]
    fn test_type_conflict_serialization() {
        let err = parse("{{a: number}}{{a: string}}")
            .unwrap()
            .type_tree()
            .unwrap_err();
        let serialized = serde_json::to_string(&err).unwrap();
        let deserialized: TypeConflict = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, err);

        let wrapped = MustypeError::from(err);
        let serialized = serde_json::to_string(&wrapped).unwrap();
        let deserialized: MustypeError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, wrapped);
    }

    #[test]
    fn test_declaration_options_from_json() {
        let options: DeclarationOptions =
            serde_json::from_str(r#"{"type_name": "Props", "indent": 4}"#).unwrap();
        assert_eq!(
            options,
            DeclarationOptions {
                type_name: "Props".to_string(),
                indent: 4,
            }
        );
    }

    #[test]
    fn test_template_serialization() {
        let template = Template::parse("Hi {{name}}").unwrap();
        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["source"], "Hi {{name}}");
        assert_eq!(value["nodes"].as_array().map(Vec::len), Some(2));
    }
}
