#[cfg(test)]
pub mod test {
    use std::collections::HashMap;

    use crate::Configurable;

    #[derive(Configurable, Debug, Default, PartialEq)]
    pub struct TestConfig {
        #[configurator(default = "foo", file = "foo", env = "ENV_FOO")]
        pub foo: String,

        pub foo_empty: String,

        #[configurator(default = "1234", file = "bar", env = "ENV_BAR")]
        pub bar: i64,

        pub bar_empty: i64,

        #[configurator(default = "true", file = "baz", env = "ENV_BAZ")]
        pub baz: bool,

        pub baz_empty: bool,

        #[configurator(default = "doesnt-matter", file = "doesnt-matter", env = "DOESNT_MATTER")]
        pub unsupported: HashMap<String, String>,

        #[configurator(nested, file = "test")]
        pub test: TestNested,
    }

    #[derive(Configurable, Debug, Default, PartialEq)]
    pub struct TestNested {
        #[configurator(default = "test-foo", file = "test-foo", env = "ENV_TEST_FOO")]
        pub foo: String,
    }

    /// Sets `foo` and `test.foo`, leaves everything else to other layers.
    pub const VALID_CONFIG: &str = r#"{
    "foo": "abcd",
    "test": {
        "test-foo": "bcde"
    }
}
"#;

    pub const INVALID_CONFIG: &str = r#"{"foo": "abcd", "test": {"#;

    pub fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_config_starts_zeroed() {
        let config = TestConfig::default();
        assert_eq!(config.foo, "");
        assert_eq!(config.bar, 0);
        assert!(!config.baz);
        assert_eq!(config.test.foo, "");
    }
}
