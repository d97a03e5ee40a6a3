//! Rejects a broken embedded table or settings file before the crate compiles.

fn main() {
    check_embedded(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
        &["romaji", "matching"],
    );
    check_embedded(
        "src/romaji/default_romaji.toml",
        include_str!("src/romaji/default_romaji.toml"),
        &["mappings", "alternates"],
    );
}

fn check_embedded(path: &str, content: &str, sections: &[&str]) {
    println!("cargo:rerun-if-changed={path}");
    let value = match content.parse::<toml::Table>() {
        Ok(v) => v,
        Err(e) => panic!("{path} contains invalid TOML: {e}"),
    };
    for section in sections {
        if !value.get(*section).is_some_and(toml::Value::is_table) {
            panic!("{path} is missing the [{section}] table");
        }
    }
}
