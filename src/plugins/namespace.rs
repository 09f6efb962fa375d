pub const NAMESPACE_SEP: char = ':';

pub fn qualify(namespace: &str, key: &str) -> String {
    format!("{}{}{}", namespace, NAMESPACE_SEP, key)
}

/// Split `namespace:key`. The namespace part may contain dots but no `:`.
pub fn parse(qualified: &str) -> Option<(&str, &str)> {
    qualified.split_once(NAMESPACE_SEP)
}

pub fn is_qualified(name: &str) -> bool {
    name.contains(NAMESPACE_SEP)
}

pub fn namespace_of(qualified: &str) -> Option<&str> {
    parse(qualified).map(|(ns, _)| ns)
}

pub fn key_of(qualified: &str) -> Option<&str> {
    parse(qualified).map(|(_, key)| key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("engine", "renderer"), "engine:renderer");
        assert_eq!(qualify("editor.panels", "inspector"), "editor.panels:inspector");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse("engine:renderer"), Some(("engine", "renderer")));
        assert_eq!(parse("renderer"), None);
        assert_eq!(parse("a:b:c"), Some(("a", "b:c")));
    }

    #[test]
    fn test_is_qualified() {
        assert!(is_qualified("engine:renderer"));
        assert!(!is_qualified("engine.renderer"));
    }

    #[test]
    fn test_parts() {
        assert_eq!(namespace_of("editor.panels:inspector"), Some("editor.panels"));
        assert_eq!(key_of("editor.panels:inspector"), Some("inspector"));
        assert_eq!(namespace_of("plain"), None);
        assert_eq!(key_of("plain"), None);
    }
}
