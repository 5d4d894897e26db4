use orgjump_protocol::CategoryKind;

/// What an Enter at the root prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RootCommand {
    Category(CategoryKind),
    Search(String),
    Empty,
}

/// Matchers are checked in order; the first prefix hit wins.
const CATEGORY_MATCHERS: [(&str, CategoryKind); 4] = [
    ("flow", CategoryKind::Flow),
    ("user", CategoryKind::User),
    ("profile", CategoryKind::Profile),
    ("obj", CategoryKind::Object),
];

pub(crate) fn parse_root_command(text: &str) -> RootCommand {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return RootCommand::Empty;
    }
    let normalized = trimmed.to_lowercase();
    CATEGORY_MATCHERS
        .iter()
        .find(|(prefix, _)| normalized.starts_with(prefix))
        .map_or_else(
            || RootCommand::Search(trimmed.to_string()),
            |(_, kind)| RootCommand::Category(*kind),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn category_words_select_kind() {
        for (text, kind) in [
            ("flow", CategoryKind::Flow),
            ("Flows", CategoryKind::Flow),
            ("  USERS ", CategoryKind::User),
            ("user", CategoryKind::User),
            ("profile", CategoryKind::Profile),
            ("Profiles", CategoryKind::Profile),
            ("obj", CategoryKind::Object),
            ("Object", CategoryKind::Object),
            ("objects", CategoryKind::Object),
        ] {
            assert_eq!(parse_root_command(text), RootCommand::Category(kind), "{text}");
        }
    }

    #[test]
    fn other_text_is_a_search_with_original_case() {
        assert_eq!(
            parse_root_command("  Sharing Settings "),
            RootCommand::Search("Sharing Settings".to_string())
        );
        assert_eq!(
            parse_root_command("apex"),
            RootCommand::Search("apex".to_string())
        );
    }

    #[test]
    fn blank_is_empty() {
        assert_eq!(parse_root_command(""), RootCommand::Empty);
        assert_eq!(parse_root_command(" \t "), RootCommand::Empty);
    }

    #[test]
    fn matcher_prefixes_are_disjoint() {
        for (i, (a, _)) in CATEGORY_MATCHERS.iter().enumerate() {
            for (b, _) in CATEGORY_MATCHERS.iter().skip(i + 1) {
                assert!(!a.starts_with(b) && !b.starts_with(a), "{a} / {b}");
            }
        }
    }
}
