//! Known line relations, keyed by display name

/// A known line: display name plus its OSM relation id.
#[derive(Debug, Clone, Copy)]
pub struct KnownLine {
    pub name: &'static str,
    pub relation_id: i64,
}

/// The Hangzhou metro network plus the intercity and Shaoxing lines that
/// interline with it.
pub const KNOWN_LINES: &[KnownLine] = &[
    KnownLine { name: "line 1", relation_id: 4627561 },
    KnownLine { name: "line 2", relation_id: 5454457 },
    KnownLine { name: "line 3a", relation_id: 13538220 },
    KnownLine { name: "line 3b", relation_id: 14280625 },
    KnownLine { name: "line 4", relation_id: 9641050 },
    KnownLine { name: "line 5", relation_id: 10386965 },
    KnownLine { name: "line 6a", relation_id: 13077286 },
    KnownLine { name: "line 6b", relation_id: 13077349 },
    KnownLine { name: "line 7", relation_id: 13061278 },
    KnownLine { name: "line 8", relation_id: 13042426 },
    KnownLine { name: "line 9", relation_id: 13060896 },
    KnownLine { name: "line 10", relation_id: 13535687 },
    KnownLine { name: "line 16", relation_id: 11076297 },
    KnownLine { name: "line 19", relation_id: 14613131 },
    KnownLine { name: "hanghai intercity", relation_id: 13078549 },
    KnownLine { name: "shaoxing line 1a", relation_id: 12920989 },
    KnownLine { name: "shaoxing line 1b", relation_id: 17438392 },
];

pub fn relation_id_for(name: &str) -> Option<i64> {
    KNOWN_LINES
        .iter()
        .find(|line| line.name == name)
        .map(|line| line.relation_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_and_relation_ids_are_unique() {
        let names: HashSet<_> = KNOWN_LINES.iter().map(|l| l.name).collect();
        let ids: HashSet<_> = KNOWN_LINES.iter().map(|l| l.relation_id).collect();

        assert_eq!(names.len(), KNOWN_LINES.len());
        assert_eq!(ids.len(), KNOWN_LINES.len());
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(relation_id_for("line 1"), Some(4627561));
        assert_eq!(relation_id_for("line 99"), None);
    }
}
