//! Author identity resolution.

use std::collections::HashMap;

use tracing::warn;

use crate::types::AuthorIdentity;

/// A resolved identity plus the number of non-merge commits it made in the
/// window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAuthor {
    pub identity: AuthorIdentity,
    pub commits: usize,
}

/// Collapse raw `(name, email)` commit records into distinct identities.
///
/// Records are grouped by exact email match. The first display name seen in
/// history order becomes the canonical name for that identity, trimmed of
/// surrounding whitespace. Records without an email are dropped with a
/// warning. The returned list preserves first-seen order.
pub fn resolve_identities(records: &[(String, String)]) -> Vec<ResolvedAuthor> {
    let mut order: Vec<String> = Vec::new();
    let mut by_email: HashMap<String, ResolvedAuthor> = HashMap::new();

    for (name, email) in records {
        let email = email.trim();
        if email.is_empty() {
            warn!(name = %name, "dropping commit record without an author email");
            continue;
        }
        if let Some(author) = by_email.get_mut(email) {
            author.commits += 1;
        } else {
            order.push(email.to_string());
            by_email.insert(
                email.to_string(),
                ResolvedAuthor {
                    identity: AuthorIdentity {
                        name: name.trim().to_string(),
                        email: email.to_string(),
                    },
                    commits: 1,
                },
            );
        }
    }

    order
        .into_iter()
        .filter_map(|email| by_email.remove(&email))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(name: &str, email: &str) -> (String, String) {
        (name.to_string(), email.to_string())
    }

    #[test]
    fn same_email_collapses_to_one_identity() {
        let records = vec![
            record("Alice", "a@x.com"),
            record("ALICE", "a@x.com"),
            record("  alice  ", "a@x.com"),
        ];

        let authors = resolve_identities(&records);
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].identity.name, "Alice");
        assert_eq!(authors[0].identity.email, "a@x.com");
        assert_eq!(authors[0].commits, 3);
    }

    #[test]
    fn canonical_name_is_first_seen_and_trimmed() {
        let records = vec![
            record("  Bob Smith ", "b@x.com"),
            record("Bobby", "b@x.com"),
        ];

        let authors = resolve_identities(&records);
        assert_eq!(authors[0].identity.name, "Bob Smith");
    }

    #[test]
    fn records_without_email_are_dropped() {
        let records = vec![
            record("Ghost", ""),
            record("Alice", "a@x.com"),
            record("Ghost", "   "),
        ];

        let authors = resolve_identities(&records);
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].identity.email, "a@x.com");
    }

    #[test]
    fn emails_are_compared_case_sensitively() {
        let records = vec![record("Alice", "a@x.com"), record("Alice", "A@x.com")];

        let authors = resolve_identities(&records);
        assert_eq!(authors.len(), 2);
    }

    #[test]
    fn first_seen_order_is_preserved() {
        let records = vec![
            record("Carol", "c@x.com"),
            record("Alice", "a@x.com"),
            record("Carol", "c@x.com"),
            record("Bob", "b@x.com"),
        ];

        let authors = resolve_identities(&records);
        let emails: Vec<&str> = authors.iter().map(|a| a.identity.email.as_str()).collect();
        assert_eq!(emails, vec!["c@x.com", "a@x.com", "b@x.com"]);
        assert_eq!(authors[0].commits, 2);
    }

    #[test]
    fn empty_input_yields_no_identities() {
        assert_eq!(resolve_identities(&[]), Vec::new());
    }
}
