//! Comment grammar.
//!
//! Agent comments are free text. Two conventions are accepted:
//!
//! | Shape                    | user    | host          | alias        |
//! |--------------------------|---------|---------------|--------------|
//! | `alice@example.com`      | `alice` | `example.com` | none         |
//! | `Work Box <bob@10.0.0.5>`| `bob`   | `10.0.0.5`    | `Work_Box`   |
//!
//! Everything else is rejected. A rejection is not an error: the key is just
//! left out of the snapshot, because a wrong guess would route an SSH
//! connection to the wrong identity.

/// Characters that may never appear inside a `user@host` pair.
const WHITESPACE: [char; 6] = [' ', '\t', '\n', '\r', '\u{0B}', '\u{0C}'];

/// Minimum length, in characters, of the trimmed name before `<`.
const MIN_ALIAS_LEN: usize = 2;

/// Structured fields recovered from a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedComment {
    pub user: String,
    pub host: String,
    /// Friendly `Host` name, spaces replaced by underscores.
    pub alias: Option<String>,
}

/// Parse an agent comment, returning `None` when it does not fit the grammar.
pub fn parse_comment(comment: &str) -> Option<ParsedComment> {
    if !comment.contains(['<', '>']) {
        let (user, host) = split_user_host(comment.trim())?;
        return Some(ParsedComment {
            user,
            host,
            alias: None,
        });
    }

    if comment.matches('<').count() != 1 || comment.matches('>').count() != 1 {
        return None;
    }
    let open = comment.find('<')?;
    let close = comment.find('>')?;
    if open > close {
        return None;
    }

    // Text after `>` is ignored.
    let name = comment[..open].trim();
    if name.chars().count() < MIN_ALIAS_LEN {
        return None;
    }

    let (user, host) = split_user_host(&comment[open + 1..close])?;
    Some(ParsedComment {
        user,
        host,
        alias: Some(name.replace(' ', "_")),
    })
}

fn split_user_host(pair: &str) -> Option<(String, String)> {
    if pair.matches('@').count() != 1 || pair.contains(WHITESPACE) {
        return None;
    }
    let (user, host) = pair.split_once('@')?;
    if user.is_empty() || host.is_empty() {
        return None;
    }
    Some((user.to_owned(), host.to_owned()))
}
