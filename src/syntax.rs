//! Mail address syntax helpers
//!
//! `mailparse` acts as the syntax oracle: it decides whether a string is a
//! single mailbox and splits off its display name. Nothing it returns is
//! retained beyond the call.

use mailparse::MailAddr;

/// Byte offset of the last `@` that is not inside a quoted string.
///
/// Scans left to right, toggling the quoted state on every unescaped `"`.
/// A backslash escapes exactly the character after it.
pub fn find_separator(input: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;
    let mut separator = None;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            '@' if !in_quotes => separator = Some(i),
            _ => {}
        }
    }

    separator
}

/// Whether `local` is one well-formed quoted string, such as `"john@doe"`.
///
/// Inside the quotes every `"` and `\` must be escaped and control
/// characters are not allowed.
pub fn is_quoted_local_part(local: &str) -> bool {
    let Some(inner) = local
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };

    let mut escaped = false;
    for c in inner.chars() {
        if c.is_control() {
            return false;
        }
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => return false,
            _ => {}
        }
    }

    !escaped
}

/// Parsed display name and address of a single mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMailbox {
    pub display_name: Option<String>,
    pub address: String,
}

/// Parse `input` as exactly one mailbox, bare or in `Name <addr>` form.
///
/// Groups, lists and anything `mailparse` rejects yield `None`.
pub fn parse_mailbox(input: &str) -> Option<ParsedMailbox> {
    let list = match mailparse::addrparse(input) {
        Ok(list) => list,
        Err(e) => {
            tracing::debug!("Mail address syntax rejected: {e}");
            return None;
        }
    };

    if list.len() != 1 {
        return None;
    }

    match list.first()? {
        MailAddr::Single(info) => Some(ParsedMailbox {
            display_name: info
                .display_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            address: info.addr.trim().to_string(),
        }),
        MailAddr::Group(_) => None,
    }
}

/// Whether `address` has exactly one `@` with text on both sides and no
/// whitespace.
pub fn is_address_shape(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = address.split('@');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    )
}

/// Wrap a display name in a quoted string, escaping `\` and `"`.
pub fn quote_display_name(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for c in name.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Render `"Name" <address>`, or the bare address without a name.
pub fn render_name_addr(display_name: Option<&str>, address: &str) -> String {
    match display_name {
        Some(name) => format!("{} <{address}>", quote_display_name(name)),
        None => address.to_string(),
    }
}
