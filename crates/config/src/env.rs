// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `$VAR` / `${VAR}` expansion against the process environment, applied to
//! prep and daemon command strings at parse time.

/// Expand `$NAME` and `${NAME}` references in `input` using `lookup`.
/// An unset variable expands to the empty string. `$$` is not special; a
/// lone trailing `$` is passed through verbatim.
pub fn expand(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some((_, '{')) => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if closed && is_identifier(&name) {
                    out.push_str(&lookup(&name).unwrap_or_default());
                } else {
                    out.push_str("${");
                    out.push_str(&name);
                    if closed {
                        out.push('}');
                    }
                }
            }
            Some((_, c)) if is_identifier_start(c) => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if is_identifier_char(c) {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(&lookup(&name).unwrap_or_default());
            }
            _ => out.push('$'),
        }
    }
    out
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => chars.all(is_identifier_char),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::expand;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + '_ {
        move |name| vars.iter().find(|(k, _)| *k == name).map(|(_, v)| v.to_string())
    }

    #[test]
    fn expands_bare_and_braced_forms() {
        let vars = [("HOME", "/home/x"), ("FOO", "bar")];
        assert_eq!(expand("$HOME/$FOO", lookup(&vars)), "/home/x/bar");
        assert_eq!(expand("${HOME}_suffix", lookup(&vars)), "/home/x_suffix");
    }

    #[test]
    fn unset_variable_expands_to_empty() {
        assert_eq!(expand("x$MISSINGy", lookup(&[])), "xy");
    }

    #[test]
    fn trailing_dollar_passes_through() {
        assert_eq!(expand("price: $", lookup(&[])), "price: $");
    }

    #[test]
    fn unclosed_brace_is_left_verbatim() {
        assert_eq!(expand("${HOME", lookup(&[("HOME", "/x")])), "${HOME");
    }

    #[test]
    fn dollar_before_non_identifier_is_literal() {
        assert_eq!(expand("cost: $5", lookup(&[])), "cost: $5");
    }
}
