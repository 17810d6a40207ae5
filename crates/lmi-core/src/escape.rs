//! MI command-language quoting and template substitution

/// Placeholder replaced by the escaped working directory
pub const CWD_PLACEHOLDER: &str = "$cwd";

/// Placeholder replaced by the raw target identifier
pub const TARGET_PLACEHOLDER: &str = "$target";

/// Escape a string for use inside a quoted MI command argument.
///
/// Backslashes are doubled first, then double quotes are backslash-escaped.
pub fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Fill the `$cwd` and `$target` slots of a pre-run command template.
///
/// Only the first occurrence of each placeholder is replaced. `cwd` is
/// escaped; `target` is inserted verbatim since it may be a composite
/// connection string such as `host:port`.
pub fn substitute(template: &str, cwd: &str, target: &str) -> String {
    template
        .replacen(CWD_PLACEHOLDER, &escape(cwd), 1)
        .replacen(TARGET_PLACEHOLDER, target, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes_and_backslashes() {
        assert_eq!(escape(r#"print "hi""#), r#"print \"hi\""#);
        assert_eq!(escape(r"C:\src"), r"C:\\src");
        assert_eq!(escape(r#"a\"b"#), r#"a\\\"b"#);
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape("break main"), "break main");
    }

    #[test]
    fn test_substitute_escapes_cwd_only() {
        let cmd = substitute(r#"environment-directory "$cwd""#, r"C:\proj", "x");
        assert_eq!(cmd, r#"environment-directory "C:\\proj""#);

        let cmd = substitute("target-select remote $target", "/p", r#"host"1:1234"#);
        assert_eq!(cmd, r#"target-select remote host"1:1234"#);
    }

    #[test]
    fn test_substitute_first_occurrence_only() {
        assert_eq!(substitute("$cwd $cwd", "/a", "t"), "/a $cwd");
    }

    #[test]
    fn test_substitute_without_placeholders() {
        assert_eq!(substitute("gdb-set target-async on", "/a", "t"), "gdb-set target-async on");
    }
}
