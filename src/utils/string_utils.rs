/// Escapes special characters in a string for use in queries
pub fn escape_for_query(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\"', "\\\"")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Double-quoted, escaped string literal
pub fn quote_string(s: &str) -> String {
    format!("\"{}\"", escape_for_query(s))
}

/// `CALL name("arg", ...)` with every argument quoted
pub fn procedure_call<S: AsRef<str>>(name: &str, args: &[S]) -> String {
    let args: Vec<String> = args.iter().map(|a| quote_string(a.as_ref())).collect();
    format!("CALL {}({})", name, args.join(","))
}
