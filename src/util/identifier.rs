//! SQL identifier quoting

use crate::catalog::Table;

/// Words that cannot be used as bare identifiers in common SQL dialects.
pub const RESERVED_WORDS: &[&str] = &[
    "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CAST", "CHECK", "COLUMN",
    "CONSTRAINT", "CREATE", "CROSS", "CURRENT", "CURRENT_DATE", "CURRENT_TIME",
    "CURRENT_TIMESTAMP", "CURRENT_USER", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE",
    "END", "EXCEPT", "EXISTS", "FALSE", "FETCH", "FOR", "FOREIGN", "FROM", "FULL", "GRANT",
    "GROUP", "HAVING", "IN", "INNER", "INSERT", "INTERSECT", "INTO", "IS", "JOIN", "KEY", "LEFT",
    "LIKE", "LIMIT", "NATURAL", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER", "OUTER",
    "PRIMARY", "REFERENCES", "RIGHT", "ROW", "SELECT", "SESSION_USER", "SET", "SOME", "TABLE",
    "THEN", "TO", "TRUE", "UNION", "UNIQUE", "UPDATE", "USER", "USING", "VALUES", "WHEN",
    "WHERE", "WITH",
];

pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(name))
}

/// True when `name` can only be written as a quoted identifier: it is
/// empty, starts with a digit, contains anything besides letters, digits
/// and `_`, or is a reserved word.
pub fn needs_quoting(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return true;
    };
    first.is_ascii_digit()
        || !name.chars().all(|c| c.is_alphanumeric() || c == '_')
        || is_reserved_word(name)
}

/// Wrap in double quotes when needed, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    if needs_quoting(name) {
        format!("\"{}\"", name.replace('"', "\"\""))
    } else {
        name.to_string()
    }
}

/// `schema.table`, each part quoted as needed. Tables without a schema
/// are just `table`.
pub fn quoted_table_name(table: &Table) -> String {
    if table.schema.is_empty() {
        return quote_identifier(&table.name);
    }
    format!(
        "{}.{}",
        quote_identifier(&table.schema),
        quote_identifier(&table.name)
    )
}
