//! Naming utilities for Python code generation.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `.User` | [`split_fullname`] | `(None, "User")` |
//! | `com.acme.User` | [`class_ref`] | `com.acme.UserClass` |
//! | `class` | [`python_safe_name`] | `class_` |
//! | `com.acme` | [`namespace_segments`] | `["com", "acme"]` |

use avrobind_core::clean_fullname;

/// Reserved words of Python 3 (`keyword.kwlist`).
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Receiver name of every generated method.
const RECEIVER: &str = "self";

/// Split a fullname into namespace and short name.
///
/// # Examples
///
/// ```
/// use avrobind_codegen::naming::split_fullname;
///
/// assert_eq!(split_fullname("com.acme.User"), (Some("com.acme"), "User"));
/// assert_eq!(split_fullname(".User"), (None, "User"));
/// ```
pub fn split_fullname(fullname: &str) -> (Option<&str>, &str) {
    match clean_fullname(fullname).rsplit_once('.') {
        Some((namespace, name)) if !namespace.is_empty() => (Some(namespace), name),
        Some((_, name)) => (None, name),
        None => (None, clean_fullname(fullname)),
    }
}

/// Split a dotted namespace into its segments. The null namespace has none.
pub fn namespace_segments(namespace: Option<&str>) -> Vec<String> {
    namespace
        .map(clean_fullname)
        .filter(|ns| !ns.is_empty())
        .map(|ns| ns.split('.').map(str::to_string).collect())
        .unwrap_or_default()
}

/// Name of the generated class for a short type name.
pub fn class_name(short_name: &str) -> String {
    format!("{short_name}Class")
}

/// Attribute path of the generated class, relative to the generated module.
///
/// # Examples
///
/// ```
/// use avrobind_codegen::naming::class_ref;
///
/// assert_eq!(class_ref("com.acme.User"), "com.acme.UserClass");
/// assert_eq!(class_ref("User"), "UserClass");
/// ```
pub fn class_ref(fullname: &str) -> String {
    match split_fullname(fullname) {
        (Some(namespace), name) => format!("{namespace}.{}", class_name(name)),
        (None, name) => class_name(name),
    }
}

/// Make an identifier safe to use as a Python attribute.
///
/// Keywords and the method receiver `self` get a trailing underscore;
/// everything else is unchanged.
///
/// # Examples
///
/// ```
/// use avrobind_codegen::naming::python_safe_name;
///
/// assert_eq!(python_safe_name("class"), "class_");
/// assert_eq!(python_safe_name("self"), "self_");
/// assert_eq!(python_safe_name("user_id"), "user_id");
/// ```
pub fn python_safe_name(name: &str) -> String {
    if name == RECEIVER || PYTHON_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Render a string as a double-quoted Python literal.
pub fn py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render documentation as a Python docstring, or the no-docs comment.
///
/// Every quote is escaped so a doc ending in `"` cannot close the literal early.
pub fn docstring(doc: Option<&str>) -> String {
    match doc {
        Some(doc) if !doc.trim().is_empty() => {
            format!("\"\"\"{}\"\"\"", doc.replace('\\', "\\\\").replace('"', "\\\""))
        }
        _ => "# No docs available.".to_string(),
    }
}
