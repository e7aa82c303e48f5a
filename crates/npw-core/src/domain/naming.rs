//! Identifier and name-syntax helpers.
//!
//! All the "is this a valid X name" rules used by the constraint validator
//! live here, along with the case conversions the template catalog uses to
//! derive one parameter's suggestion from another (class name from project
//! name and back).

/// Dart package names longer than this are rejected.
pub const MAX_MODULE_NAME_LENGTH: usize = 64;

/// Package names that would collide with the standard Flutter dependencies
/// of a freshly generated pubspec.
pub const FLUTTER_PACKAGE_DEPENDENCIES: [&str; 4] =
    ["flutter", "flutter_test", "flutter_driver", "flutter_localizations"];

const DART_KEYWORDS: [&str; 33] = [
    "assert", "break", "case", "catch", "class", "const", "continue", "default", "do", "else",
    "enum", "extends", "false", "final", "finally", "for", "if", "in", "is", "new", "null",
    "rethrow", "return", "super", "switch", "this", "throw", "true", "try", "var", "void",
    "while", "with",
];

const JAVA_KEYWORDS: [&str; 53] = [
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "true",
    "false", "null", "try", "void", "volatile", "while",
];

/// Whether `word` is reserved in Dart.
pub fn is_dart_keyword(word: &str) -> bool {
    DART_KEYWORDS.contains(&word)
}

/// Whether `value` is a valid Dart package name: lowercase letters, digits
/// and underscores, not starting with a digit, not a reserved word, within
/// the length cap, and not colliding with the generated pubspec's own
/// Flutter dependencies.
pub fn is_valid_dart_package_name(value: &str) -> bool {
    let mut chars = value.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_');
    valid_start
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && !is_dart_keyword(value)
        && value.len() <= MAX_MODULE_NAME_LENGTH
        && !FLUTTER_PACKAGE_DEPENDENCIES.contains(&value)
}

/// Whether `value` is a valid Java/Kotlin identifier (and not a keyword).
fn is_valid_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$');
    valid_start
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !JAVA_KEYWORDS.contains(&value)
}

/// Whether `value` is a valid dotted package name: non-empty identifier
/// segments separated by single dots.
pub fn is_valid_package_name(value: &str) -> bool {
    !value.is_empty() && value.split('.').all(is_valid_identifier)
}

/// Whether `value` is a valid *fully qualified* identifier — a valid package
/// name that actually contains a dot. Class and Package constraints check
/// the qualified form (ambient package prefix + value).
pub fn is_valid_fully_qualified_identifier(value: &str) -> bool {
    is_valid_package_name(value) && value.contains('.')
}

/// Syntax check for string resource names (values folder rules).
///
/// Returns the error text to fold into the constraint message, or `None`
/// when the name is acceptable.
pub fn resource_name_error(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("the resource name must not be empty".into());
    }
    let first = value.chars().next()?;
    if !first.is_ascii_alphabetic() {
        return Some("the resource name must start with a letter".into());
    }
    for c in value.chars() {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            return Some(format!("'{c}' is not a valid resource name character"));
        }
    }
    None
}

/// Derive a class name from a free-form project name: split into words,
/// capitalize each, join. Returns `None` when nothing usable remains.
///
/// `"my_app"` → `"MyApp"`, `"flutter demo"` → `"FlutterDemo"`.
pub fn extract_class_name(value: &str) -> Option<String> {
    let words = split_words(value);
    if words.is_empty() {
        return None;
    }
    Some(words.into_iter().map(capitalize).collect())
}

/// Convert a CamelCase name to lower_case_with_underscores.
///
/// `"FlutterApp"` → `"flutter_app"`. The inverse direction of
/// [`extract_class_name`]; the catalog wires the two as a bidirectional
/// suggestion pair.
pub fn camel_case_to_underlines(value: &str) -> String {
    split_words(value).join("_")
}

/// Sanitize a project name into a single package segment: lowercase, strip
/// everything that is not a letter, digit, or underscore, and drop leading
/// digits. Used to compose the suggested package name.
pub fn name_to_package_segment(value: &str) -> String {
    let mut out = String::new();
    for c in value.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c == '_' || (c.is_ascii_digit() && !out.is_empty()) {
            out.push(c);
        }
    }
    out
}

fn capitalize(word: String) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into lowercase words on separators (`_`, `-`, whitespace),
/// camelCase transitions, and acronym boundaries (`HTTPServer` → `http`,
/// `server`). Characters that are neither alphanumeric nor separators are
/// dropped with the word boundary they create.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            // camelCase transition: "myApp" → "my" + "App"
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
            // acronym boundary: "HTTPServer" → "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
