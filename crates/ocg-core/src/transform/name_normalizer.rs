//! Identifier-safe casing used for contract symbols and router keys.

/// Convert to camelCase.
///
/// Every `_` or `-` followed by a character is removed and that character is
/// upper-cased; a leading ASCII capital is lowered; remaining non-word
/// characters (anything but ASCII alphanumerics and `_`) are dropped.
///
/// - `AuthController_sendPhoneOtp` → `authControllerSendPhoneOtp`
/// - `auth_phone` → `authPhone`
/// - `pet-store` → `petStore`
pub fn to_camel_case(name: &str) -> String {
    let capitalized = capitalize_after_separators(name, &['_', '-']);

    let mut chars = capitalized.chars();
    let lowered = match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let mut s = String::with_capacity(capitalized.len());
            s.push(first.to_ascii_lowercase());
            s.push_str(chars.as_str());
            s
        }
        _ => capitalized,
    };

    strip_non_word(&lowered)
}

/// Convert an operation id into the base name of its contract symbol.
///
/// A trailing bracketed index is unwrapped (`[1]` → `1`) before the
/// separator-driven capitalization. The first character keeps its case and
/// callers append their own suffix (`Contract`).
///
/// - `AuthController_sendPhoneOtp[1]` → `AuthControllerSendPhoneOtp1`
/// - `listPets` → `listPets`
pub fn to_pascal_zod_name(operation_id: &str) -> String {
    let unwrapped = unwrap_index_suffix(operation_id);
    strip_non_word(&capitalize_after_separators(&unwrapped, &['_', '-']))
}

/// Router key for an operation name. Plain camelCase, no prefix stripping:
/// `UsersController_findAll` stays `usersControllerFindAll`.
pub fn normalize_operation_name(name: &str) -> String {
    to_camel_case(name)
}

fn capitalize_after_separators(name: &str, separators: &[char]) -> String {
    let mut result = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(ch) = chars.next() {
        if separators.contains(&ch)
            && let Some(&next) = chars.peek()
            && next != '\n'
        {
            chars.next();
            result.extend(next.to_uppercase());
            continue;
        }
        result.push(ch);
    }

    result
}

fn strip_non_word(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// `foo[12]` → `foo12`. Anything else is returned unchanged.
fn unwrap_index_suffix(name: &str) -> String {
    let Some(body) = name.strip_suffix(']') else {
        return name.to_string();
    };
    match body.rfind('[') {
        Some(open) => {
            let digits = &body[open + 1..];
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                format!("{}{}", &body[..open], digits)
            } else {
                name.to_string()
            }
        }
        None => name.to_string(),
    }
}
