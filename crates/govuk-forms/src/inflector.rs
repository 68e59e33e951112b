//! Naming conventions shared by ids, input names and translation keys.

/// Converts a `CamelCase`, `::` namespaced name to `snake_case` with `/`
/// between namespaces.
///
/// `Steps::Appeal::Penalty` becomes `steps/appeal/penalty`, and acronyms are
/// kept together (`HTTPRequest` becomes `http_request`).
pub fn underscore(word: &str) -> String {
    let word = word.replace("::", "/");
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else if c == '-' {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    out
}

/// Key used as input-name root and id prefix (`steps_appeal_penalty`).
pub fn param_key(model_name: &str) -> String {
    underscore(model_name).replace('/', "_")
}

/// Dotted translation scope (`steps.appeal.penalty`).
pub fn i18n_scope(model_name: &str) -> String {
    underscore(model_name).replace('/', ".")
}

/// Turns an attribute name into display text (`email_work` becomes
/// `Email work`, `country_id` becomes `Country`).
pub fn humanize(word: &str) -> String {
    let trimmed = word.strip_suffix("_id").unwrap_or(word);
    let spaced = trimmed.trim_start_matches('_').replace('_', " ").to_lowercase();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fallback label for an attribute or a dotted choice key.
pub fn default_label(attribute: &str) -> String {
    humanize(attribute.rsplit('.').next().unwrap_or(attribute))
}

/// Makes a choice value usable inside an element id.
pub fn sanitize_value(value: &str) -> String {
    value
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() || c == '.' {
                Some('_')
            } else if c.is_alphanumeric() || c == '_' || c == '-' {
                Some(c)
            } else {
                None
            }
        })
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscore() {
        assert_eq!(underscore("Person"), "person");
        assert_eq!(underscore("StateMachine"), "state_machine");
        assert_eq!(underscore("Steps::Appeal::Penalty"), "steps/appeal/penalty");
        assert_eq!(underscore("HTTPRequest"), "http_request");
        assert_eq!(underscore("Address2Line"), "address2_line");
    }

    #[test]
    fn test_param_key_and_scope() {
        assert_eq!(param_key("Steps::Appeal::Penalty"), "steps_appeal_penalty");
        assert_eq!(i18n_scope("Steps::Appeal::Penalty"), "steps.appeal.penalty");
        assert_eq!(param_key("Person"), "person");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("name"), "Name");
        assert_eq!(humanize("email_work"), "Email work");
        assert_eq!(humanize("country_id"), "Country");
        assert_eq!(humanize("NI_Number"), "Ni number");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_default_label() {
        assert_eq!(default_label("gender.female"), "Female");
        assert_eq!(default_label("has_user_account"), "Has user account");
    }

    #[test]
    fn test_sanitize_value() {
        assert_eq!(sanitize_value("Female"), "female");
        assert_eq!(sanitize_value("not sure"), "not_sure");
        assert_eq!(sanitize_value("v1.2"), "v1_2");
        assert_eq!(sanitize_value("a&b"), "ab");
    }
}
