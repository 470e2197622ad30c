///
/// Naming transforms
///
/// Fixed conventions shared by all emitters. The pluralizer is a suffix
/// heuristic only; irregular plurals are a documented limitation.
///

/// Convert a PascalCase identifier to camelCase.
///
/// Identifiers that do not start with an uppercase character are returned
/// unchanged. A leading acronym is lowercased as a unit: the last uppercase
/// character before a lowercase one begins the next word and keeps its case.
///
/// `"Name"` → `"name"`, `"OrderLine"` → `"orderLine"`,
/// `"IOStream"` → `"ioStream"`.
#[must_use]
pub fn to_camel_case(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    if !chars.first().is_some_and(|c| c.is_uppercase()) {
        return identifier.to_owned();
    }

    // Everything before `boundary` is part of the leading uppercase run.
    let mut boundary = 0;
    for i in 0..chars.len() {
        if i > 0 && !chars[i].is_uppercase() {
            break;
        }
        if i > 0 && chars.get(i + 1).is_some_and(|c| c.is_lowercase()) {
            // Last char of the acronym; it starts the next word.
            break;
        }
        boundary = i + 1;
    }

    let mut out = String::with_capacity(identifier.len());
    for (i, c) in chars.iter().enumerate() {
        if i < boundary {
            out.extend(c.to_lowercase());
        } else {
            out.push(*c);
        }
    }

    out
}

/// Convert a PascalCase identifier to kebab-case.
///
/// Every character is lowercased; a hyphen is inserted before each uppercase
/// character except the first. `"OrderLine"` → `"order-line"`.
#[must_use]
pub fn to_kebab_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    for (i, c) in identifier.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push('-');
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// Pluralize an entity or property name.
///
/// Suffix heuristic: `-y` (not after another vowel) → `-ies`;
/// `-s`/`-x`/`-ch`/`-sh` → `-es`; otherwise append `-s`.
#[must_use]
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    if word.ends_with('y')
        && !(word.ends_with("ay")
            || word.ends_with("ey")
            || word.ends_with("oy")
            || word.ends_with("uy"))
    {
        return format!("{}ies", &word[..word.len() - 1]);
    }

    if word.ends_with('s') || word.ends_with('x') || word.ends_with("ch") || word.ends_with("sh") {
        return format!("{word}es");
    }

    format!("{word}s")
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_lowercases_single_word() {
        assert_eq!(to_camel_case("Name"), "name");
        assert_eq!(to_camel_case("Order"), "order");
    }

    #[test]
    fn camel_case_preserves_word_boundaries() {
        assert_eq!(to_camel_case("OrderLine"), "orderLine");
        assert_eq!(to_camel_case("CustomerAddress"), "customerAddress");
    }

    #[test]
    fn camel_case_treats_leading_acronym_as_one_word() {
        assert_eq!(to_camel_case("IOStream"), "ioStream");
        assert_eq!(to_camel_case("SKU"), "sku");
    }

    #[test]
    fn camel_case_leaves_non_uppercase_input_unchanged() {
        assert_eq!(to_camel_case("already"), "already");
        assert_eq!(to_camel_case("snake_case"), "snake_case");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn kebab_case_splits_on_uppercase() {
        assert_eq!(to_kebab_case("OrderLine"), "order-line");
        assert_eq!(to_kebab_case("Order"), "order");
        assert_eq!(to_kebab_case("IOStream"), "i-o-stream");
    }

    #[test]
    fn pluralize_handles_suffix_classes() {
        assert_eq!(pluralize("Order"), "Orders");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Address"), "Addresses");
        assert_eq!(pluralize("Branch"), "Branches");
        assert_eq!(pluralize("Dish"), "Dishes");
    }

    #[test]
    fn pluralize_keeps_vowel_y_words_regular() {
        assert_eq!(pluralize("Day"), "Days");
        assert_eq!(pluralize("Key"), "Keys");
        assert_eq!(pluralize("Boy"), "Boys");
        assert_eq!(pluralize("Guy"), "Guys");
    }
}
