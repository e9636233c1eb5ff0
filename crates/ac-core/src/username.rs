//! Username derivation from display names.

use crate::Actor;

use unicode_normalization::UnicodeNormalization;

const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

fn transliterate(c: char) -> Option<&'static str> {
    let replacement = match c {
        'ą' | 'à' | 'á' | 'â' | 'ã' | 'å' | 'ä' => "a",
        'ć' | 'ç' => "c",
        'ę' | 'è' | 'é' | 'ê' | 'ë' => "e",
        'ł' => "l",
        'ń' | 'ñ' => "n",
        'ó' | 'ò' | 'ô' | 'õ' | 'ø' | 'ö' => "o",
        'ś' => "s",
        'ź' | 'ż' => "z",
        'ü' | 'ù' | 'ú' | 'û' => "u",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ý' | 'ÿ' => "y",
        'ß' => "ss",
        'æ' => "ae",
        'ð' => "d",
        'þ' => "th",
        _ => return None,
    };
    Some(replacement)
}

/// Replaces the first run of at least `min_len` chars matching `pred`.
fn replace_first_run(input: &str, min_len: usize, pred: impl Fn(char) -> bool, with: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if pred(chars[i]) {
            let start = i;
            while i < chars.len() && pred(chars[i]) {
                i += 1;
            }
            if i - start >= min_len {
                let mut out: String = chars[..start].iter().collect();
                out.push_str(with);
                out.extend(&chars[i..]);
                return out;
            }
        } else {
            i += 1;
        }
    }
    input.to_string()
}

/// Derives a preferred username from a display name.
///
/// Lowercases, transliterates common European letters, strips remaining
/// diacritics, turns spaces and `-&+` into `_` and drops anything outside
/// `[a-z0-9_]`.
pub fn convert_to_username(value: Option<&str>) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return String::new();
    };

    let mut transliterated = String::with_capacity(value.len());
    for c in value.to_lowercase().chars() {
        match transliterate(c) {
            Some(replacement) => transliterated.push_str(replacement),
            None => transliterated.push(c),
        }
    }

    let stripped: String = transliterated
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect();

    let collapsed = replace_first_run(&stripped, 2, char::is_whitespace, " ");

    let underscored: String = collapsed
        .chars()
        .map(|c| match c {
            ' ' | '-' | '&' | '+' => '_',
            other => other,
        })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();

    replace_first_run(&underscored, 2, |c| c == '_', "")
}

/// Regenerates the preferred username after a display name change, but only
/// when the username was still the one derived from the previous name.
pub fn auto_update_username(actor: &Actor, new_display_name: Option<&str>) -> Actor {
    let mut updated = actor.clone();
    let old_username = convert_to_username(Some(&actor.name));

    if actor.preferred_username == old_username {
        updated.preferred_username = convert_to_username(new_display_name);
    }

    updated
}

pub fn validate_username(actor: &Actor) -> bool {
    actor.preferred_username == convert_to_username(Some(&actor.preferred_username))
}
