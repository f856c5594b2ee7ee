use phf::phf_map;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Letters that carry no canonical decomposition.
const LIGATURE_MAP: phf::Map<char, &'static str> = phf_map! {
    'œ' => "oe", 'Œ' => "oe",
    'æ' => "ae", 'Æ' => "ae",
    'ß' => "ss",
    'ø' => "o", 'Ø' => "o",
    'ł' => "l", 'Ł' => "l",
    'đ' => "d", 'Đ' => "d",
    'ð' => "d", 'Ð' => "d",
    'þ' => "th", 'Þ' => "th",
};

/// Strip accents, lowercase, trim.
pub fn normalize_name(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        match LIGATURE_MAP.get(&ch) {
            Some(repl) => out.push_str(repl),
            None => out.push(ch),
        }
    }
    out.to_lowercase().trim().to_string()
}

/// The eight local parts a person is likely to use, surname-first then
/// given-name-first, for separators `.`, `_`, `-` and none.
pub fn prefix_candidates(surname: &str, given_name: &str) -> [String; 8] {
    let s = normalize_name(surname);
    let g = normalize_name(given_name);
    [
        format!("{s}.{g}"),
        format!("{s}_{g}"),
        format!("{s}-{g}"),
        format!("{s}{g}"),
        format!("{g}.{s}"),
        format!("{g}_{s}"),
        format!("{g}-{s}"),
        format!("{g}{s}"),
    ]
}
