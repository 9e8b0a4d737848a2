//! Static transliteration tables backing [`plain_ascii`](super::plain_ascii).

use phf::phf_map;

// -----------------------------------------------------------------------------
//
/// Fixed transliterations: the Latin-1 supplement letters, the ligatures, and
/// the handful of punctuation marks with obvious ASCII renderings.
pub(super) static TRANSLITERATIONS: phf::Map<char, &'static str> = phf_map! {
    // Latin-1 supplement, upper case:
    'À' => "A", 'Á' => "A", 'Â' => "A", 'Ã' => "A", 'Ä' => "A", 'Å' => "A",
    'Æ' => "Ae",
    'Ç' => "C",
    'È' => "E", 'É' => "E", 'Ê' => "E", 'Ë' => "E",
    'Ì' => "I", 'Í' => "I", 'Î' => "I", 'Ï' => "I",
    'Ð' => "D",
    'Ñ' => "N",
    'Ò' => "O", 'Ó' => "O", 'Ô' => "O", 'Õ' => "O", 'Ö' => "O", 'Ø' => "O",
    'Ù' => "U", 'Ú' => "U", 'Û' => "U", 'Ü' => "U",
    'Ý' => "Y",
    'Þ' => "Th",
    'ß' => "ss",

    // Latin-1 supplement, lower case:
    'à' => "a", 'á' => "a", 'â' => "a", 'ã' => "a", 'ä' => "a", 'å' => "a",
    'æ' => "ae",
    'ç' => "c",
    'è' => "e", 'é' => "e", 'ê' => "e", 'ë' => "e",
    'ì' => "i", 'í' => "i", 'î' => "i", 'ï' => "i",
    'ð' => "d",
    'ñ' => "n",
    'ò' => "o", 'ó' => "o", 'ô' => "o", 'õ' => "o", 'ö' => "o", 'ø' => "o",
    'ù' => "u", 'ú' => "u", 'û' => "u", 'ü' => "u",
    'ý' => "y",
    'þ' => "th",
    'ÿ' => "y",

    // Punctuation with a natural single-character rendering:
    '\u{00A0}' => " ",   // no-break space
    '\u{00AB}' => "\"",  // «
    '\u{00BB}' => "\"",  // »
    '\u{2010}' => "-",
    '\u{2011}' => "-",
    '\u{2013}' => "-",   // en dash
    '\u{2018}' => "'",
    '\u{2019}' => "'",
    '\u{201C}' => "\"",
    '\u{201D}' => "\"",
    '\u{2032}' => "'",
    '\u{2033}' => "\"",
    '\u{00D7}' => "x",
};

// -----------------------------------------------------------------------------
//
/// Decorative symbols whose multi-character renderings are suppressed when a
/// file-name-safe result was requested.
pub(super) static DECORATIVE: phf::Map<char, &'static str> = phf_map! {
    '©' => "(c)",
    '®' => "(r)",
    '™' => "(TM)",
    '±' => "+/-",
    '¼' => "1/4",
    '½' => "1/2",
    '¾' => "3/4",
    '№' => "No.",
    '÷' => "/",
};

// -----------------------------------------------------------------------------
//
/// Latin Extended-A (U+0100–U+017F), indexed by `code_point - 0x0100`, with
/// diacritics stripped. The two true ligatures in the block (Ĳ, Œ) expand to
/// two letters.
pub(super) static LATIN_EXTENDED_A: [&str; 0x80] = [
    "A", "a", "A", "a", "A", "a", "C", "c", // 0100
    "C", "c", "C", "c", "C", "c", "D", "d", // 0108
    "D", "d", "E", "e", "E", "e", "E", "e", // 0110
    "E", "e", "E", "e", "G", "g", "G", "g", // 0118
    "G", "g", "G", "g", "H", "h", "H", "h", // 0120
    "I", "i", "I", "i", "I", "i", "I", "i", // 0128
    "I", "i", "Ij", "ij", "J", "j", "K", "k", // 0130
    "k", "L", "l", "L", "l", "L", "l", "L", // 0138
    "l", "L", "l", "N", "n", "N", "n", "N", // 0140
    "n", "'n", "Ng", "ng", "O", "o", "O", "o", // 0148
    "O", "o", "Oe", "oe", "R", "r", "R", "r", // 0150
    "R", "r", "S", "s", "S", "s", "S", "s", // 0158
    "S", "s", "T", "t", "T", "t", "T", "t", // 0160
    "U", "u", "U", "u", "U", "u", "U", "u", // 0168
    "U", "u", "U", "u", "W", "w", "Y", "y", // 0170
    "Y", "Z", "z", "Z", "z", "Z", "z", "s", // 0178
];

// -----------------------------------------------------------------------------

const ASCII: &str = " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// Returns the one-character `&'static str` for a printable-ASCII character.
pub(super) fn ascii_str(ch: char) -> &'static str {
    let index = ch as usize - 0x20;
    &ASCII[index..=index]
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_a_table_is_aligned() {
        assert_eq!(LATIN_EXTENDED_A['Ł' as usize - 0x0100], "L");
        assert_eq!(LATIN_EXTENDED_A['ż' as usize - 0x0100], "z");
        assert_eq!(LATIN_EXTENDED_A['Œ' as usize - 0x0100], "Oe");
        assert_eq!(LATIN_EXTENDED_A['\u{0132}' as usize - 0x0100], "Ij");
        assert_eq!(LATIN_EXTENDED_A['\u{017F}' as usize - 0x0100], "s");
    }

    #[test]
    fn ascii_slices() {
        assert_eq!(ascii_str('A'), "A");
        assert_eq!(ascii_str(' '), " ");
        assert_eq!(ascii_str('~'), "~");
    }
} // mod
