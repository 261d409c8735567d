/// Surname substitution table for the magnet alphabet
/// Each plain symbol maps to exactly one surname from the Hundred Family Surnames
const DICT_SIZE: usize = 74; // number of pairs in the symbol dictionary

// The surname table, mapping plain symbols to surname glyphs
pub const SURNAME_MAP: [(char, char); DICT_SIZE] = [
    ('0', '赵'), ('1', '钱'), ('2', '孙'), ('3', '李'), ('4', '周'), ('5', '吴'), ('6', '郑'),
    ('7', '王'), ('8', '冯'), ('9', '陈'), ('a', '褚'), ('b', '卫'), ('c', '蒋'), ('d', '沈'),
    ('e', '韩'), ('f', '杨'), ('g', '朱'), ('h', '秦'), ('i', '尤'), ('j', '许'), ('k', '何'),
    ('l', '吕'), ('m', '施'), ('n', '张'), ('o', '孔'), ('p', '曹'), ('q', '严'), ('r', '华'),
    ('s', '金'), ('t', '魏'), ('u', '陶'), ('v', '姜'), ('w', '戚'), ('x', '谢'), ('y', '邹'),
    ('z', '喻'), ('A', '福'), ('B', '水'), ('C', '窦'), ('D', '章'), ('E', '云'), ('F', '苏'),
    ('G', '潘'), ('H', '葛'), ('I', '奚'), ('J', '范'), ('K', '彭'), ('L', '郎'), ('M', '鲁'),
    ('N', '韦'), ('O', '昌'), ('P', '马'), ('Q', '苗'), ('R', '凤'), ('S', '花'), ('T', '方'),
    ('U', '俞'), ('V', '任'), ('W', '袁'), ('X', '柳'), ('Y', '唐'), ('Z', '罗'), ('.', '薛'),
    ('-', '伍'), ('_', '余'), ('+', '米'), ('=', '贝'), ('/', '姚'), ('?', '孟'), ('#', '顾'),
    ('%', '尹'), ('&', '江'), ('*', '钟'), (':', '竺'),
];

// Forward and reverse lookup maps
lazy_static::lazy_static! {
    static ref FORWARD: std::collections::HashMap<char, char> = {
        let mut map = std::collections::HashMap::with_capacity(DICT_SIZE);
        for &(plain, glyph) in SURNAME_MAP.iter() {
            map.insert(plain, glyph);
        }
        map
    };
    static ref REVERSE: std::collections::HashMap<char, char> = {
        let mut map = std::collections::HashMap::with_capacity(DICT_SIZE);
        for &(plain, glyph) in SURNAME_MAP.iter() {
            map.insert(glyph, plain);
        }
        map
    };
}

/// Number of symbol pairs in the table
pub fn len() -> usize {
    SURNAME_MAP.len()
}

/// Surname glyph for a plain symbol, or the symbol itself when it has none
pub fn encode_symbol(plain: char) -> char {
    FORWARD.get(&plain).copied().unwrap_or(plain)
}

/// Plain symbol for a surname glyph, or the glyph itself when it is not in the table
pub fn decode_symbol(glyph: char) -> char {
    REVERSE.get(&glyph).copied().unwrap_or(glyph)
}

/// Convert text to its surname rendering
pub fn encode_text(text: &str) -> String {
    text.chars().map(encode_symbol).collect()
}

/// Convert a surname rendering back to text, passing unknown characters through
pub fn decode_text(surnames: &str) -> String {
    surnames.chars().map(decode_symbol).collect()
}

/// Convert a surname rendering back to text, rejecting any glyph outside the table
pub fn decode_strict(surnames: &str) -> Option<String> {
    let mut plain = String::with_capacity(surnames.chars().count());
    for c in surnames.chars() {
        if let Some(&symbol) = REVERSE.get(&c) {
            plain.push(symbol);
        } else {
            return None; // Unknown glyph found
        }
    }
    Some(plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_surname_map_is_bijective() {
        let plains: HashSet<char> = SURNAME_MAP.iter().map(|&(p, _)| p).collect();
        let glyphs: HashSet<char> = SURNAME_MAP.iter().map(|&(_, g)| g).collect();
        assert_eq!(plains.len(), len());
        assert_eq!(glyphs.len(), len());
        assert!(plains.is_disjoint(&glyphs));
    }

    #[test]
    fn test_every_symbol_roundtrips() {
        for &(plain, glyph) in SURNAME_MAP.iter() {
            assert_eq!(encode_symbol(plain), glyph);
            assert_eq!(decode_symbol(encode_symbol(plain)), plain);
        }
    }

    #[test]
    fn test_encode_text() {
        assert_eq!(encode_text("0aA:"), "赵褚福竺");
    }

    #[test]
    fn test_unknown_characters_pass_through() {
        assert_eq!(encode_symbol('!'), '!');
        assert_eq!(decode_symbol('钻'), '钻');
        assert_eq!(decode_text("赵 钱!"), "0 1!");
    }

    #[test]
    fn test_decode_strict() {
        assert_eq!(decode_strict("赵钱孙").as_deref(), Some("012"));
        assert_eq!(decode_strict("赵x孙"), None);
    }
}
