use std::collections::HashMap;

use inmanta_core::lang::keywords;
use inmanta_core::lang::operators;
use inmanta_core::lang::punctuation;

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            keywords::as_str(info.id),
            info.canonical,
            "keyword as_str mismatch for {:?}",
            info.id
        );
        assert!(
            info.canonical.chars().all(|c| c.is_ascii_lowercase()),
            "keyword {:?} must be lowercase so it never collides with type identifiers",
            info.canonical
        );

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate keyword spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn word_operators_are_keywords() {
    for info in operators::OPERATORS.iter().filter(|o| o.is_keyword_spelling) {
        for spelling in info.spellings {
            for word in spelling.split(' ') {
                assert!(
                    keywords::is_reserved(word),
                    "word operator {:?} uses non-reserved word {:?}",
                    info.id,
                    word
                );
            }
        }
    }
}

#[test]
fn operator_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, operators::OperatorId> = HashMap::new();

    for info in operators::OPERATORS {
        for &spelling in info.spellings {
            assert_eq!(operators::from_str(spelling), Some(info.id));
            if let Some(prev) = seen.insert(spelling, info.id) {
                panic!("duplicate operator spelling {:?}: {:?} and {:?}", spelling, prev, info.id);
            }
        }
    }
}

#[test]
fn punctuation_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, punctuation::PunctuationId> = HashMap::new();

    for info in punctuation::PUNCTUATION {
        assert_eq!(punctuation::from_str(info.canonical), Some(info.id));
        assert_eq!(punctuation::as_str(info.id), info.canonical);
        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate punctuation spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
        assert!(
            operators::from_str(info.canonical).is_none(),
            "{:?} is registered both as punctuation and operator",
            info.canonical
        );
    }
}
