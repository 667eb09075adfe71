//! Rules of the `camxes` grammar.
//!
//! Syntax rules are lowercase. Word rules use the capitalized selma'o names,
//! with `h` standing for the apostrophe, and each has a `_clause` companion
//! that swallows the whitespace after the word. A `zoi` quote is a single
//! word spanning the cmavo and its delimited text, so an unterminated quote
//! still fails inside a word.

use gerna_peg::dsl::{any, choice, class, lit, not, one_of, opt, plus, rule, seq, star};
use gerna_peg::{Expr, Grammar, GrammarBuilder, GrammarError};

const VOWELS: &str = "aeiou";
const CONSONANTS: &str = "bcdfgjklmnprstvxz";
const SPACES: &str = " \t\n\r.?!";
const BLANK: &str = " \t\n\r";

/// Cmavo selma'o and their forms, longer forms before their prefixes.
const CMAVO: &[(&str, &[&str])] = &[
    (
        "KOhA",
        &[
            "ko'a", "ko'e", "zo'e", "mi", "do", "ti", "ta", "tu", "da", "de", "di", "ma",
        ],
    ),
    ("LE", &["lo", "le"]),
    ("LA", &["lai", "la"]),
    ("KU", &["ku"]),
    ("CU", &["cu"]),
    ("VAU", &["vau"]),
    ("NA", &["na"]),
    ("I", &["i"]),
];

/// Words followed by optional whitespace in their `_clause` rule.
const SPACED_WORDS: &[&str] = &[
    "KOhA", "LE", "LA", "KU", "CU", "VAU", "NA", "I", "ZOI", "BRIVLA", "CMEVLA",
];

pub(super) fn build() -> Result<Grammar, GrammarError> {
    morphology(words(syntax(GrammarBuilder::new("text")))).build()
}

fn syntax(builder: GrammarBuilder) -> GrammarBuilder {
    builder
        .rule(
            "text",
            seq([opt(rule("spaces")), opt(rule("paragraph")), rule("EOF")]),
        )
        .rule(
            "paragraph",
            seq([
                rule("sentence"),
                star(seq([rule("I_clause"), rule("sentence")])),
            ]),
        )
        .rule("sentence", seq([opt(rule("terms")), rule("bridi_tail")]))
        .rule(
            "bridi_tail",
            seq([
                opt(rule("CU_clause")),
                rule("selbri"),
                rule("tail_terms"),
                rule("VAU_elidible"),
            ]),
        )
        .rule("tail_terms", opt(rule("terms")))
        .rule("terms", plus(rule("sumti")))
        .rule(
            "sumti",
            rules(&["description", "name_sumti", "quote_sumti", "KOhA_clause"]),
        )
        .rule(
            "description",
            seq([rule("LE_clause"), rule("selbri"), rule("KU_elidible")]),
        )
        .rule(
            "name_sumti",
            seq([rule("LA_clause"), plus(rule("CMEVLA_clause"))]),
        )
        .rule("quote_sumti", rule("ZOI_clause"))
        .rule("selbri", seq([opt(rule("NA_clause")), rule("tanru")]))
        .rule("tanru", plus(rule("BRIVLA_clause")))
        .rule("KU_elidible", opt(rule("KU_clause")))
        .rule("VAU_elidible", opt(rule("VAU_clause")))
}

/// Ordered choice between the named rules.
fn rules(names: &[&str]) -> Expr {
    choice(names.iter().map(|name| rule(name)))
}

fn words(builder: GrammarBuilder) -> GrammarBuilder {
    let cmavo = CMAVO.iter().fold(builder, |acc, &(selmaho, forms)| {
        acc.rule(selmaho, seq([one_of(forms), not(rule("letter"))]))
    });
    let clauses = SPACED_WORDS.iter().fold(cmavo, |acc, word| {
        acc.rule(
            format!("{word}_clause"),
            seq([rule(word), opt(rule("spaces"))]),
        )
    });
    clauses
        .rule(
            "ZOI",
            seq([
                lit("zoi"),
                not(rule("letter")),
                opt(rule("blank")),
                rule("zoi_word"),
            ]),
        )
        .rule("BRIVLA", seq([rule("gismu"), not(rule("letter"))]))
        .rule(
            "CMEVLA",
            seq([
                star(seq([
                    not(seq([rule("consonant"), not(rule("letter"))])),
                    rule("letter"),
                ])),
                rule("consonant"),
                not(rule("letter")),
            ]),
        )
        .rule("EOF", not(any()))
}

fn morphology(builder: GrammarBuilder) -> GrammarBuilder {
    let c = || rule("consonant");
    let v = || rule("vowel");
    builder
        .rule(
            "gismu",
            choice([seq([c(), v(), c(), c(), v()]), seq([c(), c(), v(), c(), v()])]),
        )
        .labeled_rule(
            "zoi_word",
            "delimited quote",
            seq([lit("."), star(seq([not(lit(".")), any()])), lit(".")]),
        )
        .rule("letter", choice([v(), c(), rule("h"), lit("y")]))
        .rule("vowel", class(VOWELS))
        .rule("consonant", class(CONSONANTS))
        .rule("h", lit("'"))
        .labeled_rule("spaces", "spaces", plus(class(SPACES)))
        .rule("blank", plus(class(BLANK)))
}
