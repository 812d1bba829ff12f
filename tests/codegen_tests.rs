// tests/codegen_tests.rs

use cql_lang::{Codegen, QueryFragment, ResultShape, compile, parse};
use test_case::test_case;

fn fragment(input: &str, shape: ResultShape) -> String {
    let query = parse(input).unwrap();
    let fragments = compile(&query, shape, None);
    assert_eq!(fragments.len(), 1);
    fragments[0].text.clone()
}

fn word_id(input: &str) -> String {
    fragment(input, ResultShape::WordId)
}

fn with_pos_codes(input: &str) -> String {
    let codegen = Codegen::new().with_pos_codes(["n", "nn", "v", "vb", "adj"]);
    let query = parse(input).unwrap();
    codegen.compile(&query, ResultShape::WordId, None)[0].text.clone()
}

// ============================================================================
// Word positions and joins
// ============================================================================

#[test]
fn test_single_spelling() {
    assert_eq!(
        word_id("spe(love)"),
        "select w0.id from Word w0 where ((w0.spellingInsensitive.string = 'love'))"
    );
}

#[test]
fn test_lemma_joins_word_part() {
    assert_eq!(
        word_id("lem(love)$spe(of)"),
        "select w0.id from Word w0, WordPart wp0, Word w1 \
         where wp0.word = w0 and w1 = w0.next \
         and ((wp0.lemPos.lemma.tagInsensitive.string = 'love')) \
         and ((w1.spellingInsensitive.string = 'of'))"
    );
}

#[test]
fn test_empty_middle_position_is_elided() {
    let query = parse("spe(the)$lem()$spe(cat)").unwrap();
    let fragment = &compile(&query, ResultShape::WordId, None)[0];
    assert_eq!(
        fragment.text,
        "select w0.id from Word w0, Word w2 where w2 = w0.next.next \
         and ((w0.spellingInsensitive.string = 'the')) \
         and ((w2.spellingInsensitive.string = 'cat'))"
    );
    assert_eq!(fragment.word_aliases, vec!["w0", "w2"]);
    assert!(fragment.part_aliases.is_empty());
}

#[test]
fn test_empty_trailing_position_is_elided() {
    assert_eq!(
        word_id("spe(a)$spe()"),
        "select w0.id from Word w0 where ((w0.spellingInsensitive.string = 'a'))"
    );
}

#[test]
fn test_empty_first_position_is_kept() {
    assert_eq!(
        word_id("spe()$spe(b)"),
        "select w0.id from Word w0, Word w1 where w1 = w0.next \
         and ((w1.spellingInsensitive.string = 'b'))"
    );
}

#[test]
fn test_empty_query_has_no_where() {
    assert_eq!(word_id("spe()"), "select w0.id from Word w0");
}

#[test]
fn test_and_or_nesting() {
    assert_eq!(
        word_id("spe(a):lem(b);spe(c)"),
        "select w0.id from Word w0, WordPart wp0 where wp0.word = w0 \
         and ((w0.spellingInsensitive.string = 'a' \
         and wp0.lemPos.lemma.tagInsensitive.string = 'b') \
         or (w0.spellingInsensitive.string = 'c'))"
    );
}

#[test]
fn test_aliases_reported() {
    let query = parse("lem(a)$spe(b)$pos(c)").unwrap();
    let fragment = &compile(&query, ResultShape::WordId, None)[0];
    assert_eq!(fragment.word_aliases, vec!["w0", "w1", "w2"]);
    assert_eq!(fragment.part_aliases, vec!["wp0", "wp2"]);
}

// ============================================================================
// Result shapes
// ============================================================================

#[test]
fn test_full_word_shape() {
    assert_eq!(
        fragment("wtg(ham)", ResultShape::FullWord),
        "select w0 from Word w0 where ((w0.work.tag = 'ham'))"
    );
}

#[test]
fn test_distinct_work_shape() {
    assert_eq!(
        fragment("wtg(ham)$spe(to)", ResultShape::DistinctWork),
        "select distinct work from Work work, WorkPart workPart, Word w0, Word w1 \
         where w0.work = work and w0.workPart = workPart and w1 = w0.next \
         and ((work.tag = 'ham')) and ((w1.spellingInsensitive.string = 'to'))"
    );
}

#[test]
fn test_distinct_work_part_shape() {
    assert_eq!(
        fragment("ptg(1.2)", ResultShape::DistinctWorkPart),
        "select distinct workPart from Work work, WorkPart workPart, Word w0 \
         where w0.work = work and w0.workPart = workPart \
         and ((workPart.tag = '1.2'))"
    );
}

#[test]
fn test_distinct_shape_later_position_uses_own_work_part() {
    assert_eq!(
        fragment("spe(a)$ptg(x)", ResultShape::DistinctWorkPart),
        "select distinct workPart from Work work, WorkPart workPart, Word w0, Word w1 \
         where w0.work = work and w0.workPart = workPart and w1 = w0.next \
         and ((w0.spellingInsensitive.string = 'a')) and ((w1.workPart.tag = 'x'))"
    );
}

#[test_case(ResultShape::WordId ; "word id")]
#[test_case(ResultShape::FullWord ; "full word")]
#[test_case(ResultShape::DistinctWork ; "work")]
#[test_case(ResultShape::DistinctWorkPart ; "work part")]
fn test_later_work_constraint_same_across_shapes(shape: ResultShape) {
    let text = fragment("spe(a)$wtg(ham):ptg(x)", shape);
    assert!(
        text.ends_with("((w1.work.tag = 'ham' and w1.workPart.tag = 'x'))"),
        "{}",
        text
    );
}

#[test]
fn test_work_part_through_word() {
    assert_eq!(
        word_id("ptg(1.2)"),
        "select w0.id from Word w0 where ((w0.workPart.tag = '1.2'))"
    );
}

#[test_case(ResultShape::WordId, "select w0.id from" ; "word id")]
#[test_case(ResultShape::FullWord, "select w0 from" ; "full word")]
#[test_case(ResultShape::DistinctWork, "select distinct work from" ; "work")]
#[test_case(ResultShape::DistinctWorkPart, "select distinct workPart from" ; "work part")]
fn test_shape_select(shape: ResultShape, prefix: &str) {
    assert!(fragment("spe(a)", shape).starts_with(prefix));
}

// ============================================================================
// Phrases and filters
// ============================================================================

#[test]
fn test_one_fragment_per_phrase() {
    let query = parse("spe(thee)|spe(thou)|lem(be)").unwrap();
    let fragments: Vec<QueryFragment> = compile(&query, ResultShape::WordId, None);
    assert_eq!(fragments.len(), 3);
    for (i, fragment) in fragments.iter().enumerate() {
        assert_eq!(fragment.phrase, i);
    }
    assert!(fragments[1].text.ends_with("((w0.spellingInsensitive.string = 'thou'))"));
}

#[test]
fn test_filter_comes_first() {
    let query = parse("spe(a)").unwrap();
    let fragments = compile(&query, ResultShape::WordId, Some("w0.work.tag = 'ham'"));
    assert_eq!(
        fragments[0].text,
        "select w0.id from Word w0 where (w0.work.tag = 'ham') \
         and ((w0.spellingInsensitive.string = 'a'))"
    );
}

#[test]
fn test_filter_before_work_bindings() {
    let query = parse("spe()").unwrap();
    let fragments = compile(&query, ResultShape::DistinctWork, Some("work.id > 3"));
    assert_eq!(
        fragments[0].text,
        "select distinct work from Work work, WorkPart workPart, Word w0 \
         where (work.id > 3) and w0.work = work and w0.workPart = workPart"
    );
}

#[test]
fn test_filter_applies_to_every_phrase() {
    let query = parse("a|b").unwrap();
    for fragment in compile(&query, ResultShape::WordId, Some("x = 1")) {
        assert!(fragment.text.contains("where (x = 1) and"));
    }
}

#[test]
fn test_blank_filter_ignored() {
    let query = parse("spe()").unwrap();
    let fragments = compile(&query, ResultShape::WordId, Some("   "));
    assert_eq!(fragments[0].text, "select w0.id from Word w0");
}

// ============================================================================
// Predicates
// ============================================================================

#[test_case("spe(\"o'er\")", "((w0.spellingInsensitive.string = 'o''er'))" ; "quote doubled")]
#[test_case("o'er", "((w0.spellingInsensitive.string = 'o''er'))" ; "bare quote")]
#[test_case("!spe(love)", "((w0.spellingInsensitive.string <> 'love'))" ; "negated literal")]
#[test_case("spe({^bu})", "((match(w0.spellingInsensitive.string, '^bu') <> 0))" ; "regex")]
#[test_case("!spe({^bu})", "((NOT (match(w0.spellingInsensitive.string, '^bu') <> 0)))" ; "negated regex")]
#[test_case("spe(\"{^o'}\")", "((match(w0.spellingInsensitive.string, '^o''') <> 0))" ; "regex quote")]
#[test_case("wtf(\"The Tempest\")", "((w0.work.fullTitle = 'The Tempest'))" ; "work title")]
#[test_case("spk(Hamlet)", "((w0.speech.speakerName = 'Hamlet'))" ; "speaker")]
fn test_text_predicates(input: &str, expected: &str) {
    let text = word_id(input);
    assert!(text.ends_with(expected), "{}", text);
}

#[test_case("spg(m)", "((w0.speech.gender.gender = 0))" ; "gender")]
#[test_case("!spg(f)", "((w0.speech.gender.gender <> 1))" ; "negated gender")]
#[test_case("spg(\"{m|f}\")", "((w0.speech.gender.gender IN (0, 1)))" ; "gender regex")]
#[test_case("!spg(\"{m|f}\")", "((w0.speech.gender.gender NOT IN (0, 1)))" ; "negated gender regex")]
#[test_case("spg({x})", "((1 = 0))" ; "gender regex no match")]
#[test_case("mor(\"{i|s}\")", "((w0.speech.mortality.mortality IN (1)))" ; "mortality regex")]
#[test_case("vrs(y)", "((w0.prosodic.prosodic = 1))" ; "verse")]
fn test_categorical_predicates(input: &str, expected: &str) {
    let text = word_id(input);
    assert!(text.ends_with(expected), "{}", text);
}

#[test_case("nar(y)", "select w0.id from Word w0 where ((w0.speech is null))" ; "narrative")]
#[test_case("nar(n)", "select w0.id from Word w0 where ((w0.speech is not null))" ; "speech")]
#[test_case("!nar(y)", "select w0.id from Word w0 where ((w0.speech is not null))" ; "negated narrative")]
#[test_case("nar(\"{y|n}\")", "select w0.id from Word w0" ; "both")]
#[test_case("!nar(\"{y|n}\")", "select w0.id from Word w0 where ((1 = 0))" ; "neither")]
fn test_narrative_predicates(input: &str, expected: &str) {
    assert_eq!(word_id(input), expected);
}

#[test_case("pye(>=1600)", "((w0.work.pubDate.startYear >= 1600))" ; "at least")]
#[test_case("pyl(<1700)", "((w0.work.pubDate.endYear < 1700))" ; "before")]
#[test_case("!pye(1600)", "((NOT (w0.work.pubDate.startYear = 1600)))" ; "negated")]
#[test_case("wpc(<>2)", "((w0.numWordParts <> 2))" ; "not equal")]
#[test_case(
    "pye(>=1600):pyl(<1700)",
    "((w0.work.pubDate.startYear >= 1600 and w0.work.pubDate.endYear < 1700))" ;
    "range"
)]
fn test_numeric_predicates(input: &str, expected: &str) {
    let text = word_id(input);
    assert!(text.ends_with(expected), "{}", text);
}

#[test]
fn test_numeric_distinct_shape_uses_bound_work() {
    assert!(
        fragment("pye(1600)", ResultShape::DistinctWork)
            .ends_with("((work.pubDate.startYear = 1600))")
    );
}

// ============================================================================
// Part of speech
// ============================================================================

#[test]
fn test_pos_regex_expands_to_codes() {
    assert_eq!(
        with_pos_codes("pos({^n})"),
        "select w0.id from Word w0, WordPart wp0 where wp0.word = w0 \
         and ((wp0.lemPos.pos.tag IN ('n', 'nn')))"
    );
}

#[test]
fn test_pos_regex_is_unanchored() {
    assert!(with_pos_codes("pos({v})").ends_with("((wp0.lemPos.pos.tag IN ('v', 'vb')))"));
}

#[test]
fn test_negated_pos_regex() {
    assert!(with_pos_codes("!pos({^n})").ends_with("((wp0.lemPos.pos.tag NOT IN ('n', 'nn')))"));
}

#[test]
fn test_pos_regex_without_match() {
    assert!(with_pos_codes("pos({^x})").ends_with("((1 = 0))"));
}

#[test]
fn test_negated_pos_regex_without_match_keeps_join() {
    assert_eq!(
        with_pos_codes("!pos({^x})"),
        "select w0.id from Word w0, WordPart wp0 where wp0.word = w0"
    );
}

#[test]
fn test_pos_literal_with_codes() {
    assert!(with_pos_codes("pos(n)").ends_with("((wp0.lemPos.pos.tag = 'n'))"));
}

#[test]
fn test_pos_regex_without_codes() {
    assert!(word_id("pos({^n})").ends_with("((match(wp0.lemPos.pos.tag, '^n') <> 0))"));
}

// ============================================================================
// Sharing
// ============================================================================

#[test]
fn test_codegen_shared_across_threads() {
    let codegen = Codegen::new().with_pos_codes(["n", "v"]);
    let query = parse("lem(love):pos({n});spe(lovers)$spe(of)|spe(x)").unwrap();
    let expected = codegen.compile(&query, ResultShape::WordId, None);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| codegen.compile(&query, ResultShape::WordId, None)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
