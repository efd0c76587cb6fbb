// this_file: crates/typecast-bidi/src/proptests.rs

use super::*;
use proptest::prelude::*;

fn sorted_chars(text: &str) -> Vec<char> {
    let mut chars: Vec<char> = text.chars().collect();
    chars.sort_unstable();
    chars
}

// Property: segmentation neither drops nor invents characters
proptest! {
    #[test]
    fn prop_runs_cover_line(s in "[a-z 0-9\u{0627}-\u{064A}]{0,40}") {
        let result = BidiSegmenter::new().segment(&s, 0);
        let joined: String = result.runs.iter().map(|run| run.text.as_str()).collect();
        prop_assert_eq!(sorted_chars(&joined), sorted_chars(&s));
    }
}

// Property: run ids are exactly cursor..cursor + runs
proptest! {
    #[test]
    fn prop_run_ids_are_a_permutation(
        s in "[a-z 0-9\u{0627}-\u{064A}]{0,40}",
        cursor in 0usize..1000,
    ) {
        let result = BidiSegmenter::new().segment(&s, cursor);
        let mut ids: Vec<usize> = result.run_info.iter().map(|info| info.run_id).collect();
        ids.sort_unstable();
        let expected: Vec<usize> = (cursor..cursor + result.runs.len()).collect();
        prop_assert_eq!(ids, expected);
        prop_assert_eq!(result.next_run_id, cursor + result.runs.len());
    }
}

// Property: each run's direction agrees with its level parity
proptest! {
    #[test]
    fn prop_direction_matches_parity(s in "[a-z 0-9\u{0627}-\u{064A}]{0,40}") {
        let result = BidiSegmenter::new().segment(&s, 0);
        for (run, info) in result.runs.iter().zip(&result.run_info) {
            prop_assert_eq!(run.direction.is_rtl(), info.is_level_odd);
            prop_assert_eq!(run.bidi_level % 2 == 1, info.is_level_odd);
        }
    }
}

// Property: a single-direction line is one run, unchanged
proptest! {
    #[test]
    fn prop_latin_is_one_run(s in "[a-z0-9 ]{1,40}") {
        let result = BidiSegmenter::new().segment(&s, 0);
        prop_assert_eq!(result.runs.len(), 1);
        prop_assert_eq!(&result.runs[0].text, &s);
        prop_assert_eq!(result.runs[0].direction, Direction::LeftToRight);
    }

    #[test]
    fn prop_arabic_is_one_run(s in "[\u{0627}-\u{064A}]{1,20}") {
        let result = BidiSegmenter::new().segment(&s, 0);
        prop_assert_eq!(result.runs.len(), 1);
        prop_assert_eq!(&result.runs[0].text, &s);
        prop_assert_eq!(result.runs[0].direction, Direction::RightToLeft);
    }
}

// Property: segmenting a run again yields that run alone
proptest! {
    #[test]
    fn prop_segmenting_a_run_is_stable(s in "[a-z]{1,8}( [\u{0627}-\u{063A}]{1,8})?( [a-z]{1,8})?") {
        let segmenter = BidiSegmenter::new();
        let result = segmenter.segment(&s, 0);
        for run in &result.runs {
            let again = segmenter.segment(&run.text, 0);
            prop_assert_eq!(again.runs.len(), 1);
            prop_assert_eq!(&again.runs[0].text, &run.text);
        }
    }
}

// Property: segmentation depends on the text alone, the cursor only shifts ids
proptest! {
    #[test]
    fn prop_segmentation_is_repeatable(
        s in "[a-z 0-9\u{0627}-\u{064A}]{0,40}",
        cursor in 0usize..1000,
    ) {
        let segmenter = BidiSegmenter::new();
        let first = segmenter.segment(&s, 0);
        let again = segmenter.segment(&s, 0);
        prop_assert_eq!(&first, &again);

        let shifted = segmenter.segment(&s, cursor);
        prop_assert_eq!(&first.runs, &shifted.runs);
        for (a, b) in first.run_info.iter().zip(&shifted.run_info) {
            prop_assert_eq!(a.run_id + cursor, b.run_id);
            prop_assert_eq!(a.is_level_odd, b.is_level_odd);
            prop_assert_eq!(a.line_is_rtl, b.line_is_rtl);
        }
    }
}

// Property: digits inside Arabic get their own run, and reading the runs
// right to left gives back the logical line
proptest! {
    #[test]
    fn prop_digits_in_arabic_split_out(
        s in "[\u{0627}-\u{063A}]{1,8} [0-9]{1,6} [\u{0627}-\u{063A}]{1,8}",
    ) {
        let result = BidiSegmenter::new().segment(&s, 0);
        prop_assert!(result.runs.len() >= 2);
        prop_assert!(result.run_info.iter().all(|info| info.line_is_rtl));

        let digits: Vec<&TextRun> = result
            .runs
            .iter()
            .filter(|run| run.text.chars().any(|c| c.is_ascii_digit()))
            .collect();
        prop_assert_eq!(digits.len(), 1);
        prop_assert_eq!(digits[0].direction, Direction::LeftToRight);
        prop_assert!(digits[0].text.chars().all(|c| c.is_ascii_digit()));

        let reading: String = result.runs.iter().rev().map(|run| run.text.as_str()).collect();
        prop_assert_eq!(&reading, &s);

        let chars: Vec<char> = s.chars().collect();
        for run in &result.runs {
            let len = run.text.chars().count();
            let span: String = chars[run.start..run.start + len].iter().collect();
            prop_assert_eq!(&span, &run.text);
        }
    }
}
