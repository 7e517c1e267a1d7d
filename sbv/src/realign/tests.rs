/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: CC0-1.0
 */

use super::*;
use std::io::Cursor;
use rand::{thread_rng, Rng};

fn caption(start: f64, end: f64, lines: &[&str]) -> CaptionRecord {
    CaptionRecord {
        start,
        end,
        lines: lines.iter().map(|line| line.to_string()).collect(),
    }
}

fn realign(input: &str, start: Option<f64>) -> RealignResult<Vec<CaptionRecord>> {
    realign_lines(input.lines(), start)
}

#[test]
fn test_single_without_realignment() {
    assert_eq!(
        realign("0:00\nHello\n0:00:05\nWorld\n", None).unwrap(),
        vec![
            caption(0.0, 5.0, &["Hello"]),
            caption(5.0, 10.0, &["World"]),
        ],
    );
}

#[test]
fn test_dual_realigned_to_zero() {
    assert_eq!(
        realign(
            "0:00:10.000,0:00:12.000\nHello\n0:00:15.000,0:00:18.000\nWorld\n",
            Some(0.0),
        ).unwrap(),
        vec![
            caption(0.0, 2.0, &["Hello"]),
            caption(5.0, 8.0, &["World"]),
        ],
    );
}

#[test]
fn test_single_realigned_later() {
    assert_eq!(
        realign("0:10\nFirst\n0:15\nSecond\n", Some(60.0)).unwrap(),
        vec![
            caption(60.0, 65.0, &["First"]),
            caption(65.0, 70.0, &["Second"]),
        ],
    );
}

#[test]
fn test_dual_without_trailing_text() {
    assert_eq!(
        realign("0:01,0:02\nOne\n0:03,0:04\n", None).unwrap(),
        vec![caption(1.0, 2.0, &["One"])],
    );
}

#[test]
fn test_single_without_trailing_text() {
    assert_eq!(
        realign("0:01\nOne\n0:03\n", None).unwrap(),
        vec![caption(1.0, 3.0, &["One"])],
    );
}

#[test]
fn test_consecutive_metadata_lines() {
    assert_eq!(
        realign("0:01,0:02\n0:03,0:04\nOne\n0:05,0:06\nTwo\n", None).unwrap(),
        vec![
            caption(3.0, 4.0, &["One"]),
            caption(5.0, 6.0, &["Two"]),
        ],
    );
    assert_eq!(
        realign("0:01\n0:03\nOne\n0:05\n", None).unwrap(),
        vec![caption(3.0, 5.0, &["One"])],
    );
}

#[test]
fn test_multiline_captions() {
    assert_eq!(
        realign("0:00\nSubtitle1\nSubtitle1 continuation\n1:00\nSubtitle2\n", None).unwrap(),
        vec![
            caption(0.0, 60.0, &["Subtitle1", "Subtitle1 continuation"]),
            caption(60.0, 65.0, &["Subtitle2"]),
        ],
    );
}

#[test]
fn test_header_is_skipped() {
    assert_eq!(
        realign("# Exported transcript\n#\n0:20\nHello\n", Some(0.0)).unwrap(),
        vec![caption(0.0, 5.0, &["Hello"])],
    );
}

#[test]
fn test_header_mark_after_header_is_text() {
    assert!(matches!(
        realign("# comment\n\n# not a comment\n0:00\nHello\n", None).unwrap_err(),
        RealignError::CaptionBeforeTimestamp,
    ));
    assert_eq!(
        realign("0:00\n#hashtag\n0:02\n", None).unwrap(),
        vec![caption(0.0, 2.0, &["#hashtag"])],
    );
}

#[test]
fn test_blank_lines_are_ignored() {
    assert_eq!(
        realign("\n0:00,0:01\n\nOne\n\n\n0:02,0:03\n  \nTwo\n\n", None).unwrap(),
        vec![
            caption(0.0, 1.0, &["One"]),
            caption(2.0, 3.0, &["Two"]),
        ],
    );
}

#[test]
fn test_digit_led_text() {
    assert_eq!(
        realign("0:00\n3 little pigs\n0:04\n", None).unwrap(),
        vec![caption(0.0, 4.0, &["3 little pigs"])],
    );
}

#[test]
fn test_encoding_and_offset_detection() {

    let mut realigner = Realigner::new(Some(1.0));

    assert_eq!(realigner.encoding(), None);
    assert_eq!(realigner.offset(), None);
    assert_eq!(realigner.push_line("# header").unwrap(), None);
    assert_eq!(realigner.encoding(), None);
    assert_eq!(realigner.push_line("0:00:04.5,0:00:06").unwrap(), None);
    assert_eq!(realigner.encoding(), Some(Encoding::Dual));
    assert_eq!(realigner.offset(), Some(3.5));
}

#[test]
fn test_single_encoding_is_stable() {
    assert!(matches!(
        realign("0:00\nOne\n0:01,0:02\nTwo\n", None).unwrap_err(),
        RealignError::AmbiguousEncoding { fields: 2 },
    ));
}

#[test]
fn test_dual_encoding_is_stable() {
    assert!(matches!(
        realign("0:00,0:01\nOne\n0:02\nTwo\n", None).unwrap_err(),
        RealignError::AmbiguousEncoding { fields: 1 },
    ));
}

#[test]
fn test_first_metadata_with_three_fields() {
    assert!(matches!(
        realign("0:00,0:01,0:02\nOne\n", None).unwrap_err(),
        RealignError::AmbiguousEncoding { fields: 3 },
    ));
}

#[test]
fn test_empty_input() {
    assert!(matches!(realign("", None).unwrap_err(), RealignError::EmptyOrHeaderOnlyInput));
    assert!(matches!(
        realign("# only\n# comments\n", None).unwrap_err(),
        RealignError::EmptyOrHeaderOnlyInput,
    ));
    assert!(matches!(
        realign("just some text\n", None).unwrap_err(),
        RealignError::EmptyOrHeaderOnlyInput,
    ));
}

#[test]
fn test_caption_before_timestamp() {
    assert!(matches!(
        realign("Hello\n0:00\nWorld\n", None).unwrap_err(),
        RealignError::CaptionBeforeTimestamp,
    ));
}

#[test]
fn test_malformed_timestamp() {
    assert!(matches!(
        realign("0:00\nOne\n1:x0\n", None).unwrap_err(),
        RealignError::TimestampError { source: TimestampError::MalformedTimestamp { .. } },
    ));
    assert!(matches!(
        realign("0:00,\nOne\n", None).unwrap_err(),
        RealignError::TimestampError { .. },
    ));
}

#[test]
fn test_negative_after_realignment() {
    assert!(matches!(
        realign("0:10\nOne\n0:05\n", Some(0.0)).unwrap_err(),
        RealignError::NegativeTimestamp { .. },
    ));
}

#[test]
fn test_end_before_start() {
    assert!(matches!(
        realign("0:10,0:05\nOne\n0:20,0:25\n", None).unwrap_err(),
        RealignError::EndBeforeStart { .. },
    ));
    assert!(matches!(
        realign("0:10\nOne\n0:05\n", None).unwrap_err(),
        RealignError::EndBeforeStart { .. },
    ));
}

#[test]
fn test_random_single_chaining() {

    let mut rng = thread_rng();
    let mut input = String::new();
    let mut time = rng.gen_range(0..10_000u32) as f64;
    let count = rng.gen_range(2..50);

    for index in 0..count {
        input.push_str(&format!("{}\nCaption {}\n", time, index));
        time += rng.gen_range(1..10_000u32) as f64 / 1000.0;
    }

    let captions = realign(&input, None).unwrap();

    assert_eq!(captions.len(), count);
    for pair in captions.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }

    let last = captions.last().unwrap();

    assert_eq!(last.end, last.start + LAST_CAPTION_DURATION);
}

#[test]
fn test_random_realignment_is_uniform_shift() {

    let mut rng = thread_rng();

    for _ in 0..100 {

        let mut input = String::from("# header\n");
        let mut time = rng.gen_range(0..100_000u32) as f64 / 10.0;
        let first = time;
        let dual = rng.gen::<bool>();

        for index in 0..rng.gen_range(1..20) {
            let start = time;
            time += rng.gen_range(1..5_000u32) as f64 / 1000.0;
            if dual {
                input.push_str(&format!("{},{}\n", start, time));
            } else {
                input.push_str(&format!("{}\n", start));
            }
            input.push_str(&format!("Line {}\n\n", index));
        }

        let target = rng.gen_range(0..100_000u32) as f64 / 10.0;
        let original = realign(&input, None).unwrap();
        let shifted = realign(&input, Some(target)).unwrap();
        let offset = first - target;

        assert_eq!(original.len(), shifted.len());
        for (o, s) in original.iter().zip(shifted.iter()) {
            assert!((o.start - offset - s.start).abs() < 1e-6);
            assert!((o.end - offset - s.end).abs() < 1e-6);
            assert_eq!(o.lines, s.lines);
        }
        assert!((shifted[0].start - target).abs() < 1e-6);
    }
}

#[test]
fn test_adjust_captions() {

    let mut input = Cursor::new("# exported\n0:00:10.000,0:00:12.000\nHello\n\
        0:00:15.000,0:00:18.000\nWorld\r\nagain\n");
    let mut output = vec![];

    assert_eq!(input.adjust_captions(&mut output, Some(0.0)).unwrap(), 2);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "0:00:00.000,0:00:02.000\nHello\n\n0:00:05.000,0:00:08.000\nWorld\nagain\n\n",
    );
}

#[test]
fn test_adjust_captions_keeps_partial_output() {

    let mut input = Cursor::new("0:00\nHello\n0:01\nWorld\n0:02,0:03\nAgain\n");
    let mut output = vec![];

    assert!(matches!(
        input.adjust_captions(&mut output, None).unwrap_err(),
        AdjustError::RealignError { source: RealignError::AmbiguousEncoding { fields: 2 } },
    ));
    assert_eq!(String::from_utf8(output).unwrap(), "0:00:00.000,0:00:01.000\nHello\n\n");
}
