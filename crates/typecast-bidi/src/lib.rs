// this_file: crates/typecast-bidi/src/lib.rs

//! Bidirectional run segmentation for a single line of text.
//!
//! A line is reordered visually (UAX #9 rules up to L2), then cut into
//! maximal groups whose embedding levels share the same parity. Odd groups
//! are turned back into logical order so the shaper receives text the way it
//! expects it; the runs themselves come out left to right as they will sit
//! on the line.

use typecast_core::types::{Direction, RunInfo, TextRun};
use unicode_bidi::{BidiInfo, Level};

/// Runs for one line together with their bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Visual left-to-right order
    pub runs: Vec<TextRun>,
    /// Parallel to `runs`
    pub run_info: Vec<RunInfo>,
    /// Cursor to hand to the next line
    pub next_run_id: usize,
}

/// Splits lines into directionally uniform runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct BidiSegmenter;

impl BidiSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Segment `line`, numbering runs from `run_id_cursor`.
    ///
    /// The base direction comes from the first strong character. Run ids
    /// follow reading order: left to right on LTR lines, right to left on
    /// RTL lines. An empty line yields no runs and leaves the cursor alone.
    pub fn segment(&self, line: &str, run_id_cursor: usize) -> Segmentation {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            return Segmentation {
                next_run_id: run_id_cursor,
                ..Segmentation::default()
            };
        }

        let info = BidiInfo::new(line, None);
        let line_is_rtl = info
            .paragraphs
            .first()
            .map(|para| para.level.is_rtl())
            .unwrap_or(false);

        let (visual, levels) = visual_order(line, &info, chars.len());
        let groups = parity_groups(&visual, &levels);

        let count = groups.len();
        let mut runs = Vec::with_capacity(count);
        let mut run_info = Vec::with_capacity(count);

        for (position, group) in groups.into_iter().enumerate() {
            let run_id = if line_is_rtl {
                run_id_cursor + (count - 1 - position)
            } else {
                run_id_cursor + position
            };

            let mut indices = group.indices;
            if group.odd {
                indices.reverse();
            }
            let start = indices.iter().copied().min().unwrap_or(0);
            let text: String = indices.iter().map(|&idx| chars[idx]).collect();

            runs.push(TextRun {
                text,
                direction: if group.odd {
                    Direction::RightToLeft
                } else {
                    Direction::LeftToRight
                },
                bidi_level: group.level,
                start,
            });
            run_info.push(RunInfo {
                run_id,
                is_level_odd: group.odd,
                line_is_rtl,
            });
        }

        log::debug!(
            "Segmented line of {} chars into {} runs (rtl base: {})",
            chars.len(),
            count,
            line_is_rtl
        );

        Segmentation {
            runs,
            run_info,
            next_run_id: run_id_cursor + count,
        }
    }

    /// Like [`segment`](Self::segment), appending run info to a list the
    /// caller keeps across lines. Returns the runs and the next cursor.
    pub fn segment_into(
        &self,
        line: &str,
        run_id_cursor: usize,
        run_info: &mut Vec<RunInfo>,
    ) -> (Vec<TextRun>, usize) {
        let segmentation = self.segment(line, run_id_cursor);
        run_info.extend(segmentation.run_info);
        (segmentation.runs, segmentation.next_run_id)
    }
}

struct ParityGroup {
    odd: bool,
    /// Lowest embedding level inside the group
    level: u8,
    /// Logical char indices in visual order
    indices: Vec<usize>,
}

/// Visual-to-logical char map for the whole line, plus each char's level
/// after line rule L1.
fn visual_order(line: &str, info: &BidiInfo<'_>, char_count: usize) -> (Vec<usize>, Vec<Level>) {
    let byte_starts: Vec<usize> = line.char_indices().map(|(byte, _)| byte).collect();
    let mut visual = Vec::with_capacity(char_count);
    let mut levels = vec![Level::ltr(); char_count];

    for para in &info.paragraphs {
        let per_char = info.reordered_levels_per_char(para, para.range.clone());
        let members: Vec<usize> = byte_starts
            .iter()
            .enumerate()
            .filter(|(_, byte)| para.range.contains(*byte))
            .map(|(idx, _)| idx)
            .collect();
        let para_levels: Vec<Level> = members.iter().map(|&idx| per_char[idx]).collect();

        for (&idx, &level) in members.iter().zip(&para_levels) {
            levels[idx] = level;
        }
        for position in BidiInfo::reorder_visual(&para_levels) {
            visual.push(members[position]);
        }
    }

    (visual, levels)
}

fn parity_groups(visual: &[usize], levels: &[Level]) -> Vec<ParityGroup> {
    let mut groups: Vec<ParityGroup> = Vec::new();
    for &idx in visual {
        let level = levels[idx];
        let odd = level.is_rtl();
        match groups.last_mut() {
            Some(group) if group.odd == odd => {
                group.level = group.level.min(level.number());
                group.indices.push(idx);
            }
            _ => groups.push(ParityGroup {
                odd,
                level: level.number(),
                indices: vec![idx],
            }),
        }
    }
    groups
}


#[cfg(test)]
mod proptests;
