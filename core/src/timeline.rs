//! RLE input timeline and playback cursor
//!
//! A [`Timeline`] stores an entire play session as a run-length-encoded
//! sequence of [`Run`]s and owns the single playback/edit cursor. The
//! sequence is always kept in canonical form between operations:
//!
//! 1. every run is at least one frame long;
//! 2. no two adjacent runs share a state (merging is never left pending);
//! 3. the run lengths sum to the total number of defined frames.
//!
//! [`Timeline::overwrite`] and [`Timeline::insert`] splice the sequence at
//! the cursor while re-establishing those invariants, which is what lets a
//! tape be edited mid-playback without breaking its compact representation.

use serde::{Deserialize, Serialize};

use crate::input::InputState;

/// A maximal span of consecutive frames sharing one input state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub state: InputState,
    /// Number of consecutive frames, at least 1 in canonical form.
    pub frames: u32,
}

impl Run {
    pub fn new(state: InputState, frames: u32) -> Self {
        Self { state, frames }
    }
}

/// Playback/edit position: total frames consumed, plus run index and
/// intra-run offset. `run_index == runs.len()` means the cursor is past the
/// end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cursor {
    total_frame: u32,
    run_index: usize,
    offset: u32,
}

/// The canonical RLE sequence of runs plus its cursor.
///
/// The timeline is the sole owner of both; collaborators only read
/// [`Timeline::current_input`] / [`Timeline::finished`] /
/// [`Timeline::current_frame`] and drive the cursor through the four
/// operations.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    runs: Vec<Run>,
    cursor: Cursor,
}

impl Timeline {
    /// Build a timeline from parsed records, establishing canonical form:
    /// zero-length records are dropped and adjacent equal-state records are
    /// coalesced. The cursor starts at frame 0 (finished when no records
    /// survive).
    pub fn new(records: Vec<Run>) -> Self {
        let mut runs: Vec<Run> = Vec::with_capacity(records.len());
        for record in records {
            if record.frames == 0 {
                continue;
            }
            match runs.last_mut() {
                Some(last) if last.state == record.state => last.frames += record.frames,
                _ => runs.push(record),
            }
        }
        Self {
            runs,
            cursor: Cursor::default(),
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Total number of frames currently defined.
    pub fn frame_count(&self) -> u32 {
        self.runs.iter().map(|run| run.frames).sum()
    }

    /// Frames consumed so far by [`Timeline::advance`].
    pub fn current_frame(&self) -> u32 {
        self.cursor.total_frame
    }

    /// Whether the cursor has moved past the last run.
    pub fn finished(&self) -> bool {
        self.cursor.run_index >= self.runs.len()
    }

    /// The run under the cursor, `None` once finished.
    pub fn current_run(&self) -> Option<&Run> {
        self.runs.get(self.cursor.run_index)
    }

    /// This frame's input state, the canonical empty state once finished.
    pub fn current_input(&self) -> InputState {
        self.current_run()
            .map(|run| run.state)
            .unwrap_or(InputState::EMPTY)
    }

    /// Move the cursor forward by exactly one frame.
    ///
    /// Crosses into the next run when the offset leaves the current one,
    /// skipping any (defensively tolerated) zero-length runs. No-op once
    /// finished.
    pub fn advance(&mut self) {
        if self.finished() {
            return;
        }
        self.cursor.total_frame += 1;
        self.cursor.offset += 1;
        while self.cursor.run_index < self.runs.len()
            && self.cursor.offset >= self.runs[self.cursor.run_index].frames
        {
            self.cursor.run_index += 1;
            self.cursor.offset = 0;
        }
    }

    /// Return the cursor to frame 0. The run sequence is untouched.
    pub fn reset(&mut self) {
        self.cursor = Cursor::default();
    }

    /// Replace the content of the current frame only.
    ///
    /// The total frame count is unchanged except when the cursor is past the
    /// end, where the new frame is appended (recording past the end of a
    /// tape). The cursor re-points at the written frame in all cases.
    pub fn overwrite(&mut self, state: InputState) {
        if self.finished() {
            match self.runs.last_mut() {
                Some(last) if last.state == state => last.frames += 1,
                _ => self.runs.push(Run::new(state, 1)),
            }
            self.cursor.run_index = self.runs.len() - 1;
            self.cursor.offset = self.runs[self.cursor.run_index].frames - 1;
            return;
        }

        if self.current_input() == state {
            return;
        }

        let idx = self.cursor.run_index;
        let len = self.runs[idx].frames;
        let off = self.cursor.offset;

        if len == 1 {
            // Singleton: first and last frame coincide, so neither boundary
            // case below applies cleanly. Replace the run and merge outward.
            let merge_prev = idx > 0 && self.runs[idx - 1].state == state;
            let merge_next = idx + 1 < self.runs.len() && self.runs[idx + 1].state == state;
            match (merge_prev, merge_next) {
                (true, true) => {
                    let written_at = self.runs[idx - 1].frames;
                    let absorbed = self.runs[idx + 1].frames;
                    self.runs[idx - 1].frames += 1 + absorbed;
                    self.runs.drain(idx..=idx + 1);
                    self.cursor.run_index = idx - 1;
                    self.cursor.offset = written_at;
                }
                (true, false) => {
                    self.runs[idx - 1].frames += 1;
                    self.runs.remove(idx);
                    self.cursor.run_index = idx - 1;
                    self.cursor.offset = self.runs[idx - 1].frames - 1;
                }
                (false, true) => {
                    self.runs[idx + 1].frames += 1;
                    self.runs.remove(idx);
                    self.cursor.run_index = idx;
                    self.cursor.offset = 0;
                }
                (false, false) => self.runs[idx].state = state,
            }
        } else if off == 0 {
            // First frame: drop it from this run, absorb into the
            // predecessor or splice a singleton before.
            self.runs[idx].frames -= 1;
            if idx > 0 && self.runs[idx - 1].state == state {
                self.runs[idx - 1].frames += 1;
                self.cursor.run_index = idx - 1;
                self.cursor.offset = self.runs[idx - 1].frames - 1;
            } else {
                self.runs.insert(idx, Run::new(state, 1));
                // cursor already sits on the new singleton
            }
        } else if off == len - 1 {
            // Last frame: drop it, absorb into the successor or splice a
            // singleton after.
            self.runs[idx].frames -= 1;
            if idx + 1 < self.runs.len() && self.runs[idx + 1].state == state {
                self.runs[idx + 1].frames += 1;
            } else {
                self.runs.insert(idx + 1, Run::new(state, 1));
            }
            self.cursor.run_index = idx + 1;
            self.cursor.offset = 0;
        } else {
            // Interior: split into before / written singleton / after, where
            // the written frame is consumed from the original run.
            let original = self.runs[idx].state;
            self.runs[idx].frames = off;
            self.runs.insert(idx + 1, Run::new(state, 1));
            self.runs.insert(idx + 2, Run::new(original, len - off - 1));
            self.cursor.run_index = idx + 1;
            self.cursor.offset = 0;
        }
    }

    /// Insert one new frame at the cursor.
    ///
    /// The total frame count grows by exactly one and every frame from the
    /// cursor onward shifts later. The cursor re-points at the inserted
    /// frame.
    pub fn insert(&mut self, state: InputState) {
        if self.runs.is_empty() {
            self.runs.push(Run::new(state, 1));
            self.cursor.run_index = 0;
            self.cursor.offset = 0;
            return;
        }

        if self.finished() {
            // Boundary after the final run.
            let last = self.runs.len() - 1;
            if self.runs[last].state == state {
                self.runs[last].frames += 1;
                self.cursor.run_index = last;
                self.cursor.offset = self.runs[last].frames - 1;
            } else {
                self.runs.push(Run::new(state, 1));
                self.cursor.run_index = self.runs.len() - 1;
                self.cursor.offset = 0;
            }
            return;
        }

        let idx = self.cursor.run_index;
        let off = self.cursor.offset;

        if off == 0 {
            // Run boundary: prefer the run ending just before it, then the
            // run starting at it, then a spliced singleton.
            if idx > 0 && self.runs[idx - 1].state == state {
                self.runs[idx - 1].frames += 1;
                self.cursor.run_index = idx - 1;
                self.cursor.offset = self.runs[idx - 1].frames - 1;
            } else if self.runs[idx].state == state {
                self.runs[idx].frames += 1;
                // inserted frame is the new front of this run; cursor holds
            } else {
                self.runs.insert(idx, Run::new(state, 1));
                // cursor already sits on the new singleton
            }
        } else if self.runs[idx].state == state {
            // Interior, same state: one more frame, no split needed.
            self.runs[idx].frames += 1;
        } else {
            // Interior, different state: split keeping the un-decremented
            // remainder after the insertion point (nothing is consumed).
            let original = self.runs[idx];
            self.runs[idx].frames = off;
            self.runs.insert(idx + 1, Run::new(state, 1));
            self.runs
                .insert(idx + 2, Run::new(original.state, original.frames - off));
            self.cursor.run_index = idx + 1;
            self.cursor.offset = 0;
        }
    }
}
