//! Optional observation of the round pipeline.
//!
//! The cipher calls a [`Tracer`] after every transform. [`NoTrace`] compiles
//! to nothing; [`TraceLog`] keeps every snapshot for inspection.

use core::fmt;

use crate::block::State;

/// A single transform of the round pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// XOR with the round key.
    AddRoundKey,
    /// Forward S-box substitution.
    SubBytes,
    /// Inverse S-box substitution.
    InvSubBytes,
    /// Left row rotation.
    ShiftRows,
    /// Right row rotation.
    InvShiftRows,
    /// Forward column mixing.
    MixColumns,
    /// Inverse column mixing.
    InvMixColumns,
}

impl Step {
    /// Stable name of the step.
    pub fn name(self) -> &'static str {
        match self {
            Step::AddRoundKey => "addRoundKey",
            Step::SubBytes => "subBytes",
            Step::InvSubBytes => "invSubBytes",
            Step::ShiftRows => "shiftRows",
            Step::InvShiftRows => "invShiftRows",
            Step::MixColumns => "mixColumns",
            Step::InvMixColumns => "invMixColumns",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives the state after each transform.
pub trait Tracer {
    /// Called once `step` of `round` has been applied.
    fn step(&mut self, round: usize, step: Step, state: &State);
}

/// Tracer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl Tracer for NoTrace {
    #[inline(always)]
    fn step(&mut self, _round: usize, _step: Step, _state: &State) {}
}

/// One recorded snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    /// Round the step belongs to (0..=10).
    pub round: usize,
    /// Transform that produced `state`.
    pub step: Step,
    /// State after the transform.
    pub state: State,
}

/// Tracer collecting every snapshot in order.
#[derive(Clone, Debug, Default)]
pub struct TraceLog {
    entries: Vec<TraceEntry>,
}

impl TraceLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded snapshots, oldest first.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }
}

impl Tracer for TraceLog {
    fn step(&mut self, round: usize, step: Step, state: &State) {
        self.entries.push(TraceEntry {
            round,
            step,
            state: *state,
        });
    }
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn step(&mut self, round: usize, step: Step, state: &State) {
        (**self).step(round, step, state);
    }
}

/// Adapts a closure into a [`Tracer`].
pub struct FnTracer<F>(pub F);

impl<F: FnMut(usize, Step, &State)> Tracer for FnTracer<F> {
    fn step(&mut self, round: usize, step: Step, state: &State) {
        (self.0)(round, step, state);
    }
}
