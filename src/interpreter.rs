//! Symbol-to-operation table and the execution of turtle operations.
//!
//! The entry point is [`ActionTable`]. Construct it with the step length and
//! turn angle, register symbol-to-operation mappings via
//! [`ActionTable::set_op`] or [`ActionTable::populate_standard_symbols`], then
//! hand it to [`LSystemEngine::expand_and_draw`](crate::engine::LSystemEngine::expand_and_draw).

use crate::error::LSystemError;
use crate::grammar::{Alphabet, SymbolId};
use crate::render::{Canvas, RenderContext};
use crate::turtle::{PoseStack, Turtle, TurtleOp};

/// Maps symbol IDs to [`TurtleOp`]s and executes them with a fixed step and angle.
#[derive(Clone, Debug)]
pub struct ActionTable {
    op_map: Vec<TurtleOp>,
    step: f32,
    angle: f32,
}

impl ActionTable {
    /// Creates a table with an empty symbol map.
    ///
    /// `step` is the distance covered by `F` and `f`; `angle` is the turn in
    /// degrees applied by `+` and `-`.
    pub fn new(step: f32, angle: f32) -> Self {
        Self {
            op_map: Vec::new(),
            step,
            angle,
        }
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    ///
    /// Any ID that falls outside `map` resolves to [`TurtleOp::Unrecognized`].
    pub fn with_map(mut self, map: Vec<TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`TurtleOp`] to a symbol ID, growing the map as needed.
    pub fn set_op(&mut self, sym_id: SymbolId, op: TurtleOp) {
        let idx = sym_id as usize;
        if idx >= self.op_map.len() {
            self.op_map.resize(idx + 1, TurtleOp::Unrecognized);
        }
        self.op_map[idx] = op;
    }

    /// Registers the six standard turtle symbols that are present in `alphabet`.
    pub fn populate_standard_symbols(&mut self, alphabet: &Alphabet) {
        let mappings = [
            ('F', TurtleOp::Forward),
            ('f', TurtleOp::Move),
            ('+', TurtleOp::TurnLeft),
            ('-', TurtleOp::TurnRight),
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ];

        for (sym, op) in mappings {
            if let Some(id) = alphabet.resolve(sym) {
                self.set_op(id, op);
            }
        }
    }

    /// The operation bound to `sym_id`.
    pub fn op(&self, sym_id: SymbolId) -> TurtleOp {
        self.op_map
            .get(sym_id as usize)
            .copied()
            .unwrap_or(TurtleOp::Unrecognized)
    }

    pub fn is_action(&self, sym_id: SymbolId) -> bool {
        self.op(sym_id) != TurtleOp::Unrecognized
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Executes `op` against the context.
    ///
    /// Position-changing operations update the bounding box before returning.
    /// Returns `Ok(false)` for [`TurtleOp::Unrecognized`] without touching the
    /// context, and `Ok(true)` otherwise. Popping an empty `stack` leaves the
    /// context untouched and fails with [`StackUnderflow`].
    pub fn execute<T: Turtle, C: Canvas>(
        &self,
        op: TurtleOp,
        ctx: &mut RenderContext<T, C>,
        stack: &mut PoseStack,
    ) -> Result<bool, StackUnderflow> {
        match op {
            TurtleOp::Forward => ctx.turtle.forward(self.step),
            TurtleOp::Move => {
                ctx.turtle.pen_up();
                ctx.turtle.forward(self.step);
                ctx.turtle.pen_down();
            }
            TurtleOp::TurnLeft => ctx.turtle.turn_left(self.angle),
            TurtleOp::TurnRight => ctx.turtle.turn_right(self.angle),
            TurtleOp::Push => stack.push(ctx.turtle.pose()),
            TurtleOp::Pop => {
                let pose = stack.pop().ok_or(StackUnderflow)?;
                ctx.turtle.set_pose(pose);
            }
            TurtleOp::Unrecognized => return Ok(false),
        }
        if op.moves() {
            ctx.observe_position();
        }
        Ok(true)
    }
}

/// `]` was executed with nothing on the pose stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackUnderflow;

impl StackUnderflow {
    /// Attaches the position of the offending symbol.
    pub fn at(self, symbol: char, generation: u32, index: usize) -> LSystemError {
        LSystemError::UnbalancedStack {
            symbol,
            generation,
            index,
        }
    }
}
