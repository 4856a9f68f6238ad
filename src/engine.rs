//! [`LSystemEngine`] — rewrites a seed through N generations and draws every
//! generation as it is produced.
//!
//! ## Run protocol
//!
//! 1. **Rewrite** — each symbol of the current sequence is replaced by its
//!    production, or by itself when it is a terminal.
//! 2. **Dispatch** — every symbol of every replacement is executed through the
//!    [`ActionTable`] immediately, before the next symbol is rewritten.
//! 3. **Repeat** — the rewritten sequence becomes the input of the next
//!    generation. The drawing of each generation lands on top of the previous
//!    ones, so the bounding box reflects every intermediate generation.
//!
//! With zero generations the seed is dispatched once as-is.

use std::collections::BTreeMap;
use std::convert::Infallible;

use glam::Vec2;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::bounds::BoundingBox;
use crate::config::LSystemParams;
use crate::error::LSystemError;
use crate::grammar::{LSystem, Sequence, SymbolId};
use crate::interpreter::ActionTable;
use crate::render::{Canvas, RenderContext};
use crate::turtle::{PoseStack, Turtle};

/// Summary of a completed run.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    /// Number of rewriting passes performed.
    pub generations: u32,
    /// Symbols handed to the action table, across all generations.
    pub symbols_dispatched: usize,
    /// Occurrences of each symbol that had no drawing meaning.
    pub unknown_symbols: BTreeMap<char, usize>,
    pub bounding_box: BoundingBox,
    pub canvas_size: Vec2,
    /// Poses still on the stack when the run ended. Zero for balanced grammars.
    pub open_branches: usize,
    /// The sequence produced by the last generation.
    pub final_sequence: String,
}

impl RunReport {
    pub fn unknown_count(&self) -> usize {
        self.unknown_symbols.values().sum()
    }
}

/// Expands a grammar for a fixed number of generations.
///
/// The engine holds no drawing state; every call to
/// [`expand_and_draw`](Self::expand_and_draw) starts from the axiom.
#[derive(Debug)]
pub struct LSystemEngine {
    grammar: LSystem,
    generations: u32,
}

impl LSystemEngine {
    pub fn new(grammar: LSystem, generations: u32) -> Self {
        Self {
            grammar,
            generations,
        }
    }

    /// Validates `params` and builds the engine together with its action table.
    ///
    /// Fails fast with [`LSystemError::InvalidParameters`] when the parameters
    /// can never produce a drawing.
    pub fn from_params(params: &LSystemParams) -> Result<(Self, ActionTable), LSystemError> {
        params.validate()?;
        let grammar = LSystem::parse(&params.seed, &params.rules)?;

        let mut actions = ActionTable::new(params.step, params.angle);
        actions.populate_standard_symbols(grammar.alphabet());

        let engine = Self::new(grammar, params.generations);
        engine.check_drawable(&actions)?;
        Ok((engine, actions))
    }

    pub fn grammar(&self) -> &LSystem {
        &self.grammar
    }

    pub fn generations(&self) -> u32 {
        self.generations
    }

    /// Rejects grammars in which no symbol with a drawing action can ever be dispatched.
    pub fn check_drawable(&self, actions: &ActionTable) -> Result<(), LSystemError> {
        let dispatched = self.grammar.dispatched_symbols(self.generations);

        if dispatched.iter().any(|&sym| actions.is_action(sym)) {
            Ok(())
        } else {
            Err(LSystemError::InvalidParameters(format!(
                "no drawing action is dispatched within {} generation(s) of seed {:?}",
                self.generations,
                self.grammar.alphabet().decode(self.grammar.axiom())
            )))
        }
    }

    /// Applies the production rules once to `current`.
    pub fn rewrite(&self, current: &[SymbolId]) -> Sequence {
        let rules = self.grammar.rules();
        let mut next = Sequence::with_capacity(current.len());
        for &sym in current {
            match rules.get(sym) {
                Some(expansion) => next.extend_from_slice(expansion),
                None => next.push(sym),
            }
        }
        next
    }

    /// Walks the expansion, calling `visit(generation, index, symbol)` for
    /// every symbol in the order it is produced.
    ///
    /// `generation` is `0` for the single pass over the seed when no rewriting
    /// is configured, and `1..=generations` otherwise. `index` is the symbol's
    /// position in that generation's sequence. The first error from `visit`
    /// aborts the walk.
    pub fn expand_with<E, F>(&self, mut visit: F) -> Result<Sequence, E>
    where
        F: FnMut(u32, usize, SymbolId) -> Result<(), E>,
    {
        let axiom = self.grammar.axiom();
        if self.generations == 0 {
            for (index, &sym) in axiom.iter().enumerate() {
                visit(0, index, sym)?;
            }
            return Ok(axiom.to_vec());
        }

        let rules = self.grammar.rules();
        let mut current = axiom.to_vec();
        for generation in 1..=self.generations {
            let mut next = Sequence::with_capacity(current.len());
            for &sym in &current {
                let terminal = [sym];
                let expansion = rules.get(sym).unwrap_or(&terminal[..]);
                for &produced in expansion {
                    visit(generation, next.len(), produced)?;
                    next.push(produced);
                }
            }
            debug!(generation, symbols = next.len(), "generation expanded");
            current = next;
        }
        Ok(current)
    }

    /// The final sequence, without dispatching anything.
    pub fn expand(&self) -> Sequence {
        match self.expand_with(|_, _, _| Ok::<(), Infallible>(())) {
            Ok(seq) => seq,
            Err(never) => match never {},
        }
    }

    /// Expands the grammar and draws every generation through `actions` into `ctx`.
    ///
    /// Unknown symbols are logged and counted. A `]` with an empty pose stack
    /// aborts the run with [`LSystemError::UnbalancedStack`] before anything
    /// else is drawn.
    pub fn expand_and_draw<T: Turtle, C: Canvas>(
        &self,
        actions: &ActionTable,
        ctx: &mut RenderContext<T, C>,
    ) -> Result<RunReport, LSystemError> {
        let alphabet = self.grammar.alphabet();
        let mut stack = PoseStack::new();
        let mut unknown_symbols: BTreeMap<char, usize> = BTreeMap::new();
        let mut symbols_dispatched = 0usize;

        let final_sequence = self.expand_with(|generation, index, sym| {
            let glyph = alphabet.glyph(sym).unwrap_or(char::REPLACEMENT_CHARACTER);
            symbols_dispatched += 1;

            let recognized = actions
                .execute(actions.op(sym), ctx, &mut stack)
                .map_err(|underflow| underflow.at(glyph, generation, index))?;
            if !recognized {
                warn!(symbol = %glyph, generation, index, "unknown action");
                *unknown_symbols.entry(glyph).or_default() += 1;
            }
            Ok::<(), LSystemError>(())
        })?;

        if !stack.is_empty() {
            warn!(depth = stack.depth(), "run ended with unmatched '['");
        }

        let report = RunReport {
            generations: self.generations,
            symbols_dispatched,
            unknown_symbols,
            bounding_box: ctx.bounding_box(),
            canvas_size: ctx.bounds().canvas_size(),
            open_branches: stack.depth(),
            final_sequence: alphabet.decode(&final_sequence),
        };
        info!(
            generations = report.generations,
            symbols = report.symbols_dispatched,
            unknown = report.unknown_count(),
            "done"
        );
        Ok(report)
    }
}

/// Runs an L-System described by `params` against `ctx`.
///
/// This is the single-call entry point: generations, step, angle, seed and
/// rules all come from `params`.
pub fn draw_lsystem<T: Turtle, C: Canvas>(
    params: &LSystemParams,
    ctx: &mut RenderContext<T, C>,
) -> Result<RunReport, LSystemError> {
    let (engine, actions) = LSystemEngine::from_params(params)?;
    engine.expand_and_draw(&actions, ctx)
}
