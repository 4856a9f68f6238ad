//! Grammar representation: interned alphabet, production rules and axiom.
//!
//! Every character that appears in the seed or in a rule is interned into a
//! [`symbios::SymbolTable`] once, so expansion and dispatch work on dense
//! [`SymbolId`]s instead of characters.

use crate::error::LSystemError;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use symbios::SymbolTable;

/// Dense identifier assigned to a symbol by the [`Alphabet`].
pub type SymbolId = u16;

/// An ordered list of symbols. Insertion order is drawing order.
pub type Sequence = Vec<SymbolId>;

/// Two-way mapping between single-character symbols and [`SymbolId`]s.
pub struct Alphabet {
    table: SymbolTable,
    glyphs: Vec<Option<char>>,
}

impl Alphabet {
    pub fn new() -> Self {
        Self {
            table: SymbolTable::new(),
            glyphs: Vec::new(),
        }
    }

    /// Interns `symbol`, returning its ID. Interning an already known symbol
    /// returns the existing ID.
    pub fn intern(&mut self, symbol: char) -> Result<SymbolId, LSystemError> {
        let mut buf = [0u8; 4];
        let name: &str = symbol.encode_utf8(&mut buf);

        if let Some(id) = self.table.resolve_id(name) {
            return Ok(id);
        }

        self.table
            .intern(name)
            .map_err(|e| LSystemError::SymbolTable(format!("{symbol:?}: {e:?}")))?;
        let id = self.table.resolve_id(name).ok_or_else(|| {
            LSystemError::SymbolTable(format!("{symbol:?} missing after interning"))
        })?;

        let idx = id as usize;
        if idx >= self.glyphs.len() {
            self.glyphs.resize(idx + 1, None);
        }
        self.glyphs[idx] = Some(symbol);
        Ok(id)
    }

    /// Looks up the ID of an already interned symbol.
    pub fn resolve(&self, symbol: char) -> Option<SymbolId> {
        let mut buf = [0u8; 4];
        self.table.resolve_id(symbol.encode_utf8(&mut buf))
    }

    /// Returns the character an ID was interned from.
    pub fn glyph(&self, id: SymbolId) -> Option<char> {
        self.glyphs.get(id as usize).copied().flatten()
    }

    /// Interns every character of `text`, in order.
    pub fn encode(&mut self, text: &str) -> Result<Sequence, LSystemError> {
        text.chars().map(|c| self.intern(c)).collect()
    }

    /// Renders a sequence back to text. IDs this alphabet never issued are
    /// rendered as `U+FFFD`.
    pub fn decode(&self, seq: &[SymbolId]) -> String {
        seq.iter()
            .map(|&id| self.glyph(id).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    /// Number of distinct symbols interned so far.
    pub fn len(&self) -> usize {
        self.glyphs.iter().filter(|g| g.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("glyphs", &self.glyphs.iter().flatten().collect::<String>())
            .finish()
    }
}

/// Replacement sequences for non-terminal symbols, indexed by [`SymbolId`].
#[derive(Clone, Debug, Default)]
pub struct ProductionRules {
    rules: Vec<Option<Sequence>>,
}

impl ProductionRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `symbol` a non-terminal rewritten to `replacement`.
    ///
    /// The table grows automatically; gaps stay terminal.
    pub fn set_rule(&mut self, symbol: SymbolId, replacement: Sequence) {
        let idx = symbol as usize;
        if idx >= self.rules.len() {
            self.rules.resize(idx + 1, None);
        }
        self.rules[idx] = Some(replacement);
    }

    /// The replacement for `symbol`, or `None` when it is a terminal.
    pub fn get(&self, symbol: SymbolId) -> Option<&[SymbolId]> {
        self.rules
            .get(symbol as usize)
            .and_then(|r| r.as_deref())
    }

    pub fn is_non_terminal(&self, symbol: SymbolId) -> bool {
        self.get(symbol).is_some()
    }

    /// Number of non-terminals.
    pub fn len(&self) -> usize {
        self.rules.iter().filter(|r| r.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A complete grammar: alphabet, axiom and production rules.
#[derive(Debug)]
pub struct LSystem {
    alphabet: Alphabet,
    axiom: Sequence,
    rules: ProductionRules,
}

impl LSystem {
    /// Builds a grammar from a seed string and a rule map keyed by
    /// single-character strings.
    ///
    /// Fails with [`LSystemError::InvalidParameters`] when a rule key is not
    /// exactly one character.
    pub fn parse(seed: &str, rules: &BTreeMap<String, String>) -> Result<Self, LSystemError> {
        let mut alphabet = Alphabet::new();
        let axiom = alphabet.encode(seed)?;
        let mut table = ProductionRules::new();

        for (key, replacement) in rules {
            let mut chars = key.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(LSystemError::InvalidParameters(format!(
                        "rule key {key:?} must be exactly one character"
                    )));
                }
            };
            let id = alphabet.intern(symbol)?;
            let expansion = alphabet.encode(replacement)?;
            table.set_rule(id, expansion);
        }

        Ok(Self {
            alphabet,
            axiom,
            rules: table,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn axiom(&self) -> &[SymbolId] {
        &self.axiom
    }

    pub fn rules(&self) -> &ProductionRules {
        &self.rules
    }

    /// Every symbol dispatched when drawing `generations` generations: the
    /// axiom itself for zero, otherwise the symbols of generations
    /// `1..=generations`. The axiom is rewritten before anything is drawn.
    pub fn dispatched_symbols(&self, generations: u32) -> HashSet<SymbolId> {
        let mut level: BTreeSet<SymbolId> = self.axiom.iter().copied().collect();
        if generations == 0 {
            return level.into_iter().collect();
        }

        // The symbols of a generation depend only on the symbols of the one
        // before it, so the walk can stop at the first repeated level.
        let mut levels: HashSet<BTreeSet<SymbolId>> = HashSet::new();
        let mut dispatched = HashSet::new();
        for _ in 0..generations {
            level = level
                .iter()
                .flat_map(|s| self.rules.get(*s).unwrap_or(std::slice::from_ref(s)))
                .copied()
                .collect();
            dispatched.extend(level.iter().copied());
            if !levels.insert(level.clone()) {
                break;
            }
        }
        dispatched
    }
}
