use std::{collections::HashMap, fmt::Display};

use tracing::debug;

/// Index of a memory cell in the target machine's data area.
pub type Location = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub location: Location,
    /// Line of the first occurrence, which is also the binding site.
    pub first_line: u32,
    /// Lines of every later occurrence, in traversal order.
    pub references: Vec<u32>,
}

impl Symbol {
    /// All lines the variable appears on, first occurrence included.
    pub fn lines(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::once(self.first_line).chain(self.references.iter().copied())
    }
}

/// Variables of a program, in first-seen order.
///
/// Locations are handed out as 0, 1, 2, ... in the order names are first
/// resolved and never change afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    lookup: HashMap<String, Location>,
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Binds `name` on first use, otherwise records another reference.
    ///
    /// # Arguments
    ///
    /// * `name` - The variable name (case-sensitive)
    /// * `line` - Line of this occurrence
    ///
    /// # Returns
    ///
    /// The variable's location, newly allocated or existing.
    pub fn resolve(&mut self, name: &str, line: u32) -> Location {
        if let Some(&location) = self.lookup.get(name) {
            self.symbols[location].references.push(line);
            debug!(name, line, location, "symbol referenced");
            return location;
        }

        let location = self.symbols.len();
        self.lookup.insert(name.to_string(), location);
        self.symbols.push(Symbol {
            name: name.to_string(),
            location,
            first_line: line,
            references: vec![],
        });
        debug!(name, line, location, "symbol inserted");
        location
    }

    /// Looks up a location without recording a reference.
    pub fn location_of(&self, name: &str) -> Option<Location> {
        self.lookup.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.location_of(name).map(|location| &self.symbols[location])
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in location order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Variable Name  Location   Line Numbers")?;
        writeln!(f, "-------------  --------   ------------")?;
        for symbol in self.iter() {
            write!(f, "{:<14} {:<8}  ", symbol.name, symbol.location)?;
            for line in symbol.lines() {
                write!(f, "{:>4} ", line)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
