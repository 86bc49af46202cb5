use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::cell::RefCell;

/// An interned binding name.
///
/// Symbols are only meaningful for the [`SymbolInterner`] that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

/// String interner for binding names.
///
/// The runtime is single-threaded, so the tables live behind `RefCell`
/// rather than locks.
#[derive(Debug, Default)]
pub struct SymbolInterner {
    map: RefCell<FxHashMap<SmolStr, Symbol>>,
    strings: RefCell<Vec<SmolStr>>,
}

impl SymbolInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, name: &str) -> Symbol {
        if let Some(&sym) = self.map.borrow().get(name) {
            return sym;
        }

        let mut strings = self.strings.borrow_mut();
        let sym = Symbol(strings.len() as u32);
        let name = SmolStr::new(name);
        strings.push(name.clone());
        self.map.borrow_mut().insert(name, sym);
        sym
    }

    /// Look up the text of a symbol. Unknown symbols resolve to an empty name.
    pub fn resolve(&self, sym: Symbol) -> SmolStr {
        self.strings
            .borrow()
            .get(sym.0 as usize)
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.strings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
