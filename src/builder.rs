use std::collections::BTreeMap;

use crate::{
    Assoc, ErrorKind, Fixity, Grammar, Rule, RuleDef, Symbol, SymbolKind, YalpResult, ACCEPT, EOS,
};

/// A symbol as declared to the builder, before it gets a stable index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDef {
    pub name: String,
    pub kind: SymbolKind,
    pub code: Option<u32>,
    pub fixity: Option<Fixity>,
    pub type_tag: Option<String>,
}

/// Collects declarations and rules, then finalizes them into a [`Grammar`].
///
/// # Example
///
/// ```
/// use yalp_lalr::{Assoc, GrammarBuilder};
///
/// let mut builder = GrammarBuilder::default();
/// builder
///     .terminal("id")?
///     .precedence(Assoc::Left, ["'+'"])?
///     .precedence(Assoc::Left, ["'*'"])?
///     .rule("S", ["E"])?
///     .rule("E", ["E", "'+'", "E"])?
///     .rule("E", ["E", "'*'", "E"])?
///     .rule("E", ["id"])?;
///
/// let grammar = builder.build()?;
/// assert_eq!(grammar.name(grammar.start()), "S");
/// # Ok::<(), yalp_lalr::YalpError>(())
/// ```
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    symbols: Vec<SymbolDef>,
    by_name: BTreeMap<String, usize>,
    by_code: BTreeMap<u32, usize>,
    rules: Vec<RuleDef>,
    start: Option<String>,
    /// Last precedence level handed out.
    level: usize,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a terminal symbol.
    ///
    /// Returns an error if a symbol with the same name already exists.
    pub fn terminal(&mut self, name: &str) -> YalpResult<&mut Self> {
        self.declare(name, SymbolKind::Terminal)?;
        Ok(self)
    }

    /// Declares a non-terminal symbol.
    ///
    /// Returns an error if a symbol with the same name already exists.
    pub fn non_terminal(&mut self, name: &str) -> YalpResult<&mut Self> {
        self.declare(name, SymbolKind::NonTerminal)?;
        Ok(self)
    }

    /// Sets the start symbol. Defaults to the left-hand side of the first rule.
    pub fn start(&mut self, name: &str) -> &mut Self {
        self.start = Some(name.to_owned());
        self
    }

    /// Attaches a semantic type to a symbol, creating it as a non-terminal if absent.
    pub fn type_tag(&mut self, name: &str, tag: &str) -> YalpResult<&mut Self> {
        let kind = self
            .get(name)
            .map(|def| def.kind)
            .unwrap_or(SymbolKind::NonTerminal);
        self.find_or_add(name, kind)?.type_tag = Some(tag.to_owned());
        Ok(self)
    }

    /// Declares one precedence level, binding tighter than every level declared before.
    pub fn precedence<I, S>(&mut self, assoc: Assoc, terminals: I) -> YalpResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.level += 1;
        let fixity = Fixity::new(assoc, self.level);

        for name in terminals {
            self.find_or_add(name.as_ref(), SymbolKind::Terminal)?.fixity = Some(fixity);
        }

        Ok(self)
    }

    /// Adds a rule `lhs := rhs`.
    pub fn rule<I, S>(&mut self, lhs: &str, rhs: I) -> YalpResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_rule(RuleDef::new(lhs, rhs))
    }

    /// Adds a rule definition.
    ///
    /// Unknown right-hand side names are created on the fly: quoted literals
    /// (`'+'`) as terminals, anything else as non-terminals.
    pub fn add_rule(&mut self, def: RuleDef) -> YalpResult<&mut Self> {
        if self
            .get(&def.lhs)
            .is_some_and(|sym| sym.kind == SymbolKind::Terminal)
        {
            return Err(ErrorKind::TerminalOnLhs(def.lhs).into());
        }
        self.find_or_add(&def.lhs, SymbolKind::NonTerminal)?;

        for name in def.rhs.iter() {
            if self.get(name).is_none() {
                let kind = match literal_code(name) {
                    Some(_) => SymbolKind::Terminal,
                    None => SymbolKind::NonTerminal,
                };
                self.find_or_add(name, kind)?;
            }
        }

        if let Some(prec) = def.prec.as_deref() {
            match self.get(prec) {
                Some(sym) if sym.kind == SymbolKind::Terminal => {}
                Some(_) => return Err(ErrorKind::KindMismatch(prec.to_owned()).into()),
                None => return Err(ErrorKind::unknown_symbol(prec).into()),
            }
        }

        self.rules.push(def);
        Ok(self)
    }

    /// Returns the symbol with the given name, creating it if absent.
    ///
    /// Fails if the symbol exists with another kind.
    pub fn find_or_add(&mut self, name: &str, kind: SymbolKind) -> YalpResult<&mut SymbolDef> {
        let index = match self.by_name.get(name).copied() {
            Some(index) if self.symbols[index].kind != kind => {
                return Err(ErrorKind::KindMismatch(name.to_owned()).into())
            }
            Some(index) => index,
            None => self.declare(name, kind)?,
        };

        Ok(&mut self.symbols[index])
    }

    /// Returns the literal terminal with the given character code, creating it if absent.
    pub fn find_or_add_literal(&mut self, code: u32) -> YalpResult<&mut SymbolDef> {
        let index = match self.by_code.get(&code).copied() {
            Some(index) => index,
            None => {
                let name = literal_name(code);
                let index = match self.by_name.get(&name).copied() {
                    Some(index) if self.symbols[index].kind == SymbolKind::Terminal => index,
                    Some(_) => return Err(ErrorKind::KindMismatch(name).into()),
                    None => self.declare(&name, SymbolKind::Terminal)?,
                };
                self.symbols[index].code = Some(code);
                self.by_code.insert(code, index);
                index
            }
        };

        Ok(&mut self.symbols[index])
    }

    pub fn get(&self, name: &str) -> Option<&SymbolDef> {
        self.by_name.get(name).map(|&index| &self.symbols[index])
    }

    pub fn get_literal(&self, code: u32) -> Option<&SymbolDef> {
        self.by_code.get(&code).map(|&index| &self.symbols[index])
    }

    fn declare(&mut self, name: &str, kind: SymbolKind) -> YalpResult<usize> {
        if name == EOS || name == ACCEPT {
            return Err(ErrorKind::DuplicatedSymbol(name.to_owned()).into());
        }

        if let Some(&index) = self.by_name.get(name) {
            return Err(if self.symbols[index].kind == kind {
                ErrorKind::DuplicatedSymbol(name.to_owned())
            } else {
                ErrorKind::KindMismatch(name.to_owned())
            }
            .into());
        }

        let index = self.symbols.len();
        self.symbols.push(SymbolDef {
            name: name.to_owned(),
            kind,
            code: None,
            fixity: None,
            type_tag: None,
        });
        self.by_name.insert(name.to_owned(), index);

        if kind == SymbolKind::Terminal {
            if let Some(code) = literal_code(name) {
                self.symbols[index].code = Some(code);
                self.by_code.entry(code).or_insert(index);
            }
        }

        Ok(index)
    }

    /// Finalizes the grammar.
    ///
    /// Non-terminals get the low indices with the start symbol first and the
    /// internal `$accept` last; terminals follow with `$end` last. Rule 0 is
    /// `$accept -> start $end`, user rules follow in declaration order.
    pub fn build(self) -> YalpResult<Grammar> {
        let Self {
            symbols: defs,
            by_name,
            rules: rule_defs,
            start,
            ..
        } = self;

        if !defs.iter().any(|def| def.kind == SymbolKind::NonTerminal) {
            return Err(ErrorKind::NoNonTerminals.into());
        }

        let start_name = start
            .or_else(|| rule_defs.first().map(|def| def.lhs.clone()))
            .ok_or(ErrorKind::NoNonTerminals)?;

        let start = by_name
            .get(&start_name)
            .copied()
            .filter(|&index| defs[index].kind == SymbolKind::NonTerminal)
            .ok_or_else(|| ErrorKind::UndefinedStart(start_name.clone()))?;

        let order = std::iter::once(start)
            .chain((0..defs.len()).filter(|&index| {
                index != start && defs[index].kind == SymbolKind::NonTerminal
            }))
            .collect::<Vec<_>>();

        let nb_non_terminals = order.len() + 1;
        let accept = order.len();

        let order = order
            .into_iter()
            .chain((0..defs.len()).filter(|&index| defs[index].kind == SymbolKind::Terminal))
            .collect::<Vec<_>>();

        let mut ids = vec![0; defs.len()];
        let mut symbols = Vec::with_capacity(defs.len() + 2);

        for (position, &index) in order.iter().enumerate() {
            if position == accept {
                symbols.push(Symbol::new(accept, ACCEPT, SymbolKind::NonTerminal));
            }

            let id = symbols.len();
            let def = &defs[index];
            ids[index] = id;
            symbols.push(Symbol {
                id,
                name: def.name.clone(),
                kind: def.kind,
                code: def.code,
                fixity: def.fixity,
                type_tag: def.type_tag.clone(),
            });
        }

        if symbols.len() == accept {
            symbols.push(Symbol::new(accept, ACCEPT, SymbolKind::NonTerminal));
        }

        let eos = symbols.len();
        symbols.push(Symbol::new(eos, EOS, SymbolKind::Terminal));

        let resolve = |name: &str| {
            by_name
                .get(name)
                .map(|&index| ids[index])
                .ok_or_else(|| ErrorKind::unknown_symbol(name))
        };

        let mut rules = vec![Rule {
            id: 0,
            lhs: accept,
            rhs: vec![ids[start], eos],
            fixity: None,
        }];

        for def in rule_defs.iter() {
            let rhs = def
                .rhs
                .iter()
                .map(|name| resolve(name))
                .collect::<Result<Vec<_>, _>>()?;

            let fixity = match def.prec.as_deref() {
                Some(prec) => symbols[resolve(prec)?].fixity,
                None => rhs
                    .iter()
                    .rev()
                    .map(|&sym| &symbols[sym])
                    .find(|sym| sym.is_terminal() && sym.has_fixity())
                    .and_then(|sym| sym.fixity),
            };

            rules.push(Rule {
                id: rules.len(),
                lhs: resolve(&def.lhs)?,
                rhs,
                fixity,
            });
        }

        Grammar::new(symbols, rules, nb_non_terminals)
    }
}

/// Character code of a quoted single-character literal (`'+'`).
fn literal_code(name: &str) -> Option<u32> {
    let inner = name.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = inner.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c as u32),
        _ => None,
    }
}

/// Name of a literal terminal. Valid characters are spelled the way
/// [`literal_code`] reads them back.
fn literal_name(code: u32) -> String {
    match char::from_u32(code) {
        Some(c) => format!("'{c}'"),
        None => format!("'\\u{{{code:x}}}'"),
    }
}
