use crate::{
    lr::{StateId, Step, Tables},
    AstNode, ErrorKind, SymbolId, YalpError, YalpResult,
};

/// Table driven LR parser over a stream of terminal names.
pub struct LrParser<'t, 'g> {
    tables: &'t Tables<'g>,
    stack: Vec<StateId>,
    next: Option<SymbolId>,
    /// Last token read, when it is not a terminal of the grammar.
    unknown: Option<String>,
    consumed: usize,
}

impl<'t, 'g> LrParser<'t, 'g> {
    pub fn new(tables: &'t Tables<'g>) -> Self {
        Self {
            tables,
            stack: vec![0],
            next: None,
            unknown: None,
            consumed: 0,
        }
    }

    /// Lookahead symbol of the last transition.
    ///
    /// `None` when the last token read is not a terminal of the grammar, see
    /// [`LrParser::next_name`].
    pub fn next_symbol(&self) -> Option<SymbolId> {
        self.next
    }

    /// Name of the last token read, whether the grammar knows it or not.
    pub fn next_name(&self) -> Option<&str> {
        self.unknown
            .as_deref()
            .or_else(|| self.next.map(|sym| self.tables.grammar().name(sym)))
    }

    /// Number of terminals shifted so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Current state, the top of the state stack.
    pub fn state(&self) -> StateId {
        self.stack.last().copied().unwrap_or_default()
    }

    /// Parses a whole token stream, `$end` is appended once the stream is exhausted.
    pub fn parse<I, S>(&mut self, input: I) -> YalpResult<AstNode>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let grammar = self.tables.grammar();
        let mut input = input.into_iter();
        let mut nodes: Vec<AstNode> = Vec::default();

        self.stack = vec![0];
        self.next = None;
        self.consumed = 0;

        let mut lookahead = self.read(&mut input)?;

        loop {
            self.next = Some(lookahead);
            let state = self.state();

            match self.tables.step(&mut self.stack, lookahead) {
                Step::Shift(_) => {
                    let name = grammar.name(lookahead);
                    nodes.push(AstNode::leaf(name, name));
                    self.consumed += 1;
                    lookahead = self.read(&mut input)?;
                }
                Step::Reduce { rule, .. } => {
                    let reduced = grammar.rule(rule);
                    let children =
                        nodes.split_off(nodes.len().saturating_sub(reduced.len()));
                    nodes.push(AstNode::reduce(
                        grammar.name(reduced.lhs),
                        rule,
                        children,
                    ));
                }
                Step::Accept => {
                    return nodes.pop().ok_or_else(|| {
                        YalpError::new(ErrorKind::UnexpectedEndOfStream, Some(state))
                    });
                }
                Step::Error(_) | Step::Goto(_) => {
                    let kind = if lookahead == grammar.eos() {
                        ErrorKind::UnexpectedEndOfStream
                    } else {
                        ErrorKind::unexpected_symbol(
                            grammar.name(lookahead),
                            self.tables.expected(state).map(|sym| grammar.name(sym)),
                        )
                    };

                    return Err(YalpError::new(kind, Some(state)));
                }
            }
        }
    }

    fn read<I, S>(&mut self, input: &mut I) -> YalpResult<SymbolId>
    where
        I: Iterator<Item = S>,
        S: AsRef<str>,
    {
        let grammar = self.tables.grammar();
        self.unknown = None;

        let Some(name) = input.next() else {
            return Ok(grammar.eos());
        };

        match grammar
            .symbol_id(name.as_ref())
            .filter(|&sym| grammar.is_terminal(sym))
        {
            Some(sym) => Ok(sym),
            None => {
                self.next = None;
                self.unknown = Some(name.as_ref().to_owned());
                Err(YalpError::new(
                    ErrorKind::unknown_symbol(name.as_ref()),
                    Some(self.state()),
                ))
            }
        }
    }
}
