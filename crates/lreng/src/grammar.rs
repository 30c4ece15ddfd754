//! Operator table: symbols, precedence, associativity and bracket pairs

use serde::Serialize;

/// Every operator the lexer, parser and evaluator know about.
///
/// Some operators never appear in source text: the lexer rewrites `+`/`-`
/// into [`Operator::Pos`]/[`Operator::Neg`] in prefix position and `(` into
/// [`Operator::CallOpen`] after an operand, and the parser replaces a closed
/// `{ }` pair by [`Operator::FuncMaker`] and a closed call pair by
/// [`Operator::Call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    // ═══════════════════════════════════════════════════════════════════
    // Brackets
    // ═══════════════════════════════════════════════════════════════════
    /// `{` opening a function body
    BodyOpen,
    /// `}` closing a function body
    BodyClose,
    /// Marker emitted for a closed function body
    FuncMaker,
    /// `(` used for grouping
    GroupOpen,
    /// `)`
    GroupClose,
    /// `(` directly after an operand, opening call arguments
    CallOpen,

    // ═══════════════════════════════════════════════════════════════════
    // Unary
    // ═══════════════════════════════════════════════════════════════════
    /// Unary `+`
    Pos,
    /// Unary `-`
    Neg,
    /// `!`
    Not,
    /// `` ` ``, left element of a pair
    PairLeft,
    /// `~`, right element of a pair
    PairRight,

    // ═══════════════════════════════════════════════════════════════════
    // Binary
    // ═══════════════════════════════════════════════════════════════════
    /// `^`
    Pow,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `&`, non-short-circuit logic and
    And,
    /// `|`, non-short-circuit logic or
    Or,
    /// `,`
    MakePair,
    /// `$`, right-associative function caller
    Call,
    /// `=>`, binds a parameter name to a function
    Bind,
    /// `&&`
    CondAnd,
    /// `||`
    CondOr,
    /// `=`
    Assign,
    /// `?`, calls the left or right function of a pair
    CondCall,
    /// `;`
    Seq,
}

impl Operator {
    /// Operators that can be written directly in source text.
    pub const SOURCE: &'static [Operator] = &[
        Operator::BodyOpen,
        Operator::BodyClose,
        Operator::GroupOpen,
        Operator::GroupClose,
        Operator::Not,
        Operator::PairLeft,
        Operator::PairRight,
        Operator::Pow,
        Operator::Mul,
        Operator::Div,
        Operator::Rem,
        Operator::Add,
        Operator::Sub,
        Operator::Lt,
        Operator::Le,
        Operator::Gt,
        Operator::Ge,
        Operator::Eq,
        Operator::Ne,
        Operator::And,
        Operator::Or,
        Operator::MakePair,
        Operator::Call,
        Operator::Bind,
        Operator::CondAnd,
        Operator::CondOr,
        Operator::Assign,
        Operator::CondCall,
        Operator::Seq,
    ];

    /// The spelling of the operator. Rewritten operators share the spelling
    /// of their source form.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::BodyOpen => "{",
            Operator::BodyClose => "}",
            Operator::FuncMaker => "{}",
            Operator::GroupOpen | Operator::CallOpen => "(",
            Operator::GroupClose => ")",
            Operator::Pos | Operator::Add => "+",
            Operator::Neg | Operator::Sub => "-",
            Operator::Not => "!",
            Operator::PairLeft => "`",
            Operator::PairRight => "~",
            Operator::Pow => "^",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::And => "&",
            Operator::Or => "|",
            Operator::MakePair => ",",
            Operator::Call => "$",
            Operator::Bind => "=>",
            Operator::CondAnd => "&&",
            Operator::CondOr => "||",
            Operator::Assign => "=",
            Operator::CondCall => "?",
            Operator::Seq => ";",
        }
    }

    /// Look up a source-level operator by its spelling.
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        Self::SOURCE.iter().copied().find(|op| op.symbol() == symbol)
    }

    /// A short human description, used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Operator::BodyOpen | Operator::BodyClose => "function body bracket",
            Operator::FuncMaker => "function maker",
            Operator::GroupOpen | Operator::GroupClose => "parenthesis",
            Operator::CallOpen => "call parenthesis",
            Operator::Pos => "unary plus",
            Operator::Neg => "unary minus",
            Operator::Not => "logic not",
            Operator::PairLeft => "left of pair",
            Operator::PairRight => "right of pair",
            Operator::Pow => "power",
            Operator::Mul => "multiplication",
            Operator::Div => "division",
            Operator::Rem => "remainder",
            Operator::Add => "addition",
            Operator::Sub => "subtraction",
            Operator::Lt => "less than",
            Operator::Le => "less or equal",
            Operator::Gt => "greater than",
            Operator::Ge => "greater or equal",
            Operator::Eq => "equal",
            Operator::Ne => "not equal",
            Operator::And => "logic and",
            Operator::Or => "logic or",
            Operator::MakePair => "pair maker",
            Operator::Call => "function call",
            Operator::Bind => "argument binder",
            Operator::CondAnd => "short-circuit and",
            Operator::CondOr => "short-circuit or",
            Operator::Assign => "assignment",
            Operator::CondCall => "conditional pair call",
            Operator::Seq => "expression separator",
        }
    }

    /// Binding strength; larger binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Seq => 1,
            Operator::Assign | Operator::CondCall => 2,
            Operator::CondOr => 3,
            Operator::CondAnd => 4,
            Operator::Bind => 5,
            Operator::Call => 6,
            Operator::MakePair => 7,
            Operator::Or => 8,
            Operator::And => 9,
            Operator::Eq | Operator::Ne => 10,
            Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge => 11,
            Operator::Add | Operator::Sub => 12,
            Operator::Mul | Operator::Div | Operator::Rem => 13,
            Operator::Pow => 14,
            Operator::Pos
            | Operator::Neg
            | Operator::Not
            | Operator::PairLeft
            | Operator::PairRight => 15,
            Operator::GroupOpen | Operator::GroupClose | Operator::CallOpen => 16,
            Operator::BodyOpen | Operator::BodyClose | Operator::FuncMaker => 17,
        }
    }

    /// Right-associative operators group `a op b op c` as `a op (b op c)`.
    pub fn is_right_assoc(self) -> bool {
        self.is_unary()
            || matches!(
                self,
                Operator::Pow
                    | Operator::Call
                    | Operator::MakePair
                    | Operator::Bind
                    | Operator::CondCall
                    | Operator::Assign
            )
    }

    /// Operators that take a single operand (stored as the node's left child).
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Operator::FuncMaker
                | Operator::Pos
                | Operator::Neg
                | Operator::Not
                | Operator::PairLeft
                | Operator::PairRight
        )
    }

    /// `{`, `(` and call `(`.
    pub fn is_opening_bracket(self) -> bool {
        matches!(
            self,
            Operator::BodyOpen | Operator::GroupOpen | Operator::CallOpen
        )
    }

    /// `}` and `)`.
    pub fn is_closing_bracket(self) -> bool {
        matches!(self, Operator::BodyClose | Operator::GroupClose)
    }

    /// Operators that may appear where an operand is expected.
    pub fn is_prefix(self) -> bool {
        matches!(
            self,
            Operator::BodyOpen
                | Operator::GroupOpen
                | Operator::Pos
                | Operator::Neg
                | Operator::Not
                | Operator::PairLeft
                | Operator::PairRight
        )
    }

    /// How `self` (an opening bracket) pairs with the closing bracket `close`.
    pub fn close_with(self, close: Operator) -> BracketMatch {
        match (self, close) {
            (Operator::GroupOpen, Operator::GroupClose) => BracketMatch::Grouping,
            (Operator::CallOpen, Operator::GroupClose) => BracketMatch::Marker(Operator::Call),
            (Operator::BodyOpen, Operator::BodyClose) => {
                BracketMatch::Marker(Operator::FuncMaker)
            }
            _ => BracketMatch::Mismatch,
        }
    }
}

/// Result of closing an opening bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketMatch {
    /// Plain parentheses; nothing is emitted
    Grouping,
    /// The pair is replaced by this operator
    Marker(Operator),
    /// The brackets do not belong together
    Mismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_symbols_round_trip() {
        for op in Operator::SOURCE {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(*op));
        }
    }

    #[test]
    fn test_rewritten_operators_are_not_source_level() {
        assert_eq!(Operator::from_symbol("-"), Some(Operator::Sub));
        assert_eq!(Operator::from_symbol("("), Some(Operator::GroupOpen));
        assert_eq!(Operator::from_symbol("@"), None);
        assert_eq!(Operator::from_symbol("!-"), None);
    }

    #[test]
    fn test_precedence_ladder() {
        let ladder = [
            Operator::Seq,
            Operator::Assign,
            Operator::CondOr,
            Operator::CondAnd,
            Operator::Bind,
            Operator::Call,
            Operator::MakePair,
            Operator::Or,
            Operator::And,
            Operator::Eq,
            Operator::Lt,
            Operator::Add,
            Operator::Mul,
            Operator::Pow,
            Operator::Neg,
            Operator::GroupOpen,
            Operator::BodyOpen,
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0].precedence() < pair[1].precedence(), "{pair:?}");
        }
        assert_eq!(
            Operator::Assign.precedence(),
            Operator::CondCall.precedence()
        );
    }

    #[test]
    fn test_associativity() {
        assert!(Operator::Pow.is_right_assoc());
        assert!(Operator::Assign.is_right_assoc());
        assert!(Operator::Neg.is_right_assoc());
        assert!(!Operator::Sub.is_right_assoc());
        assert!(!Operator::Seq.is_right_assoc());
    }

    #[test]
    fn test_bracket_pairs() {
        assert_eq!(
            Operator::CallOpen.close_with(Operator::GroupClose),
            BracketMatch::Marker(Operator::Call)
        );
        assert_eq!(
            Operator::BodyOpen.close_with(Operator::BodyClose),
            BracketMatch::Marker(Operator::FuncMaker)
        );
        assert_eq!(
            Operator::GroupOpen.close_with(Operator::GroupClose),
            BracketMatch::Grouping
        );
        assert_eq!(
            Operator::GroupOpen.close_with(Operator::BodyClose),
            BracketMatch::Mismatch
        );
    }
}
