//! Node kinds and the category table.
//!
//! Every kind the front end is known to emit is a variant of [`NodeKind`]; any
//! other tag lands in [`NodeKind::Unknown`] so newer grammars still decode.
//! [`NodeKind::category`] partitions the known kinds into groups that share a
//! positional-child layout. Unknown kinds fall into [`Category::Fallback`].

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORIES
// ============================================================================

/// How a kind's positional children map onto named output fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// `[condition, then, else?]`
    Conditional,
    /// `[condition, body]`
    LoopConditional,
    /// `[variable, collection, body]`
    Iteration,
    /// `def`, `defs`, `class`, `sclass`, `module`
    Definition,
    /// `[call, params, body]`
    BlockLike,
    /// All children form the body.
    SequenceBody,
    /// `[subject, clause..., else?]`
    BranchDispatch,
    /// `when` and `in` clauses.
    Clause,
    /// `[value, as]`
    PatternBinding,
    /// `rescue`, `resbody`, `ensure`
    ExceptionHandling,
    /// `[condition]`
    Guard,
    /// `[left, right]`
    Alternation,
    /// `casgn` and `op_asgn`
    QualifiedAssignment,
    /// `[lhs, rhs?]`
    SimpleAssignment,
    /// `[lhs, rhs]`
    BinaryOperator,
    /// `nil`, `true`, `false`
    Singleton,
    /// `[key, value]`
    KeywordArgument,
    /// `[value]`
    ValueCarrying,
    /// `[value?]`
    OptionalValue,
    /// `[base, name]`
    QualifyingAccess,
    /// `[receiver, name, arg...]`
    Call,
    /// All children are arguments.
    SpecialCommand,
    /// `[key, value]`
    KeyValue,
    /// `[alias, name]`
    Alias,
    /// `[value, opt]`
    RegexLiteral,
    /// `[start, end]`
    RangeLike,
    /// `[lhs, rhs]`
    MultipleAssignment,
    /// `[body]`
    TopLevelHook,
    /// `**nil` in a parameter list.
    NoKeywordMarker,
    /// `[name, default?]`
    RestKeyword,
    /// `[value]`
    Pin,
    /// Homogeneous containers kept as a plain `children` list.
    Collection,
    /// `[value...]`
    Return,
    /// `break` / `next`: `[value?]`
    ControlKeyword,
    /// No children and no extra fields.
    ZeroArity,
    /// Anything the table does not know.
    Fallback,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Conditional => "conditional",
            Category::LoopConditional => "loop_conditional",
            Category::Iteration => "iteration",
            Category::Definition => "definition",
            Category::BlockLike => "block_like",
            Category::SequenceBody => "sequence_body",
            Category::BranchDispatch => "branch_dispatch",
            Category::Clause => "clause",
            Category::PatternBinding => "pattern_binding",
            Category::ExceptionHandling => "exception_handling",
            Category::Guard => "guard",
            Category::Alternation => "alternation",
            Category::QualifiedAssignment => "qualified_assignment",
            Category::SimpleAssignment => "simple_assignment",
            Category::BinaryOperator => "binary_operator",
            Category::Singleton => "singleton",
            Category::KeywordArgument => "keyword_argument",
            Category::ValueCarrying => "value_carrying",
            Category::OptionalValue => "optional_value",
            Category::QualifyingAccess => "qualifying_access",
            Category::Call => "call",
            Category::SpecialCommand => "special_command",
            Category::KeyValue => "key_value",
            Category::Alias => "alias",
            Category::RegexLiteral => "regex_literal",
            Category::RangeLike => "range_like",
            Category::MultipleAssignment => "multiple_assignment",
            Category::TopLevelHook => "top_level_hook",
            Category::NoKeywordMarker => "no_keyword_marker",
            Category::RestKeyword => "rest_keyword",
            Category::Pin => "pin",
            Category::Collection => "collection",
            Category::Return => "return",
            Category::ControlKeyword => "control_keyword",
            Category::ZeroArity => "zero_arity",
            Category::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// NODE KINDS
// ============================================================================

/// Declares [`NodeKind`] together with its name table and category table so the
/// three can never drift apart.
macro_rules! node_kinds {
    ($( $variant:ident => $name:literal : $category:ident ),* $(,)?) => {
        /// The symbolic tag of a syntax node.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum NodeKind {
            $( $variant, )*
            /// A tag the category table does not know about.
            Unknown(String),
        }

        impl NodeKind {
            /// Names of every known kind, in table order.
            pub const KNOWN_NAMES: &'static [&'static str] = &[$( $name ),*];

            /// Resolves a front-end tag. Never fails: unrecognized tags become
            /// [`NodeKind::Unknown`].
            pub fn from_name(name: &str) -> Self {
                match name {
                    $( $name => NodeKind::$variant, )*
                    other => NodeKind::Unknown(other.to_string()),
                }
            }

            /// The front-end tag, e.g. `"send"` or `"defined?"`.
            pub fn as_str(&self) -> &str {
                match self {
                    $( NodeKind::$variant => $name, )*
                    NodeKind::Unknown(raw) => raw,
                }
            }

            /// The group this kind belongs to in the category table.
            pub fn category(&self) -> Category {
                match self {
                    $( NodeKind::$variant => Category::$category, )*
                    NodeKind::Unknown(_) => Category::Fallback,
                }
            }
        }
    };
}

node_kinds! {
    // Conditionals and loops
    If => "if": Conditional,
    Unless => "unless": Conditional,
    While => "while": LoopConditional,
    WhilePost => "while_post": LoopConditional,
    Until => "until": LoopConditional,
    UntilPost => "until_post": LoopConditional,
    For => "for": Iteration,
    ForPost => "for_post": Iteration,

    // Definitions
    Def => "def": Definition,
    Defs => "defs": Definition,
    Class => "class": Definition,
    Sclass => "sclass": Definition,
    Module => "module": Definition,

    // Blocks
    Block => "block": BlockLike,
    Numblock => "numblock": BlockLike,
    Itblock => "itblock": BlockLike,

    // Bodies and dispatch
    Begin => "begin": SequenceBody,
    Kwbegin => "kwbegin": SequenceBody,
    Case => "case": BranchDispatch,
    CaseMatch => "case_match": BranchDispatch,
    When => "when": Clause,
    InPattern => "in_pattern": Clause,
    MatchAs => "match_as": PatternBinding,
    Rescue => "rescue": ExceptionHandling,
    Resbody => "resbody": ExceptionHandling,
    Ensure => "ensure": ExceptionHandling,
    IfGuard => "if_guard": Guard,
    UnlessGuard => "unless_guard": Guard,
    MatchAlt => "match_alt": Alternation,

    // Assignment
    Casgn => "casgn": QualifiedAssignment,
    OpAsgn => "op_asgn": QualifiedAssignment,
    OrAsgn => "or_asgn": SimpleAssignment,
    AndAsgn => "and_asgn": SimpleAssignment,
    Lvasgn => "lvasgn": SimpleAssignment,
    Ivasgn => "ivasgn": SimpleAssignment,
    Gvasgn => "gvasgn": SimpleAssignment,
    Cvasgn => "cvasgn": SimpleAssignment,
    MatchWithLvasgn => "match_with_lvasgn": SimpleAssignment,
    Masgn => "masgn": MultipleAssignment,

    // Operators
    And => "and": BinaryOperator,
    Or => "or": BinaryOperator,
    MatchPattern => "match_pattern": BinaryOperator,
    MatchPatternP => "match_pattern_p": BinaryOperator,
    Erange => "erange": RangeLike,
    Irange => "irange": RangeLike,
    Eflipflop => "eflipflop": RangeLike,
    Iflipflop => "iflipflop": RangeLike,

    // Literals
    Nil => "nil": Singleton,
    True => "true": Singleton,
    False => "false": Singleton,
    Int => "int": ValueCarrying,
    Float => "float": ValueCarrying,
    Rational => "rational": ValueCarrying,
    Complex => "complex": ValueCarrying,
    Str => "str": ValueCarrying,
    Sym => "sym": ValueCarrying,
    Regexp => "regexp": RegexLiteral,
    Regopt => "regopt": OptionalValue,

    // Arguments
    Arg => "arg": ValueCarrying,
    Restarg => "restarg": ValueCarrying,
    Blockarg => "blockarg": ValueCarrying,
    Shadowarg => "shadowarg": ValueCarrying,
    Kwarg => "kwarg": KeywordArgument,
    Kwoptarg => "kwoptarg": KeywordArgument,
    Kwnilarg => "kwnilarg": NoKeywordMarker,
    Kwrestarg => "kwrestarg": RestKeyword,
    Optarg => "optarg": KeyValue,

    // Variables and access
    SelfRef => "self": ValueCarrying,
    Ident => "ident": ValueCarrying,
    Lvar => "lvar": ValueCarrying,
    Cvar => "cvar": ValueCarrying,
    Gvar => "gvar": ValueCarrying,
    Ivar => "ivar": ValueCarrying,
    Splat => "splat": ValueCarrying,
    Kwsplat => "kwsplat": ValueCarrying,
    BlockPass => "block_pass": ValueCarrying,
    MatchVar => "match_var": ValueCarrying,
    MatchRest => "match_rest": ValueCarrying,
    Const => "const": QualifyingAccess,
    Cbase => "cbase": QualifyingAccess,
    Pin => "pin": Pin,

    // Calls
    Send => "send": Call,
    Csend => "csend": Call,
    Yield => "yield": SpecialCommand,
    Super => "super": SpecialCommand,
    Defined => "defined?": SpecialCommand,
    Xstr => "xstr": SpecialCommand,
    Pair => "pair": KeyValue,
    Alias => "alias": Alias,
    Preexe => "preexe": TopLevelHook,
    Postexe => "postexe": TopLevelHook,

    // Containers
    Args => "args": Collection,
    Array => "array": Collection,
    Hash => "hash": Collection,
    Mlhs => "mlhs": Collection,
    HashPattern => "hash_pattern": Collection,
    ArrayPattern => "array_pattern": Collection,
    ArrayPatternWithTail => "array_pattern_with_tail": Collection,
    FindPattern => "find_pattern": Collection,
    Undef => "undef": Collection,
    Procarg0 => "procarg0": Collection,
    Dsym => "dsym": Collection,
    Dstr => "dstr": Collection,
    NthRef => "nth_ref": Collection,
    BackRef => "back_ref": Collection,

    // Control flow
    Return => "return": Return,
    Break => "break": ControlKeyword,
    Next => "next": ControlKeyword,
    Redo => "redo": OptionalValue,
    Retry => "retry": ZeroArity,
    Zsuper => "zsuper": ZeroArity,
    ForwardArgs => "forward_args": ZeroArity,
    ForwardedArgs => "forwarded_args": ZeroArity,
    ForwardArg => "forward_arg": ZeroArity,
    MatchNilPattern => "match_nil_pattern": ZeroArity,
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        NodeKind::from_name(name)
    }
}

impl From<String> for NodeKind {
    fn from(name: String) -> Self {
        NodeKind::from_name(&name)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
