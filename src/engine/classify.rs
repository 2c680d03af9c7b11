//! Node classifier / field mapper.
//!
//! Turns a kind and its already-converted positional children into the named
//! fields of the output document. Dispatch goes through the category table
//! ([`NodeKind::category`]); kinds sharing a category share a layout, with a
//! per-kind match only where field names differ inside a group.
//!
//! Positional children that do not exist read as `null`. Fields documented as
//! optional are left out when the child is absent, `null` or `false`.

use std::ops::Range;

use crate::ast::{Category, Literal, NodeKind};
use crate::normalized::{Body, Converted};

// ============================================================================
// POSITIONAL ACCESS
// ============================================================================

/// Converted children addressed by position. Each slot can be taken once.
struct Slots(Vec<Option<Converted>>);

impl Slots {
    fn new(children: Vec<Converted>) -> Self {
        Self(children.into_iter().map(Some).collect())
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn is_present(&self, index: usize) -> bool {
        matches!(self.0.get(index), Some(Some(child)) if child.is_present())
    }

    fn take(&mut self, index: usize) -> Converted {
        self.0
            .get_mut(index)
            .and_then(Option::take)
            .unwrap_or_else(Converted::absent)
    }

    fn take_range(&mut self, range: Range<usize>) -> Converted {
        Converted::List(range.map(|index| self.take(index)).collect())
    }

    fn take_from(&mut self, start: usize) -> Converted {
        let end = self.len().max(start);
        self.take_range(start..end)
    }

    /// The last child, or `null` when there are none.
    fn take_last(&mut self) -> Converted {
        match self.len().checked_sub(1) {
            Some(last) => self.take(last),
            None => Converted::absent(),
        }
    }

    fn into_all(self) -> Vec<Converted> {
        self.0
            .into_iter()
            .map(|slot| slot.unwrap_or_else(Converted::absent))
            .collect()
    }
}

#[derive(Default)]
struct Fields(Vec<(&'static str, Converted)>);

impl Fields {
    fn set(&mut self, name: &'static str, value: Converted) {
        self.0.push((name, value));
    }

    fn set_if_present(&mut self, name: &'static str, value: Converted) {
        if value.is_present() {
            self.0.push((name, value));
        }
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Maps `children` onto the output layout for `kind`.
///
/// Total: every kind produces a body. Kinds outside the category table keep
/// their children as a plain list; reporting them is the caller's job.
pub fn classify(kind: &NodeKind, children: Vec<Converted>) -> Body {
    let mut slots = Slots::new(children);
    let mut fields = Fields::default();

    match kind.category() {
        Category::Conditional => {
            fields.set("condition", slots.take(0));
            fields.set("then_branch", slots.take(1));
            fields.set_if_present("else_branch", slots.take(2));
        }
        Category::LoopConditional => {
            fields.set("condition", slots.take(0));
            fields.set("body", slots.take(1));
        }
        Category::Iteration => {
            fields.set("variable", slots.take(0));
            fields.set("collection", slots.take(1));
            fields.set("body", slots.take(2));
        }
        Category::Definition => definition(kind, &mut slots, &mut fields),
        Category::BlockLike => block_like(kind, &mut slots, &mut fields),
        Category::SequenceBody => {
            fields.set("body", Converted::List(slots.into_all()));
        }
        Category::BranchDispatch => match kind {
            NodeKind::Case => dispatch(&mut slots, &mut fields, "case_expression", "when_clauses"),
            _ => dispatch(&mut slots, &mut fields, "statement", "bodies"),
        },
        Category::Clause => match kind {
            NodeKind::When => {
                let conditions = slots.len().saturating_sub(1);
                fields.set("conditions", slots.take_range(0..conditions));
                fields.set("then_branch", slots.take_last());
            }
            _ => {
                fields.set("pattern", slots.take(0));
                fields.set("guard", slots.take(1));
                fields.set("body", slots.take(2));
            }
        },
        Category::PatternBinding => {
            fields.set("value", slots.take(0));
            fields.set("as", slots.take(1));
        }
        Category::ExceptionHandling => match kind {
            NodeKind::Rescue => dispatch(&mut slots, &mut fields, "statement", "bodies"),
            NodeKind::Resbody => {
                fields.set("exec_list", slots.take(0));
                fields.set("exec_var", slots.take(1));
                fields.set("body", slots.take(2));
            }
            _ => {
                fields.set("statement", slots.take(0));
                fields.set("body", slots.take(1));
            }
        },
        Category::Guard => {
            fields.set("condition", slots.take(0));
        }
        Category::Alternation => {
            fields.set("left", slots.take(0));
            fields.set("right", slots.take(1));
        }
        Category::QualifiedAssignment => match kind {
            NodeKind::Casgn => {
                fields.set("base", slots.take(0));
                fields.set("lhs", slots.take(1));
                fields.set("rhs", slots.take(2));
            }
            _ => {
                fields.set("lhs", slots.take(0));
                fields.set("op", slots.take(1));
                fields.set("rhs", slots.take(2));
            }
        },
        Category::SimpleAssignment => {
            fields.set("lhs", slots.take(0));
            fields.set_if_present("rhs", slots.take(1));
        }
        Category::BinaryOperator | Category::MultipleAssignment => {
            fields.set("lhs", slots.take(0));
            fields.set("rhs", slots.take(1));
        }
        Category::Singleton => {
            fields.set("value", Literal::from(kind.as_str()).into());
        }
        Category::KeywordArgument | Category::KeyValue => {
            fields.set("key", slots.take(0));
            fields.set("value", slots.take(1));
        }
        Category::ValueCarrying | Category::Pin => {
            fields.set("value", slots.take(0));
        }
        Category::OptionalValue => {
            fields.set_if_present("value", slots.take(0));
        }
        Category::QualifyingAccess => {
            fields.set("base", slots.take(0));
            fields.set("name", slots.take(1));
        }
        Category::Call => {
            fields.set("receiver", slots.take(0));
            fields.set("name", slots.take(1));
            fields.set("arguments", slots.take_from(2));
        }
        Category::SpecialCommand => {
            fields.set("arguments", Converted::List(slots.into_all()));
        }
        Category::Alias => {
            fields.set("alias", slots.take(0));
            fields.set("name", slots.take(1));
        }
        Category::RegexLiteral => {
            fields.set("value", slots.take(0));
            fields.set("opt", slots.take(1));
        }
        Category::RangeLike => {
            fields.set("start", slots.take(0));
            fields.set("end", slots.take(1));
        }
        Category::TopLevelHook => {
            fields.set("body", slots.take(0));
        }
        Category::NoKeywordMarker => {
            fields.set("call", Literal::from(kind.as_str()).into());
            fields.set("body", Literal::Bool(false).into());
        }
        Category::RestKeyword => {
            fields.set("name", slots.take(0));
            fields.set_if_present("value", slots.take(1));
        }
        Category::Return => {
            if slots.is_present(0) {
                fields.set("values", Converted::List(slots.into_all()));
            }
        }
        Category::ControlKeyword => {
            fields.set_if_present("arguments", slots.take(0));
        }
        Category::ZeroArity => {}
        Category::Collection | Category::Fallback => return Body::Children(slots.into_all()),
    }

    Body::Fields(fields.0)
}

// ============================================================================
// GROUP HELPERS
// ============================================================================

fn definition(kind: &NodeKind, slots: &mut Slots, fields: &mut Fields) {
    match kind {
        NodeKind::Def => {
            fields.set("name", slots.take(0));
            fields.set("arguments", slots.take(1));
            fields.set("body", slots.take(2));
        }
        NodeKind::Defs => {
            fields.set("base", slots.take(0));
            fields.set("name", slots.take(1));
            fields.set("arguments", slots.take(2));
            fields.set("body", slots.take(3));
        }
        NodeKind::Class => {
            fields.set("name", slots.take(0));
            fields.set_if_present("superclass", slots.take(1));
            fields.set("body", slots.take(2));
        }
        NodeKind::Sclass => {
            fields.set("name", slots.take(0));
            fields.set("def", slots.take(1));
            fields.set("body", slots.take(2));
        }
        _ => {
            fields.set("name", slots.take(0));
            fields.set("body", slots.take(1));
        }
    }
}

fn block_like(kind: &NodeKind, slots: &mut Slots, fields: &mut Fields) {
    match kind {
        NodeKind::Block => {
            fields.set("call_name", slots.take(0));
            fields.set("arguments", slots.take(1));
            fields.set("body", slots.take(2));
        }
        NodeKind::Numblock => {
            fields.set("call", slots.take(0));
            fields.set("param_idx", slots.take(1));
            fields.set("body", slots.take(2));
        }
        _ => {
            fields.set("call", slots.take(0));
            fields.set("body", slots.take(1));
        }
    }
}

/// `[head, middle..., else?]`. With fewer than two children there is no
/// trailing else slot.
fn dispatch(slots: &mut Slots, fields: &mut Fields, head: &'static str, middle: &'static str) {
    let len = slots.len();
    fields.set(head, slots.take(0));
    let middle_end = len.saturating_sub(1).max(1);
    fields.set(middle, slots.take_range(1..middle_end));
    if len >= 2 {
        fields.set_if_present("else_clause", slots.take(len - 1));
    }
}
