//! Tree building pass for accepted texts.

use std::collections::HashSet;

use super::next_char;
use crate::grammar::{Grammar, Op, RuleId};
use crate::node::SyntaxNode;

pub(super) fn build(grammar: &Grammar, text: &str) -> Option<SyntaxNode> {
    let mut builder = Builder {
        grammar,
        text,
        failed: HashSet::new(),
    };
    builder.rule(grammar.start(), 0).map(|(_, node)| node)
}

struct Builder<'a> {
    grammar: &'a Grammar,
    text: &'a str,
    /// Rule applications known to fail. Successes are handed to the caller
    /// and rebuilt if backtracking discards them.
    failed: HashSet<(RuleId, usize)>,
}

impl<'a> Builder<'a> {
    fn span(&self, start: usize, end: usize) -> &'a str {
        self.text.get(start..end).unwrap_or_default()
    }

    fn rule(&mut self, id: RuleId, pos: usize) -> Option<(usize, SyntaxNode)> {
        if self.failed.contains(&(id, pos)) {
            return None;
        }
        let grammar = self.grammar;
        let rule = grammar.rule(id)?;
        let mut kids = Vec::new();
        let Some(end) = self.op(&rule.body, pos, &mut kids) else {
            self.failed.insert((id, pos));
            return None;
        };
        Some((end, SyntaxNode::new(rule.name.as_str(), self.span(pos, end), kids)))
    }

    /// Runs `op`, appending matched nodes to `kids`.
    ///
    /// On failure `kids` may hold partial matches; callers that carry on
    /// after a failure truncate back to their mark.
    fn op(&mut self, op: &'a Op, pos: usize, kids: &mut Vec<SyntaxNode>) -> Option<usize> {
        match op {
            Op::Literal { text, .. } => {
                if self
                    .text
                    .get(pos..)
                    .is_some_and(|rest| rest.starts_with(text.as_str()))
                {
                    kids.push(SyntaxNode::leaf("", text.as_str()));
                    Some(pos + text.len())
                } else {
                    None
                }
            }
            Op::Class { class, .. } => match next_char(self.text, pos) {
                Some(c) if class.contains(c) => Some(self.terminal(pos, c, kids)),
                _ => None,
            },
            Op::Any => next_char(self.text, pos).map(|c| self.terminal(pos, c, kids)),
            Op::Rule(id) => {
                let (end, node) = self.rule(*id, pos)?;
                kids.push(node);
                Some(end)
            }
            Op::Seq(items) => {
                let mut at = pos;
                for item in items {
                    at = self.op(item, at, kids)?;
                }
                Some(at)
            }
            Op::Choice(alts) => {
                let mark = kids.len();
                for alt in alts {
                    if let Some(end) = self.op(alt, pos, kids) {
                        return Some(end);
                    }
                    kids.truncate(mark);
                }
                None
            }
            Op::Optional(inner) => {
                let mark = kids.len();
                Some(self.op(inner, pos, kids).unwrap_or_else(|| {
                    kids.truncate(mark);
                    pos
                }))
            }
            Op::Star(inner) => Some(self.repeat(inner, pos, kids)),
            Op::Plus(inner) => {
                let first = self.op(inner, pos, kids)?;
                Some(self.repeat(inner, first, kids))
            }
            Op::And { operand, .. } => self.lookahead(operand, pos).then_some(pos),
            Op::Not { operand, .. } => (!self.lookahead(operand, pos)).then_some(pos),
        }
    }

    fn terminal(&self, pos: usize, c: char, kids: &mut Vec<SyntaxNode>) -> usize {
        let end = pos + c.len_utf8();
        kids.push(SyntaxNode::leaf("", self.span(pos, end)));
        end
    }

    fn repeat(&mut self, inner: &'a Op, mut at: usize, kids: &mut Vec<SyntaxNode>) -> usize {
        loop {
            let mark = kids.len();
            match self.op(inner, at, kids) {
                Some(next) if next != at => at = next,
                _ => {
                    kids.truncate(mark);
                    return at;
                }
            }
        }
    }

    fn lookahead(&mut self, operand: &'a Op, pos: usize) -> bool {
        let mut ignored = Vec::new();
        self.op(operand, pos, &mut ignored).is_some()
    }
}
