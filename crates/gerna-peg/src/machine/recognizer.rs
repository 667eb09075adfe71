//! Recognition pass: accept or reject, and the furthest failure.

use std::collections::HashMap;

use super::next_char;
use crate::engine::Attempt;
use crate::grammar::{Grammar, Op, RuleId};

pub(super) fn recognize(grammar: &Grammar, text: &str) -> Attempt {
    let mut recognizer = Recognizer {
        grammar,
        text,
        memo: HashMap::new(),
        furthest: None,
        quiet: 0,
    };
    let accepted = recognizer.rule(grammar.start(), 0).is_some();
    Attempt {
        position: recognizer.furthest.unwrap_or(0),
        accepted,
    }
}

struct Recognizer<'a> {
    grammar: &'a Grammar,
    text: &'a str,
    /// Keyed by rule, position and whether the call sits inside a lookahead.
    memo: HashMap<(RuleId, usize, bool), Option<usize>>,
    furthest: Option<usize>,
    quiet: usize,
}

impl<'a> Recognizer<'a> {
    fn fail_at(&mut self, pos: usize) {
        if self.quiet == 0 {
            self.furthest = Some(self.furthest.map_or(pos, |seen| seen.max(pos)));
        }
    }

    fn rule(&mut self, id: RuleId, pos: usize) -> Option<usize> {
        let key = (id, pos, self.quiet > 0);
        if let Some(&hit) = self.memo.get(&key) {
            return hit;
        }
        let grammar = self.grammar;
        let rule = grammar.rule(id)?;
        // A labeled rule reports itself rather than what failed inside it.
        let labeled = rule.label.is_some();
        if labeled {
            self.quiet += 1;
        }
        let end = self.op(&rule.body, pos);
        if labeled {
            self.quiet -= 1;
            if end.is_none() {
                self.fail_at(pos);
            }
        }
        self.memo.insert(key, end);
        end
    }

    fn op(&mut self, op: &'a Op, pos: usize) -> Option<usize> {
        match op {
            Op::Literal { text, .. } => {
                if self
                    .text
                    .get(pos..)
                    .is_some_and(|rest| rest.starts_with(text.as_str()))
                {
                    Some(pos + text.len())
                } else {
                    self.fail_at(pos);
                    None
                }
            }
            Op::Class { class, .. } => match next_char(self.text, pos) {
                Some(c) if class.contains(c) => Some(pos + c.len_utf8()),
                _ => {
                    self.fail_at(pos);
                    None
                }
            },
            Op::Any => {
                if let Some(c) = next_char(self.text, pos) {
                    Some(pos + c.len_utf8())
                } else {
                    self.fail_at(pos);
                    None
                }
            }
            Op::Rule(id) => self.rule(*id, pos),
            Op::Seq(items) => {
                let mut at = pos;
                for item in items {
                    at = self.op(item, at)?;
                }
                Some(at)
            }
            Op::Choice(alts) => alts.iter().find_map(|alt| self.op(alt, pos)),
            Op::Optional(inner) => Some(self.op(inner, pos).unwrap_or(pos)),
            Op::Star(inner) => Some(self.repeat(inner, pos)),
            Op::Plus(inner) => {
                let first = self.op(inner, pos)?;
                Some(self.repeat(inner, first))
            }
            Op::And { operand, .. } => {
                if self.lookahead(operand, pos) {
                    Some(pos)
                } else {
                    self.fail_at(pos);
                    None
                }
            }
            Op::Not { operand, .. } => {
                if self.lookahead(operand, pos) {
                    self.fail_at(pos);
                    None
                } else {
                    Some(pos)
                }
            }
        }
    }

    fn repeat(&mut self, inner: &'a Op, mut at: usize) -> usize {
        while let Some(next) = self.op(inner, at) {
            if next == at {
                break;
            }
            at = next;
        }
        at
    }

    fn lookahead(&mut self, operand: &'a Op, pos: usize) -> bool {
        self.quiet += 1;
        let matched = self.op(operand, pos).is_some();
        self.quiet -= 1;
        matched
    }
}
