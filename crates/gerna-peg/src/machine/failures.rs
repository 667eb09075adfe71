//! Failure collection pass.

use std::collections::HashMap;

use super::next_char;
use crate::fail::{FailArena, FailId, FailTree, FailureNode};
use crate::grammar::{ANY_WANT, Grammar, Op, RuleId};

pub(super) fn collect(grammar: &Grammar, text: &str, min_position: usize) -> FailTree {
    let mut collector = Collector {
        grammar,
        text,
        min_position,
        arena: FailArena::new(),
        memo: HashMap::new(),
        quiet: 0,
    };
    let (_, found) = collector.rule(grammar.start(), 0);
    let root = found.unwrap_or_else(|| {
        collector
            .arena
            .push(FailureNode::leaf(grammar.start_rule(), 0, ""))
    });
    collector.arena.finish(root)
}

struct Collector<'a> {
    grammar: &'a Grammar,
    text: &'a str,
    min_position: usize,
    arena: FailArena,
    memo: HashMap<(RuleId, usize, bool), (Option<usize>, Option<FailId>)>,
    quiet: usize,
}

impl<'a> Collector<'a> {
    fn terminal_failed(&mut self, pos: usize, want: &str, kids: &mut Vec<FailId>) {
        if self.quiet == 0 && pos >= self.min_position {
            kids.push(self.arena.push(FailureNode::leaf("", pos, want)));
        }
    }

    fn rule(&mut self, id: RuleId, pos: usize) -> (Option<usize>, Option<FailId>) {
        let key = (id, pos, self.quiet > 0);
        if let Some(&hit) = self.memo.get(&key) {
            return hit;
        }
        let grammar = self.grammar;
        let Some(rule) = grammar.rule(id) else {
            return (None, None);
        };
        let labeled = rule.label.is_some();
        if labeled {
            self.quiet += 1;
        }
        let mut kids = Vec::new();
        let end = self.op(&rule.body, pos, &mut kids);
        if labeled {
            self.quiet -= 1;
        }
        let node = match (&rule.label, end) {
            (Some(label), None) if self.quiet == 0 && pos >= self.min_position => Some(
                self.arena
                    .push(FailureNode::leaf(rule.name.as_str(), pos, label.as_str())),
            ),
            _ if kids.is_empty() => None,
            _ => Some(
                self.arena
                    .push(FailureNode::new(rule.name.as_str(), pos, "", kids)),
            ),
        };
        self.memo.insert(key, (end, node));
        (end, node)
    }

    fn op(&mut self, op: &'a Op, pos: usize, kids: &mut Vec<FailId>) -> Option<usize> {
        match op {
            Op::Literal { text, want } => {
                if self
                    .text
                    .get(pos..)
                    .is_some_and(|rest| rest.starts_with(text.as_str()))
                {
                    Some(pos + text.len())
                } else {
                    self.terminal_failed(pos, want, kids);
                    None
                }
            }
            Op::Class { class, want } => match next_char(self.text, pos) {
                Some(c) if class.contains(c) => Some(pos + c.len_utf8()),
                _ => {
                    self.terminal_failed(pos, want, kids);
                    None
                }
            },
            Op::Any => {
                if let Some(c) = next_char(self.text, pos) {
                    Some(pos + c.len_utf8())
                } else {
                    self.terminal_failed(pos, ANY_WANT, kids);
                    None
                }
            }
            Op::Rule(id) => {
                let (end, node) = self.rule(*id, pos);
                kids.extend(node);
                end
            }
            Op::Seq(items) => {
                let mut at = pos;
                for item in items {
                    at = self.op(item, at, kids)?;
                }
                Some(at)
            }
            Op::Choice(alts) => {
                for alt in alts {
                    if let Some(end) = self.op(alt, pos, kids) {
                        return Some(end);
                    }
                }
                None
            }
            Op::Optional(inner) => Some(self.op(inner, pos, kids).unwrap_or(pos)),
            Op::Star(inner) => Some(self.repeat(inner, pos, kids)),
            Op::Plus(inner) => {
                let first = self.op(inner, pos, kids)?;
                Some(self.repeat(inner, first, kids))
            }
            Op::And { operand, want } => {
                if self.lookahead(operand, pos) {
                    Some(pos)
                } else {
                    self.terminal_failed(pos, want, kids);
                    None
                }
            }
            Op::Not { operand, want } => {
                if self.lookahead(operand, pos) {
                    self.terminal_failed(pos, want, kids);
                    None
                } else {
                    Some(pos)
                }
            }
        }
    }

    fn repeat(&mut self, inner: &'a Op, mut at: usize, kids: &mut Vec<FailId>) -> usize {
        while let Some(next) = self.op(inner, at, kids) {
            if next == at {
                break;
            }
            at = next;
        }
        at
    }

    fn lookahead(&mut self, operand: &'a Op, pos: usize) -> bool {
        self.quiet += 1;
        let mut ignored = Vec::new();
        let matched = self.op(operand, pos, &mut ignored).is_some();
        self.quiet -= 1;
        matched
    }
}
