//! Fix planning: relocate one out-of-order member.
//!
//! The violating member moves in front of the earliest member ranked above
//! it. Members are treated as slots separated by fixed gaps (commas,
//! whitespace, blank lines): member texts rotate through the slots while the
//! gaps stay put, so separators and blank-line layout survive at both the
//! removal and the insertion site. A comment closing a member's line travels
//! with the member, while the `,` or `;` before it stays in its slot. The
//! resulting edit covers one contiguous range and keeps its length, so
//! offsets outside it are unaffected.

use crate::classify::ClassifiedMember;
use crate::models::dump::{Declaration, Member, Span};
use crate::normalize::NormalizedOrder;
use crate::validate::{ranks, Violation};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    /// Index of the member being moved.
    pub member: usize,
    /// Its text, attached comments and decorators included.
    pub from: Span,
    /// Index of the member it is placed in front of.
    pub before: usize,
    /// Insertion offset in the original source.
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub span: Span,
    pub replacement: String,
}

impl TextEdit {
    pub fn apply(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        out.push_str(&source[..self.span.start]);
        out.push_str(&self.replacement);
        out.push_str(&source[self.span.end..]);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveSet {
    pub moves: Vec<Move>,
    pub edit: TextEdit,
    /// Member indices in their new order.
    #[serde(skip)]
    pub permutation: Vec<usize>,
    /// New start offset shift for each member, by original index.
    #[serde(skip)]
    pub shifts: Vec<isize>,
}

impl MoveSet {
    /// Rebuild `decl` as it reads after the edit: members permuted, spans
    /// shifted to their new offsets.
    pub fn apply_to(&self, decl: &Declaration) -> Declaration {
        let members: Vec<Member> = self
            .permutation
            .iter()
            .map(|&i| decl.members[i].shifted(self.shifts[i]))
            .collect();
        Declaration {
            kind: decl.kind,
            name: decl.name.clone(),
            span: decl.span,
            members,
        }
    }
}

/// Plan the relocation that resolves `violation`.
///
/// `members` must be the classified body the violation was found in, and
/// `source` the text their spans index into.
pub fn plan_fix(
    violation: Violation,
    members: &[ClassifiedMember<'_>],
    order: &NormalizedOrder,
    source: &str,
) -> MoveSet {
    let ranks = ranks(members, order);
    let moving = violation.later;
    let target = (0..moving)
        .find(|&i| ranks[i] > ranks[moving])
        .unwrap_or(violation.earlier);

    let mut permutation: Vec<usize> = (0..members.len()).collect();
    permutation[target..=moving].rotate_right(1);

    let slots: Vec<Span> = members.iter().map(|m| m.member.full_span()).collect();
    let trails: Vec<Trail> = (0..slots.len())
        .map(|i| {
            let limit = slots.get(i + 1).map_or(source.len(), |s| s.start);
            trail(source, slots[i].end, limit)
        })
        .collect();
    // A `//` comment may only land where a line break follows.
    let rotated = &trails[target..=moving];
    let carry =
        rotated.iter().all(|t| t.line_ended) && rotated.iter().any(|t| t.comment.is_some());
    let punct_end = |p: usize| if carry { trails[p].punct_end } else { slots[p].end };
    let piece_end = |p: usize| {
        if carry {
            trails[p].comment.map_or(trails[p].punct_end, |c| c.end)
        } else {
            slots[p].end
        }
    };

    let region = Span::new(slots[target].start, piece_end(moving));
    let mut replacement = String::with_capacity(region.len());
    let mut shifts = vec![0isize; members.len()];
    for pos in target..=moving {
        let idx = permutation[pos];
        let new_start = region.start + replacement.len();
        shifts[idx] = new_start as isize - slots[idx].start as isize;
        replacement.push_str(&source[slots[idx].start..slots[idx].end]);
        replacement.push_str(&source[slots[pos].end..punct_end(pos)]);
        if let Some(c) = trails[idx].comment.filter(|_| carry) {
            replacement.push_str(&source[c.start..c.end]);
        }
        if pos < moving {
            replacement.push_str(&source[piece_end(pos)..slots[pos + 1].start]);
        }
    }

    MoveSet {
        moves: vec![Move {
            member: moving,
            from: slots[moving],
            before: target,
            to: slots[target].start,
        }],
        edit: TextEdit {
            span: region,
            replacement,
        },
        permutation,
        shifts,
    }
}

/// What follows a member up to the next slot.
struct Trail {
    /// End of the `,` or `;` right after the member, if any.
    punct_end: usize,
    /// Comment closing the member's line, leading blanks included.
    comment: Option<Span>,
    line_ended: bool,
}

fn trail(source: &str, end: usize, limit: usize) -> Trail {
    let gap = &source[end..limit];
    let punct_end = if gap.starts_with([',', ';']) { end + 1 } else { end };
    let rest = &source[punct_end..limit];
    let body = rest.trim_start_matches([' ', '\t']);
    let len = if body.starts_with("//") {
        Some(body.find(['\n', '\r']).unwrap_or(body.len()))
    } else if body.starts_with("/*") {
        body.find("*/").map(|i| i + 2)
    } else {
        None
    };
    let comment = len.map(|n| Span::new(punct_end, punct_end + (rest.len() - body.len()) + n));
    let after = comment.map_or(punct_end, |c| c.end);
    let line_ended = source[after..limit]
        .trim_start_matches([' ', '\t'])
        .starts_with(['\n', '\r']);
    Trail {
        punct_end,
        comment: comment.filter(|_| line_ended),
        line_ended,
    }
}
