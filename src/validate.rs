//! First-violation search over a classified member list.

use crate::classify::ClassifiedMember;
use crate::normalize::{NormalizedOrder, Rank};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Member that set the running maximum rank.
    pub earlier: usize,
    /// First member ranked below that maximum.
    pub later: usize,
}

/// Running maximum threaded through the scan: the highest rank seen so far
/// and the first member that reached it.
#[derive(Debug, Clone, Copy)]
struct Scan {
    max: Option<(Rank, usize)>,
}

impl Scan {
    fn step(self, index: usize, rank: Rank) -> Result<Scan, Violation> {
        match self.max {
            Some((max, setter)) if rank < max => Err(Violation {
                earlier: setter,
                later: index,
            }),
            Some((max, _)) if rank <= max => Ok(self),
            _ => Ok(Scan {
                max: Some((rank, index)),
            }),
        }
    }
}

pub fn ranks(members: &[ClassifiedMember<'_>], order: &NormalizedOrder) -> Vec<Rank> {
    members.iter().map(|m| order.rank(m.category)).collect()
}

/// Find the first member ranked strictly below an earlier member.
///
/// Members sharing a category never violate. Categories missing from the
/// order are unranked: they are never flagged themselves, but they raise the
/// running maximum above every ranked category.
pub fn find_first_violation(
    members: &[ClassifiedMember<'_>],
    order: &NormalizedOrder,
) -> Option<Violation> {
    ranks(members, order)
        .into_iter()
        .enumerate()
        .try_fold(Scan { max: None }, |scan, (i, rank)| scan.step(i, rank))
        .err()
}

/// Number of pairs `(i, j)`, `i < j`, with `rank[i] > rank[j]`.
pub fn inversions(ranks: &[Rank]) -> usize {
    let mut count = 0;
    for (i, a) in ranks.iter().enumerate() {
        count += ranks[i + 1..].iter().filter(|b| a > *b).count();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::models::dump::{Member, MemberKind, Span};

    fn members(cats: &[Category]) -> (Vec<Member>, Vec<Category>) {
        let ms = cats
            .iter()
            .enumerate()
            .map(|(i, _)| Member {
                span: Span::new(i, i + 1),
                leading: None,
                decorators: Vec::new(),
                kind: MemberKind::Spread,
            })
            .collect();
        (ms, cats.to_vec())
    }

    fn check(cats: &[Category], order: &NormalizedOrder) -> Option<Violation> {
        let (ms, cats) = members(cats);
        let classified: Vec<ClassifiedMember<'_>> = ms
            .iter()
            .zip(cats)
            .map(|(m, category)| ClassifiedMember {
                member: m,
                name: String::new(),
                category,
                nested: Vec::new(),
            })
            .collect();
        find_first_violation(&classified, order)
    }

    #[test]
    fn sorted_body_has_no_violation() {
        use Category::*;
        let order = NormalizedOrder::default();
        assert_eq!(check(&[Spread, Service, Property, Init, Actions], &order), None);
        assert_eq!(check(&[], &order), None);
    }

    #[test]
    fn same_category_never_violates() {
        use Category::*;
        let order = NormalizedOrder::default();
        assert_eq!(check(&[Property, Property, Property], &order), None);
    }

    #[test]
    fn reports_against_member_that_set_maximum() {
        use Category::*;
        let order = NormalizedOrder::default();
        let v = check(&[Spread, Property, Init, Init, Service, Spread], &order).unwrap();
        assert_eq!(v, Violation { earlier: 2, later: 4 });
    }

    #[test]
    fn unranked_member_is_never_flagged_but_blocks_later_ranked_ones() {
        use Category::*;
        let order = NormalizedOrder::new(Some(&["property", "method"][..]));
        assert_eq!(check(&[Property, Service], &order), None);
        assert_eq!(
            check(&[Property, SingleLineFunction, EmptyMethod], &order),
            Some(Violation { earlier: 1, later: 2 })
        );
        assert_eq!(check(&[Service, Observer], &order), None);
    }

    #[test]
    fn deterministic() {
        use Category::*;
        let order = NormalizedOrder::default();
        let body = [Method, Property, Spread];
        assert_eq!(check(&body, &order), check(&body, &order));
    }

    #[test]
    fn counts_inversions() {
        assert_eq!(inversions(&[Rank::At(0), Rank::At(1)]), 0);
        assert_eq!(inversions(&[Rank::At(2), Rank::At(1), Rank::At(0)]), 3);
        assert_eq!(inversions(&[Rank::Unranked, Rank::At(1)]), 1);
    }
}
