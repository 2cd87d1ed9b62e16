//! Chain evaluation.
//!
//! Links fold strictly left to right with no precedence:
//! `[P1, or P2, not P3]` evaluates as `(P1 | P2) & !P3`. The first link's
//! combinator is ignored.

use tracing::debug;

use jobs_model::{JobRecord, JobTable};

use crate::predicate::ChainLink;

/// Evaluates the chain for one record. An empty chain matches.
pub fn matches_chain(record: &JobRecord, chain: &[ChainLink]) -> bool {
    let Some((first, rest)) = chain.split_first() else {
        return true;
    };
    let init = first.predicate.matches(record);
    rest.iter().fold(init, |acc, link| {
        link.combinator.apply(acc, link.predicate.matches(record))
    })
}

/// One entry per row: true where the chain matches.
pub fn mask(table: &JobTable, chain: &[ChainLink]) -> Vec<bool> {
    table
        .iter()
        .map(|record| matches_chain(record, chain))
        .collect()
}

/// Rows of `table` selected by the chain, in their original order.
pub fn evaluate(table: &JobTable, chain: &[ChainLink]) -> JobTable {
    let selected = table.select(&mask(table, chain));
    debug!(
        links = chain.len(),
        rows_in = table.len(),
        rows_out = selected.len(),
        "evaluated filter chain"
    );
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{Combinator, Predicate, TextField};

    fn table() -> JobTable {
        ["Policy Analyst", "Data Analyst", "Clerk", "Senior Clerk"]
            .iter()
            .enumerate()
            .map(|(i, title)| JobRecord {
                job_id: i.to_string(),
                job_title: (*title).to_string(),
                ..JobRecord::default()
            })
            .collect()
    }

    fn link(combinator: Combinator, needle: &str) -> ChainLink {
        ChainLink::new(combinator, Predicate::contains(TextField::Title, needle))
    }

    #[test]
    fn empty_chain_selects_everything() {
        assert_eq!(mask(&table(), &[]), vec![true; 4]);
    }

    #[test]
    fn first_combinator_is_ignored() {
        let as_not = mask(&table(), &[link(Combinator::Not, "analyst")]);
        let as_and = mask(&table(), &[link(Combinator::And, "analyst")]);
        assert_eq!(as_not, as_and);
        assert_eq!(as_not, vec![true, true, false, false]);
    }

    #[test]
    fn left_fold_without_precedence() {
        // (analyst | clerk) & !senior
        let chain = [
            link(Combinator::And, "analyst"),
            link(Combinator::Or, "clerk"),
            link(Combinator::Not, "senior"),
        ];
        assert_eq!(mask(&table(), &chain), vec![true, true, true, false]);

        // (clerk & !senior) | data
        let chain = [
            link(Combinator::And, "clerk"),
            link(Combinator::Not, "senior"),
            link(Combinator::Or, "data"),
        ];
        assert_eq!(evaluate(&table(), &chain).job_ids(), vec!["1", "2"]);
    }
}
