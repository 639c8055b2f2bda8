// Ranking engine: sorts records by points, splits them into the top bucket
// and the remainder, or collapses them into a single search-result group.
//
// Everything here is a pure function of `(records, search_text, group_size)`
// and is recomputed on every render.

use crate::record::ScoreRecord;

/// Size of the top bucket when no search is active.
pub const DEFAULT_GROUP_SIZE: usize = 50;

/// Which branch produced a `DerivedView`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Two groups: the top `group_size` records and everything after them.
    Paged,
    /// One group holding the records whose id matches the search text.
    Search,
}

/// Grouped, sorted (and possibly filtered) view over borrowed records.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a> {
    pub mode: ViewMode,
    pub groups: Vec<Vec<&'a ScoreRecord>>,
    group_size: usize,
}

/// A record together with its display position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry<'a> {
    /// 1-based number shown next to the record.
    pub rank: usize,
    /// Index of the group the record belongs to.
    pub group: usize,
    pub record: &'a ScoreRecord,
}

impl<'a> DerivedView<'a> {
    /// Total number of records across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Every record in display order with its rank and group index.
    pub fn entries(&self) -> impl Iterator<Item = RankedEntry<'a>> + '_ {
        let group_size = self.group_size;
        self.groups
            .iter()
            .enumerate()
            .flat_map(move |(group, records)| {
                records.iter().enumerate().map(move |(index, record)| RankedEntry {
                    rank: display_rank(group, index, group_size),
                    group,
                    record: *record,
                })
            })
    }

    /// Groups that have at least one record, with their original indices.
    pub fn visible_groups(&self) -> impl Iterator<Item = (usize, &[&'a ScoreRecord])> + '_ {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, records)| !records.is_empty())
            .map(|(index, records)| (index, records.as_slice()))
    }
}

/// Build the derived view.
///
/// `None` records are treated as an empty board. With empty `search_text`
/// the result always has exactly two groups; otherwise exactly one.
pub fn rank<'a>(
    records: Option<&'a [ScoreRecord]>,
    search_text: &str,
    group_size: usize,
) -> DerivedView<'a> {
    let mut sorted: Vec<&ScoreRecord> = records.unwrap_or_default().iter().collect();
    // Stable: equal points keep arrival order.
    sorted.sort_by(|a, b| b.points.cmp(&a.points));

    if !search_text.is_empty() {
        sorted.retain(|record| matches_search(record, search_text));
        return DerivedView {
            mode: ViewMode::Search,
            groups: vec![sorted],
            group_size,
        };
    }

    let rest = sorted.split_off(group_size.min(sorted.len()));
    DerivedView {
        mode: ViewMode::Paged,
        groups: vec![sorted, rest],
        group_size,
    }
}

/// Case-insensitive substring match of `needle` against the record id.
pub fn matches_search(record: &ScoreRecord, needle: &str) -> bool {
    record.id.to_lowercase().contains(&needle.to_lowercase())
}

/// Rank number for the `index`-th record of group `group`.
///
/// Numbering runs on across groups as if each earlier group were a full
/// page of `group_size`.
pub fn display_rank(group: usize, index: usize, group_size: usize) -> usize {
    index + group * group_size + 1
}

/// Points padded to at least two digits.
pub fn format_points(points: u64) -> String {
    format!("{points:02}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, points: u64) -> ScoreRecord {
        ScoreRecord::new(id, format!("name {id}"), format!("{id}@example.com"), points)
    }

    fn board(n: usize) -> Vec<ScoreRecord> {
        (0..n).map(|i| rec(&format!("p{i}"), (i % 7) as u64)).collect()
    }

    fn ids<'a>(group: &[&'a ScoreRecord]) -> Vec<&'a str> {
        group.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn sorts_descending_with_stable_ties() {
        let records = vec![rec("a", 3), rec("b", 10), rec("c", 1), rec("d", 10)];
        let view = rank(Some(&records), "", DEFAULT_GROUP_SIZE);
        assert_eq!(view.mode, ViewMode::Paged);
        assert_eq!(ids(&view.groups[0]), vec!["b", "d", "a", "c"]);
        assert!(view.groups[1].is_empty());
    }

    #[test]
    fn partitions_into_top_bucket_and_remainder() {
        let records = board(120);
        let view = rank(Some(&records), "", DEFAULT_GROUP_SIZE);
        assert_eq!(view.groups.len(), 2);
        assert_eq!(view.groups[0].len(), 50);
        assert_eq!(view.groups[1].len(), 70);
        assert_eq!(view.len(), records.len());
    }

    #[test]
    fn boundary_group_sizes() {
        for (n, expected) in [(49, (49, 0)), (50, (50, 0)), (51, (50, 1))] {
            let records = board(n);
            let view = rank(Some(&records), "", DEFAULT_GROUP_SIZE);
            assert_eq!(
                (view.groups[0].len(), view.groups[1].len()),
                expected,
                "split for {n} records"
            );
        }
    }

    #[test]
    fn paged_view_contains_every_record_once() {
        let records = board(75);
        let view = rank(Some(&records), "", 20);
        let mut seen: Vec<&str> = view.entries().map(|e| e.record.id.as_str()).collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn points_non_increasing_within_groups() {
        let records = board(90);
        let view = rank(Some(&records), "", DEFAULT_GROUP_SIZE);
        for group in &view.groups {
            assert!(group.windows(2).all(|w| w[0].points >= w[1].points));
        }
        // The split is taken from one sorted sequence.
        let last_top = view.groups[0].last().unwrap().points;
        let first_rest = view.groups[1].first().unwrap().points;
        assert!(last_top >= first_rest);
    }

    #[test]
    fn search_filters_by_id_substring() {
        let records = vec![rec("17", 2), rec("27", 9), rec("30", 50)];
        let view = rank(Some(&records), "7", DEFAULT_GROUP_SIZE);
        assert_eq!(view.mode, ViewMode::Search);
        assert_eq!(view.groups.len(), 1);
        assert_eq!(ids(&view.groups[0]), vec!["27", "17"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let records = vec![rec("xAByz", 1), rec("other", 2), rec("ab", 3)];
        let view = rank(Some(&records), "aB", DEFAULT_GROUP_SIZE);
        assert_eq!(ids(&view.groups[0]), vec!["ab", "xAByz"]);
    }

    #[test]
    fn search_does_not_match_name_or_email() {
        let records = vec![ScoreRecord::new("1", "seven", "seven@x", 4)];
        let view = rank(Some(&records), "seven", DEFAULT_GROUP_SIZE);
        assert!(view.is_empty());
    }

    #[test]
    fn search_ignores_group_size() {
        let records: Vec<ScoreRecord> = (0..80).map(|i| rec(&format!("id{i}"), i)).collect();
        let view = rank(Some(&records), "id", DEFAULT_GROUP_SIZE);
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].len(), 80);
    }

    #[test]
    fn none_records_yield_empty_groups() {
        let paged = rank(None, "", DEFAULT_GROUP_SIZE);
        assert_eq!(paged.groups.len(), 2);
        assert!(paged.is_empty());

        let searched = rank(None, "abc", DEFAULT_GROUP_SIZE);
        assert_eq!(searched.groups.len(), 1);
        assert!(searched.is_empty());
    }

    #[test]
    fn rank_numbering_continues_across_groups() {
        assert_eq!(display_rank(0, 0, 50), 1);
        assert_eq!(display_rank(1, 0, 50), 51);
        assert_eq!(display_rank(1, 9, 50), 60);

        let records = board(52);
        let view = rank(Some(&records), "", DEFAULT_GROUP_SIZE);
        let ranks: Vec<(usize, usize)> = view.entries().map(|e| (e.group, e.rank)).collect();
        assert_eq!(ranks[0], (0, 1));
        assert_eq!(ranks[49], (0, 50));
        assert_eq!(ranks[50], (1, 51));
        assert_eq!(ranks[51], (1, 52));
    }

    #[test]
    fn search_ranks_start_at_one() {
        let records = vec![rec("a7", 1), rec("b7", 5)];
        let view = rank(Some(&records), "7", DEFAULT_GROUP_SIZE);
        let ranks: Vec<usize> = view.entries().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn visible_groups_skip_empty_ones() {
        let records = board(10);
        let view = rank(Some(&records), "", DEFAULT_GROUP_SIZE);
        let visible: Vec<usize> = view.visible_groups().map(|(i, _)| i).collect();
        assert_eq!(visible, vec![0]);
    }

    #[test]
    fn is_deterministic() {
        let records = board(64);
        assert_eq!(
            rank(Some(&records), "", DEFAULT_GROUP_SIZE),
            rank(Some(&records), "", DEFAULT_GROUP_SIZE)
        );
    }

    #[test]
    fn format_points_pads_to_two_digits() {
        assert_eq!(format_points(0), "00");
        assert_eq!(format_points(5), "05");
        assert_eq!(format_points(42), "42");
        assert_eq!(format_points(123), "123");
    }
}
