use indexmap::IndexMap;

use crate::record::Record;

/// Records of one pipeline keyed by id, in first-seen id order
pub type RecordMap = IndexMap<String, Record>;

/// All pipelines keyed by pipeline id, in first-seen pipeline order
pub type PipelineMap = IndexMap<String, RecordMap>;

/// Partition records by pipeline id.
///
/// A later record with an already-seen `(pipeline_id, id)` replaces the
/// earlier value but keeps its original position in the id order.
pub fn group_records<I>(records: I) -> PipelineMap
where
    I: IntoIterator<Item = Record>,
{
    let mut grouped = PipelineMap::new();
    for record in records {
        insert_record(&mut grouped, record);
    }
    grouped
}

/// Insert one record, returning the record it replaced, if any
pub fn insert_record(grouped: &mut PipelineMap, record: Record) -> Option<Record> {
    grouped
        .entry(record.pipeline_id.clone())
        .or_default()
        .insert(record.id.clone(), record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_record;

    fn records(lines: &[&str]) -> Vec<Record> {
        lines.iter().filter_map(|line| parse_record(line)).collect()
    }

    #[test]
    fn test_pipelines_in_first_seen_order() {
        let grouped = group_records(records(&[
            "b 1 0 [x] -1",
            "a 1 0 [y] -1",
            "b 2 0 [z] 1",
            "c 1 0 [w] -1",
        ]));

        let order: Vec<&str> = grouped.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        assert_eq!(grouped["b"].len(), 2);
    }

    #[test]
    fn test_duplicate_id_last_write_wins() {
        let grouped = group_records(records(&[
            "p 1 0 [first] -1",
            "p 2 0 [other] -1",
            "p 1 0 [second] 2",
        ]));

        let pipeline = &grouped["p"];
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline["1"].body, "second");
        assert_eq!(pipeline["1"].next_id, "2");
        // the overwritten id keeps its first-seen slot
        let ids: Vec<&str> = pipeline.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_same_id_in_different_pipelines_is_independent() {
        let grouped = group_records(records(&["a 1 0 [from a] -1", "b 1 0 [from b] -1"]));

        assert_eq!(grouped["a"]["1"].body, "from a");
        assert_eq!(grouped["b"]["1"].body, "from b");
    }

    #[test]
    fn test_insert_record_reports_replacement() {
        let mut grouped = PipelineMap::new();
        let first = parse_record("p 1 0 [first] -1").unwrap();
        let second = parse_record("p 1 0 [second] -1").unwrap();

        assert!(insert_record(&mut grouped, first).is_none());
        let replaced = insert_record(&mut grouped, second).unwrap();
        assert_eq!(replaced.body, "first");
    }

    #[test]
    fn test_empty_input() {
        assert!(group_records(Vec::new()).is_empty());
    }
}
