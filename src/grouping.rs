use crate::models::CortexModule;

/// Records that belong to one Cortex instance, sorted by name.
#[derive(Debug, Clone, PartialEq)]
pub struct CortexGroup<T> {
    pub cortex_id: String,
    pub records: Vec<T>,
}

/// Partition records by Cortex instance.
///
/// Groups keep the order in which their instance first appears; records inside
/// a group are ordered by case-insensitive name, with a missing name sorting as
/// `Unknown`. The sort is stable, so equal names keep their response order.
pub fn group_by_cortex<T: CortexModule>(records: Vec<T>) -> Vec<CortexGroup<T>> {
    let mut groups: Vec<CortexGroup<T>> = Vec::new();

    for record in records {
        let key = record.group_key().to_string();
        match groups.iter_mut().find(|g| g.cortex_id == key) {
            Some(group) => group.records.push(record),
            None => groups.push(CortexGroup {
                cortex_id: key,
                records: vec![record],
            }),
        }
    }

    for group in &mut groups {
        group
            .records
            .sort_by_cached_key(|r| r.display_name().to_lowercase());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResponderRecord;

    fn responder(name: Option<&str>, cortex: Option<&str>) -> ResponderRecord {
        ResponderRecord {
            id: None,
            name: name.map(str::to_string),
            cortex_id: cortex.map(str::to_string),
            description: None,
        }
    }

    fn names(group: &CortexGroup<ResponderRecord>) -> Vec<&str> {
        group.records.iter().map(|r| r.display_name()).collect()
    }

    #[test]
    fn partitions_every_record_once() {
        let input = vec![
            responder(Some("b"), Some("c1")),
            responder(Some("a"), Some("c2")),
            responder(Some("c"), None),
            responder(Some("d"), Some("c1")),
        ];
        let groups = group_by_cortex(input);

        let total: usize = groups.iter().map(|g| g.records.len()).sum();
        assert_eq!(total, 4);
        let keys: Vec<&str> = groups.iter().map(|g| g.cortex_id.as_str()).collect();
        assert_eq!(keys, vec!["c1", "c2", "Unknown"]);
    }

    #[test]
    fn sorts_case_insensitively_within_group() {
        let groups = group_by_cortex(vec![
            responder(Some("Zeus"), Some("c1")),
            responder(Some("anubis"), Some("c1")),
            responder(Some("Mars"), Some("c1")),
        ]);
        assert_eq!(names(&groups[0]), vec!["anubis", "Mars", "Zeus"]);
    }

    #[test]
    fn missing_name_sorts_as_unknown() {
        let groups = group_by_cortex(vec![
            responder(Some("Vulcan"), Some("c1")),
            responder(None, Some("c1")),
            responder(Some("Thor"), Some("c1")),
        ]);
        assert_eq!(names(&groups[0]), vec!["Thor", "Unknown", "Vulcan"]);
    }

    #[test]
    fn empty_input_has_no_groups() {
        let groups: Vec<CortexGroup<ResponderRecord>> = group_by_cortex(Vec::new());
        assert!(groups.is_empty());
    }
}
