use crate::core::weights::AssociationTable;

/// Explain a match as "<interest> at <location>" pairs
///
/// Only pairs where both sides are already common and the association table
/// ties the interest to the location are emitted. Interests are walked in
/// the given order, locations in the table's declared order.
pub fn derive_cross_matches<S: AsRef<str>>(
    common_interests: &[S],
    common_locations: &[S],
    associations: &AssociationTable,
) -> Vec<String> {
    let mut cross_matches = Vec::new();

    for interest in common_interests {
        let interest = interest.as_ref();
        for category in associations.categories(interest) {
            if common_locations.iter().any(|loc| loc.as_ref() == category.as_str()) {
                cross_matches.push(format!("{} at {}", interest, category));
            }
        }
    }

    cross_matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_has_no_park_association() {
        let result = derive_cross_matches(&["Music"], &["parks"], &AssociationTable::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_table_order_wins_over_location_order() {
        let result = derive_cross_matches(
            &["Music", "Dance"],
            &["festivals", "clubs", "shows"],
            &AssociationTable::default(),
        );
        assert_eq!(
            result,
            vec![
                "Music at shows",
                "Music at festivals",
                "Dance at clubs",
                "Dance at shows",
                "Dance at festivals",
            ]
        );
    }

    #[test]
    fn test_unknown_interest_yields_nothing() {
        let result = derive_cross_matches(&["Knitting"], &["cafes"], &AssociationTable::default());
        assert!(result.is_empty());
    }
}
