//! Tests for `CandidateSet` membership, pruning and ordering

#[cfg(test)]
mod tests {
    use wavetile::algorithm::bitset::CandidateSet;

    // Tests a new set is empty and a full set holds every index
    // Verified by initializing both sets with the same bit value
    #[test]
    fn test_new_and_all() {
        let empty = CandidateSet::new(6);
        assert!(empty.is_empty());
        assert_eq!(empty.count(), 0);
        assert_eq!(empty.capacity(), 6);

        let full = CandidateSet::all(6);
        assert_eq!(full.count(), 6);
        assert_eq!(full.to_vec(), vec![0, 1, 2, 3, 4, 5]);
    }

    // Tests singleton sets and out-of-range indices
    // Verified by removing the bounds check from insert
    #[test]
    fn test_singleton_and_insert_bounds() {
        let single = CandidateSet::singleton(4, 2);
        assert_eq!(single.to_vec(), vec![2]);
        assert!(single.contains(2));
        assert!(!single.contains(1));

        let outside = CandidateSet::singleton(4, 9);
        assert!(outside.is_empty());
        assert!(!outside.contains(9));
    }

    // Tests retain removes rejected indices and reports how many
    // Verified by returning the number of kept indices
    #[test]
    fn test_retain_counts_removals() {
        let mut set = CandidateSet::all(8);
        let removed = set.retain(|index| index % 3 == 0);
        assert_eq!(removed, 5);
        assert_eq!(set.to_vec(), vec![0, 3, 6]);

        assert_eq!(set.retain(|_| true), 0);
        assert_eq!(set.retain(|_| false), 3);
        assert!(set.is_empty());
    }

    // Tests iteration and nth follow catalog order
    // Verified by iterating the bits in reverse
    #[test]
    fn test_ordered_iteration() {
        let mut set = CandidateSet::new(10);
        for index in [7, 1, 4] {
            set.insert(index);
        }
        set.insert(4);

        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 4, 7]);
        assert_eq!(set.nth(0), Some(1));
        assert_eq!(set.nth(2), Some(7));
        assert_eq!(set.nth(3), None);
        assert_eq!(set.count(), 3);
    }

    // Tests display output
    // Verified by printing the capacity instead of the count
    #[test]
    fn test_display() {
        let set = CandidateSet::singleton(5, 3);
        assert_eq!(set.to_string(), "CandidateSet(1 candidates: [3])");
    }
}
