//! Tests for bitset-backed cell sets

#[cfg(test)]
mod tests {
    use quadsplit::spatial::region::CellSet;

    // Tests insertion reports novelty and ignores out-of-range indices
    // Verified by skipping the capacity check
    #[test]
    fn test_insert_reports_new_members_only() {
        let mut set = CellSet::new(5);

        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert!(!set.insert(5));
        assert_eq!(set.len(), 1);
        assert!(!set.contains(5));
    }

    // Tests removal only succeeds for present members
    // Verified by always returning true from remove
    #[test]
    fn test_remove_present_and_absent() {
        let mut set = CellSet::from_indices(4, [0, 2]);

        assert!(set.remove(2));
        assert!(!set.remove(2));
        assert!(!set.remove(9));
        assert_eq!(set.to_vec(), vec![0]);
    }

    // Tests iteration yields ascending indices regardless of insertion order
    // Verified by collecting into insertion order
    #[test]
    fn test_iteration_is_ascending() {
        let set = CellSet::from_indices(10, [7, 1, 4, 9]);

        assert_eq!(set.to_vec(), vec![1, 4, 7, 9]);
        assert_eq!(set.first(), Some(1));
    }

    // Tests full, clear, and emptiness
    // Verified by filling only the first word in full
    #[test]
    fn test_full_and_clear() {
        let mut set = CellSet::full(70);

        assert_eq!(set.len(), 70);
        assert!(set.contains(69));
        assert_eq!(set.capacity(), 70);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.first(), None);
    }

    // Tests overlap detection
    // Verified by checking only the first member
    #[test]
    fn test_intersects() {
        let a = CellSet::from_indices(8, [1, 5]);
        let b = CellSet::from_indices(8, [2, 5]);
        let c = CellSet::from_indices(8, [0, 3]);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!CellSet::new(8).intersects(&a));
    }

    // Tests the display form lists members
    // Verified by printing capacity instead of length
    #[test]
    fn test_display_lists_members() {
        let set = CellSet::from_indices(6, [4, 2]);

        assert_eq!(set.to_string(), "CellSet(2 cells: [2, 4])");
    }
}
