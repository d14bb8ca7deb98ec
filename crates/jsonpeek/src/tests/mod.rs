mod property_merge;
mod property_tree;
mod scenarios;

/// Number of quickcheck cases per property.
fn quickcheck_tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}
