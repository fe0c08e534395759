/// Fixed-size bitset of candidate variants per cell
pub mod bitset;
/// Solver context and collapse orchestration
pub mod executor;
/// Constraint propagation to a fixpoint
pub mod propagation;
/// Lowest-entropy cell choice and candidate draws
pub mod selection;
