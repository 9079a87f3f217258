/// Breadth-first region connectivity predicate
pub mod connectivity;
/// Exhaustive enumeration for ground-truth optima
pub mod exhaustive;
/// Corner-seeded greedy region growing
pub mod greedy;
/// Region sums and the imbalance objective
pub mod objective;
/// Checkpoint callbacks invoked by the algorithms
pub mod observer;
/// Common interface over all partitioning algorithms
pub mod strategy;
/// Block split followed by boundary-swap refinement
pub mod two_stage;
