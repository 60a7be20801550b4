/// Runtime values and static kinds.
///
/// Defines the `Kind` enum used by static type computation and the `Value`
/// enum produced by evaluation, together with the conversions and checks the
/// evaluator needs to report kind mismatches.
pub mod core;
