pub mod constraint_builder;
pub mod encoder;
pub mod oracle;

pub use constraint_builder::{exactly_one, Clause, ConstraintBuilder, ConstraintStats};
pub use encoder::{Literal, Var, VarEncoder};
pub use oracle::{Model, SatOracle, VarisatOracle};
