//! Generic cryptographic procedures used by the dual receiver scheme.
pub(crate) mod challenge_context;
pub mod cramer_shoup;
