//! weft: dense-matrix primitives and feed-forward network topologies.
//!
//! The crate is built around a small row-major matrix core: owning
//! [`math::Matrix`] buffers plus zero-copy strided views for slicing a row
//! or a block of columns out of a larger table. On top of it,
//! [`network::Network`] wires per-layer weight, bias, and activation
//! matrices into a sigmoid feed-forward pipeline.
//!
//! Shape contracts are checked eagerly and violations panic at the call
//! site. Randomness is always passed in as an explicit [`rand::Rng`], so
//! seeded runs reproduce exactly.

pub mod config;
pub mod math;
pub mod network;
