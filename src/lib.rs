//! # spectral-vn
//!
//! Spectral vertex nomination on a single graph.
//!
//! Given a graph `G = (V, E)` and a subset of `V` called the seed, vertex
//! nomination ranks every vertex by how likely it is to share an attribute with
//! the seed. The graph is embedded once into a low dimensional space (or an
//! embedding is supplied), then each vertex is scored per attribute with a
//! weighted k-nearest-neighbour rule over the seed vertices.
//!
//! ```
//! use spectral_vn::graph::Adjacency;
//! use spectral_vn::sampling::sbm;
//! use spectral_vn::seeds::SeedInput;
//! use spectral_vn::{NominatorBuilder, VertexNominator};
//!
//! let adjacency = sbm(&[20, 20], &[vec![0.7, 0.05], vec![0.05, 0.7]], 7)?;
//! let mut svn = NominatorBuilder::new().with_embedder_name("ASE").build()?;
//! let nomination = svn.fit_transform(
//!     Some(&Adjacency::Dense(adjacency)),
//!     &SeedInput::Labelled(vec![(0, 1), (3, 1), (25, 2)]),
//!     5,
//! )?;
//! assert_eq!(nomination.shape(), (40, 2));
//! assert_eq!(nomination.order_for(1).map(|o| o.len()), Some(40));
//! # Ok::<(), spectral_vn::NominationError>(())
//! ```
pub mod builder;
pub mod core;
pub mod eigenmaps;
pub mod errors;
pub mod graph;
pub mod input;
pub mod laplacian;
pub mod operators;
pub mod ranking;
pub mod sampling;
pub mod seeds;
pub mod weighting;

pub use crate::builder::NominatorBuilder;
pub use crate::core::{SpectralVertexNominator, VertexNominator};
pub use crate::errors::{NominationError, Result};
pub use crate::ranking::Nomination;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct ReadmeDoctests;

#[cfg(test)]
mod tests;
