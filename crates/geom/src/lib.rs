#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Exact-rational geometric primitives.
//!
//! This crate implements some of the maths used throughout meshbool to
//! work with:
//!
//! - arbitrary-precision rational scalars,
//! - exact 3D (and 2D) vectors built on top of them,
//! - the `orient2d`/`orient3d` sign predicates the topological core relies
//!   on for every decision it makes.
//!
//! It is deliberately small and knows nothing about meshes, patches or
//! cells: the point of keeping it a separate crate is that the exact
//! arithmetic backend (currently [`num_rational::BigRational`]) can be
//! swapped out without touching anything upstream of it.

mod orient;
mod plane;
mod rational;
mod vector;

pub use orient::{orient2d, orient3d, Orientation};
pub use plane::Plane;
pub use rational::{rat, ratio, Rat};
pub use vector::{Axis, Vec2Exact, Vec3Exact, Vec3F};
