//! A randomized binary search tree, also known as a Cartesian tree or treap, whose nodes carry a
//! user-defined aggregate recomputed on every structural change.
//!
//! The core is `treap::Node::merge` and `treap::Node::split`; `treap::CartesianTree` builds
//! insertion, removal, and lookup on top of them.

#[macro_use]
extern crate log;
extern crate rand;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod treap;
