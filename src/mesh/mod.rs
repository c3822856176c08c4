//! Printable solids built from 2D triangulations, for the STL backend

pub mod extrusion;
pub mod solid;
pub mod stl;

pub use extrusion::{extrude_stroke, extrude_triangulation};
pub use solid::{Facet, Solid};
pub use stl::write_stl;
