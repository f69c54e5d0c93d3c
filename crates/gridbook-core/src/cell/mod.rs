//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The typed value resolved for a cell
//! - [`CellRef`] and [`ReferenceParser`] - A cell's location (e.g., "A1")
//! - the free functions of the A1 reference codec

mod address;
mod value;

pub use address::{
    decode_column, decode_row, encode_column, encode_ref, encode_row, CellRef, ReferenceParser,
};
pub use value::CellValue;
