//! Cyclic voltammetry analysis: instrument text in, validated per-cycle
//! capacitance and summary statistics out.

pub mod data;
pub mod style;
