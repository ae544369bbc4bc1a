// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Fatal errors raised by data layers.
//!
//! Context-level allocation problems are not part of this taxonomy; they are reported as
//! [`crate::context::ContextError`] through [`crate::diagnostics::Diagnostics`] and leave
//! the layer in a degraded but usable state.

use crate::pixel_formats::ElementType;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Bad buffer count, shape or component count.
    #[error("Invalid configuration for DataLayer {name}: {reason}")]
    Configuration { name: String, reason: String },
    /// No storage format satisfies the request on this context.
    #[error("Unsupported format for DataLayer {name}: {reason}")]
    UnsupportedFormat { name: String, reason: String },
    #[error("Invalid data length {actual} for DataLayer {name} of size {shape}x{num_components}")]
    InvalidDataLength {
        name: String,
        actual: usize,
        shape: String,
        num_components: u8,
    },
    #[error("Invalid data of type {actual} supplied to DataLayer {name} of type {expected}")]
    InvalidDataType {
        name: String,
        actual: ElementType,
        expected: ElementType,
    },
    #[error("DataLayer {name} is not writable")]
    NotWritable { name: String },
    /// A 1D accessor used on a 2D layer, or the reverse, or a shape kind change on resize.
    #[error("Wrong shape kind for DataLayer {name}: {reason}")]
    WrongShapeKind { name: String, reason: String },
}
