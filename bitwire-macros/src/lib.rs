//! Derive macros for bitwire.

use proc_macro::TokenStream;
mod wire;

/// Derive `Encode` for a struct.
///
/// Fields are written in declaration order. `#[wire(skip)]` leaves a field
/// off the wire, and `#[wire(tag = Kind::Variant)]` on the struct writes the
/// discriminant first.
#[proc_macro_derive(Encode, attributes(wire))]
pub fn derive_encode(input: TokenStream) -> TokenStream {
    wire::derive_encode(input)
}

/// Derive `Decode` for a struct, plus `Tagged` when it carries
/// `#[wire(tag = ...)]`. Skipped fields are filled with `Default::default()`.
#[proc_macro_derive(Decode, attributes(wire))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    wire::derive_decode(input)
}

/// Derive `WireEnum`, `Encode` and `Decode` for a fieldless enum whose last
/// variant is the error sentinel.
#[proc_macro_derive(WireEnum, attributes(wire))]
pub fn derive_wire_enum(input: TokenStream) -> TokenStream {
    wire::derive_wire_enum(input)
}
