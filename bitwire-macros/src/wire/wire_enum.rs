//! WireEnum derive macro implementation.

use super::wire_attrs;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derive `WireEnum`, `Encode` and `Decode` for a fieldless enum.
pub fn derive_wire_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "WireEnum derive is only supported for enums.",
        ));
    };

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "WireEnum variants cannot carry fields.",
            ));
        }
        if let Some((_, disc)) = &variant.discriminant {
            return Err(syn::Error::new_spanned(
                disc,
                "WireEnum wire values follow declaration order; remove the explicit discriminant.",
            ));
        }
    }

    // The sentinel is the last variant: marked `#[wire(error)]` or named `Error`.
    let Some(sentinel) = data.variants.last() else {
        return Err(syn::Error::new_spanned(
            input,
            "WireEnum needs at least an error sentinel variant.",
        ));
    };
    for variant in data.variants.iter().rev().skip(1) {
        if wire_attrs(&variant.attrs)?.error {
            return Err(syn::Error::new_spanned(
                variant,
                "the #[wire(error)] sentinel must be the last variant.",
            ));
        }
    }
    if !wire_attrs(&sentinel.attrs)?.error && sentinel.ident != "Error" {
        return Err(syn::Error::new_spanned(
            sentinel,
            "the last WireEnum variant must be the sentinel: name it `Error` or mark it #[wire(error)].",
        ));
    }

    let count = (data.variants.len() - 1) as u64;
    let sentinel = &sentinel.ident;
    let real: Vec<_> = data
        .variants
        .iter()
        .take(data.variants.len() - 1)
        .map(|v| &v.ident)
        .collect();
    let raws: Vec<_> = (0..count).collect();

    Ok(quote! {
        impl #impl_generics bitwire::WireEnum for #name #ty_generics #where_clause {
            const COUNT: u64 = #count;
            const ERROR: Self = Self::#sentinel;

            fn to_raw(self) -> u64 {
                match self {
                    #(Self::#real => #raws,)*
                    Self::#sentinel => #count,
                }
            }

            fn from_raw(raw: u64) -> Self {
                match raw {
                    #(#raws => Self::#real,)*
                    _ => Self::#sentinel,
                }
            }
        }

        impl #impl_generics bitwire::Encode for #name #ty_generics #where_clause {
            const MIN_BITS: usize = <Self as bitwire::WireEnum>::BITS as usize;

            fn encode(&self, writer: &mut bitwire::BitWriter<'_>) -> bitwire::Result<()> {
                writer.write_enum(*self)
            }
        }

        impl #impl_generics bitwire::Decode for #name #ty_generics #where_clause {
            const MIN_BITS: usize = <Self as bitwire::WireEnum>::BITS as usize;

            fn decode(reader: &mut bitwire::BitReader<'_>) -> bitwire::Result<Self> {
                reader.read_enum()
            }
        }
    })
}
