//! Decode derive macro implementation.

use super::{Tag, WireField, min_bits_sum, wire_attrs, wire_fields};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derive the `Decode` trait for a struct, and `Tagged` for tagged ones.
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Decode derive supports structs only; use #[derive(WireEnum)] for enums.",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Decode derive is not supported for unions.",
            ));
        }
    };

    let tag = wire_attrs(&input.attrs)?.tag.map(Tag::from_path).transpose()?;
    let fields = wire_fields(&data.fields)?;

    let trait_path = quote! { bitwire::Decode };
    let fields_min = min_bits_sum(&fields, &trait_path);
    let construct = construct(&data.fields, &fields);
    let param = if fields.iter().any(|f| !f.skip) {
        quote! { reader }
    } else {
        quote! { _ }
    };

    let Some(tag) = tag else {
        return Ok(quote! {
            impl #impl_generics bitwire::Decode for #name #ty_generics #where_clause {
                const MIN_BITS: usize = #fields_min;

                fn decode(reader: &mut bitwire::BitReader<'_>) -> bitwire::Result<Self> {
                    reader.ensure_bits(<Self as bitwire::Decode>::MIN_BITS)?;
                    reader.transaction(|#param| Ok(#construct))
                }
            }
        });
    };

    let tag_bits = tag.bits();
    let kind = &tag.kind;
    let variant = &tag.variant;

    Ok(quote! {
        impl #impl_generics bitwire::Decode for #name #ty_generics #where_clause {
            const MIN_BITS: usize = #tag_bits + #fields_min;

            fn decode(reader: &mut bitwire::BitReader<'_>) -> bitwire::Result<Self> {
                reader.ensure_bits(<Self as bitwire::Decode>::MIN_BITS)?;
                reader.transaction(|reader| {
                    let expected = bitwire::WireEnum::to_raw(<Self as bitwire::Tagged>::KIND);
                    let found = bitwire::WireEnum::to_raw(reader.read_enum::<#kind>()?);
                    if found != expected {
                        return Err(bitwire::CodecError::UnexpectedKind { expected, found });
                    }
                    <Self as bitwire::Tagged>::decode_body(reader)
                })
            }
        }

        impl #impl_generics bitwire::Tagged for #name #ty_generics #where_clause {
            type Kind = #kind;

            const KIND: #kind = #variant;

            fn decode_body(reader: &mut bitwire::BitReader<'_>) -> bitwire::Result<Self> {
                reader.ensure_bits(#fields_min)?;
                reader.transaction(|#param| Ok(#construct))
            }
        }
    })
}

// Builds `Self { .. }` / `Self(..)` with fields decoded in declaration order.
fn construct(shape: &Fields, fields: &[WireField<'_>]) -> TokenStream2 {
    let values = fields.iter().map(|f| {
        let ty = f.ty;
        if f.skip {
            quote! { <#ty as core::default::Default>::default() }
        } else {
            quote! { <#ty as bitwire::Decode>::decode(reader)? }
        }
    });

    match shape {
        Fields::Named(_) => {
            let members = fields.iter().map(|f| &f.member);
            quote! { Self { #(#members: #values),* } }
        }
        Fields::Unnamed(_) => quote! { Self(#(#values),*) },
        Fields::Unit => quote! { Self },
    }
}
