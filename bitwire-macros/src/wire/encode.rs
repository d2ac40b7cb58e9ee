//! Encode derive macro implementation.

use super::{Tag, min_bits_sum, wire_attrs, wire_fields};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, parse_macro_input};

/// Derive the `Encode` trait for a struct.
pub fn derive_encode(input: TokenStream) -> TokenStream {
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
                "Encode derive supports structs only; use #[derive(WireEnum)] for enums.",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Encode derive is not supported for unions.",
            ));
        }
    };

    let tag = wire_attrs(&input.attrs)?.tag.map(Tag::from_path).transpose()?;
    let fields = wire_fields(&data.fields)?;
    let encoded: Vec<_> = fields.iter().filter(|f| !f.skip).collect();

    let trait_path = quote! { bitwire::Encode };
    let fields_min = min_bits_sum(&fields, &trait_path);
    let (tag_bits, tag_write) = match &tag {
        Some(tag) => {
            let bits = tag.bits();
            let variant = &tag.variant;
            (quote! { #bits + }, quote! { writer.write_enum(#variant)?; })
        }
        None => (quote! {}, quote! {}),
    };

    let param = if tag.is_some() || !encoded.is_empty() {
        quote! { writer }
    } else {
        quote! { _ }
    };
    let writes = encoded.iter().map(|f| {
        let member = &f.member;
        quote! { bitwire::Encode::encode(&self.#member, writer)?; }
    });
    let lens = encoded.iter().map(|f| {
        let member = &f.member;
        quote! { pos += bitwire::Encode::bit_len_at(&self.#member, pos); }
    });

    Ok(quote! {
        impl #impl_generics bitwire::Encode for #name #ty_generics #where_clause {
            const MIN_BITS: usize = #tag_bits #fields_min;

            fn encode(&self, writer: &mut bitwire::BitWriter<'_>) -> bitwire::Result<()> {
                writer.ensure_bits(<Self as bitwire::Encode>::MIN_BITS)?;
                writer.transaction(|#param| {
                    #tag_write
                    #(#writes)*
                    Ok(())
                })
            }

            #[allow(unused_mut)]
            fn bit_len_at(&self, start: usize) -> usize {
                let mut pos = start + #tag_bits 0usize;
                #(#lens)*
                pos - start
            }
        }
    })
}
