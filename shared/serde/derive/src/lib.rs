//! # Assetlink Serde Derive
//! `#[derive(Serde)]` for message structs: fields are written in declaration
//! order and read back in the same order.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Fields, Index};

#[proc_macro_derive(Serde)]
pub fn derive_serde(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_serde_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn derive_serde_impl(input: DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new(
                input.span(),
                "`#[derive(Serde)]` is only available on structs",
            ))
        }
    };

    let serde = quote!(::assetlink_serde::Serde);

    let (ser_body, de_body, bit_length_body) = match &data.fields {
        Fields::Named(fields) => {
            let names: Vec<_> = fields.named.iter().map(|field| &field.ident).collect();
            (
                quote! { #( #serde::ser(&self.#names, writer); )* },
                quote! { Ok(Self { #( #names: #serde::de(reader)?, )* }) },
                quote! { 0_u32 #( .saturating_add(#serde::bit_length(&self.#names)) )* },
            )
        }
        Fields::Unnamed(fields) => {
            let indexes: Vec<_> = (0..fields.unnamed.len()).map(Index::from).collect();
            let values: Vec<_> = (0..fields.unnamed.len())
                .map(|index| format_ident!("value_{}", index))
                .collect();
            (
                quote! { #( #serde::ser(&self.#indexes, writer); )* },
                quote! {
                    #( let #values = #serde::de(reader)?; )*
                    Ok(Self( #( #values ),* ))
                },
                quote! { 0_u32 #( .saturating_add(#serde::bit_length(&self.#indexes)) )* },
            )
        }
        Fields::Unit => (quote! {}, quote! { Ok(Self) }, quote! { 0_u32 }),
    };

    Ok(quote! {
        impl #impl_generics #serde for #ident #type_generics #where_clause {
            #[allow(unused_variables)]
            fn ser(&self, writer: &mut dyn ::assetlink_serde::BitWrite) {
                #ser_body
            }

            #[allow(unused_variables)]
            fn de(
                reader: &mut ::assetlink_serde::BitReader,
            ) -> ::std::result::Result<Self, ::assetlink_serde::SerdeErr> {
                #de_body
            }

            fn bit_length(&self) -> u32 {
                #bit_length_body
            }
        }
    })
}
