use darling::{FromDeriveInput, FromField, FromMeta, ast::Data, util::Ignored};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Error, Generics, Ident, Type};

///
/// RecordInput
///

#[derive(FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
struct RecordInput {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, RecordField>,
}

///
/// RecordField
///

#[derive(FromField)]
#[darling(attributes(record))]
struct RecordField {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    rename: Option<String>,

    #[darling(default)]
    preload: Option<String>,

    #[darling(default)]
    column: Option<String>,

    #[darling(multiple, rename = "tag")]
    tags: Vec<TagArg>,

    #[darling(default)]
    skip: bool,
}

///
/// TagArg
///

#[derive(FromMeta)]
struct TagArg {
    name: String,
    value: String,
}

impl RecordField {
    fn model_name(&self, ident: &Ident) -> String {
        self.rename.clone().unwrap_or_else(|| ident.to_string())
    }

    // shorthand attributes first, then explicit tags in declaration order
    fn tag_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(preload) = &self.preload {
            pairs.push(("preload".to_string(), preload.clone()));
        }
        if let Some(column) = &self.column {
            pairs.push(("column".to_string(), column.clone()));
        }
        for tag in &self.tags {
            pairs.push((tag.name.clone(), tag.value.clone()));
        }

        pairs
    }
}

// derive_record
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let input = match RecordInput::from_derive_input(&input) {
        Ok(input) => input,
        Err(err) => return err.write_errors(),
    };

    if !input.generics.params.is_empty() {
        return Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic structs",
        )
        .to_compile_error();
    }

    let Some(fields) = input.data.take_struct() else {
        return Error::new_spanned(
            &input.ident,
            "Record can only be derived for structs with named fields",
        )
        .to_compile_error();
    };

    let ident = &input.ident;
    let name = ident.to_string();

    // (field ident, type, registered name, tags) in model order
    let mut model_fields = Vec::new();
    for field in fields.fields.iter().filter(|field| !field.skip) {
        let Some(field_ident) = field.ident.as_ref() else {
            return Error::new_spanned(&field.ty, "Record fields must be named").to_compile_error();
        };
        model_fields.push((
            field_ident,
            &field.ty,
            field.model_name(field_ident),
            field.tag_pairs(),
        ));
    }

    let field_models = model_fields.iter().map(|(_, ty, name, tags)| {
        let tags = tags.iter().map(|(key, value)| {
            quote! {
                ::graft::model::FieldTag { key: #key, value: #value }
            }
        });

        quote! {
            ::graft::model::FieldModel {
                name: #name,
                tags: &[#(#tags),*],
                record: <#ty as ::graft::traits::FieldValue>::record_model,
            }
        }
    });

    let get_arms = model_fields.iter().enumerate().map(|(index, (field, _, _, _))| {
        quote! {
            #index => ::core::option::Option::Some(
                ::graft::traits::FieldValue::to_value(&self.#field)
            ),
        }
    });

    let set_arms = model_fields.iter().enumerate().map(|(index, (field, ty, _, _))| {
        quote! {
            #index => {
                self.#field = <#ty as ::graft::traits::FieldValue>::try_from_value(value)?;
                ::core::result::Result::Ok(())
            }
        }
    });

    let ref_arms = model_fields.iter().enumerate().map(|(index, (field, _, _, _))| {
        quote! {
            #index => ::core::option::Option::Some(&self.#field as &dyn ::core::any::Any),
        }
    });

    let mut_arms = model_fields.iter().enumerate().map(|(index, (field, _, _, _))| {
        quote! {
            #index => ::core::option::Option::Some(&mut self.#field as &mut dyn ::core::any::Any),
        }
    });

    quote! {
        impl ::graft::traits::Path for #ident {
            const PATH: &'static str = concat!(module_path!(), "::", #name);
        }

        impl ::graft::traits::Record for #ident {
            const MODEL: &'static ::graft::model::RecordModel = &::graft::model::RecordModel {
                path: <Self as ::graft::traits::Path>::PATH,
                name: #name,
                fields: &[#(#field_models),*],
            };

            fn get_value(&self, index: usize) -> ::core::option::Option<::graft::value::Value> {
                match index {
                    #(#get_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables, unreachable_code)]
            fn set_value(
                &mut self,
                index: usize,
                value: &::graft::value::Value,
            ) -> ::core::result::Result<(), ::graft::traits::FieldSetError> {
                match index {
                    #(#set_arms)*
                    _ => ::core::result::Result::Err(::graft::traits::FieldSetError::OutOfRange),
                }
            }

            fn field_ref(&self, index: usize) -> ::core::option::Option<&dyn ::core::any::Any> {
                match index {
                    #(#ref_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::core::any::Any> {
                match index {
                    #(#mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::graft::traits::FieldValue for #ident {
            fn to_value(&self) -> ::graft::value::Value {
                ::graft::value::Value::Record(::graft::traits::Record::to_record_value(self))
            }

            fn from_value(value: &::graft::value::Value) -> ::core::option::Option<Self> {
                <Self as ::graft::traits::FieldValue>::try_from_value(value).ok()
            }

            fn try_from_value(
                value: &::graft::value::Value,
            ) -> ::core::result::Result<Self, ::graft::traits::FieldSetError> {
                match value {
                    ::graft::value::Value::Record(record) => {
                        <Self as ::graft::traits::Record>::from_record_value(record).map_err(
                            |err| ::graft::traits::FieldSetError::Nested(::std::boxed::Box::new(err)),
                        )
                    }
                    _ => ::core::result::Result::Err(::graft::traits::FieldSetError::Incompatible),
                }
            }

            fn record_model() -> ::core::option::Option<&'static ::graft::model::RecordModel> {
                ::core::option::Option::Some(<Self as ::graft::traits::Record>::MODEL)
            }
        }

        impl ::graft::traits::RecordHandle for #ident {
            type Record = Self;

            fn record(&self) -> ::core::option::Option<&Self> {
                ::core::option::Option::Some(self)
            }

            fn record_mut(&mut self) -> ::core::option::Option<&mut Self> {
                ::core::option::Option::Some(self)
            }
        }
    }
}
