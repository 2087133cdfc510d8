use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DataStruct, DeriveInput, Error, Fields, Ident, LitStr, Result,
    ext::IdentExt,
};

/// Field level `#[model(...)]` configuration
#[derive(Debug, Default)]
struct FieldCfg {
    skip: bool,
    rename: Option<String>,
}

fn parse_field_cfg(attrs: &[Attribute]) -> Result<FieldCfg> {
    let mut cfg = FieldCfg::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("model")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                cfg.skip = true;
                return Ok(());
            }
            if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                cfg.rename = Some(name.value());
                return Ok(());
            }
            Err(meta.error("expected `skip` or `rename = \"...\"`"))
        })?;
    }
    Ok(cfg)
}

/// Struct level `#[model(methods(...))]`
fn parse_methods(attrs: &[Attribute]) -> Result<Vec<Ident>> {
    let mut methods = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("model")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("methods") {
                return Err(meta.error("expected `methods(...)`"));
            }
            meta.parse_nested_meta(|method| {
                let ident = method
                    .path
                    .get_ident()
                    .cloned()
                    .ok_or_else(|| method.error("expected a method name"))?;
                methods.push(ident);
                Ok(())
            })
        })?;
    }
    Ok(methods)
}

pub fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(named),
            ..
        }) => &named.named,
        _ => {
            return Err(Error::new_spanned(
                name,
                "`#[derive(Model)]` only supports structs with named fields",
            ));
        }
    };

    let mut field_arms = Vec::new();
    for field in fields {
        let cfg = parse_field_cfg(&field.attrs)?;
        let Some(ident) = &field.ident else {
            continue;
        };
        if cfg.skip {
            continue;
        }
        let key = cfg.rename.unwrap_or_else(|| ident.unraw().to_string());
        field_arms.push(quote! {
            #key => ::core::option::Option::Some(::dry_template::ToValue::to_value(&self.#ident)),
        });
    }

    let method_arms = parse_methods(&input.attrs)?.into_iter().map(|method| {
        let key = method.unraw().to_string();
        quote! {
            #key => ::core::option::Option::Some(::dry_template::Value::from(self.#method())),
        }
    });

    Ok(quote! {
        impl #impl_generics ::dry_template::Model for #name #ty_generics #where_clause {
            fn get(&self, key: &str) -> ::core::option::Option<::dry_template::Value<'_>> {
                match key {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn call(&self, method: &str) -> ::core::option::Option<::dry_template::Value<'_>> {
                match method {
                    #(#method_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::dry_template::ToValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> ::dry_template::Value<'_> {
                ::dry_template::Value::Model(self)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn expand_str(tokens: TokenStream2) -> Result<String> {
        let input: DeriveInput = syn::parse2(tokens).unwrap();
        expand(&input).map(|ts| ts.to_string())
    }

    #[test]
    fn expands_fields() {
        let code = expand_str(quote! {
            struct User {
                name: String,
                #[model(rename = "years")]
                age: u32,
                #[model(skip)]
                secret: String,
            }
        })
        .unwrap();
        assert!(code.contains("\"name\" =>"));
        assert!(code.contains("\"years\" =>"));
        assert!(!code.contains("\"age\""));
        assert!(!code.contains("secret"));
    }

    #[test]
    fn expands_methods() {
        let code = expand_str(quote! {
            #[model(methods(full_name))]
            struct User { first: String }
        })
        .unwrap();
        assert!(code.contains("\"full_name\" =>"));
        assert_eq!(code.matches("full_name").count(), 2);
    }

    #[test]
    fn raw_identifiers_are_unraw() {
        let code = expand_str(quote! {
            struct Item { r#type: String }
        })
        .unwrap();
        assert!(code.contains("\"type\" =>"));
    }

    #[test]
    fn rejects_enums_and_tuples() {
        assert!(expand_str(quote! { enum E { A } }).is_err());
        assert!(expand_str(quote! { struct T(String); }).is_err());
    }

    #[test]
    fn rejects_unknown_attributes() {
        let err = expand_str(quote! {
            struct User {
                #[model(hidden)]
                name: String,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("expected `skip`"));
        assert!(expand_str(quote! {
            #[model(fields(a))]
            struct User { name: String }
        })
        .is_err());
    }
}
