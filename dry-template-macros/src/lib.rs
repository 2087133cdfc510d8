mod model;

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use std::{collections::HashMap, path::Path};
use syn::{DeriveInput, LitStr, parse::Parse, parse::ParseStream, parse_macro_input, Token};
use walkdir::WalkDir;

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            for lc in c.to_lowercase() {
                result.push(lc);
            }
        } else {
            result.push(c);
        }
    }
    result
}

fn fn_name(name: &str) -> String {
    to_snake_case(&name.replace(['-', '.', ' ', '/'], "_"))
}

/// `blog/item.html` below the root becomes `blog_item`
fn directory_fn_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    let name = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    fn_name(&name)
}

/// Generates `pub fn <name>() -> &'static Template`, compiling `content` on first use
fn generate_code(name: &str, content: proc_macro2::TokenStream) -> proc_macro2::TokenStream {
    let ident = format_ident!("{}", fn_name(name));
    quote! {
        pub fn #ident() -> &'static ::dry_template::Template {
            static TEMPLATE: ::std::sync::LazyLock<::dry_template::Template> =
                ::std::sync::LazyLock::new(|| ::dry_template::Template::compile(#content));
            &TEMPLATE
        }
    }
}

fn generate_code_for_file(name: &str, path: &Path) -> proc_macro2::TokenStream {
    let path_str = path.to_string_lossy();
    // include_str! ties the output to the source file so edits trigger a recompile
    generate_code(name, quote! { include_str!(#path_str) })
}

struct StrInput {
    name: LitStr,
    content: LitStr,
}

impl Parse for StrInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: LitStr = input.parse()?;
        input.parse::<Token![,]>()?;
        let content: LitStr = input.parse()?;
        input.parse::<Option<Token![,]>>()?;
        Ok(StrInput { name, content })
    }
}

fn manifest_path(lit: &LitStr) -> syn::Result<std::path::PathBuf> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map_err(|_| syn::Error::new(lit.span(), "CARGO_MANIFEST_DIR not set"))?;
    let path = Path::new(&manifest_dir).join(lit.value());
    if !path.exists() {
        return Err(syn::Error::new(lit.span(), format!("Not found: {:?}", path)));
    }
    Ok(path)
}

fn generate_directory(dir_lit: &LitStr) -> syn::Result<proc_macro2::TokenStream> {
    let root_path = manifest_path(dir_lit)?;
    let mut names = HashMap::new();
    let mut functions = Vec::new();

    for entry in WalkDir::new(&root_path).sort_by_file_name() {
        let entry = entry.map_err(|err| syn::Error::new(dir_lit.span(), err.to_string()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "html") {
            continue;
        }
        let name = directory_fn_name(&root_path, path);
        if let Some(previous) = names.insert(name.clone(), path.to_path_buf()) {
            return Err(syn::Error::new(
                dir_lit.span(),
                format!(
                    "{:?} and {:?} both generate `fn {}`",
                    previous, path, name
                ),
            ));
        }
        functions.push(generate_code_for_file(&name, path));
    }

    Ok(quote! {
        #(#functions)*
    })
}

/// One function per `.html` template below a directory relative to the crate root,
/// named after the relative path (`blog/item.html` is `blog_item()`)
#[proc_macro]
pub fn dry_template_directory(input: TokenStream) -> TokenStream {
    let dir_lit = parse_macro_input!(input as LitStr);
    generate_directory(&dir_lit)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// One function named after the file stem
#[proc_macro]
pub fn dry_template_file(input: TokenStream) -> TokenStream {
    let file_lit = parse_macro_input!(input as LitStr);
    match manifest_path(&file_lit) {
        Ok(path) => {
            let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
            TokenStream::from(generate_code_for_file(&stem, &path))
        }
        Err(err) => err.to_compile_error().into(),
    }
}

#[proc_macro]
pub fn dry_template_str(input: TokenStream) -> TokenStream {
    let StrInput { name, content } = parse_macro_input!(input as StrInput);
    TokenStream::from(generate_code(&name.value(), quote! { #content }))
}

/// Implements `Model` and `ToValue` for a struct with named fields.
///
/// - `#[model(rename = "name")]` exposes a field under another name
/// - `#[model(skip)]` hides a field
/// - `#[model(methods(a, b))]` on the struct exposes zero-argument methods as `{a()}`
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    model::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
