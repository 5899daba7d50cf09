use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{parse_macro_input, FnArg, ItemFn, Pat, PatType, Type};

/// Turns a function with `f64`, `i64` or `bool` parameters into a function callable
/// from expressions, `fn(&[f64]) -> Result<f64, String>`.
///
/// The generated function checks the number of arguments, then converts each argument:
/// `i64` parameters truncate the value and `bool` parameters are true for non-zero values.
#[proc_macro_attribute]
pub fn exevalator_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    match expand(input) {
        Ok(expanded) => expanded.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(input: ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    let attrs = &input.attrs;
    let vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_output = &input.sig.output;
    let fn_body = &input.block;

    let mut arg_extractions = Vec::new();
    for (i, arg) in input.sig.inputs.iter().enumerate() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return Err(syn::Error::new(arg.span(), "methods are not supported"));
        };
        let Pat::Ident(pat_ident) = pat.as_ref() else {
            return Err(syn::Error::new(pat.span(), "unsupported parameter pattern"));
        };
        let arg_name = &pat_ident.ident;

        let type_ident = match ty.as_ref() {
            Type::Path(type_path) => type_path.path.get_ident(),
            _ => None,
        };
        let extract_code = match type_ident.map(|ident| ident.to_string()).as_deref() {
            Some("f64") => quote! { let #arg_name: f64 = args[#i]; },
            Some("i64") => quote! { let #arg_name: i64 = args[#i] as i64; },
            Some("bool") => quote! { let #arg_name: bool = args[#i] != 0.0; },
            _ => {
                return Err(syn::Error::new(
                    ty.span(),
                    "unsupported parameter type, expected f64, i64 or bool",
                ))
            }
        };
        arg_extractions.push(extract_code);
    }

    let args_len = arg_extractions.len();
    Ok(quote! {
        #(#attrs)*
        #vis fn #fn_name(args: &[f64]) #fn_output {
            if args.len() != #args_len {
                return Err(format!("Expected {} arguments, but got {}", #args_len, args.len()));
            }

            #(#arg_extractions)*

            #fn_body
        }
    })
}
